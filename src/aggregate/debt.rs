use crate::store::entities::{Debt, DebtKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebtSummary {
    pub owed_to_me: f64,
    pub owed_by_me: f64,
    /// Positive when others owe more than is owed to them.
    pub net_balance: f64,
}

fn total_of(debts: &[Debt], kind: DebtKind) -> f64 {
    debts
        .iter()
        .filter(|v| v.kind == kind)
        .map(|v| v.amount)
        .sum()
}

pub fn total_owed_to_me(debts: &[Debt]) -> f64 {
    total_of(debts, DebtKind::OwedToMe)
}

pub fn total_owed_by_me(debts: &[Debt]) -> f64 {
    total_of(debts, DebtKind::OwedByMe)
}

pub fn net_balance(debts: &[Debt]) -> f64 {
    total_owed_to_me(debts) - total_owed_by_me(debts)
}

pub fn debt_summary(debts: &[Debt]) -> DebtSummary {
    let owed_to_me = total_owed_to_me(debts);
    let owed_by_me = total_owed_by_me(debts);
    DebtSummary {
        owed_to_me,
        owed_by_me,
        net_balance: owed_to_me - owed_by_me,
    }
}
