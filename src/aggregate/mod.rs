//! Read-only statistics over a store's current records. Nothing here mutates or fails: empty
//! input gives zero or `None`.

pub mod activity;
pub mod debt;
pub mod expense;

use chrono::NaiveDate;

use crate::{
    store::entities::{Amount, Dated},
    utils::time::same_month,
};

/// Sum of all amounts.
pub fn total<'a, T: Amount + 'a>(records: impl IntoIterator<Item = &'a T>) -> f64 {
    records.into_iter().map(Amount::amount).sum()
}

/// Sum of amounts dated in the same calendar month and year as `today`.
pub fn monthly_total<'a, T: Amount + Dated + 'a>(
    records: impl IntoIterator<Item = &'a T>,
    today: NaiveDate,
) -> f64 {
    records
        .into_iter()
        .filter(|v| same_month(v.date(), today))
        .map(Amount::amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use crate::store::entities::GeneralExpense;

    use super::{monthly_total, total};

    fn expense(price: f64, date: NaiveDate) -> GeneralExpense {
        GeneralExpense {
            id: format!("{price}-{date}"),
            label: "Transport".into(),
            price,
            date,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_monthly_total_uses_calendar_month() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let expenses = [
            expense(100., NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            expense(50., NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()),
            // Within 30 days, but last month.
            expense(25., NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()),
            // Same month, different year.
            expense(10., NaiveDate::from_ymd_opt(2023, 3, 10).unwrap()),
        ];
        assert_eq!(monthly_total(&expenses, today), 150.);
        assert_eq!(total(&expenses), 185.);
    }

    #[test]
    fn test_empty_totals() {
        let expenses: Vec<GeneralExpense> = vec![];
        assert_eq!(total(&expenses), 0.);
        assert_eq!(
            monthly_total(&expenses, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            0.
        );
    }
}
