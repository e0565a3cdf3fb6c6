//! Narrowing of collections by text, category and date. All conditions of a query are combined
//! with AND, results of dated domains come back sorted by date, latest first.

use chrono::NaiveDate;
use clap::ValueEnum;

use crate::store::entities::{
    Activity, ActivityType, Dated, Debt, DebtKind, FoodCategory, FoodExpense, GeneralExpense,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ActivityFilter {
    #[default]
    All,
    Today,
    /// Dated strictly after today.
    Upcoming,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DebtFilter {
    #[default]
    All,
    OwedToMe,
    OwedByMe,
}

/// Lowercased needle of a text search. Blank queries match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextQuery(Option<String>);

impl TextQuery {
    pub fn new(query: Option<&str>) -> Self {
        Self(
            query
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_lowercase),
        )
    }

    pub fn matches_any<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> bool {
        let Some(needle) = &self.0 else {
            return true;
        };
        fields
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle.as_str()))
    }
}

/// Latest date first. Records sharing a date keep their collection order.
pub fn sort_by_date_desc<T: Dated>(records: &mut [&T]) {
    records.sort_by(|a, b| b.date().cmp(&a.date()));
}

#[derive(Debug, Clone, Default)]
pub struct ActivityQuery {
    pub text: TextQuery,
    pub kind: Option<ActivityType>,
    pub filter: ActivityFilter,
}

impl ActivityQuery {
    pub fn matches(&self, activity: &Activity, today: NaiveDate) -> bool {
        let filter_passes = match self.filter {
            ActivityFilter::All => true,
            ActivityFilter::Today => activity.date == today,
            ActivityFilter::Upcoming => activity.date > today,
            ActivityFilter::Completed => activity.completed,
        };
        filter_passes
            && self.kind.map_or(true, |kind| kind == activity.kind)
            && self
                .text
                .matches_any([activity.title.as_str(), activity.description.as_str()])
    }

    pub fn apply<'a>(&self, activities: &'a [Activity], today: NaiveDate) -> Vec<&'a Activity> {
        let mut result = activities
            .iter()
            .filter(|v| self.matches(v, today))
            .collect::<Vec<_>>();
        sort_by_date_desc(&mut result);
        result
    }
}

#[derive(Debug, Clone, Default)]
pub struct FoodExpenseQuery {
    pub text: TextQuery,
    pub category: Option<FoodCategory>,
}

impl FoodExpenseQuery {
    pub fn matches(&self, expense: &FoodExpense) -> bool {
        self.category.map_or(true, |category| category == expense.category)
            && self.text.matches_any([expense.name.as_str()])
    }

    pub fn apply<'a>(&self, expenses: &'a [FoodExpense]) -> Vec<&'a FoodExpense> {
        let mut result = expenses
            .iter()
            .filter(|v| self.matches(v))
            .collect::<Vec<_>>();
        sort_by_date_desc(&mut result);
        result
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeneralExpenseQuery {
    pub text: TextQuery,
}

impl GeneralExpenseQuery {
    pub fn apply<'a>(&self, expenses: &'a [GeneralExpense]) -> Vec<&'a GeneralExpense> {
        let mut result = expenses
            .iter()
            .filter(|v| self.text.matches_any([v.label.as_str()]))
            .collect::<Vec<_>>();
        sort_by_date_desc(&mut result);
        result
    }
}

impl DebtFilter {
    pub fn matches(&self, debt: &Debt) -> bool {
        match self {
            DebtFilter::All => true,
            DebtFilter::OwedToMe => debt.kind == DebtKind::OwedToMe,
            DebtFilter::OwedByMe => debt.kind == DebtKind::OwedByMe,
        }
    }

    /// Debts keep their collection order.
    pub fn apply<'a>(&self, debts: &'a [Debt]) -> Vec<&'a Debt> {
        debts.iter().filter(|v| self.matches(v)).collect()
    }
}
