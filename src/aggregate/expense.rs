use crate::store::entities::{FoodCategory, FoodExpense, GeneralExpense};

/// Sum of `price * quantity` for one category.
pub fn total_by_category(expenses: &[FoodExpense], category: FoodCategory) -> f64 {
    expenses
        .iter()
        .filter(|v| v.category == category)
        .map(FoodExpense::line_total)
        .sum()
}

/// Total for every category, including the ones without expenses.
pub fn totals_by_category(expenses: &[FoodExpense]) -> Vec<(FoodCategory, f64)> {
    FoodCategory::ALL
        .iter()
        .map(|category| (*category, total_by_category(expenses, *category)))
        .collect()
}

/// Sum of `price` over general expenses whose label equals `label`, ignoring case and surrounding
/// whitespace.
pub fn total_by_label(expenses: &[GeneralExpense], label: &str) -> f64 {
    let label = label.trim().to_lowercase();
    expenses
        .iter()
        .filter(|v| v.label.trim().to_lowercase() == label)
        .map(|v| v.price)
        .sum()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use crate::{
        aggregate::{monthly_total, total},
        store::entities::{FoodCategory, FoodExpense, GeneralExpense},
    };

    use super::{total_by_category, total_by_label, totals_by_category};

    fn expense(category: FoodCategory, price: f64, quantity: u32) -> FoodExpense {
        FoodExpense {
            id: format!("{category:?}-{price}-{quantity}"),
            category,
            name: "item".into(),
            price,
            quantity,
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_total_by_category_multiplies_quantity() {
        let expenses = [
            expense(FoodCategory::Eggs, 100., 2),
            expense(FoodCategory::Eggs, 50., 1),
            expense(FoodCategory::Rice, 80., 3),
        ];
        assert_eq!(total_by_category(&expenses, FoodCategory::Eggs), 250.);
        assert_eq!(total_by_category(&expenses, FoodCategory::Yogurt), 0.);
        assert_eq!(total(&expenses), 490.);
        assert_eq!(
            monthly_total(&expenses, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            490.
        );
    }

    #[test]
    fn test_totals_by_category_covers_all() {
        let expenses = [expense(FoodCategory::Water, 30., 6)];
        let totals = totals_by_category(&expenses);
        assert_eq!(totals.len(), FoodCategory::ALL.len());
        assert!(totals.contains(&(FoodCategory::Water, 180.)));
        assert!(totals.contains(&(FoodCategory::Almonds, 0.)));
    }

    #[test]
    fn test_total_by_label() {
        let expense = |label: &str, price: f64| GeneralExpense {
            id: format!("{label}-{price}"),
            label: label.into(),
            price,
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            created_at: Utc::now(),
        };
        let expenses = [
            expense("Transport", 120.5),
            expense("Rent", 15000.),
            expense("transport ", 79.5),
            expense("Transport pass", 1000.),
        ];
        assert_eq!(total_by_label(&expenses, "transport"), 200.);
        assert_eq!(total_by_label(&expenses, "Rent"), 15000.);
        assert_eq!(total_by_label(&expenses, "Gym"), 0.);
        assert_eq!(total_by_label(&[], "Rent"), 0.);
    }
}
