use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use crate::{
    aggregate::{
        expense::{total_by_label, totals_by_category},
        monthly_total, total,
    },
    locale::{pick, Language, Localized},
    query::{FoodExpenseQuery, GeneralExpenseQuery, TextQuery},
    store::{
        entities::{
            FoodCategory, FoodExpenseDraft, FoodExpensePatch, GeneralExpenseDraft,
            GeneralExpensePatch,
        },
        FoodExpenseStore, GeneralExpenseStore,
    },
    utils::input::{coerce_price, coerce_quantity},
};

use super::{
    output::{format_amount, format_date, print_empty, print_not_found, short_id},
    resolve_id, CliContext, DATE_HELP,
};

const PRICE_HELP: &str = "Unit price. Anything that is not a non negative number counts as 0";
const QUANTITY_HELP: &str = "Whole number of units, at least 1";

#[derive(Subcommand, Debug)]
pub enum FoodCommand {
    #[command(about = "Record a food purchase")]
    Add {
        #[arg(long, value_enum)]
        category: FoodCategory,
        #[arg(long)]
        name: String,
        #[arg(long, help = PRICE_HELP)]
        price: String,
        #[arg(long, default_value = "1", help = QUANTITY_HELP)]
        quantity: String,
        #[arg(long, default_value = "today", help = DATE_HELP)]
        date: String,
    },
    #[command(about = "List food purchases, latest date first")]
    List {
        #[arg(short, long, help = "Case insensitive search in the name")]
        search: Option<String>,
        #[arg(short, long, value_enum)]
        category: Option<FoodCategory>,
    },
    #[command(about = "Change fields of a food purchase")]
    Edit {
        id: String,
        #[arg(long, value_enum)]
        category: Option<FoodCategory>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, help = PRICE_HELP)]
        price: Option<String>,
        #[arg(long, help = QUANTITY_HELP)]
        quantity: Option<String>,
        #[arg(long, help = DATE_HELP)]
        date: Option<String>,
    },
    #[command(about = "Remove a food purchase")]
    Delete { id: String },
    #[command(about = "Totals overall, for this month and per category")]
    Summary,
}

#[derive(Subcommand, Debug)]
pub enum ExpenseCommand {
    #[command(about = "Record an expense")]
    Add {
        #[arg(long, help = "What the money was spent on, e.g. rent or transport")]
        label: String,
        #[arg(long, help = PRICE_HELP)]
        price: String,
        #[arg(long, default_value = "today", help = DATE_HELP)]
        date: String,
    },
    #[command(about = "List expenses, latest date first")]
    List {
        #[arg(short, long, help = "Case insensitive search in the label")]
        search: Option<String>,
    },
    #[command(about = "Change fields of an expense")]
    Edit {
        id: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long, help = PRICE_HELP)]
        price: Option<String>,
        #[arg(long, help = DATE_HELP)]
        date: Option<String>,
    },
    #[command(about = "Remove an expense")]
    Delete { id: String },
    #[command(about = "Totals overall and for this month")]
    Summary {
        #[arg(long, help = "Also print the total of expenses with this label, case insensitive")]
        label: Option<String>,
    },
}

fn print_totals(all: f64, month: f64, language: Language) {
    println!(
        "{}\t{}",
        pick(language, "المجموع", "Total"),
        format_amount(all, language)
    );
    println!(
        "{}\t{}",
        pick(language, "هذا الشهر", "This month"),
        format_amount(month, language)
    );
}

pub async fn process_food_command(command: FoodCommand, context: &CliContext) -> Result<()> {
    let language = context.language;
    let mut store: FoodExpenseStore<_> =
        FoodExpenseStore::open(context.storage.clone(), context.clock()).await?;

    match command {
        FoodCommand::Add {
            category,
            name,
            price,
            quantity,
            date,
        } => {
            let draft = FoodExpenseDraft {
                category,
                name,
                price: coerce_price(&price),
                quantity: coerce_quantity(&quantity),
                date: context.parse_date(&date)?,
            };
            let expense = store.add(draft).await?;
            info!("Added food expense {}", expense.id);
            println!("{}", short_id(&expense.id));
        }
        FoodCommand::List { search, category } => {
            let query = FoodExpenseQuery {
                text: TextQuery::new(search.as_deref()),
                category,
            };
            let expenses = query.apply(store.records());
            if expenses.is_empty() {
                print_empty(language);
            }
            for expense in expenses {
                println!(
                    "{}\t{}\t{}\t{}\t{} x {}\t{}",
                    short_id(&expense.id),
                    format_date(expense.date),
                    expense.category.label(language),
                    expense.name,
                    expense.quantity,
                    format_amount(expense.price, language),
                    format_amount(expense.line_total(), language)
                );
            }
        }
        FoodCommand::Edit {
            id,
            category,
            name,
            price,
            quantity,
            date,
        } => {
            let Some(found) = resolve_id(store.records(), &id)?.map(str::to_string) else {
                print_not_found(&id, language);
                return Ok(());
            };
            let patch = FoodExpensePatch {
                category,
                name,
                price: price.as_deref().map(coerce_price),
                quantity: quantity.as_deref().map(coerce_quantity),
                date: date.map(|v| context.parse_date(&v)).transpose()?,
            };
            store.update(&found, patch).await?;
            info!("Updated food expense {found}");
        }
        FoodCommand::Delete { id } => {
            let Some(found) = resolve_id(store.records(), &id)?.map(str::to_string) else {
                print_not_found(&id, language);
                return Ok(());
            };
            store.delete(&found).await?;
            info!("Deleted food expense {found}");
        }
        FoodCommand::Summary => {
            let expenses = store.records();
            print_totals(
                total(expenses),
                monthly_total(expenses, context.today()),
                language,
            );
            println!();
            for (category, amount) in totals_by_category(expenses) {
                println!(
                    "{}\t{}",
                    category.label(language),
                    format_amount(amount, language)
                );
            }
        }
    }
    Ok(())
}

pub async fn process_expense_command(command: ExpenseCommand, context: &CliContext) -> Result<()> {
    let language = context.language;
    let mut store: GeneralExpenseStore<_> =
        GeneralExpenseStore::open(context.storage.clone(), context.clock()).await?;

    match command {
        ExpenseCommand::Add { label, price, date } => {
            let draft = GeneralExpenseDraft {
                label,
                price: coerce_price(&price),
                date: context.parse_date(&date)?,
            };
            let expense = store.add(draft).await?;
            info!("Added expense {}", expense.id);
            println!("{}", short_id(&expense.id));
        }
        ExpenseCommand::List { search } => {
            let query = GeneralExpenseQuery {
                text: TextQuery::new(search.as_deref()),
            };
            let expenses = query.apply(store.records());
            if expenses.is_empty() {
                print_empty(language);
            }
            for expense in expenses {
                println!(
                    "{}\t{}\t{}\t{}",
                    short_id(&expense.id),
                    format_date(expense.date),
                    expense.label,
                    format_amount(expense.price, language)
                );
            }
        }
        ExpenseCommand::Edit {
            id,
            label,
            price,
            date,
        } => {
            let Some(found) = resolve_id(store.records(), &id)?.map(str::to_string) else {
                print_not_found(&id, language);
                return Ok(());
            };
            let patch = GeneralExpensePatch {
                label,
                price: price.as_deref().map(coerce_price),
                date: date.map(|v| context.parse_date(&v)).transpose()?,
            };
            store.update(&found, patch).await?;
            info!("Updated expense {found}");
        }
        ExpenseCommand::Delete { id } => {
            let Some(found) = resolve_id(store.records(), &id)?.map(str::to_string) else {
                print_not_found(&id, language);
                return Ok(());
            };
            store.delete(&found).await?;
            info!("Deleted expense {found}");
        }
        ExpenseCommand::Summary { label } => {
            let expenses = store.records();
            print_totals(
                total(expenses),
                monthly_total(expenses, context.today()),
                language,
            );
            if let Some(label) = label {
                println!(
                    "{}\t{}",
                    label.trim(),
                    format_amount(total_by_label(expenses, &label), language)
                );
            }
        }
    }
    Ok(())
}
