use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use crate::{
    aggregate::debt::debt_summary,
    locale::{pick, Localized},
    query::DebtFilter,
    store::{
        entities::{DebtDraft, DebtKind, DebtPatch},
        DebtStore,
    },
    utils::input::coerce_price,
};

use super::{
    output::{format_amount, format_balance, print_empty, print_not_found, short_id},
    resolve_id, CliContext,
};

#[derive(Subcommand, Debug)]
pub enum DebtCommand {
    #[command(about = "Record money lent or borrowed")]
    Add {
        #[arg(long, help = "Counterparty")]
        name: String,
        #[arg(long, help = "Amount of money. Anything that is not a non negative number counts as 0")]
        amount: String,
        #[arg(long = "type", value_enum)]
        kind: DebtKind,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    #[command(about = "List debts")]
    List {
        #[arg(short, long, value_enum, default_value_t)]
        filter: DebtFilter,
    },
    #[command(about = "Change fields of a debt. An empty phone or notes clears the field")]
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long = "type", value_enum)]
        kind: Option<DebtKind>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    #[command(about = "Remove a settled debt")]
    Delete { id: String },
    #[command(about = "Totals in both directions and the net balance")]
    Summary,
}

/// Blank input means the field is not set.
fn optional_text(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub async fn process_debt_command(command: DebtCommand, context: &CliContext) -> Result<()> {
    let language = context.language;
    let mut store: DebtStore<_> = DebtStore::open(context.storage.clone(), context.clock()).await?;

    match command {
        DebtCommand::Add {
            name,
            amount,
            kind,
            phone,
            notes,
        } => {
            let draft = DebtDraft {
                name,
                phone: phone.and_then(optional_text),
                amount: coerce_price(&amount),
                kind,
                notes: notes.and_then(optional_text),
            };
            let debt = store.add(draft).await?;
            info!("Added debt {}", debt.id);
            println!("{}", short_id(&debt.id));
        }
        DebtCommand::List { filter } => {
            let debts = filter.apply(store.records());
            if debts.is_empty() {
                print_empty(language);
            }
            for debt in debts {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    short_id(&debt.id),
                    debt.kind.label(language),
                    debt.name,
                    format_amount(debt.amount, language),
                    debt.phone.as_deref().unwrap_or("-"),
                    debt.notes.as_deref().unwrap_or("")
                );
            }
        }
        DebtCommand::Edit {
            id,
            name,
            amount,
            kind,
            phone,
            notes,
        } => {
            let Some(found) = resolve_id(store.records(), &id)?.map(str::to_string) else {
                print_not_found(&id, language);
                return Ok(());
            };
            let patch = DebtPatch {
                name,
                phone: phone.map(optional_text),
                amount: amount.as_deref().map(coerce_price),
                kind,
                notes: notes.map(optional_text),
            };
            store.update(&found, patch).await?;
            info!("Updated debt {found}");
        }
        DebtCommand::Delete { id } => {
            let Some(found) = resolve_id(store.records(), &id)?.map(str::to_string) else {
                print_not_found(&id, language);
                return Ok(());
            };
            store.delete(&found).await?;
            info!("Deleted debt {found}");
        }
        DebtCommand::Summary => {
            let summary = debt_summary(store.records());
            println!(
                "{}\t{}",
                DebtKind::OwedToMe.label(language),
                format_amount(summary.owed_to_me, language)
            );
            println!(
                "{}\t{}",
                DebtKind::OwedByMe.label(language),
                format_amount(summary.owed_by_me, language)
            );
            println!(
                "{}\t{}",
                pick(language, "الرصيد الصافي", "Net balance"),
                format_balance(summary.net_balance, language)
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::optional_text;

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(" 0555 ".into()), Some("0555".into()));
        assert_eq!(optional_text("   ".into()), None);
    }
}
