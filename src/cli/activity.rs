use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use crate::{
    aggregate::activity::activity_stats,
    locale::{pick, Localized},
    query::{ActivityFilter, ActivityQuery, TextQuery},
    store::{
        entities::{ActivityDraft, ActivityPatch, ActivityType},
        ActivityStore,
    },
};

use super::{
    output::{completed_mark, format_date, print_empty, print_not_found, short_id},
    resolve_id, CliContext, DATE_HELP,
};

#[derive(Subcommand, Debug)]
pub enum ActivityCommand {
    #[command(about = "Plan a new activity")]
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "today", help = DATE_HELP)]
        date: String,
        #[arg(long = "type", value_enum, default_value_t = ActivityType::Running)]
        kind: ActivityType,
        #[arg(long, help = "Mark the activity as already done")]
        completed: bool,
    },
    #[command(about = "List activities, latest date first")]
    List {
        #[arg(short, long, help = "Case insensitive search in title and description")]
        search: Option<String>,
        #[arg(short, long, value_enum, default_value_t)]
        filter: ActivityFilter,
        #[arg(long = "type", value_enum)]
        kind: Option<ActivityType>,
    },
    #[command(about = "Change fields of an activity")]
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, help = DATE_HELP)]
        date: Option<String>,
        #[arg(long = "type", value_enum)]
        kind: Option<ActivityType>,
    },
    #[command(about = "Mark an activity done or not done")]
    Toggle { id: String },
    #[command(about = "Remove an activity")]
    Delete { id: String },
    #[command(about = "Completion statistics")]
    Stats,
}

pub async fn process_activity_command(command: ActivityCommand, context: &CliContext) -> Result<()> {
    let language = context.language;
    let mut store: ActivityStore<_> =
        ActivityStore::open(context.storage.clone(), context.clock()).await?;

    match command {
        ActivityCommand::Add {
            title,
            description,
            date,
            kind,
            completed,
        } => {
            let draft = ActivityDraft {
                title,
                description,
                date: context.parse_date(&date)?,
                kind,
                completed,
            };
            let activity = store.add(draft).await?;
            info!("Added activity {}", activity.id);
            println!("{}", short_id(&activity.id));
        }
        ActivityCommand::List {
            search,
            filter,
            kind,
        } => {
            let query = ActivityQuery {
                text: TextQuery::new(search.as_deref()),
                kind,
                filter,
            };
            let activities = query.apply(store.records(), context.today());
            if activities.is_empty() {
                print_empty(language);
            }
            for activity in activities {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    short_id(&activity.id),
                    completed_mark(activity.completed),
                    format_date(activity.date),
                    activity.kind.label(language),
                    activity.title
                );
            }
        }
        ActivityCommand::Edit {
            id,
            title,
            description,
            date,
            kind,
        } => {
            let patch = ActivityPatch {
                title,
                description,
                date: date.map(|v| context.parse_date(&v)).transpose()?,
                kind,
                completed: None,
            };
            let Some(found) = resolve_id(store.records(), &id)?.map(str::to_string) else {
                print_not_found(&id, language);
                return Ok(());
            };
            store.update(&found, patch).await?;
            info!("Updated activity {found}");
        }
        ActivityCommand::Toggle { id } => {
            let Some(found) = resolve_id(store.records(), &id)?.map(str::to_string) else {
                print_not_found(&id, language);
                return Ok(());
            };
            store.toggle_complete(&found).await?;
            if let Some(activity) = store.get(&found) {
                info!("Activity {found} completed: {}", activity.completed);
                println!("{}\t{}", completed_mark(activity.completed), activity.title);
            }
        }
        ActivityCommand::Delete { id } => {
            let Some(found) = resolve_id(store.records(), &id)?.map(str::to_string) else {
                print_not_found(&id, language);
                return Ok(());
            };
            store.delete(&found).await?;
            info!("Deleted activity {found}");
        }
        ActivityCommand::Stats => {
            let stats = activity_stats(store.records(), context.today());
            println!("{}\t{}", pick(language, "المجموع", "Total"), stats.total);
            println!("{}\t{}", pick(language, "المكتملة", "Completed"), stats.completed);
            println!(
                "{}\t{}/{}",
                pick(language, "هذا الأسبوع", "This week"),
                stats.completed_this_week,
                stats.this_week
            );
            println!(
                "{}\t{}/{}",
                pick(language, "هذا الشهر", "This month"),
                stats.completed_this_month,
                stats.this_month
            );
            println!(
                "{}\t{}",
                pick(language, "نسبة الإنجاز", "Completion rate"),
                stats.completion_rate
            );
            if let Some(top) = stats.top_type {
                println!(
                    "{}\t{} ({})",
                    pick(language, "النوع الأكثر", "Top type"),
                    top.kind.label(language),
                    top.count
                );
            }
        }
    }
    Ok(())
}
