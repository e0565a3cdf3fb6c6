use anyhow::Result;
use clap::Subcommand;

use crate::{
    adhkar::{by_category, dhikr_of_the_day, Dhikr, DhikrCategory},
    locale::{Language, Localized},
};

use super::CliContext;

#[derive(Subcommand, Debug)]
pub enum AdhkarCommand {
    #[command(about = "List adhkar, optionally of one occasion")]
    List {
        #[arg(short, long, value_enum)]
        category: Option<DhikrCategory>,
    },
    #[command(about = "Print the dhikr of the day")]
    Daily,
}

fn print_dhikr(dhikr: &Dhikr, language: Language) {
    match language {
        Language::Ar => println!(
            "{}\t{}\t×{}",
            dhikr.category.label(language),
            dhikr.arabic,
            dhikr.count
        ),
        Language::En => println!(
            "{}\t{}\t×{}\t{}",
            dhikr.category.label(language),
            dhikr.arabic,
            dhikr.count,
            dhikr.translation
        ),
    }
}

pub async fn process_adhkar_command(command: AdhkarCommand, context: &CliContext) -> Result<()> {
    match command {
        AdhkarCommand::List { category } => {
            for dhikr in by_category(category) {
                print_dhikr(dhikr, context.language);
            }
        }
        AdhkarCommand::Daily => print_dhikr(dhikr_of_the_day(context.today()), context.language),
    }
    Ok(())
}
