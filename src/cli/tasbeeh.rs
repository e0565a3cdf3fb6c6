use anyhow::Result;
use clap::Subcommand;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::{
    locale::{pick, Language, Localized},
    store::{entities::TallyChange, snapshot::SnapshotStorage, TallyStore},
    tasbeeh::{TasbeehSession, PRESETS},
};

use super::CliContext;

#[derive(Subcommand, Debug)]
pub enum TasbeehCommand {
    #[command(about = "List the dhikr presets with their targets")]
    Presets,
    #[command(
        about = "Count interactively",
        long_about = "Count interactively. Enter adds one, '-' removes one, 'r' restarts the session, 'R' also clears the lifetime total and 'q' quits"
    )]
    Count {
        #[arg(short, long, default_value_t = 0, help = "Index from `tasbeeh presets`")]
        preset: usize,
    },
    #[command(about = "Print the lifetime total")]
    Total,
    #[command(about = "Set the lifetime total back to zero")]
    ResetTotal,
}

enum Input {
    Increment,
    Decrement,
    Reset,
    ResetAll,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    match line.trim() {
        "" | "+" => Some(Input::Increment),
        "-" => Some(Input::Decrement),
        "r" => Some(Input::Reset),
        "R" => Some(Input::ResetAll),
        "q" | "Q" => Some(Input::Quit),
        _ => None,
    }
}

fn print_status<S: SnapshotStorage>(session: &TasbeehSession<S>, language: Language) {
    let preset = session.preset();
    println!(
        "{}\t{}/{}\t{}\t{}{}",
        preset.label(language),
        session.count(),
        preset.target,
        session.progress(),
        pick(language, "المجموع ", "total "),
        session.total()
    );
    if session.count() == preset.target {
        println!("{}", pick(language, "اكتمل الهدف", "Target reached"));
    }
}

pub async fn process_tasbeeh_command(command: TasbeehCommand, context: &CliContext) -> Result<()> {
    let language = context.language;
    let mut tally: TallyStore<_> = TallyStore::open(context.storage.clone()).await?;

    match command {
        TasbeehCommand::Presets => {
            for (index, preset) in PRESETS.iter().enumerate() {
                println!(
                    "{index}\t{}\t{}\t{}",
                    preset.arabic, preset.transliteration, preset.target
                );
            }
        }
        TasbeehCommand::Total => {
            println!("{}", tally.get().total_count);
        }
        TasbeehCommand::ResetTotal => {
            tally.update(TallyChange::Reset).await?;
            info!("Reset tasbeeh total");
        }
        TasbeehCommand::Count { preset } => {
            let mut session = TasbeehSession::new(tally, preset);
            print_status(&session, language);

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                match parse_input(&line) {
                    Some(Input::Increment) => session.increment().await?,
                    Some(Input::Decrement) => session.decrement().await?,
                    Some(Input::Reset) => session.reset(),
                    Some(Input::ResetAll) => session.reset_all().await?,
                    Some(Input::Quit) => break,
                    None => {
                        println!("{}", pick(language, "إدخال غير معروف", "Unknown input"));
                        continue;
                    }
                }
                print_status(&session, language);
            }
            info!("Tasbeeh session ended at {}", session.count());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_input, Input};

    #[test]
    fn test_parse_input() {
        assert!(matches!(parse_input(""), Some(Input::Increment)));
        assert!(matches!(parse_input(" - "), Some(Input::Decrement)));
        assert!(matches!(parse_input("r"), Some(Input::Reset)));
        assert!(matches!(parse_input("R"), Some(Input::ResetAll)));
        assert!(matches!(parse_input("q"), Some(Input::Quit)));
        assert!(parse_input("x").is_none());
    }
}
