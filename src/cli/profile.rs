use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use crate::{
    locale::pick,
    store::{entities::UserProfilePatch, ProfileStore},
};

use super::CliContext;

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    #[command(about = "Print the profile")]
    Show,
    #[command(about = "Change profile fields, the rest stay as they are")]
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        facebook: Option<String>,
        #[arg(long)]
        instagram: Option<String>,
        #[arg(long)]
        twitter: Option<String>,
    },
}

pub async fn process_profile_command(command: ProfileCommand, context: &CliContext) -> Result<()> {
    let language = context.language;
    let mut store: ProfileStore<_> = ProfileStore::open(context.storage.clone()).await?;

    if let ProfileCommand::Set {
        name,
        phone,
        address,
        email,
        facebook,
        instagram,
        twitter,
    } = command
    {
        store
            .update(UserProfilePatch {
                name,
                phone,
                address,
                email,
                facebook,
                instagram,
                twitter,
            })
            .await?;
        info!("Updated profile");
    }

    let profile = store.get();
    for (label, value) in [
        (pick(language, "الاسم", "Name"), &profile.name),
        (pick(language, "الهاتف", "Phone"), &profile.phone),
        (pick(language, "العنوان", "Address"), &profile.address),
        (pick(language, "البريد الإلكتروني", "Email"), &profile.email),
        ("Facebook", &profile.facebook),
        ("Instagram", &profile.instagram),
        ("Twitter", &profile.twitter),
    ] {
        println!("{label}\t{value}");
    }
    Ok(())
}
