use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{http_catalog, load_all_characters, load_character, load_settings, open_team};
use shared::domain::{Character, TEAM_CAPACITY};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dream-team", about = "Browse characters and manage the saved dream team")]
struct Cli {
    #[arg(long, global = true)]
    catalog_url: Option<String>,
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every character in the catalog.
    Catalog,
    /// Show one character's details.
    Show { uri: String },
    #[command(subcommand)]
    Team(TeamCommand),
}

#[derive(Subcommand, Debug)]
enum TeamCommand {
    List,
    Add { uri: String },
    Remove { name: String },
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(url) = cli.catalog_url {
        settings.catalog_url = url;
    }
    if let Some(dir) = cli.data_dir {
        settings.data_dir = Some(dir);
    }
    tracing::debug!(?settings, "resolved settings");

    match cli.command {
        Command::Catalog => {
            let catalog = http_catalog(&settings)?;
            let characters = load_all_characters(&catalog)
                .await
                .context("failed to load the character catalog")?;
            for character in &characters {
                println!("{}", catalog_line(character));
            }
            println!("{} characters", characters.len());
        }
        Command::Show { uri } => {
            let catalog = http_catalog(&settings)?;
            let character = load_character(&catalog, &uri).await?;
            print!("{}", detail_block(&character));
        }
        Command::Team(TeamCommand::List) => {
            let roster = open_team(&settings)?;
            for (slot, member) in roster.members().iter().enumerate() {
                println!("{}. {}", slot + 1, member.name);
            }
            println!("{} / {TEAM_CAPACITY} team members", roster.len());
        }
        Command::Team(TeamCommand::Add { uri }) => {
            let mut roster = open_team(&settings)?;
            let catalog = http_catalog(&settings)?;
            let character = load_character(&catalog, &uri).await?;
            let name = character.name.clone();
            roster.add(character)?;
            println!("added {name} ({} / {TEAM_CAPACITY})", roster.len());
        }
        Command::Team(TeamCommand::Remove { name }) => {
            let mut roster = open_team(&settings)?;
            let removed = roster.remove(&name)?;
            if removed == 0 {
                println!("{name} is not on the team");
            } else {
                println!("removed {name} ({} / {TEAM_CAPACITY})", roster.len());
            }
        }
        Command::Team(TeamCommand::Clear) => {
            let mut roster = open_team(&settings)?;
            roster.clear()?;
            println!("team cleared");
        }
    }

    Ok(())
}

fn catalog_line(character: &Character) -> String {
    format!("{:>4}  {:<40} {}", character.id.0, character.name, character.url)
}

fn detail_block(character: &Character) -> String {
    format!(
        "{}\n  ID: {}\n  Gender: {}\n  Species: {}\n  Origin: {}\n  Status: {}\n",
        character.name,
        character.id.0,
        character.gender,
        character.species,
        character.origin.name,
        character.status,
    )
}
