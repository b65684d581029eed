use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod media;
#[cfg(test)]
mod test_support;
mod ui;

use clap::Parser;
use client_core::{load_settings, RosterStore, Settings, TeamSession};
use crossbeam_channel::bounded;
use eframe::egui;
use storage::{FileStore, MemoryStore};
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::controller::events::UiEvent;
use crate::controller::reducer::AppModel;
use crate::ui::{DreamTeamApp, TeamStore};

#[derive(Parser, Debug)]
#[command(name = "dream-team-gui", about = "Pick a six-member Rick and Morty dream team")]
struct Args {
    /// Character collection endpoint.
    #[arg(long)]
    catalog_url: Option<String>,
    /// Directory holding the persisted team.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl Args {
    fn into_settings(self) -> Settings {
        let mut settings = load_settings();
        if let Some(url) = self.catalog_url {
            settings.catalog_url = url;
        }
        if let Some(dir) = self.data_dir {
            settings.data_dir = Some(dir);
        }
        settings
    }
}

/// File-backed team store; falls back to an in-memory one so the app still starts.
fn open_team_store(settings: &Settings) -> (TeamStore, Option<String>) {
    let opened = settings
        .resolve_data_dir()
        .and_then(|dir| FileStore::new(&dir).map(|store| (dir, store)));
    match opened {
        Ok((dir, store)) => {
            tracing::info!(data_dir = %dir.display(), "team storage ready");
            (Box::new(store), None)
        }
        Err(err) => {
            tracing::error!("team storage unavailable, changes will not be saved: {err:#}");
            (
                Box::new(MemoryStore::new()),
                Some("Team storage unavailable; changes will not be saved".to_string()),
            )
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = Args::parse().into_settings();
    tracing::info!(catalog_url = %settings.catalog_url, "starting dream team");

    let (store, storage_warning) = open_team_store(&settings);
    let mut model = AppModel::new(TeamSession::new(RosterStore::open(store)));
    model.storage_warning = storage_warning;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Rick and Morty Dream Team")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([980.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Rick and Morty Dream Team",
        options,
        Box::new(|_cc| Ok(Box::new(DreamTeamApp::bootstrap(cmd_tx, ui_rx, model)))),
    )
}
