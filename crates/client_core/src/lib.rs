use anyhow::{Context, Result};
use storage::FileStore;

pub mod catalog;
pub mod config;
pub mod roster;
pub mod session;
#[cfg(test)]
mod test_support;

pub use catalog::{load_all_characters, load_character, CatalogError, CatalogSource, HttpCatalog};
pub use config::{load_settings, Settings};
pub use roster::{RosterStore, TEAM_STORAGE_KEY};
pub use session::{Overlay, RequestGeneration, TeamSession};

/// Open the team persisted under the configured data directory.
pub fn open_team(settings: &Settings) -> Result<RosterStore<FileStore>> {
    let data_dir = settings.resolve_data_dir()?;
    let store = FileStore::new(&data_dir).with_context(|| {
        format!(
            "failed to prepare team storage under '{}'",
            data_dir.display()
        )
    })?;
    tracing::info!(data_dir = %store.root().display(), "team storage ready");
    Ok(RosterStore::open(store))
}

pub fn http_catalog(settings: &Settings) -> Result<HttpCatalog> {
    HttpCatalog::new(&settings.catalog_url, settings.request_timeout())
        .with_context(|| format!("invalid catalog configuration '{}'", settings.catalog_url))
}
