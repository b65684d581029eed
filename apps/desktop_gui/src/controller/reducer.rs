//! Applies backend events to the app model. Texture work is handed back to the UI layer.

use client_core::TeamSession;
use storage::KeyValueStore;

use crate::controller::events::{UiError, UiEvent};
use crate::media::PortraitImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    Loading,
    Ready,
    Unavailable,
}

pub struct AppModel<S: KeyValueStore> {
    pub session: TeamSession<S>,
    pub catalog_status: CatalogStatus,
    pub status: String,
    /// Set when the team cannot be saved; outlives every status update.
    pub storage_warning: Option<String>,
    pub last_error: Option<UiError>,
}

impl<S: KeyValueStore> AppModel<S> {
    pub fn new(session: TeamSession<S>) -> Self {
        Self {
            session,
            catalog_status: CatalogStatus::Loading,
            status: "Loading catalog...".to_string(),
            storage_warning: None,
            last_error: None,
        }
    }

    pub fn status_line(&self) -> String {
        match &self.storage_warning {
            Some(warning) => format!("{warning} | {}", self.status),
            None => self.status.clone(),
        }
    }
}

pub enum PortraitUpdate {
    Loaded { uri: String, image: PortraitImage },
    Failed { uri: String },
}

pub fn apply_ui_event<S: KeyValueStore>(
    model: &mut AppModel<S>,
    event: UiEvent,
) -> Option<PortraitUpdate> {
    match event {
        UiEvent::Info(message) => {
            model.status = message;
        }
        UiEvent::CatalogLoaded(characters) => {
            model.status = format!("{} characters available", characters.len());
            model.catalog_status = CatalogStatus::Ready;
            model.session.replace_catalog(characters);
        }
        UiEvent::CatalogFailed(err) => {
            tracing::error!(context = ?err.context(), "catalog: load failed: {}", err.message());
            // A previously loaded catalog stays usable.
            if model.session.catalog().is_empty() {
                model.catalog_status = CatalogStatus::Unavailable;
                model.status = "Catalog unavailable".to_string();
            }
            model.last_error = Some(err);
        }
        UiEvent::CharacterLoaded {
            generation,
            character,
        } => {
            model.session.apply_detail(generation, character);
        }
        UiEvent::CharacterFailed { generation, error } => {
            if !model.session.is_latest_detail_request(generation) {
                tracing::debug!(
                    generation = generation.0,
                    "character: ignoring failure of superseded request: {}",
                    error.message()
                );
                return None;
            }
            tracing::error!(
                generation = generation.0,
                "character: detail load failed: {}",
                error.message()
            );
            model.last_error = Some(error);
        }
        UiEvent::PortraitLoaded { uri, image } => {
            return Some(PortraitUpdate::Loaded { uri, image });
        }
        UiEvent::PortraitFailed { uri, reason } => {
            tracing::warn!(uri = %uri, "portrait: {reason}");
            return Some(PortraitUpdate::Failed { uri });
        }
    }
    None
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
