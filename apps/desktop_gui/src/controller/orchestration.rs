//! Command orchestration from UI intents to session updates and the backend command queue.

use crossbeam_channel::{Sender, TrySendError};
use shared::{
    domain::{Character, TEAM_CAPACITY},
    error::RosterError,
};
use storage::KeyValueStore;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};
use crate::controller::reducer::{AppModel, CatalogStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiIntent {
    SelectOption { uri: String },
    Highlight(Character),
    DismissOverlay,
    DismissNotification,
    AddSelected,
    Remove { name: String },
    ReloadCatalog,
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend worker disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
            false
        }
    }
}

pub fn handle_intent<S: KeyValueStore>(
    model: &mut AppModel<S>,
    cmd_tx: &Sender<BackendCommand>,
    intent: UiIntent,
) {
    match intent {
        UiIntent::SelectOption { uri } => {
            if !model.session.picker_enabled() {
                tracing::debug!("picker disabled; ignoring selection");
                return;
            }
            let generation = model.session.begin_detail_request();
            dispatch_backend_command(
                cmd_tx,
                BackendCommand::LoadCharacter { uri, generation },
                &mut model.status,
            );
        }
        UiIntent::Highlight(character) => model.session.highlight(character),
        UiIntent::DismissOverlay => model.session.dismiss_overlay(),
        UiIntent::DismissNotification => model.session.dismiss_notification(),
        UiIntent::AddSelected => match model.session.add_selected() {
            Ok(true) => {
                model.status = team_status(model.session.team().len());
            }
            Ok(false) => {}
            Err(err) => {
                tracing::info!(code = ?err.code(), "team: add rejected: {err}");
                record_storage_failure(model, &err);
            }
        },
        UiIntent::Remove { name } => match model.session.remove(&name) {
            Ok(_) => {
                model.status = team_status(model.session.team().len());
            }
            Err(err) => {
                tracing::error!("team: remove failed: {err}");
                record_storage_failure(model, &err);
            }
        },
        UiIntent::ReloadCatalog => {
            if dispatch_backend_command(cmd_tx, BackendCommand::LoadCatalog, &mut model.status) {
                model.catalog_status = CatalogStatus::Loading;
                model.status = "Loading catalog...".to_string();
            }
        }
    }
}

fn record_storage_failure<S: KeyValueStore>(model: &mut AppModel<S>, err: &RosterError) {
    if matches!(err, RosterError::Storage { .. }) {
        model.last_error = Some(UiError::from_message(UiErrorContext::Team, err.to_string()));
    }
}

fn team_status(members: usize) -> String {
    format!("{members} / {TEAM_CAPACITY} team members")
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
