//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{load_all_characters, load_character, HttpCatalog, Settings};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::media::decode_portrait;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                report_startup_failure(
                    &ui_tx,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                );
                return;
            }
        };

        let catalog = match client_core::http_catalog(&settings) {
            Ok(catalog) => Arc::new(catalog),
            Err(err) => {
                tracing::error!("backend: catalog client unavailable: {err:#}");
                report_startup_failure(&ui_tx, format!("{err:#}"));
                return;
            }
        };

        runtime.block_on(async move {
            tracing::info!(catalog_url = %catalog.base_url(), "backend: worker ready");

            // Commands run as independent tasks; late detail responses are filtered by generation.
            while let Ok(cmd) = cmd_rx.recv() {
                let catalog = Arc::clone(&catalog);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    run_command(&catalog, cmd, &ui_tx).await;
                });
            }
            tracing::info!("backend: command queue closed; worker exiting");
        });
    });
}

/// The worker is gone, so the catalog it would have loaded is unavailable.
fn report_startup_failure(ui_tx: &Sender<UiEvent>, message: String) {
    let _ = ui_tx.try_send(UiEvent::CatalogFailed(UiError::from_message(
        UiErrorContext::BackendStartup,
        message,
    )));
}

async fn run_command(catalog: &HttpCatalog, cmd: BackendCommand, ui_tx: &Sender<UiEvent>) {
    match cmd {
        BackendCommand::LoadCatalog => {
            tracing::info!("backend: load_catalog");
            let event = match load_all_characters(catalog).await {
                Ok(characters) => UiEvent::CatalogLoaded(characters),
                Err(err) => {
                    tracing::error!("backend: load_catalog failed: {err}");
                    UiEvent::CatalogFailed(UiError::from_message(
                        UiErrorContext::Catalog,
                        err.to_string(),
                    ))
                }
            };
            let _ = ui_tx.try_send(event);
        }
        BackendCommand::LoadCharacter { uri, generation } => {
            tracing::info!(generation = generation.0, uri = %uri, "backend: load_character");
            let event = match load_character(catalog, &uri).await {
                Ok(character) => UiEvent::CharacterLoaded {
                    generation,
                    character,
                },
                Err(err) => {
                    tracing::error!(uri = %uri, "backend: load_character failed: {err}");
                    UiEvent::CharacterFailed {
                        generation,
                        error: UiError::from_message(
                            UiErrorContext::CharacterDetail,
                            err.to_string(),
                        ),
                    }
                }
            };
            let _ = ui_tx.try_send(event);
        }
        BackendCommand::FetchPortrait { uri } => {
            let event = match catalog.fetch_asset(&uri).await {
                Ok(bytes) => match decode_portrait(&bytes) {
                    Ok(image) => UiEvent::PortraitLoaded { uri, image },
                    Err(reason) => UiEvent::PortraitFailed { uri, reason },
                },
                Err(err) => UiEvent::PortraitFailed {
                    uri,
                    reason: format!("Failed to download portrait: {err}"),
                },
            };
            let _ = ui_tx.try_send(event);
        }
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
