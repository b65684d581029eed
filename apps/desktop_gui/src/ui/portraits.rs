//! Portrait textures keyed by image URI, fetched on first use.

use std::collections::{HashMap, HashSet};

use crossbeam_channel::Sender;
use eframe::egui;
use egui::TextureHandle;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::PortraitUpdate;

const PLACEHOLDER_FILL: egui::Color32 = egui::Color32::from_rgb(15, 13, 18);

pub(crate) struct PortraitCache {
    cmd_tx: Sender<BackendCommand>,
    textures: HashMap<String, TextureHandle>,
    requested: HashSet<String>,
}

impl PortraitCache {
    pub(crate) fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        Self {
            cmd_tx,
            textures: HashMap::new(),
            requested: HashSet::new(),
        }
    }

    /// The texture for `uri`, queueing one download the first time it is asked for.
    fn texture(&mut self, uri: &str) -> Option<&TextureHandle> {
        if uri.is_empty() {
            return None;
        }
        if !self.textures.contains_key(uri) && !self.requested.contains(uri) {
            let mut status = String::new();
            if dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::FetchPortrait {
                    uri: uri.to_string(),
                },
                &mut status,
            ) {
                self.requested.insert(uri.to_string());
            } else {
                tracing::debug!(uri, "portrait request not queued: {status}");
            }
        }
        self.textures.get(uri)
    }

    pub(crate) fn apply(&mut self, ctx: &egui::Context, update: PortraitUpdate) {
        match update {
            PortraitUpdate::Loaded { uri, image } => {
                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
                let texture = ctx.load_texture(
                    format!("portrait:{uri}"),
                    color_image,
                    egui::TextureOptions::LINEAR,
                );
                self.textures.insert(uri, texture);
            }
            // Stays in `requested`, so a broken portrait is not fetched again every frame.
            PortraitUpdate::Failed { .. } => {}
        }
    }

    /// A clickable portrait, or a flat placeholder while it loads.
    pub(crate) fn show(
        &mut self,
        ui: &mut egui::Ui,
        uri: &str,
        size: egui::Vec2,
        alt: &str,
    ) -> egui::Response {
        match self.texture(uri) {
            Some(texture) => ui
                .add(
                    egui::Button::image(egui::Image::new(texture).fit_to_exact_size(size))
                        .frame(false),
                )
                .on_hover_text(alt),
            None => {
                let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
                ui.painter()
                    .rect_filled(rect, egui::CornerRadius::same(4), PLACEHOLDER_FILL);
                response.on_hover_text(alt)
            }
        }
    }
}
