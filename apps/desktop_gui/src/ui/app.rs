use client_core::Overlay;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::Character;
use storage::KeyValueStore;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiEvent};
use crate::controller::orchestration::{dispatch_backend_command, handle_intent, UiIntent};
use crate::controller::reducer::{apply_ui_event, AppModel, CatalogStatus};
use crate::ui::portraits::PortraitCache;

const CARD_PORTRAIT: egui::Vec2 = egui::vec2(294.0, 294.0);
const SPOT_PORTRAIT: egui::Vec2 = egui::vec2(130.0, 130.0);
const OVERLAY_PORTRAIT: egui::Vec2 = egui::vec2(200.0, 200.0);
const SPOT_SIZE: egui::Vec2 = egui::vec2(150.0, 215.0);
const DASHBOARD_FILL: egui::Color32 = egui::Color32::from_rgb(15, 13, 18);
const PANEL_FILL: egui::Color32 = egui::Color32::from_rgb(236, 240, 241);
const TOAST_FILL: egui::Color32 = egui::Color32::from_rgb(13, 110, 253);

pub type TeamStore = Box<dyn KeyValueStore>;

pub struct DreamTeamApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    model: AppModel<TeamStore>,
    portraits: PortraitCache,
    picker_filter: String,
    picker_choice: Option<String>,
}

impl DreamTeamApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        model: AppModel<TeamStore>,
    ) -> Self {
        let mut app = Self {
            portraits: PortraitCache::new(cmd_tx.clone()),
            cmd_tx,
            ui_rx,
            model,
            picker_filter: String::new(),
            picker_choice: None,
        };
        dispatch_backend_command(&app.cmd_tx, BackendCommand::LoadCatalog, &mut app.model.status);
        app
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if let Some(update) = apply_ui_event(&mut self.model, event) {
                self.portraits.apply(ctx, update);
            }
        }
    }

    fn show_notification_toast(&self, ctx: &egui::Context, intents: &mut Vec<UiIntent>) {
        let Some(message) = self.model.session.notification() else {
            return;
        };
        egui::TopBottomPanel::top("notification_toast")
            .frame(egui::Frame::NONE.fill(DASHBOARD_FILL).inner_margin(egui::Margin::symmetric(10, 8)))
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(TOAST_FILL)
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(10, 8))
                    .show(ui, |ui| {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.button("✕").on_hover_text("Close").clicked() {
                                    intents.push(UiIntent::DismissNotification);
                                }
                            });
                        });
                    });
            });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let line = egui::RichText::new(self.model.status_line()).small();
            let line = if self.model.storage_warning.is_some() {
                line.color(egui::Color32::from_rgb(220, 53, 69))
            } else {
                line
            };
            let response = ui.label(line);
            if let Some(err) = &self.model.last_error {
                response.on_hover_text(format!(
                    "{}: {}",
                    err_label(err.category()),
                    err.message()
                ));
            }
        });
    }

    fn show_overlay(&mut self, ctx: &egui::Context, intents: &mut Vec<UiIntent>) {
        let Overlay::Shown(character) = self.model.session.overlay() else {
            return;
        };
        let character = character.clone();
        let mut keep_open = true;

        egui::Window::new(character.name.as_str())
            .id(egui::Id::new("character_overlay"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .open(&mut keep_open)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let alt = format!("Front default sprite for {}", character.name);
                    self.portraits.show(ui, &character.image, OVERLAY_PORTRAIT, &alt);
                    ui.add_space(20.0);
                    ui.vertical(|ui| {
                        ui.label(format!("ID: {}", character.id.0));
                        ui.label(format!("Gender: {}", character.gender));
                        ui.label(format!("Species: {}", character.species));
                        ui.label(format!("Origin: {}", character.origin.name));
                        ui.label(format!("Status: {}", character.status));
                    });
                });
            });

        if !keep_open {
            intents.push(UiIntent::DismissOverlay);
        }
    }

    fn show_character_selector(&mut self, ui: &mut egui::Ui, intents: &mut Vec<UiIntent>) {
        let Self {
            model,
            portraits,
            picker_filter,
            picker_choice,
            ..
        } = self;

        match model.catalog_status {
            CatalogStatus::Loading if model.session.catalog().is_empty() => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading characters...");
                });
            }
            CatalogStatus::Unavailable => {
                ui.label("The character catalog could not be loaded.");
                if ui.button("Reload catalog").clicked() {
                    intents.push(UiIntent::ReloadCatalog);
                }
            }
            _ => {
                ui.add_enabled_ui(model.session.picker_enabled(), |ui| {
                    ui.add(
                        egui::TextEdit::singleline(picker_filter)
                            .hint_text("Select a Character")
                            .desired_width(f32::INFINITY),
                    );
                    egui::ScrollArea::vertical()
                        .id_salt("character_picker")
                        .max_height(220.0)
                        .show(ui, |ui| {
                            for option in model.session.catalog_options(picker_filter) {
                                let response = ui.selectable_value(
                                    picker_choice,
                                    Some(option.value.clone()),
                                    option.label.as_str(),
                                );
                                if response.clicked() {
                                    intents.push(UiIntent::SelectOption { uri: option.value });
                                }
                            }
                        });
                });
            }
        }

        ui.add_space(12.0);

        if let Some(selected) = model.session.selected() {
            egui::Frame::NONE
                .fill(egui::Color32::WHITE)
                .corner_radius(6.0)
                .inner_margin(egui::Margin::symmetric(8, 8))
                .show(ui, |ui| {
                    let alt = format!("Profile for {}", selected.name);
                    if portraits.show(ui, &selected.image, CARD_PORTRAIT, &alt).clicked() {
                        intents.push(UiIntent::Highlight(selected.clone()));
                    }
                    ui.add_space(8.0);
                    ui.heading(selected.name.as_str());
                    if ui.button("Add to Team").clicked() {
                        intents.push(UiIntent::AddSelected);
                    }
                });
        }
    }

    fn show_team(&mut self, ui: &mut egui::Ui, intents: &mut Vec<UiIntent>) {
        ui.heading(egui::RichText::new("Dream Team").size(50.0));
        ui.add_space(30.0);

        let team: Vec<Character> = self.model.session.team().to_vec();
        let empty_slots = self.model.session.empty_slots();

        ui.horizontal_wrapped(|ui| {
            for member in &team {
                team_spot(ui, |ui| {
                    let alt = format!("Image for {}", member.name);
                    if self.portraits.show(ui, &member.image, SPOT_PORTRAIT, &alt).clicked() {
                        intents.push(UiIntent::Highlight(member.clone()));
                    }
                    ui.label(egui::RichText::new(&member.name).strong());
                    ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
                        let remove = egui::Button::new(
                            egui::RichText::new("Remove").color(egui::Color32::WHITE),
                        )
                        .fill(egui::Color32::from_rgb(220, 53, 69))
                        .min_size(egui::vec2(SPOT_SIZE.x - 16.0, 0.0));
                        if ui.add(remove).clicked() {
                            intents.push(UiIntent::Remove {
                                name: member.name.clone(),
                            });
                        }
                    });
                });
            }
            for _ in 0..empty_slots {
                team_spot(ui, |_| {});
            }
        });
    }
}

/// One dashed-bordered cell of the team grid.
fn team_spot(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::NONE
        .stroke(egui::Stroke::new(2.0, DASHBOARD_FILL))
        .corner_radius(4.0)
        .inner_margin(egui::Margin::symmetric(8, 8))
        .show(ui, |ui| {
            ui.set_min_size(SPOT_SIZE);
            ui.set_max_width(SPOT_SIZE.x);
            ui.vertical_centered(add_contents);
        });
}

impl eframe::App for DreamTeamApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events(ctx);

        let mut intents = Vec::new();
        self.show_notification_toast(ctx, &mut intents);
        self.show_status_bar(ctx);

        egui::SidePanel::left("character_selector")
            .exact_width(330.0)
            .resizable(false)
            .frame(egui::Frame::NONE.fill(PANEL_FILL).inner_margin(egui::Margin::same(16)))
            .show(ctx, |ui| self.show_character_selector(ui, &mut intents));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(PANEL_FILL).inner_margin(egui::Margin::same(24)))
            .show(ctx, |ui| self.show_team(ui, &mut intents));

        self.show_overlay(ctx, &mut intents);

        for intent in intents {
            handle_intent(&mut self.model, &self.cmd_tx, intent);
        }
        if self.model.session.selected().is_none() {
            self.picker_choice = None;
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
