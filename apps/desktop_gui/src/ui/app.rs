use std::time::{Duration, Instant};

use client_core::{AnimationTiming, FormController, FormState, SubmissionOutcome};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::{ContinuousFeature, IntegerFeature};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{health_status, outcome_status, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::widgets;

/// Values resolved before the window opens.
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub api_url: String,
    pub timing: AnimationTiming,
}

pub struct PredictorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: FormController,
    status: String,
    api_url: String,
}

impl PredictorApp {
    pub fn new(
        config: StartupConfig,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            controller: FormController::new(FormState::default(), config.timing),
            status: "Checking backend health...".to_string(),
            api_url: config.api_url,
        };
        dispatch_backend_command(&app.cmd_tx, BackendCommand::CheckHealth, &mut app.status);
        app
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Starts a submission unless one is already pending.
    pub fn submit(&mut self) {
        let Some(request) = self.controller.begin_submission() else {
            return;
        };
        tracing::info!(
            season = request.season,
            hr = request.hr,
            weathersit = request.weathersit,
            "submitting prediction request"
        );
        self.status = "Predicting...".to_string();
        if !dispatch_backend_command(&self.cmd_tx, BackendCommand::Predict { request }, &mut self.status)
        {
            self.controller.complete_submission(
                SubmissionOutcome::Failed {
                    reason: self.status.clone(),
                },
                Instant::now(),
            );
        }
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event, Instant::now());
        }
    }

    fn apply_event(&mut self, event: UiEvent, now: Instant) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::HealthChecked(health) => {
                self.status = health_status(&health);
                self.controller.apply_health(health, now);
            }
            UiEvent::PredictionFinished(outcome) => {
                self.status = outcome_status(&outcome, chrono::Local::now());
                self.controller.complete_submission(outcome, now);
            }
            UiEvent::BackendUnavailable(reason) => {
                tracing::error!("{reason}");
                if self.controller.is_submitting() {
                    self.controller.complete_submission(
                        SubmissionOutcome::Failed {
                            reason: reason.clone(),
                        },
                        now,
                    );
                }
                self.status = reason;
            }
        }
    }

    fn needs_fast_repaint(&self, now: Instant) -> bool {
        self.controller.is_submitting() || self.controller.is_animating(now)
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let enabled = !self.controller.is_submitting();
        let form = self.controller.form_mut();

        egui::Grid::new("prediction_form")
            .num_columns(2)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                for feature in IntegerFeature::ALL {
                    ui.label(feature.title());
                    widgets::integer_input(ui, feature, form.integer_mut(feature), enabled);
                    ui.end_row();
                }
                for feature in ContinuousFeature::ALL {
                    ui.label(feature.title());
                    ui.horizontal(|ui| {
                        widgets::continuous_input(ui, feature, form.continuous_mut(feature), enabled);
                    });
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if self.controller.is_submitting() {
                ui.add_enabled(false, egui::Button::new("Predicting..."));
                ui.add(egui::Spinner::new());
            } else if ui
                .add(egui::Button::new(egui::RichText::new("Predict Rentals").strong()))
                .clicked()
            {
                self.submit();
            }
        });
    }

    fn show_panels(&self, ui: &mut egui::Ui, now: Instant) {
        if let Some(panel) = self.controller.result_panel() {
            ui.add_space(12.0);
            ui.scope(|ui| {
                ui.set_opacity(panel.opacity(now));
                widgets::card_frame(widgets::CARD_FILL, widgets::CARD_STROKE).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new("Predicted rentals").color(widgets::MUTED_TEXT));
                    ui.label(
                        egui::RichText::new(panel.displayed_value(now).to_string())
                            .size(36.0)
                            .strong()
                            .color(widgets::ACCENT),
                    );
                    ui.label(panel.message());
                    ui.add_space(6.0);
                    widgets::gauge(ui, panel.gauge_percent(now));
                });
            });
        }

        if let Some(panel) = self.controller.error_panel() {
            ui.add_space(12.0);
            ui.scope(|ui| {
                ui.set_opacity(panel.opacity(now));
                widgets::card_frame(widgets::ERROR_FILL, widgets::ERROR_STROKE).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new(panel.message()).color(egui::Color32::WHITE));
                });
            });
        }
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        let now = Instant::now();

        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(self.status()).color(widgets::MUTED_TEXT));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(version) = self.controller().backend_version() {
                            ui.label(
                                egui::RichText::new(format!("API v{version}"))
                                    .color(widgets::MUTED_TEXT),
                            );
                        }
                        ui.label(egui::RichText::new(&self.api_url).color(widgets::MUTED_TEXT));
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Bike Rental Demand");
                ui.label(
                    egui::RichText::new("Hourly rentals predicted from calendar and weather conditions")
                        .color(widgets::MUTED_TEXT),
                );
                ui.add_space(10.0);
                self.show_form(ui);
                self.show_panels(ui, now);
            });
        });

        if self.needs_fast_repaint(Instant::now()) {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
