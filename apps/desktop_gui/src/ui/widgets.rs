//! Form inputs, cards and the demand gauge.

use shared::domain::{ContinuousFeature, IntegerFeature};

pub const CARD_FILL: egui::Color32 = egui::Color32::from_rgb(28, 30, 36);
pub const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(58, 60, 70);
pub const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(58, 24, 28);
pub const ERROR_STROKE: egui::Color32 = egui::Color32::from_rgb(170, 64, 72);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(88, 166, 255);
pub const MUTED_TEXT: egui::Color32 = egui::Color32::from_rgb(150, 154, 166);

pub fn card_frame(fill: egui::Color32, stroke: egui::Color32) -> egui::Frame {
    egui::Frame::NONE
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, stroke))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
}

/// Dropdown for labelled features, slider for month and hour. Returns true on change.
pub fn integer_input(
    ui: &mut egui::Ui,
    feature: IntegerFeature,
    value: &mut i64,
    enabled: bool,
) -> bool {
    if feature.labels().is_empty() {
        return ui
            .add_enabled(enabled, egui::Slider::new(value, feature.range()))
            .changed();
    }

    let mut changed = false;
    ui.add_enabled_ui(enabled, |ui| {
        egui::ComboBox::from_id_salt(feature.key())
            .selected_text(feature.option_label(*value))
            .show_ui(ui, |ui| {
                for option in feature.range() {
                    changed |= ui
                        .selectable_value(value, option, feature.option_label(option))
                        .changed();
                }
            });
    });
    changed
}

/// Normalized slider followed by its live physical readout.
pub fn continuous_input(
    ui: &mut egui::Ui,
    feature: ContinuousFeature,
    value: &mut f64,
    enabled: bool,
) -> bool {
    let changed = ui
        .add_enabled(
            enabled,
            egui::Slider::new(value, 0.0..=1.0)
                .step_by(0.01)
                .show_value(false),
        )
        .on_hover_text(feature.normalization_note())
        .changed();
    ui.label(egui::RichText::new(feature.readout(*value)).monospace());
    changed
}

pub fn gauge(ui: &mut egui::Ui, percent: f64) {
    let fraction = (percent / 100.0).clamp(0.0, 1.0) as f32;
    ui.add(
        egui::ProgressBar::new(fraction)
            .fill(ACCENT)
            .desired_height(12.0)
            .text(format!("{percent:.0}% of typical peak demand")),
    );
}
