//! Plain-text rendering of the form panels.

use shared::{
    domain::{ContinuousFeature, IntegerFeature},
    protocol::{FeatureCatalog, FeatureInfo, HealthResponse},
};

pub const GAUGE_WIDTH: usize = 32;

pub fn gauge_bar(percent: f64, width: usize) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {percent:>5.1}%",
        "#".repeat(filled),
        "-".repeat(width - filled)
    )
}

pub fn result_line(value: i64, gauge_percent: f64) -> String {
    format!("{value:>6} bike rentals  {}", gauge_bar(gauge_percent, GAUGE_WIDTH))
}

pub fn health_lines(health: &HealthResponse) -> Vec<String> {
    vec![
        format!("status:       {}", health.status.as_deref().unwrap_or("unknown")),
        format!("model loaded: {}", if health.model_loaded { "yes" } else { "no" }),
        format!("version:      {}", health.version.as_deref().unwrap_or("unknown")),
    ]
}

fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// One line per feature, in form order, followed by anything the service
/// publishes that the form does not know about.
pub fn catalog_lines(catalog: &FeatureCatalog) -> Vec<String> {
    let known: Vec<(&str, &str)> = IntegerFeature::ALL
        .iter()
        .map(|f| (f.key(), f.title()))
        .chain(ContinuousFeature::ALL.iter().map(|f| (f.key(), f.title())))
        .collect();

    let mut lines = Vec::with_capacity(catalog.len());
    for (key, title) in &known {
        if let Some(info) = catalog.get(*key) {
            lines.push(describe(key, title, info));
        }
    }
    for (key, info) in catalog {
        if !known.iter().any(|(k, _)| *k == key.as_str()) {
            lines.push(describe(key, key, info));
        }
    }
    lines
}

fn describe(key: &str, title: &str, info: &FeatureInfo) -> String {
    let mut line = format!(
        "{key:<11} {title:<12} {}..={}",
        format_bound(info.min),
        format_bound(info.max)
    );
    if !info.labels.is_empty() {
        line.push_str(&format!("  [{}]", info.labels.join(", ")));
    }
    if let Some(description) = &info.description {
        line.push_str(&format!("  {description}"));
    }
    line
}
