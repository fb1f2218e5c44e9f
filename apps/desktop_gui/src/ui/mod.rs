//! UI layer for the desktop GUI: app shell and form widgets.

pub mod app;
pub mod widgets;

pub use app::{PredictorApp, StartupConfig};
