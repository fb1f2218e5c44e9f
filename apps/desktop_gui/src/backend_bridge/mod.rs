//! Bridge between the egui thread and the HTTP worker.

pub mod commands;
pub mod runtime;
