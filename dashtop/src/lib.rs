//! dashtop: terminal dashboard for an HTTP system monitoring backend.
//!
//! Data path: [`api`] fetches, [`render`] and [`chart`] write the
//! [`document`], [`controller`] runs the refresh cycle, and [`app`] + [`ui`]
//! draw the document in the terminal.

pub mod api;
pub mod app;
pub mod chart;
pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod format;
pub mod logging;
pub mod profiles;
pub mod render;
pub mod types;
pub mod ui;
