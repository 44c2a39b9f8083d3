//! TUI module: Terminal User Interface using Ratatui.
//!
//! Two screens:
//! - Overview with the project description and model comparison
//! - Assessment form with the analysis results panel

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::ClinicTheme;
