//! Hepascope: liver cirrhosis risk assessment demo
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hepascope::adapters::sanitize::SanitizingMakeWriter;
use hepascope::config::Settings;
use hepascope::tui::App;

fn main() -> Result<()> {
    let settings = Settings::from_env()?;

    // Initialize logging.
    //
    // IMPORTANT: writing logs to the terminal will corrupt the TUI (alternate screen).
    // In auto mode an interactive session logs to a file, anything else to stdout.
    let interactive = std::io::stdout().is_terminal();

    let (writer, _guard) = if settings.log_mode.use_file(interactive) {
        if let Some(parent) = settings.log_file.parent() {
            // Best-effort: don't fail startup just because the directory is missing.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!(
        delay_ms = settings.analysis_delay.as_millis() as u64,
        seeded = settings.rng_seed.is_some(),
        "Starting Hepascope..."
    );

    let mut app = App::new(&settings);
    app.run()?;

    tracing::info!("Hepascope shutdown complete.");
    Ok(())
}
