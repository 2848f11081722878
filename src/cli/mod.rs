pub mod commands;
pub mod output;

use std::io::Write;

use thiserror::Error;
use tracing::debug;

use crate::io::config_io::{self, ConfigError};
use crate::io::document_io::{self, DocumentError};
use crate::tui::state::ViewState;

pub use commands::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no category with id {0:?}")]
    UnknownCategory(String),
    #[error("could not serialize output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the view described by the command line
pub fn build_view(cli: &Cli) -> Result<ViewState, CliError> {
    let project = document_io::read_document(&cli.document)?;
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_io::config_path_for(&cli.document));
    let mut config = config_io::read_config(&config_path)?;
    if let Some(display) = cli.status_display {
        config.status_display = display;
    }

    let mut view = ViewState::new(project, config);
    view.resize(cli.width, cli.height);

    if cli.fold_all {
        view.fold_all();
    }
    for id in &cli.fold {
        if !view.fold_category(id) {
            return Err(CliError::UnknownCategory(id.clone()));
        }
    }
    for &status in &cli.hide {
        if view.filter().is_visible(status) {
            view.toggle_status(status);
        }
    }
    if let Some(index) = cli.select {
        view.select_position(index);
    }
    if cli.center {
        view.center_on_selected();
    }
    debug!(
        selected = ?view.selection().selected(),
        scroll_offset = view.scroll_offset(),
        "view ready"
    );
    Ok(view)
}

/// Load the document, apply the view flags and print one screen to stdout
pub fn run(cli: Cli) -> Result<(), CliError> {
    let view = build_view(&cli)?;
    let mut stdout = std::io::stdout().lock();
    if cli.json {
        let screen = output::screen_json(&view);
        writeln!(stdout, "{}", serde_json::to_string_pretty(&screen)?)?;
    } else {
        write!(stdout, "{}", output::screen_text(&view))?;
    }
    Ok(())
}
