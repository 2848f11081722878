use std::path::PathBuf;

use clap::Parser;

use crate::model::{StatusDisplay, TaskStatus};

#[derive(Parser, Debug)]
#[command(
    name = "phs",
    about = concat!("phasionary v", env!("CARGO_PKG_VERSION"), " - print one screen of a task list"),
    version
)]
pub struct Cli {
    /// Project document (JSON)
    pub document: PathBuf,

    /// Terminal width in columns (0 = unknown, nothing wraps)
    #[arg(short, long, default_value_t = 80)]
    pub width: usize,

    /// Terminal height in rows, footer included
    #[arg(short = 'H', long, default_value_t = 24)]
    pub height: usize,

    /// Logical index to select before printing
    #[arg(short, long)]
    pub select: Option<usize>,

    /// Center the window on the selection instead of scrolling minimally
    #[arg(long)]
    pub center: bool,

    /// Override the configured status display
    #[arg(long, value_enum)]
    pub status_display: Option<StatusDisplay>,

    /// Config file (default: phasionary.toml next to the document)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fold a category by ID (repeatable)
    #[arg(long = "fold", value_name = "CATEGORY_ID")]
    pub fold: Vec<String>,

    /// Fold every category
    #[arg(long, conflicts_with = "fold")]
    pub fold_all: bool,

    /// Hide tasks with this status (repeatable)
    #[arg(long = "hide", value_enum, value_name = "STATUS")]
    pub hide: Vec<TaskStatus>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
