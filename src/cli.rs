//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;

/// A terminal tag selector with debounced async search.
#[derive(Debug, Parser)]
#[command(name = "tagselect", version, about)]
pub struct Cli {
    /// Settings file (defaults to <config_dir>/tagselect/config.toml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON file with an array of {label, value, disabled} options.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Minimum number of tags.
    #[arg(long)]
    pub min: Option<usize>,

    /// Maximum number of tags.
    #[arg(long)]
    pub max: Option<usize>,

    /// Simulated search latency in milliseconds.
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Fail searches whose query contains this text.
    #[arg(long)]
    pub fail_on: Option<String>,

    /// Do not fetch suggestions when the input gains focus.
    #[arg(long)]
    pub no_focus_fetch: bool,
}

impl Cli {
    /// Override settings with the flags that were given.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(path) = &self.catalog {
            settings.catalog = Some(path.clone());
        }
        if self.min.is_some() {
            settings.min = self.min;
        }
        if self.max.is_some() {
            settings.max = self.max;
        }
        if let Some(latency) = self.latency_ms {
            settings.latency_ms = latency;
        }
        if self.no_focus_fetch {
            settings.focus_fetch = false;
        }
    }
}
