//! `[output]` section: how results are printed

use chorus_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Rendering preferences
///
/// `format` is left unset by default so each entry point can pick its own:
/// a one-shot query prints only the consensus (`final`), while chat shows
/// the whole group conversation (`full`). `json` is for scripting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub format: Option<OutputFormat>,
    /// ANSI colors in the transcript and progress lines
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// Pick the format: command line first, then this file, then the mode default.
    pub fn format_for(&self, cli: Option<OutputFormat>, chat: bool) -> OutputFormat {
        cli.or(self.format).unwrap_or(if chat {
            OutputFormat::Full
        } else {
            OutputFormat::Final
        })
    }
}
