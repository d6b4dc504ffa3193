// Application settings
// Loaded from ~/.config/gridmon/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Largest accepted `report.width`.
pub const MAX_WIDTH: usize = 64;
/// Largest accepted `report.precision` (f64 carries ~17 significant digits).
pub const MAX_PRECISION: usize = 17;

const DEFAULT_TEMPLATE: &str = r#"{
    // Report layout: minimum field width and digits after the decimal point
    "report.width": 8,
    "report.precision": 3,

    // Append a section listing every cell in danger
    "report.showSummary": false,

    // Output format: "text" (report) or "json" (snapshot of every grid)
    "output.format": "text"
}
"#;

/// Report output selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Labeled text report (default)
    #[default]
    Text,
    /// Pretty-printed JSON snapshot
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Report
    #[serde(rename = "report.width")]
    pub report_width: usize,

    #[serde(rename = "report.precision")]
    pub report_precision: usize,

    #[serde(rename = "report.showSummary")]
    pub report_show_summary: bool,

    // Output
    #[serde(rename = "output.format")]
    pub output_format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            report_width: 8,
            report_precision: 3,
            report_show_summary: false,
            output_format: OutputFormat::Text,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridmon");
        config_dir.join("settings.json")
    }

    /// Load settings from the default path, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}");
                log::warn!("using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from an explicit path. Missing or invalid files are errors.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("error reading {}: {}", path.display(), e))?;
        Self::parse(&contents).map_err(|e| format!("error parsing {}: {}", path.display(), e))
    }

    /// Parse settings JSON. Lines starting with `//` are comments.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        let settings: Self = serde_json::from_str(&cleaned).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.report_width > MAX_WIDTH {
            return Err(format!("report.width must be at most {MAX_WIDTH}, got {}", self.report_width));
        }
        if self.report_precision > MAX_PRECISION {
            return Err(format!(
                "report.precision must be at most {MAX_PRECISION}, got {}",
                self.report_precision
            ));
        }
        Ok(())
    }

    /// Save settings to the given path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Write the commented default template
    pub fn write_default(path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        fs::write(path, DEFAULT_TEMPLATE).map_err(|e| e.to_string())
    }

    /// Get the config file path for display
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}
