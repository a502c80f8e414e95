use crate::assets::AssetLoader;
use region_recolor::{MatchThresholds, ParseColorError, Recolorer, Rgb};
use serde::{Deserialize, Serialize};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Colors to replace (hex or "r,g,b")
    #[serde(default = "default_target_colors")]
    pub target_colors: Vec<String>,

    /// Color written over matched pixels
    #[serde(default = "default_replacement_color")]
    pub replacement_color: String,

    /// Hue half-window (degrees / 2)
    #[serde(default = "default_tolerance")]
    pub color_tolerance: u8,

    /// Minimum saturation
    #[serde(default = "default_floor")]
    pub saturation_threshold: u8,

    /// Minimum value
    #[serde(default = "default_floor")]
    pub value_threshold: u8,

    /// Re-run the replacement after every edit
    #[serde(default = "default_true")]
    pub auto_preview: bool,

    /// Undo depth per image
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,

    /// Where comparison images are written, relative to the output document
    #[serde(default = "default_comparison_dir")]
    pub comparison_dir: String,

    /// Where never-matching images are exported, relative to the output document
    #[serde(default = "default_no_match_dir")]
    pub no_match_dir: String,
}

fn default_target_colors() -> Vec<String> {
    vec!["#EC131B".to_string()]
}

fn default_replacement_color() -> String {
    "#0000FF".to_string()
}

fn default_tolerance() -> u8 {
    region_recolor::matcher::DEFAULT_TOLERANCE
}

fn default_floor() -> u8 {
    region_recolor::matcher::DEFAULT_SATURATION_FLOOR
}

fn default_true() -> bool {
    true
}

fn default_history_depth() -> usize {
    region_recolor::DEFAULT_MAX_HISTORY
}

fn default_comparison_dir() -> String {
    "comparison_results".to_string()
}

fn default_no_match_dir() -> String {
    "check_no_color_images".to_string()
}

/// Values given on the command line, layered over the file config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub target_colors: Vec<String>,
    pub replacement_color: Option<String>,
    pub color_tolerance: Option<u8>,
    pub saturation_threshold: Option<u8>,
    pub value_threshold: Option<u8>,
    pub auto_preview: Option<bool>,
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        targets = config.target_colors.len(),
                        replacement = %config.replacement_color,
                        tolerance = config.color_tolerance,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Layer command-line values on top. Target colors replace the list.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if !overrides.target_colors.is_empty() {
            self.target_colors = overrides.target_colors.clone();
        }
        if let Some(ref color) = overrides.replacement_color {
            self.replacement_color = color.clone();
        }
        if let Some(v) = overrides.color_tolerance {
            self.color_tolerance = v;
        }
        if let Some(v) = overrides.saturation_threshold {
            self.saturation_threshold = v;
        }
        if let Some(v) = overrides.value_threshold {
            self.value_threshold = v;
        }
        if let Some(v) = overrides.auto_preview {
            self.auto_preview = v;
        }
    }

    pub fn thresholds(&self) -> MatchThresholds {
        MatchThresholds::new(
            self.color_tolerance,
            self.saturation_threshold,
            self.value_threshold,
        )
    }

    /// Build the recolorer described by this config.
    pub fn recolorer(&self) -> Result<Recolorer, ParseColorError> {
        let replacement: Rgb = self.replacement_color.parse()?;
        let targets = self
            .target_colors
            .iter()
            .map(|c| c.parse::<Rgb>())
            .collect::<Result<Vec<_>, _>>()?;

        let mut recolorer = Recolorer::new(replacement).targets(targets);
        recolorer.set_thresholds(self.thresholds());
        Ok(recolorer)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_colors: default_target_colors(),
            replacement_color: default_replacement_color(),
            color_tolerance: default_tolerance(),
            saturation_threshold: default_floor(),
            value_threshold: region_recolor::matcher::DEFAULT_VALUE_FLOOR,
            auto_preview: true,
            history_depth: default_history_depth(),
            comparison_dir: default_comparison_dir(),
            no_match_dir: default_no_match_dir(),
        }
    }
}
