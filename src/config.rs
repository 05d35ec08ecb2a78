use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AnnotError;
use crate::theme::Theme;

pub const BODY_FONT_RANGE: (f32, f32) = (6.0, 24.0);
pub const LEGEND_FONT_RANGE: (f32, f32) = (6.0, 11.0);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Font size for heatmap body text, in points. Valid range 6-24.
    pub body_font_size: f32,
    /// Font size for legend and description text, in points. Valid range 6-11.
    pub legend_font_size: f32,
    pub dendro_stroke_width: f32,
    /// Padding between the canvas edge and the outermost panels, as a
    /// fraction of the canvas. Must lie in [0, 1).
    pub outer_pad: f32,
    /// Padding between adjacent panels, as a fraction of the canvas.
    pub inner_pad: f32,
    pub resize: bool,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub italic_row_labels: bool,
    /// Expected column labels in original sample order. When empty, the
    /// widget's own labels must parse as consecutive integers instead.
    pub column_order: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            body_font_size: 10.0,
            legend_font_size: 8.0,
            dendro_stroke_width: 0.5,
            outer_pad: 0.07,
            inner_pad: 0.01,
            resize: false,
            canvas_width: 1200.0,
            canvas_height: 800.0,
            italic_row_labels: false,
            column_order: Vec::new(),
        }
    }
}

impl LayoutConfig {
    /// Range-checks every field; run before any planning so that a bad
    /// configuration never reaches the widget.
    pub fn validate(&self) -> Result<(), AnnotError> {
        check_range("body_font_size", self.body_font_size, BODY_FONT_RANGE)?;
        check_range("legend_font_size", self.legend_font_size, LEGEND_FONT_RANGE)?;
        check_fraction("outer_pad", self.outer_pad)?;
        check_fraction("inner_pad", self.inner_pad)?;
        if !(self.dendro_stroke_width > 0.0) {
            return Err(AnnotError::Config(format!(
                "dendro_stroke_width must be positive, got {}",
                self.dendro_stroke_width
            )));
        }
        if !(self.canvas_width > 0.0) || !(self.canvas_height > 0.0) {
            return Err(AnnotError::Config(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        Ok(())
    }
}

fn check_range(name: &str, value: f32, (lo, hi): (f32, f32)) -> Result<(), AnnotError> {
    if value.is_finite() && (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(AnnotError::Config(format!(
            "{name} must lie in [{lo}, {hi}], got {value}"
        )))
    }
}

fn check_fraction(name: &str, value: f32) -> Result<(), AnnotError> {
    if value.is_finite() && (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(AnnotError::Config(format!(
            "{name} must lie in [0, 1), got {value}"
        )))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    body_font_size: Option<f32>,
    legend_font_size: Option<f32>,
    dendro_stroke_width: Option<f32>,
    outer_pad: Option<f32>,
    inner_pad: Option<f32>,
    resize: Option<bool>,
    canvas_width: Option<f32>,
    canvas_height: Option<f32>,
    italic_row_labels: Option<bool>,
    column_order: Option<Vec<String>>,
    font_family: Option<String>,
}

/// Loads configuration overrides from a JSON file on top of the defaults.
/// `None` yields the defaults unchanged.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "print" {
            config.theme = Theme::print();
        } else if theme_name == "neutral" || theme_name == "default" {
            config.theme = Theme::neutral();
        }
    }
    if let Some(v) = parsed.font_family {
        config.theme.font_family = v;
    }
    if let Some(v) = parsed.body_font_size {
        config.layout.body_font_size = v;
    }
    if let Some(v) = parsed.legend_font_size {
        config.layout.legend_font_size = v;
    }
    if let Some(v) = parsed.dendro_stroke_width {
        config.layout.dendro_stroke_width = v;
    }
    if let Some(v) = parsed.outer_pad {
        config.layout.outer_pad = v;
    }
    if let Some(v) = parsed.inner_pad {
        config.layout.inner_pad = v;
    }
    if let Some(v) = parsed.resize {
        config.layout.resize = v;
    }
    if let Some(v) = parsed.canvas_width {
        config.layout.canvas_width = v;
    }
    if let Some(v) = parsed.canvas_height {
        config.layout.canvas_height = v;
    }
    if let Some(v) = parsed.italic_row_labels {
        config.layout.italic_row_labels = v;
    }
    if let Some(v) = parsed.column_order {
        config.layout.column_order = v;
    }

    config.layout.validate()?;
    Ok(config)
}
