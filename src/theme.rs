use serde::{Deserialize, Serialize};

use crate::layer::Color;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    /// Canvas background applied by the final layout step.
    pub background: Color,
    /// Legend marker edge length as a multiple of the legend line height.
    pub marker_scale: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
}

impl Theme {
    pub fn neutral() -> Self {
        Self {
            font_family: "Helvetica, Arial, sans-serif".to_string(),
            background: Color::new(0.94, 0.94, 0.94),
            marker_scale: 0.6,
            line_height: 1.15,
        }
    }

    pub fn print() -> Self {
        Self {
            font_family: "Times New Roman, serif".to_string(),
            background: Color::new(1.0, 1.0, 1.0),
            marker_scale: 0.5,
            line_height: 1.1,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::neutral()
    }
}
