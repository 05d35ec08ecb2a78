use crate::layer::Color;
use crate::widget::Rect;

/// Canvas-normalized panel fractions, recomputed on every call and never
/// persisted. Heights stack bottom-up: annotation strip band (`low_h`),
/// heatmap (`mid_h`), column dendrogram (`top_dendro_h`), title (`title_h`).
/// Widths run left-to-right: description band (`left_w`), heatmap (`mid_w`),
/// legend band (`right_w`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    pub title_h: f32,
    pub top_dendro_h: f32,
    pub mid_h: f32,
    pub low_h: f32,
    pub left_w: f32,
    pub mid_w: f32,
    pub right_w: f32,
    pub outer_pad: f32,
    pub inner_pad: f32,
}

impl PanelGeometry {
    /// Row-dendrogram panel, left of the heatmap. The `left_w` band also
    /// reserves room for the widget's color bar.
    pub fn row_dendro_rect(&self) -> Rect {
        Rect {
            x: self.outer_pad,
            y: self.outer_pad + self.low_h + self.inner_pad,
            w: self.left_w,
            h: self.mid_h,
        }
    }

    pub fn heatmap_rect(&self) -> Rect {
        Rect {
            x: self.left_w + self.outer_pad + self.inner_pad,
            y: self.outer_pad + self.low_h + self.inner_pad,
            w: self.mid_w,
            h: self.mid_h,
        }
    }

    /// Column-dendrogram panel, directly above the heatmap.
    pub fn col_dendro_rect(&self) -> Rect {
        Rect {
            x: self.left_w + self.outer_pad + self.inner_pad,
            y: 1.0 - self.outer_pad - self.title_h - self.top_dendro_h,
            w: self.mid_w,
            h: self.top_dendro_h,
        }
    }

    /// Annotation-strip region under the heatmap.
    pub fn strip_rect(&self) -> Rect {
        Rect {
            x: self.left_w + self.outer_pad + self.inner_pad,
            y: self.outer_pad,
            w: self.mid_w,
            h: self.low_h,
        }
    }

    /// Legend region at bottom right.
    pub fn legend_rect(&self) -> Rect {
        Rect {
            x: self.left_w + self.mid_w + self.outer_pad + 2.0 * self.inner_pad,
            y: self.outer_pad,
            w: self.right_w,
            h: self.low_h,
        }
    }

    /// Description region at bottom left.
    pub fn description_rect(&self) -> Rect {
        Rect {
            x: self.outer_pad,
            y: self.outer_pad,
            w: self.left_w,
            h: self.low_h,
        }
    }
}

/// One marker-plus-text legend row. `y` is measured downward from the top of
/// the legend region, in canvas-normalized units.
#[derive(Debug, Clone)]
pub struct LegendEntry {
    pub text: String,
    pub palette_index: usize,
    pub y: f32,
}

/// A formatted description: at most two lines, italics recorded separately
/// after stripping the markup token.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionText {
    pub lines: Vec<String>,
    pub italic: bool,
}

impl DescriptionText {
    pub fn visible_len(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).sum()
    }
}

/// Per-layer rendering plan.
#[derive(Debug, Clone)]
pub struct LayerPlan {
    pub name: String,
    pub legend: Vec<LegendEntry>,
    /// Vertical midpoint of this layer's legend block, shared by its
    /// description and strip. Same downward coordinate as [`LegendEntry::y`].
    pub midpoint: f32,
    pub description: DescriptionText,
    /// One palette index per widget column, in the widget's current order.
    pub sample_indices: Vec<usize>,
}

/// Advisory record of one category truncation. Not an error channel.
#[derive(Debug, Clone, PartialEq)]
pub struct TruncationNotice {
    pub layer: usize,
    pub original: String,
    pub truncated: String,
}

/// Complete layout-and-color plan. Pure data: computing one performs no
/// widget mutation, so plans are testable without a rendering backend.
#[derive(Debug, Clone)]
pub struct Plan {
    pub geometry: PanelGeometry,
    pub palette: Vec<Color>,
    pub layers: Vec<LayerPlan>,
    pub line_height: f32,
    pub bar_half_extent: f32,
    pub sample_order: Vec<usize>,
    pub notices: Vec<TruncationNotice>,
}
