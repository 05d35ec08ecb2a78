use crate::layer::Color;

/// A rectangle in canvas-normalized coordinates, origin at the bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Panels the clustering widget already owns before annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Title,
    RowDendrogram,
    ColumnDendrogram,
    Heatmap,
}

/// Handle to a region created by the annotation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub italic: bool,
    pub centered: bool,
}

/// The external hierarchical-clustering heatmap widget. An explicit handle is
/// passed into every call; there is no global figure lookup. Region-local
/// draw coordinates are canvas-normalized with `y` measured downward from the
/// region's top edge.
///
/// Mutations are applied in place and are not rolled back if a later step
/// fails; validation runs to completion before the first mutating call.
pub trait HeatmapWidget {
    /// Column tick labels in the widget's current clustering-determined order.
    fn column_labels(&self) -> Vec<String>;
    fn row_labels(&self) -> Vec<String>;
    fn panel_rect(&self, panel: PanelId) -> Rect;

    fn set_panel_rect(&mut self, panel: PanelId, rect: Rect);
    fn set_dendrogram_stroke(&mut self, panel: PanelId, width: f32);
    /// Creates a new hidden-axis region and returns its handle.
    fn create_region(&mut self, rect: Rect) -> RegionId;
    fn draw_marker(&mut self, region: RegionId, x: f32, y: f32, color: Color, size: f32);
    fn draw_text(&mut self, region: RegionId, x: f32, y: f32, text: &str, style: &TextStyle);
    /// Draws one indexed-color strip centered at `center_y`, one cell per
    /// index, colored through the palette.
    fn draw_strip(
        &mut self,
        region: RegionId,
        center_y: f32,
        half_extent: f32,
        indices: &[usize],
        palette: &[Color],
    );
    /// Clips a region's visible vertical range to `[0, y_max]` (downward
    /// from the region top).
    fn set_region_clip(&mut self, region: RegionId, y_max: f32);

    fn hide_x_ticks(&mut self);
    fn set_tick_font_size(&mut self, size: f32);
    fn set_row_label_italics(&mut self, italic: bool);
    /// Toggles the widget's built-in color bar. Its rendered size is only
    /// knowable afterwards, which is why it is triggered last.
    fn show_color_bar(&mut self);
    fn shift_color_bar(&mut self, dx: f32);
    fn set_background(&mut self, color: Color);
    fn resize(&mut self, width: f32, height: f32);
}

/// Read-only snapshot of the widget state the planner needs. Captured before
/// planning so that `plan` stays a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct WidgetSnapshot {
    pub column_labels: Vec<String>,
    pub row_labels: Vec<String>,
    pub title_h: f32,
    pub top_dendro_h: f32,
    pub left_dendro_w: f32,
}

impl WidgetSnapshot {
    pub fn capture(widget: &dyn HeatmapWidget) -> Self {
        Self {
            column_labels: widget.column_labels(),
            row_labels: widget.row_labels(),
            title_h: widget.panel_rect(PanelId::Title).h,
            top_dendro_h: widget.panel_rect(PanelId::ColumnDendrogram).h,
            left_dendro_w: widget.panel_rect(PanelId::RowDendrogram).w,
        }
    }
}
