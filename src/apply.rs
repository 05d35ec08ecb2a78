use crate::config::LayoutConfig;
use crate::error::AnnotError;
use crate::layer::LayerSpec;
use crate::plan::{Plan, PanelGeometry, TruncationNotice, plan};
use crate::text_metrics::TextMetrics;
use crate::theme::Theme;
use crate::widget::{HeatmapWidget, PanelId, RegionId, TextStyle, WidgetSnapshot};

/// Handles to the three regions created by the annotation pass.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationRegions {
    pub strip: RegionId,
    pub legend: RegionId,
    pub description: RegionId,
}

#[derive(Debug, Clone)]
pub struct AnnotationOutcome {
    pub geometry: PanelGeometry,
    pub regions: AnnotationRegions,
    pub notices: Vec<TruncationNotice>,
}

/// Plans and applies the annotation layout in one call. Validation and
/// planning complete before the first mutating call, so any `Err` leaves the
/// widget untouched. Once application starts there is no rollback.
pub fn annotate(
    widget: &mut dyn HeatmapWidget,
    specs: &[LayerSpec],
    config: &LayoutConfig,
    theme: &Theme,
    metrics: &dyn TextMetrics,
) -> Result<AnnotationOutcome, AnnotError> {
    let snapshot = WidgetSnapshot::capture(widget);
    let plan = plan(specs, &snapshot, config, theme, metrics)?;
    Ok(apply_plan(widget, &plan, config, theme))
}

/// Applies a previously computed plan. Step order is fixed: resize, panel
/// repositioning, region creation, legend/description rendering, strips,
/// then finalization with the color bar last.
pub fn apply_plan(
    widget: &mut dyn HeatmapWidget,
    plan: &Plan,
    config: &LayoutConfig,
    theme: &Theme,
) -> AnnotationOutcome {
    if config.resize {
        widget.resize(config.canvas_width, config.canvas_height);
    }
    reposition_existing(widget, &plan.geometry, config);
    let regions = create_annotation_regions(widget, &plan.geometry);
    render_legends_and_descriptions(widget, plan, &regions, config, theme);
    render_strips(widget, plan, &regions);
    finalize(widget, plan, &regions, config, theme);
    AnnotationOutcome {
        geometry: plan.geometry,
        regions,
        notices: plan.notices.clone(),
    }
}

/// Repositions the panels the widget already owns. The title panel is left
/// where the widget put it.
fn reposition_existing(widget: &mut dyn HeatmapWidget, geometry: &PanelGeometry, config: &LayoutConfig) {
    widget.set_panel_rect(PanelId::RowDendrogram, geometry.row_dendro_rect());
    widget.set_dendrogram_stroke(PanelId::RowDendrogram, config.dendro_stroke_width);
    widget.set_panel_rect(PanelId::Heatmap, geometry.heatmap_rect());
    widget.set_panel_rect(PanelId::ColumnDendrogram, geometry.col_dendro_rect());
    widget.set_dendrogram_stroke(PanelId::ColumnDendrogram, config.dendro_stroke_width);
}

fn create_annotation_regions(
    widget: &mut dyn HeatmapWidget,
    geometry: &PanelGeometry,
) -> AnnotationRegions {
    AnnotationRegions {
        strip: widget.create_region(geometry.strip_rect()),
        legend: widget.create_region(geometry.legend_rect()),
        description: widget.create_region(geometry.description_rect()),
    }
}

fn render_legends_and_descriptions(
    widget: &mut dyn HeatmapWidget,
    plan: &Plan,
    regions: &AnnotationRegions,
    config: &LayoutConfig,
    theme: &Theme,
) {
    let marker = theme.marker_scale * plan.line_height;
    let entry_style = TextStyle {
        font_size: config.legend_font_size,
        italic: false,
        centered: false,
    };
    for layer in &plan.layers {
        for entry in &layer.legend {
            widget.draw_marker(
                regions.legend,
                marker / 2.0,
                entry.y,
                plan.palette[entry.palette_index],
                marker,
            );
            widget.draw_text(regions.legend, marker * 1.5, entry.y, &entry.text, &entry_style);
        }
        let text = layer.description.lines.join("\n");
        widget.draw_text(
            regions.description,
            plan.geometry.left_w / 2.0,
            layer.midpoint,
            &text,
            &TextStyle {
                font_size: config.legend_font_size,
                italic: layer.description.italic,
                centered: true,
            },
        );
    }
}

fn render_strips(widget: &mut dyn HeatmapWidget, plan: &Plan, regions: &AnnotationRegions) {
    for layer in &plan.layers {
        widget.draw_strip(
            regions.strip,
            layer.midpoint,
            plan.bar_half_extent,
            &layer.sample_indices,
            &plan.palette,
        );
    }
}

fn finalize(
    widget: &mut dyn HeatmapWidget,
    plan: &Plan,
    regions: &AnnotationRegions,
    config: &LayoutConfig,
    theme: &Theme,
) {
    // Shared clip range anchored one line height below the last layer's
    // midpoint, so all three regions crop identically.
    if let Some(last) = plan.layers.last() {
        let y_max = last.midpoint + plan.line_height;
        for region in [regions.strip, regions.legend, regions.description] {
            widget.set_region_clip(region, y_max);
        }
    }
    // The strips supersede the heatmap's own column ticks.
    widget.hide_x_ticks();
    widget.set_tick_font_size(config.legend_font_size);
    widget.set_row_label_italics(config.italic_row_labels);
    widget.set_background(theme.background);
    // Last: the color bar's rendered size is only knowable once shown; the
    // outer-pad shift keeps it on-canvas inside the reserved left band.
    widget.show_color_bar();
    widget.shift_color_bar(config.outer_pad);
}
