pub mod format;
mod geometry;
mod palette;
mod types;

pub use format::{MAX_CATEGORY_LEN, MAX_DESCRIPTION_LEN, truncate_categories, wrap_description};
pub use geometry::{plan_heights, plan_widths};
pub use palette::{build_palette, category_index, sample_index_vector};
pub use types::*;

use crate::config::LayoutConfig;
use crate::error::AnnotError;
use crate::layer::{Layer, LayerSpec};
use crate::text_metrics::TextMetrics;
use crate::theme::Theme;
use crate::validate::{validate_column_order, validate_layers};
use crate::widget::WidgetSnapshot;

// Reference string for the legend line height; categories are single-line, so
// any string with an ascender and descender measures the same height.
const LINE_PROBE: &str = "Ag";

/// Computes the complete layout-and-color plan for a widget snapshot. Pure:
/// no widget is touched, so every failure here leaves the figure unchanged.
pub fn plan(
    specs: &[LayerSpec],
    snapshot: &WidgetSnapshot,
    config: &LayoutConfig,
    theme: &Theme,
    metrics: &dyn TextMetrics,
) -> Result<Plan, AnnotError> {
    config.validate()?;
    if specs.is_empty() {
        return Err(AnnotError::Config("no annotation layers".to_string()));
    }

    let mut layers = validate_layers(specs)?;
    let sample_order = validate_column_order(&config.column_order, &snapshot.column_labels)?;
    for (idx, layer) in layers.iter().enumerate() {
        if layer.labels.len() != sample_order.len() {
            return Err(AnnotError::cardinality(
                idx,
                format!(
                    "{} sample labels for {} widget columns",
                    layer.labels.len(),
                    sample_order.len()
                ),
            ));
        }
    }

    let mut notices = Vec::new();
    for (idx, layer) in layers.iter_mut().enumerate() {
        format::truncate_categories(idx, layer, &mut notices);
    }
    let descriptions: Vec<DescriptionText> = layers
        .iter()
        .map(|layer| format::wrap_description(&layer.description))
        .collect();

    let font = config.legend_font_size;
    let line_height = metrics.measure(LINE_PROBE, font).height;
    let marker_room = theme.marker_scale * line_height;

    // Single longest legend category and description across all layers;
    // strictly-greater comparison keeps the first occurrence on ties.
    let mut legend_text_w = 0.0f32;
    for layer in &layers {
        for (_, category) in layer.legend_categories() {
            let width = metrics.measure(category, font).width;
            if width > legend_text_w {
                legend_text_w = width;
            }
        }
    }
    let mut descr_w = 0.0f32;
    for description in &descriptions {
        for line in &description.lines {
            let width = metrics.measure(line, font).width;
            if width > descr_w {
                descr_w = width;
            }
        }
    }
    let mut row_label_w = 0.0f32;
    for label in &snapshot.row_labels {
        let width = metrics.measure(label, font).width;
        if width > row_label_w {
            row_label_w = width;
        }
    }

    let total_entries: usize = layers.iter().map(Layer::legend_entry_count).sum();
    let (low_h, mid_h) = plan_heights(
        total_entries,
        line_height,
        snapshot.title_h,
        snapshot.top_dendro_h,
        config.outer_pad,
        config.inner_pad,
    );
    let (left_w, mid_w, right_w) = plan_widths(
        snapshot.left_dendro_w,
        descr_w,
        legend_text_w + marker_room,
        row_label_w,
        config.outer_pad,
        config.inner_pad,
    );
    let geometry = PanelGeometry {
        title_h: snapshot.title_h,
        top_dendro_h: snapshot.top_dendro_h,
        mid_h,
        low_h,
        left_w,
        mid_w,
        right_w,
        outer_pad: config.outer_pad,
        inner_pad: config.inner_pad,
    };

    let palette = build_palette(&layers);

    // Legend rows stack top-down across layers at one fixed spacing; each
    // layer's description and strip share its legend block's midpoint.
    let mut layer_plans = Vec::with_capacity(layers.len());
    let mut slot = 0usize;
    let mut min_half_gap = f32::INFINITY;
    for (idx, (layer, description)) in layers.iter().zip(descriptions).enumerate() {
        let mut legend = Vec::with_capacity(layer.legend_entry_count());
        for (cat_idx, category) in layer.legend_categories() {
            legend.push(LegendEntry {
                text: category.to_string(),
                palette_index: category_index(&palette, idx, layer, cat_idx)?,
                y: (slot as f32 + 0.5) * line_height,
            });
            slot += 1;
        }
        let midpoint = match (legend.first(), legend.last()) {
            (Some(first), Some(last)) => {
                min_half_gap = min_half_gap.min((last.y - first.y) / 2.0);
                (first.y + last.y) / 2.0
            }
            // Fully legend-excluded layer: center it on the next free slot
            // without consuming it.
            _ => (slot as f32 + 0.5) * line_height,
        };
        layer_plans.push(LayerPlan {
            name: layer.name.clone(),
            legend,
            midpoint,
            description,
            sample_indices: sample_index_vector(&palette, idx, layer, &sample_order)?,
        });
    }
    let bar_half_extent = (5.0 * line_height).min(min_half_gap);

    log::debug!(
        "planned {} layers, {} legend rows, {} palette colors, low={:.3} mid={:.3}",
        layer_plans.len(),
        total_entries,
        palette.len(),
        low_h,
        mid_h
    );

    Ok(Plan {
        geometry,
        palette,
        layers: layer_plans,
        line_height,
        bar_half_extent,
        sample_order,
        notices,
    })
}
