use crate::error::AnnotError;
use crate::layer::{Color, Layer};

/// Builds the deduplicated global palette across all layers. Colors are
/// appended in first-seen order, compared by exact component equality, so two
/// layers sharing a color share a palette slot and a strip cell color.
pub fn build_palette(layers: &[Layer]) -> Vec<Color> {
    let mut palette: Vec<Color> = Vec::new();
    for layer in layers {
        for &color in &layer.colors {
            if !palette.contains(&color) {
                palette.push(color);
            }
        }
    }
    palette
}

/// Palette slot of one category's color. The palette is built from the very
/// colors being looked up, so a miss means a broken internal invariant rather
/// than bad caller input.
pub fn category_index(
    palette: &[Color],
    layer_idx: usize,
    layer: &Layer,
    cat_idx: usize,
) -> Result<usize, AnnotError> {
    let color = layer.colors[cat_idx];
    palette
        .iter()
        .position(|&p| p == color)
        .ok_or_else(|| AnnotError::UnknownColor {
            layer: layer_idx,
            category: layer.categories[cat_idx].clone(),
        })
}

/// Maps each widget column to the palette slot of its sample's category.
/// `order[i]` is the original index of the sample shown in column `i` and
/// must be within the layer's label range; the result renders as a one-row
/// indexed-color strip.
pub fn sample_index_vector(
    palette: &[Color],
    layer_idx: usize,
    layer: &Layer,
    order: &[usize],
) -> Result<Vec<usize>, AnnotError> {
    let mut indices = Vec::with_capacity(order.len());
    for &sample in order {
        let label = layer.labels.get(sample).ok_or_else(|| {
            AnnotError::OrderMismatch(format!(
                "column order references sample {sample}, but layer {layer_idx} has {} labels",
                layer.labels.len()
            ))
        })?;
        let cat_idx = layer.category_of(label).ok_or_else(|| AnnotError::UnknownColor {
            layer: layer_idx,
            category: label.clone(),
        })?;
        indices.push(category_index(palette, layer_idx, layer, cat_idx)?);
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(name: &str, labels: &[&str], categories: &[&str], colors: &[[f32; 3]]) -> Layer {
        Layer {
            name: name.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            colors: colors.iter().map(|&c| Color(c)).collect(),
            legend_exclude: Vec::new(),
            description: name.to_string(),
        }
    }

    #[test]
    fn palette_deduplicates_across_layers() {
        let red = [1.0, 0.0, 0.0];
        let green = [0.0, 1.0, 0.0];
        let blue = [0.0, 0.0, 1.0];
        let a = layer("a", &["x", "y"], &["x", "y"], &[red, green]);
        let b = layer("b", &["p", "q"], &["p", "q"], &[green, blue]);
        let palette = build_palette(&[a, b]);
        assert_eq!(palette, vec![Color(red), Color(green), Color(blue)]);
    }

    #[test]
    fn palette_has_no_duplicate_rows_and_bounded_length() {
        let a = layer(
            "a",
            &["x", "y"],
            &["x", "y"],
            &[[0.5, 0.5, 0.5], [0.5, 0.5, 0.5]],
        );
        let palette = build_palette(std::slice::from_ref(&a));
        for (i, color) in palette.iter().enumerate() {
            assert!(!palette[i + 1..].contains(color), "duplicate at {i}");
        }
        assert!(palette.len() <= a.colors.len());
    }

    #[test]
    fn category_index_is_left_inverse_of_build_palette() {
        let a = layer(
            "a",
            &["x", "y", "z"],
            &["x", "y", "z"],
            &[[0.1, 0.2, 0.3], [0.4, 0.5, 0.6], [0.1, 0.2, 0.3]],
        );
        let palette = build_palette(std::slice::from_ref(&a));
        for cat in 0..a.categories.len() {
            let idx = category_index(&palette, 0, &a, cat).expect("index");
            assert_eq!(palette[idx], a.colors[cat]);
        }
    }

    #[test]
    fn missing_color_is_an_internal_invariant_breach() {
        let a = layer("a", &["x"], &["x"], &[[0.9, 0.9, 0.9]]);
        let err = category_index(&[], 2, &a, 0).unwrap_err();
        assert!(matches!(err, AnnotError::UnknownColor { layer: 2, .. }));
    }

    #[test]
    fn worked_ten_sample_example() {
        let red = [1.0, 0.0, 0.0];
        let green = [0.0, 1.0, 0.0];
        let labels = ["A", "A", "B", "B", "B", "A", "A", "B", "B", "A"];
        let a = layer("groups", &labels, &["A", "B"], &[red, green]);
        let palette = build_palette(std::slice::from_ref(&a));
        let order: Vec<usize> = (0..10).collect();
        let indices = sample_index_vector(&palette, 0, &a, &order).expect("indices");
        let p_a = palette.iter().position(|&c| c == Color(red)).unwrap();
        let p_b = palette.iter().position(|&c| c == Color(green)).unwrap();
        assert_eq!(indices, vec![p_a, p_a, p_b, p_b, p_b, p_a, p_a, p_b, p_b, p_a]);
    }

    #[test]
    fn out_of_range_order_is_a_typed_error() {
        let red = [1.0, 0.0, 0.0];
        let green = [0.0, 1.0, 0.0];
        let a = layer("groups", &["A", "B"], &["A", "B"], &[red, green]);
        let palette = build_palette(std::slice::from_ref(&a));
        let err = sample_index_vector(&palette, 0, &a, &[0, 5]).unwrap_err();
        assert!(matches!(err, AnnotError::OrderMismatch(_)));
    }

    #[test]
    fn index_vector_follows_clustering_order() {
        let red = [1.0, 0.0, 0.0];
        let green = [0.0, 1.0, 0.0];
        let a = layer("groups", &["A", "B", "A"], &["A", "B"], &[red, green]);
        let palette = build_palette(std::slice::from_ref(&a));
        let indices = sample_index_vector(&palette, 0, &a, &[1, 2, 0]).expect("indices");
        assert_eq!(indices, vec![1, 0, 0]);
    }
}
