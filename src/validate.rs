use std::collections::BTreeSet;

use crate::error::AnnotError;
use crate::layer::{Color, Layer, LayerSpec, fold_label};
use crate::plan::format::{MAX_DESCRIPTION_LEN, visible_len};

/// Validates a batch of raw layer specs into typed layers. Runs before any
/// widget mutation; the first offending layer aborts the whole batch.
pub fn validate_layers(specs: &[LayerSpec]) -> Result<Vec<Layer>, AnnotError> {
    specs
        .iter()
        .enumerate()
        .map(|(idx, spec)| validate_layer(idx, spec))
        .collect()
}

fn validate_layer(idx: usize, spec: &LayerSpec) -> Result<Layer, AnnotError> {
    if spec.name.trim().is_empty() {
        return Err(AnnotError::schema(idx, "layer name is empty"));
    }
    if spec.labels.is_empty() {
        return Err(AnnotError::schema(idx, "no sample labels"));
    }
    if spec.categories.is_empty() {
        return Err(AnnotError::schema(idx, "no categories"));
    }

    if spec.descriptions.len() != 1 {
        return Err(AnnotError::cardinality(
            idx,
            format!("expected exactly 1 description, got {}", spec.descriptions.len()),
        ));
    }
    let description = spec.descriptions[0].clone();
    if description.trim().is_empty() {
        return Err(AnnotError::schema(idx, "description is empty"));
    }
    let descr_len = visible_len(&description);
    if descr_len > MAX_DESCRIPTION_LEN {
        return Err(AnnotError::schema(
            idx,
            format!("description visible length {descr_len} exceeds {MAX_DESCRIPTION_LEN}"),
        ));
    }

    let distinct: BTreeSet<String> = spec
        .categories
        .iter()
        .map(|c| fold_label(c))
        .collect();
    if distinct.len() != spec.categories.len() {
        return Err(AnnotError::cardinality(idx, "duplicate categories"));
    }
    if spec.colors.len() != spec.categories.len() {
        return Err(AnnotError::cardinality(
            idx,
            format!(
                "{} color rows for {} categories",
                spec.colors.len(),
                spec.categories.len()
            ),
        ));
    }

    let mut colors = Vec::with_capacity(spec.colors.len());
    for (row_idx, row) in spec.colors.iter().enumerate() {
        colors.push(validate_color(idx, row_idx, row)?);
    }

    let label_set: BTreeSet<String> = spec
        .labels
        .iter()
        .map(|l| fold_label(l))
        .collect();
    if label_set != distinct {
        let missing: Vec<&String> = distinct.difference(&label_set).collect();
        let extra: Vec<&String> = label_set.difference(&distinct).collect();
        return Err(AnnotError::label_mismatch(
            idx,
            format!("unused categories {missing:?}, unknown labels {extra:?}"),
        ));
    }

    Ok(Layer {
        name: spec.name.clone(),
        labels: spec.labels.clone(),
        categories: spec.categories.clone(),
        colors,
        legend_exclude: spec.legend_exclude.clone(),
        description,
    })
}

fn validate_color(layer: usize, row: usize, components: &[f64]) -> Result<Color, AnnotError> {
    if components.len() != 3 {
        return Err(AnnotError::color_format(
            layer,
            format!("color row {row} has {} components, expected 3", components.len()),
        ));
    }
    let mut rgb = [0.0f32; 3];
    for (slot, &value) in rgb.iter_mut().zip(components) {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(AnnotError::color_format(
                layer,
                format!("color row {row} component {value} outside [0, 1]"),
            ));
        }
        *slot = value as f32;
    }
    Ok(Color(rgb))
}

/// Resolves the widget's current column ordering against the expected label
/// sequence. Returns, for each widget column position, the index of the sample
/// it displays in the original (pre-clustering) order.
///
/// With no expected sequence configured, the widget's own labels must parse as
/// a consecutive run of integers; their offsets from the minimum give the
/// implicit order.
pub fn validate_column_order(
    provided: &[String],
    widget_labels: &[String],
) -> Result<Vec<usize>, AnnotError> {
    if provided.is_empty() {
        return implicit_integer_order(widget_labels);
    }

    if provided.len() != widget_labels.len() {
        return Err(AnnotError::OrderMismatch(format!(
            "{} expected labels for {} widget columns",
            provided.len(),
            widget_labels.len()
        )));
    }

    let provided_set: BTreeSet<&str> = provided.iter().map(|l| l.trim()).collect();
    let widget_set: BTreeSet<&str> = widget_labels.iter().map(|l| l.trim()).collect();
    if provided_set != widget_set {
        let unknown: Vec<&&str> = widget_set.difference(&provided_set).collect();
        return Err(AnnotError::OrderMismatch(format!(
            "widget labels {unknown:?} not in the expected sequence"
        )));
    }

    let mut order = Vec::with_capacity(widget_labels.len());
    for label in widget_labels {
        let trimmed = label.trim();
        let position = provided
            .iter()
            .position(|p| p.trim() == trimmed)
            .ok_or_else(|| AnnotError::OrderMismatch(format!("label {trimmed:?} not found")))?;
        order.push(position);
    }
    Ok(order)
}

fn implicit_integer_order(widget_labels: &[String]) -> Result<Vec<usize>, AnnotError> {
    let mut values = Vec::with_capacity(widget_labels.len());
    for label in widget_labels {
        let value: i64 = label.trim().parse().map_err(|_| {
            AnnotError::OrderRequired(format!(
                "widget label {:?} is not an integer; supply an explicit column order",
                label
            ))
        })?;
        values.push(value);
    }
    if values.is_empty() {
        return Err(AnnotError::OrderRequired("widget has no columns".to_string()));
    }

    let min = *values.iter().min().unwrap_or(&0);
    let mut seen = vec![false; values.len()];
    let mut order = Vec::with_capacity(values.len());
    for &value in &values {
        // checked_sub: the span of caller-supplied labels can overflow i64.
        let offset = value
            .checked_sub(min)
            .and_then(|o| usize::try_from(o).ok())
            .filter(|&o| o < values.len() && !seen[o])
            .ok_or_else(|| {
                AnnotError::OrderRequired(format!(
                    "widget labels are not a consecutive integer run (saw {value})"
                ))
            })?;
        seen[offset] = true;
        order.push(offset);
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn spec() -> LayerSpec {
        LayerSpec {
            name: "grade".to_string(),
            labels: strings(&["low", "high", "low"]),
            categories: strings(&["low", "high"]),
            colors: vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]],
            legend_exclude: Vec::new(),
            descriptions: strings(&["tumor grade"]),
        }
    }

    #[test]
    fn valid_spec_passes() {
        let layers = validate_layers(&[spec()]).expect("valid spec");
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].colors[0], Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn color_count_must_match_category_count() {
        let mut bad = spec();
        bad.categories.push("mid".to_string());
        bad.labels[2] = "mid".to_string();
        let err = validate_layers(&[bad]).unwrap_err();
        assert!(matches!(err, AnnotError::Cardinality { layer: 0, .. }), "{err}");
    }

    #[test]
    fn color_rows_must_be_triples_in_range() {
        let mut bad = spec();
        bad.colors[1] = vec![0.0, 1.0];
        assert!(matches!(
            validate_layers(&[bad]).unwrap_err(),
            AnnotError::ColorFormat { .. }
        ));

        let mut bad = spec();
        bad.colors[1] = vec![0.0, 1.0, 1.5];
        assert!(matches!(
            validate_layers(&[bad]).unwrap_err(),
            AnnotError::ColorFormat { .. }
        ));

        let mut bad = spec();
        bad.colors[1] = vec![0.0, 1.0, f64::NAN];
        assert!(matches!(
            validate_layers(&[bad]).unwrap_err(),
            AnnotError::ColorFormat { .. }
        ));
    }

    #[test]
    fn description_cardinality_is_exactly_one() {
        let mut bad = spec();
        bad.descriptions.push("extra".to_string());
        assert!(matches!(
            validate_layers(&[bad]).unwrap_err(),
            AnnotError::Cardinality { .. }
        ));
    }

    #[test]
    fn overlong_description_is_rejected() {
        let mut bad = spec();
        bad.descriptions = strings(&["this description is far too long to fit the panel"]);
        assert!(matches!(
            validate_layers(&[bad]).unwrap_err(),
            AnnotError::Schema { .. }
        ));
    }

    #[test]
    fn label_category_match_is_case_insensitive() {
        let mut ok = spec();
        ok.labels = strings(&["LOW", "High", "low"]);
        assert!(validate_layers(&[ok]).is_ok());

        let mut bad = spec();
        bad.labels[0] = "medium".to_string();
        assert!(matches!(
            validate_layers(&[bad]).unwrap_err(),
            AnnotError::LabelMismatch { .. }
        ));
    }

    #[test]
    fn second_bad_layer_reports_its_own_index() {
        let mut bad = spec();
        bad.colors.pop();
        let err = validate_layers(&[spec(), bad]).unwrap_err();
        assert!(matches!(err, AnnotError::Cardinality { layer: 1, .. }));
    }

    #[test]
    fn implicit_order_from_consecutive_integers() {
        let order =
            validate_column_order(&[], &strings(&["3", "1", "2"])).expect("implicit order");
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn implicit_order_accepts_any_base() {
        let order =
            validate_column_order(&[], &strings(&["11", "12", "10"])).expect("implicit order");
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn non_integer_labels_require_explicit_order() {
        let err = validate_column_order(&[], &strings(&["s1", "s2"])).unwrap_err();
        assert!(matches!(err, AnnotError::OrderRequired(_)));
    }

    #[test]
    fn extreme_integer_labels_do_not_overflow() {
        let labels = strings(&["-9223372036854775808", "1"]);
        let err = validate_column_order(&[], &labels).unwrap_err();
        assert!(matches!(err, AnnotError::OrderRequired(_)));
    }

    #[test]
    fn gapped_integers_require_explicit_order() {
        let err = validate_column_order(&[], &strings(&["1", "3"])).unwrap_err();
        assert!(matches!(err, AnnotError::OrderRequired(_)));
    }

    #[test]
    fn explicit_order_maps_widget_columns_to_sample_positions() {
        let provided = strings(&["s1", "s2", "s3"]);
        let widget = strings(&["s3", " s1", "s2 "]);
        let order = validate_column_order(&provided, &widget).expect("order");
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn explicit_order_set_mismatch_fails() {
        let provided = strings(&["s1", "s2"]);
        let widget = strings(&["s1", "s4"]);
        assert!(matches!(
            validate_column_order(&provided, &widget).unwrap_err(),
            AnnotError::OrderMismatch(_)
        ));
    }
}
