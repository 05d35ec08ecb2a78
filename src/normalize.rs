//! Per-row/column min-max rescaling used by the surrounding pipeline before
//! clustering. Stateless; not part of the layout engine.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Columns,
}

/// Rescales every row or column of `data` to [0, 1] in place. A constant
/// row/column maps to all zeros.
pub fn min_max(data: &mut [Vec<f32>], axis: Axis) {
    match axis {
        Axis::Rows => {
            for row in data.iter_mut() {
                rescale(row.iter_mut());
            }
        }
        Axis::Columns => {
            let cols = data.first().map_or(0, Vec::len);
            for col in 0..cols {
                rescale(data.iter_mut().filter_map(|row| row.get_mut(col)));
            }
        }
    }
}

fn rescale<'a>(values: impl Iterator<Item = &'a mut f32>) {
    let values: Vec<&mut f32> = values.collect();
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for value in &values {
        min = min.min(**value);
        max = max.max(**value);
    }
    let span = max - min;
    for value in values {
        *value = if span > 0.0 { (*value - min) / span } else { 0.0 };
    }
}
