/// Vertical split of the canvas. Legend rows get exact space first
/// (`low = entries * line_height * 0.9`); whatever remains after the column
/// dendrogram, title and paddings goes to the heatmap, clamped at zero.
/// Zero-area panels are valid, not erroneous.
///
/// The low band is never scaled down: with enough legend entries it alone
/// exceeds the canvas and the bands no longer fit in the unit height, with
/// the heatmap squeezed to zero. Callers wanting everything on-canvas must
/// reduce the legend font or the entry count.
pub fn plan_heights(
    legend_entries: usize,
    line_height: f32,
    title_h: f32,
    top_dendro_h: f32,
    outer_pad: f32,
    inner_pad: f32,
) -> (f32, f32) {
    let low = legend_entries as f32 * line_height * 0.9;
    let mid = (1.0 - (low + outer_pad + inner_pad) - top_dendro_h - (title_h + outer_pad)).max(0.0);
    (low, mid)
}

/// Horizontal split of the canvas. The left band must hold the description
/// panel and the row dendrogram; doubling the dendrogram width reserves room
/// for the widget's color bar, whose true width is only knowable once
/// rendered. The right band must hold the legend and the row tick labels.
pub fn plan_widths(
    left_dendro_w: f32,
    descr_w: f32,
    legend_w: f32,
    longest_row_label_w: f32,
    outer_pad: f32,
    inner_pad: f32,
) -> (f32, f32, f32) {
    let left = (descr_w + inner_pad).max(2.0 * left_dendro_w);
    let right = (legend_w + inner_pad).max(longest_row_label_w);
    let mid = (1.0 - (right + outer_pad) - (left + outer_pad)).max(0.0);
    (left, mid, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_height_example() {
        let (low, mid) = plan_heights(2, 0.05, 0.0, 0.10, 0.07, 0.01);
        assert!((low - 0.09).abs() < 1e-6, "low = {low}");
        assert!((mid - 0.66).abs() < 1e-6, "mid = {mid}");
    }

    #[test]
    fn heights_are_never_negative() {
        for outer in [0.0, 0.1, 0.3, 0.49, 0.7, 0.99] {
            for inner in [0.0, 0.1, 0.3, 0.49, 0.7, 0.99] {
                for entries in [0usize, 1, 5, 40] {
                    let (low, mid) = plan_heights(entries, 0.05, 0.1, 0.2, outer, inner);
                    assert!(low >= 0.0);
                    assert!(mid >= 0.0, "mid negative at outer={outer} inner={inner}");
                }
            }
        }
    }

    #[test]
    fn widths_are_never_negative() {
        for outer in [0.0, 0.2, 0.49, 0.99] {
            for inner in [0.0, 0.2, 0.49, 0.99] {
                let (left, mid, right) = plan_widths(0.15, 0.2, 0.25, 0.1, outer, inner);
                assert!(left >= 0.0);
                assert!(mid >= 0.0);
                assert!(right >= 0.0);
            }
        }
    }

    #[test]
    fn left_band_reserves_color_bar_room() {
        // Wide dendrogram: the 2x reservation wins over the description.
        let (left, _, _) = plan_widths(0.2, 0.1, 0.1, 0.1, 0.05, 0.01);
        assert!((left - 0.4).abs() < 1e-6);
        // Wide description: the description plus padding wins.
        let (left, _, _) = plan_widths(0.05, 0.3, 0.1, 0.1, 0.05, 0.01);
        assert!((left - 0.31).abs() < 1e-6);
    }

    #[test]
    fn right_band_covers_legend_and_row_labels() {
        let (_, _, right) = plan_widths(0.1, 0.1, 0.2, 0.05, 0.05, 0.01);
        assert!((right - 0.21).abs() < 1e-6);
        let (_, _, right) = plan_widths(0.1, 0.1, 0.05, 0.25, 0.05, 0.01);
        assert!((right - 0.25).abs() < 1e-6);
    }

    #[test]
    fn many_entries_keep_exact_legend_height_past_the_canvas() {
        // 25 rows at 0.05 need more than the unit canvas; the legend band
        // keeps its exact height and the heatmap collapses to zero.
        let (low, mid) = plan_heights(25, 0.05, 0.0, 0.10, 0.07, 0.01);
        assert!((low - 1.125).abs() < 1e-6, "low = {low}");
        assert_eq!(mid, 0.0);
    }

    #[test]
    fn zero_entries_give_zero_low_band() {
        let (low, _) = plan_heights(0, 0.05, 0.0, 0.1, 0.07, 0.01);
        assert_eq!(low, 0.0);
    }
}
