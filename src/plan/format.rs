use crate::layer::{ITALIC_TOKEN, Layer, fold_label};

use super::{DescriptionText, TruncationNotice};

/// Longest category string shown in legends and strips.
pub const MAX_CATEGORY_LEN: usize = 15;
/// Longest visible description, markup stripped, after formatting.
pub const MAX_DESCRIPTION_LEN: usize = 30;

/// Character count ignoring the italic token and line-break markers.
pub fn visible_len(text: &str) -> usize {
    text.replace(ITALIC_TOKEN, "")
        .chars()
        .filter(|&ch| ch != '\n')
        .count()
}

/// Cuts every over-long category to exactly [`MAX_CATEGORY_LEN`] characters
/// and rewrites all sample labels (and legend exclusions) that matched the
/// original category case-insensitively, keeping the label-category invariant
/// intact. Idempotent: an already-cut category is left alone.
pub fn truncate_categories(
    layer_idx: usize,
    layer: &mut Layer,
    notices: &mut Vec<TruncationNotice>,
) {
    for cat_idx in 0..layer.categories.len() {
        let original = layer.categories[cat_idx].clone();
        if original.chars().count() <= MAX_CATEGORY_LEN {
            continue;
        }
        let truncated: String = original.chars().take(MAX_CATEGORY_LEN).collect();
        let folded = fold_label(&original);
        layer.categories[cat_idx] = truncated.clone();
        for label in &mut layer.labels {
            if fold_label(label) == folded {
                *label = truncated.clone();
            }
        }
        for excluded in &mut layer.legend_exclude {
            if fold_label(excluded) == folded {
                *excluded = truncated.clone();
            }
        }
        log::warn!(
            "layer {} ({}): category {:?} truncated to {:?}",
            layer_idx,
            layer.name,
            original,
            truncated
        );
        notices.push(TruncationNotice {
            layer: layer_idx,
            original,
            truncated,
        });
    }
}

/// Formats a description for the description panel: strips the italic token,
/// then breaks once at the first whitespace at or after character position
/// [`MAX_CATEGORY_LEN`] and clips the second line to twice the first line's
/// length. A description with no whitespace past the break position stays on
/// one line; long unbroken strings are not forcibly wrapped.
pub fn wrap_description(description: &str) -> DescriptionText {
    let italic = description.contains(ITALIC_TOKEN);
    let stripped = description.replace(ITALIC_TOKEN, "");

    // An embedded line-break marker wins over the wrapping heuristic.
    if let Some(break_at) = stripped.find('\n') {
        let first = stripped[..break_at].to_string();
        let second = stripped[break_at + 1..].replace('\n', " ");
        return clipped(first, second, italic);
    }

    if stripped.chars().count() <= MAX_CATEGORY_LEN {
        return DescriptionText {
            lines: vec![stripped],
            italic,
        };
    }

    let break_at = stripped
        .char_indices()
        .enumerate()
        .find(|&(pos, (_, ch))| pos >= MAX_CATEGORY_LEN && ch.is_whitespace())
        .map(|(_, (byte_idx, ch))| (byte_idx, ch.len_utf8()));

    match break_at {
        Some((byte_idx, ws_len)) => {
            let first = stripped[..byte_idx].to_string();
            let second = stripped[byte_idx + ws_len..].to_string();
            clipped(first, second, italic)
        }
        None => DescriptionText {
            lines: vec![stripped],
            italic,
        },
    }
}

fn clipped(first: String, second: String, italic: bool) -> DescriptionText {
    let limit = first.chars().count() * 2;
    let second: String = second.chars().take(limit).collect();
    let mut lines = vec![first];
    if !second.is_empty() {
        lines.push(second);
    }
    DescriptionText { lines, italic }
}
