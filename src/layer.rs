use serde::{Deserialize, Serialize};

/// Markup token marking a description as italic. Stripped before any
/// measurement or length decision; re-applied as a text style at draw time.
pub const ITALIC_TOKEN: &str = "\\it";

/// The one case-folding convention for matching labels to categories:
/// trimmed, Unicode-lowercased. Validation and every later lookup must agree
/// on this, or a label the validator accepted could miss its category at
/// planning time.
pub(crate) fn fold_label(text: &str) -> String {
    text.trim().to_lowercase()
}

/// An RGB triple with components in [0, 1]. Palette deduplication relies on
/// exact component equality, so no tolerance is applied anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f32; 3]);

impl Color {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }
}

/// Raw annotation layer as handed in by callers or config files. Field shapes
/// mirror the loosely-typed input surface: colors arrive as free-form numeric
/// rows and descriptions as a list whose cardinality is checked, not assumed.
/// `validate::validate_layers` turns a batch of these into typed [`Layer`]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSpec {
    pub name: String,
    /// One category label per sample, in the original (pre-clustering) order.
    pub labels: Vec<String>,
    /// Distinct category names in display/legend order.
    pub categories: Vec<String>,
    /// One numeric row per category; validated to be exactly 3 components in [0, 1].
    pub colors: Vec<Vec<f64>>,
    /// Categories hidden from the legend (their strip cells still render).
    #[serde(default)]
    pub legend_exclude: Vec<String>,
    /// Must contain exactly one entry. May embed one `\n` line-break marker
    /// and the `\it` italic token.
    pub descriptions: Vec<String>,
}

/// A validated annotation layer. Invariants established by the validator:
/// `colors.len() == categories.len()`, every label matches exactly one
/// category case-insensitively, and the description is a single string whose
/// visible length fits the description panel.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub labels: Vec<String>,
    pub categories: Vec<String>,
    pub colors: Vec<Color>,
    pub legend_exclude: Vec<String>,
    pub description: String,
}

impl Layer {
    /// Case-insensitive category lookup for a sample label.
    pub fn category_of(&self, label: &str) -> Option<usize> {
        let needle = fold_label(label);
        self.categories.iter().position(|cat| fold_label(cat) == needle)
    }

    fn excluded(&self, category: &str) -> bool {
        let needle = fold_label(category);
        self.legend_exclude.iter().any(|e| fold_label(e) == needle)
    }

    /// Categories shown in the legend, in display order, with their indices.
    pub fn legend_categories(&self) -> impl Iterator<Item = (usize, &str)> {
        self.categories
            .iter()
            .enumerate()
            .filter(|(_, cat)| !self.excluded(cat))
            .map(|(idx, cat)| (idx, cat.as_str()))
    }

    pub fn legend_entry_count(&self) -> usize {
        self.legend_categories().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> Layer {
        Layer {
            name: "group".to_string(),
            labels: vec!["a".to_string(), "B".to_string(), "b".to_string()],
            categories: vec!["A".to_string(), "B".to_string()],
            colors: vec![Color::new(1.0, 0.0, 0.0), Color::new(0.0, 1.0, 0.0)],
            legend_exclude: vec!["b".to_string()],
            description: "groups".to_string(),
        }
    }

    #[test]
    fn category_lookup_is_case_insensitive() {
        let layer = layer();
        assert_eq!(layer.category_of("a"), Some(0));
        assert_eq!(layer.category_of("B"), Some(1));
        assert_eq!(layer.category_of("c"), None);
    }

    #[test]
    fn category_lookup_folds_unicode_case() {
        let mut layer = layer();
        layer.categories[0] = "é".to_string();
        assert_eq!(layer.category_of("É"), Some(0));
        assert_eq!(layer.category_of(" é "), Some(0));
    }

    #[test]
    fn legend_exclusion_is_case_insensitive() {
        let layer = layer();
        let shown: Vec<&str> = layer.legend_categories().map(|(_, c)| c).collect();
        assert_eq!(shown, vec!["A"]);
        assert_eq!(layer.legend_entry_count(), 1);
    }

    #[test]
    fn exact_color_equality() {
        assert_eq!(Color::new(0.5, 0.0, 1.0), Color::new(0.5, 0.0, 1.0));
        assert_ne!(Color::new(0.5, 0.0, 1.0), Color::new(0.5000001, 0.0, 1.0));
    }
}
