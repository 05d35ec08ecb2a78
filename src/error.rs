use thiserror::Error;

/// Validation and planning failures. All abort the call before any widget
/// mutation; layer-indexed variants identify the offending annotation layer.
#[derive(Debug, Error)]
pub enum AnnotError {
    #[error("layer {layer}: {message}")]
    Schema { layer: usize, message: String },

    #[error("layer {layer}: {message}")]
    Cardinality { layer: usize, message: String },

    #[error("layer {layer}: {message}")]
    ColorFormat { layer: usize, message: String },

    #[error("layer {layer}: categories do not match sample labels ({message})")]
    LabelMismatch { layer: usize, message: String },

    #[error("column order required: {0}")]
    OrderRequired(String),

    #[error("column order mismatch: {0}")]
    OrderMismatch(String),

    #[error("layer {layer}: no palette entry for category {category:?}")]
    UnknownColor { layer: usize, category: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AnnotError {
    pub fn schema(layer: usize, message: impl Into<String>) -> Self {
        Self::Schema {
            layer,
            message: message.into(),
        }
    }

    pub fn cardinality(layer: usize, message: impl Into<String>) -> Self {
        Self::Cardinality {
            layer,
            message: message.into(),
        }
    }

    pub fn color_format(layer: usize, message: impl Into<String>) -> Self {
        Self::ColorFormat {
            layer,
            message: message.into(),
        }
    }

    pub fn label_mismatch(layer: usize, message: impl Into<String>) -> Self {
        Self::LabelMismatch {
            layer,
            message: message.into(),
        }
    }
}
