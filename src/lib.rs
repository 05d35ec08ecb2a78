pub mod apply;
pub mod config;
pub mod error;
pub mod layer;
pub mod normalize;
pub mod plan;
pub mod text_metrics;
pub mod theme;
pub mod validate;
pub mod widget;

pub use apply::{AnnotationOutcome, AnnotationRegions, annotate};
pub use config::{Config, LayoutConfig, load_config};
pub use error::AnnotError;
pub use layer::{Color, Layer, LayerSpec};
pub use plan::{DescriptionText, PanelGeometry, Plan, TruncationNotice, plan};
pub use text_metrics::{CharTableMetrics, FontMetrics, TextMetrics, TextSize};
pub use theme::Theme;
pub use widget::{HeatmapWidget, PanelId, Rect, RegionId, TextStyle, WidgetSnapshot};
