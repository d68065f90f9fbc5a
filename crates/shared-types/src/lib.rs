//! Shared types for Chart Interop
//!
//! This crate contains the platform-independent half of the chart renderer:
//! the Chart.js configuration schema, the fixed per-kind axis presets, the
//! error taxonomy and the renderer settings. Nothing in here touches the DOM,
//! so everything can be exercised by plain native tests.

use serde::{Deserialize, Serialize};

pub mod chart_config;
pub mod errors;
pub mod settings;

pub use chart_config::{AxisConfig, AxisTitle, ChartConfiguration, ChartData, ChartOptions, Scales, TickConfig};
pub use errors::{ChartInteropError, ChartResult, ErrorResponse};
pub use settings::RendererSettings;

/// Chart types supported by the renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Scatter,
    Line,
    Bar,
}

impl ChartKind {
    /// Chart.js `type` string for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Scatter => "scatter",
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_kind_matches_chart_js_type_names() {
        assert_eq!(ChartKind::Scatter.to_string(), "scatter");
        assert_eq!(ChartKind::Line.as_str(), "line");
        assert_eq!(serde_json::to_value(ChartKind::Bar).unwrap(), "bar");
    }
}
