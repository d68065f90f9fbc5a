//! Chart.js configuration schema and the fixed axis presets for each chart kind
//!
//! Field names serialize in Chart.js camelCase so the serialized value can be
//! handed to the `Chart` constructor as-is.

use serde::{Deserialize, Serialize};

use crate::errors::ChartResult;
use crate::ChartKind;

pub const SCATTER_X_TITLE: &str = "Forecast Horizon (Days)";
pub const SCATTER_Y_TITLE: &str = "Accuracy (%)";
pub const LINE_X_TITLE: &str = "Date";
pub const LINE_Y_TITLE: &str = "Value";
pub const BAR_Y_TITLE: &str = "Chance of Next-Day Gain (%)";

/// Complete configuration passed to the charting library
///
/// `D` is the data block. Scatter and line build it from a [`ChartData`]; bar
/// takes the caller's pre-assembled block as-is.
#[derive(Debug, Clone, Serialize)]
pub struct ChartConfiguration<D> {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: D,
    pub options: ChartOptions,
}

impl<D> ChartConfiguration<D> {
    /// Build a configuration carrying the fixed display options for `kind`
    pub fn new(kind: ChartKind, data: D) -> Self {
        Self {
            kind,
            data,
            options: ChartOptions::for_kind(kind),
        }
    }
}

impl<D: Serialize> ChartConfiguration<D> {
    /// Serialize to a JSON value, mainly for logging and inspection
    pub fn to_json(&self) -> ChartResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Data block: optional category labels plus the caller's datasets, passed through verbatim
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartData<D> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    pub datasets: D,
}

impl<D> ChartData<D> {
    pub fn new(datasets: D) -> Self {
        Self {
            labels: None,
            datasets,
        }
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChartOptions {
    pub scales: Scales,
}

impl ChartOptions {
    /// Fixed display options for a chart kind
    pub fn for_kind(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Scatter => Self::scatter(),
            ChartKind::Line => Self::line(),
            ChartKind::Bar => Self::bar(),
        }
    }

    /// Linear x-axis of whole-day horizons against a 0-100 accuracy axis
    pub fn scatter() -> Self {
        Self {
            scales: Scales {
                x: Some(AxisConfig {
                    scale_type: Some(ScaleType::Linear),
                    position: Some(AxisPosition::Bottom),
                    title: Some(AxisTitle::shown(SCATTER_X_TITLE)),
                    ticks: Some(TickConfig {
                        step_size: Some(1.0),
                    }),
                    ..Default::default()
                }),
                y: Some(AxisConfig {
                    title: Some(AxisTitle::shown(SCATTER_Y_TITLE)),
                    begin_at_zero: Some(true),
                    suggested_max: Some(100.0),
                    ..Default::default()
                }),
            },
        }
    }

    pub fn line() -> Self {
        Self {
            scales: Scales {
                x: Some(AxisConfig::titled(LINE_X_TITLE)),
                y: Some(AxisConfig::titled(LINE_Y_TITLE)),
            },
        }
    }

    /// Only the value axis is configured; categories come from the caller's labels
    pub fn bar() -> Self {
        Self {
            scales: Scales {
                x: None,
                y: Some(AxisConfig {
                    begin_at_zero: Some(true),
                    ..AxisConfig::titled(BAR_Y_TITLE)
                }),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Scales {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<AxisConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<AxisConfig>,
}

/// Axis configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AxisConfig {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub scale_type: Option<ScaleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<AxisPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<TickConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_max: Option<f64>,
}

impl AxisConfig {
    pub fn titled(text: &str) -> Self {
        Self {
            title: Some(AxisTitle::shown(text)),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Linear,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Bottom,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

impl AxisTitle {
    pub fn shown(text: &str) -> Self {
        Self {
            display: true,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TickConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_size: Option<f64>,
}
