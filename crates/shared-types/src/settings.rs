//! Renderer settings, supplied by the host page as JSON

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ChartInteropError, ChartResult};

pub const DEFAULT_SCATTER_SURFACE: &str = "myScatterChart";
pub const DEFAULT_LINE_SURFACE: &str = "trendChart";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RendererSettings {
    /// Canvas id that `render_scatter` draws into
    pub scatter_surface: String,
    /// Canvas id that `render_line` draws into
    pub line_surface: String,
    /// `off`, `error` .. `trace`. The logger is shared by the whole module, so
    /// this applies to every renderer, not just the one built from these settings.
    pub log_level: String,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            scatter_surface: DEFAULT_SCATTER_SURFACE.to_string(),
            line_surface: DEFAULT_LINE_SURFACE.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl RendererSettings {
    /// Parse and validate settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> ChartResult<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| ChartInteropError::InvalidConfig {
                message: format!("Failed to parse settings: {e}"),
            })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.scatter_surface.is_empty() || self.line_surface.is_empty() {
            return Err(ChartInteropError::InvalidConfig {
                message: "surface ids must not be empty".to_string(),
            });
        }
        self.level().map(|_| ())
    }

    pub fn level(&self) -> ChartResult<log::LevelFilter> {
        log::LevelFilter::from_str(&self.log_level).map_err(|_| ChartInteropError::InvalidConfig {
            message: format!("unknown log level '{}'", self.log_level),
        })
    }
}
