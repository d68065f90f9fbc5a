//! Error types for chart rendering
//! Provides consistent error handling and reporting across the JS boundary

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base error type for all chart interop operations
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum ChartInteropError {
    // Drawing surface errors
    #[error("Canvas element '{surface_id}' not found")]
    SurfaceNotFound { surface_id: String },

    #[error("Element '{surface_id}' is not a canvas")]
    NotACanvas { surface_id: String },

    #[error("Canvas '{surface_id}' has no 2d context")]
    ContextUnavailable { surface_id: String },

    // Charting library errors
    #[error("Chart library rejected configuration: {message}")]
    LibraryRejection { message: String },

    #[error("Invalid chart payload: {message}")]
    InvalidPayload { message: String },

    // Configuration errors
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("JavaScript interop error: {message}")]
    JsInterop { message: String },
}

impl ChartInteropError {
    pub fn surface_not_found(surface_id: &str) -> Self {
        Self::SurfaceNotFound {
            surface_id: surface_id.to_string(),
        }
    }
}

/// Result type alias for chart interop operations
pub type ChartResult<T> = Result<T, ChartInteropError>;

/// Error response structure for JavaScript interop
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ChartInteropError,
    pub timestamp: u64,
    pub context: Option<ErrorContext>,
}

/// Additional context for error reporting
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
}

impl ErrorResponse {
    pub fn new(error: ChartInteropError) -> Self {
        Self {
            success: false,
            error,
            timestamp: chrono::Utc::now().timestamp_millis() as u64,
            context: None,
        }
    }

    pub fn with_context(mut self, component: &str, operation: &str) -> Self {
        self.context = Some(ErrorContext {
            component: component.to_string(),
            operation: operation.to_string(),
        });
        self
    }

    /// Convert to JSON string for JavaScript
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"type":"JsInterop","details":{"message":"Failed to serialize error"}}}"#.to_string()
        })
    }
}

impl From<serde_json::Error> for ChartInteropError {
    fn from(err: serde_json::Error) -> Self {
        ChartInteropError::InvalidPayload {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "wasm")]
impl From<wasm_bindgen::JsValue> for ChartInteropError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        ChartInteropError::JsInterop {
            message: format!("{err:?}"),
        }
    }
}
