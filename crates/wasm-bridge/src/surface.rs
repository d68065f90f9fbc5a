//! Canvas lookup in the page's document

use chart_interop_shared::{ChartInteropError, ChartResult};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::backend::SurfaceProvider;

/// Resolves canvas elements by id and hands out their 2d contexts
#[derive(Debug, Default, Clone, Copy)]
pub struct DomSurfaces;

impl SurfaceProvider for DomSurfaces {
    type Surface = CanvasRenderingContext2d;

    fn lookup(&self, surface_id: &str) -> ChartResult<Self::Surface> {
        let window = web_sys::window().ok_or_else(|| ChartInteropError::JsInterop {
            message: "No window object available".to_string(),
        })?;
        let document = window.document().ok_or_else(|| ChartInteropError::JsInterop {
            message: "No document object available".to_string(),
        })?;

        let element = document
            .get_element_by_id(surface_id)
            .ok_or_else(|| ChartInteropError::surface_not_found(surface_id))?;

        let canvas: HtmlCanvasElement =
            element
                .dyn_into()
                .map_err(|_| ChartInteropError::NotACanvas {
                    surface_id: surface_id.to_string(),
                })?;

        let unavailable = || ChartInteropError::ContextUnavailable {
            surface_id: surface_id.to_string(),
        };

        canvas
            .get_context("2d")?
            .ok_or_else(unavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| unavailable())
    }
}
