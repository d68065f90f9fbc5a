//! WASM bridge for Chart Interop
//! Exposes the chart renderer to the host page and wires it to Chart.js and the DOM

use chart_interop_shared::{ChartInteropError, ErrorResponse, RendererSettings};
use js_sys::Reflect;
use wasm_bindgen::prelude::*;

pub mod backend;
pub mod chart_js;
pub mod renderer;
pub mod slot_registry;
pub mod surface;

use chart_js::ChartJsBackend;
use renderer::ChartRenderer;
use surface::DomSurfaces;

/// Renderer handle owned by the host page.
/// Construct once and keep it for the page's lifetime; dropping it (`free()`)
/// destroys every chart it still owns.
#[wasm_bindgen(js_name = ChartRenderer)]
pub struct WebChartRenderer {
    inner: ChartRenderer<ChartJsBackend, DomSurfaces>,
}

impl Default for WebChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(js_class = ChartRenderer)]
impl WebChartRenderer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebChartRenderer {
        WebChartRenderer {
            inner: ChartRenderer::new(ChartJsBackend, DomSurfaces),
        }
    }

    /// Create a renderer from a JSON settings object.
    /// `logLevel` sets the module-wide log level; renderers created later keep it.
    #[wasm_bindgen(js_name = withSettings)]
    pub fn with_settings(settings_json: &str) -> Result<WebChartRenderer, JsValue> {
        let settings = RendererSettings::from_json(settings_json)
            .map_err(|e| to_js_error(e, "with_settings"))?;
        if let Ok(level) = settings.level() {
            log::set_max_level(level);
        }

        Ok(WebChartRenderer {
            inner: ChartRenderer::with_settings(ChartJsBackend, DomSurfaces, settings),
        })
    }

    #[wasm_bindgen(js_name = renderScatter)]
    pub fn render_scatter(&mut self, datasets: JsValue) -> Result<(), JsValue> {
        self.inner
            .render_scatter(datasets)
            .map(|_| ())
            .map_err(|e| to_js_error(e, "render_scatter"))
    }

    #[wasm_bindgen(js_name = renderLine)]
    pub fn render_line(&mut self, datasets: JsValue, labels: JsValue) -> Result<(), JsValue> {
        let labels: Vec<String> = serde_wasm_bindgen::from_value(labels).map_err(|e| {
            to_js_error(
                ChartInteropError::InvalidPayload {
                    message: format!("labels must be an array of strings: {e}"),
                },
                "render_line",
            )
        })?;

        self.inner
            .render_line(datasets, labels)
            .map(|_| ())
            .map_err(|e| to_js_error(e, "render_line"))
    }

    #[wasm_bindgen(js_name = renderBar)]
    pub fn render_bar(&mut self, surface_id: &str, chart_data: JsValue) -> Result<(), JsValue> {
        self.inner
            .render_bar(surface_id, chart_data)
            .map(|_| ())
            .map_err(|e| to_js_error(e, "render_bar"))
    }

    /// Destroy the chart drawn into a canvas, if any
    #[wasm_bindgen]
    pub fn release(&mut self, surface_id: &str) -> bool {
        self.inner.release(surface_id)
    }

    #[wasm_bindgen(js_name = releaseAll)]
    pub fn release_all(&mut self) -> usize {
        self.inner.release_all()
    }

    #[wasm_bindgen(js_name = activeCount)]
    pub fn active_count(&self) -> usize {
        self.inner.active_count()
    }

    #[wasm_bindgen(js_name = hasChart)]
    pub fn has_chart(&self, surface_id: &str) -> bool {
        self.inner.has_chart(surface_id)
    }
}

/// Build a JS `Error` with the serialized `ErrorResponse` attached as `cause`
fn to_js_error(error: ChartInteropError, operation: &str) -> JsValue {
    let js_error = js_sys::Error::new(&error.to_string());
    let response = ErrorResponse::new(error).with_context("ChartRenderer", operation);
    let _ = Reflect::set(
        &js_error,
        &JsValue::from_str("cause"),
        &JsValue::from_str(&response.to_json()),
    );
    js_error.into()
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
    }

    log::info!("Chart interop module initialized");
}
