//! Chart.js backend
//!
//! Binds the page's global `Chart` constructor. Datasets and data blocks stay
//! as the caller's `JsValue`s; only the fixed display options are serialized.

use chart_interop_shared::{ChartConfiguration, ChartData, ChartInteropError, ChartResult};
use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use crate::backend::{ChartBackend, Releasable};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    pub type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(context: &CanvasRenderingContext2d, config: &JsValue) -> Result<ChartJs, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn destroy(this: &ChartJs) -> Result<(), JsValue>;
}

/// A chart constructed by Chart.js
pub struct ChartJsHandle {
    chart: ChartJs,
}

impl Releasable for ChartJsHandle {
    fn is_releasable(&self) -> bool {
        Reflect::get(&self.chart, &JsValue::from_str("destroy"))
            .map(|destroy| destroy.is_function())
            .unwrap_or(false)
    }

    fn release(&mut self) {
        if let Err(e) = self.chart.destroy() {
            log::warn!("Chart destroy threw: {}", describe_js_error(&e));
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ChartJsBackend;

impl ChartBackend for ChartJsBackend {
    type Surface = CanvasRenderingContext2d;
    type Payload = JsValue;
    type Handle = ChartJsHandle;

    fn chart_data(&self, data: ChartData<JsValue>) -> ChartResult<JsValue> {
        let block = Object::new();
        if let Some(labels) = &data.labels {
            set(&block, "labels", &to_js(labels)?)?;
        }
        set(&block, "datasets", &data.datasets)?;
        Ok(block.into())
    }

    fn create_chart(
        &self,
        surface: &CanvasRenderingContext2d,
        config: ChartConfiguration<JsValue>,
    ) -> ChartResult<ChartJsHandle> {
        let js_config = Object::new();
        set(&js_config, "type", &JsValue::from_str(config.kind.as_str()))?;
        set(&js_config, "data", &config.data)?;
        set(&js_config, "options", &to_js(&config.options)?)?;

        ChartJs::new(surface, &js_config)
            .map(|chart| ChartJsHandle { chart })
            .map_err(|e| ChartInteropError::LibraryRejection {
                message: describe_js_error(&e),
            })
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> ChartResult<()> {
    Reflect::set(target, &JsValue::from_str(key), value)?;
    Ok(())
}

/// Serialize to plain JS objects and arrays rather than `Map`s
fn to_js<T: Serialize + ?Sized>(value: &T) -> ChartResult<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| ChartInteropError::InvalidPayload {
            message: e.to_string(),
        })
}

pub(crate) fn describe_js_error(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}
