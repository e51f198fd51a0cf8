//! Chart.js through `js-sys` reflection. The library is loaded by a
//! `<script>` tag the page controls, so it may appear after the app starts.

use base64::Engine;
use wasm_bindgen::{JsCast, JsValue};

use crate::analytics::presenter::{ChartBackend, ChartInstance};
use crate::analytics::series::ChartSeries;
use crate::core::error::{ChartError, ExportError};

use super::chart_config;

#[derive(Debug, Clone, Copy, Default)]
pub struct ChartJsBackend;

pub struct ChartJsChart {
    instance: JsValue,
}

fn constructor() -> Option<js_sys::Function> {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("Chart"))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
}

fn method(target: &JsValue, name: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
}

impl ChartBackend for ChartJsBackend {
    type Chart = ChartJsChart;

    fn is_ready(&self) -> bool {
        constructor().is_some()
    }

    fn create(&self, target_id: &str, series: &ChartSeries) -> Result<ChartJsChart, ChartError> {
        let ctor = constructor().ok_or(ChartError::LibraryUnavailable)?;
        let canvas = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(target_id))
            .ok_or_else(|| ChartError::MissingTarget(target_id.to_string()))?;

        let config = js_sys::JSON::parse(&chart_config(series).to_string())
            .map_err(|err| ChartError::Construct(format!("{err:?}")))?;
        let args = js_sys::Array::of2(&canvas, &config);
        let instance = js_sys::Reflect::construct(&ctor, &args)
            .map_err(|err| ChartError::Construct(format!("{err:?}")))?;

        Ok(ChartJsChart { instance })
    }
}

impl ChartInstance for ChartJsChart {
    fn destroy(&mut self) {
        if let Some(destroy) = method(&self.instance, "destroy") {
            let _ = destroy.call0(&self.instance);
        }
        self.instance = JsValue::UNDEFINED;
    }

    fn png_snapshot(&self) -> Result<Vec<u8>, ExportError> {
        let to_image = method(&self.instance, "toBase64Image").ok_or(ExportError::NoChart)?;
        let data_url = to_image
            .call1(&self.instance, &JsValue::from_str("image/png"))
            .ok()
            .and_then(|value| value.as_string())
            .ok_or_else(|| ExportError::Snapshot("toBase64Image returned nothing".to_string()))?;
        let payload = data_url
            .split_once(',')
            .map(|(_, payload)| payload)
            .ok_or_else(|| ExportError::Snapshot("malformed data URL".to_string()))?;
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|err| ExportError::Snapshot(err.to_string()))
    }
}
