#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod anatomy;
pub mod dashboard;
pub mod geom;
pub mod render;

use std::fmt;

use render::{MaterialParams, RenderBatch, VascularScene};
use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    // A second `initialize` keeps the logger that is already installed.
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("could not start the rayon thread pool: {err}")))
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchMaterialExport {
    name: &'static str,
    segment_count: usize,
    vertex_colors: bool,
    transparent: bool,
    #[serde(flatten)]
    params: MaterialParams,
}

/// The vascular viewer as seen from JavaScript.
///
/// Geometry is handed over as flat typed arrays per batch; everything else
/// as plain objects.
#[wasm_bindgen]
pub struct VesselViewer {
    scene: VascularScene,
}

#[wasm_bindgen]
impl VesselViewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> VesselViewer {
        VesselViewer {
            scene: VascularScene::default(),
        }
    }

    /// Build the vessel batches. Calling it while mounted does nothing.
    #[wasm_bindgen]
    pub fn mount(&mut self) -> Result<(), JsValue> {
        self.scene.mount().map_err(to_js_error)?;
        debug_log!("vessel viewer mounted: {}", self.diagnostics_text());
        Ok(())
    }

    #[wasm_bindgen]
    pub fn is_mounted(&self) -> bool {
        self.scene.is_mounted()
    }

    /// Idle sway angle in radians for `elapsed` seconds since mount.
    #[wasm_bindgen]
    pub fn frame(&self, elapsed: f64) -> f64 {
        self.scene.frame(elapsed)
    }

    /// Column-major model matrix of the vessel group at `elapsed` seconds.
    #[wasm_bindgen]
    pub fn group_matrix(&self, elapsed: f64) -> Vec<f64> {
        self.scene.group_transform(elapsed).to_column_major().to_vec()
    }

    /// Drop the batches; JS disposes the matching GPU buffers.
    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        self.scene.unmount();
    }

    #[wasm_bindgen]
    pub fn batch_count(&self) -> usize {
        self.scene.batches().map_or(0, render::VesselBatches::len)
    }

    #[wasm_bindgen]
    pub fn batch_name(&self, index: usize) -> Result<String, JsValue> {
        Ok(self.batch(index)?.name().to_string())
    }

    #[wasm_bindgen]
    pub fn batch_positions(&self, index: usize) -> Result<Vec<f32>, JsValue> {
        Ok(self.batch(index)?.mesh.positions_f32())
    }

    #[wasm_bindgen]
    pub fn batch_normals(&self, index: usize) -> Result<Vec<f32>, JsValue> {
        Ok(self.batch(index)?.mesh.normals_f32())
    }

    #[wasm_bindgen]
    pub fn batch_colors(&self, index: usize) -> Result<Vec<f32>, JsValue> {
        Ok(self.batch(index)?.mesh.colors_f32())
    }

    #[wasm_bindgen]
    pub fn batch_indices(&self, index: usize) -> Result<Vec<u32>, JsValue> {
        Ok(self.batch(index)?.mesh.indices.clone())
    }

    #[wasm_bindgen]
    pub fn batch_material(&self, index: usize) -> Result<JsValue, JsValue> {
        let batch = self.batch(index)?;
        let export = BatchMaterialExport {
            name: batch.name(),
            segment_count: batch.segment_count,
            vertex_colors: batch.mesh.colors.is_some(),
            transparent: batch.material.is_transparent(),
            params: batch.material,
        };
        serde_wasm_bindgen::to_value(&export).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Lights, camera, post-processing and sway settings.
    #[wasm_bindgen]
    pub fn scene(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.scene.description())
            .map_err(|err| JsError::new(&err.to_string()).into())
    }

    #[wasm_bindgen]
    pub fn legend(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&render::legend())
            .map_err(|err| JsError::new(&err.to_string()).into())
    }

    #[wasm_bindgen]
    pub fn diagnostics_summary(&self) -> String {
        self.diagnostics_text()
    }

    /// Placeholder bytes for the download button.
    #[wasm_bindgen]
    pub fn export_placeholder(&self) -> Vec<u8> {
        self.export_bytes()
    }

    #[wasm_bindgen]
    pub fn export_file_name(&self) -> String {
        render::EXPORT_FILE_NAME.to_string()
    }
}

impl Default for VesselViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl VesselViewer {
    /// The scene behind the viewer, for native callers.
    #[must_use]
    pub fn scene_state(&self) -> &VascularScene {
        &self.scene
    }

    #[must_use]
    pub fn diagnostics_text(&self) -> String {
        match self.scene.batches() {
            Some(batches) => batches.diagnostics().summary(),
            None => "not mounted".to_string(),
        }
    }

    #[must_use]
    pub fn export_bytes(&self) -> Vec<u8> {
        let batches = self.scene.batches();
        render::export_placeholder(batches.into_iter().flat_map(|b| b.iter().map(RenderBatch::name)))
    }

    fn batch(&self, index: usize) -> Result<&RenderBatch, JsValue> {
        let batches = self
            .scene
            .batches()
            .ok_or_else(|| js_error("viewer is not mounted"))?;
        batches.batches().get(index).ok_or_else(|| {
            js_error(&format!(
                "batch index {index} out of range ({} batches)",
                batches.len()
            ))
        })
    }
}

/// Patient list of the dashboard.
#[wasm_bindgen]
pub fn dashboard_patients() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(dashboard::patients())
        .map_err(|err| JsError::new(&err.to_string()).into())
}

/// Segmentation metrics of one patient; throws "patient not found" otherwise.
#[wasm_bindgen]
pub fn dashboard_metrics(patient_id: &str) -> Result<JsValue, JsValue> {
    let metrics = dashboard::metrics(patient_id).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(metrics).map_err(|err| JsError::new(&err.to_string()).into())
}

#[wasm_bindgen]
pub fn dashboard_processing_status() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&dashboard::processing_status())
        .map_err(|err| JsError::new(&err.to_string()).into())
}

#[wasm_bindgen]
pub fn dashboard_server_status() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&dashboard::server_status())
        .map_err(|err| JsError::new(&err.to_string()).into())
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_starts_unmounted() {
        let viewer = VesselViewer::new();
        assert!(!viewer.is_mounted());
        assert_eq!(viewer.batch_count(), 0);
        assert_eq!(viewer.frame(12.0), 0.0);
        assert!(viewer.batch_positions(0).is_err());
        assert_eq!(viewer.diagnostics_text(), "not mounted");
        assert_eq!(viewer.export_bytes(), render::export_placeholder([]));
        assert_eq!(viewer.export_file_name(), render::EXPORT_FILE_NAME);
    }

    #[test]
    fn test_group_matrix_is_identity_until_mounted() {
        let viewer = VesselViewer::new();
        let m = viewer.group_matrix(20.0);
        assert_eq!(m.len(), 16);
        assert_eq!(m, geom::Transform::identity().to_column_major().to_vec());
    }
}
