//! Concrete collaborators over the external map libraries.
//!
//! These are the browser-side implementations of the core crate's
//! orchestration traits; each handle wraps shared references to the JS
//! objects, so cloning one is cheap.

use viewer::{
    CONTROL_CORNER, LayerRegistry, LoadError, MapSurface, PointCloudControl, PointCloudInfo,
    RasterLayerSpec, RasterSourceSpec, SATELLITE_LAYER_ID,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::maplibre::{LayerControl, LidarControl, LidarLayerAdapter, Map, PointCloudEntry};

/// Map a JS rejection into the single load-failure kind, keeping an
/// `Error`'s message or a string rejection, else the generic label.
pub fn load_error_from_js(value: JsValue) -> LoadError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| value.as_string());
    LoadError::from_message(message)
}

fn options<T: serde::Serialize>(value: &T) -> Result<JsValue, LoadError> {
    serde_wasm_bindgen::to_value(value).map_err(|err| LoadError::new(err.to_string()))
}

#[derive(Clone)]
pub struct MapHandle {
    map: Map,
    lidar: LidarControl,
}

impl MapHandle {
    pub fn new(map: Map, lidar: LidarControl) -> Self {
        Self { map, lidar }
    }
}

impl MapSurface for MapHandle {
    fn is_loaded(&self) -> bool {
        self.map.loaded()
    }

    async fn wait_for_load(&self) -> Result<(), LoadError> {
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            self.map.once("load", &resolve);
        });
        JsFuture::from(promise).await.map_err(load_error_from_js)?;
        Ok(())
    }

    fn add_satellite_layer(&self) -> Result<(), LoadError> {
        let source = options(&RasterSourceSpec::default())?;
        self.map
            .add_source(SATELLITE_LAYER_ID, &source)
            .map_err(load_error_from_js)?;

        let layer = options(&RasterLayerSpec::default())?;
        self.map.add_layer(&layer).map_err(load_error_from_js)
    }

    fn attach_control(&self) -> Result<(), LoadError> {
        self.map
            .try_add_control(self.lidar.as_ref(), CONTROL_CORNER)
            .map_err(load_error_from_js)
    }
}

#[derive(Clone)]
pub struct LidarHandle {
    control: LidarControl,
}

impl LidarHandle {
    pub fn new(control: LidarControl) -> Self {
        Self { control }
    }
}

impl PointCloudControl for LidarHandle {
    fn resident_ids(&self) -> Vec<String> {
        self.control
            .get_point_clouds()
            .iter()
            .map(|entry| entry.unchecked_into::<PointCloudEntry>().id())
            .collect()
    }

    fn unload(&self, id: &str) -> Result<(), LoadError> {
        self.control
            .unload_point_cloud(id)
            .map_err(load_error_from_js)
    }

    async fn load(&self, url: &str) -> Result<PointCloudInfo, LoadError> {
        let promise = self
            .control
            .load_point_cloud(url)
            .map_err(load_error_from_js)?;
        let value = JsFuture::from(promise).await.map_err(load_error_from_js)?;

        let entry: PointCloudEntry = value.unchecked_into();
        Ok(PointCloudInfo {
            id: entry.id(),
            name: entry.name(),
            point_count: entry.point_count() as u64,
        })
    }

    fn fly_to(&self, id: &str) -> Result<(), LoadError> {
        self.control
            .fly_to_point_cloud(id)
            .map_err(load_error_from_js)
    }
}

#[derive(Clone)]
pub struct LayersHandle {
    layers: LayerControl,
    lidar: LidarControl,
}

impl LayersHandle {
    pub fn new(layers: LayerControl, lidar: LidarControl) -> Self {
        Self { layers, lidar }
    }
}

impl LayerRegistry for LayersHandle {
    fn register_point_cloud_adapter(&self) -> Result<(), LoadError> {
        let adapter = LidarLayerAdapter::new(&self.lidar);
        self.layers
            .register_custom_adapter(adapter.as_ref())
            .map_err(load_error_from_js)
    }
}
