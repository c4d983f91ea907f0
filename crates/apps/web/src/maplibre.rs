//! Bindings to the external map stack: the map library, the point-cloud
//! control, and the layer-visibility control. Everything here is a thin
//! typed surface over the JS packages; COPC decoding, LOD streaming, and
//! rendering all live on the other side.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "maplibre-gl")]
extern "C" {
    /// The 3D basemap.
    #[wasm_bindgen(extends = js_sys::Object)]
    #[derive(Clone)]
    pub type Map;

    #[wasm_bindgen(constructor)]
    pub fn new(options: &JsValue) -> Map;

    /// Whether the initial style load has completed.
    #[wasm_bindgen(method)]
    pub fn loaded(this: &Map) -> bool;

    /// One-shot event subscription; "load" fires once per map.
    #[wasm_bindgen(method)]
    pub fn once(this: &Map, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, js_name = addControl)]
    pub fn add_control(this: &Map, control: &JsValue, position: &str);

    /// Fallible variant used inside the load sequence.
    #[wasm_bindgen(method, js_name = addControl, catch)]
    pub fn try_add_control(this: &Map, control: &JsValue, position: &str)
    -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = addSource, catch)]
    pub fn add_source(this: &Map, id: &str, source: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = addLayer, catch)]
    pub fn add_layer(this: &Map, layer: &JsValue) -> Result<(), JsValue>;
}

#[wasm_bindgen(module = "maplibre-gl")]
extern "C" {
    pub type NavigationControl;

    #[wasm_bindgen(constructor)]
    pub fn new() -> NavigationControl;
}

#[wasm_bindgen(module = "maplibre-gl")]
extern "C" {
    pub type FullscreenControl;

    #[wasm_bindgen(constructor)]
    pub fn new() -> FullscreenControl;
}

#[wasm_bindgen(module = "maplibre-gl")]
extern "C" {
    pub type GlobeControl;

    #[wasm_bindgen(constructor)]
    pub fn new() -> GlobeControl;
}

#[wasm_bindgen(module = "maplibre-gl")]
extern "C" {
    pub type ScaleControl;

    #[wasm_bindgen(constructor)]
    pub fn new() -> ScaleControl;
}

#[wasm_bindgen(module = "maplibre-gl-lidar")]
extern "C" {
    /// The point-cloud control: owns the loaded clouds and their render
    /// path, exposed here only through its load/unload/fly-to surface.
    #[wasm_bindgen(extends = js_sys::Object)]
    #[derive(Clone)]
    pub type LidarControl;

    #[wasm_bindgen(constructor)]
    pub fn new(options: &JsValue) -> LidarControl;

    #[wasm_bindgen(method, js_name = loadPointCloud, catch)]
    pub fn load_point_cloud(this: &LidarControl, url: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, js_name = unloadPointCloud, catch)]
    pub fn unload_point_cloud(this: &LidarControl, id: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = getPointClouds)]
    pub fn get_point_clouds(this: &LidarControl) -> js_sys::Array;

    #[wasm_bindgen(method, js_name = flyToPointCloud, catch)]
    pub fn fly_to_point_cloud(this: &LidarControl, id: &str) -> Result<(), JsValue>;
}

#[wasm_bindgen(module = "maplibre-gl-lidar")]
extern "C" {
    /// Adapter exposing the point-cloud control as a toggleable layer.
    pub type LidarLayerAdapter;

    #[wasm_bindgen(constructor)]
    pub fn new(control: &LidarControl) -> LidarLayerAdapter;
}

#[wasm_bindgen]
extern "C" {
    /// Entry record resolved by `loadPointCloud` and listed by
    /// `getPointClouds`.
    pub type PointCloudEntry;

    #[wasm_bindgen(method, getter)]
    pub fn id(this: &PointCloudEntry) -> String;

    #[wasm_bindgen(method, getter)]
    pub fn name(this: &PointCloudEntry) -> String;

    #[wasm_bindgen(method, getter, js_name = pointCount)]
    pub fn point_count(this: &PointCloudEntry) -> f64;
}

#[wasm_bindgen(module = "maplibre-gl-layer-control")]
extern "C" {
    /// Layer-visibility control for basemap and custom layers.
    #[wasm_bindgen(extends = js_sys::Object)]
    #[derive(Clone)]
    pub type LayerControl;

    #[wasm_bindgen(constructor)]
    pub fn new(options: &JsValue) -> LayerControl;

    #[wasm_bindgen(method, js_name = registerCustomAdapter, catch)]
    pub fn register_custom_adapter(this: &LayerControl, adapter: &JsValue) -> Result<(), JsValue>;
}
