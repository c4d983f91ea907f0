//! Application state: the viewer session plus lazily constructed
//! singletons, held in one place instead of loose module globals.

use std::cell::RefCell;
use std::rc::Rc;

use viewer::{
    CONTROL_CORNER, LayerControlOptions, LidarControlOptions, MapOptions, SCALE_CORNER,
    ViewerHost, ViewerSession,
};
use wasm_bindgen::JsValue;

use crate::controls::{LayersHandle, LidarHandle, MapHandle};
use crate::maplibre::{
    FullscreenControl, GlobeControl, LayerControl, LidarControl, Map, NavigationControl,
    ScaleControl,
};
use crate::ui::Ui;

struct AppInner {
    session: RefCell<ViewerSession>,
    map: RefCell<Option<Map>>,
    layer_control: RefCell<Option<LayerControl>>,
    lidar: RefCell<Option<LidarControl>>,
    ui: Ui,
}

/// Cheap-clone handle to the process-wide application state.
#[derive(Clone)]
pub struct App {
    inner: Rc<AppInner>,
}

thread_local! {
    static APP: App = App::new();
}

pub fn app() -> App {
    APP.with(|app| app.clone())
}

impl App {
    fn new() -> Self {
        Self {
            inner: Rc::new(AppInner {
                session: RefCell::new(ViewerSession::new()),
                map: RefCell::new(None),
                layer_control: RefCell::new(None),
                lidar: RefCell::new(None),
                ui: Ui::from_document(),
            }),
        }
    }

    pub fn session(&self) -> &RefCell<ViewerSession> {
        &self.inner.session
    }

    /// Get-or-create the map. The first call constructs it with the fixed
    /// style and camera, attaches the standard affordances, and attaches
    /// the layer control; later calls return the existing instance.
    fn ensure_map(&self) -> Map {
        if let Some(map) = self.inner.map.borrow().as_ref() {
            return map.clone();
        }

        let map = Map::new(&to_js(&MapOptions::default()));
        map.add_control(NavigationControl::new().as_ref(), CONTROL_CORNER);
        map.add_control(FullscreenControl::new().as_ref(), CONTROL_CORNER);
        map.add_control(GlobeControl::new().as_ref(), CONTROL_CORNER);
        map.add_control(ScaleControl::new().as_ref(), SCALE_CORNER);

        let layer_control = LayerControl::new(&to_js(&LayerControlOptions::default()));
        map.add_control(layer_control.as_ref(), CONTROL_CORNER);

        *self.inner.layer_control.borrow_mut() = Some(layer_control);
        *self.inner.map.borrow_mut() = Some(map.clone());
        map
    }

    /// Get-or-create the point-cloud control.
    fn ensure_lidar(&self) -> LidarControl {
        if let Some(control) = self.inner.lidar.borrow().as_ref() {
            return control.clone();
        }

        let control = LidarControl::new(&to_js(&LidarControlOptions::default()));
        *self.inner.lidar.borrow_mut() = Some(control.clone());
        control
    }

    fn layer_control(&self) -> LayerControl {
        if let Some(control) = self.inner.layer_control.borrow().as_ref() {
            return control.clone();
        }

        // Constructed as part of map bootstrap.
        self.ensure_map();
        self.inner
            .layer_control
            .borrow()
            .clone()
            .expect("layer control constructed with the map")
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).expect("serializable options")
}

impl ViewerHost for App {
    type Map = MapHandle;
    type Control = LidarHandle;
    type Layers = LayersHandle;
    type Ui = Ui;

    fn map(&self) -> MapHandle {
        MapHandle::new(self.ensure_map(), self.ensure_lidar())
    }

    fn point_cloud_control(&self) -> LidarHandle {
        LidarHandle::new(self.ensure_lidar())
    }

    fn layer_registry(&self) -> LayersHandle {
        LayersHandle::new(self.layer_control(), self.ensure_lidar())
    }

    fn ui(&self) -> Ui {
        self.inner.ui.clone()
    }
}
