//! DOM lookups and the UI side of the load sequence.

use viewer::{LoadError, PointCloudInfo, ViewerUi, page_title, share_query};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlInputElement, Window, console};

/// The page elements the viewer mutates. Looked up once at startup; the
/// page contract is fixed, so a missing element is a startup failure.
#[derive(Clone)]
pub struct Ui {
    window: Window,
    document: Document,
    form_container: HtmlElement,
    input: HtmlInputElement,
    load_button: HtmlButtonElement,
    loading_indicator: HtmlElement,
}

impl Ui {
    pub fn from_document() -> Self {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        Self {
            form_container: element(&document, "url-form-container"),
            input: element(&document, "url-input"),
            load_button: element(&document, "load-btn"),
            loading_indicator: element(&document, "loading-indicator"),
            window,
            document,
        }
    }

    pub fn input_value(&self) -> String {
        self.input.value()
    }

    pub fn set_input_value(&self, value: &str) {
        self.input.set_value(value);
    }
}

fn element<T: JsCast>(document: &Document, id: &str) -> T {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .unwrap_or_else(|| panic!("missing element #{id}"))
}

fn set_display(element: &HtmlElement, display: &str) {
    let _ = element.style().set_property("display", display);
}

impl ViewerUi for Ui {
    fn set_busy(&self, busy: bool) {
        set_display(&self.loading_indicator, if busy { "block" } else { "none" });
        self.load_button.set_disabled(busy);
    }

    fn point_cloud_loaded(&self, url: &str, info: &PointCloudInfo) {
        console::log_1(&format!("Point cloud loaded: {}", info.name).into());
        console::log_1(&format!("  - Points: {}", info.point_count).into());

        // Shareable deep link, rewritten without a reload.
        if let Ok(history) = self.window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&share_query(url)));
        }
        self.document.set_title(&page_title(url));
        set_display(&self.form_container, "none");
    }

    fn load_failed(&self, error: &LoadError) {
        console::error_1(&format!("Failed to load point cloud: {error}").into());
        let _ = self.window.alert_with_message(&error.alert_text());
    }
}
