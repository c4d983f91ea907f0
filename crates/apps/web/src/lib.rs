//! Browser entry point: wires the URL form, the sample-URL buttons, and
//! the startup deep link to the point-cloud load sequence.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::console;

use viewer::{LoadOutcome, ViewerHost, url_from_query};

mod app;
mod controls;
mod maplibre;
mod ui;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    wire_url_form()?;
    wire_sample_buttons()?;

    // Deep link: a `url` query parameter triggers an automatic load.
    if let Some(url) = startup_url() {
        app::app().ui().set_input_value(&url);
        spawn_load(url);
    }

    Ok(())
}

/// Load a point cloud from JS; same path as the form submit.
#[wasm_bindgen]
pub fn load_url(url: String) {
    let url = url.trim().to_string();
    if !url.is_empty() {
        spawn_load(url);
    }
}

/// Fire-and-forget load. The session's in-flight slot rejects overlapping
/// requests from any trigger.
fn spawn_load(url: String) {
    spawn_local(async move {
        let app = app::app();
        let outcome = viewer::load_point_cloud(&app, app.session(), &url).await;
        if matches!(outcome, LoadOutcome::Rejected) {
            console::warn_1(&"A point-cloud load is already in progress".into());
        }
    });
}

fn startup_url() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    url_from_query(&search)
}

fn wire_url_form() -> Result<(), JsValue> {
    let form = document()
        .get_element_by_id("url-form")
        .ok_or_else(|| JsValue::from_str("missing element #url-form"))?;

    let on_submit = Closure::wrap(Box::new(move |event: web_sys::Event| {
        event.prevent_default();
        let url = app::app().ui().input_value().trim().to_string();
        if !url.is_empty() {
            spawn_load(url);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    Ok(())
}

fn wire_sample_buttons() -> Result<(), JsValue> {
    let buttons = document().query_selector_all(".sample-urls button[data-url]")?;
    for index in 0..buttons.length() {
        let Some(node) = buttons.item(index) else {
            continue;
        };
        let Ok(button) = node.dyn_into::<web_sys::Element>() else {
            continue;
        };

        let target = button.clone();
        let on_click = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let Some(url) = target.get_attribute("data-url") else {
                return;
            };
            if url.is_empty() {
                return;
            }
            app::app().ui().set_input_value(&url);
            spawn_load(url);
        }) as Box<dyn FnMut(web_sys::Event)>);
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    Ok(())
}

fn document() -> web_sys::Document {
    web_sys::window()
        .expect("no window")
        .document()
        .expect("no document")
}
