//! The point-cloud load sequence.
//!
//! Given a user- or link-supplied URL, produce a rendered point cloud and
//! consistent UI state, or surface a failure without leaving the UI stuck.
//! The routine is generic over the map, point-cloud control, layer
//! registry, and UI collaborators so it can be exercised with fakes; the
//! app crate binds the real browser objects.

use std::cell::RefCell;

use crate::error::LoadError;
use crate::session::ViewerSession;

/// Info record for a loaded point cloud, as reported by the control.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloudInfo {
    pub id: String,
    pub name: String,
    pub point_count: u64,
}

/// The basemap map, as the orchestration sees it.
#[allow(async_fn_in_trait)]
pub trait MapSurface {
    /// Whether the initial style load has completed.
    fn is_loaded(&self) -> bool;

    /// Suspend until the map's one-shot load event fires.
    async fn wait_for_load(&self) -> Result<(), LoadError>;

    /// Register the hidden satellite raster source and layer.
    fn add_satellite_layer(&self) -> Result<(), LoadError>;

    /// Attach the point-cloud control to the map.
    fn attach_control(&self) -> Result<(), LoadError>;
}

/// The external point-cloud control.
#[allow(async_fn_in_trait)]
pub trait PointCloudControl {
    /// Ids of the currently resident point clouds.
    fn resident_ids(&self) -> Vec<String>;

    fn unload(&self, id: &str) -> Result<(), LoadError>;

    /// Load the cloud at `url`; resolves once decoding finishes.
    async fn load(&self, url: &str) -> Result<PointCloudInfo, LoadError>;

    /// Animate the camera to the cloud's bounds.
    fn fly_to(&self, id: &str) -> Result<(), LoadError>;
}

/// The layer-visibility control's adapter registry.
pub trait LayerRegistry {
    /// Register the adapter exposing the point-cloud control as a
    /// toggleable layer.
    fn register_point_cloud_adapter(&self) -> Result<(), LoadError>;
}

/// UI and shareable-state sink mutated by the orchestration.
pub trait ViewerUi {
    /// Toggle the loading indicator and the load button together.
    fn set_busy(&self, busy: bool);

    /// Success path: rewrite the `url` query parameter, set the document
    /// title, hide the URL form.
    fn point_cloud_loaded(&self, url: &str, info: &PointCloudInfo);

    /// Failure path: surface the error; the URL form stays visible.
    fn load_failed(&self, error: &LoadError);
}

/// Access to the app's singletons. Handles are expected to be cheap to
/// produce (shared references to the underlying objects); `map` and
/// `point_cloud_control` are idempotent get-or-create factories.
pub trait ViewerHost {
    type Map: MapSurface;
    type Control: PointCloudControl;
    type Layers: LayerRegistry;
    type Ui: ViewerUi;

    fn map(&self) -> Self::Map;
    fn point_cloud_control(&self) -> Self::Control;
    fn layer_registry(&self) -> Self::Layers;
    fn ui(&self) -> Self::Ui;
}

/// Outcome of a load request.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(PointCloudInfo),
    Failed(LoadError),
    /// Another load already held the in-flight slot; this request was
    /// dropped without touching the UI.
    Rejected,
}

/// Run the full load sequence for `url`.
///
/// The busy UI state and the in-flight slot are released on every exit
/// path; failures are reported through the UI before returning.
pub async fn load_point_cloud<H: ViewerHost>(
    host: &H,
    session: &RefCell<ViewerSession>,
    url: &str,
) -> LoadOutcome {
    if !session.borrow_mut().try_begin_load() {
        return LoadOutcome::Rejected;
    }

    let ui = host.ui();
    ui.set_busy(true);

    let result = run_load(host, session, url).await;

    ui.set_busy(false);
    session.borrow_mut().finish_load();

    match result {
        Ok(info) => LoadOutcome::Loaded(info),
        Err(error) => {
            ui.load_failed(&error);
            LoadOutcome::Failed(error)
        }
    }
}

async fn run_load<H: ViewerHost>(
    host: &H,
    session: &RefCell<ViewerSession>,
    url: &str,
) -> Result<PointCloudInfo, LoadError> {
    let map = host.map();

    // First load only: wait for the map, then take the readiness edge and
    // register the hidden satellite layer on it.
    if !session.borrow().map_ready() {
        if !map.is_loaded() {
            map.wait_for_load().await?;
        }
        if session.borrow_mut().mark_map_ready() {
            map.add_satellite_layer()?;
        }
    }

    let control = host.point_cloud_control();
    if !session.borrow().control_attached() {
        map.attach_control()?;
        host.layer_registry().register_point_cloud_adapter()?;
        session.borrow_mut().mark_control_attached();
    }

    // At most one resident cloud: clear before loading.
    for id in control.resident_ids() {
        control.unload(&id)?;
    }

    let info = control.load(url).await?;
    control.fly_to(&info.id)?;

    host.ui().point_cloud_loaded(url, &info);

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url_state::page_title;
    use std::rc::Rc;

    #[derive(Default)]
    struct Shared {
        map_loaded: bool,
        waits: u32,
        satellite_added: u32,
        control_attached: u32,
        adapter_registered: u32,
        resident: Vec<String>,
        unloaded: Vec<String>,
        flown_to: Vec<String>,
        // When set, the next load fails with this (optional) message.
        fail_with: Option<Option<String>>,
        next_cloud: u32,
        busy_trace: Vec<bool>,
        loaded: Vec<(String, PointCloudInfo)>,
        surfaced: Vec<String>,
    }

    #[derive(Clone, Default)]
    struct Fake(Rc<RefCell<Shared>>);

    impl MapSurface for Fake {
        fn is_loaded(&self) -> bool {
            self.0.borrow().map_loaded
        }

        async fn wait_for_load(&self) -> Result<(), LoadError> {
            let mut shared = self.0.borrow_mut();
            shared.waits += 1;
            shared.map_loaded = true;
            Ok(())
        }

        fn add_satellite_layer(&self) -> Result<(), LoadError> {
            self.0.borrow_mut().satellite_added += 1;
            Ok(())
        }

        fn attach_control(&self) -> Result<(), LoadError> {
            self.0.borrow_mut().control_attached += 1;
            Ok(())
        }
    }

    impl PointCloudControl for Fake {
        fn resident_ids(&self) -> Vec<String> {
            self.0.borrow().resident.clone()
        }

        fn unload(&self, id: &str) -> Result<(), LoadError> {
            let mut shared = self.0.borrow_mut();
            shared.resident.retain(|r| r != id);
            shared.unloaded.push(id.to_string());
            Ok(())
        }

        async fn load(&self, url: &str) -> Result<PointCloudInfo, LoadError> {
            let mut shared = self.0.borrow_mut();
            if let Some(message) = shared.fail_with.take() {
                return Err(LoadError::from_message(message));
            }
            shared.next_cloud += 1;
            let id = format!("cloud-{}", shared.next_cloud);
            shared.resident.push(id.clone());
            Ok(PointCloudInfo {
                id,
                name: url.rsplit('/').next().unwrap_or(url).to_string(),
                point_count: 1_000,
            })
        }

        fn fly_to(&self, id: &str) -> Result<(), LoadError> {
            self.0.borrow_mut().flown_to.push(id.to_string());
            Ok(())
        }
    }

    impl LayerRegistry for Fake {
        fn register_point_cloud_adapter(&self) -> Result<(), LoadError> {
            self.0.borrow_mut().adapter_registered += 1;
            Ok(())
        }
    }

    impl ViewerUi for Fake {
        fn set_busy(&self, busy: bool) {
            self.0.borrow_mut().busy_trace.push(busy);
        }

        fn point_cloud_loaded(&self, url: &str, info: &PointCloudInfo) {
            self.0
                .borrow_mut()
                .loaded
                .push((url.to_string(), info.clone()));
        }

        fn load_failed(&self, error: &LoadError) {
            self.0.borrow_mut().surfaced.push(error.alert_text());
        }
    }

    impl ViewerHost for Fake {
        type Map = Fake;
        type Control = Fake;
        type Layers = Fake;
        type Ui = Fake;

        fn map(&self) -> Fake {
            self.clone()
        }

        fn point_cloud_control(&self) -> Fake {
            self.clone()
        }

        fn layer_registry(&self) -> Fake {
            self.clone()
        }

        fn ui(&self) -> Fake {
            self.clone()
        }
    }

    fn load(fake: &Fake, session: &RefCell<ViewerSession>, url: &str) -> LoadOutcome {
        pollster::block_on(load_point_cloud(fake, session, url))
    }

    #[test]
    fn first_load_waits_and_adds_satellite_once() {
        let fake = Fake::default();
        let session = RefCell::new(ViewerSession::new());

        load(&fake, &session, "https://example.com/a.laz");
        load(&fake, &session, "https://example.com/b.laz");

        let shared = fake.0.borrow();
        assert_eq!(shared.waits, 1);
        assert_eq!(shared.satellite_added, 1);
    }

    #[test]
    fn control_attached_and_adapter_registered_once() {
        let fake = Fake::default();
        let session = RefCell::new(ViewerSession::new());

        load(&fake, &session, "https://example.com/a.laz");
        load(&fake, &session, "https://example.com/b.laz");

        let shared = fake.0.borrow();
        assert_eq!(shared.control_attached, 1);
        assert_eq!(shared.adapter_registered, 1);
    }

    #[test]
    fn at_most_one_cloud_resident_after_each_load() {
        let fake = Fake::default();
        let session = RefCell::new(ViewerSession::new());

        load(&fake, &session, "https://example.com/a.laz");
        load(&fake, &session, "https://example.com/b.laz");
        load(&fake, &session, "https://example.com/c.laz");

        let shared = fake.0.borrow();
        assert_eq!(shared.resident.len(), 1);
        assert_eq!(shared.unloaded, vec!["cloud-1", "cloud-2"]);
    }

    #[test]
    fn busy_state_toggles_around_success_and_failure() {
        let fake = Fake::default();
        let session = RefCell::new(ViewerSession::new());

        load(&fake, &session, "https://example.com/a.laz");
        assert_eq!(fake.0.borrow().busy_trace, vec![true, false]);

        fake.0.borrow_mut().fail_with = Some(Some("bad file".to_string()));
        load(&fake, &session, "https://example.com/b.laz");
        assert_eq!(fake.0.borrow().busy_trace, vec![true, false, true, false]);
    }

    #[test]
    fn success_records_share_state_and_flies_to_cloud() {
        let fake = Fake::default();
        let session = RefCell::new(ViewerSession::new());

        let url = "https://example.com/pc/autzen.copc.laz";
        let outcome = load(&fake, &session, url);

        let LoadOutcome::Loaded(info) = outcome else {
            panic!("expected success, got {outcome:?}");
        };
        let shared = fake.0.borrow();
        assert_eq!(shared.loaded.len(), 1);
        assert_eq!(shared.loaded[0].0, url);
        assert_eq!(shared.flown_to, vec![info.id.clone()]);
        assert_eq!(page_title(url), "autzen.copc.laz - LiDAR Viewer");
    }

    #[test]
    fn failure_surfaces_message_and_releases_the_slot() {
        let fake = Fake::default();
        let session = RefCell::new(ViewerSession::new());

        fake.0.borrow_mut().fail_with = Some(Some("unreachable host".to_string()));
        let outcome = load(&fake, &session, "https://example.com/a.laz");

        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        {
            let shared = fake.0.borrow();
            assert_eq!(shared.surfaced.len(), 1);
            assert!(shared.surfaced[0].contains("unreachable host"));
            assert!(shared.loaded.is_empty());
        }
        assert!(!session.borrow().load_in_flight());

        // A retry after the failure goes through.
        let outcome = load(&fake, &session, "https://example.com/a.laz");
        assert!(matches!(outcome, LoadOutcome::Loaded(_)));
    }

    #[test]
    fn failure_without_message_uses_generic_label() {
        let fake = Fake::default();
        let session = RefCell::new(ViewerSession::new());

        fake.0.borrow_mut().fail_with = Some(None);
        load(&fake, &session, "https://example.com/a.laz");

        let shared = fake.0.borrow();
        assert_eq!(
            shared.surfaced,
            vec!["Failed to load point cloud: Unknown error".to_string()]
        );
    }

    #[test]
    fn overlapping_request_is_rejected_without_ui_side_effects() {
        let fake = Fake::default();
        let session = RefCell::new(ViewerSession::new());

        assert!(session.borrow_mut().try_begin_load());
        let outcome = load(&fake, &session, "https://example.com/a.laz");

        assert_eq!(outcome, LoadOutcome::Rejected);
        let shared = fake.0.borrow();
        assert!(shared.busy_trace.is_empty());
        assert!(shared.surfaced.is_empty());
    }
}
