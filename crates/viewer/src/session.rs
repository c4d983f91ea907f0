/// Map lifecycle as observed by the load orchestration.
///
/// The single `Unbound` → `Ready` edge drives the one-time side effects
/// (the hidden satellite layer) and fires at most once per process.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MapReadiness {
    #[default]
    Unbound,
    Ready,
}

/// Per-process session state for the viewer.
///
/// Owned by the application and handed to the orchestration routine. All
/// flags here are monotonic except the in-flight load slot.
#[derive(Debug, Default)]
pub struct ViewerSession {
    readiness: MapReadiness,
    control_attached: bool,
    load_in_flight: bool,
}

impl ViewerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the readiness edge. Returns `true` on the first call only.
    pub fn mark_map_ready(&mut self) -> bool {
        match self.readiness {
            MapReadiness::Unbound => {
                self.readiness = MapReadiness::Ready;
                true
            }
            MapReadiness::Ready => false,
        }
    }

    pub fn map_ready(&self) -> bool {
        self.readiness == MapReadiness::Ready
    }

    /// Record point-cloud-control attachment. Returns `true` on the first
    /// call only.
    pub fn mark_control_attached(&mut self) -> bool {
        !std::mem::replace(&mut self.control_attached, true)
    }

    pub fn control_attached(&self) -> bool {
        self.control_attached
    }

    /// Claim the single in-flight load slot. Returns `false` while another
    /// load holds it; overlapping requests are rejected, not queued.
    pub fn try_begin_load(&mut self) -> bool {
        if self.load_in_flight {
            return false;
        }
        self.load_in_flight = true;
        true
    }

    /// Release the in-flight slot. Called unconditionally on every exit
    /// path of the load sequence.
    pub fn finish_load(&mut self) {
        self.load_in_flight = false;
    }

    pub fn load_in_flight(&self) -> bool {
        self.load_in_flight
    }
}
