use serde::Serialize;

use crate::config::UnmatchedPolicy;
use crate::event::NavTrigger;
use crate::host::ListenerId;
use crate::page::Resolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    #[default]
    Idle,
    Rendering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Initialized,
    /// A previous call already rendered and installed the listeners.
    AlreadyInitialized,
}

/// What the mount point currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentPage {
    pub location: String,
    pub path: String,
    pub page: &'static str,
    pub resolution: Resolution,
    pub trigger: NavTrigger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InstalledListeners {
    pub click: ListenerId,
    pub pop_state: ListenerId,
}

#[derive(Debug, Default)]
pub(crate) struct RouterState {
    pub phase: Phase,
    pub installed: Option<InstalledListeners>,
    pub current: Option<CurrentPage>,
    pub render_count: u64,
    pub debug: bool,
}

/// Serializable view of the router for debug output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouterSnapshot {
    pub current: Option<CurrentPage>,
    pub phase: Phase,
    pub render_count: u64,
    pub initialized: bool,
    pub debug: bool,
    pub mount_selector: String,
    pub link_marker: String,
    pub unmatched: UnmatchedPolicy,
    pub routes: Vec<String>,
}

impl RouterSnapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|err| format!("{{\"error\":\"{err}\"}}"))
    }

    /// One-line summary for status bars.
    pub fn summary(&self) -> String {
        let current = match &self.current {
            Some(current) => format!(
                "{} -> {} ({})",
                current.location,
                current.page,
                current.trigger.as_str()
            ),
            None => "-".to_string(),
        };
        format!(
            "route={current} | renders={} | phase={:?} | routes={}",
            self.render_count,
            self.phase,
            self.routes.join(",")
        )
    }
}
