use serde::Serialize;

use crate::dom::NodeId;

/// Describes *why* a render was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavTrigger {
    /// Initial render of the location the page was loaded with.
    Startup,
    /// Click on an anchor carrying the navigation marker.
    LinkClick,
    /// Browser back/forward traversal.
    HistoryPop,
    /// Direct `render` call from application code.
    Direct,
}

impl NavTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::LinkClick => "link-click",
            Self::HistoryPop => "history-pop",
            Self::Direct => "direct",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    PopState,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenTarget {
    Node(NodeId),
    Window,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: EventKind,
    /// Node the event was dispatched on. `None` for window-level events.
    pub target: Option<NodeId>,
    default_prevented: bool,
}

impl DomEvent {
    pub fn click(target: NodeId) -> Self {
        Self {
            kind: EventKind::Click,
            target: Some(target),
            default_prevented: false,
        }
    }

    pub fn pop_state() -> Self {
        Self {
            kind: EventKind::PopState,
            target: None,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A requested transition, consumed synchronously by the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    pub path: String,
    pub trigger: NavTrigger,
}

impl NavigationEvent {
    pub fn new(path: impl Into<String>, trigger: NavTrigger) -> Self {
        Self {
            path: path.into(),
            trigger,
        }
    }
}
