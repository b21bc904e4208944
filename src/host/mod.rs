//! Boundary between the router and the page environment.
//!
//! The router never touches a concrete document or history; everything goes
//! through [`Host`], so tests and the terminal shell can supply their own.

mod browser;
pub mod location;
mod session;

use std::rc::Rc;

pub use browser::{ClickOutcome, HeadlessBrowser};
pub use session::{HistoryEntry, SessionHistory};

use crate::dom::NodeId;
use crate::error::AppResult;
use crate::event::{DomEvent, EventKind, ListenTarget};

/// Event handler. Receives the host so it can read the location, push
/// history, and write into the document.
pub type Listener = Rc<dyn Fn(&mut DomEvent, &mut dyn Host) -> AppResult<()>>;

/// Wraps a closure as a [`Listener`], pinning down its argument types.
pub fn listener<F>(handler: F) -> Listener
where
    F: Fn(&mut DomEvent, &mut dyn Host) -> AppResult<()> + 'static,
{
    Rc::new(handler)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

pub trait Host {
    /// Current location, including any query string and fragment.
    fn location(&self) -> String;

    /// Adds a history entry for `location` without loading anything.
    fn push_state(&mut self, location: &str);

    fn history_len(&self) -> usize;

    fn body(&self) -> NodeId;

    fn query_selector(&self, selector: &str) -> AppResult<Option<NodeId>>;

    fn closest(&self, node: NodeId, selector: &str) -> AppResult<Option<NodeId>>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Replaces all children of `node` with the parsed `markup`.
    fn set_inner_html(&mut self, node: NodeId, markup: &str) -> AppResult<()>;

    fn inner_html(&self, node: NodeId) -> AppResult<String>;

    fn add_event_listener(
        &mut self,
        target: ListenTarget,
        kind: EventKind,
        listener: Listener,
    ) -> ListenerId;

    fn remove_event_listener(&mut self, id: ListenerId) -> bool;
}
