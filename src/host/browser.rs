use serde_json::json;

use crate::dom::{Document, NodeId};
use crate::error::{AppError, AppResult};
use crate::event::{DomEvent, EventKind, ListenTarget};

use super::session::SessionHistory;
use super::{Host, Listener, ListenerId};

struct Registered {
    id: ListenerId,
    target: ListenTarget,
    kind: EventKind,
    listener: Listener,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome {
    pub default_prevented: bool,
    /// Location loaded by the anchor's default action, if it ran.
    pub full_load: Option<String>,
}

/// A single-tab, in-memory browser: one document, one session history and
/// the listeners registered against them.
///
/// Dispatch is synchronous. Listeners are cloned out of the registry before
/// they run, so a listener may freely mutate the browser it is handed.
pub struct HeadlessBrowser {
    shell_markup: String,
    document: Document,
    history: SessionHistory,
    listeners: Vec<Registered>,
    next_listener_id: u64,
    full_loads: usize,
}

impl HeadlessBrowser {
    /// Opens `location` with a document built from `shell_markup`.
    pub fn open(location: impl Into<String>, shell_markup: impl Into<String>) -> Self {
        let shell_markup = shell_markup.into();
        Self {
            document: Document::from_markup(&shell_markup),
            shell_markup,
            history: SessionHistory::new(location),
            listeners: Vec::new(),
            next_listener_id: 1,
            full_loads: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Number of navigations that replaced the whole document.
    pub fn full_loads(&self) -> usize {
        self.full_loads
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|l| l.kind == kind).count()
    }

    /// Navigates the tab to `location` the way typing a URL would: a new
    /// history entry, a fresh document, and no listeners.
    pub fn load(&mut self, location: &str) {
        tracing::debug!(location, "full page load");
        self.history.push(location, json!({}));
        self.document = Document::from_markup(&self.shell_markup);
        self.listeners.clear();
        self.full_loads += 1;
    }

    /// Dispatches a click on `target`, bubbling up to the body and then the
    /// window. Runs the anchor default action unless a listener prevented it.
    pub fn click(&mut self, target: NodeId) -> AppResult<ClickOutcome> {
        if !self.document.is_attached(target) {
            return Err(AppError::invalid_argument(format!(
                "node {} is not attached to the document",
                target.index()
            )));
        }

        let path: Vec<NodeId> = self.document.ancestors(target).collect();
        let default_href = self
            .document
            .closest(target, "a[href]")?
            .and_then(|anchor| self.document.attribute(anchor, "href"))
            .map(str::to_string);

        let mut event = DomEvent::click(target);
        let targets = path
            .into_iter()
            .map(ListenTarget::Node)
            .chain(std::iter::once(ListenTarget::Window));
        for listen_target in targets {
            for listener in self.listeners_for(listen_target, EventKind::Click) {
                listener(&mut event, &mut *self)?;
            }
        }

        let default_prevented = event.default_prevented();
        let full_load = match default_href {
            Some(href) if !default_prevented => {
                self.load(&href);
                Some(href)
            }
            _ => None,
        };
        Ok(ClickOutcome {
            default_prevented,
            full_load,
        })
    }

    /// Clicks the first attached link whose `href` or text equals `query`.
    pub fn click_link(&mut self, query: &str) -> AppResult<ClickOutcome> {
        let Some(link) = self.find_link(query)? else {
            return Err(AppError::invalid_argument(format!("no link matches `{query}`")));
        };
        self.click(link)
    }

    pub fn find_link(&self, query: &str) -> AppResult<Option<NodeId>> {
        let links = self.document.query_selector_all("a[href]")?;
        let by_href = links
            .iter()
            .copied()
            .find(|id| self.document.attribute(*id, "href") == Some(query));
        Ok(by_href.or_else(|| {
            links.into_iter().find(|id| {
                self.document
                    .text_content(*id)
                    .trim()
                    .eq_ignore_ascii_case(query.trim())
            })
        }))
    }

    pub fn back(&mut self) -> AppResult<bool> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> AppResult<bool> {
        self.go(1)
    }

    /// Moves through session history and fires `popstate` once the location
    /// has changed. Out-of-range moves do nothing.
    pub fn go(&mut self, delta: isize) -> AppResult<bool> {
        if !self.history.go(delta) {
            return Ok(false);
        }
        tracing::trace!(location = self.history.location(), delta, "history traversal");

        let mut event = DomEvent::pop_state();
        for listener in self.listeners_for(ListenTarget::Window, EventKind::PopState) {
            listener(&mut event, &mut *self)?;
        }
        Ok(true)
    }

    fn listeners_for(&self, target: ListenTarget, kind: EventKind) -> Vec<Listener> {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .map(|l| l.listener.clone())
            .collect()
    }
}

impl Host for HeadlessBrowser {
    fn location(&self) -> String {
        self.history.location().to_string()
    }

    fn push_state(&mut self, location: &str) {
        self.history.push(location, json!({}));
    }

    fn history_len(&self) -> usize {
        self.history.len()
    }

    fn body(&self) -> NodeId {
        self.document.body()
    }

    fn query_selector(&self, selector: &str) -> AppResult<Option<NodeId>> {
        self.document.query_selector(selector)
    }

    fn closest(&self, node: NodeId, selector: &str) -> AppResult<Option<NodeId>> {
        self.document.closest(node, selector)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.document.attribute(node, name).map(str::to_string)
    }

    fn set_inner_html(&mut self, node: NodeId, markup: &str) -> AppResult<()> {
        self.document.set_inner_html(node, markup)
    }

    fn inner_html(&self, node: NodeId) -> AppResult<String> {
        self.document.inner_html(node)
    }

    fn add_event_listener(
        &mut self,
        target: ListenTarget,
        kind: EventKind,
        listener: Listener,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push(Registered {
            id,
            target,
            kind,
            listener,
        });
        id
    }

    fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::HeadlessBrowser;
    use crate::event::{EventKind, ListenTarget};
    use crate::host::{Host, listener};

    const SHELL: &str = r#"<div id="app"><p><a href="/about" data-link><b>About</b></a> <a href="/docs">Docs</a></p></div>"#;

    #[test]
    fn click_bubbles_from_target_to_body_then_window() {
        let mut browser = HeadlessBrowser::open("/", SHELL);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let body = browser.body();
        let app = browser.query_selector("#app").unwrap().expect("app");

        for (name, target) in [
            ("window", ListenTarget::Window),
            ("body", ListenTarget::Node(body)),
            ("app", ListenTarget::Node(app)),
        ] {
            let seen = seen.clone();
            browser.add_event_listener(
                target,
                EventKind::Click,
                listener(move |event, _host| {
                    seen.borrow_mut().push(name);
                    event.prevent_default();
                    Ok(())
                }),
            );
        }

        let bold = browser.query_selector("b").unwrap().expect("bold");
        let outcome = browser.click(bold).expect("click dispatches");
        assert_eq!(*seen.borrow(), vec!["app", "body", "window"]);
        assert!(outcome.default_prevented);
        assert_eq!(outcome.full_load, None);
        assert_eq!(browser.history_len(), 1);
    }

    #[test]
    fn unprevented_anchor_click_performs_full_load() {
        let mut browser = HeadlessBrowser::open("/", SHELL);
        browser.add_event_listener(
            ListenTarget::Window,
            EventKind::PopState,
            listener(|_, _| Ok(())),
        );

        let outcome = browser.click_link("Docs").expect("click");
        assert!(!outcome.default_prevented);
        assert_eq!(outcome.full_load.as_deref(), Some("/docs"));
        assert_eq!(browser.location(), "/docs");
        assert_eq!(browser.full_loads(), 1);
        assert_eq!(browser.listener_count(EventKind::PopState), 0);
    }

    #[test]
    fn traversal_fires_popstate_after_location_changes() {
        let mut browser = HeadlessBrowser::open("/", SHELL);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        browser.add_event_listener(
            ListenTarget::Window,
            EventKind::PopState,
            listener(move |_, host| {
                sink.borrow_mut().push(host.location());
                Ok(())
            }),
        );

        browser.push_state("/about");
        assert!(browser.back().unwrap());
        assert!(!browser.back().unwrap());
        assert!(browser.forward().unwrap());
        assert_eq!(*seen.borrow(), vec!["/".to_string(), "/about".to_string()]);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let mut browser = HeadlessBrowser::open("/", SHELL);
        let calls = Rc::new(RefCell::new(0));
        let sink = calls.clone();
        let id = browser.add_event_listener(
            ListenTarget::Window,
            EventKind::PopState,
            listener(move |_, _| {
                *sink.borrow_mut() += 1;
                Ok(())
            }),
        );
        assert!(browser.remove_event_listener(id));
        assert!(!browser.remove_event_listener(id));

        browser.push_state("/about");
        browser.back().unwrap();
        assert_eq!(*calls.borrow(), 0);
    }
}
