//! Client-side navigation controller.
//!
//! ```text
//! startup location ──┐
//! marked link click ─┼─▶ navigate ─▶ resolve (RouteTable) ─▶ produce ─▶ mount.set_inner_html
//! history pop ───────┘
//! ```
//!
//! Rendering is synchronous and never nests: a render requested while
//! another one is running is rejected. A failing producer leaves the mount
//! point as it was and the router back in `Idle`.

mod observer;
mod state;


use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crate::config::RouterConfig;
use crate::dom::NodeId;
use crate::error::{AppError, AppResult};
use crate::event::{EventKind, ListenTarget, NavTrigger, NavigationEvent};
use crate::host::location::debug_requested;
use crate::host::{Host, listener};
use crate::page::RouteTable;

pub use observer::{NavObserver, NoopObserver, TracingObserver};
pub use state::{CurrentPage, InitOutcome, Phase, RouterSnapshot};

use state::{InstalledListeners, RouterState};

pub struct Router {
    table: RouteTable,
    config: RouterConfig,
    observer: Box<dyn NavObserver>,
    state: RefCell<RouterState>,
}

/// Puts the router back in `Idle` however the render ends.
struct RenderGuard<'a> {
    state: &'a RefCell<RouterState>,
}

impl Drop for RenderGuard<'_> {
    fn drop(&mut self) {
        self.state.borrow_mut().phase = Phase::Idle;
    }
}

impl Router {
    pub fn new(table: RouteTable, config: RouterConfig) -> Self {
        Self {
            table,
            config,
            observer: Box::new(NoopObserver),
            state: RefCell::new(RouterState::default()),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn NavObserver>) -> Self {
        if self.is_debug() {
            observer.debug_changed(true);
        }
        self.observer = observer;
        self
    }

    pub fn with_debug(self, debug: bool) -> Self {
        self.set_debug(debug);
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    pub fn render_count(&self) -> u64 {
        self.state.borrow().render_count
    }

    pub fn current(&self) -> Option<CurrentPage> {
        self.state.borrow().current.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.borrow().installed.is_some()
    }

    pub fn is_debug(&self) -> bool {
        self.state.borrow().debug
    }

    /// Renders the page for `location` into the mount point.
    ///
    /// Unknown paths are not an error; they resolve through the unmatched
    /// policy. Errors come only from a missing mount point, a failing
    /// producer, or a render already in progress.
    pub fn render(&self, host: &mut dyn Host, location: &str) -> AppResult<()> {
        self.navigate(host, NavigationEvent::new(location, NavTrigger::Direct))
    }

    /// Renders the current location, then installs the delegated click
    /// listener and the pop-state listener. Later calls do nothing.
    pub fn initialize(self: &Rc<Self>, host: &mut dyn Host) -> AppResult<InitOutcome> {
        if self.is_initialized() {
            tracing::debug!("router already initialized; skipping listener install");
            return Ok(InitOutcome::AlreadyInitialized);
        }

        self.mount_point(host)?;
        let location = host.location();
        if debug_requested(&location) {
            self.set_debug(true);
        }
        tracing::info!(
            location = %location,
            routes = self.table.len(),
            mount = %self.config.mount_selector,
            "initializing router"
        );

        self.navigate(host, NavigationEvent::new(location, NavTrigger::Startup))?;

        let link_selector = self.config.link_selector();
        let router = Rc::clone(self);
        let click = host.add_event_listener(
            ListenTarget::Node(host.body()),
            EventKind::Click,
            listener(move |event, host| {
                if event.default_prevented() {
                    return Ok(());
                }
                let Some(target) = event.target else {
                    return Ok(());
                };
                let Some(anchor) = host.closest(target, &link_selector)? else {
                    return Ok(());
                };
                let Some(href) = host.attribute(anchor, "href") else {
                    return Ok(());
                };

                event.prevent_default();
                tracing::debug!(href = %href, "link clicked");
                host.push_state(&href);
                router.navigate(host, NavigationEvent::new(href, NavTrigger::LinkClick))
            }),
        );

        let router = Rc::clone(self);
        let pop_state = host.add_event_listener(
            ListenTarget::Window,
            EventKind::PopState,
            listener(move |_event, host| {
                let location = host.location();
                tracing::debug!(location = %location, "history traversal");
                router.navigate(host, NavigationEvent::new(location, NavTrigger::HistoryPop))
            }),
        );

        self.state.borrow_mut().installed = Some(InstalledListeners { click, pop_state });
        Ok(InitOutcome::Initialized)
    }

    /// Removes the listeners installed by `initialize`. The router may be
    /// initialized again afterwards.
    pub fn uninstall(&self, host: &mut dyn Host) -> bool {
        let Some(installed) = self.state.borrow_mut().installed.take() else {
            return false;
        };
        let click = host.remove_event_listener(installed.click);
        let pop_state = host.remove_event_listener(installed.pop_state);
        click && pop_state
    }

    pub fn snapshot(&self) -> RouterSnapshot {
        let state = self.state.borrow();
        RouterSnapshot {
            current: state.current.clone(),
            phase: state.phase,
            render_count: state.render_count,
            initialized: state.installed.is_some(),
            debug: state.debug,
            mount_selector: self.config.mount_selector.clone(),
            link_marker: self.config.link_marker.clone(),
            unmatched: self.table.unmatched_policy(),
            routes: self.table.paths().map(str::to_string).collect(),
        }
    }

    fn navigate(&self, host: &mut dyn Host, event: NavigationEvent) -> AppResult<()> {
        self.observer.navigation_requested(&event);
        let _guard = self.enter_rendering(&event.path)?;

        let result = self.render_resolved(host, &event);
        if let Err(err) = &result {
            self.observer.render_failed(&event, err);
        }
        result
    }

    fn render_resolved(&self, host: &mut dyn Host, event: &NavigationEvent) -> AppResult<()> {
        let mount = self.mount_point(host)?;
        let resolved = self.table.resolve(&event.path);
        self.observer.page_resolved(event, &resolved);

        let started = Instant::now();
        let markup = resolved
            .page
            .produce()
            .map_err(|source| AppError::page_render(resolved.path, resolved.page.name(), source))?;
        host.set_inner_html(mount, &markup)?;
        let elapsed = started.elapsed();

        {
            let mut state = self.state.borrow_mut();
            state.render_count += 1;
            state.current = Some(CurrentPage {
                location: event.path.clone(),
                path: resolved.path.to_string(),
                page: resolved.page.name(),
                resolution: resolved.resolution,
                trigger: event.trigger,
            });
        }
        self.observer.render_completed(event, &resolved, elapsed);
        Ok(())
    }

    fn set_debug(&self, debug: bool) {
        let changed = std::mem::replace(&mut self.state.borrow_mut().debug, debug) != debug;
        if changed {
            self.observer.debug_changed(debug);
        }
    }

    fn enter_rendering(&self, path: &str) -> AppResult<RenderGuard<'_>> {
        let mut state = self.state.borrow_mut();
        if state.phase == Phase::Rendering {
            return Err(AppError::RenderInProgress {
                path: path.to_string(),
            });
        }
        state.phase = Phase::Rendering;
        Ok(RenderGuard { state: &self.state })
    }

    fn mount_point(&self, host: &dyn Host) -> AppResult<NodeId> {
        host.query_selector(&self.config.mount_selector)?
            .ok_or_else(|| {
                AppError::config(format!(
                    "mount point `{}` not found in document",
                    self.config.mount_selector
                ))
            })
    }
}
