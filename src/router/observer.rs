use std::cell::Cell;
use std::time::Duration;

use crate::error::AppError;
use crate::event::NavigationEvent;
use crate::page::Resolved;

/// Hooks the router calls around each render.
///
/// Every hook defaults to doing nothing; the router behaves the same with
/// any observer attached.
pub trait NavObserver {
    fn navigation_requested(&self, event: &NavigationEvent) {
        let _ = event;
    }

    fn page_resolved(&self, event: &NavigationEvent, resolved: &Resolved<'_>) {
        let _ = (event, resolved);
    }

    fn render_completed(&self, event: &NavigationEvent, resolved: &Resolved<'_>, elapsed: Duration) {
        let _ = (event, resolved, elapsed);
    }

    fn render_failed(&self, event: &NavigationEvent, error: &AppError) {
        let _ = (event, error);
    }

    /// The router switched debug mode, from config or a `?debug=true`
    /// startup location.
    fn debug_changed(&self, enabled: bool) {
        let _ = enabled;
    }
}

pub struct NoopObserver;

impl NavObserver for NoopObserver {}

/// Emits each navigation as structured `tracing` events.
///
/// Events go out at `DEBUG` when built verbose or while the router is in
/// debug mode, otherwise at `TRACE`.
#[derive(Debug, Clone, Default)]
pub struct TracingObserver {
    verbose: bool,
    router_debug: Cell<bool>,
}

impl TracingObserver {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            router_debug: Cell::new(false),
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose || self.router_debug.get()
    }
}

impl NavObserver for TracingObserver {
    fn navigation_requested(&self, event: &NavigationEvent) {
        let trigger = event.trigger.as_str();
        if self.is_verbose() {
            tracing::debug!(path = %event.path, trigger, "navigating");
        } else {
            tracing::trace!(path = %event.path, trigger, "navigating");
        }
    }

    fn page_resolved(&self, event: &NavigationEvent, resolved: &Resolved<'_>) {
        let page = resolved.page.name();
        let fallback = resolved.is_fallback();
        if self.is_verbose() {
            tracing::debug!(path = %event.path, page, fallback, "rendering page");
        } else {
            tracing::trace!(path = %event.path, page, fallback, "rendering page");
        }
    }

    fn render_completed(&self, event: &NavigationEvent, resolved: &Resolved<'_>, elapsed: Duration) {
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        let page = resolved.page.name();
        if self.is_verbose() {
            tracing::debug!(path = %event.path, page, elapsed_ms, "page render");
        } else {
            tracing::trace!(path = %event.path, page, elapsed_ms, "page render");
        }
    }

    fn debug_changed(&self, enabled: bool) {
        self.router_debug.set(enabled);
    }

    fn render_failed(&self, event: &NavigationEvent, error: &AppError) {
        tracing::error!(path = %event.path, trigger = event.trigger.as_str(), %error, "render failed");
    }
}
