use std::rc::Rc;

use crate::config::Config;
use crate::dom::{NodeId, TextLine, layout_text};
use crate::error::{AppError, AppResult};
use crate::host::{ClickOutcome, HeadlessBrowser, Host};
use crate::router::{Router, RouterSnapshot, TracingObserver};
use crate::site;

/// The headless browser tab the shell drives, with the site running in it.
///
/// A full load replaces the document and drops every listener, so the tab
/// boots the site again afterwards the way a browser would re-run its scripts.
pub struct Tab {
    config: Config,
    browser: HeadlessBrowser,
    router: Rc<Router>,
    boots: usize,
}

impl Tab {
    pub fn open(config: &Config, start: &str) -> AppResult<Self> {
        if !start.starts_with('/') {
            return Err(AppError::invalid_argument(format!(
                "start location must begin with `/`: {start}"
            )));
        }

        let mut browser = HeadlessBrowser::open(start, site::shell_markup(config)?);
        let router = boot(&mut browser, config)?;
        Ok(Self {
            config: config.clone(),
            browser,
            router,
            boots: 1,
        })
    }

    pub fn browser(&self) -> &HeadlessBrowser {
        &self.browser
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// How many times the site has started, counting the first load.
    pub fn boots(&self) -> usize {
        self.boots
    }

    pub fn location(&self) -> String {
        self.browser.location()
    }

    pub fn history_len(&self) -> usize {
        self.browser.history_len()
    }

    pub fn snapshot(&self) -> RouterSnapshot {
        self.router.snapshot()
    }

    /// Every link in the document, in document order.
    pub fn links(&self) -> Vec<NodeId> {
        self.browser
            .document()
            .query_selector_all("a[href]")
            .unwrap_or_default()
    }

    pub fn link_href(&self, link: NodeId) -> Option<&str> {
        self.browser.document().attribute(link, "href")
    }

    pub fn page_lines(&self) -> Vec<TextLine> {
        let document = self.browser.document();
        layout_text(document, document.body())
    }

    pub fn mount_lines(&self) -> AppResult<Vec<TextLine>> {
        let mount = self.mount()?;
        Ok(layout_text(self.browser.document(), mount))
    }

    pub fn mount_html(&self) -> AppResult<String> {
        let mount = self.mount()?;
        self.browser.inner_html(mount)
    }

    pub fn click(&mut self, link: NodeId) -> AppResult<ClickOutcome> {
        let outcome = self.browser.click(link)?;
        if outcome.full_load.is_some() {
            self.reboot()?;
        }
        Ok(outcome)
    }

    pub fn click_link(&mut self, query: &str) -> AppResult<ClickOutcome> {
        let Some(link) = self.browser.find_link(query)? else {
            return Err(AppError::invalid_argument(format!("no link matches `{query}`")));
        };
        self.click(link)
    }

    pub fn back(&mut self) -> AppResult<bool> {
        self.browser.back()
    }

    pub fn forward(&mut self) -> AppResult<bool> {
        self.browser.forward()
    }

    /// Loads `location` from scratch, like entering it in the address bar.
    pub fn go(&mut self, location: &str) -> AppResult<()> {
        self.browser.load(location);
        self.reboot()
    }

    /// On failure the tab keeps a fresh, uninitialized router: the previous
    /// one's listeners went away with the replaced document.
    fn reboot(&mut self) -> AppResult<()> {
        tracing::debug!(location = %self.browser.location(), "document replaced; booting site");
        match boot(&mut self.browser, &self.config) {
            Ok(router) => {
                self.router = router;
                self.boots += 1;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, location = %self.browser.location(), "site failed to boot");
                self.router = Rc::new(Router::new(
                    self.router.table().clone(),
                    self.config.router.clone(),
                ));
                Err(err)
            }
        }
    }

    fn mount(&self) -> AppResult<NodeId> {
        let selector = &self.config.router.mount_selector;
        self.browser.query_selector(selector)?.ok_or_else(|| {
            AppError::config(format!("mount point `{selector}` not found in document"))
        })
    }
}

/// The router raises the observer to debug level itself when debug mode is
/// on, from config or the start location's query.
fn boot(browser: &mut HeadlessBrowser, config: &Config) -> AppResult<Rc<Router>> {
    site::bootstrap(browser, config, Box::new(TracingObserver::default()))
}

#[cfg(test)]
mod tests {
    use super::Tab;
    use crate::config::Config;
    use crate::event::EventKind;
    use crate::host::HeadlessBrowser;

    #[test]
    fn failed_reboot_leaves_no_stale_router() {
        let mut tab = Tab::open(&Config::default(), "/").expect("tab opens");
        assert!(tab.router().is_initialized());

        // A document without the header container cannot boot the site.
        tab.browser = HeadlessBrowser::open("/", r#"<main id="app"></main>"#);
        let err = tab.go("/about").expect_err("boot fails");
        assert!(err.is_config());

        assert!(!tab.router().is_initialized());
        let snapshot = tab.snapshot();
        assert!(snapshot.current.is_none());
        assert_eq!(snapshot.render_count, 0);
        assert_eq!(tab.boots(), 1);
        assert_eq!(tab.browser().listener_count(EventKind::Click), 0);
    }
}
