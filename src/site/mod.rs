//! The bundled starter site and its startup sequence.

pub mod components;
pub mod pages;

use std::rc::Rc;
use std::time::Instant;

use crate::config::Config;
use crate::dom::{Selector, is_void_element};
use crate::error::{AppError, AppResult};
use crate::host::Host;
use crate::page::{Page, RouteTable};
use crate::router::{NavObserver, Router};

pub const HEADER_SELECTOR: &str = "#header";
pub const FOOTER_SELECTOR: &str = "#footer";

const HEADER_ID: &str = "header";
const FOOTER_ID: &str = "footer";
const CONTAINER_TAG: &str = "div";
const MOUNT_TAG: &str = "main";

/// Document the site is served in. The mount element is built from the
/// configured `mount_selector`, so any selector the router accepts has a
/// target. Selectors that would also match the header or footer container
/// are rejected.
pub fn shell_markup(config: &Config) -> AppResult<String> {
    let raw = &config.router.mount_selector;
    let selector = Selector::parse(raw)
        .map_err(|err| AppError::config(format!("invalid mount selector `{raw}`: {err}")))?;

    for container in [HEADER_ID, FOOTER_ID] {
        if selector.matches(CONTAINER_TAG, &[("id".to_string(), container.to_string())]) {
            return Err(AppError::config(format!(
                "mount selector `{raw}` also matches the #{container} container"
            )));
        }
    }

    let (tag, attrs) = selector.element_for(MOUNT_TAG);
    if !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') || is_void_element(&tag) {
        return Err(AppError::config(format!(
            "mount selector `{raw}` names an element that cannot hold a page"
        )));
    }

    let mut mount = format!("<{tag}");
    for (key, value) in &attrs {
        mount.push_str(&format!(
            r#" {key}="{}""#,
            value.replace('&', "&amp;").replace('"', "&quot;")
        ));
    }
    mount.push_str(&format!("></{tag}>"));

    Ok(format!(
        r#"<{CONTAINER_TAG} id="{HEADER_ID}"></{CONTAINER_TAG}>
{mount}
<{CONTAINER_TAG} id="{FOOTER_ID}"></{CONTAINER_TAG}>"#
    ))
}

pub fn route_table(config: &Config) -> AppResult<RouteTable> {
    RouteTable::builder()
        .route("/", Page::new("index", pages::index))
        .route("/about", Page::new("about", pages::about))
        .route("/contact", Page::new("contact", pages::contact))
        .not_found(Page::new("not-found", pages::not_found))
        .unmatched(config.router.unmatched)
        .build()
}

/// Writes the header and footer, then builds and initializes the router for
/// the host's current location.
pub fn bootstrap(
    host: &mut dyn Host,
    config: &Config,
    observer: Box<dyn NavObserver>,
) -> AppResult<Rc<Router>> {
    let started = Instant::now();
    tracing::info!(location = %host.location(), "starting site");

    write_into(host, HEADER_SELECTOR, &components::header())?;
    write_into(host, FOOTER_SELECTOR, &components::footer())?;

    let router = Rc::new(
        Router::new(route_table(config)?, config.router.clone())
            .with_observer(observer)
            .with_debug(config.debug.enabled),
    );
    router.initialize(host)?;

    tracing::info!(
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        debug = router.is_debug(),
        "site initialized"
    );
    Ok(router)
}

fn write_into(host: &mut dyn Host, selector: &str, markup: &str) -> AppResult<()> {
    let node = host
        .query_selector(selector)?
        .ok_or_else(|| AppError::config(format!("container `{selector}` not found in document")))?;
    host.set_inner_html(node, markup)
}

#[cfg(test)]
mod tests {
    use super::{bootstrap, pages, route_table, shell_markup};
    use crate::config::{Config, UnmatchedPolicy};
    use crate::event::EventKind;
    use crate::host::{HeadlessBrowser, Host};
    use crate::router::NoopObserver;

    fn mount_html(browser: &HeadlessBrowser) -> String {
        let mount = browser.query_selector("#app").unwrap().expect("mount");
        browser.inner_html(mount).unwrap()
    }

    #[test]
    fn bootstrap_renders_chrome_and_startup_page() {
        let config = Config::default();
        let mut browser = HeadlessBrowser::open("/about", shell_markup(&config).unwrap());
        let router = bootstrap(&mut browser, &config, Box::new(NoopObserver)).expect("bootstrap");

        let header = browser.query_selector("#header").unwrap().expect("header");
        assert!(browser.inner_html(header).unwrap().contains("site-header"));
        let footer = browser.query_selector("#footer").unwrap().expect("footer");
        assert!(browser.inner_html(footer).unwrap().contains("site-footer"));
        assert_eq!(mount_html(&browser), pages::about());
        assert_eq!(router.render_count(), 1);
    }

    #[test]
    fn navbar_links_navigate_in_place() {
        let config = Config::default();
        let mut browser = HeadlessBrowser::open("/", shell_markup(&config).unwrap());
        let _router = bootstrap(&mut browser, &config, Box::new(NoopObserver)).expect("bootstrap");

        let outcome = browser.click_link("Contact").expect("click");
        assert!(outcome.default_prevented);
        assert_eq!(browser.location(), "/contact");
        assert_eq!(mount_html(&browser), pages::contact());
        assert_eq!(browser.full_loads(), 0);

        browser.back().expect("back");
        assert_eq!(mount_html(&browser), pages::index());
    }

    #[test]
    fn missing_header_container_is_a_config_error() {
        let config = Config::default();
        let mut browser = HeadlessBrowser::open("/", r#"<main id="app"></main>"#);
        let err = bootstrap(&mut browser, &config, Box::new(NoopObserver))
            .err()
            .expect("no header");
        assert!(err.is_config());
        assert_eq!(browser.listener_count(EventKind::Click), 0);
    }

    #[test]
    fn unmatched_policy_selects_fallback_page() {
        let mut config = Config::default();
        let root = route_table(&config).unwrap();
        assert_eq!(root.resolve("/missing").page.name(), "index");

        config.router.unmatched = UnmatchedPolicy::NotFound;
        let not_found = route_table(&config).unwrap();
        assert_eq!(not_found.resolve("/missing").page.name(), "not-found");
        assert_eq!(not_found.resolve("/about?x=1").page.name(), "about");
    }

    #[test]
    fn shell_builds_a_mount_matching_the_selector() {
        let mut config = Config::default();
        assert!(shell_markup(&config).unwrap().contains(r#"<main id="app"></main>"#));

        config.router.mount_selector = "#view".to_string();
        assert!(shell_markup(&config).unwrap().contains(r#"<main id="view"></main>"#));

        config.router.mount_selector = "section.content[data-mount]".to_string();
        assert!(
            shell_markup(&config)
                .unwrap()
                .contains(r#"<section class="content" data-mount=""></section>"#)
        );
    }

    #[test]
    fn shell_rejects_selectors_that_hit_the_chrome() {
        let mut config = Config::default();
        for selector in ["div", "#header", "[id=\"footer\"]", "img.hero", "nav a"] {
            config.router.mount_selector = selector.to_string();
            let err = shell_markup(&config).expect_err(selector);
            assert!(err.is_config(), "{selector}: {err}");
        }
    }
}
