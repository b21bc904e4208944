use std::collections::HashMap;

use serde::Serialize;

use crate::config::UnmatchedPolicy;
use crate::error::{AppError, AppResult};
use crate::host::location::pathname;

use super::producer::Page;

pub const ROOT_PATH: &str = "/";

/// How a location was mapped to a producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resolution {
    Exact,
    RootFallback,
    NotFound,
}

#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    /// Path component that was looked up.
    pub path: &'a str,
    pub page: &'a Page,
    pub resolution: Resolution,
}

impl Resolved<'_> {
    pub fn is_fallback(&self) -> bool {
        self.resolution != Resolution::Exact
    }
}

/// Immutable path → page table. Exact matches only.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<(String, Page)>,
    index: HashMap<String, usize>,
    not_found: Option<Page>,
    unmatched: UnmatchedPolicy,
}

#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: Vec<(String, Page)>,
    not_found: Option<Page>,
    unmatched: UnmatchedPolicy,
}

impl RouteTableBuilder {
    pub fn route(mut self, path: impl Into<String>, page: Page) -> Self {
        self.routes.push((path.into(), page));
        self
    }

    pub fn not_found(mut self, page: Page) -> Self {
        self.not_found = Some(page);
        self
    }

    pub fn unmatched(mut self, policy: UnmatchedPolicy) -> Self {
        self.unmatched = policy;
        self
    }

    pub fn build(self) -> AppResult<RouteTable> {
        let mut index = HashMap::with_capacity(self.routes.len());
        for (pos, (path, _)) in self.routes.iter().enumerate() {
            if !path.starts_with('/') {
                return Err(AppError::config(format!(
                    "route `{path}` must start with `/`"
                )));
            }
            if path.contains(['?', '#']) {
                return Err(AppError::config(format!(
                    "route `{path}` must not contain a query or fragment"
                )));
            }
            if index.insert(path.clone(), pos).is_some() {
                return Err(AppError::config(format!("route `{path}` is registered twice")));
            }
        }
        if !index.contains_key(ROOT_PATH) {
            return Err(AppError::config(
                "route table has no page for the fallback path `/`",
            ));
        }
        if self.unmatched == UnmatchedPolicy::NotFound && self.not_found.is_none() {
            return Err(AppError::config(
                "unmatched policy is `not-found` but no not-found page is registered",
            ));
        }

        Ok(RouteTable {
            routes: self.routes,
            index,
            not_found: self.not_found,
            unmatched: self.unmatched,
        })
    }
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Maps `location` to a page. Never fails: unknown paths resolve through
    /// the unmatched policy.
    pub fn resolve<'a>(&'a self, location: &'a str) -> Resolved<'a> {
        let path = pathname(location);
        if let Some(pos) = self.index.get(path) {
            return Resolved {
                path,
                page: &self.routes[*pos].1,
                resolution: Resolution::Exact,
            };
        }

        if self.unmatched == UnmatchedPolicy::NotFound
            && let Some(page) = &self.not_found
        {
            return Resolved {
                path,
                page,
                resolution: Resolution::NotFound,
            };
        }

        Resolved {
            path,
            page: self.root(),
            resolution: Resolution::RootFallback,
        }
    }

    pub fn get(&self, path: &str) -> Option<&Page> {
        self.index.get(path).map(|pos| &self.routes[*pos].1)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Registered paths in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|(path, _)| path.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn unmatched_policy(&self) -> UnmatchedPolicy {
        self.unmatched
    }

    fn root(&self) -> &Page {
        // `build` guarantees the root entry.
        &self.routes[self.index[ROOT_PATH]].1
    }
}

#[cfg(test)]
mod tests {
    use super::{Resolution, RouteTable};
    use crate::config::UnmatchedPolicy;
    use crate::page::Page;

    fn page(name: &'static str) -> Page {
        Page::new(name, move || format!("<h2>{name}</h2>"))
    }

    fn table() -> RouteTable {
        RouteTable::builder()
            .route("/", page("index"))
            .route("/about", page("about"))
            .route("/contact", page("contact"))
            .build()
            .expect("table should build")
    }

    #[test]
    fn exact_match_resolves_registered_page() {
        let table = table();
        let resolved = table.resolve("/about");
        assert_eq!(resolved.page.name(), "about");
        assert_eq!(resolved.resolution, Resolution::Exact);
        assert!(!resolved.is_fallback());
        assert_eq!(table.paths().collect::<Vec<_>>(), vec!["/", "/about", "/contact"]);
    }

    #[test]
    fn unknown_paths_fall_back_to_root() {
        let table = table();
        for path in ["/abuot", "/about/", "/ABOUT", "", "/missing/deep"] {
            let resolved = table.resolve(path);
            assert_eq!(resolved.page.name(), "index", "path {path:?}");
            if !path.is_empty() {
                assert_eq!(resolved.resolution, Resolution::RootFallback);
            }
        }
    }

    #[test]
    fn query_and_fragment_do_not_affect_lookup() {
        let table = table();
        let resolved = table.resolve("/contact?debug=true#form");
        assert_eq!(resolved.page.name(), "contact");
        assert_eq!(resolved.path, "/contact");
    }

    #[test]
    fn not_found_policy_uses_registered_page() {
        let table = RouteTable::builder()
            .route("/", page("index"))
            .not_found(page("not-found"))
            .unmatched(UnmatchedPolicy::NotFound)
            .build()
            .expect("table should build");
        let resolved = table.resolve("/nope");
        assert_eq!(resolved.page.name(), "not-found");
        assert_eq!(resolved.resolution, Resolution::NotFound);
        assert_eq!(table.resolve("/").page.name(), "index");
    }

    #[test]
    fn build_rejects_invalid_tables() {
        let missing_root = RouteTable::builder().route("/about", page("about")).build();
        assert!(missing_root.expect_err("root is required").is_config());

        let relative = RouteTable::builder()
            .route("/", page("index"))
            .route("about", page("about"))
            .build();
        assert!(relative.expect_err("keys need a leading slash").is_config());

        let duplicate = RouteTable::builder()
            .route("/", page("index"))
            .route("/", page("other"))
            .build();
        assert!(duplicate.expect_err("duplicates are rejected").is_config());

        let no_not_found = RouteTable::builder()
            .route("/", page("index"))
            .unmatched(UnmatchedPolicy::NotFound)
            .build();
        assert!(no_not_found.expect_err("not-found page required").is_config());
    }
}
