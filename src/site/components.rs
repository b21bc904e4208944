//! Chrome shared by every page: written once at startup, never re-rendered.

pub const SITE_TITLE: &str = "spanav starter";

pub fn header() -> String {
    format!(
        r#"
    <header class="site-header">
      <h1>{SITE_TITLE}</h1>
      {}
    </header>
  "#,
        navbar()
    )
}

pub fn navbar() -> String {
    r#"
    <nav>
      <a href="/" data-link>Home</a>
      <a href="/about" data-link>About</a>
      <a href="/contact" data-link>Contact</a>
    </nav>
  "#
    .to_string()
}

pub fn footer() -> String {
    r#"
    <footer class="site-footer">
      <p>Built with plain functions and one router.</p>
    </footer>
  "#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::{SITE_TITLE, header, navbar};
    use crate::dom::Document;

    #[test]
    fn header_embeds_title_and_marked_navbar_links() {
        let doc = Document::from_markup(&header());
        let title = doc.query_selector("h1").unwrap().expect("title");
        assert_eq!(doc.text_content(title), SITE_TITLE);

        let links = doc.query_selector_all("a[data-link]").unwrap();
        let hrefs: Vec<_> = links
            .iter()
            .filter_map(|id| doc.attribute(*id, "href"))
            .collect();
        assert_eq!(hrefs, vec!["/", "/about", "/contact"]);
        assert!(header().contains(navbar().trim()));
    }
}
