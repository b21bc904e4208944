use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrFilter {
    name: String,
    value: Option<String>,
}

/// A single compound selector: `tag#id.class[attr][attr="value"]`.
///
/// Combinators are not supported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrFilter>,
}

impl Selector {
    pub fn parse(input: &str) -> AppResult<Self> {
        let text = input.trim();
        if text.is_empty() {
            return Err(AppError::invalid_argument("selector must not be empty"));
        }
        if text.contains(char::is_whitespace) && !text.contains('[') {
            return Err(AppError::invalid_argument(format!(
                "selector combinators are not supported: {text}"
            )));
        }

        let mut selector = Self::default();
        let mut rest = text;

        let tag_len = rest
            .find(|c: char| matches!(c, '#' | '.' | '['))
            .unwrap_or(rest.len());
        if tag_len > 0 {
            let tag = &rest[..tag_len];
            if tag != "*" {
                selector.tag = Some(tag.to_ascii_lowercase());
            }
            rest = &rest[tag_len..];
        }

        while let Some(first) = rest.chars().next() {
            match first {
                '#' | '.' => {
                    let body = &rest[1..];
                    let len = body
                        .find(|c: char| matches!(c, '#' | '.' | '['))
                        .unwrap_or(body.len());
                    let name = &body[..len];
                    if name.is_empty() {
                        return Err(AppError::invalid_argument(format!(
                            "selector has an empty {} name: {text}",
                            if first == '#' { "id" } else { "class" }
                        )));
                    }
                    if first == '#' {
                        selector.id = Some(name.to_string());
                    } else {
                        selector.classes.push(name.to_string());
                    }
                    rest = &body[len..];
                }
                '[' => {
                    let Some(end) = rest.find(']') else {
                        return Err(AppError::invalid_argument(format!(
                            "unterminated attribute selector: {text}"
                        )));
                    };
                    selector.attrs.push(parse_attr_filter(&rest[1..end], text)?);
                    rest = &rest[end + 1..];
                }
                _ => {
                    return Err(AppError::invalid_argument(format!(
                        "unexpected `{first}` in selector: {text}"
                    )));
                }
            }
        }

        Ok(selector)
    }

    /// Tag and attributes of an element this selector matches, using
    /// `default_tag` when the selector names none.
    pub fn element_for(&self, default_tag: &str) -> (String, Vec<(String, String)>) {
        let tag = self.tag.clone().unwrap_or_else(|| default_tag.to_string());
        let mut attrs = Vec::new();
        if let Some(id) = &self.id {
            attrs.push(("id".to_string(), id.clone()));
        }
        if !self.classes.is_empty() {
            attrs.push(("class".to_string(), self.classes.join(" ")));
        }
        for filter in &self.attrs {
            if attrs.iter().any(|(key, _)| *key == filter.name) {
                continue;
            }
            attrs.push((filter.name.clone(), filter.value.clone().unwrap_or_default()));
        }
        (tag, attrs)
    }

    pub fn matches(&self, tag: &str, attrs: &[(String, String)]) -> bool {
        if let Some(expected) = &self.tag
            && expected != tag
        {
            return false;
        }
        let lookup = |name: &str| {
            attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        };
        if let Some(id) = &self.id
            && lookup("id") != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.is_empty() {
            let class_attr = lookup("class").unwrap_or("");
            let present: Vec<&str> = class_attr.split_whitespace().collect();
            if !self.classes.iter().all(|c| present.contains(&c.as_str())) {
                return false;
            }
        }
        self.attrs.iter().all(|filter| match lookup(&filter.name) {
            None => false,
            Some(actual) => filter.value.as_deref().is_none_or(|want| want == actual),
        })
    }
}

fn parse_attr_filter(body: &str, full: &str) -> AppResult<AttrFilter> {
    let (name, value) = match body.split_once('=') {
        Some((name, value)) => {
            let value = value.trim();
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (name.trim(), Some(unquoted.to_string()))
        }
        None => (body.trim(), None),
    };
    if name.is_empty() {
        return Err(AppError::invalid_argument(format!(
            "attribute selector has no name: {full}"
        )));
    }
    Ok(AttrFilter {
        name: name.to_ascii_lowercase(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::Selector;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn tag_with_marker_attribute() {
        let selector = Selector::parse("a[data-link]").expect("selector should parse");
        assert!(selector.matches("a", &attrs(&[("href", "/"), ("data-link", "")])));
        assert!(!selector.matches("a", &attrs(&[("href", "/")])));
        assert!(!selector.matches("button", &attrs(&[("data-link", "")])));
    }

    #[test]
    fn id_class_and_attribute_value() {
        let by_id = Selector::parse("#app").expect("id selector");
        assert!(by_id.matches("div", &attrs(&[("id", "app")])));
        assert!(!by_id.matches("div", &attrs(&[("id", "application")])));

        let by_class = Selector::parse("header.site-header").expect("class selector");
        assert!(by_class.matches("header", &attrs(&[("class", "dark site-header")])));

        let by_value = Selector::parse(r#"a[href="/about"]"#).expect("value selector");
        assert!(by_value.matches("a", &attrs(&[("href", "/about")])));
        assert!(!by_value.matches("a", &attrs(&[("href", "/")])));
    }

    #[test]
    fn element_for_builds_a_matching_element() {
        for text in ["#view", ".content", "section.page[data-mount]", r#"[role="main"]"#] {
            let selector = Selector::parse(text).expect("selector should parse");
            let (tag, attrs) = selector.element_for("main");
            assert!(selector.matches(&tag, &attrs), "{text} -> <{tag} {attrs:?}>");
        }
        let (tag, attrs) = Selector::parse("article").unwrap().element_for("main");
        assert_eq!(tag, "article");
        assert!(attrs.is_empty());
    }

    #[test]
    fn rejects_combinators_and_malformed_input() {
        assert!(Selector::parse("nav a").is_err());
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("a[data-link").is_err());
        assert!(Selector::parse("#").is_err());
    }
}
