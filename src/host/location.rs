/// Path component of a location: everything before the first `?` or `#`.
///
/// An empty path is treated as `/`.
pub fn pathname(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    if path.is_empty() { "/" } else { path }
}

/// Query string of a location without the leading `?`, if any.
pub fn query(location: &str) -> Option<&str> {
    let start = location.find('?')? + 1;
    let rest = &location[start..];
    let end = rest.find('#').unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Value of `key` in the location's query string.
pub fn query_param<'a>(location: &'a str, key: &str) -> Option<&'a str> {
    query(location)?
        .split('&')
        .filter_map(|pair| match pair.split_once('=') {
            Some((k, v)) => Some((k, v)),
            None if !pair.is_empty() => Some((pair, "")),
            None => None,
        })
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

/// `true` when the location carries `debug=true`.
pub fn debug_requested(location: &str) -> bool {
    query_param(location, "debug") == Some("true")
}

#[cfg(test)]
mod tests {
    use super::{debug_requested, pathname, query, query_param};

    #[test]
    fn pathname_strips_query_and_fragment() {
        assert_eq!(pathname("/about?debug=true#team"), "/about");
        assert_eq!(pathname("/contact#form"), "/contact");
        assert_eq!(pathname("?x=1"), "/");
        assert_eq!(pathname("/"), "/");
    }

    #[test]
    fn query_params_are_looked_up_by_key() {
        assert_eq!(query("/a?x=1&debug=true#f"), Some("x=1&debug=true"));
        assert_eq!(query_param("/a?x=1&flag", "flag"), Some(""));
        assert_eq!(query_param("/a?x=1", "y"), None);
        assert!(debug_requested("/?debug=true"));
        assert!(!debug_requested("/?debug=false"));
        assert!(!debug_requested("/about"));
    }
}
