//! Markup fragment parser.
//!
//! Tolerant of the markup page producers emit: unclosed elements are closed at
//! end of input, stray end tags are ignored, comments and doctypes are dropped.
//! `<script>` and `<style>` bodies are kept as raw text.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<Fragment>,
    },
    Text(String),
}

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Open {
        tag: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    Close(String),
    Text(String),
}

struct Frame {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Fragment>,
}

pub fn parse_fragment(markup: &str) -> Vec<Fragment> {
    let mut roots = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for token in tokenize(markup) {
        match token {
            Token::Text(text) => {
                if text.trim().is_empty() {
                    continue;
                }
                push_child(&mut stack, &mut roots, Fragment::Text(text));
            }
            Token::Open {
                tag,
                attrs,
                self_closing,
            } => {
                if self_closing || is_void_element(&tag) {
                    push_child(
                        &mut stack,
                        &mut roots,
                        Fragment::Element {
                            tag,
                            attrs,
                            children: Vec::new(),
                        },
                    );
                } else {
                    stack.push(Frame {
                        tag,
                        attrs,
                        children: Vec::new(),
                    });
                }
            }
            Token::Close(tag) => {
                if !stack.iter().any(|frame| frame.tag == tag) {
                    continue;
                }
                while let Some(frame) = stack.pop() {
                    let matched = frame.tag == tag;
                    let element = close_frame(frame);
                    push_child(&mut stack, &mut roots, element);
                    if matched {
                        break;
                    }
                }
            }
        }
    }

    while let Some(frame) = stack.pop() {
        let element = close_frame(frame);
        push_child(&mut stack, &mut roots, element);
    }
    roots
}

fn close_frame(frame: Frame) -> Fragment {
    Fragment::Element {
        tag: frame.tag,
        attrs: frame.attrs,
        children: frame.children,
    }
}

fn push_child(stack: &mut [Frame], roots: &mut Vec<Fragment>, node: Fragment) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            tokens.push(Token::Text(decode_entities(rest)));
            break;
        };
        if lt > 0 {
            tokens.push(Token::Text(decode_entities(&rest[..lt])));
            rest = &rest[lt..];
        }

        if let Some(after) = rest.strip_prefix("<!--") {
            rest = match after.find("-->") {
                Some(end) => &after[end + 3..],
                None => "",
            };
            continue;
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            rest = match rest.find('>') {
                Some(end) => &rest[end + 1..],
                None => "",
            };
            continue;
        }
        if let Some(after) = rest.strip_prefix("</") {
            let Some(end) = after.find('>') else {
                tokens.push(Token::Text(decode_entities(rest)));
                break;
            };
            let tag = after[..end].trim().to_ascii_lowercase();
            if !tag.is_empty() {
                tokens.push(Token::Close(tag));
            }
            rest = &after[end + 1..];
            continue;
        }

        match parse_start_tag(rest) {
            Some((token, consumed)) => {
                rest = &rest[consumed..];
                let raw_tag = match &token {
                    Token::Open {
                        tag,
                        self_closing: false,
                        ..
                    } if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) => Some(tag.clone()),
                    _ => None,
                };
                tokens.push(token);
                if let Some(tag) = raw_tag {
                    let closing = format!("</{tag}");
                    let end = find_ascii_case_insensitive(rest, &closing).unwrap_or(rest.len());
                    if end > 0 {
                        tokens.push(Token::Text(rest[..end].to_string()));
                    }
                    rest = &rest[end..];
                }
            }
            None => {
                tokens.push(Token::Text("<".to_string()));
                rest = &rest[1..];
            }
        }
    }

    merge_adjacent_text(tokens)
}

/// Parses `<tag attr=value ...>` at the start of `input`.
fn parse_start_tag(input: &str) -> Option<(Token, usize)> {
    let bytes = input.as_bytes();
    let mut pos = 1;
    if !bytes.get(pos).is_some_and(u8::is_ascii_alphabetic) {
        return None;
    }

    let name_start = pos;
    while bytes
        .get(pos)
        .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'-')
    {
        pos += 1;
    }
    let tag = input[name_start..pos].to_ascii_lowercase();

    let mut attrs = Vec::new();
    let mut self_closing = false;
    loop {
        while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
            pos += 1;
        }
        match bytes.get(pos) {
            None => return None,
            Some(b'>') => {
                pos += 1;
                break;
            }
            Some(b'/') => {
                self_closing = true;
                pos += 1;
                continue;
            }
            Some(_) => {}
        }

        let attr_start = pos;
        while bytes
            .get(pos)
            .is_some_and(|b| !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/'))
        {
            pos += 1;
        }
        let name = input[attr_start..pos].to_ascii_lowercase();

        while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
            pos += 1;
        }
        let value = if bytes.get(pos) == Some(&b'=') {
            pos += 1;
            while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
                pos += 1;
            }
            match bytes.get(pos) {
                Some(quote @ (b'"' | b'\'')) => {
                    let value_start = pos + 1;
                    let len = input[value_start..].find(*quote as char)?;
                    pos = value_start + len + 1;
                    decode_entities(&input[value_start..value_start + len])
                }
                _ => {
                    let value_start = pos;
                    while bytes
                        .get(pos)
                        .is_some_and(|b| !b.is_ascii_whitespace() && *b != b'>')
                    {
                        pos += 1;
                    }
                    decode_entities(&input[value_start..pos])
                }
            }
        } else {
            String::new()
        };

        if !name.is_empty() {
            self_closing = false;
            attrs.push((name, value));
        }
    }

    Some((
        Token::Open {
            tag,
            attrs,
            self_closing,
        },
        pos,
    ))
}

fn merge_adjacent_text(tokens: Vec<Token>) -> Vec<Token> {
    let mut merged: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Token::Text(text) = &token
            && let Some(Token::Text(prev)) = merged.last_mut()
        {
            prev.push_str(text);
            continue;
        }
        merged.push(token);
    }
    merged
}

fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            decode_entity(entity).map(|ch| (ch, semi + 1))
        });
        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Fragment, decode_entities, parse_fragment};

    fn element<'a>(fragment: &'a Fragment) -> (&'a str, &'a [(String, String)], &'a [Fragment]) {
        match fragment {
            Fragment::Element {
                tag,
                attrs,
                children,
            } => (tag.as_str(), attrs.as_slice(), children.as_slice()),
            Fragment::Text(text) => panic!("expected element, got text {text:?}"),
        }
    }

    #[test]
    fn parses_nested_navbar_markup() {
        let nodes = parse_fragment(
            r#"
            <nav>
              <a href="/" data-link>Home</a>
              <a href='/about' data-link>About</a>
            </nav>
            "#,
        );

        assert_eq!(nodes.len(), 1);
        let (tag, _, children) = element(&nodes[0]);
        assert_eq!(tag, "nav");
        assert_eq!(children.len(), 2);

        let (tag, attrs, text) = element(&children[1]);
        assert_eq!(tag, "a");
        assert_eq!(
            attrs,
            &[
                ("href".to_string(), "/about".to_string()),
                ("data-link".to_string(), String::new()),
            ]
        );
        assert_eq!(text, &[Fragment::Text("About".to_string())]);
    }

    #[test]
    fn void_and_self_closing_elements_take_no_children() {
        let nodes = parse_fragment(r#"<form><input name="email" required /><br><button>Send</button></form>"#);
        let (_, _, children) = element(&nodes[0]);
        let tags: Vec<&str> = children.iter().map(|c| element(c).0).collect();
        assert_eq!(tags, vec!["input", "br", "button"]);
    }

    #[test]
    fn recovers_from_stray_and_missing_end_tags() {
        let nodes = parse_fragment("<section><p>one</span><p>two</section><div>tail");
        assert_eq!(nodes.len(), 2);
        let (tag, _, children) = element(&nodes[0]);
        assert_eq!(tag, "section");
        assert_eq!(children.len(), 1);
        let (tag, _, _) = element(&nodes[1]);
        assert_eq!(tag, "div");
    }

    #[test]
    fn skips_comments_and_keeps_script_bodies_raw() {
        let nodes = parse_fragment("<!-- hi --><script>if (a < b) {}</script>");
        assert_eq!(nodes.len(), 1);
        let (tag, _, children) = element(&nodes[0]);
        assert_eq!(tag, "script");
        assert_eq!(children, &[Fragment::Text("if (a < b) {}".to_string())]);
    }

    #[test]
    fn lone_angle_bracket_is_text() {
        let nodes = parse_fragment("1 < 2");
        assert_eq!(nodes, vec![Fragment::Text("1 < 2".to_string())]);
    }

    #[test]
    fn decodes_named_and_numeric_entities() {
        assert_eq!(decode_entities("a &amp; b &lt;3 &#65;&#x42; &bogus;"), "a & b <3 AB &bogus;");
    }
}
