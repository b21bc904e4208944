use super::{Document, NodeData, NodeId};

const BLOCK_ELEMENTS: [&str; 26] = [
    "address", "article", "aside", "blockquote", "body", "div", "footer", "form", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "section", "table",
    "textarea", "tr", "ul",
];

const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "template"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub text: String,
    /// Anchor the text belongs to, if any.
    pub link: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextLine {
    pub segments: Vec<TextSegment>,
    pub heading: bool,
}

impl TextLine {
    pub fn plain(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<TextLine>,
    current: TextLine,
}

impl LineBuilder {
    fn push_text(&mut self, text: &str, link: Option<NodeId>) {
        let collapsed = collapse_whitespace(text);
        let at_line_start = self
            .current
            .segments
            .last()
            .is_none_or(|seg| seg.text.ends_with(' '));
        let text = if at_line_start {
            collapsed.trim_start()
        } else {
            collapsed.as_str()
        };
        if text.is_empty() {
            return;
        }

        match self.current.segments.last_mut() {
            Some(seg) if seg.link == link => seg.text.push_str(text),
            _ => self.current.segments.push(TextSegment {
                text: text.to_string(),
                link,
            }),
        }
    }

    fn break_line(&mut self) {
        if let Some(last) = self.current.segments.last_mut() {
            let trimmed = last.text.trim_end().len();
            last.text.truncate(trimmed);
        }
        self.current.segments.retain(|seg| !seg.text.is_empty());
        let heading = self.current.heading;
        let line = std::mem::take(&mut self.current);
        if !line.segments.is_empty() {
            self.lines.push(line);
        }
        self.current.heading = heading;
    }
}

/// Flattens the subtree under `root` into display lines.
///
/// Block elements start new lines, headings are flagged, and text inside an
/// anchor carries the anchor's id so callers can highlight and activate it.
pub fn layout_text(doc: &Document, root: NodeId) -> Vec<TextLine> {
    let mut builder = LineBuilder::default();
    walk(doc, root, None, &mut builder);
    builder.break_line();
    builder.lines
}

fn walk(doc: &Document, node: NodeId, link: Option<NodeId>, out: &mut LineBuilder) {
    let Some(data) = doc.data(node) else {
        return;
    };
    let tag = match data {
        NodeData::Text(text) => {
            out.push_text(text, link);
            return;
        }
        NodeData::Element { tag, .. } => tag.as_str(),
    };

    if SKIPPED_ELEMENTS.contains(&tag) {
        return;
    }
    if tag == "br" {
        out.break_line();
        return;
    }
    if tag == "input" {
        let label = doc
            .attribute(node, "placeholder")
            .or_else(|| doc.attribute(node, "name"))
            .unwrap_or("input");
        out.push_text(&format!(" [{label}] "), link);
        return;
    }

    let heading = matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6");
    let block = BLOCK_ELEMENTS.contains(&tag);
    if block {
        out.break_line();
        if heading {
            out.current.heading = true;
        }
    }

    if tag == "a" {
        // Adjacent anchors would otherwise run together.
        out.push_text(" ", link);
    }
    let link = if tag == "a" && doc.attribute(node, "href").is_some() {
        Some(node)
    } else {
        link
    };

    if tag == "textarea" && doc.text_content(node).trim().is_empty() {
        let label = doc.attribute(node, "placeholder").unwrap_or("text");
        out.push_text(&format!("[{label}]"), link);
    } else if tag == "button" {
        out.push_text(" [", link);
        walk_children(doc, node, link, out);
        out.push_text("] ", link);
    } else {
        walk_children(doc, node, link, out);
    }

    if tag == "a"
        && let Some(anchor) = link
        && anchor == node
        && doc.text_content(node).trim().is_empty()
    {
        let href = doc.attribute(node, "href").unwrap_or_default().to_string();
        out.push_text(&href, link);
    }

    if block {
        out.break_line();
        if heading {
            out.current.heading = false;
        }
    }
}

fn walk_children(doc: &Document, node: NodeId, link: Option<NodeId>, out: &mut LineBuilder) {
    for child in doc.children(node) {
        walk(doc, *child, link, out);
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}
