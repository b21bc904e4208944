//! In-memory document tree.
//!
//! Nodes live in an arena indexed by [`NodeId`]. Replacing an element's
//! content frees the previous subtree: its slots are reused for later nodes
//! under a new generation, so ids held from before the replacement no longer
//! resolve and are skipped by queries and event dispatch.

mod parse;
mod selector;
mod text;

pub use parse::{Fragment, decode_entities, is_void_element, parse_fragment};
pub use selector::Selector;
pub use text::{TextLine, TextSegment, layout_text};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    slot: usize,
    generation: u32,
}

impl NodeId {
    pub fn index(self) -> usize {
        self.slot
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Markup last written through `set_inner_html`, returned verbatim.
    inner_markup: Option<String>,
    attached: bool,
    generation: u32,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    /// Slots of freed nodes, reused before the arena grows.
    free: Vec<usize>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Element {
                    tag: "body".to_string(),
                    attrs: Vec::new(),
                },
                parent: None,
                children: Vec::new(),
                inner_markup: None,
                attached: true,
                generation: 0,
            }],
            free: Vec::new(),
            body: NodeId {
                slot: 0,
                generation: 0,
            },
        }
    }

    /// Builds a document whose body holds the parsed `markup`.
    pub fn from_markup(markup: &str) -> Self {
        let mut doc = Self::new();
        let body = doc.body;
        doc.append_fragments(body, parse_fragment(markup));
        doc
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of live nodes, the body included.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn create_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        self.push_node(
            NodeData::Element {
                tag: tag.to_ascii_lowercase(),
                attrs: attrs
                    .iter()
                    .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
                    .collect(),
            },
            false,
        )
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(NodeData::Text(text.to_string()), false)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> AppResult<()> {
        self.check(parent)?;
        self.check(child)?;
        if matches!(self.nodes[parent.slot].data, NodeData::Text(_)) {
            return Err(AppError::invalid_argument("text nodes cannot have children"));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(AppError::invalid_argument(
                "cannot append a node to its own subtree",
            ));
        }
        if let Some(old_parent) = self.nodes[child.slot].parent {
            self.nodes[old_parent.slot].children.retain(|id| *id != child);
        }
        self.nodes[child.slot].parent = Some(parent);
        self.nodes[parent.slot].children.push(child);
        self.invalidate_markup(parent);
        let attached = self.nodes[parent.slot].attached;
        self.set_attached(child, attached);
        Ok(())
    }

    /// Replaces every child of `node` with the parsed `markup`.
    pub fn set_inner_html(&mut self, node: NodeId, markup: &str) -> AppResult<()> {
        self.check(node)?;
        if matches!(self.nodes[node.slot].data, NodeData::Text(_)) {
            return Err(AppError::invalid_argument(
                "cannot set inner html of a text node",
            ));
        }

        let old = std::mem::take(&mut self.nodes[node.slot].children);
        for child in old {
            self.free_subtree(child);
        }
        self.append_fragments(node, parse_fragment(markup));
        self.invalidate_markup(node);
        self.nodes[node.slot].inner_markup = Some(markup.to_string());
        Ok(())
    }

    pub fn inner_html(&self, node: NodeId) -> AppResult<String> {
        self.check(node)?;
        if let Some(markup) = &self.nodes[node.slot].inner_markup {
            return Ok(markup.clone());
        }
        let mut out = String::new();
        for child in &self.nodes[node.slot].children {
            self.serialize_into(*child, &mut out);
        }
        Ok(out)
    }

    pub fn outer_html(&self, node: NodeId) -> AppResult<String> {
        self.check(node)?;
        let mut out = String::new();
        self.serialize_into(node, &mut out);
        Ok(out)
    }

    pub fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.node(node).map(|n| &n.data)
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match self.data(node)? {
            NodeData::Element { tag, .. } => Some(tag.as_str()),
            NodeData::Text(_) => None,
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match self.data(node)? {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str()),
            NodeData::Text(_) => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.attached)
    }

    /// Node and its ancestors, innermost first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(
            self.node(node).map(|_| node),
            move |current| self.parent(*current),
        )
    }

    pub fn query_selector(&self, selector: &str) -> AppResult<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.descendants(self.body).find(|id| self.matches(*id, &selector)))
    }

    pub fn query_selector_all(&self, selector: &str) -> AppResult<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(self.body)
            .filter(|id| self.matches(*id, &selector))
            .collect())
    }

    /// Nearest node, starting at `node` itself, that matches `selector`.
    pub fn closest(&self, node: NodeId, selector: &str) -> AppResult<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.ancestors(node).find(|id| self.matches(*id, &selector)))
    }

    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        for id in self.descendants(node) {
            if let Some(NodeData::Text(text)) = self.data(id) {
                out.push_str(text);
            }
        }
        out
    }

    /// Pre-order walk of `root` and everything below it.
    pub fn descendants(&self, root: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = if self.node(root).is_some() {
            vec![root]
        } else {
            Vec::new()
        };
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.children(next).iter().rev().copied());
            Some(next)
        })
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        match self.data(node) {
            Some(NodeData::Element { tag, attrs }) => selector.matches(tag, attrs),
            _ => false,
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.slot)
            .filter(|node| node.generation == id.generation)
    }

    fn push_node(&mut self, data: NodeData, attached: bool) -> NodeId {
        if let Some(slot) = self.free.pop() {
            let node = &mut self.nodes[slot];
            node.data = data;
            node.attached = attached;
            return NodeId {
                slot,
                generation: node.generation,
            };
        }

        let id = NodeId {
            slot: self.nodes.len(),
            generation: 0,
        };
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
            inner_markup: None,
            attached,
            generation: 0,
        });
        id
    }

    /// Releases `root` and everything below it. The slots keep a bumped
    /// generation so stale ids stop resolving.
    fn free_subtree(&mut self, root: NodeId) {
        let ids: Vec<NodeId> = self.descendants(root).collect();
        for id in ids {
            let node = &mut self.nodes[id.slot];
            node.data = NodeData::Text(String::new());
            node.parent = None;
            node.children.clear();
            node.inner_markup = None;
            node.attached = false;
            node.generation = node.generation.wrapping_add(1);
            self.free.push(id.slot);
        }
    }

    fn append_fragments(&mut self, parent: NodeId, fragments: Vec<Fragment>) {
        let attached = self.nodes[parent.slot].attached;
        for fragment in fragments {
            let id = match fragment {
                Fragment::Text(text) => self.push_node(NodeData::Text(text), attached),
                Fragment::Element {
                    tag,
                    attrs,
                    children,
                } => {
                    let id = self.push_node(NodeData::Element { tag, attrs }, attached);
                    self.append_fragments(id, children);
                    id
                }
            };
            self.nodes[id.slot].parent = Some(parent);
            self.nodes[parent.slot].children.push(id);
        }
    }

    /// Drops cached markup on `node` and every ancestor after a mutation.
    fn invalidate_markup(&mut self, node: NodeId) {
        let ids: Vec<NodeId> = self.ancestors(node).collect();
        for id in ids {
            self.nodes[id.slot].inner_markup = None;
        }
    }

    fn set_attached(&mut self, root: NodeId, attached: bool) {
        let ids: Vec<NodeId> = self.descendants(root).collect();
        for id in ids {
            self.nodes[id.slot].attached = attached;
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|id| id == candidate)
    }

    fn check(&self, node: NodeId) -> AppResult<()> {
        if self.node(node).is_some() {
            Ok(())
        } else {
            Err(AppError::invalid_argument(format!(
                "node {} does not exist",
                node.slot
            )))
        }
    }

    fn serialize_into(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.slot].data {
            NodeData::Text(text) => out.push_str(&escape_text(text)),
            NodeData::Element { tag, attrs } => {
                out.push('<');
                out.push_str(tag);
                for (key, value) in attrs {
                    out.push(' ');
                    out.push_str(key);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&value.replace('&', "&amp;").replace('"', "&quot;"));
                        out.push('"');
                    }
                }
                out.push('>');
                if is_void_element(tag) {
                    return;
                }
                match &self.nodes[node.slot].inner_markup {
                    Some(markup) => out.push_str(markup),
                    None => {
                        for child in &self.nodes[node.slot].children {
                            self.serialize_into(*child, out);
                        }
                    }
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
