//! Owned markup tree built with quick-xml
//!
//! Provides the generic tree construction and query operations the builders
//! rely on: find elements by tag name (document order, recursive), attributes,
//! child nodes, parent, and a non-destructive filtered copy used for the
//! plugin view. Literal (CDATA) sections stay distinct from ordinary text so
//! controllers can pick up their script payloads.
//!
//! Text is normalized while the tree is built: adjacent text runs are merged
//! and whitespace-only text nodes are dropped.

use crate::content::errors::{ContentParseError, ContentParseResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Index of a node inside its `MarkupTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        name: String,
        /// Attributes in source order, values unescaped
        attributes: Vec<(String, String)>,
    },
    Text(String),
    /// Unparsed literal block, payload kept verbatim
    CData(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupNode {
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupTree {
    nodes: Vec<MarkupNode>,
    root: Option<NodeId>,
}

impl MarkupTree {
    /// Parse a complete document. Nesting deeper than `max_depth` elements
    /// is rejected before any recursive processing happens.
    pub fn parse(xml: &str, max_depth: usize) -> ContentParseResult<MarkupTree> {
        let mut reader = Reader::from_reader(xml.as_bytes());
        reader.trim_text(false);
        reader.check_end_names(true);

        let mut builder = TreeBuilder::default();
        let mut buf = Vec::new();

        loop {
            let position = reader.buffer_position();
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| with_position(e.into(), reader.buffer_position()))?;

            match event {
                Event::Start(ref e) => {
                    builder.open_element(e, position)?;
                    if builder.depth() > max_depth {
                        return Err(ContentParseError::NestingTooDeep { max_depth });
                    }
                }
                Event::Empty(ref e) => {
                    let id = builder.open_element(e, position)?;
                    if builder.depth() > max_depth {
                        return Err(ContentParseError::NestingTooDeep { max_depth });
                    }
                    builder.close_element(id);
                }
                Event::End(ref e) => {
                    let closing = decode_name(e.name().as_ref(), position)?;
                    let id = builder.current().ok_or_else(|| {
                        ContentParseError::malformed(
                            position,
                            format!("closing tag </{}> has no matching start tag", closing),
                        )
                    })?;
                    let expected = builder.tree.tag_name(id).unwrap_or_default();
                    if expected != closing {
                        return Err(ContentParseError::malformed(
                            position,
                            format!("expected </{}>, found </{}>", expected, closing),
                        ));
                    }
                    builder.close_element(id);
                }
                Event::Text(ref e) => {
                    let text = e
                        .unescape()
                        .map_err(|err| with_position(err.into(), position))?;
                    if builder.current().is_some() {
                        builder.push_text(&text);
                    } else if !text.trim().is_empty() {
                        return Err(ContentParseError::malformed(
                            position,
                            "text content outside of the root element",
                        ));
                    }
                }
                Event::CData(ref e) => {
                    let parent = builder.current().ok_or_else(|| {
                        ContentParseError::malformed(position, "CDATA section outside of the root element")
                    })?;
                    let payload = std::str::from_utf8(&e[..])
                        .map_err(|err| ContentParseError::Io(format!("invalid UTF-8 in CDATA: {}", err)))?;
                    builder.push_node(NodeKind::CData(payload.to_string()), Some(parent));
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions and DOCTYPE carry
                // nothing for the model and no external entities are resolved.
                _ => {}
            }
            buf.clear();
        }

        if let Some(unclosed) = builder.current() {
            return Err(ContentParseError::malformed(
                reader.buffer_position(),
                format!(
                    "unexpected end of input, <{}> is not closed",
                    builder.tree.tag_name(unclosed).unwrap_or_default()
                ),
            ));
        }
        if builder.tree.root.is_none() {
            return Err(ContentParseError::malformed(
                reader.buffer_position(),
                "document has no root element",
            ));
        }

        Ok(builder.finish())
    }

    pub fn root_element(&self) -> Option<NodeId> {
        self.root
    }

    /// Node lookup that tolerates ids from another tree
    pub fn get(&self, id: NodeId) -> Option<&MarkupNode> {
        self.nodes.get(id.0)
    }

    fn node(&self, id: NodeId) -> &MarkupNode {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Element { .. })
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        match self.kind(id) {
            NodeKind::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).iter().copied().filter(|child| self.is_element(*child))
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|node| !node.children.is_empty())
    }

    /// Every element strictly below `scope`, in document order
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.is_element(id) {
                found.push(id);
                stack.extend(self.children(id).iter().rev().copied());
            }
        }
        found
    }

    /// Every element named `tag_name` in the whole document, root included,
    /// in document order
    pub fn elements_by_tag_name(&self, tag_name: &str) -> Vec<NodeId> {
        let Some(root) = self.root else {
            return Vec::new();
        };
        std::iter::once(root)
            .chain(self.descendants(root))
            .filter(|id| self.tag_name(*id) == Some(tag_name))
            .collect()
    }

    /// True when some ancestor of `id` is an element named `tag_name`
    pub fn has_ancestor_named(&self, id: NodeId, tag_name: &str) -> bool {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if self.tag_name(ancestor) == Some(tag_name) {
                return true;
            }
            current = self.parent(ancestor);
        }
        false
    }

    /// Copy of the tree without the subtrees of elements matching `exclude`.
    /// Text left adjacent by a removal is merged again.
    pub fn without_subtrees<F>(&self, exclude: F) -> MarkupTree
    where
        F: Fn(&str) -> bool,
    {
        enum Step {
            Visit(NodeId, Option<NodeId>),
            Close(NodeId),
        }

        let mut builder = TreeBuilder::default();
        let mut steps: Vec<Step> = self.root.map(|root| Step::Visit(root, None)).into_iter().collect();

        while let Some(step) = steps.pop() {
            match step {
                Step::Close(copy) => builder.close_element(copy),
                Step::Visit(source, parent) => match self.kind(source) {
                    NodeKind::Element { name, .. } if exclude(name) => {}
                    NodeKind::Element { .. } => {
                        let copy = builder.push_node(self.kind(source).clone(), parent);
                        steps.push(Step::Close(copy));
                        steps.extend(self.children(source).iter().rev().map(|child| Step::Visit(*child, Some(copy))));
                    }
                    NodeKind::Text(text) => builder.push_text(text),
                    NodeKind::CData(_) => {
                        builder.push_node(self.kind(source).clone(), parent);
                    }
                },
            }
        }

        builder.finish()
    }
}

/// Incremental tree construction with on-the-fly text normalization
#[derive(Default)]
struct TreeBuilder {
    tree: MarkupTree,
    open: Vec<NodeId>,
    pending_text: String,
}

impl TreeBuilder {
    fn current(&self) -> Option<NodeId> {
        self.open.last().copied()
    }

    fn depth(&self) -> usize {
        self.open.len()
    }

    fn open_element(&mut self, start: &BytesStart, position: usize) -> ContentParseResult<NodeId> {
        let parent = self.current();
        if parent.is_none() && self.tree.root.is_some() {
            return Err(ContentParseError::malformed(
                position,
                "document has more than one root element",
            ));
        }
        let name = decode_name(start.name().as_ref(), position)?;
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| with_position(quick_xml::Error::from(e).into(), position))?;
            let key = decode_name(attr.key.as_ref(), position)?;
            let value = attr
                .unescape_value()
                .map_err(|e| with_position(e.into(), position))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(self.push_node(NodeKind::Element { name, attributes }, parent))
    }

    fn push_node(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        self.flush_text();
        let id = NodeId(self.tree.nodes.len());
        let is_element = matches!(kind, NodeKind::Element { .. });
        self.tree.nodes.push(MarkupNode {
            kind,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.tree.nodes[parent.0].children.push(id),
            None => self.tree.root = Some(id),
        }
        if is_element {
            self.open.push(id);
        }
        id
    }

    fn push_text(&mut self, text: &str) {
        self.pending_text.push_str(text);
    }

    fn close_element(&mut self, id: NodeId) {
        self.flush_text();
        if let Some(pos) = self.open.iter().rposition(|open| *open == id) {
            self.open.truncate(pos);
        }
    }

    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending_text);
        if text.trim().is_empty() {
            return;
        }
        if let Some(parent) = self.open.last().copied() {
            let id = NodeId(self.tree.nodes.len());
            self.tree.nodes.push(MarkupNode {
                kind: NodeKind::Text(text),
                parent: Some(parent),
                children: Vec::new(),
            });
            self.tree.nodes[parent.0].children.push(id);
        }
    }

    fn finish(mut self) -> MarkupTree {
        self.flush_text();
        self.tree
    }
}

fn decode_name(raw: &[u8], position: usize) -> ContentParseResult<String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| ContentParseError::Io(format!("invalid UTF-8 in name at byte {}: {}", position, e)))
}

fn with_position(err: ContentParseError, position: usize) -> ContentParseError {
    match err {
        ContentParseError::MalformedInput { message, .. } => ContentParseError::MalformedInput { position, message },
        other => other,
    }
}
