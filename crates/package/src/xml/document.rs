use super::element::{XmlElement, XmlNode};

/// Index of a node inside one [`XmlDocument`] arena.
///
/// Ids are only meaningful for the document that issued them. Detached nodes
/// keep their slot, so an id never starts pointing at a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// The synthetic node owning the document element and any prolog items.
    Document,
    Element {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An XML document stored as an arena of nodes with explicit parent/child links.
///
/// Structural edits (`insert_before`, `append_child`, `detach`) only touch the
/// link vectors of the nodes involved.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    nodes: Vec<Node>,
    root: NodeId,
    pub(crate) has_declaration: bool,
}

impl XmlDocument {
    const DOCUMENT: NodeId = NodeId(0);

    pub(crate) fn empty() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
            root: Self::DOCUMENT,
            has_declaration: true,
        }
    }

    /// Builds a document whose root element is `root`.
    pub fn from_element(root: &XmlElement) -> Self {
        let mut doc = Self::empty();
        let id = doc.import(root);
        doc.append_child(Self::DOCUMENT, id);
        doc.root = id;
        doc
    }

    pub(crate) fn document_node(&self) -> NodeId {
        Self::DOCUMENT
    }

    pub(crate) fn set_root(&mut self, id: NodeId) {
        self.root = id;
    }

    /// The document element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId, name: &str) -> bool {
        self.name(id) == Some(name)
    }

    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        match &self.nodes[id.0].data {
            NodeData::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Sets or replaces an attribute. No-op on non-element nodes.
    pub fn set_attribute(&mut self, id: NodeId, key: &str, value: impl Into<String>) {
        if let NodeData::Element { attributes, .. } = &mut self.nodes[id.0].data {
            let value = value.into();
            match attributes.iter_mut().find(|(k, _)| k == key) {
                Some(slot) => slot.1 = value,
                None => attributes.push((key.to_string(), value)),
            }
        }
    }

    /// Text of a text or CDATA node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Text(t) | NodeData::CData(t) => Some(t),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Direct element children with the given qualified name.
    pub fn child_elements<'a>(&'a self, id: NodeId, name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id)
            .iter()
            .copied()
            .filter(move |c| self.is_element(*c, name))
    }

    pub fn first_child_element(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.child_elements(id, name).next()
    }

    /// All attached descendants of `id` in document order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Descendant elements with the given qualified name, in document order.
    pub fn descendants_named(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|d| self.is_element(*d, name))
            .collect()
    }

    /// Concatenated text of every text/CDATA descendant.
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.text(d))
            .collect()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        self.push(NodeData::Element {
            name: name.into(),
            attributes: Vec::new(),
        })
    }

    pub(crate) fn create_node(&mut self, data: NodeData) -> NodeId {
        self.push(data)
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Text(text.into()))
    }

    /// Removes `id` from its parent. The subtree stays in the arena and can be
    /// re-attached.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
    }

    /// Appends `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Inserts `new` as the preceding sibling of `reference`.
    ///
    /// Returns `false` (and does nothing) when `reference` has no parent.
    pub fn insert_before(&mut self, reference: NodeId, new: NodeId) -> bool {
        let Some(parent) = self.nodes[reference.0].parent else {
            return false;
        };
        self.detach(new);
        let siblings = &mut self.nodes[parent.0].children;
        let pos = siblings.iter().position(|c| *c == reference).unwrap_or(siblings.len());
        siblings.insert(pos, new);
        self.nodes[new.0].parent = Some(parent);
        true
    }

    /// Replaces the children of a text-bearing element with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        for child in self.children(id).to_vec() {
            self.detach(child);
        }
        let t = self.create_text(text);
        self.append_child(id, t);
    }

    /// Copies the subtree rooted at `id` into a new, detached subtree.
    pub fn deep_clone(&mut self, id: NodeId) -> NodeId {
        let copy = self.push(self.nodes[id.0].data.clone());
        for child in self.children(id).to_vec() {
            let child_copy = self.deep_clone(child);
            self.append_child(copy, child_copy);
        }
        copy
    }

    /// Copies an owned element tree into the arena, returning its detached root.
    pub fn import(&mut self, element: &XmlElement) -> NodeId {
        let id = self.push(NodeData::Element {
            name: element.name.clone(),
            attributes: element.attributes.clone(),
        });
        for child in &element.children {
            let child_id = match child {
                XmlNode::Element(e) => self.import(e),
                XmlNode::Text(t) => self.create_text(t.clone()),
            };
            self.append_child(id, child_id);
        }
        id
    }

    /// Largest integer value of `attribute` on any `element` in the document.
    pub fn max_numeric_attribute(&self, element: &str, attribute: &str) -> Option<u64> {
        self.descendants_named(self.document_node(), element)
            .into_iter()
            .filter_map(|id| self.attribute(id, attribute))
            .filter_map(|v| v.parse::<u64>().ok())
            .max()
    }
}
