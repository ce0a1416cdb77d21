// SPDX-License-Identifier: GPL-3.0-only
//! In-memory model of the host page the page-interaction layer edits
//!
//! A [`Page`] is an arena of elements plus the bits of document state the
//! layer reads or writes: which element has focus, any selection in
//! non-editable content, the synthetic events emitted after a mutation and
//! the registered keydown listeners.

use crate::utils::text::{char_len, char_slice};

pub mod locator;
pub mod mutator;


pub use locator::{Position, TargetLocator};
pub use mutator::{MutationError, insert_image_at_cursor, insert_text_at_cursor, replace_selected_text};

/// Index of an element in its [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `<input type="text">`
    Input,
    /// `<textarea>`
    TextArea,
}

/// A plain form field. Selection offsets are character offsets into `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainField {
    pub kind: FieldKind,
    pub value: String,
    pub selection_start: usize,
    pub selection_end: usize,
}

impl PlainField {
    #[must_use]
    pub fn new(kind: FieldKind, value: impl Into<String>) -> Self {
        let value = value.into();
        let end = char_len(&value);
        Self {
            kind,
            value,
            selection_start: end,
            selection_end: end,
        }
    }

    #[must_use]
    pub fn input(value: impl Into<String>) -> Self {
        Self::new(FieldKind::Input, value)
    }

    #[must_use]
    pub fn textarea(value: impl Into<String>) -> Self {
        Self::new(FieldKind::TextArea, value)
    }

    #[must_use]
    pub fn with_caret(self, offset: usize) -> Self {
        self.with_selection(offset, offset)
    }

    #[must_use]
    pub fn with_selection(mut self, start: usize, end: usize) -> Self {
        self.set_selection(start, end);
        self
    }

    /// Select everything.
    #[must_use]
    pub fn select_all(self) -> Self {
        let end = char_len(&self.value);
        self.with_selection(0, end)
    }

    /// Set the selection, clamped to the value and ordered.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = char_len(&self.value);
        let (start, end) = (start.min(len), end.min(len));
        self.selection_start = start.min(end);
        self.selection_end = start.max(end);
    }

    #[must_use]
    pub fn selected(&self) -> &str {
        char_slice(&self.value, self.selection_start, self.selection_end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Image { src: String },
}

impl Node {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Offsets inside the node: characters for text, 0 or 1 for an image.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => char_len(text),
            Self::Image { .. } => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A point inside a rich-text region: `offset` within node `node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Boundary {
    pub node: usize,
    pub offset: usize,
}

impl Boundary {
    #[must_use]
    pub fn new(node: usize, offset: usize) -> Self {
        Self { node, offset }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: Boundary,
    pub end: Boundary,
}

impl TextRange {
    /// Build a range, swapping the ends if they are reversed.
    #[must_use]
    pub fn new(a: Boundary, b: Boundary) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    #[must_use]
    pub fn collapsed(at: Boundary) -> Self {
        Self { start: at, end: at }
    }

    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// A `contenteditable` region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RichText {
    pub nodes: Vec<Node>,
    pub selection: Option<TextRange>,
}

impl RichText {
    #[must_use]
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            selection: None,
        }
    }

    #[must_use]
    pub fn with_selection(mut self, range: TextRange) -> Self {
        self.selection = Some(range);
        self
    }

    /// Concatenated text content; images contribute nothing.
    #[must_use]
    pub fn text(&self) -> String {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Image { .. } => None,
            })
            .collect()
    }

    #[must_use]
    pub fn images(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Image { src } => Some(src.as_str()),
                Node::Text(_) => None,
            })
            .collect()
    }

    /// Clamp a boundary to an existing position.
    #[must_use]
    pub fn clamp(&self, boundary: Boundary) -> Boundary {
        match self.nodes.len() {
            0 => Boundary::new(0, 0),
            n if boundary.node >= n => Boundary::new(n - 1, self.nodes[n - 1].len()),
            _ => Boundary::new(
                boundary.node,
                boundary.offset.min(self.nodes[boundary.node].len()),
            ),
        }
    }

    /// Text covered by `range`.
    #[must_use]
    pub fn range_text(&self, range: &TextRange) -> String {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end);
        let mut out = String::new();
        for (idx, node) in self.nodes.iter().enumerate() {
            if idx < start.node || idx > end.node {
                continue;
            }
            if let Node::Text(text) = node {
                let from = if idx == start.node { start.offset } else { 0 };
                let to = if idx == end.node {
                    end.offset
                } else {
                    char_len(text)
                };
                out.push_str(char_slice(text, from, to));
            }
        }
        out
    }

    /// Split so that `boundary` falls between two nodes. Returns the index
    /// of the first node after it and whether a node was inserted.
    fn split_at(&mut self, boundary: Boundary) -> (usize, bool) {
        if self.nodes.is_empty() {
            return (0, false);
        }
        let boundary = self.clamp(boundary);
        let node_len = self.nodes[boundary.node].len();
        if boundary.offset == 0 {
            return (boundary.node, false);
        }
        if boundary.offset >= node_len {
            return (boundary.node + 1, false);
        }

        // Only text nodes have interior offsets.
        if let Node::Text(text) = &mut self.nodes[boundary.node] {
            let byte = crate::utils::text::byte_index(text, boundary.offset);
            let tail = text.split_off(byte);
            self.nodes.insert(boundary.node + 1, Node::Text(tail));
        }
        (boundary.node + 1, true)
    }

    /// Delete the contents of `range` and return the node index where
    /// content can now be inserted.
    pub fn delete_contents(&mut self, range: &TextRange) -> usize {
        let range = TextRange::new(self.clamp(range.start), self.clamp(range.end));
        let (mut end_idx, _) = self.split_at(range.end);
        let (start_idx, inserted) = self.split_at(range.start);
        if inserted && end_idx > range.start.node {
            end_idx += 1;
        }
        if start_idx < end_idx {
            self.nodes.drain(start_idx..end_idx);
        }
        start_idx
    }

    /// Replace `range` with `node` and collapse the selection right after it.
    pub fn replace_range(&mut self, range: &TextRange, node: Node) {
        let at = self.delete_contents(range);
        let after = Boundary::new(at, node.len());
        self.nodes.insert(at, node);
        self.selection = Some(TextRange::collapsed(after));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    PlainField(PlainField),
    RichText(RichText),
    /// Anything that is neither a form field nor editable.
    Other { tag: String },
}

/// Events the layer emits on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Synthetic `input` event, dispatched after a plain-field mutation
    Input { target: ElementId, bubbles: bool },
}

/// Handle of a registered keydown listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(uuid::Uuid);

#[derive(Debug, Clone)]
struct KeydownListener {
    id: ListenerId,
    key: String,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: Vec<Element>,
    focused: Option<ElementId>,
    /// Text selected outside any editable element
    document_selection: Option<String>,
    events: Vec<DomEvent>,
    keydown_listeners: Vec<KeydownListener>,
}

impl Page {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    /// Add `element` and give it focus.
    pub fn add_focused(&mut self, element: Element) -> ElementId {
        let id = self.add(element);
        self.focus(id);
        id
    }

    pub fn focus(&mut self, id: ElementId) {
        if id.0 < self.elements.len() {
            self.focused = Some(id);
        }
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    #[must_use]
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    #[must_use]
    pub fn plain_field(&self, id: ElementId) -> Option<&PlainField> {
        match self.element(id) {
            Some(Element::PlainField(field)) => Some(field),
            _ => None,
        }
    }

    #[must_use]
    pub fn rich_text(&self, id: ElementId) -> Option<&RichText> {
        match self.element(id) {
            Some(Element::RichText(rich)) => Some(rich),
            _ => None,
        }
    }

    /// Select text in non-editable content.
    pub fn select_document_text(&mut self, text: impl Into<String>) {
        self.document_selection = Some(text.into());
    }

    /// Text of the active selection exactly as selected, empty when nothing is selected.
    #[must_use]
    pub fn raw_selected_text(&self) -> String {
        let from_focus = self.focused.and_then(|id| match self.element(id) {
            Some(Element::PlainField(field)) => Some(field.selected().to_string()),
            Some(Element::RichText(rich)) => {
                rich.selection.as_ref().map(|range| rich.range_text(range))
            }
            _ => None,
        });

        from_focus
            .filter(|text| !text.trim().is_empty())
            .or_else(|| self.document_selection.clone())
            .unwrap_or_default()
    }

    /// Trimmed text of the active selection, empty when nothing is selected.
    #[must_use]
    pub fn selected_text(&self) -> String {
        self.raw_selected_text().trim().to_string()
    }

    pub(crate) fn emit(&mut self, event: DomEvent) {
        self.events.push(event);
    }

    #[must_use]
    pub fn events(&self) -> &[DomEvent] {
        &self.events
    }

    pub fn add_keydown_listener(&mut self, key: &str) -> ListenerId {
        let id = ListenerId(uuid::Uuid::new_v4());
        self.keydown_listeners.push(KeydownListener {
            id,
            key: key.to_string(),
        });
        id
    }

    /// Returns whether the listener was registered.
    pub fn remove_keydown_listener(&mut self, id: ListenerId) -> bool {
        let before = self.keydown_listeners.len();
        self.keydown_listeners.retain(|listener| listener.id != id);
        before != self.keydown_listeners.len()
    }

    #[must_use]
    pub fn keydown_listener_count(&self) -> usize {
        self.keydown_listeners.len()
    }

    /// Listeners that fire for `key`.
    #[must_use]
    pub fn keydown_targets(&self, key: &str) -> Vec<ListenerId> {
        self.keydown_listeners
            .iter()
            .filter(|listener| listener.key == key)
            .map(|listener| listener.id)
            .collect()
    }
}
