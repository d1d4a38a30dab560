//! Light DOM model of a header's children, and the mutation records it emits

use crate::layout::StyleId;
use crate::style::Style;
use std::fmt;

/// Child node identifier, unique within one header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered attribute list (insertion order preserved, names unique)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set an attribute, returning the previous value
    pub fn set(&mut self, name: &str, value: &str) -> Option<String> {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => Some(std::mem::replace(v, value.to_string())),
            None => {
                self.entries.push((name.to_string(), value.to_string()));
                None
            }
        }
    }

    /// Remove an attribute, returning its value if it was present
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whitespace-separated tokens of the `class` attribute
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }
}

/// Kind of user control placed beside the title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Button,
    Link,
}

/// Per-title state: flattened text, applied inline style, last fit
#[derive(Debug, Clone, Default)]
pub struct TitleState {
    spans: Vec<String>,
    pub(crate) style: Style,
    pub(crate) last_fit: Option<StyleId>,
}

impl TitleState {
    pub fn new(text: &str) -> Self {
        TitleState {
            spans: vec![text.to_string()],
            ..Self::default()
        }
    }

    /// Flattened text of all spans
    pub fn text_content(&self) -> String {
        self.spans.concat()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub(crate) fn set_text(&mut self, text: &str) {
        self.spans = vec![text.to_string()];
    }

    pub(crate) fn push_span(&mut self, text: &str) {
        self.spans.push(text.to_string());
    }

    pub(crate) fn remove_span(&mut self, index: usize) -> Option<String> {
        (index < self.spans.len()).then(|| self.spans.remove(index))
    }

    pub fn span_count(&self) -> usize {
        self.spans.len()
    }
}

/// What a child node is
#[derive(Debug, Clone)]
pub enum ChildKind {
    Title(TitleState),
    Control(ControlKind),
    /// Anything else (spans, icons); never reserves title space
    Other(String),
}

/// One child of the header
#[derive(Debug, Clone)]
pub struct ChildNode {
    pub(crate) id: NodeId,
    pub(crate) kind: ChildKind,
    pub(crate) attributes: Attributes,
}

impl ChildNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &ChildKind {
        &self.kind
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn title(&self) -> Option<&TitleState> {
        match &self.kind {
            ChildKind::Title(t) => Some(t),
            _ => None,
        }
    }

    pub(crate) fn title_mut(&mut self) -> Option<&mut TitleState> {
        match &mut self.kind {
            ChildKind::Title(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_title(&self) -> bool {
        matches!(self.kind, ChildKind::Title(_))
    }

    /// Hidden via the `hidden` attribute or the `hidden` class
    pub fn is_hidden(&self) -> bool {
        self.attributes.has("hidden") || self.attributes.has_class("hidden")
    }

    /// Whether this child takes horizontal space away from the title
    ///
    /// Every visible sibling of the titles does, unless it is marked
    /// `l10n-action`.
    pub fn reserves_space(&self) -> bool {
        !self.is_title()
            && !self.is_hidden()
            && !self.attributes.has("l10n-action")
    }
}

/// Where a mutation happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationTarget {
    /// The header element itself
    Host,
    Child(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationType {
    Attributes,
    CharacterData,
    ChildList,
}

/// Mutation record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub mutation_type: MutationType,
    pub target: MutationTarget,
    pub added_nodes: Vec<NodeId>,
    pub removed_nodes: Vec<NodeId>,
    pub attribute_name: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl MutationRecord {
    pub fn attribute(
        target: MutationTarget,
        name: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        MutationRecord {
            mutation_type: MutationType::Attributes,
            target,
            added_nodes: Vec::new(),
            removed_nodes: Vec::new(),
            attribute_name: Some(name.to_string()),
            old_value,
            new_value,
        }
    }

    /// Title text change; values are the flattened text before and after
    pub fn character_data(target: NodeId, old_text: String, new_text: String) -> Self {
        MutationRecord {
            mutation_type: MutationType::CharacterData,
            target: MutationTarget::Child(target),
            added_nodes: Vec::new(),
            removed_nodes: Vec::new(),
            attribute_name: None,
            old_value: Some(old_text),
            new_value: Some(new_text),
        }
    }

    pub fn child_list(added: Vec<NodeId>, removed: Vec<NodeId>) -> Self {
        MutationRecord {
            mutation_type: MutationType::ChildList,
            target: MutationTarget::Host,
            added_nodes: added,
            removed_nodes: removed,
            attribute_name: None,
            old_value: None,
            new_value: None,
        }
    }

    /// Whether the value actually changed (attribute and text records)
    pub fn value_changed(&self) -> bool {
        self.old_value != self.new_value
    }
}
