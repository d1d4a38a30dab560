//! Element lifecycle - attach/detach and attribute callbacks

use crate::event::EventHandler;

/// Where an element is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Not in a document; no observation, fits are abandoned
    #[default]
    Detached,
    /// In a document and observing changes
    Attached,
}

impl LifecycleState {
    pub fn is_attached(&self) -> bool {
        matches!(self, LifecycleState::Attached)
    }
}

/// Core lifecycle trait for custom elements
///
/// The host drives these callbacks the way a document drives custom element
/// reactions: `on_mount` when the element is inserted, `on_unmount` when it is
/// removed, and `attribute_changed` for every write to one of
/// [`observed_attributes`](Element::observed_attributes).
pub trait Element: EventHandler {
    /// Called when the element is attached
    fn on_mount(&mut self) {}

    /// Called when the element is detached
    fn on_unmount(&mut self) {}

    /// Called after an observed attribute was written
    fn attribute_changed(&mut self, _name: &str, _old: Option<&str>, _new: Option<&str>) {}

    /// Attribute names that reach `attribute_changed`
    fn observed_attributes(&self) -> &'static [&'static str] {
        &[]
    }

    /// Current lifecycle state
    fn lifecycle(&self) -> LifecycleState;

    /// Get element name for debugging
    fn name(&self) -> &str {
        "Element"
    }
}
