//! Change observer - narrows mutations down to the ones that move the title
//!
//! Records queue up while observing and are delivered at the next turn
//! boundary, like DOM mutation observers. Records arriving while
//! disconnected are dropped.

use crate::config::{
    coerce_flag, ATTR_ACTION, ATTR_DIR, ATTR_NOT_FLUSH, ATTR_NO_FONT_FIT, ATTR_TITLE_END,
    ATTR_TITLE_START,
};
use crate::dom::{MutationRecord, MutationTarget, MutationType};

/// Child attributes that change whether a control takes space
const CHILD_LAYOUT_ATTRIBUTES: &[&str] = &["hidden", "class", "l10n-action"];

/// Whether a mutation record should schedule a fit
pub fn triggers_fit(record: &MutationRecord) -> bool {
    match record.mutation_type {
        MutationType::ChildList => true,
        MutationType::CharacterData => record.value_changed(),
        MutationType::Attributes => {
            let Some(name) = record.attribute_name.as_deref() else {
                return false;
            };
            match record.target {
                MutationTarget::Host => host_attribute_triggers(name, record),
                MutationTarget::Child(_) => {
                    CHILD_LAYOUT_ATTRIBUTES.contains(&name) && record.value_changed()
                }
            }
        }
    }
}

fn host_attribute_triggers(name: &str, record: &MutationRecord) -> bool {
    let old = record.old_value.as_deref();
    let new = record.new_value.as_deref();
    match name {
        ATTR_ACTION | ATTR_TITLE_START | ATTR_TITLE_END | ATTR_DIR => old != new,
        ATTR_NOT_FLUSH => coerce_flag(old) != coerce_flag(new),
        // Only turning font-fit back on needs a run
        ATTR_NO_FONT_FIT => coerce_flag(old) && !coerce_flag(new),
        _ => false,
    }
}

/// Mutation and resize observer for one header
#[derive(Debug, Default)]
pub struct ChangeObserver {
    observing: bool,
    queue: Vec<MutationRecord>,
    last_viewport: Option<u32>,
}

impl ChangeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing. Calling it again has no effect.
    pub fn observe(&mut self) {
        if !self.observing {
            tracing::debug!("observer connected");
            self.observing = true;
        }
    }

    /// Stop observing and drop queued records. Calling it again has no effect.
    pub fn disconnect(&mut self) {
        if self.observing {
            tracing::debug!(dropped = self.queue.len(), "observer disconnected");
            self.observing = false;
            self.queue.clear();
        }
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Queue a record for delivery at the next turn boundary
    pub fn record(&mut self, record: MutationRecord) {
        if self.observing {
            self.queue.push(record);
        }
    }

    pub fn pending_records(&self) -> usize {
        self.queue.len()
    }

    /// Deliver queued records; returns how many of them call for a fit
    pub fn take_triggers(&mut self) -> usize {
        let records = std::mem::take(&mut self.queue);
        let relevant = records.iter().filter(|r| triggers_fit(r)).count();
        if !records.is_empty() {
            tracing::debug!(records = records.len(), relevant, "mutations delivered");
        }
        relevant
    }

    /// Remember the viewport width a fit was computed against
    pub fn note_viewport(&mut self, width: u32) {
        self.last_viewport = Some(width);
    }

    /// Viewport resize notification; returns whether a fit is needed
    ///
    /// In flush mode only a width that differs from the cached one counts.
    /// Otherwise the element box may have followed the viewport, so every
    /// resize asks for a fit and the unchanged-input check absorbs the rest.
    pub fn viewport_resized(&mut self, width: u32, flush: bool) -> bool {
        let changed = self.last_viewport != Some(width);
        self.last_viewport = Some(width);
        if !self.observing {
            return false;
        }
        !flush || changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeId;

    fn host_attr(name: &str, old: Option<&str>, new: Option<&str>) -> MutationRecord {
        MutationRecord::attribute(
            MutationTarget::Host,
            name,
            old.map(str::to_string),
            new.map(str::to_string),
        )
    }

    fn child_attr(name: &str, old: Option<&str>, new: Option<&str>) -> MutationRecord {
        MutationRecord::attribute(
            MutationTarget::Child(NodeId(1)),
            name,
            old.map(str::to_string),
            new.map(str::to_string),
        )
    }

    #[test]
    fn test_host_attribute_triggers() {
        assert!(triggers_fit(&host_attr("action", None, Some("back"))));
        assert!(triggers_fit(&host_attr("action", Some("back"), None)));
        assert!(!triggers_fit(&host_attr("action", Some("back"), Some("back"))));
        assert!(triggers_fit(&host_attr("title-start", Some("50"), Some("0"))));
        assert!(triggers_fit(&host_attr("title-end", None, Some("100"))));
        assert!(triggers_fit(&host_attr("dir", None, Some("rtl"))));
        assert!(!triggers_fit(&host_attr("id", None, Some("header"))));
        assert!(!triggers_fit(&host_attr("style", None, Some("color: red"))));
    }

    #[test]
    fn test_not_flush_follows_presence() {
        assert!(triggers_fit(&host_attr("not-flush", None, Some(""))));
        assert!(!triggers_fit(&host_attr("not-flush", Some(""), Some("yes"))));
        assert!(triggers_fit(&host_attr("not-flush", Some(""), Some("false"))));
    }

    #[test]
    fn test_no_font_fit_only_when_turned_off() {
        assert!(!triggers_fit(&host_attr("no-font-fit", None, Some(""))));
        assert!(triggers_fit(&host_attr("no-font-fit", Some(""), None)));
        assert!(triggers_fit(&host_attr("no-font-fit", Some("true"), Some("false"))));
        assert!(!triggers_fit(&host_attr("no-font-fit", None, Some("false"))));
    }

    #[test]
    fn test_child_records() {
        assert!(triggers_fit(&child_attr("hidden", None, Some(""))));
        assert!(triggers_fit(&child_attr("class", Some("a"), Some("a hidden"))));
        assert!(triggers_fit(&child_attr("l10n-action", None, Some(""))));
        assert!(!triggers_fit(&child_attr("class", Some("a"), Some("a"))));
        assert!(!triggers_fit(&child_attr("style", None, Some("font-size: 16px;"))));
        assert!(!triggers_fit(&child_attr("data-l10n-id", None, Some("x"))));

        let text = MutationRecord::character_data(NodeId(2), "a".into(), "b".into());
        assert!(triggers_fit(&text));
        let same = MutationRecord::character_data(NodeId(2), "a".into(), "a".into());
        assert!(!triggers_fit(&same));

        assert!(triggers_fit(&MutationRecord::child_list(vec![NodeId(3)], vec![])));
    }

    #[test]
    fn test_records_only_queue_while_observing() {
        let mut observer = ChangeObserver::new();
        observer.record(host_attr("action", None, Some("back")));
        assert_eq!(observer.pending_records(), 0);

        observer.observe();
        observer.observe();
        observer.record(host_attr("action", None, Some("back")));
        observer.record(host_attr("id", None, Some("x")));
        assert_eq!(observer.take_triggers(), 1);
        assert_eq!(observer.take_triggers(), 0);

        observer.record(host_attr("action", None, Some("menu")));
        observer.disconnect();
        observer.disconnect();
        assert_eq!(observer.pending_records(), 0);
        assert!(!observer.is_observing());
    }

    #[test]
    fn test_resize_in_flush_mode_needs_a_new_width() {
        let mut observer = ChangeObserver::new();
        observer.observe();
        observer.note_viewport(320);

        assert!(!observer.viewport_resized(320, true));
        assert!(observer.viewport_resized(480, true));
        assert!(!observer.viewport_resized(480, true));
    }

    #[test]
    fn test_resize_outside_flush_mode_always_asks() {
        let mut observer = ChangeObserver::new();
        observer.observe();
        observer.note_viewport(320);
        assert!(observer.viewport_resized(320, false));
    }

    #[test]
    fn test_resize_while_disconnected_is_ignored() {
        let mut observer = ChangeObserver::new();
        assert!(!observer.viewport_resized(480, true));
        observer.observe();
        assert!(!observer.viewport_resized(480, true));
    }
}
