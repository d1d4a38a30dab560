//! The header bar element
//!
//! [`Header`] owns the light-DOM children, the attributes, the lifecycle
//! state, a [`Scheduler`] and a [`ChangeObserver`]. The host drives it:
//!
//! 1. `attach()` / `detach()` when the element enters or leaves a document
//! 2. attribute and child mutations through the methods below
//! 3. `tick()` at every turn boundary, which delivers queued changes and runs
//!    at most one fit
//!
//! ```
//! use headerbar::{DirectionSignal, FitHandle, FixedHost, FontFit, Header};
//! use futures::FutureExt;
//!
//! let document = DirectionSignal::default();
//! let mut header = Header::new(FontFit::new(), FixedHost::new(320), &document);
//! header.set_attribute("action", "back");
//! let title = header.append_title("Inbox");
//!
//! let fit: FitHandle = header.attach();
//! header.tick();
//!
//! let report = fit.now_or_never().unwrap();
//! assert_eq!(report.result_for(title).unwrap().margin_start, -50);
//! ```

use crate::component::{Element, LifecycleState};
use crate::config::{
    coerce_flag, parse_pixels, ActionIcon, ActionType, FitSettings, HeaderConfig, IntoPixels,
    ATTR_ACTION, ATTR_DIR, ATTR_NO_FONT_FIT, ATTR_TITLE_END, ATTR_TITLE_START,
    OBSERVED_ATTRIBUTES,
};
use crate::dom::{
    Attributes, ChildKind, ChildNode, ControlKind, MutationRecord, MutationTarget, NodeId,
    TitleState,
};
use crate::error::HeaderError;
use crate::event::{ActionEvent, ActionListener, Event, EventHandler, MouseButton};
use crate::host::Host;
use crate::i18n::{DirectionSignal, DirectionSubscription, TextDirection};
use crate::layout::{compute_title_space, fit_title, FitDecision, FitInput, StyleId, TitleSpace};
use crate::measure::Measure;
use crate::observer::ChangeObserver;
use crate::scheduler::{FitHandle, FitReport, Scheduler};
use crate::style::{PhysicalStyle, Style};

/// Header bar element
pub struct Header<M: Measure, H: Host> {
    attributes: Attributes,
    children: Vec<ChildNode>,
    next_id: u32,
    lifecycle: LifecycleState,
    scheduler: Scheduler,
    observer: ChangeObserver,
    document_dir: DirectionSignal,
    subscription: Option<DirectionSubscription>,
    listeners: Vec<ActionListener>,
    settings: FitSettings,
    measure: M,
    host: H,
}

impl<M: Measure, H: Host> Header<M, H> {
    /// Create a detached header with default fit settings
    pub fn new(measure: M, host: H, document_dir: &DirectionSignal) -> Self {
        Self::with_settings(measure, host, document_dir, FitSettings::default())
    }

    pub fn with_settings(
        measure: M,
        host: H,
        document_dir: &DirectionSignal,
        settings: FitSettings,
    ) -> Self {
        Header {
            attributes: Attributes::new(),
            children: Vec::new(),
            next_id: 0,
            lifecycle: LifecycleState::Detached,
            scheduler: Scheduler::new(),
            observer: ChangeObserver::new(),
            document_dir: document_dir.clone(),
            subscription: None,
            listeners: Vec::new(),
            settings,
            measure,
            host,
        }
    }

    // Lifecycle

    /// Enter the document: start observing and schedule a fit
    pub fn attach(&mut self) -> FitHandle {
        if !self.lifecycle.is_attached() {
            tracing::debug!("header attached");
            self.lifecycle = LifecycleState::Attached;
            self.scheduler.enable();
            self.observer.observe();
            self.subscription = Some(self.document_dir.subscribe());
        }
        self.scheduler.request()
    }

    /// Leave the document: stop observing and abandon pending fits
    pub fn detach(&mut self) {
        if !self.lifecycle.is_attached() {
            return;
        }
        tracing::debug!("header detached");
        self.lifecycle = LifecycleState::Detached;
        self.observer.disconnect();
        self.scheduler.disable();
        if let Some(sub) = self.subscription.take() {
            self.document_dir.unsubscribe(sub.id());
        }
    }

    pub fn is_attached(&self) -> bool {
        self.lifecycle.is_attached()
    }

    // Attributes

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.has(name)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let old = self.attributes.set(name, value);
        self.host_attribute_written(name, old, Some(value.to_string()));
    }

    pub fn remove_attribute(&mut self, name: &str) {
        if let Some(old) = self.attributes.remove(name) {
            self.host_attribute_written(name, Some(old), None);
        }
    }

    // Unobserved host attributes never move the title
    fn host_attribute_written(&mut self, name: &str, old: Option<String>, new: Option<String>) {
        if OBSERVED_ATTRIBUTES.contains(&name) {
            self.attribute_changed(name, old.as_deref(), new.as_deref());
        }
    }

    /// Current attribute snapshot
    pub fn config(&self) -> HeaderConfig {
        HeaderConfig::from_attributes(&self.attributes, self.document_dir.get())
    }

    // Properties

    pub fn action(&self) -> ActionType {
        ActionType::parse(self.attributes.get(ATTR_ACTION))
    }

    /// Set or clear the action; the attribute is only written when it changes
    pub fn set_action(&mut self, action: Option<&str>) {
        if ActionType::parse(action) == self.action() {
            return;
        }
        match action {
            Some(value) => self.set_attribute(ATTR_ACTION, value),
            None => self.remove_attribute(ATTR_ACTION),
        }
    }

    /// Space reserved before the title: the override, or the computed value
    pub fn title_start(&self) -> u32 {
        let config = self.config();
        match config.title_start {
            Some(px) => px,
            None => self.computed_space(&config, None, Some(0)).start,
        }
    }

    /// Space reserved after the title: the override, or the computed value
    pub fn title_end(&self) -> u32 {
        let config = self.config();
        match config.title_end {
            Some(px) => px,
            None => self.computed_space(&config, Some(0), None).end,
        }
    }

    pub fn set_title_start(&mut self, value: impl IntoPixels) {
        self.set_pixels(ATTR_TITLE_START, value.into_pixels());
    }

    pub fn set_title_end(&mut self, value: impl IntoPixels) {
        self.set_pixels(ATTR_TITLE_END, value.into_pixels());
    }

    fn set_pixels(&mut self, name: &str, px: Option<u32>) {
        let Some(px) = px else {
            tracing::debug!(attribute = name, "ignoring non-numeric value");
            return;
        };
        let current = self.attributes.get(name).and_then(parse_pixels);
        if current != Some(px) {
            self.set_attribute(name, &px.to_string());
        }
    }

    pub fn no_font_fit(&self) -> bool {
        coerce_flag(self.attributes.get(ATTR_NO_FONT_FIT))
    }

    pub fn set_no_font_fit(&mut self, value: bool) {
        if value == self.no_font_fit() {
            return;
        }
        if value {
            self.set_attribute(ATTR_NO_FONT_FIT, "");
        } else {
            self.remove_attribute(ATTR_NO_FONT_FIT);
        }
    }

    /// Effective direction: the element's own `dir`, else the document's
    pub fn direction(&self) -> TextDirection {
        self.attributes
            .get(ATTR_DIR)
            .and_then(TextDirection::from_dir_attr)
            .unwrap_or_else(|| self.document_dir.get())
    }

    // Action button

    /// Whether the action button is shown
    pub fn action_visible(&self) -> bool {
        self.action().is_supported()
    }

    pub fn action_icon(&self) -> ActionIcon {
        self.action().icon(self.direction())
    }

    pub fn add_action_listener(&mut self, listener: impl FnMut(&ActionEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Activate the action button. Does nothing without a supported action.
    pub fn trigger_action(&mut self) -> bool {
        let kind = self.action();
        if !kind.is_supported() {
            return false;
        }
        let event = ActionEvent { kind };
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
        true
    }

    fn action_button_hit(&self, x: u32) -> bool {
        if !self.action_visible() {
            return false;
        }
        let width = self.settings.action_button_width;
        if !self.direction().is_rtl() {
            return x < width;
        }
        match self.host.element_width() {
            Ok(element) => x >= element.saturating_sub(width),
            Err(err) => {
                tracing::warn!(error = %err, "no element width for hit test");
                false
            }
        }
    }

    // Light DOM

    pub fn children(&self) -> &[ChildNode] {
        &self.children
    }

    pub fn child(&self, id: NodeId) -> Option<&ChildNode> {
        self.children.iter().find(|c| c.id == id)
    }

    /// Ids of every title child, in document order
    pub fn titles(&self) -> Vec<NodeId> {
        self.children
            .iter()
            .filter(|c| c.is_title())
            .map(ChildNode::id)
            .collect()
    }

    pub fn append_title(&mut self, text: &str) -> NodeId {
        self.insert_child(self.children.len(), ChildKind::Title(TitleState::new(text)))
    }

    pub fn append_control(&mut self, kind: ControlKind) -> NodeId {
        self.insert_child(self.children.len(), ChildKind::Control(kind))
    }

    pub fn append_other(&mut self, tag: &str) -> NodeId {
        self.insert_child(self.children.len(), ChildKind::Other(tag.to_string()))
    }

    pub fn insert_title(&mut self, index: usize, text: &str) -> NodeId {
        self.insert_child(index, ChildKind::Title(TitleState::new(text)))
    }

    pub fn insert_control(&mut self, index: usize, kind: ControlKind) -> NodeId {
        self.insert_child(index, ChildKind::Control(kind))
    }

    fn insert_child(&mut self, index: usize, kind: ChildKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        let index = index.min(self.children.len());
        self.children.insert(
            index,
            ChildNode {
                id,
                kind,
                attributes: Attributes::new(),
            },
        );
        self.observer
            .record(MutationRecord::child_list(vec![id], Vec::new()));
        id
    }

    pub fn remove_child(&mut self, id: NodeId) -> Result<ChildNode, HeaderError> {
        let pos = self
            .children
            .iter()
            .position(|c| c.id == id)
            .ok_or(HeaderError::UnknownNode(id))?;
        let node = self.children.remove(pos);
        self.observer
            .record(MutationRecord::child_list(Vec::new(), vec![id]));
        Ok(node)
    }

    fn child_mut(&mut self, id: NodeId) -> Result<&mut ChildNode, HeaderError> {
        self.children
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(HeaderError::UnknownNode(id))
    }

    fn edit_title(
        &mut self,
        id: NodeId,
        edit: impl FnOnce(&mut TitleState),
    ) -> Result<(), HeaderError> {
        let title = self
            .child_mut(id)?
            .title_mut()
            .ok_or(HeaderError::NotATitle(id))?;
        let old = title.text_content();
        edit(title);
        let new = title.text_content();
        self.observer
            .record(MutationRecord::character_data(id, old, new));
        Ok(())
    }

    /// Replace a title's content with a single text node
    pub fn set_title_text(&mut self, id: NodeId, text: &str) -> Result<(), HeaderError> {
        self.edit_title(id, |title| title.set_text(text))
    }

    /// Append a nested span to a title
    pub fn append_title_span(&mut self, id: NodeId, text: &str) -> Result<(), HeaderError> {
        self.edit_title(id, |title| title.push_span(text))
    }

    pub fn remove_title_span(&mut self, id: NodeId, index: usize) -> Result<(), HeaderError> {
        self.edit_title(id, |title| {
            title.remove_span(index);
        })
    }

    pub fn set_child_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: &str,
    ) -> Result<(), HeaderError> {
        let old = self.child_mut(id)?.attributes.set(name, value);
        self.observer.record(MutationRecord::attribute(
            MutationTarget::Child(id),
            name,
            old,
            Some(value.to_string()),
        ));
        Ok(())
    }

    pub fn remove_child_attribute(&mut self, id: NodeId, name: &str) -> Result<(), HeaderError> {
        if let Some(old) = self.child_mut(id)?.attributes.remove(name) {
            self.observer.record(MutationRecord::attribute(
                MutationTarget::Child(id),
                name,
                Some(old),
                None,
            ));
        }
        Ok(())
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<(), HeaderError> {
        let child = self.child(id).ok_or(HeaderError::UnknownNode(id))?;
        if child.attributes.has_class(class) {
            return Ok(());
        }
        let mut classes: Vec<&str> = child.attributes.classes().collect();
        classes.push(class);
        let value = classes.join(" ");
        self.set_child_attribute(id, "class", &value)
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<(), HeaderError> {
        let child = self.child(id).ok_or(HeaderError::UnknownNode(id))?;
        if !child.attributes.has_class(class) {
            return Ok(());
        }
        let value = child
            .attributes
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_child_attribute(id, "class", &value)
    }

    /// Inline style applied to a title by the last fit
    pub fn title_style(&self, id: NodeId) -> Option<&Style> {
        self.child(id)?.title().map(TitleState::style)
    }

    /// Title style mapped to physical sides for the current direction
    pub fn title_physical_style(&self, id: NodeId) -> Option<PhysicalStyle> {
        self.title_style(id).map(|s| s.resolve(self.direction()))
    }

    // Fitting

    /// Ask for a fit at the next turn boundary
    pub fn run_font_fit(&mut self) -> FitHandle {
        self.scheduler.request()
    }

    /// Viewport resize notification from the host
    ///
    /// The width is read back from the host, so the cached width and the
    /// one the fit runs against always come from the same place.
    pub fn on_viewport_resize(&mut self) {
        if !self.is_attached() {
            return;
        }
        let flush = self.config().flush;
        match self.host.viewport_width() {
            Ok(width) => {
                if self.observer.viewport_resized(width, flush) {
                    self.scheduler.request();
                }
            }
            Err(err) => {
                // The fit reports the failure
                tracing::warn!(error = %err, "no viewport width on resize");
                self.scheduler.request();
            }
        }
    }

    /// Turn boundary: deliver queued changes, then run the pending fit
    ///
    /// Returns the report when a fit ran.
    pub fn tick(&mut self) -> Option<FitReport> {
        if !self.is_attached() {
            return None;
        }

        let direction_changed = self
            .subscription
            .as_ref()
            .and_then(DirectionSubscription::take)
            .is_some();
        // An explicit `dir` pins the element
        if direction_changed && !self.attributes.has(ATTR_DIR) {
            self.scheduler.request();
        }
        if self.observer.take_triggers() > 0 {
            self.scheduler.request();
        }

        let slot = self.scheduler.begin()?;
        let report = self.fit();
        self.scheduler.complete(slot, report.clone());
        Some(report)
    }

    /// Number of fit computations run so far
    pub fn fit_runs(&self) -> usize {
        self.scheduler.runs()
    }

    fn fit(&mut self) -> FitReport {
        let config = self.config();
        if config.no_font_fit {
            tracing::debug!("font-fit disabled");
            return FitReport::suppressed();
        }

        let titles = self.titles();
        if titles.is_empty() {
            return FitReport::default();
        }

        let width = if config.flush {
            self.host.viewport_width()
        } else {
            self.host.element_width()
        };
        let available_width = match width {
            Ok(width) => width,
            Err(err) => {
                tracing::warn!(error = %err, flush = config.flush, "no width for font-fit");
                return FitReport::failed();
            }
        };
        if config.flush {
            self.observer.note_viewport(available_width);
        }

        let space = match compute_title_space(
            &self.children,
            config.action.is_supported(),
            config.title_start,
            config.title_end,
            &self.settings,
            |id| self.host.control_width(id),
        ) {
            Ok(space) => space,
            Err(err) => {
                tracing::warn!(error = %err, "no control geometry for font-fit");
                return FitReport::failed();
            }
        };

        let mut decisions: Vec<(NodeId, FitDecision, StyleId)> = Vec::with_capacity(titles.len());
        for child in self.children.iter().filter(|c| c.is_title()) {
            let Some(title) = child.title() else { continue };
            let text = title.text_content();
            let input = FitInput {
                text: &text,
                space,
                available_width,
            };
            match fit_title(&self.measure, &self.settings, &input, title.last_fit.as_ref()) {
                Ok(decision) => decisions.push((child.id, decision, input.style_id())),
                Err(err) => {
                    tracing::warn!(error = %err, title = %child.id, "font-fit failed");
                    return FitReport::failed();
                }
            }
        }

        let mut report = FitReport::default();
        for (id, decision, style_id) in decisions {
            let Some(title) = self
                .children
                .iter_mut()
                .find(|c| c.id == id)
                .and_then(ChildNode::title_mut)
            else {
                continue;
            };
            match decision {
                FitDecision::Apply(result) => {
                    title.style = result.to_style();
                    title.last_fit = Some(style_id);
                    report.applied.push((id, result));
                }
                FitDecision::Skip(reason) => report.skipped.push((id, reason)),
            }
        }
        report
    }

    fn computed_space(
        &self,
        config: &HeaderConfig,
        start: Option<u32>,
        end: Option<u32>,
    ) -> TitleSpace {
        compute_title_space(
            &self.children,
            config.action.is_supported(),
            start,
            end,
            &self.settings,
            |id| self.host.control_width(id),
        )
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "no control geometry");
            TitleSpace::default()
        })
    }

    // Accessors

    pub fn settings(&self) -> &FitSettings {
        &self.settings
    }

    pub fn measure(&self) -> &M {
        &self.measure
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<M: Measure, H: Host> EventHandler for Header<M, H> {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Resize(..) => {
                self.on_viewport_resize();
                true
            }
            Event::Press(MouseButton::Left, x, _) if self.action_button_hit(*x) => {
                self.trigger_action()
            }
            Event::Escape if matches!(self.action(), ActionType::Back | ActionType::Close) => {
                self.trigger_action()
            }
            _ => false,
        }
    }
}

impl<M: Measure, H: Host> Element for Header<M, H> {
    fn on_mount(&mut self) {
        self.attach();
    }

    fn on_unmount(&mut self) {
        self.detach();
    }

    fn attribute_changed(&mut self, name: &str, old: Option<&str>, new: Option<&str>) {
        tracing::trace!(attribute = name, ?old, ?new, "attribute changed");
        self.observer.record(MutationRecord::attribute(
            MutationTarget::Host,
            name,
            old.map(str::to_string),
            new.map(str::to_string),
        ));
    }

    fn observed_attributes(&self) -> &'static [&'static str] {
        OBSERVED_ATTRIBUTES
    }

    fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    fn name(&self) -> &str {
        "headerbar"
    }
}

impl<M: Measure, H: Host> std::fmt::Debug for Header<M, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Header")
            .field("attributes", &self.attributes)
            .field("children", &self.children.len())
            .field("lifecycle", &self.lifecycle)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FixedHost;
    use crate::measure::FontFit;
    use futures::FutureExt;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn header(width: u32) -> Header<FontFit, FixedHost> {
        Header::new(FontFit::new(), FixedHost::new(width), &DirectionSignal::default())
    }

    #[test]
    fn test_attach_runs_first_fit() {
        let mut h = header(320);
        h.set_attribute("action", "back");
        let title = h.append_title("Title");

        let fit = h.attach();
        assert!(!fit.is_settled());
        let report = h.tick().unwrap();

        assert_eq!(fit.now_or_never(), Some(report.clone()));
        let style = h.title_style(title).unwrap();
        assert_eq!(style.font_size_px(), Some(23.0));
        assert_eq!(style.margin_start_px(), Some(-50));
    }

    #[test]
    fn test_tick_without_work_returns_none() {
        let mut h = header(320);
        h.append_title("Title");
        h.attach();
        assert!(h.tick().is_some());
        assert!(h.tick().is_none());
        assert_eq!(h.fit_runs(), 1);
    }

    #[test]
    fn test_set_action_skips_identical_value() {
        let mut h = header(320);
        h.append_title("Title");
        h.set_action(Some("back"));
        h.attach();
        h.tick();

        h.set_action(Some("back"));
        assert!(h.tick().is_none());

        h.set_action(None);
        assert!(!h.has_attribute("action"));
        assert!(h.tick().is_some());
    }

    #[test]
    fn test_title_span_changes_text() {
        let mut h = header(320);
        let title = h.append_title("Inbox");
        h.attach();
        h.tick();

        h.append_title_span(title, "").unwrap();
        assert!(h.tick().is_none());

        h.append_title_span(title, " (3)").unwrap();
        assert!(h.tick().is_some());
        assert_eq!(h.child(title).unwrap().title().unwrap().text_content(), "Inbox (3)");
    }

    #[test]
    fn test_light_dom_errors() {
        let mut h = header(320);
        let button = h.append_control(ControlKind::Button);
        assert_eq!(h.set_title_text(button, "x"), Err(HeaderError::NotATitle(button)));

        h.remove_child(button).unwrap();
        assert_eq!(
            h.set_child_attribute(button, "hidden", "").unwrap_err(),
            HeaderError::UnknownNode(button)
        );
        assert!(h.remove_child(button).is_err());
    }

    #[test]
    fn test_class_helpers() {
        let mut h = header(320);
        let button = h.append_control(ControlKind::Button);
        h.add_class(button, "icon").unwrap();
        h.add_class(button, "hidden").unwrap();
        h.add_class(button, "hidden").unwrap();
        assert_eq!(h.child(button).unwrap().attributes().get("class"), Some("icon hidden"));

        h.remove_class(button, "icon").unwrap();
        assert_eq!(h.child(button).unwrap().attributes().get("class"), Some("hidden"));
        assert!(h.child(button).unwrap().is_hidden());
    }

    #[test]
    fn test_action_listeners() {
        let mut h = header(320);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        h.add_action_listener(move |e| sink.borrow_mut().push(e.kind.clone()));

        assert!(!h.trigger_action());
        h.set_attribute("action", "unsupported");
        assert!(!h.trigger_action());
        h.set_attribute("action", "menu");
        assert!(h.trigger_action());

        assert_eq!(*seen.borrow(), vec![ActionType::Menu]);
    }

    #[test]
    fn test_input_events() {
        let mut h = header(320);
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        h.add_action_listener(move |_| *sink.borrow_mut() += 1);
        h.set_attribute("action", "back");

        assert!(h.handle_event(&Event::Press(MouseButton::Left, 10, 5)));
        assert!(!h.handle_event(&Event::Press(MouseButton::Right, 10, 5)));
        assert!(!h.handle_event(&Event::Press(MouseButton::Left, 200, 5)));
        assert!(h.handle_event(&Event::Escape));

        h.set_attribute("dir", "rtl");
        assert!(h.handle_event(&Event::Press(MouseButton::Left, 300, 5)));
        assert!(!h.handle_event(&Event::Press(MouseButton::Left, 10, 5)));

        h.set_attribute("action", "menu");
        assert!(!h.handle_event(&Event::Escape));

        assert_eq!(*count.borrow(), 3);
    }

    #[test]
    fn test_element_lifecycle_callbacks() {
        let mut h = header(320);
        h.append_title("Title");
        assert_eq!(h.lifecycle(), LifecycleState::Detached);
        h.on_mount();
        assert!(h.is_attached());
        assert!(h.tick().is_some());
        h.on_unmount();
        assert!(h.tick().is_none());
        assert_eq!(h.observed_attributes(), OBSERVED_ATTRIBUTES);
        assert_eq!(h.name(), "headerbar");
    }

    #[test]
    fn test_attribute_changed_queues_record() {
        let mut h = header(320);
        h.append_title("Title");
        h.attach();
        h.tick();

        h.set_attribute("id", "main");
        assert_eq!(h.observer.pending_records(), 0);

        h.attribute_changed("action", None, Some("back"));
        assert_eq!(h.observer.pending_records(), 1);
        assert!(h.tick().is_some());

        h.set_attribute("action", "close");
        assert_eq!(h.observer.pending_records(), 1);
    }

    #[test]
    fn test_resize_reads_host_width() {
        let mut h = header(320);
        h.append_title("Title");
        h.attach();
        h.tick();

        // The event size is not the host's width
        assert!(h.handle_event(&Event::Resize(120, 40)));
        assert!(h.tick().is_none());
        assert!(h.handle_event(&Event::Resize(120, 40)));
        assert!(h.tick().is_none());
        assert_eq!(h.fit_runs(), 1);
    }
}
