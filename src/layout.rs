//! Title layout - font-fit and centering decisions
//!
//! Everything here is a pure function of its inputs plus the [`Measure`]
//! oracle. The header gathers the inputs (text, reserved space, available
//! width), asks [`fit_title`] for a decision and applies the result as an
//! inline [`Style`].
//!
//! Placement rules:
//!
//! - **Centered**: the title is measured against
//!   `available - 2 * max(start, end)`. If it fits at a size no smaller than
//!   the centered minimum, it is centered on the full width by shifting its
//!   box by `end - start`.
//! - **Edge-anchored**: otherwise the title fills the space between the
//!   controls, with a padding on each side that has no control, and shrinks
//!   down to the absolute minimum.

use crate::config::FitSettings;
use crate::dom::{ChildNode, NodeId};
use crate::error::MeasureError;
use crate::measure::{FitOptions, Measure};
use crate::style::Style;

/// Horizontal space taken by controls at the title's start and end edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TitleSpace {
    pub start: u32,
    pub end: u32,
}

impl TitleSpace {
    pub fn new(start: u32, end: u32) -> Self {
        TitleSpace { start, end }
    }

    /// The wider of the two sides
    pub fn widest(&self) -> u32 {
        self.start.max(self.end)
    }
}

/// Identity of a fit: when it matches the last applied one, nothing changed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleId {
    pub text: String,
    pub start: u32,
    pub end: u32,
    pub available_width: u32,
}

/// Everything a single title fit depends on
#[derive(Debug, Clone, Copy)]
pub struct FitInput<'a> {
    pub text: &'a str,
    pub space: TitleSpace,
    pub available_width: u32,
}

impl FitInput<'_> {
    pub fn style_id(&self) -> StyleId {
        StyleId {
            text: self.text.to_string(),
            start: self.space.start,
            end: self.space.end,
            available_width: self.available_width,
        }
    }
}

/// Why a fit left the title untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty or whitespace-only text
    EmptyTitle,
    /// Same inputs as the last applied fit
    Unchanged,
}

/// Outcome of [`fit_title`]
#[derive(Debug, Clone, PartialEq)]
pub enum FitDecision {
    Skip(SkipReason),
    Apply(LayoutResult),
}

/// Computed placement of one title
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutResult {
    pub font_size: f32,
    /// Logical start margin; negative shifts the title toward its start edge
    pub margin_start: i32,
    pub padding_start: u32,
    pub padding_end: u32,
    /// Text still wider than its budget at the minimum size
    pub overflowing: bool,
    pub centered: bool,
}

impl LayoutResult {
    /// Inline style carrying this placement
    pub fn to_style(&self) -> Style {
        Style::new()
            .font_size(self.font_size)
            .margin_inline_start(self.margin_start)
            .padding_inline_start(self.padding_start)
            .padding_inline_end(self.padding_end)
    }
}

/// Decide how a title should be laid out
///
/// `previous` is the [`StyleId`] of the last fit applied to this title.
pub fn fit_title<M: Measure + ?Sized>(
    measure: &M,
    settings: &FitSettings,
    input: &FitInput<'_>,
    previous: Option<&StyleId>,
) -> Result<FitDecision, MeasureError> {
    if input.text.trim().is_empty() {
        tracing::debug!("no text");
        return Ok(FitDecision::Skip(SkipReason::EmptyTitle));
    }

    if previous.is_some_and(|id| *id == input.style_id()) {
        tracing::debug!(text = input.text, "no change");
        return Ok(FitDecision::Skip(SkipReason::Unchanged));
    }

    if let Some(result) = centered(measure, settings, input)? {
        return Ok(FitDecision::Apply(result));
    }

    edge_anchored(measure, settings, input).map(FitDecision::Apply)
}

fn centered<M: Measure + ?Sized>(
    measure: &M,
    settings: &FitSettings,
    input: &FitInput<'_>,
) -> Result<Option<LayoutResult>, MeasureError> {
    let space = input.space;
    let budget = i64::from(input.available_width) - 2 * i64::from(space.widest());
    if budget <= 0 {
        return Ok(None);
    }
    let budget = budget as f32;

    let options = FitOptions {
        min_font_size: settings.min_font_size_centered,
        max_font_size: settings.max_font_size,
    };
    let fit = measure.measure(input.text, &settings.font, budget, &options)?;
    if !fit.fits(budget) {
        return Ok(None);
    }

    Ok(Some(LayoutResult {
        font_size: fit.font_size,
        margin_start: signed(space.end) - signed(space.start),
        padding_start: 0,
        padding_end: 0,
        overflowing: false,
        centered: true,
    }))
}

fn edge_anchored<M: Measure + ?Sized>(
    measure: &M,
    settings: &FitSettings,
    input: &FitInput<'_>,
) -> Result<LayoutResult, MeasureError> {
    let space = input.space;
    let padding_start = if space.start == 0 { settings.title_padding } else { 0 };
    let padding_end = if space.end == 0 { settings.title_padding } else { 0 };

    let budget = input
        .available_width
        .saturating_sub(space.start)
        .saturating_sub(space.end)
        .saturating_sub(padding_start)
        .saturating_sub(padding_end) as f32;

    let options = FitOptions {
        min_font_size: settings.min_font_size,
        max_font_size: settings.max_font_size,
    };
    let fit = measure.measure(input.text, &settings.font, budget, &options)?;

    Ok(LayoutResult {
        font_size: fit.font_size,
        margin_start: 0,
        padding_start,
        padding_end,
        overflowing: !fit.fits(budget),
        centered: false,
    })
}

fn signed(px: u32) -> i32 {
    i32::try_from(px).unwrap_or(i32::MAX)
}

/// Compute the space reserved on each side of the first title
///
/// Siblings before the first title count toward `start` (after the action
/// button, when shown), siblings after it toward `end`. Without a title every
/// sibling counts toward `end`. Hidden and `l10n-action` siblings take no
/// space. An override replaces its side and `control_width` is never called
/// for that side.
pub fn compute_title_space<F>(
    children: &[ChildNode],
    action_visible: bool,
    start_override: Option<u32>,
    end_override: Option<u32>,
    settings: &FitSettings,
    mut control_width: F,
) -> anyhow::Result<TitleSpace>
where
    F: FnMut(NodeId) -> anyhow::Result<u32>,
{
    let split = children
        .iter()
        .position(ChildNode::is_title)
        .unwrap_or(0);
    let (before, after) = children.split_at(split);

    let start = match start_override {
        Some(px) => px,
        None => {
            let action = if action_visible { settings.action_button_width } else { 0 };
            action.saturating_add(reserved_width(before, &mut control_width)?)
        }
    };

    let end = match end_override {
        Some(px) => px,
        None => reserved_width(after, &mut control_width)?,
    };

    Ok(TitleSpace { start, end })
}

fn reserved_width<F>(children: &[ChildNode], control_width: &mut F) -> anyhow::Result<u32>
where
    F: FnMut(NodeId) -> anyhow::Result<u32>,
{
    let mut total = 0u32;
    for child in children.iter().filter(|c| c.reserves_space()) {
        total = total.saturating_add(control_width(child.id())?);
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Attributes, ChildKind, ControlKind, TitleState};
    use crate::measure::{FitResult, FontFit, FontSpec};
    use std::cell::Cell;

    /// Counts oracle calls and forwards to the built-in font-fit
    struct Counting {
        calls: Cell<usize>,
        inner: FontFit,
    }

    impl Counting {
        fn new() -> Self {
            Counting {
                calls: Cell::new(0),
                inner: FontFit::new(),
            }
        }
    }

    impl Measure for Counting {
        fn measure(
            &self,
            text: &str,
            font: &FontSpec,
            max_width: f32,
            options: &FitOptions,
        ) -> Result<FitResult, MeasureError> {
            self.calls.set(self.calls.get() + 1);
            self.inner.measure(text, font, max_width, options)
        }
    }

    fn input(text: &str, start: u32, end: u32, width: u32) -> FitInput<'_> {
        FitInput {
            text,
            space: TitleSpace::new(start, end),
            available_width: width,
        }
    }

    fn apply(decision: FitDecision) -> LayoutResult {
        match decision {
            FitDecision::Apply(result) => result,
            other => panic!("expected a layout, got {:?}", other),
        }
    }

    fn node(id: u32, kind: ChildKind) -> ChildNode {
        ChildNode {
            id: NodeId(id),
            kind,
            attributes: Attributes::new(),
        }
    }

    fn button(id: u32) -> ChildNode {
        node(id, ChildKind::Control(ControlKind::Button))
    }

    fn title(id: u32) -> ChildNode {
        node(id, ChildKind::Title(TitleState::new("Title")))
    }

    #[test]
    fn test_symmetric_space_centers_exactly() {
        let settings = FitSettings::default();
        let result = apply(fit_title(&FontFit::new(), &settings, &input("Title", 50, 50, 500), None).unwrap());
        assert_eq!(result.margin_start, 0);
        assert_eq!(result.font_size, 23.0);
        assert!(result.centered);
    }

    #[test]
    fn test_action_only_shifts_toward_start() {
        let settings = FitSettings::default();
        let result = apply(fit_title(&FontFit::new(), &settings, &input("Title", 50, 0, 500), None).unwrap());
        assert_eq!(result.margin_start, -50);
        assert_eq!(result.font_size, 23.0);
        assert_eq!((result.padding_start, result.padding_end), (0, 0));
    }

    #[test]
    fn test_trailing_only_shifts_toward_end() {
        let settings = FitSettings::default();
        let result = apply(fit_title(&FontFit::new(), &settings, &input("Title", 0, 50, 500), None).unwrap());
        assert_eq!(result.margin_start, 50);
    }

    #[test]
    fn test_long_title_is_edge_anchored() {
        let settings = FitSettings::default();
        let text = "A very long title that cannot possibly be centered in this header";
        let result = apply(fit_title(&FontFit::new(), &settings, &input(text, 50, 0, 320), None).unwrap());

        assert!(!result.centered);
        assert_eq!(result.margin_start, 0);
        assert_eq!(result.padding_start, 0);
        assert_eq!(result.padding_end, 10);
        assert_eq!(result.font_size, 16.0);
        assert!(result.overflowing);
    }

    #[test]
    fn test_edge_budget_excludes_paddings() {
        // 12 cells at 0.5em: 6px of width per font px
        let settings = FitSettings::default();
        let result = apply(fit_title(&FontFit::new(), &settings, &input("abcdefghijkl", 0, 0, 200), None).unwrap());
        assert!(result.centered);

        // Wide controls force the edge path: centered budget 300 - 2 * 140 = 20
        let result = apply(fit_title(&FontFit::new(), &settings, &input("abcdefghijkl", 0, 140, 300), None).unwrap());
        assert!(!result.centered);
        assert_eq!(result.padding_start, 10);
        assert_eq!(result.padding_end, 0);
        // 300 - 140 - 10 = 150 -> 150 / 6 = 25 -> capped at 23
        assert_eq!(result.font_size, 23.0);
        assert!(!result.overflowing);
    }

    #[test]
    fn test_no_space_at_all_uses_floor() {
        let settings = FitSettings::default();
        let result = apply(fit_title(&FontFit::new(), &settings, &input("Title", 0, 0, 0), None).unwrap());
        assert_eq!(result.font_size, 16.0);
        assert!(result.overflowing);
        assert_eq!((result.padding_start, result.padding_end), (10, 10));
    }

    #[test]
    fn test_whitespace_title_never_measures() {
        let oracle = Counting::new();
        let settings = FitSettings::default();
        let decision = fit_title(&oracle, &settings, &input("  \n\t ", 0, 0, 500), None).unwrap();
        assert_eq!(decision, FitDecision::Skip(SkipReason::EmptyTitle));
        assert_eq!(oracle.calls.get(), 0);
    }

    #[test]
    fn test_unchanged_inputs_short_circuit() {
        let oracle = Counting::new();
        let settings = FitSettings::default();
        let fit = input("Title", 50, 0, 500);

        assert!(matches!(fit_title(&oracle, &settings, &fit, None).unwrap(), FitDecision::Apply(_)));
        let calls = oracle.calls.get();

        let previous = fit.style_id();
        let decision = fit_title(&oracle, &settings, &fit, Some(&previous)).unwrap();
        assert_eq!(decision, FitDecision::Skip(SkipReason::Unchanged));
        assert_eq!(oracle.calls.get(), calls);

        // Any field change re-measures
        let wider = input("Title", 50, 0, 600);
        assert!(matches!(fit_title(&oracle, &settings, &wider, Some(&previous)).unwrap(), FitDecision::Apply(_)));
    }

    #[test]
    fn test_oracle_errors_propagate() {
        let settings = FitSettings::default().with_font(FontSpec::new(""));
        let err = fit_title(&FontFit::new(), &settings, &input("Title", 0, 0, 500), None).unwrap_err();
        assert!(matches!(err, MeasureError::FontUnavailable { .. }));
    }

    #[test]
    fn test_to_style() {
        let result = LayoutResult {
            font_size: 16.0,
            margin_start: 0,
            padding_start: 10,
            padding_end: 0,
            overflowing: true,
            centered: false,
        };
        let style = result.to_style();
        assert_eq!(style.font_size_px(), Some(16.0));
        assert_eq!(style.margin_start_px(), Some(0));
        assert_eq!(style.padding_start_px(), Some(10));
        assert_eq!(style.padding_end_px(), Some(0));
    }

    #[test]
    fn test_title_space_from_controls() {
        let settings = FitSettings::default();
        let children = vec![button(1), title(2), button(3), button(4)];
        let space = compute_title_space(&children, true, None, None, &settings, |_| Ok(40)).unwrap();
        assert_eq!(space, TitleSpace::new(90, 80));
    }

    #[test]
    fn test_hidden_controls_take_no_space() {
        let settings = FitSettings::default();
        let mut hidden = button(3);
        hidden.attributes.set("hidden", "");
        let mut l10n = button(4);
        l10n.attributes.set("l10n-action", "");

        let children = vec![title(1), hidden, l10n];
        let mut queried = Vec::new();
        let space = compute_title_space(&children, false, None, None, &settings, |id| {
            queried.push(id);
            Ok(40)
        })
        .unwrap();
        assert_eq!(space, TitleSpace::new(0, 0));
        assert!(queried.is_empty());
    }

    #[test]
    fn test_overrides_skip_geometry() {
        let settings = FitSettings::default();
        let children = vec![button(1), title(2), button(3)];
        let mut calls = 0;
        let space = compute_title_space(&children, true, Some(50), Some(100), &settings, |_| {
            calls += 1;
            Ok(40)
        })
        .unwrap();
        assert_eq!(space, TitleSpace::new(50, 100));
        assert_eq!(calls, 0);

        // One override still queries the other side only
        let space = compute_title_space(&children, true, Some(0), None, &settings, |id| {
            assert_eq!(id, NodeId(3));
            Ok(30)
        })
        .unwrap();
        assert_eq!(space, TitleSpace::new(0, 30));
    }

    #[test]
    fn test_without_title_controls_count_as_end() {
        let settings = FitSettings::default();
        let children = vec![button(1), button(2)];
        let space = compute_title_space(&children, true, None, None, &settings, |_| Ok(25)).unwrap();
        assert_eq!(space, TitleSpace::new(50, 50));
    }

    #[test]
    fn test_geometry_failure_propagates() {
        let settings = FitSettings::default();
        let children = vec![title(1), button(2)];
        let result = compute_title_space(&children, false, None, None, &settings, |_| {
            Err(anyhow::anyhow!("no layout box"))
        });
        assert!(result.is_err());
    }
}
