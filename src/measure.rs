//! Measurement oracle - font-fit for title text
//!
//! The layout calculator never measures text itself. It asks a [`Measure`]
//! implementation for the largest font size (between a floor and a ceiling)
//! at which a string fits a width budget. [`FontFit`] is the built-in
//! implementation, based on Unicode display widths; hosts with a real text
//! shaper plug in their own.

use crate::error::MeasureError;
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

/// Font description passed through to the oracle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    pub weight: u16,
    pub italic: bool,
}

impl FontSpec {
    pub fn new(family: impl Into<String>) -> Self {
        FontSpec {
            family: family.into(),
            weight: 400,
            italic: false,
        }
    }

    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// CSS `font` shorthand at a given size
    pub fn to_css(&self, size: f32) -> String {
        let style = if self.italic { "italic " } else { "" };
        format!("{}{} {}px {}", style, self.weight, size, self.family)
    }
}

/// Font size bounds for one fit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub min_font_size: f32,
    pub max_font_size: f32,
}

/// Outcome of one fit: chosen size and the width the text renders at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub font_size: f32,
    pub text_width: f32,
}

impl FitResult {
    /// Whether the text fits a budget at the chosen size
    pub fn fits(&self, max_width: f32) -> bool {
        self.text_width <= max_width
    }
}

/// Text measurement oracle
///
/// Must be deterministic and free of side effects visible to the caller.
/// Implementations take `&self` so one oracle can serve many headers.
pub trait Measure {
    /// Largest size in `options` at which `text` fits `max_width`, or the
    /// minimum size (with its overflowing width) when nothing fits
    fn measure(
        &self,
        text: &str,
        font: &FontSpec,
        max_width: f32,
        options: &FitOptions,
    ) -> Result<FitResult, MeasureError>;
}

impl<M: Measure + ?Sized> Measure for &M {
    fn measure(
        &self,
        text: &str,
        font: &FontSpec,
        max_width: f32,
        options: &FitOptions,
    ) -> Result<FitResult, MeasureError> {
        (**self).measure(text, font, max_width, options)
    }
}

impl<M: Measure + ?Sized> Measure for Rc<M> {
    fn measure(
        &self,
        text: &str,
        font: &FontSpec,
        max_width: f32,
        options: &FitOptions,
    ) -> Result<FitResult, MeasureError> {
        (**self).measure(text, font, max_width, options)
    }
}

impl<M: Measure + ?Sized> Measure for Box<M> {
    fn measure(
        &self,
        text: &str,
        font: &FontSpec,
        max_width: f32,
        options: &FitOptions,
    ) -> Result<FitResult, MeasureError> {
        (**self).measure(text, font, max_width, options)
    }
}

/// Default advance of a single-cell glyph, in em
const DEFAULT_EM_PER_CELL: f32 = 0.5;

/// Bold faces run wider
const BOLD_FACTOR: f32 = 1.1;

/// Built-in font-fit based on Unicode display widths
///
/// Every narrow glyph advances `em_per_cell` em, wide (CJK, emoji) glyphs
/// twice that. Sizes are searched in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontFit {
    em_per_cell: f32,
}

impl FontFit {
    pub fn new() -> Self {
        FontFit {
            em_per_cell: DEFAULT_EM_PER_CELL,
        }
    }

    /// Override the per-cell advance (in em)
    pub fn with_advance(em_per_cell: f32) -> Self {
        FontFit { em_per_cell }
    }

    /// Rendered width of `text` at `size`
    pub fn text_width(&self, text: &str, font: &FontSpec, size: f32) -> f32 {
        let cells = UnicodeWidthStr::width(text) as f32;
        let factor = if font.weight >= 600 { BOLD_FACTOR } else { 1.0 };
        cells * size * self.em_per_cell * factor
    }
}

impl Default for FontFit {
    fn default() -> Self {
        Self::new()
    }
}

impl Measure for FontFit {
    fn measure(
        &self,
        text: &str,
        font: &FontSpec,
        max_width: f32,
        options: &FitOptions,
    ) -> Result<FitResult, MeasureError> {
        if font.family.trim().is_empty() {
            return Err(MeasureError::FontUnavailable {
                family: font.family.clone(),
            });
        }
        if !max_width.is_finite() || max_width < 0.0 {
            return Err(MeasureError::InvalidBudget(max_width));
        }
        let (min, max) = (options.min_font_size, options.max_font_size);
        if !(min > 0.0 && min <= max) {
            return Err(MeasureError::InvalidRange { min, max });
        }

        // Largest whole-pixel size in [min, max] that fits
        let mut lo = min.ceil() as u32;
        let mut hi = max.floor() as u32;
        let mut best = None;
        while lo <= hi {
            let mid = lo + (hi - lo) / 2;
            if self.text_width(text, font, mid as f32) <= max_width {
                best = Some(mid as f32);
                lo = mid + 1;
            } else if mid == 0 {
                break;
            } else {
                hi = mid - 1;
            }
        }

        let font_size = best.unwrap_or(min);
        tracing::trace!(text, font = %font.to_css(font_size), max_width, "font-fit");

        Ok(FitResult {
            font_size,
            text_width: self.text_width(text, font, font_size),
        })
    }
}
