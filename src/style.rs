//! Inline title styles
//!
//! Layout results are written onto a title as logical (inline-start/end)
//! properties. Presentation layers resolve them against a text direction to
//! get physical left/right values.

use crate::i18n::TextDirection;
use std::collections::HashMap;

/// A style property that can be applied to a title
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleProperty {
    /// Font size in pixels
    FontSize(f32),
    /// Logical start margin in pixels, may be negative
    MarginInlineStart(i32),
    /// Logical start padding in pixels
    PaddingInlineStart(u32),
    /// Logical end padding in pixels
    PaddingInlineEnd(u32),
}

impl StyleProperty {
    fn key(&self) -> &'static str {
        match self {
            StyleProperty::FontSize(_) => FONT_SIZE,
            StyleProperty::MarginInlineStart(_) => MARGIN_INLINE_START,
            StyleProperty::PaddingInlineStart(_) => PADDING_INLINE_START,
            StyleProperty::PaddingInlineEnd(_) => PADDING_INLINE_END,
        }
    }

    fn css_value(&self) -> String {
        match self {
            StyleProperty::FontSize(px) => format!("{}px", px),
            StyleProperty::MarginInlineStart(px) => format!("{}px", px),
            StyleProperty::PaddingInlineStart(px) | StyleProperty::PaddingInlineEnd(px) => {
                format!("{}px", px)
            }
        }
    }
}

pub const FONT_SIZE: &str = "font-size";
pub const MARGIN_INLINE_START: &str = "margin-inline-start";
pub const PADDING_INLINE_START: &str = "padding-inline-start";
pub const PADDING_INLINE_END: &str = "padding-inline-end";

/// A collection of style properties
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    properties: HashMap<&'static str, StyleProperty>,
}

impl Style {
    /// Create a new empty style
    pub fn new() -> Self {
        Style {
            properties: HashMap::new(),
        }
    }

    /// Set font size
    pub fn font_size(self, px: f32) -> Self {
        self.with(StyleProperty::FontSize(px))
    }

    /// Set logical start margin
    pub fn margin_inline_start(self, px: i32) -> Self {
        self.with(StyleProperty::MarginInlineStart(px))
    }

    /// Set logical start padding
    pub fn padding_inline_start(self, px: u32) -> Self {
        self.with(StyleProperty::PaddingInlineStart(px))
    }

    /// Set logical end padding
    pub fn padding_inline_end(self, px: u32) -> Self {
        self.with(StyleProperty::PaddingInlineEnd(px))
    }

    fn with(mut self, property: StyleProperty) -> Self {
        self.properties.insert(property.key(), property);
        self
    }

    /// Get a property by key
    pub fn get(&self, key: &str) -> Option<&StyleProperty> {
        self.properties.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn font_size_px(&self) -> Option<f32> {
        match self.get(FONT_SIZE) {
            Some(StyleProperty::FontSize(px)) => Some(*px),
            _ => None,
        }
    }

    pub fn margin_start_px(&self) -> Option<i32> {
        match self.get(MARGIN_INLINE_START) {
            Some(StyleProperty::MarginInlineStart(px)) => Some(*px),
            _ => None,
        }
    }

    pub fn padding_start_px(&self) -> Option<u32> {
        match self.get(PADDING_INLINE_START) {
            Some(StyleProperty::PaddingInlineStart(px)) => Some(*px),
            _ => None,
        }
    }

    pub fn padding_end_px(&self) -> Option<u32> {
        match self.get(PADDING_INLINE_END) {
            Some(StyleProperty::PaddingInlineEnd(px)) => Some(*px),
            _ => None,
        }
    }

    /// Map logical properties onto physical sides
    pub fn resolve(&self, direction: TextDirection) -> PhysicalStyle {
        let margin = self.margin_start_px().unwrap_or(0);
        let pad_start = self.padding_start_px().unwrap_or(0);
        let pad_end = self.padding_end_px().unwrap_or(0);

        let mut physical = PhysicalStyle {
            font_size: self.font_size_px(),
            ..PhysicalStyle::default()
        };

        if direction.is_rtl() {
            physical.margin_right = margin;
            physical.padding_right = pad_start;
            physical.padding_left = pad_end;
        } else {
            physical.margin_left = margin;
            physical.padding_left = pad_start;
            physical.padding_right = pad_end;
        }

        physical
    }

    /// Serialize as a `style` attribute value, keys sorted
    pub fn to_css(&self) -> String {
        let mut props: Vec<_> = self.properties.values().collect();
        props.sort_by_key(|p| p.key());
        props
            .iter()
            .map(|p| format!("{}: {};", p.key(), p.css_value()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Style resolved to physical sides
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhysicalStyle {
    pub font_size: Option<f32>,
    pub margin_left: i32,
    pub margin_right: i32,
    pub padding_left: u32,
    pub padding_right: u32,
}

impl PhysicalStyle {
    /// Horizontal shift of the title box in left-to-right screen coordinates
    pub fn x_offset(&self) -> i32 {
        self.margin_left - self.margin_right
    }
}
