//! Header configuration: attribute coercion and fit settings

use crate::dom::Attributes;
use crate::i18n::TextDirection;
use crate::measure::FontSpec;

pub const ATTR_ACTION: &str = "action";
pub const ATTR_TITLE_START: &str = "title-start";
pub const ATTR_TITLE_END: &str = "title-end";
pub const ATTR_NO_FONT_FIT: &str = "no-font-fit";
pub const ATTR_NOT_FLUSH: &str = "not-flush";
pub const ATTR_DIR: &str = "dir";

/// Attributes the header reacts to
pub const OBSERVED_ATTRIBUTES: &[&str] = &[
    ATTR_ACTION,
    ATTR_TITLE_START,
    ATTR_TITLE_END,
    ATTR_NO_FONT_FIT,
    ATTR_NOT_FLUSH,
    ATTR_DIR,
];

/// Leading action of the header
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActionType {
    #[default]
    None,
    Back,
    Close,
    Menu,
    /// Any other value; no button is shown
    Unsupported(String),
}

impl ActionType {
    /// Parse an `action` attribute value (`None` for an absent attribute)
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None => ActionType::None,
            Some("back") => ActionType::Back,
            Some("close") => ActionType::Close,
            Some("menu") => ActionType::Menu,
            Some(other) => ActionType::Unsupported(other.to_string()),
        }
    }

    /// Whether an action button is shown for this action
    pub fn is_supported(&self) -> bool {
        matches!(self, ActionType::Back | ActionType::Close | ActionType::Menu)
    }

    /// Attribute spelling, `None` when there is no action
    pub fn as_attr(&self) -> Option<&str> {
        match self {
            ActionType::None => None,
            ActionType::Back => Some("back"),
            ActionType::Close => Some("close"),
            ActionType::Menu => Some("menu"),
            ActionType::Unsupported(v) => Some(v),
        }
    }

    /// Icon shown on the action button
    pub fn icon(&self, direction: TextDirection) -> ActionIcon {
        match self {
            ActionType::Back if direction.is_rtl() => ActionIcon::Right,
            ActionType::Back => ActionIcon::Left,
            ActionType::Close => ActionIcon::Close,
            ActionType::Menu => ActionIcon::Menu,
            ActionType::None | ActionType::Unsupported(_) => ActionIcon::None,
        }
    }
}

/// Glyph on the action button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionIcon {
    None,
    Left,
    Right,
    Close,
    Menu,
}

impl ActionIcon {
    /// Icon font glyph name
    pub fn name(&self) -> &'static str {
        match self {
            ActionIcon::None => "none",
            ActionIcon::Left => "left",
            ActionIcon::Right => "right",
            ActionIcon::Close => "close",
            ActionIcon::Menu => "menu",
        }
    }
}

/// Parse a pixel count: `"50"`, `"50px"`, `" 50 "`. Anything else is absent.
pub fn parse_pixels(value: &str) -> Option<u32> {
    let value = value.trim();
    let digits = value.strip_suffix("px").unwrap_or(value).trim_end();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Presence rule for boolean attributes
pub fn coerce_flag(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v != "false")
}

/// Values accepted by the numeric property setters
pub trait IntoPixels {
    fn into_pixels(self) -> Option<u32>;
}

impl IntoPixels for u32 {
    fn into_pixels(self) -> Option<u32> {
        Some(self)
    }
}

impl IntoPixels for i32 {
    fn into_pixels(self) -> Option<u32> {
        u32::try_from(self).ok()
    }
}

impl IntoPixels for &str {
    fn into_pixels(self) -> Option<u32> {
        parse_pixels(self)
    }
}

impl IntoPixels for String {
    fn into_pixels(self) -> Option<u32> {
        parse_pixels(&self)
    }
}

/// Snapshot of the header attributes for one fit run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderConfig {
    pub action: ActionType,
    pub title_start: Option<u32>,
    pub title_end: Option<u32>,
    pub no_font_fit: bool,
    pub flush: bool,
    pub direction: TextDirection,
}

impl HeaderConfig {
    /// Build from attributes; `document_dir` applies unless `dir` overrides it
    pub fn from_attributes(attrs: &Attributes, document_dir: TextDirection) -> Self {
        HeaderConfig {
            action: ActionType::parse(attrs.get(ATTR_ACTION)),
            title_start: attrs.get(ATTR_TITLE_START).and_then(parse_pixels),
            title_end: attrs.get(ATTR_TITLE_END).and_then(parse_pixels),
            no_font_fit: coerce_flag(attrs.get(ATTR_NO_FONT_FIT)),
            flush: !coerce_flag(attrs.get(ATTR_NOT_FLUSH)),
            direction: attrs
                .get(ATTR_DIR)
                .and_then(TextDirection::from_dir_attr)
                .unwrap_or(document_dir),
        }
    }
}

/// Font-fit tuning shared by every header
#[derive(Debug, Clone, PartialEq)]
pub struct FitSettings {
    /// Largest title font size
    pub max_font_size: f32,
    /// Smallest size accepted while keeping the title centered
    pub min_font_size_centered: f32,
    /// Absolute floor once centering is given up
    pub min_font_size: f32,
    /// Padding kept between an overflowing title and a bare edge
    pub title_padding: u32,
    /// Width of the action button
    pub action_button_width: u32,
    pub font: FontSpec,
}

impl FitSettings {
    pub fn new() -> Self {
        FitSettings {
            max_font_size: 23.0,
            min_font_size_centered: 20.0,
            min_font_size: 16.0,
            title_padding: 10,
            action_button_width: 50,
            font: FontSpec::new("Fira Sans").with_weight(300),
        }
    }

    /// Read overrides from `HEADERBAR_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::new();
        let float = |key: &str, default: f32| {
            lookup(key)
                .and_then(|v| v.trim().parse::<f32>().ok())
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(default)
        };
        let pixels = |key: &str, default: u32| {
            lookup(key)
                .and_then(|v| parse_pixels(&v))
                .unwrap_or(default)
        };

        let family = lookup("HEADERBAR_FONT_FAMILY")
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(defaults.font.family.clone());

        FitSettings {
            max_font_size: float("HEADERBAR_FONT_MAX", defaults.max_font_size),
            min_font_size_centered: float(
                "HEADERBAR_FONT_MIN_CENTERED",
                defaults.min_font_size_centered,
            ),
            min_font_size: float("HEADERBAR_FONT_MIN", defaults.min_font_size),
            title_padding: pixels("HEADERBAR_TITLE_PADDING", defaults.title_padding),
            action_button_width: pixels("HEADERBAR_ACTION_WIDTH", defaults.action_button_width),
            font: FontSpec {
                family,
                ..defaults.font
            },
        }
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    pub fn with_font_sizes(mut self, min: f32, min_centered: f32, max: f32) -> Self {
        self.min_font_size = min;
        self.min_font_size_centered = min_centered;
        self.max_font_size = max;
        self
    }

    pub fn with_title_padding(mut self, padding: u32) -> Self {
        self.title_padding = padding;
        self
    }

    pub fn with_action_button_width(mut self, width: u32) -> Self {
        self.action_button_width = width;
        self
    }
}

impl Default for FitSettings {
    fn default() -> Self {
        Self::new()
    }
}
