//! Length and font-size values
//!
//! Resolved style lengths carry their unit until layout, where they are
//! evaluated against the device resolution and the current font.

use std::sync::{OnceLock, RwLock};

use rustc_hash::FxHashMap;

/// Length units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// Unitless number, evaluated like `px`
    Number,
    /// Pixels
    Px,
    /// Em units (relative to font-size)
    Em,
    /// x-height units
    Ex,
    /// Inches
    In,
    /// Centimeters
    Cm,
    /// Millimeters
    Mm,
    /// Points (1/72 inch)
    Pt,
    /// Picas (12 points)
    Pc,
    /// Percentage, stored normalised to 0.0 - 1.0
    Percent,
}

impl LengthUnit {
    /// Parse a unit string. Returns `None` for strings that are not units.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "" => Some(LengthUnit::Number),
            "px" => Some(LengthUnit::Px),
            "em" => Some(LengthUnit::Em),
            "ex" => Some(LengthUnit::Ex),
            "in" => Some(LengthUnit::In),
            "cm" => Some(LengthUnit::Cm),
            "mm" => Some(LengthUnit::Mm),
            "pt" => Some(LengthUnit::Pt),
            "pc" => Some(LengthUnit::Pc),
            "%" => Some(LengthUnit::Percent),
            _ => None,
        }
    }
}

/// Device and font state that length evaluation depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitContext {
    /// Device resolution in dots per inch
    pub dpi: f64,
    /// Current font size
    pub font_size: f64,
    /// Current font x-height
    pub x_height: f64,
}

/// A length with its unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub const ZERO: Length = Length { value: 0.0, unit: LengthUnit::Number };

    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub fn px(value: f64) -> Self {
        Self::new(value, LengthUnit::Px)
    }

    pub fn pt(value: f64) -> Self {
        Self::new(value, LengthUnit::Pt)
    }

    pub fn em(value: f64) -> Self {
        Self::new(value, LengthUnit::Em)
    }

    pub fn number(value: f64) -> Self {
        Self::new(value, LengthUnit::Number)
    }

    /// Percentage given on the 0 - 100 scale
    pub fn percent(value: f64) -> Self {
        Self::new(value / 100.0, LengthUnit::Percent)
    }

    /// Build a length from a parsed number and its unit string.
    ///
    /// Unknown units are reported and fall back to a unitless number.
    pub fn from_units(value: f64, units: &str) -> Self {
        match LengthUnit::from_str(units) {
            Some(LengthUnit::Percent) => Self::percent(value),
            Some(unit) => Self::new(value, unit),
            None => {
                log::warn!("unrecognised units value: '{}'", units);
                Self::number(value)
            }
        }
    }

    pub fn is_percent(&self) -> bool {
        self.unit == LengthUnit::Percent
    }

    pub fn is_number(&self) -> bool {
        self.unit == LengthUnit::Number
    }

    /// Evaluate to device units. `reference` is what percentages apply to.
    pub fn evaluate(&self, reference: f64, ctx: &UnitContext) -> f64 {
        let dpi = ctx.dpi;
        let v = self.value;
        match self.unit {
            LengthUnit::Number | LengthUnit::Px => v * dpi / 72.0 * 0.75,
            LengthUnit::Em => ctx.font_size * v * dpi / 72.0,
            LengthUnit::Ex => ctx.x_height * v * dpi / 72.0,
            LengthUnit::In => v * dpi,
            LengthUnit::Cm => v * dpi * 2.54,
            LengthUnit::Mm => v * dpi * 25.4,
            LengthUnit::Pt => v * dpi / 72.0,
            LengthUnit::Pc => 12.0 * v * dpi / 72.0,
            LengthUnit::Percent => v * reference,
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A length that may be `auto` (width, height, margins)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Width {
    #[default]
    Auto,
    Length(Length),
}

impl Width {
    pub fn px(value: f64) -> Self {
        Width::Length(Length::px(value))
    }

    pub fn percent(value: f64) -> Self {
        Width::Length(Length::percent(value))
    }

    pub fn zero() -> Self {
        Width::Length(Length::ZERO)
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Width::Auto)
    }

    pub fn length(&self) -> Option<&Length> {
        match self {
            Width::Auto => None,
            Width::Length(l) => Some(l),
        }
    }

    /// Auto evaluates to zero; callers check [`Width::is_auto`] first.
    pub fn evaluate(&self, reference: f64, ctx: &UnitContext) -> f64 {
        self.length().map_or(0.0, |l| l.evaluate(reference, ctx))
    }
}

/// line-height
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LineHeight {
    #[default]
    Normal,
    /// Multiplier of the font size
    Number(f64),
    Length(Length),
}

/// Absolute font-size keywords, smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSizeKeyword {
    XxSmall,
    XSmall,
    Small,
    Medium,
    Large,
    XLarge,
    XxLarge,
    XxxLarge,
}

impl FontSizeKeyword {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xx-small" => Some(Self::XxSmall),
            "x-small" => Some(Self::XSmall),
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            "x-large" => Some(Self::XLarge),
            "xx-large" => Some(Self::XxLarge),
            "xxx-large" => Some(Self::XxxLarge),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// `larger` / `smaller`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeFontSize {
    Larger,
    Smaller,
}

const RELATIVE_FONT_SCALE: f64 = 1.15;
const FONT_SIZE_MULTIPLIERS: [f64; 8] = [1.0, 1.1, 1.3, 1.45, 1.6, 1.8, 2.0, 2.3];

/// font-size
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontSize {
    /// Take the parent's computed size
    Inherit,
    Absolute(FontSizeKeyword),
    Relative(RelativeFontSize),
    Length(Length),
}

impl Default for FontSize {
    fn default() -> Self {
        FontSize::Inherit
    }
}

impl FontSize {
    /// Compute the font size given the parent's computed size.
    ///
    /// `ctx` describes the parent font; em and percentages refer to it.
    pub fn compute(&self, parent_size: f64, ctx: &UnitContext) -> f64 {
        match self {
            FontSize::Inherit => parent_size,
            FontSize::Absolute(keyword) => font_size_table(ctx.dpi)[keyword.index()],
            FontSize::Relative(RelativeFontSize::Larger) => parent_size * RELATIVE_FONT_SCALE,
            FontSize::Relative(RelativeFontSize::Smaller) => parent_size / RELATIVE_FONT_SCALE,
            FontSize::Length(length) => length.evaluate(parent_size, ctx),
        }
    }
}

fn font_size_tables() -> &'static RwLock<FxHashMap<u64, [f64; 8]>> {
    static TABLES: OnceLock<RwLock<FxHashMap<u64, [f64; 8]>>> = OnceLock::new();
    TABLES.get_or_init(|| RwLock::new(FxHashMap::default()))
}

/// Absolute font sizes for a device resolution, memoised per dpi.
pub fn font_size_table(dpi: f64) -> [f64; 8] {
    let key = dpi.to_bits();
    if let Ok(tables) = font_size_tables().read() {
        if let Some(table) = tables.get(&key) {
            return *table;
        }
    }

    let min_size = 9.0 / 72.0 * dpi;
    let table = FONT_SIZE_MULTIPLIERS.map(|m| (min_size * m).ceil());
    if let Ok(mut tables) = font_size_tables().write() {
        tables.insert(key, table);
    }
    table
}
