//! Lintel Style
//!
//! Resolved style values consumed by layout. Selector matching and the
//! cascade live outside this crate; styles arrive already resolved, either
//! set directly on a [`StyleTree`] or read from inline `style` attributes.

pub mod color;
pub mod values;
pub mod properties;
pub mod styletree;

pub use color::Color;
pub use values::{
    font_size_table, FontSize, FontSizeKeyword, Length, LengthUnit, LineHeight, RelativeFontSize,
    UnitContext, Width,
};
pub use properties::{parse_declaration, ComputedValue, Inheritance, Property};
pub use styletree::{default_display, StyleTree};

/// Computed style for an element
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    // Display
    pub display: Display,
    pub position: Position,
    pub float: Float,

    // Box model
    pub width: Width,
    pub height: Width,
    pub margin_top: Width,
    pub margin_right: Width,
    pub margin_bottom: Width,
    pub margin_left: Width,
    pub padding_top: Length,
    pub padding_right: Length,
    pub padding_bottom: Length,
    pub padding_left: Length,
    pub border_top_width: Length,
    pub border_right_width: Length,
    pub border_bottom_width: Length,
    pub border_left_width: Length,

    // Colors and background
    pub color: Color,
    pub background_color: Color,
    pub border_color: Color,

    // Text
    pub font_size: FontSize,
    pub font_family: Vec<String>,
    pub line_height: LineHeight,
    pub text_align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub direction: Direction,
}

impl ComputedStyle {
    /// Style with the given display and initial values elsewhere
    pub fn with_display(display: Display) -> Self {
        Self { display, ..Self::default() }
    }

    /// Whether the element is taken out of normal flow by `position`
    pub fn is_out_of_flow(&self) -> bool {
        matches!(self.position, Position::Absolute | Position::Fixed)
    }

    pub fn is_floated(&self) -> bool {
        self.float != Float::None
    }
}

/// Display property values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
    Inline,
    InlineBlock,
    ListItem,
    Table,
    InlineTable,
    TableRowGroup,
    TableHeaderGroup,
    TableFooterGroup,
    TableRow,
    TableColumnGroup,
    TableColumn,
    TableCell,
    TableCaption,
}

impl Display {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Some(Display::None),
            "block" => Some(Display::Block),
            "inline" => Some(Display::Inline),
            "inline-block" => Some(Display::InlineBlock),
            "list-item" => Some(Display::ListItem),
            "table" => Some(Display::Table),
            "inline-table" => Some(Display::InlineTable),
            "table-row-group" => Some(Display::TableRowGroup),
            "table-header-group" => Some(Display::TableHeaderGroup),
            "table-footer-group" => Some(Display::TableFooterGroup),
            "table-row" => Some(Display::TableRow),
            "table-column-group" => Some(Display::TableColumnGroup),
            "table-column" => Some(Display::TableColumn),
            "table-cell" => Some(Display::TableCell),
            "table-caption" => Some(Display::TableCaption),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Display::None => "none",
            Display::Block => "block",
            Display::Inline => "inline",
            Display::InlineBlock => "inline-block",
            Display::ListItem => "list-item",
            Display::Table => "table",
            Display::InlineTable => "inline-table",
            Display::TableRowGroup => "table-row-group",
            Display::TableHeaderGroup => "table-header-group",
            Display::TableFooterGroup => "table-footer-group",
            Display::TableRow => "table-row",
            Display::TableColumnGroup => "table-column-group",
            Display::TableColumn => "table-column",
            Display::TableCell => "table-cell",
            Display::TableCaption => "table-caption",
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(
            self,
            Display::Table
                | Display::InlineTable
                | Display::TableRowGroup
                | Display::TableHeaderGroup
                | Display::TableFooterGroup
                | Display::TableRow
                | Display::TableColumnGroup
                | Display::TableColumn
                | Display::TableCell
                | Display::TableCaption
        )
    }
}

/// Position property values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
}

impl Position {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Some(Position::Static),
            "relative" => Some(Position::Relative),
            "absolute" => Some(Position::Absolute),
            "fixed" => Some(Position::Fixed),
            _ => None,
        }
    }
}

/// Float property values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Float {
    #[default]
    None,
    Left,
    Right,
}

impl Float {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Some(Float::None),
            "left" => Some(Float::Left),
            "right" => Some(Float::Right),
            _ => None,
        }
    }
}

/// Text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Start of line, which depends on `direction`
    #[default]
    Normal,
    Left,
    Right,
    Center,
    Justify,
}

impl TextAlign {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Some(TextAlign::Left),
            "right" => Some(TextAlign::Right),
            "center" => Some(TextAlign::Center),
            "justify" => Some(TextAlign::Justify),
            "start" | "normal" => Some(TextAlign::Normal),
            _ => None,
        }
    }
}

/// Inline base direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ltr" => Some(Direction::Ltr),
            "rtl" => Some(Direction::Rtl),
            _ => None,
        }
    }
}

/// vertical-align
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum VerticalAlign {
    #[default]
    Baseline,
    Middle,
    Bottom,
    Sub,
    Super,
    Top,
    TextTop,
    TextBottom,
    /// Raise by a length; percentages refer to the line height
    Length(Length),
}

impl VerticalAlign {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "baseline" => Some(VerticalAlign::Baseline),
            "middle" => Some(VerticalAlign::Middle),
            "bottom" => Some(VerticalAlign::Bottom),
            "sub" => Some(VerticalAlign::Sub),
            "super" => Some(VerticalAlign::Super),
            "top" => Some(VerticalAlign::Top),
            "text-top" => Some(VerticalAlign::TextTop),
            "text-bottom" => Some(VerticalAlign::TextBottom),
            _ => None,
        }
    }
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: Display::Inline,
            position: Position::Static,
            float: Float::None,
            width: Width::Auto,
            height: Width::Auto,
            margin_top: Width::zero(),
            margin_right: Width::zero(),
            margin_bottom: Width::zero(),
            margin_left: Width::zero(),
            padding_top: Length::ZERO,
            padding_right: Length::ZERO,
            padding_bottom: Length::ZERO,
            padding_left: Length::ZERO,
            border_top_width: Length::ZERO,
            border_right_width: Length::ZERO,
            border_bottom_width: Length::ZERO,
            border_left_width: Length::ZERO,
            color: Color::black(),
            background_color: Color::transparent(),
            border_color: Color::black(),
            font_size: FontSize::Inherit,
            font_family: vec![String::from("sans-serif")],
            line_height: LineHeight::Normal,
            text_align: TextAlign::Normal,
            vertical_align: VerticalAlign::Baseline,
            direction: Direction::Ltr,
        }
    }
}
