//! Style Properties
//!
//! The typed property accessor layout reads through, inheritance rules, and
//! a small declaration parser for inline `style` attributes.

use crate::color::Color;
use crate::values::{FontSize, FontSizeKeyword, Length, LineHeight, RelativeFontSize, Width};
use crate::{ComputedStyle, Direction, Display, Float, Position, TextAlign, VerticalAlign};

/// Whether a property is inherited by default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inheritance {
    /// Property is inherited from parent
    Inherited,
    /// Property is not inherited (uses initial value)
    NotInherited,
}

/// Properties understood by layout and paint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Display,
    Position,
    Float,
    Width,
    Height,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    BorderTopWidth,
    BorderRightWidth,
    BorderBottomWidth,
    BorderLeftWidth,
    LineHeight,
    FontSize,
    FontFamily,
    Color,
    BackgroundColor,
    BorderColor,
    TextAlign,
    VerticalAlign,
    Direction,
}

impl Property {
    pub const ALL: [Property; 26] = [
        Property::Display,
        Property::Position,
        Property::Float,
        Property::Width,
        Property::Height,
        Property::MarginTop,
        Property::MarginRight,
        Property::MarginBottom,
        Property::MarginLeft,
        Property::PaddingTop,
        Property::PaddingRight,
        Property::PaddingBottom,
        Property::PaddingLeft,
        Property::BorderTopWidth,
        Property::BorderRightWidth,
        Property::BorderBottomWidth,
        Property::BorderLeftWidth,
        Property::LineHeight,
        Property::FontSize,
        Property::FontFamily,
        Property::Color,
        Property::BackgroundColor,
        Property::BorderColor,
        Property::TextAlign,
        Property::VerticalAlign,
        Property::Direction,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        let property = match name.to_ascii_lowercase().as_str() {
            "display" => Property::Display,
            "position" => Property::Position,
            "float" => Property::Float,
            "width" => Property::Width,
            "height" => Property::Height,
            "margin-top" => Property::MarginTop,
            "margin-right" => Property::MarginRight,
            "margin-bottom" => Property::MarginBottom,
            "margin-left" => Property::MarginLeft,
            "padding-top" => Property::PaddingTop,
            "padding-right" => Property::PaddingRight,
            "padding-bottom" => Property::PaddingBottom,
            "padding-left" => Property::PaddingLeft,
            "border-top-width" => Property::BorderTopWidth,
            "border-right-width" => Property::BorderRightWidth,
            "border-bottom-width" => Property::BorderBottomWidth,
            "border-left-width" => Property::BorderLeftWidth,
            "line-height" => Property::LineHeight,
            "font-size" => Property::FontSize,
            "font-family" => Property::FontFamily,
            "color" => Property::Color,
            "background-color" => Property::BackgroundColor,
            "border-color" => Property::BorderColor,
            "text-align" => Property::TextAlign,
            "vertical-align" => Property::VerticalAlign,
            "direction" => Property::Direction,
            _ => return None,
        };
        Some(property)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Property::Display => "display",
            Property::Position => "position",
            Property::Float => "float",
            Property::Width => "width",
            Property::Height => "height",
            Property::MarginTop => "margin-top",
            Property::MarginRight => "margin-right",
            Property::MarginBottom => "margin-bottom",
            Property::MarginLeft => "margin-left",
            Property::PaddingTop => "padding-top",
            Property::PaddingRight => "padding-right",
            Property::PaddingBottom => "padding-bottom",
            Property::PaddingLeft => "padding-left",
            Property::BorderTopWidth => "border-top-width",
            Property::BorderRightWidth => "border-right-width",
            Property::BorderBottomWidth => "border-bottom-width",
            Property::BorderLeftWidth => "border-left-width",
            Property::LineHeight => "line-height",
            Property::FontSize => "font-size",
            Property::FontFamily => "font-family",
            Property::Color => "color",
            Property::BackgroundColor => "background-color",
            Property::BorderColor => "border-color",
            Property::TextAlign => "text-align",
            Property::VerticalAlign => "vertical-align",
            Property::Direction => "direction",
        }
    }

    pub fn inheritance(&self) -> Inheritance {
        match self {
            Property::Color
            | Property::FontSize
            | Property::FontFamily
            | Property::LineHeight
            | Property::TextAlign
            | Property::Direction => Inheritance::Inherited,
            _ => Inheritance::NotInherited,
        }
    }
}

/// A typed property value
#[derive(Debug, Clone, PartialEq)]
pub enum ComputedValue {
    Display(Display),
    Position(Position),
    Float(Float),
    /// Length that may be `auto`
    Width(Width),
    Length(Length),
    LineHeight(LineHeight),
    FontSize(FontSize),
    FontFamily(Vec<String>),
    Color(Color),
    TextAlign(TextAlign),
    VerticalAlign(VerticalAlign),
    Direction(Direction),
}

impl ComputedStyle {
    /// Read a property as a typed value
    pub fn get_computed_value(&self, property: Property) -> ComputedValue {
        match property {
            Property::Display => ComputedValue::Display(self.display),
            Property::Position => ComputedValue::Position(self.position),
            Property::Float => ComputedValue::Float(self.float),
            Property::Width => ComputedValue::Width(self.width),
            Property::Height => ComputedValue::Width(self.height),
            Property::MarginTop => ComputedValue::Width(self.margin_top),
            Property::MarginRight => ComputedValue::Width(self.margin_right),
            Property::MarginBottom => ComputedValue::Width(self.margin_bottom),
            Property::MarginLeft => ComputedValue::Width(self.margin_left),
            Property::PaddingTop => ComputedValue::Length(self.padding_top),
            Property::PaddingRight => ComputedValue::Length(self.padding_right),
            Property::PaddingBottom => ComputedValue::Length(self.padding_bottom),
            Property::PaddingLeft => ComputedValue::Length(self.padding_left),
            Property::BorderTopWidth => ComputedValue::Length(self.border_top_width),
            Property::BorderRightWidth => ComputedValue::Length(self.border_right_width),
            Property::BorderBottomWidth => ComputedValue::Length(self.border_bottom_width),
            Property::BorderLeftWidth => ComputedValue::Length(self.border_left_width),
            Property::LineHeight => ComputedValue::LineHeight(self.line_height),
            Property::FontSize => ComputedValue::FontSize(self.font_size),
            Property::FontFamily => ComputedValue::FontFamily(self.font_family.clone()),
            Property::Color => ComputedValue::Color(self.color),
            Property::BackgroundColor => ComputedValue::Color(self.background_color),
            Property::BorderColor => ComputedValue::Color(self.border_color),
            Property::TextAlign => ComputedValue::TextAlign(self.text_align),
            Property::VerticalAlign => ComputedValue::VerticalAlign(self.vertical_align),
            Property::Direction => ComputedValue::Direction(self.direction),
        }
    }

    /// Write a typed value. Returns false, leaving the style untouched, when
    /// the value's type does not fit the property.
    pub fn set_computed_value(&mut self, property: Property, value: ComputedValue) -> bool {
        use ComputedValue as V;

        // plain lengths are accepted where auto is also allowed
        let value = match (property, value) {
            (
                Property::Width
                | Property::Height
                | Property::MarginTop
                | Property::MarginRight
                | Property::MarginBottom
                | Property::MarginLeft,
                V::Length(l),
            ) => V::Width(Width::Length(l)),
            (_, v) => v,
        };

        match (property, value) {
            (Property::Display, V::Display(v)) => self.display = v,
            (Property::Position, V::Position(v)) => self.position = v,
            (Property::Float, V::Float(v)) => self.float = v,
            (Property::Width, V::Width(v)) => self.width = v,
            (Property::Height, V::Width(v)) => self.height = v,
            (Property::MarginTop, V::Width(v)) => self.margin_top = v,
            (Property::MarginRight, V::Width(v)) => self.margin_right = v,
            (Property::MarginBottom, V::Width(v)) => self.margin_bottom = v,
            (Property::MarginLeft, V::Width(v)) => self.margin_left = v,
            (Property::PaddingTop, V::Length(v)) => self.padding_top = v,
            (Property::PaddingRight, V::Length(v)) => self.padding_right = v,
            (Property::PaddingBottom, V::Length(v)) => self.padding_bottom = v,
            (Property::PaddingLeft, V::Length(v)) => self.padding_left = v,
            (Property::BorderTopWidth, V::Length(v)) => self.border_top_width = v,
            (Property::BorderRightWidth, V::Length(v)) => self.border_right_width = v,
            (Property::BorderBottomWidth, V::Length(v)) => self.border_bottom_width = v,
            (Property::BorderLeftWidth, V::Length(v)) => self.border_left_width = v,
            (Property::LineHeight, V::LineHeight(v)) => self.line_height = v,
            (Property::FontSize, V::FontSize(v)) => self.font_size = v,
            (Property::FontFamily, V::FontFamily(v)) => self.font_family = v,
            (Property::Color, V::Color(v)) => self.color = v,
            (Property::BackgroundColor, V::Color(v)) => self.background_color = v,
            (Property::BorderColor, V::Color(v)) => self.border_color = v,
            (Property::TextAlign, V::TextAlign(v)) => self.text_align = v,
            (Property::VerticalAlign, V::VerticalAlign(v)) => self.vertical_align = v,
            (Property::Direction, V::Direction(v)) => self.direction = v,
            (property, value) => {
                log::warn!("value {:?} does not apply to '{}'", value, property.name());
                return false;
            }
        }
        true
    }

    /// Fresh style for a child element: initial values, with inherited
    /// properties taken from `parent`.
    ///
    /// font-size is left as `Inherit` so that relative sizes compound once,
    /// when layout computes the font for each element.
    pub fn inherit_from(parent: &ComputedStyle) -> Self {
        let mut style = Self::default();
        for property in Property::ALL {
            if property.inheritance() == Inheritance::Inherited && property != Property::FontSize {
                style.set_computed_value(property, parent.get_computed_value(property));
            }
        }
        style
    }
}

/// Split a value like `12.5px` into number and unit
fn split_number(s: &str) -> Option<(f64, &str)> {
    let end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || ((c == '-' || c == '+') && i == 0)))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let value = s[..end].parse::<f64>().ok()?;
    Some((value, &s[end..]))
}

fn parse_length(s: &str) -> Option<Length> {
    split_number(s).map(|(value, units)| Length::from_units(value, units))
}

fn parse_width(s: &str) -> Option<Width> {
    if s.eq_ignore_ascii_case("auto") {
        Some(Width::Auto)
    } else {
        parse_length(s).map(Width::Length)
    }
}

fn parse_color(s: &str) -> Option<Color> {
    match s.strip_prefix('#') {
        Some(hex) => Color::from_hex(hex),
        None => Color::from_name(s),
    }
}

fn parse_font_size(s: &str) -> Option<FontSize> {
    match s.to_ascii_lowercase().as_str() {
        "inherit" => Some(FontSize::Inherit),
        "larger" => Some(FontSize::Relative(RelativeFontSize::Larger)),
        "smaller" => Some(FontSize::Relative(RelativeFontSize::Smaller)),
        keyword => match FontSizeKeyword::from_keyword(keyword) {
            Some(k) => Some(FontSize::Absolute(k)),
            None => parse_length(s).map(FontSize::Length),
        },
    }
}

fn parse_line_height(s: &str) -> Option<LineHeight> {
    if s.eq_ignore_ascii_case("normal") {
        return Some(LineHeight::Normal);
    }
    let length = parse_length(s)?;
    if length.is_number() {
        Some(LineHeight::Number(length.value))
    } else {
        Some(LineHeight::Length(length))
    }
}

/// Expand 1-4 box values into top, right, bottom, left
fn expand_box<T: Copy>(values: &[T]) -> Option<[T; 4]> {
    match values {
        &[a] => Some([a, a, a, a]),
        &[v, h] => Some([v, h, v, h]),
        &[t, h, b] => Some([t, h, b, h]),
        &[t, r, b, l] => Some([t, r, b, l]),
        _ => None,
    }
}

/// Parse a single `name: value` declaration into typed property values.
///
/// The `margin`, `padding` and `border-width` shorthands expand to their
/// four sides. Returns an empty list for anything unrecognised.
pub fn parse_declaration(name: &str, value: &str) -> Vec<(Property, ComputedValue)> {
    let value = value.trim();
    let name = name.trim().to_ascii_lowercase();

    let sides = |props: [Property; 4], values: Option<[ComputedValue; 4]>| -> Vec<(Property, ComputedValue)> {
        values.map(|v| props.into_iter().zip(v).collect()).unwrap_or_default()
    };

    match name.as_str() {
        "margin" => {
            let parsed: Option<Vec<Width>> = value.split_whitespace().map(parse_width).collect();
            let expanded = parsed.as_deref().and_then(expand_box).map(|v| v.map(ComputedValue::Width));
            return sides(
                [Property::MarginTop, Property::MarginRight, Property::MarginBottom, Property::MarginLeft],
                expanded,
            );
        }
        "padding" | "border-width" => {
            let parsed: Option<Vec<Length>> = value.split_whitespace().map(parse_length).collect();
            let expanded = parsed.as_deref().and_then(expand_box).map(|v| v.map(ComputedValue::Length));
            let props = if name == "padding" {
                [Property::PaddingTop, Property::PaddingRight, Property::PaddingBottom, Property::PaddingLeft]
            } else {
                [
                    Property::BorderTopWidth,
                    Property::BorderRightWidth,
                    Property::BorderBottomWidth,
                    Property::BorderLeftWidth,
                ]
            };
            return sides(props, expanded);
        }
        "background" => return parse_declaration("background-color", value),
        _ => {}
    }

    let Some(property) = Property::from_name(&name) else {
        log::debug!("ignoring unsupported property '{}'", name);
        return Vec::new();
    };

    let parsed = match property {
        Property::Display => Display::from_keyword(value).map(ComputedValue::Display),
        Property::Position => Position::from_keyword(value).map(ComputedValue::Position),
        Property::Float => Float::from_keyword(value).map(ComputedValue::Float),
        Property::Width
        | Property::Height
        | Property::MarginTop
        | Property::MarginRight
        | Property::MarginBottom
        | Property::MarginLeft => parse_width(value).map(ComputedValue::Width),
        Property::PaddingTop
        | Property::PaddingRight
        | Property::PaddingBottom
        | Property::PaddingLeft
        | Property::BorderTopWidth
        | Property::BorderRightWidth
        | Property::BorderBottomWidth
        | Property::BorderLeftWidth => parse_length(value).map(ComputedValue::Length),
        Property::LineHeight => parse_line_height(value).map(ComputedValue::LineHeight),
        Property::FontSize => parse_font_size(value).map(ComputedValue::FontSize),
        Property::FontFamily => Some(ComputedValue::FontFamily(
            value
                .split(',')
                .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
                .filter(|f| !f.is_empty())
                .collect(),
        )),
        Property::Color | Property::BackgroundColor | Property::BorderColor => {
            parse_color(value).map(ComputedValue::Color)
        }
        Property::TextAlign => TextAlign::from_keyword(value).map(ComputedValue::TextAlign),
        Property::VerticalAlign => VerticalAlign::from_keyword(value)
            .or_else(|| parse_length(value).map(VerticalAlign::Length))
            .map(ComputedValue::VerticalAlign),
        Property::Direction => Direction::from_keyword(value).map(ComputedValue::Direction),
    };

    match parsed {
        Some(v) => vec![(property, v)],
        None => {
            log::debug!("invalid value '{}' for '{}'", value, property.name());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inherited_properties() {
        let inheritance = |name| Property::from_name(name).map(|p| p.inheritance());
        assert_eq!(inheritance("color"), Some(Inheritance::Inherited));
        assert_eq!(inheritance("font-size"), Some(Inheritance::Inherited));
        assert_eq!(inheritance("direction"), Some(Inheritance::Inherited));
        assert_eq!(inheritance("margin-top"), Some(Inheritance::NotInherited));
        assert_eq!(inheritance("vertical-align"), Some(Inheritance::NotInherited));
        assert_eq!(inheritance("not-a-property"), None);
    }

    #[test]
    fn test_property_names_round_trip() {
        for name in ["display", "border-left-width", "vertical-align", "font-family"] {
            assert_eq!(Property::from_name(name).map(|p| p.name()), Some(name));
        }
    }

    #[test]
    fn test_get_computed_value() {
        let mut style = ComputedStyle::default();
        style.margin_left = Width::Auto;
        style.padding_top = Length::percent(10.0);

        assert_eq!(style.get_computed_value(Property::Display), ComputedValue::Display(Display::Inline));
        assert_eq!(style.get_computed_value(Property::MarginLeft), ComputedValue::Width(Width::Auto));
        match style.get_computed_value(Property::PaddingTop) {
            ComputedValue::Length(l) => assert!(l.is_percent()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_set_computed_value_checks_type() {
        let mut style = ComputedStyle::default();
        assert!(style.set_computed_value(Property::Width, ComputedValue::Length(Length::px(10.0))));
        assert_eq!(style.width, Width::px(10.0));
        assert!(!style.set_computed_value(Property::Width, ComputedValue::Color(Color::white())));
        assert_eq!(style.width, Width::px(10.0));
    }

    #[test]
    fn test_inherit_from_parent() {
        let mut parent = ComputedStyle::with_display(Display::Block);
        parent.color = Color::rgb(255, 0, 0);
        parent.text_align = TextAlign::Center;
        parent.margin_left = Width::px(50.0);
        parent.font_size = FontSize::Length(Length::px(20.0));

        let child = ComputedStyle::inherit_from(&parent);
        assert_eq!(child.color, Color::rgb(255, 0, 0));
        assert_eq!(child.text_align, TextAlign::Center);
        assert_eq!(child.margin_left, Width::zero());
        assert_eq!(child.font_size, FontSize::Inherit);
        assert_eq!(child.display, Display::Inline);
    }

    #[test]
    fn test_parse_simple_declarations() {
        assert_eq!(
            parse_declaration("width", "50%"),
            vec![(Property::Width, ComputedValue::Width(Width::percent(50.0)))]
        );
        assert_eq!(
            parse_declaration("float", "left"),
            vec![(Property::Float, ComputedValue::Float(Float::Left))]
        );
        assert_eq!(
            parse_declaration("line-height", "1.5"),
            vec![(Property::LineHeight, ComputedValue::LineHeight(LineHeight::Number(1.5)))]
        );
        assert_eq!(
            parse_declaration("background", "#00f"),
            vec![(Property::BackgroundColor, ComputedValue::Color(Color::rgb(0, 0, 255)))]
        );
        assert!(parse_declaration("display", "grid").is_empty());
        assert!(parse_declaration("opacity", "0.5").is_empty());
    }

    #[test]
    fn test_parse_box_shorthand() {
        let decls = parse_declaration("margin", "10px auto");
        assert_eq!(decls.len(), 4);
        assert_eq!(decls[0], (Property::MarginTop, ComputedValue::Width(Width::px(10.0))));
        assert_eq!(decls[1], (Property::MarginRight, ComputedValue::Width(Width::Auto)));
        assert_eq!(decls[3], (Property::MarginLeft, ComputedValue::Width(Width::Auto)));

        let decls = parse_declaration("padding", "1px 2px 3px");
        assert_eq!(decls[3], (Property::PaddingLeft, ComputedValue::Length(Length::px(2.0))));
        assert!(parse_declaration("padding", "1px 2px 3px 4px 5px").is_empty());
    }

    #[test]
    fn test_parse_font_size() {
        assert_eq!(
            parse_declaration("font-size", "x-large"),
            vec![(Property::FontSize, ComputedValue::FontSize(FontSize::Absolute(FontSizeKeyword::XLarge)))]
        );
        assert_eq!(
            parse_declaration("font-size", "larger"),
            vec![(Property::FontSize, ComputedValue::FontSize(FontSize::Relative(RelativeFontSize::Larger)))]
        );
        assert_eq!(
            parse_declaration("font-family", "\"Open Sans\", serif"),
            vec![(
                Property::FontFamily,
                ComputedValue::FontFamily(vec!["Open Sans".to_string(), "serif".to_string()])
            )]
        );
    }
}
