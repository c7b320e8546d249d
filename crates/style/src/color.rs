//! Color values

/// Color value (RGBA)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Check if color is fully transparent
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Parse a hex color string (without #)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let nibble = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => Some(Color::rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
            4 => Some(Color::rgba(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17, nibble(3)? * 17)),
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Get a named color (CSS2 basic palette)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "black" => Some(Color::rgb(0, 0, 0)),
            "white" => Some(Color::rgb(255, 255, 255)),
            "red" => Some(Color::rgb(255, 0, 0)),
            "green" => Some(Color::rgb(0, 128, 0)),
            "blue" => Some(Color::rgb(0, 0, 255)),
            "yellow" => Some(Color::rgb(255, 255, 0)),
            "aqua" => Some(Color::rgb(0, 255, 255)),
            "fuchsia" => Some(Color::rgb(255, 0, 255)),
            "gray" | "grey" => Some(Color::rgb(128, 128, 128)),
            "silver" => Some(Color::rgb(192, 192, 192)),
            "maroon" => Some(Color::rgb(128, 0, 0)),
            "olive" => Some(Color::rgb(128, 128, 0)),
            "lime" => Some(Color::rgb(0, 255, 0)),
            "teal" => Some(Color::rgb(0, 128, 128)),
            "navy" => Some(Color::rgb(0, 0, 128)),
            "purple" => Some(Color::rgb(128, 0, 128)),
            "orange" => Some(Color::rgb(255, 165, 0)),
            "transparent" => Some(Color::transparent()),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}
