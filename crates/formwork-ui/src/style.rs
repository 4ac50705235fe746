//! Visual props of the widgets.
//!
//! Styling never changes behavior; widgets only carry these values through
//! to their views so a renderer can paint them.

use crate::error::{UiError, UiResult};
use std::fmt;

/// An RGBA color with `f32` components in the `0.0..=1.0` range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit RGBA values (0–255 mapped to 0.0–1.0).
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// Parse a CSS color literal: `#rgb`, `#rrggbb`, `#rrggbbaa` or
    /// `rgba(r, g, b, a)`.
    ///
    /// ```
    /// use formwork_ui::style::Color;
    ///
    /// let accent = Color::from_hex("#7c3aed").unwrap();
    /// assert_eq!(accent, Color::from_rgb_u8(0x7c, 0x3a, 0xed));
    /// ```
    pub fn from_hex(literal: &str) -> UiResult<Self> {
        let invalid = || UiError::InvalidColor(literal.to_string());
        let trimmed = literal.trim();

        if let Some(args) = trimmed
            .strip_prefix("rgba(")
            .or_else(|| trimmed.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts: Vec<&str> = args.split(',').map(str::trim).collect();
            let channel = |s: &str| s.parse::<u8>().map_err(|_| invalid());
            return match parts.as_slice() {
                [r, g, b] => Ok(Self::from_rgb_u8(channel(r)?, channel(g)?, channel(b)?)),
                [r, g, b, a] => {
                    let alpha = a.parse::<f32>().map_err(|_| invalid())?;
                    if !(0.0..=1.0).contains(&alpha) {
                        return Err(invalid());
                    }
                    let mut color = Self::from_rgb_u8(channel(r)?, channel(g)?, channel(b)?);
                    color.a = alpha;
                    Ok(color)
                }
                _ => Err(invalid()),
            };
        }

        let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let nibble =
                    |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17).map_err(|_| invalid());
                Ok(Self::from_rgb_u8(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::from_rgb_u8(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::from_rgba_u8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }

    fn hex_const(hex: u32) -> Self {
        Self::from_rgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

/// Length value for widget dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Fixed pixel value
    Px(f32),
    /// Percentage of parent size (0.0 - 100.0)
    Percent(f32),
    /// Automatic sizing based on content
    Auto,
}

impl Length {
    pub fn px(value: f32) -> Self {
        Self::Px(value)
    }

    pub fn percent(value: f32) -> Self {
        Self::Percent(value)
    }

    /// Parse `"200px"`, `"50%"`, `"auto"` or a bare number (pixels).
    pub fn parse(input: &str) -> UiResult<Self> {
        let invalid = || UiError::InvalidLength(input.to_string());
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Length::Auto);
        }
        let (number, ctor): (&str, fn(f32) -> Length) = if let Some(n) = trimmed.strip_suffix("px") {
            (n, Length::Px)
        } else if let Some(n) = trimmed.strip_suffix('%') {
            (n, Length::Percent)
        } else {
            (trimmed, Length::Px)
        };
        let value = number.trim().parse::<f32>().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        Ok(ctor(value))
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::Auto
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{v}px"),
            Length::Percent(v) => write!(f, "{v}%"),
            Length::Auto => f.write_str("auto"),
        }
    }
}

/// Interaction state a field is painted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Idle,
    Hovered,
    Open,
    Invalid,
    Disabled,
}

/// Visual props shared by the dropdown-style fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldStyle {
    pub width: Length,
    pub height: Length,
    pub max_height: Length,
    pub background: Color,
    pub text: Color,
    pub border: Color,
    pub hover_border: Color,
    pub focus_border: Color,
    pub error: Color,
    pub helper: Color,
    pub border_radius: f32,
    pub option_hover: Color,
    pub option_selected: Color,
    pub option_selected_text: Color,
    pub z_index: i32,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            width: Length::Px(200.0),
            height: Length::Px(44.0),
            max_height: Length::Px(240.0),
            background: Color::WHITE,
            text: Color::hex_const(0x1f2937),
            border: Color::hex_const(0xe5e7eb),
            hover_border: Color::hex_const(0xd1d5db),
            focus_border: Color::hex_const(0x7c3aed),
            error: Color::hex_const(0xdc2626),
            helper: Color::hex_const(0x6b7280),
            border_radius: 8.0,
            option_hover: Color::hex_const(0xf8fafc),
            option_selected: Color::hex_const(0xede9fe),
            option_selected_text: Color::hex_const(0x7c3aed),
            z_index: 9999,
        }
    }
}

impl FieldStyle {
    /// Border color for the trigger in `state`.
    pub fn border_color(&self, state: FieldState) -> Color {
        match state {
            FieldState::Invalid => self.error,
            FieldState::Open => self.focus_border,
            FieldState::Hovered => self.hover_border,
            FieldState::Idle | FieldState::Disabled => self.border,
        }
    }
}

/// Visual props of the checkbox box and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxStyle {
    pub size: Length,
    pub mark: Color,
    pub background: Color,
    pub border: Color,
    pub checked_background: Color,
    pub checked_border: Color,
    pub label: Color,
    pub error: Color,
    pub border_radius: f32,
}

impl Default for CheckboxStyle {
    fn default() -> Self {
        Self {
            size: Length::Px(20.0),
            mark: Color::WHITE,
            background: Color::WHITE,
            border: Color::hex_const(0xd1d5db),
            checked_background: Color::hex_const(0x7c3aed),
            checked_border: Color::hex_const(0x7c3aed),
            label: Color::hex_const(0x374151),
            error: Color::hex_const(0xdc2626),
            border_radius: 6.0,
        }
    }
}

impl CheckboxStyle {
    pub fn box_colors(&self, checked: bool, invalid: bool) -> (Color, Color) {
        let border = match (invalid, checked) {
            (true, _) => self.error,
            (false, true) => self.checked_border,
            (false, false) => self.border,
        };
        let fill = if checked {
            self.checked_background
        } else {
            self.background
        };
        (fill, border)
    }
}

/// Visual props of the calendar panel.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarStyle {
    pub background: Color,
    pub header_background: Color,
    pub text: Color,
    pub selected: Color,
    pub selected_background: Color,
    pub today_background: Color,
    pub disabled: Color,
    pub disabled_background: Color,
    pub weekday: Color,
}

impl Default for CalendarStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            header_background: Color::hex_const(0xf8fafc),
            text: Color::hex_const(0x374151),
            selected: Color::hex_const(0x7c3aed),
            selected_background: Color::hex_const(0xede9fe),
            today_background: Color::hex_const(0xf3f4f6),
            disabled: Color::hex_const(0x9ca3af),
            disabled_background: Color::hex_const(0xf9fafb),
            weekday: Color::hex_const(0x6b7280),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex_forms() {
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(
            Color::from_hex("#7c3aed").unwrap(),
            Color::from_rgb_u8(0x7c, 0x3a, 0xed)
        );
        assert_eq!(
            Color::from_hex("#00000080").unwrap(),
            Color::from_rgba_u8(0, 0, 0, 0x80)
        );
        let shadow = Color::from_hex("rgba(0, 0, 0, 0.05)").unwrap();
        assert_eq!(shadow.a, 0.05);
    }

    #[test]
    fn test_color_rejects_garbage() {
        for literal in ["", "7c3aed", "#12", "#zzzzzz", "rgba(1,2)", "rgba(300,0,0,1)"] {
            assert!(
                matches!(Color::from_hex(literal), Err(UiError::InvalidColor(_))),
                "{literal} should be rejected"
            );
        }
    }

    #[test]
    fn test_length_parse() {
        assert_eq!(Length::parse("200px").unwrap(), Length::Px(200.0));
        assert_eq!(Length::parse("50%").unwrap(), Length::Percent(50.0));
        assert_eq!(Length::parse("auto").unwrap(), Length::Auto);
        assert_eq!(Length::parse("44").unwrap(), Length::Px(44.0));
        assert!(Length::parse("wide").is_err());
        assert!(Length::parse("-3px").is_err());
        assert_eq!(Length::Px(12.0).to_string(), "12px");
    }

    #[test]
    fn test_border_color_by_state() {
        let style = FieldStyle::default();
        assert_eq!(style.border_color(FieldState::Invalid), style.error);
        assert_eq!(style.border_color(FieldState::Open), style.focus_border);
        assert_eq!(style.border_color(FieldState::Idle), style.border);
    }

    #[test]
    fn test_checkbox_colors() {
        let style = CheckboxStyle::default();
        assert_eq!(
            style.box_colors(true, false),
            (style.checked_background, style.checked_border)
        );
        assert_eq!(style.box_colors(false, true).1, style.error);
    }
}
