//! Canonical bookmark colors.
//!
//! User supplied colors are free-form strings. [`HexColor::normalize`] turns
//! any input into exactly eight lower-case hex digits (`rrggbbaa`), falling
//! back to opaque gray when the input is not hexadecimal.

use std::fmt;

use palette::Srgba;

/// A color in canonical `rrggbbaa` form, without a leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    /// Color used for any input that is not a hex string.
    pub const FALLBACK: &'static str = "888888ff";

    /// Normalizes arbitrary user input. Never fails.
    ///
    /// ```
    /// use labeled_bookmarks::HexColor;
    ///
    /// assert_eq!(HexColor::normalize("#FF0000").as_str(), "ff0000ff");
    /// assert_eq!(HexColor::normalize("red").as_str(), "888888ff");
    /// ```
    pub fn normalize(input: &str) -> Self {
        let digits = input.strip_prefix('#').unwrap_or(input);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Self(Self::FALLBACK.to_string());
        }

        // All bytes are ASCII here, so byte slicing cannot split a character.
        let mut color = digits[..digits.len().min(8)].to_ascii_lowercase();
        while color.len() < 8 {
            color.push('f');
        }

        Self(color)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The color with a leading `#`, as expected by CSS-like style attributes.
    pub fn to_css(&self) -> String {
        format!("#{}", self.0)
    }

    /// Converts to an sRGB color with alpha.
    pub fn to_srgba(&self) -> Srgba<u8> {
        let channel = |i: usize| u8::from_str_radix(&self.0[i * 2..i * 2 + 2], 16).unwrap_or(0);
        Srgba::new(channel(0), channel(1), channel(2), channel(3))
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self(Self::FALLBACK.to_string())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_hex_input_falls_back_to_gray() {
        for input in ["red", "#12345g", "12 34", "##123456", "#", "", "ffé"] {
            assert_eq!(HexColor::normalize(input).as_str(), "888888ff", "input {input:?}");
        }
    }

    #[test]
    fn long_input_is_truncated_to_eight_digits() {
        assert_eq!(HexColor::normalize("0123456789ABCDEF").as_str(), "01234567");
        assert_eq!(HexColor::normalize("#AABBCCDD").as_str(), "aabbccdd");
    }

    #[test]
    fn short_input_is_padded_with_f() {
        assert_eq!(HexColor::normalize("#00FF00").as_str(), "00ff00ff");
        assert_eq!(HexColor::normalize("abc").as_str(), "abcfffff");
        assert_eq!(HexColor::normalize("0").as_str(), "0fffffff");
    }

    #[test]
    fn css_form_has_hash_prefix() {
        assert_eq!(HexColor::normalize("ff0000").to_css(), "#ff0000ff");
    }

    #[test]
    fn converts_to_srgba() {
        let color = HexColor::normalize("ff800040").to_srgba();
        assert_eq!(color.red, 0xff);
        assert_eq!(color.green, 0x80);
        assert_eq!(color.blue, 0x00);
        assert_eq!(color.alpha, 0x40);
    }

    #[test]
    fn default_is_fallback() {
        assert_eq!(HexColor::default().as_str(), HexColor::FALLBACK);
    }
}
