//! 8-bit RGB color type
//!
//! Target and replacement colors are always plain 8-bit RGB triples. The
//! type parses from the hex notations operators type into config files and
//! from comma-separated decimal triples.

use std::fmt;
use std::str::FromStr;

use super::error::ParseColorError;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    ///
    /// # Example
    /// ```
    /// use region_recolor::Rgb;
    /// let red = Rgb::new(236, 19, 27);
    /// assert_eq!(red.to_bytes(), [236, 19, 27]);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Lowercase `#rrggbb` notation, as written back to config files.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<image::Rgb<u8>> for Rgb {
    #[inline]
    fn from(pixel: image::Rgb<u8>) -> Self {
        Self::from_bytes(pixel.0)
    }
}

impl From<Rgb> for image::Rgb<u8> {
    #[inline]
    fn from(color: Rgb) -> Self {
        image::Rgb(color.to_bytes())
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from text.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` / `RRGGBB` - 6-digit hex
    /// - `#RGB` / `RGB` - shorthand hex (each digit doubled)
    /// - `r,g,b` - decimal triple, whitespace around parts allowed
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use region_recolor::Rgb;
    ///
    /// let red: Rgb = "#EC131B".parse().unwrap();
    /// assert_eq!(red, Rgb::new(236, 19, 27));
    ///
    /// let blue: Rgb = "0, 0, 255".parse().unwrap();
    /// assert_eq!(blue, Rgb::new(0, 0, 255));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.contains(',') {
            let parts: Vec<&str> = s.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(ParseColorError::InvalidComponentCount(parts.len()));
            }
            return Ok(Self::new(
                parts[0].parse().map_err(ParseColorError::InvalidDecimal)?,
                parts[1].parse().map_err(ParseColorError::InvalidDecimal)?,
                parts[2].parse().map_err(ParseColorError::InvalidDecimal)?,
            ));
        }

        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
