// Color values used by the canvas layer
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("unrecognized color: {0:?}")]
    Unrecognized(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb`, `#rgb` or one of a handful of CSS color names.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        let named = match trimmed.to_ascii_lowercase().as_str() {
            "black" => Some(Self::rgb(0, 0, 0)),
            "white" => Some(Self::rgb(255, 255, 255)),
            "grey" | "gray" => Some(Self::rgb(128, 128, 128)),
            "red" => Some(Self::rgb(255, 0, 0)),
            "green" => Some(Self::rgb(0, 128, 0)),
            "blue" => Some(Self::rgb(0, 0, 255)),
            _ => None,
        };
        if let Some(color) = named {
            return Ok(color);
        }

        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let unrecognized = || ColorError::Unrecognized(input.to_string());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(unrecognized());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| unrecognized());
        match hex.len() {
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #abc is shorthand for #aabbcc
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            _ => Err(unrecognized()),
        }
    }

    /// Same color with a different opacity.
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Rgba::parse("#a000ff"), Ok(Rgba::rgb(160, 0, 255)));
        assert_eq!(Rgba::parse("03030b"), Ok(Rgba::rgb(3, 3, 11)));
        assert_eq!(Rgba::parse("#fff"), Ok(Rgba::rgb(255, 255, 255)));
        assert_eq!(Rgba::parse("Grey"), Ok(Rgba::rgb(128, 128, 128)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Rgba::parse("#12345").is_err());
        assert!(Rgba::parse("#gg0000").is_err());
        assert!(Rgba::parse("mauve").is_err());
        assert!(Rgba::parse("#ééé").is_err());
        assert!(Rgba::parse("#+f+f+f").is_err());
        assert!(Rgba::parse("+ff").is_err());
    }

    #[test]
    fn test_css_output() {
        let color = Rgba::parse("#03030b").unwrap();
        assert_eq!(color.to_css(), "rgb(3, 3, 11)");
        assert_eq!(color.with_alpha(0.5).to_css(), "rgba(3, 3, 11, 0.5)");
        assert_eq!(color.with_alpha(3.0).a, 1.0);
    }
}
