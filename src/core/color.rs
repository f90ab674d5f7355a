//! Completion → node color mapping
//!
//! Low completion reads as red, half-way as yellow, finished as green. Two
//! schemes are available: a continuous gradient across the three stops and
//! the three-bucket threshold mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from its channels
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex notation, e.g. `#e74c3c`
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Hue angle in degrees, `[0, 360)`; 0 for greys
    #[must_use]
    pub fn hue(self) -> f64 {
        let r = f64::from(self.r);
        let g = f64::from(self.g);
        let b = f64::from(self.b);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        if delta == 0.0 {
            return 0.0;
        }

        #[allow(clippy::float_cmp)]
        let hue = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        hue.rem_euclid(360.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Color at 0% completion
pub const RED: Color = Color::rgb(0xe7, 0x4c, 0x3c);
/// Color at 50% completion
pub const YELLOW: Color = Color::rgb(0xf1, 0xc4, 0x0f);
/// Color at 100% completion
pub const GREEN: Color = Color::rgb(0x2e, 0xcc, 0x71);

/// How completion values are turned into colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Linear interpolation red → yellow → green
    #[default]
    Gradient,
    /// Red below 30, yellow below 70, green otherwise
    Buckets,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gradient" | "continuous" => Ok(Self::Gradient),
            "buckets" | "bucket" | "threshold" => Ok(Self::Buckets),
            _ => Err(format!("Unknown color scheme: {s}")),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gradient => write!(f, "gradient"),
            Self::Buckets => write!(f, "buckets"),
        }
    }
}

/// Map a completion percentage to a node color.
///
/// Values outside `[0, 100]` are clamped; the loader already rejects them.
#[must_use]
pub fn color_of(completion: f64, scheme: ColorScheme) -> Color {
    let p = if completion.is_nan() {
        0.0
    } else {
        completion.clamp(0.0, 100.0)
    };

    match scheme {
        ColorScheme::Gradient => {
            if p <= 50.0 {
                lerp(RED, YELLOW, p / 50.0)
            } else {
                lerp(YELLOW, GREEN, (p - 50.0) / 50.0)
            }
        }
        ColorScheme::Buckets => {
            if p < 30.0 {
                RED
            } else if p < 70.0 {
                YELLOW
            } else {
                GREEN
            }
        }
    }
}

/// Linear interpolation in RGB space, `t` in `[0, 1]`
fn lerp(from: Color, to: Color, t: f64) -> Color {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let channel = |a: u8, b: u8| -> u8 {
        let value = (f64::from(b) - f64::from(a)).mul_add(t, f64::from(a));
        value.round().clamp(0.0, 255.0) as u8
    };
    Color::rgb(
        channel(from.r, to.r),
        channel(from.g, to.g),
        channel(from.b, to.b),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMES: [ColorScheme; 2] = [ColorScheme::Gradient, ColorScheme::Buckets];

    #[test]
    fn test_reference_colors_at_extremes() {
        for scheme in SCHEMES {
            assert_eq!(color_of(0.0, scheme), RED, "{scheme} at 0");
            assert_eq!(color_of(100.0, scheme), GREEN, "{scheme} at 100");
        }
        assert_eq!(color_of(50.0, ColorScheme::Gradient), YELLOW);
        assert_eq!(RED.to_hex(), "#e74c3c");
        assert_eq!(GREEN.to_hex(), "#2ecc71");
    }

    #[test]
    fn test_deterministic() {
        for p in 0..=100 {
            let p = f64::from(p);
            for scheme in SCHEMES {
                assert_eq!(color_of(p, scheme), color_of(p, scheme));
            }
        }
    }

    #[test]
    fn test_gradient_hue_increases_with_completion() {
        let mut previous = color_of(0.0, ColorScheme::Gradient).hue();
        for p in (5..=100).step_by(5) {
            let hue = color_of(f64::from(p), ColorScheme::Gradient).hue();
            assert!(hue > previous, "hue at {p}% ({hue}) <= previous ({previous})");
            previous = hue;
        }
    }

    #[test]
    fn test_buckets_hue_never_decreases() {
        let mut previous = color_of(0.0, ColorScheme::Buckets).hue();
        for p in 1..=100 {
            let hue = color_of(f64::from(p), ColorScheme::Buckets).hue();
            assert!(hue >= previous, "hue at {p}% decreased");
            previous = hue;
        }
    }

    #[test]
    fn test_bucket_thresholds() {
        assert_eq!(color_of(29.9, ColorScheme::Buckets), RED);
        assert_eq!(color_of(30.0, ColorScheme::Buckets), YELLOW);
        assert_eq!(color_of(69.9, ColorScheme::Buckets), YELLOW);
        assert_eq!(color_of(70.0, ColorScheme::Buckets), GREEN);
    }

    #[test]
    fn test_gradient_is_continuous() {
        // Neighbouring percentages never jump more than a few channel steps
        for p in 0..100 {
            let a = color_of(f64::from(p), ColorScheme::Gradient);
            let b = color_of(f64::from(p + 1), ColorScheme::Gradient);
            assert!(a.r.abs_diff(b.r) <= 5);
            assert!(a.g.abs_diff(b.g) <= 5);
            assert!(a.b.abs_diff(b.b) <= 5);
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(color_of(-20.0, ColorScheme::Gradient), RED);
        assert_eq!(color_of(250.0, ColorScheme::Gradient), GREEN);
        assert_eq!(color_of(f64::NAN, ColorScheme::Buckets), RED);
    }

    #[test]
    fn test_scheme_parse_and_display() {
        assert_eq!("gradient".parse::<ColorScheme>(), Ok(ColorScheme::Gradient));
        assert_eq!("Buckets".parse::<ColorScheme>(), Ok(ColorScheme::Buckets));
        assert!("rainbow".parse::<ColorScheme>().is_err());
        assert_eq!(ColorScheme::Buckets.to_string(), "buckets");
    }
}
