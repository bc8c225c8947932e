//! Color value type and the shared sine-wave color synthesizer.
//!
//! Every layer that needs a "flowing" color goes through [`synthesize_color`]
//! with its own [`ColorWave`] parameters instead of rolling its own math.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Multiplier turning a normalized phase in `[0, 1)` into radians.
///
/// Kept at `6.28` rather than `TAU` so the hue cycle matches the tuned look.
pub const PHASE_SCALE: f32 = 6.28;

/// Channel offsets (radians) spacing the three hues roughly evenly.
pub const CHANNEL_OFFSETS: [f32; 3] = [0.0, 2.1, 4.2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Truncate each channel toward zero and clamp it into `[0, 255]`.
    pub fn from_channels(channels: [f32; 3]) -> Self {
        Self::new(
            clamp_channel(channels[0]),
            clamp_channel(channels[1]),
            clamp_channel(channels[2]),
        )
    }

    /// Parse a `#rrggbb` string. Anything else yields `None`.
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Self::new(r, g, b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Multiply every channel by `factor`, clamping into `[0, 255]`.
    pub fn scaled(self, factor: f32) -> Self {
        Self::from_channels([
            self.r as f32 * factor,
            self.g as f32 * factor,
            self.b as f32 * factor,
        ])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn clamp_channel(value: f32) -> u8 {
    value.trunc().clamp(0.0, 255.0) as u8
}

/// A fill/stroke color as handed to a draw surface.
///
/// Palette entries that fail to parse are carried through untouched as
/// [`Paint::Raw`] so a bad entry degrades the look instead of failing a tick.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Paint {
    Rgb(Rgb),
    Raw(String),
}

impl Paint {
    pub fn parse(text: &str) -> Self {
        match Rgb::parse_hex(text.trim()) {
            Some(rgb) => Paint::Rgb(rgb),
            None => Paint::Raw(text.to_string()),
        }
    }

    pub fn as_rgb(&self) -> Option<Rgb> {
        match self {
            Paint::Rgb(rgb) => Some(*rgb),
            Paint::Raw(_) => None,
        }
    }

    /// Scale the channels of a parsed color; raw entries pass through.
    pub fn scaled(&self, factor: f32) -> Self {
        match self {
            Paint::Rgb(rgb) => Paint::Rgb(rgb.scaled(factor)),
            Paint::Raw(raw) => Paint::Raw(raw.clone()),
        }
    }
}

impl From<Rgb> for Paint {
    fn from(rgb: Rgb) -> Self {
        Paint::Rgb(rgb)
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paint::Rgb(rgb) => fmt::Display::fmt(rgb, f),
            Paint::Raw(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for Paint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Paint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Paint::parse(&text))
    }
}

/// Produce a color from three offset sine waves sampled at `phase`.
///
/// Channel `c` is `base[c] + amplitude[c] * sin(phase * PHASE_SCALE + offsets[c])`,
/// truncated and clamped, so the result is valid for any finite phase.
pub fn synthesize_color(
    phase: f32,
    base: [f32; 3],
    amplitude: [f32; 3],
    offsets: [f32; 3],
) -> Rgb {
    let angle = phase * PHASE_SCALE;
    Rgb::from_channels([
        base[0] + amplitude[0] * (angle + offsets[0]).sin(),
        base[1] + amplitude[1] * (angle + offsets[1]).sin(),
        base[2] + amplitude[2] * (angle + offsets[2]).sin(),
    ])
}

/// Wrap a phase into `[0, 1)`.
pub fn cycle_phase(value: f32) -> f32 {
    value.rem_euclid(1.0)
}

/// Parameter bundle for one caller of [`synthesize_color`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorWave {
    pub base: [f32; 3],
    pub amplitude: [f32; 3],
    pub offsets: [f32; 3],
}

impl ColorWave {
    pub const fn new(base: [f32; 3], amplitude: [f32; 3], offsets: [f32; 3]) -> Self {
        Self {
            base,
            amplitude,
            offsets,
        }
    }

    pub fn at(&self, phase: f32) -> Rgb {
        synthesize_color(phase, self.base, self.amplitude, self.offsets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_hex_color(text: &str) -> bool {
        text.len() == 7
            && text.starts_with('#')
            && text[1..].chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn synthesized_colors_are_always_valid_hex() {
        let waves = [
            ColorWave::new([30.0, 21.0, 36.0], [20.0, 15.0, 25.0], CHANNEL_OFFSETS),
            ColorWave::new([250.0, 250.0, 250.0], [400.0, 400.0, 400.0], CHANNEL_OFFSETS),
            ColorWave::new([-50.0, 0.0, 10.0], [30.0, 300.0, 5.0], [1.0, -2.0, 9.0]),
        ];
        let phases = [-1.0e6_f32, -3.7, -0.25, 0.0, 0.1, 0.5, 0.999, 1.0, 42.42, 9.0e5];
        for wave in waves {
            for phase in phases {
                let hex = wave.at(phase).to_hex();
                assert!(is_hex_color(&hex), "bad color {hex} for phase {phase}");
            }
        }
    }

    #[test]
    fn channels_saturate_at_bounds() {
        let hot = synthesize_color(0.25, [300.0; 3], [0.0; 3], CHANNEL_OFFSETS);
        assert_eq!(hot, Rgb::grey(255));
        let cold = synthesize_color(0.25, [-20.0; 3], [0.0; 3], CHANNEL_OFFSETS);
        assert_eq!(cold, Rgb::grey(0));
    }

    #[test]
    fn channel_values_truncate_toward_zero() {
        assert_eq!(Rgb::from_channels([12.9, 0.99, 254.999]), Rgb::new(12, 0, 254));
        assert_eq!(Rgb::from_channels([-0.5, -300.0, 1.0e9]), Rgb::new(0, 0, 255));
    }

    #[test]
    fn parses_palette_hex() {
        assert_eq!(Rgb::parse_hex("#8B0000"), Some(Rgb::new(0x8b, 0, 0)));
        assert_eq!(Rgb::new(0xcd, 0x5c, 0x5c).to_hex(), "#cd5c5c");
        assert_eq!(Rgb::parse_hex("8B0000"), None);
        assert_eq!(Rgb::parse_hex("#8B00"), None);
        assert_eq!(Rgb::parse_hex("#GG0000"), None);
    }

    #[test]
    fn malformed_paint_passes_through() {
        let paint = Paint::parse("crimson");
        assert_eq!(paint, Paint::Raw("crimson".to_string()));
        assert_eq!(paint.scaled(2.0), paint);
        assert_eq!(paint.to_string(), "crimson");
    }

    #[test]
    fn scaling_clamps_each_channel() {
        let rgb = Rgb::new(200, 100, 0);
        assert_eq!(rgb.scaled(1.5), Rgb::new(255, 150, 0));
        assert_eq!(rgb.scaled(0.5), Rgb::new(100, 50, 0));
        assert_eq!(rgb.scaled(-1.0), Rgb::grey(0));
    }

    #[test]
    fn cycle_phase_stays_in_unit_interval() {
        for value in [-2.25_f32, -0.5, 0.0, 0.75, 3.5] {
            let phase = cycle_phase(value);
            assert!((0.0..1.0).contains(&phase), "{value} -> {phase}");
        }
    }
}
