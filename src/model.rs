//! Core data models for the tech map.
//! Geometry primitives shared by the viewport controller and both renderers,
//! plus the label entries stored in the registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ZERO: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2 {
    type Output = Point2;
    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;
    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;
    fn mul(self, k: f64) -> Point2 {
        Point2::new(self.x * k, self.y * k)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn to_vec3(self) -> glam::Vec3 {
        glam::Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

/// Viewport dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn center(self) -> Point2 {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color {0:?}, expected #rrggbb")]
pub struct InvalidColor(pub String);

/// A `#rrggbb` color as authored in the technology table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub fn parse(raw: &str) -> Result<Self, InvalidColor> {
        let invalid = || InvalidColor(raw.to_string());
        let hex = raw.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// CSS `#rrggbbaa` form, used for the glow shadow.
    pub fn with_alpha(self, alpha: u8) -> String {
        format!("{self}{alpha:02x}")
    }

    pub fn to_rgb_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for HexColor {
    type Error = InvalidColor;
    fn try_from(raw: String) -> Result<Self, Self::Error> {
        HexColor::parse(&raw)
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> String {
        c.to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelEntry {
    pub name: String,
    pub color: HexColor,
    /// Position in percent of the viewport, used by the flat renderer.
    pub flat: Point2,
    /// World-space position, used by the scene renderer.
    pub spatial: Point3,
}

impl LabelEntry {
    /// Flat position scaled to a viewport of `size` pixels, before pan/zoom.
    pub fn flat_base(&self, size: Size) -> Point2 {
        Point2::new(
            self.flat.x / 100.0 * size.width,
            self.flat.y / 100.0 * size.height,
        )
    }

    /// Box extents of the label mesh in world units.
    pub fn box_extent(&self) -> glam::Vec3 {
        glam::Vec3::new(self.name.chars().count() as f32 * 0.3, 0.5, 0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_parses_mixed_case() {
        let c = HexColor::parse("#FF9900").unwrap();
        assert_eq!((c.r, c.g, c.b), (255, 153, 0));
        assert_eq!(c.to_string(), "#ff9900");
        assert_eq!(c.with_alpha(0x40), "#ff990040");
    }

    #[test]
    fn hex_color_rejects_malformed() {
        assert!(HexColor::parse("3178c6").is_err());
        assert!(HexColor::parse("#3178c").is_err());
        assert!(HexColor::parse("#zz78c6").is_err());
        assert!(HexColor::parse("#éé78c").is_err());
    }

    #[test]
    fn flat_base_scales_percent_to_pixels() {
        let entry = LabelEntry {
            name: "TypeScript".into(),
            color: HexColor::parse("#3178c6").unwrap(),
            flat: Point2::new(20.0, 60.0),
            spatial: Point3::default(),
        };
        let base = entry.flat_base(Size {
            width: 1000.0,
            height: 500.0,
        });
        assert_eq!(base, Point2::new(200.0, 300.0));
        assert!((entry.box_extent().x - 3.0).abs() < 1e-6);
    }
}
