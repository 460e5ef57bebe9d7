//! Cylindrical HSB coordinates.
//!
//! Hue is the azimuth measured from +x, counterclockwise when looking down
//! from +y. Saturation is the distance from the axis and value is the
//! elevation. The disk texture uses the same convention in image space, so
//! a marker's `(x, z)` lands on the matching texel of the disk.

use std::f64::consts::TAU;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::hsv::HSVColor;

/// A position in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }
}

/// Scale of the color cylinder: saturation 1 reaches `radius`, value 1
/// reaches `height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub radius: f64,
    pub height: f64,
}

impl Cylinder {
    pub fn new(radius: f64, height: f64) -> Self {
        Cylinder { radius, height }
    }

    /// Rejects scales that are not finite and positive.
    pub fn checked(radius: f64, height: f64) -> Result<Self> {
        for (name, value) in [("radius", radius), ("height", height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(Cylinder { radius, height })
    }

    pub fn place(&self, color: &HSVColor) -> Point3 {
        place_on_cylinder(color.hue, color.sat, color.val, self.radius, self.height)
    }
}

pub fn place_on_cylinder(hue: f64, sat: f64, val: f64, radius: f64, height: f64) -> Point3 {
    let theta = hue.to_radians();
    let r = sat * radius;
    Point3::new(theta.cos() * r, val * height, theta.sin() * r)
}

/// Hue (degrees) and saturation under pixel `(x, y)` of a square disk
/// texture with side `size`, or `None` outside the unit disk.
pub fn disk_pixel_to_hs(x: u32, y: u32, size: u32) -> Option<(f64, f64)> {
    let half = size as f64 / 2.0;
    let dx = (x as f64 - half) / half;
    let dy = (y as f64 - half) / half;
    let r = (dx * dx + dy * dy).sqrt();
    if r > 1.0 {
        return None;
    }

    let mut theta = dy.atan2(dx);
    if theta < 0.0 {
        theta += TAU;
    }
    Some((theta.to_degrees(), r))
}
