//! Renderer-agnostic description of the HSB cylinder scene.
//!
//! Every object is plain data (positions in scene units, colors as `#rrggbb`)
//! so that any 3D front end can instantiate the meshes it needs.

use std::f64::consts::TAU;
use std::io::Write;

use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::hsv::{hsv_to_rgb, HSVColor};
use crate::img::MAX_TEXTURE_SIZE;
use crate::polar::{Cylinder, Point3};

const BACKGROUND: &str = "#999999";
const WHITE: &str = "#ffffff";
const RING_COLOR: &str = "#333333";
const SPOKE_COLOR: &str = "#222222";
const SATURATION_COLOR: &str = "#222222";
const HUE_COLOR: &str = "#555555";

const DISK_SEGMENTS: u32 = 256;
const RING_SEGMENTS: u32 = 64;
// Lift above the disk to avoid z-fighting.
const GRID_LIFT: f64 = 0.01;
const GUIDE_LIFT: f64 = 0.02;
const LABEL_GAP: f64 = 6.0;
const HUE_ARROW_THETA: f64 = 0.1;
const MARKER_RADIUS: f64 = 1.8;
const MARKER_SEGMENTS: u32 = 16;
const ORIGIN_RADIUS: f64 = 1.2;
const ORIGIN_SEGMENTS: u32 = 12;
// Height of a label sprite; its width follows the rendered text's aspect.
const LABEL_SCALE: f64 = 8.0;
const HUE_TUBE: f64 = 0.3;
const HUE_RADIAL_SEGMENTS: u32 = 8;
const HUE_TUBULAR_SEGMENTS: u32 = 128;
const ORBIT_DAMPING: f64 = 0.05;

const ARROW_CONE: Cone = Cone { radius: 2.2, height: 6.0, segments: 16 };

const DISK_MATERIAL: DiskMaterial = DiskMaterial {
    metalness: 0.2,
    roughness: 0.25,
    clearcoat: 0.3,
    clearcoat_roughness: 0.4,
    double_sided: true,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub radius: f64,
    pub height: f64,
    pub rings: u32,
    pub spokes: u32,
    pub texture_size: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            radius: 80.0,
            height: 100.0,
            rings: 6,
            spokes: 12,
            texture_size: 1024,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        Cylinder::checked(self.radius, self.height)?;
        if self.rings == 0 || self.spokes == 0 {
            return Err(Error::InvalidConfig("grid needs at least one ring and one spoke".into()));
        }
        if self.texture_size == 0 || self.texture_size > MAX_TEXTURE_SIZE {
            return Err(Error::InvalidConfig(format!(
                "texture size must be within 1..={MAX_TEXTURE_SIZE}, got {}",
                self.texture_size
            )));
        }
        Ok(())
    }

    pub fn cylinder(&self) -> Cylinder {
        Cylinder::new(self.radius, self.height)
    }

    /// Elevation of the 50% brightness plane holding the disk and grid.
    pub fn mid_plane(&self) -> f64 {
        self.height * 0.5
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Camera {
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    pub position: Point3,
    pub target: Point3,
}

#[derive(Debug, Clone, Serialize)]
pub struct Controls {
    pub damping_factor: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Light {
    Ambient { color: String, intensity: f64 },
    Directional { color: String, intensity: f64, position: Point3 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiskMaterial {
    pub metalness: f64,
    pub roughness: f64,
    pub clearcoat: f64,
    pub clearcoat_roughness: f64,
    pub double_sided: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Disk {
    pub radius: f64,
    pub elevation: f64,
    pub segments: u32,
    pub texture_size: u32,
    pub material: DiskMaterial,
}

/// Arrowhead; its tip points along the owning guide's direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cone {
    pub radius: f64,
    pub height: f64,
    pub segments: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ring {
    pub radius: f64,
    pub elevation: f64,
    pub segments: u32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub start: Point3,
    pub end: Point3,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub label: String,
    pub color: String,
    pub start: Point3,
    pub end: Point3,
    pub direction: Point3,
    pub arrow: Point3,
    pub arrow_cone: Cone,
    pub label_position: Point3,
    pub label_scale: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sphere {
    pub center: Point3,
    pub radius: f64,
    pub width_segments: u32,
    pub height_segments: u32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HueGuide {
    pub color: String,
    pub radius: f64,
    pub tube: f64,
    pub radial_segments: u32,
    pub tubular_segments: u32,
    pub elevation: f64,
    pub arrow: Point3,
    pub arrow_direction: Point3,
    pub arrow_cone: Cone,
    pub label_position: Point3,
    pub label_scale: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    pub hsv: HSVColor,
    pub marker: Sphere,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneLayout {
    pub background: String,
    pub camera: Camera,
    pub controls: Controls,
    pub lights: Vec<Light>,
    pub disk: Disk,
    pub rings: Vec<Ring>,
    pub spokes: Vec<Segment>,
    pub axes: Vec<Axis>,
    pub origin: Sphere,
    pub hue_guide: HueGuide,
    pub samples: Vec<Sample>,
}

/// The reference markers: the six primaries and secondaries plus a few
/// intermediate tones.
pub fn default_samples() -> Vec<HSVColor> {
    vec![
        HSVColor::new(0.0, 1.0, 1.0),
        HSVColor::new(120.0, 1.0, 1.0),
        HSVColor::new(240.0, 1.0, 1.0),
        HSVColor::new(60.0, 1.0, 1.0),
        HSVColor::new(300.0, 1.0, 1.0),
        HSVColor::new(180.0, 1.0, 1.0),
        HSVColor::new(0.0, 0.0, 0.2),
        HSVColor::new(0.0, 0.5, 1.0),
        HSVColor::new(30.0, 0.8, 0.8),
        HSVColor::new(200.0, 0.5, 0.7),
    ]
}

/// Uniformly distributed samples; the same seed always yields the same set.
pub fn random_samples(count: usize, seed: u64) -> Vec<HSVColor> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let hue = rng.gen_range(0.0..360.0);
            let sat = rng.gen_range(0.0..=1.0);
            let val = rng.gen_range(0.0..=1.0);
            HSVColor::new(hue, sat, val)
        })
        .collect()
}

fn axis(label: &str, color: &str, start: Point3, dir: Point3, length: f64, arrow_offset: f64) -> Axis {
    let at = |d: f64| Point3::new(start.x + dir.x * d, start.y + dir.y * d, start.z + dir.z * d);
    Axis {
        label: label.to_string(),
        color: color.to_string(),
        start,
        end: at(length),
        direction: dir,
        arrow: at(length + arrow_offset),
        arrow_cone: ARROW_CONE,
        label_position: at(length + arrow_offset + LABEL_GAP),
        label_scale: LABEL_SCALE,
    }
}

impl SceneLayout {
    pub fn build(config: &LayoutConfig, samples: &[HSVColor]) -> Result<Self> {
        config.validate()?;

        let LayoutConfig { radius, height, rings, spokes, texture_size } = *config;
        let mid = config.mid_plane();
        let cylinder = config.cylinder();

        let rings = (1..=rings)
            .map(|i| Ring {
                radius: i as f64 / rings as f64 * radius,
                elevation: mid + GRID_LIFT,
                segments: RING_SEGMENTS,
                color: RING_COLOR.to_string(),
            })
            .collect();

        let spokes = (0..spokes)
            .map(|i| {
                let theta = i as f64 / spokes as f64 * TAU;
                Segment {
                    start: Point3::new(0.0, mid + GRID_LIFT, 0.0),
                    end: Point3::new(theta.cos() * radius, mid + GRID_LIFT, theta.sin() * radius),
                    color: SPOKE_COLOR.to_string(),
                }
            })
            .collect();

        let axes = vec![
            axis("Brightness", WHITE, Point3::ORIGIN, Point3::new(0.0, 1.0, 0.0), height, 10.0),
            axis(
                "Saturation",
                SATURATION_COLOR,
                Point3::new(0.0, mid + GUIDE_LIFT, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                radius,
                15.0,
            ),
        ];

        let rim = radius + 0.5;
        let hue_guide = HueGuide {
            color: HUE_COLOR.to_string(),
            radius,
            tube: HUE_TUBE,
            radial_segments: HUE_RADIAL_SEGMENTS,
            tubular_segments: HUE_TUBULAR_SEGMENTS,
            elevation: mid + GUIDE_LIFT,
            arrow: Point3::new(HUE_ARROW_THETA.cos() * rim, mid + GUIDE_LIFT, HUE_ARROW_THETA.sin() * rim),
            arrow_direction: Point3::new(-HUE_ARROW_THETA.sin(), 0.0, HUE_ARROW_THETA.cos()),
            arrow_cone: ARROW_CONE,
            label_position: Point3::new(radius + LABEL_GAP, mid + 1.0, 5.0),
            label_scale: LABEL_SCALE,
        };

        let samples = samples
            .iter()
            .map(|hsv| Sample {
                hsv: *hsv,
                marker: Sphere {
                    center: cylinder.place(hsv),
                    radius: MARKER_RADIUS,
                    width_segments: MARKER_SEGMENTS,
                    height_segments: MARKER_SEGMENTS,
                    color: hsv_to_rgb(hsv.hue, hsv.sat, hsv.val).to_hex(),
                },
            })
            .collect::<Vec<_>>();

        debug!("Built scene layout with {} samples", samples.len());

        Ok(SceneLayout {
            background: BACKGROUND.to_string(),
            camera: Camera {
                fov_deg: 45.0,
                near: 0.1,
                far: 2000.0,
                position: Point3::new(200.0, 140.0, 180.0),
                target: Point3::new(0.0, mid, 0.0),
            },
            controls: Controls { damping_factor: ORBIT_DAMPING },
            lights: vec![
                Light::Ambient { color: WHITE.to_string(), intensity: 0.6 },
                Light::Directional {
                    color: WHITE.to_string(),
                    intensity: 0.8,
                    position: Point3::new(200.0, 200.0, 200.0),
                },
            ],
            disk: Disk {
                radius,
                elevation: mid,
                segments: DISK_SEGMENTS,
                texture_size,
                material: DISK_MATERIAL,
            },
            rings,
            spokes,
            axes,
            origin: Sphere {
                center: Point3::ORIGIN,
                radius: ORIGIN_RADIUS,
                width_segments: ORIGIN_SEGMENTS,
                height_segments: ORIGIN_SEGMENTS,
                color: WHITE.to_string(),
            },
            hue_guide,
            samples,
        })
    }

    pub fn write_json<W: Write>(&self, w: W) -> Result<()> {
        serde_json::to_writer_pretty(w, self)?;
        Ok(())
    }
}
