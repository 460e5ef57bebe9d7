//! HSB color cylinder: HSV to RGB conversion, cylindrical placement of
//! colors, the hue/saturation disk texture and a serializable scene layout.

pub mod error;
pub mod hsv;
pub mod img;
pub mod polar;
pub mod scene;

pub use error::{Error, Result};
pub use hsv::{hsv_to_rgb, HSVColor, RGBColor};
pub use polar::{disk_pixel_to_hs, place_on_cylinder, Cylinder, Point3};
pub use scene::{LayoutConfig, SceneLayout};
