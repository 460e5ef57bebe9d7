use serde::Serialize;

use crate::error::{Error, Result};

/// A color in the HSV (HSB) model.
///
/// `hue` is in degrees and wraps modulo 360. `sat` and `val` are fractions in
/// `[0, 1]`; they are not clamped during conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HSVColor {
    pub hue: f64,
    pub sat: f64,
    pub val: f64,
}

/// Linear channel intensities in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RGBColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// Maps any real hue into `[0, 360)`.
pub fn normalize_hue(hue: f64) -> f64 {
    ((hue % 360.0) + 360.0) % 360.0
}

pub fn hsv_to_rgb(hue: f64, sat: f64, val: f64) -> RGBColor {
    let c = val * sat;
    let h = normalize_hue(hue) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = val - c;

    let (r1, g1, b1): (f64, f64, f64) = match h {
        v if v < 1.0 => (c, x, 0.0),
        v if v < 2.0 => (x, c, 0.0),
        v if v < 3.0 => (0.0, c, x),
        v if v < 4.0 => (0.0, x, c),
        v if v < 5.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    RGBColor {
        red: r1 + m,
        green: g1 + m,
        blue: b1 + m,
    }
}

impl HSVColor {
    pub const fn new(hue: f64, sat: f64, val: f64) -> Self {
        HSVColor { hue, sat, val }
    }

    /// Builds a color from untrusted input: the hue must be finite, saturation
    /// and value must lie in `[0, 1]`.
    pub fn checked(hue: f64, sat: f64, val: f64) -> Result<Self> {
        if !hue.is_finite() {
            return Err(Error::NonFinite { name: "hue", value: hue });
        }
        for (name, value) in [("saturation", sat), ("value", val)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::OutOfRange { name, value });
            }
        }
        Ok(HSVColor { hue, sat, val })
    }

    pub fn from_rgb(rgb: RGBColor) -> Self {
        let RGBColor { red: r, green: g, blue: b } = rgb;

        let v = r.max(g.max(b));
        let c = v - r.min(g.min(b));

        let h =
            (if c == 0.0 {
                0.0
            } else if v == r {
                ((g - b) / c) % 6.0
            } else if v == g {
                ((b - r) / c) + 2.0
            } else {
                ((r - g) / c) + 4.0
            }) * 60.0;

        let s = if v == 0.0 { 0.0 } else { c / v };

        HSVColor { hue: normalize_hue(h), sat: s, val: v }
    }

    pub fn to_rgb(&self) -> RGBColor {
        hsv_to_rgb(self.hue, self.sat, self.val)
    }

    /// Wraps the hue and clamps saturation and value into `[0, 1]`.
    pub fn clamped(&self) -> Self {
        HSVColor {
            hue: normalize_hue(self.hue),
            sat: self.sat.clamp(0.0, 1.0),
            val: self.val.clamp(0.0, 1.0),
        }
    }
}

impl RGBColor {
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        RGBColor { red, green, blue }
    }

    /// 8-bit channels, rounding half up. Channels outside `[0, 1]` saturate.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * u8::MAX as f64).round() as u8;
        [q(self.red), q(self.green), q(self.blue)]
    }

    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_rgb(actual: RGBColor, expected: (f64, f64, f64)) {
        assert_abs_diff_eq!(actual.red, expected.0, epsilon = 1e-9);
        assert_abs_diff_eq!(actual.green, expected.1, epsilon = 1e-9);
        assert_abs_diff_eq!(actual.blue, expected.2, epsilon = 1e-9);
    }

    #[test]
    fn canonical_sector_colors() {
        let expected = [
            (0.0, (1.0, 0.0, 0.0)),
            (60.0, (1.0, 1.0, 0.0)),
            (120.0, (0.0, 1.0, 0.0)),
            (180.0, (0.0, 1.0, 1.0)),
            (240.0, (0.0, 0.0, 1.0)),
            (300.0, (1.0, 0.0, 1.0)),
        ];
        for (hue, rgb) in expected {
            assert_rgb(hsv_to_rgb(hue, 1.0, 1.0), rgb);
        }
    }

    #[test]
    fn zero_saturation_is_gray_for_any_hue() {
        for hue in [-725.0, -30.0, 0.0, 17.5, 90.0, 359.9, 360.0, 1000.0] {
            for val in [0.0, 0.2, 0.5, 1.0] {
                assert_rgb(hsv_to_rgb(hue, 0.0, val), (val, val, val));
            }
        }
    }

    #[test]
    fn zero_value_is_black_for_any_hue() {
        for hue in [-90.0, 0.0, 45.0, 200.0, 359.0, 720.0] {
            assert_rgb(hsv_to_rgb(hue, 1.0, 0.0), (0.0, 0.0, 0.0));
        }
    }

    #[test]
    fn hue_wraps_around() {
        assert_rgb(hsv_to_rgb(360.0, 1.0, 1.0), (1.0, 0.0, 0.0));
        assert_rgb(hsv_to_rgb(-120.0, 1.0, 1.0), (0.0, 0.0, 1.0));
        assert_rgb(hsv_to_rgb(420.0, 1.0, 1.0), (1.0, 1.0, 0.0));
        assert_rgb(hsv_to_rgb(-1e-20, 1.0, 1.0), (1.0, 0.0, 0.0));
    }

    #[test]
    fn normalize_hue_range() {
        assert_eq!(normalize_hue(0.0), 0.0);
        assert_eq!(normalize_hue(360.0), 0.0);
        assert_eq!(normalize_hue(-90.0), 270.0);
        assert_eq!(normalize_hue(725.0), 5.0);
        assert!(normalize_hue(-1e-20) < 360.0);
    }

    #[test]
    fn secondary_interpolation() {
        // Orange sample from the default set.
        assert_rgb(hsv_to_rgb(30.0, 0.8, 0.8), (0.8, 0.48, 0.16));
    }

    #[test]
    fn out_of_range_inputs_propagate() {
        let rgb = hsv_to_rgb(0.0, 1.0, 2.0);
        assert_abs_diff_eq!(rgb.red, 2.0, epsilon = 1e-9);
        assert_eq!(rgb.to_rgb8(), [255, 0, 0]);

        let c = HSVColor::new(-30.0, 1.5, -0.25).clamped();
        assert_eq!(c, HSVColor::new(330.0, 1.0, 0.0));
    }

    #[test]
    fn checked_rejects_bad_input() {
        assert_eq!(HSVColor::checked(-30.0, 0.0, 1.0).unwrap(), HSVColor::new(-30.0, 0.0, 1.0));
        assert!(matches!(
            HSVColor::checked(10.0, -0.5, 1.0),
            Err(Error::OutOfRange { name: "saturation", .. })
        ));
        assert!(matches!(
            HSVColor::checked(10.0, 1.0, 1.5),
            Err(Error::OutOfRange { name: "value", .. })
        ));
        assert!(matches!(
            HSVColor::checked(10.0, f64::NAN, 1.0),
            Err(Error::OutOfRange { name: "saturation", .. })
        ));
        for hue in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert!(matches!(
                HSVColor::checked(hue, 1.0, 1.0),
                Err(Error::NonFinite { name: "hue", .. })
            ));
        }
    }

    #[test]
    fn inverse_is_consistent() {
        for hue in (0..360).step_by(15) {
            let hsv = HSVColor::new(hue as f64, 0.75, 0.6);
            let back = HSVColor::from_rgb(hsv.to_rgb());
            assert_abs_diff_eq!(back.hue, hsv.hue, epsilon = 1e-9);
            assert_abs_diff_eq!(back.sat, hsv.sat, epsilon = 1e-9);
            assert_abs_diff_eq!(back.val, hsv.val, epsilon = 1e-9);
        }
    }

    #[test]
    fn inverse_of_gray_and_black() {
        let gray = HSVColor::from_rgb(RGBColor::new(0.2, 0.2, 0.2));
        assert_eq!(gray.hue, 0.0);
        assert_eq!(gray.sat, 0.0);
        assert_abs_diff_eq!(gray.val, 0.2);

        let black = HSVColor::from_rgb(RGBColor::new(0.0, 0.0, 0.0));
        assert_eq!(black, HSVColor::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn eight_bit_and_hex() {
        let rgb = RGBColor::new(1.0, 0.5, 0.0);
        assert_eq!(rgb.to_rgb8(), [255, 128, 0]);
        assert_eq!(rgb.to_hex(), "#ff8000");
        assert_eq!(hsv_to_rgb(0.0, 0.0, 0.6).to_hex(), "#999999");
    }
}
