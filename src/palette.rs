//! Colour mapping.
//!
//! Each channel of the gradient is the same bell curve,
//! `max(0, 1 - k * x^2)`, shifted by a per-channel phase.  With the
//! default phases the ramp runs red, through magenta-ish blue, to green
//! as the normalized escape value climbs towards 1.
use crate::escape::{Escape, RenderConfig};

/// An 8-bit RGB colour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// The colour of interior points.
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

/// Falloff of the default bell curve.
pub const DEFAULT_FALLOFF: f64 = 5.0;

/// The phase-shifted gradient.  The defaults are aesthetic, not
/// derived; any positive falloff and any phases are valid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    /// Shift of the red band.
    pub red_phase: f64,
    /// Shift of the green band.
    pub green_phase: f64,
    /// Shift of the blue band.
    pub blue_phase: f64,
    /// `k` in `1 - k * x^2`; larger values narrow the bands.
    pub falloff: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            red_phase: 0.0,
            green_phase: 0.8,
            blue_phase: 0.5,
            falloff: DEFAULT_FALLOFF,
        }
    }
}

/// The default bell curve.  Symmetric about zero and exactly zero for
/// `|x| >= 1/sqrt(5)`.
pub fn channel(x: f64) -> f64 {
    bell(x, DEFAULT_FALLOFF)
}

fn bell(x: f64, falloff: f64) -> f64 {
    if x.abs() >= 1.0 / falloff.sqrt() {
        return 0.0;
    }
    (1.0 - falloff * x * x).max(0.0)
}

impl Palette {
    /// This palette's bell curve.
    pub fn channel(&self, x: f64) -> f64 {
        bell(x, self.falloff)
    }

    /// The colour at position `t` of the ramp.
    pub fn gradient(&self, t: f64) -> Rgb {
        Rgb(
            to_byte(self.channel(t - self.red_phase)),
            to_byte(self.channel(t - self.green_phase)),
            to_byte(self.channel(t - self.blue_phase)),
        )
    }
}

// Truncates, so a channel at exactly 1.0 is the only way to reach 255.
#[inline]
fn to_byte(c: f64) -> u8 {
    (255.0 * c) as u8
}

/// Colour an escape result: black for interior points, the gradient
/// at the normalized escape value for everything else.
pub fn colorize(escape: &Escape, config: &RenderConfig) -> Rgb {
    match escape.normalized(config) {
        Some(t) => config.palette.gradient(t),
        None => Rgb::BLACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn channel_is_symmetric() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let x: f64 = rng.gen_range(-2.0, 2.0);
            assert_eq!(channel(x), channel(-x));
        }
    }

    #[test]
    fn channel_vanishes_outside_the_band() {
        let edge = 1.0 / 5.0_f64.sqrt();
        assert_eq!(channel(edge), 0.0);
        assert_eq!(channel(-edge), 0.0);
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let x: f64 = rng.gen_range(edge, 100.0);
            assert_eq!(channel(x), 0.0);
            assert_eq!(channel(-x), 0.0);
        }
    }

    #[test]
    fn channel_peaks_at_zero() {
        assert_eq!(channel(0.0), 1.0);
        assert!(channel(0.1) < 1.0 && channel(0.1) > 0.0);
    }

    #[test]
    fn default_gradient_endpoints() {
        let palette = Palette::default();
        // t = 0: red at full, green and blue outside their bands.
        assert_eq!(palette.gradient(0.0), Rgb(255, 0, 0));
        // t = 0.8: green at full, red outside its band, blue partially lit.
        let g = palette.gradient(0.8);
        assert_eq!(g.0, 0);
        assert_eq!(g.1, 255);
        assert!(g.2 > 0);
    }

    #[test]
    fn interior_points_are_black() {
        let config = RenderConfig::new(20, 10.0);
        let escape = Escape {
            iterations: 20,
            magnitude: 0.5,
        };
        assert_eq!(colorize(&escape, &config), Rgb::BLACK);
    }

    #[test]
    fn early_escape_is_red() {
        // t near zero sits at the peak of the red band.
        let config = RenderConfig::new(1000, 4.0);
        let escape = Escape {
            iterations: 0,
            magnitude: 3.0,
        };
        let color = colorize(&escape, &config);
        assert!(color.0 > 250);
        assert_eq!(color.1, 0);
        assert_eq!(color.2, 0);
    }

    #[test]
    fn custom_falloff_widens_the_bands() {
        let wide = Palette {
            falloff: 1.0,
            ..Palette::default()
        };
        assert!(wide.channel(0.9) > 0.0);
        assert_eq!(channel(0.9), 0.0);
    }
}
