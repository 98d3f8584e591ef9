//! The escape-time iteration at the heart of the Mandelbrot set.
//!
//! A point `c` is iterated as `z = z * z + c` from `z = 0` until either
//! the squared orbit magnitude exceeds the configured limit or the
//! iteration budget runs out.  The number of steps taken before escape
//! is the "velocity" used to colour the point.
use num::Complex;

use crate::errors::RenderFailure;
use crate::palette::Palette;

/// Iteration budget used when the caller has no preference.
pub const DEFAULT_MAX_ITERATIONS: u32 = 20;

/// Squared escape radius used when the caller has no preference.
pub const DEFAULT_ORBIT_LIMIT_SQUARED: f64 = 10.0;

/// How an escape count becomes a position in the colour ramp.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Smoothing {
    /// Fractional iteration counts derived from the final orbit
    /// magnitude.  No banding, but two logarithms per pixel.
    Continuous,
    /// Raw integer iteration counts.  Faster, visibly banded.
    Banded,
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::Continuous
    }
}

/// Per-render parameters.  Fixed for the duration of one render, free
/// to change between renders.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Upper bound on iterations per point.  At least 1.
    pub max_iterations: u32,
    /// Squared magnitude beyond which an orbit has escaped.
    pub orbit_limit_squared: f64,
    /// Whether escape counts are smoothed before colouring.
    pub smoothing: Smoothing,
    /// The colour ramp.
    pub palette: Palette,
}

impl RenderConfig {
    /// A config with the given budget and limit, continuous smoothing,
    /// and the default palette.
    pub fn new(max_iterations: u32, orbit_limit_squared: f64) -> RenderConfig {
        RenderConfig {
            max_iterations,
            orbit_limit_squared,
            smoothing: Smoothing::default(),
            palette: Palette::default(),
        }
    }

    /// Replace the smoothing mode.
    pub fn with_smoothing(self, smoothing: Smoothing) -> RenderConfig {
        RenderConfig { smoothing, ..self }
    }

    /// Replace the palette.
    pub fn with_palette(self, palette: Palette) -> RenderConfig {
        RenderConfig { palette, ..self }
    }

    /// Rejects an empty budget or a non-positive orbit limit.
    pub fn validate(&self) -> Result<(), RenderFailure> {
        if self.max_iterations == 0 || !(self.orbit_limit_squared > 0.0) {
            return Err(RenderFailure::InvalidRenderConfig {
                max_iterations: self.max_iterations,
                orbit_limit_squared: self.orbit_limit_squared,
            });
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig::new(DEFAULT_MAX_ITERATIONS, DEFAULT_ORBIT_LIMIT_SQUARED)
    }
}

/// The outcome of iterating a single point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Escape {
    /// Steps completed before the orbit escaped, or the full budget if
    /// it never did.
    pub iterations: u32,
    /// `|z|` when the iteration stopped.
    pub magnitude: f64,
}

impl Escape {
    /// Interior points never escaped, or escaped on the final step.
    /// Either way they are painted black.
    #[inline]
    pub fn is_interior(&self, max_iterations: u32) -> bool {
        self.iterations.saturating_add(1) >= max_iterations
    }

    /// The continuous iteration count, `n - log2(log2(|z|))`.  The inner
    /// logarithm is clamped at 1 so the outer one never sees a
    /// non-positive argument.
    #[inline]
    pub fn smooth(&self) -> f64 {
        let inner = self.magnitude.log2().max(1.0);
        f64::from(self.iterations) - inner.log2()
    }

    /// Position in the iteration range, nominally in `[0, 1)`, or `None`
    /// for interior points.
    pub fn normalized(&self, config: &RenderConfig) -> Option<f64> {
        if self.is_interior(config.max_iterations) {
            return None;
        }
        let n = match config.smoothing {
            Smoothing::Continuous => self.smooth(),
            Smoothing::Banded => f64::from(self.iterations),
        };
        Some(n / f64::from(config.max_iterations))
    }
}

/// Iterate `c` under `config`.  Reentrant; depends only on its inputs.
#[inline]
pub fn escape_time(c: Complex<f64>, config: &RenderConfig) -> Escape {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    let mut iterations = 0;
    while iterations < config.max_iterations {
        z = z * z + c;
        if z.norm_sqr() > config.orbit_limit_squared {
            break;
        }
        iterations += 1;
    }
    Escape {
        iterations,
        magnitude: z.norm(),
    }
}
