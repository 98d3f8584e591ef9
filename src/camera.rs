//! Maps pixels of the output image onto the complex plane.
//!
//! The view is described by a `CameraState`: the size of the square
//! viewport in pixels, a zoom factor (`plane_scale`), a pan offset, and
//! the pixel position of the plane's origin.  The default framing puts
//! the origin two thirds of the way across and half way down, which
//! centres the main body of the Mandelbrot set.
use num::Complex;

use crate::errors::RenderFailure;

/// Fraction of the viewport that spans one unit of the complex plane.
pub const PLANE_SPAN: f64 = 0.3;

/// An immutable snapshot of the view, copied into every tile.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraState {
    /// Side of the square viewport, in pixels.
    pub viewport_size_px: f64,
    /// Zoom.  Equal to `viewport_size_px` at the default framing;
    /// smaller values zoom in.
    pub plane_scale: f64,
    /// Horizontal pan, in scaled pixels.
    pub offset_x: f64,
    /// Vertical pan, in scaled pixels.
    pub offset_y: f64,
    /// Horizontal pixel position of the plane's origin.
    pub origin_px_x: f64,
    /// Vertical pixel position of the plane's origin.
    pub origin_px_y: f64,
}

impl CameraState {
    /// The starting view for a square viewport of `size` pixels.
    pub fn framed(size: f64) -> CameraState {
        CameraState {
            viewport_size_px: size,
            plane_scale: size,
            offset_x: 0.0,
            offset_y: 0.0,
            origin_px_x: size * 2.0 / 3.0,
            origin_px_y: size / 2.0,
        }
    }

    /// Rejects a camera whose scale or viewport is not strictly
    /// positive.  NaN fails both comparisons and is rejected too.
    pub fn validate(&self) -> Result<(), RenderFailure> {
        if !(self.plane_scale > 0.0) || !(self.viewport_size_px > 0.0) {
            return Err(RenderFailure::InvalidCameraState {
                plane_scale: self.plane_scale,
                viewport_size_px: self.viewport_size_px,
            });
        }
        Ok(())
    }

    /// Given the column and row of a pixel, return the point on the
    /// complex plane that pixel samples.
    #[inline]
    pub fn pixel_to_point(&self, px: usize, py: usize) -> Complex<f64> {
        let size = self.viewport_size_px;
        Complex::new(
            ((px as f64) / size * self.plane_scale + self.offset_x - self.origin_px_x)
                / (size * PLANE_SPAN),
            ((py as f64) / size * self.plane_scale + self.offset_y - self.origin_px_y)
                / (size * PLANE_SPAN),
        )
    }
}
