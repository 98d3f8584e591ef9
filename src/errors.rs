//! The single failure type surfaced by a render.  There is no partial
//! success: a render either returns a complete frame or one of these.
use failure::Fail;

/// Why a render produced no frame.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum RenderFailure {
    /// The image cannot be cut into equal tiles by the requested grid.
    #[fail(
        display = "cannot partition a {}x{} image into a {}x{} grid of equal tiles",
        width, height, columns, rows
    )]
    InvalidPartition {
        /// Image width in pixels.
        width: usize,
        /// Image height in pixels.
        height: usize,
        /// Tiles across.
        columns: usize,
        /// Tiles down.
        rows: usize,
    },

    /// The camera would map the image onto a degenerate plane.
    #[fail(
        display = "invalid camera: plane scale {} and viewport size {} must both be positive",
        plane_scale, viewport_size_px
    )]
    InvalidCameraState {
        /// The rejected zoom factor.
        plane_scale: f64,
        /// The rejected viewport size.
        viewport_size_px: f64,
    },

    /// The iteration budget or the orbit limit is unusable.
    #[fail(
        display = "invalid render config: {} iterations with orbit limit {}",
        max_iterations, orbit_limit_squared
    )]
    InvalidRenderConfig {
        /// The rejected iteration budget.
        max_iterations: u32,
        /// The rejected squared escape radius.
        orbit_limit_squared: f64,
    },

    /// A worker terminated without handing its tile back.
    #[fail(display = "worker for tile {} did not complete", tile)]
    WorkerFailure {
        /// Index of the tile, in row-major grid order.
        tile: usize,
    },
}
