#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tiled Mandelbrot renderer
//!
//! The Mandelbrot set takes a point on the complex plane and repeatedly
//! squares it, adding the original point back each time, measuring how
//! quickly the result goes to infinity.  This "velocity" is the number
//! used to colour the image; points that never leave are the black
//! heart of the set.
//!
//! A render is a single fork-join round.  The image is cut into a
//! fixed grid of equal tiles, every tile is computed on its own thread
//! with its own copy of the view, and once all threads have finished
//! the tiles are merged into one `FrameBuffer`.  Because each pixel's
//! colour depends only on its coordinates, the camera, and the config,
//! the tiled result is identical to computing the pixels one by one.
//!
//! ```
//! use tilebrot::{render, CameraState, RenderConfig};
//!
//! let frame = render(64, 64, &CameraState::framed(64.0), &RenderConfig::default()).unwrap();
//! assert_eq!(frame.width(), 64);
//! ```

pub mod camera;
pub mod errors;
pub mod escape;
pub mod framebuffer;
pub mod palette;
pub mod scheduler;
pub mod session;
pub mod tile;

pub use crate::camera::CameraState;
pub use crate::errors::RenderFailure;
pub use crate::escape::{escape_time, Escape, RenderConfig, Smoothing};
pub use crate::framebuffer::FrameBuffer;
pub use crate::palette::{Palette, Rgb};
pub use crate::scheduler::{Grid, TileScheduler};
pub use crate::session::Session;
pub use crate::tile::{shade_pixel, Tile};

/// Render a `width` by `height` frame on the default 4x4 grid.  Both
/// dimensions must be multiples of 4.
pub fn render(
    width: usize,
    height: usize,
    camera: &CameraState,
    config: &RenderConfig,
) -> Result<FrameBuffer, RenderFailure> {
    TileScheduler::default().render(width, height, camera, config)
}
