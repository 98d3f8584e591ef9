//! A tile is an independently computable rectangle of the output
//! image.  It carries its own copy of the camera and config, and its
//! own pixel buffer, so a worker holding a tile shares nothing with
//! any other worker.
use itertools::iproduct;

use crate::camera::CameraState;
use crate::escape::{escape_time, RenderConfig};
use crate::palette::{colorize, Rgb};

/// The complete per-pixel pipeline: map the pixel to the plane, iterate,
/// colour.  Tiling is only a parallelization of this function.
#[inline]
pub fn shade_pixel(px: usize, py: usize, camera: &CameraState, config: &RenderConfig) -> Rgb {
    let c = camera.pixel_to_point(px, py);
    colorize(&escape_time(c, config), config)
}

/// The rectangle `[x0, x1) x [y0, y1)` of the image.
#[derive(Clone, Debug)]
pub struct Tile {
    /// Row-major position within the grid.
    pub index: usize,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    camera: CameraState,
    config: RenderConfig,
    pixels: Vec<Rgb>,
}

impl Tile {
    /// An unevaluated (black) tile.  Bounds must be non-empty.
    pub fn new(
        index: usize,
        (x0, y0): (usize, usize),
        (x1, y1): (usize, usize),
        camera: CameraState,
        config: RenderConfig,
    ) -> Tile {
        debug_assert!(x0 < x1 && y0 < y1, "empty tile");
        Tile {
            index,
            x0,
            y0,
            x1,
            y1,
            camera,
            config,
            pixels: vec![Rgb::BLACK; (x1 - x0) * (y1 - y0)],
        }
    }

    /// Pixel position of the tile's upper left corner.
    pub fn origin(&self) -> (usize, usize) {
        (self.x0, self.y0)
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }

    /// Whether the image pixel `(x, y)` falls inside this tile.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// The tile's buffer, row-major, `width() * height()` long.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// The colour at image pixel `(x, y)`, if the tile covers it.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.pixels[self.offset(x, y)])
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y - self.y0) * self.width() + (x - self.x0)
    }

    /// Compute every pixel of the tile into its own buffer.  Touches
    /// nothing outside the tile.
    pub fn evaluate(&mut self) {
        for (y, x) in iproduct!(self.y0..self.y1, self.x0..self.x1) {
            let offset = self.offset(x, y);
            self.pixels[offset] = shade_pixel(x, y, &self.camera, &self.config);
        }
    }
}
