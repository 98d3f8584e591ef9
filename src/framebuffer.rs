//! The image surface a render merges its tiles into.
use crate::palette::Rgb;
use crate::tile::Tile;

/// An owned, row-major RGB grid.  Writes take `&mut self`, so only one
/// writer exists at a time; the type is `Send` and is handed to the
/// caller once every tile has been merged.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl FrameBuffer {
    /// A black frame.
    pub fn new(width: usize, height: usize) -> FrameBuffer {
        FrameBuffer {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The frame's pixels, row-major.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// The colour at `(x, y)`.  Panics when out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.pixels[y * self.width + x]
    }

    /// Set the colour at `(x, y)`.  Panics when out of bounds.
    pub fn write_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.pixels[y * self.width + x] = color;
    }

    /// Copy a tile's buffer into the frame at the tile's origin, one
    /// row at a time.
    pub fn blit(&mut self, tile: &Tile) {
        let (x0, y0) = tile.origin();
        let width = tile.width();
        assert!(
            x0 + width <= self.width && y0 + tile.height() <= self.height,
            "tile extends past the frame"
        );
        for (row, source) in tile.pixels().chunks(width).enumerate() {
            let start = (y0 + row) * self.width + x0;
            self.pixels[start..start + width].copy_from_slice(source);
        }
    }

    /// The frame as packed `R, G, B` bytes, ready for an encoder.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for p in &self.pixels {
            bytes.extend_from_slice(&[p.0, p.1, p.2]);
        }
        bytes
    }
}
