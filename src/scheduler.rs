// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fork-join rendering.  The image is cut into a fixed grid of equal
//! tiles, each tile is handed to its own scoped thread, and the render
//! blocks until every thread has handed its tile back.  Only then are
//! the tiles copied into the frame, so no caller ever sees a partial
//! image.

use crossbeam::thread::ScopedJoinHandle;
use log::{debug, error, trace};
use std::time::Instant;

use crate::camera::CameraState;
use crate::errors::RenderFailure;
use crate::escape::RenderConfig;
use crate::framebuffer::FrameBuffer;
use crate::tile::Tile;

/// Tiles across and down.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Tiles across.
    pub columns: usize,
    /// Tiles down.
    pub rows: usize,
}

impl Grid {
    /// A `columns` by `rows` grid.
    pub fn new(columns: usize, rows: usize) -> Grid {
        Grid { columns, rows }
    }

    /// Number of tiles, and so of worker threads.
    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    /// A grid with no tiles.
    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// Size of each tile for a `width` by `height` image, if the image
    /// divides evenly.
    pub fn tile_size(&self, width: usize, height: usize) -> Result<(usize, usize), RenderFailure> {
        let invalid = RenderFailure::InvalidPartition {
            width,
            height,
            columns: self.columns,
            rows: self.rows,
        };
        if self.is_empty() || width == 0 || height == 0 {
            return Err(invalid);
        }
        if width % self.columns != 0 || height % self.rows != 0 {
            return Err(invalid);
        }
        Ok((width / self.columns, height / self.rows))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(4, 4)
    }
}

/// Renders frames with one worker per grid cell.
#[derive(Copy, Clone, Debug, Default)]
pub struct TileScheduler {
    grid: Grid,
}

impl TileScheduler {
    /// A scheduler for the given grid.
    pub fn new(grid: Grid) -> TileScheduler {
        TileScheduler { grid }
    }

    /// The grid this scheduler partitions by.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Cut a `width` by `height` image into the grid's tiles, row-major.
    /// Each tile gets its own copy of the camera and config.
    pub fn partition(
        &self,
        width: usize,
        height: usize,
        camera: &CameraState,
        config: &RenderConfig,
    ) -> Result<Vec<Tile>, RenderFailure> {
        let (tile_width, tile_height) = self.grid.tile_size(width, height)?;
        let mut tiles = Vec::with_capacity(self.grid.len());
        for row in 0..self.grid.rows {
            for column in 0..self.grid.columns {
                let x0 = column * tile_width;
                let y0 = row * tile_height;
                tiles.push(Tile::new(
                    tiles.len(),
                    (x0, y0),
                    (x0 + tile_width, y0 + tile_height),
                    *camera,
                    *config,
                ));
            }
        }
        Ok(tiles)
    }

    /// Render a complete frame.  All arguments are validated before any
    /// worker starts; a worker that dies fails the whole render.
    pub fn render(
        &self,
        width: usize,
        height: usize,
        camera: &CameraState,
        config: &RenderConfig,
    ) -> Result<FrameBuffer, RenderFailure> {
        camera.validate()?;
        config.validate()?;
        let tiles = self.partition(width, height, camera, config)?;

        debug!(
            "rendering {}x{} as {}x{} tiles, {} iterations",
            width, height, self.grid.columns, self.grid.rows, config.max_iterations
        );
        let started = Instant::now();
        let tiles = dispatch(tiles, Tile::evaluate)?;

        let mut frame = FrameBuffer::new(width, height);
        for tile in &tiles {
            frame.blit(tile);
        }
        debug!("rendered {}x{} in {:?}", width, height, started.elapsed());
        Ok(frame)
    }
}

/// Run `work` over every tile, one scoped thread per tile, and wait for
/// all of them.  Tiles come back in their original order.
fn dispatch<F>(tiles: Vec<Tile>, work: F) -> Result<Vec<Tile>, RenderFailure>
where
    F: Fn(&mut Tile) + Sync,
{
    let work = &work;
    let joined = crossbeam::scope(|spawner| {
        let handles: Vec<ScopedJoinHandle<Tile>> = tiles
            .into_iter()
            .map(|mut tile| {
                trace!("dispatching tile {}", tile.index);
                spawner.spawn(move |_| {
                    work(&mut tile);
                    tile
                })
            })
            .collect();

        handles
            .into_iter()
            .enumerate()
            .map(|(index, handle)| match handle.join() {
                Ok(tile) => {
                    trace!("tile {} complete", index);
                    Ok(tile)
                }
                Err(_) => {
                    error!("worker for tile {} terminated", index);
                    Err(RenderFailure::WorkerFailure { tile: index })
                }
            })
            .collect::<Vec<Result<Tile, RenderFailure>>>()
    });

    // Every handle was joined above, so the scope itself cannot carry a
    // panic; treat it as a failure of the first tile all the same.
    let results = joined.map_err(|_| RenderFailure::WorkerFailure { tile: 0 })?;
    results.into_iter().collect()
}
