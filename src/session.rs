//! Caller-owned view state for an interactive front end.
//!
//! A `Session` keeps the camera and iteration budget that a window
//! would otherwise hold in globals, and guarantees that at most one
//! render runs against it at a time.  It sits above the rendering core:
//! everything here is a convenience for presentation layers.
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::camera::CameraState;
use crate::errors::RenderFailure;
use crate::escape::RenderConfig;
use crate::framebuffer::FrameBuffer;
use crate::scheduler::TileScheduler;

/// How far one press of a "+" or "-" control moves the iteration budget.
pub const ITERATION_STEP: i64 = 5;

/// Holds the in-flight flag for as long as a render runs.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<InFlight<'a>> {
        if flag.swap(true, Ordering::Acquire) {
            None
        } else {
            Some(InFlight(flag))
        }
    }
}

impl<'a> Drop for InFlight<'a> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Copy, Clone, Debug)]
struct View {
    camera: CameraState,
    config: RenderConfig,
}

/// A square view of `size` pixels that can be zoomed, re-budgeted, and
/// rendered.
pub struct Session {
    size: usize,
    scheduler: TileScheduler,
    view: Mutex<View>,
    rendering: AtomicBool,
}

impl Session {
    /// A session at the default framing with the default config.
    pub fn new(size: usize) -> Session {
        Session::with_config(size, TileScheduler::default(), RenderConfig::default())
    }

    /// A session with an explicit scheduler and starting config.
    pub fn with_config(size: usize, scheduler: TileScheduler, config: RenderConfig) -> Session {
        Session {
            size,
            scheduler,
            view: Mutex::new(View {
                camera: CameraState::framed(size as f64),
                config,
            }),
            rendering: AtomicBool::new(false),
        }
    }

    fn view(&self) -> View {
        match self.view.lock() {
            Ok(view) => *view,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn update<F: FnOnce(&mut View)>(&self, f: F) {
        match self.view.lock() {
            Ok(mut view) => f(&mut view),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    /// The current camera.
    pub fn camera(&self) -> CameraState {
        self.view().camera
    }

    /// The current render config.
    pub fn config(&self) -> RenderConfig {
        self.view().config
    }

    /// Whether a render is running right now.
    pub fn is_rendering(&self) -> bool {
        self.rendering.load(Ordering::Acquire)
    }

    /// Render the current view.  Returns `None`, without rendering, if
    /// another render on this session has not finished yet.
    pub fn try_render(&self) -> Option<Result<FrameBuffer, RenderFailure>> {
        let _guard = match InFlight::acquire(&self.rendering) {
            Some(guard) => guard,
            None => {
                debug!("render requested while one is in flight; ignored");
                return None;
            }
        };
        let view = self.view();
        Some(
            self.scheduler
                .render(self.size, self.size, &view.camera, &view.config),
        )
    }

    /// Zoom into the square whose upper left corner is pixel
    /// `(left, top)` and whose side is `side` pixels.  A zero side is
    /// ignored.
    pub fn zoom_to(&self, left: usize, top: usize, side: usize) {
        if side == 0 {
            return;
        }
        let size = self.size as f64;
        self.update(|view| {
            let camera = &mut view.camera;
            camera.offset_x += left as f64 * camera.plane_scale / size;
            camera.offset_y += top as f64 * camera.plane_scale / size;
            camera.plane_scale = side as f64 * camera.plane_scale / size;
            info!(
                "zoomed to scale {} at offset ({}, {})",
                camera.plane_scale, camera.offset_x, camera.offset_y
            );
        });
    }

    /// Move the iteration budget by `delta`, never below 1.
    pub fn adjust_iterations(&self, delta: i64) {
        self.update(|view| {
            let budget = (i64::from(view.config.max_iterations) + delta)
                .max(1)
                .min(i64::from(u32::max_value()));
            view.config.max_iterations = budget as u32;
            info!("iteration budget now {}", budget);
        });
    }

    /// Return to the default framing.  The iteration budget is kept.
    pub fn reset(&self) {
        let size = self.size as f64;
        self.update(|view| view.camera = CameraState::framed(size));
    }
}
