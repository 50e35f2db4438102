use std::sync::Mutex;

use image::RgbaImage;

use crate::{foundation::color::Rgba8, imaging::ops::fill};

/// Counters describing pool behavior since construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Canvases currently parked in the pool.
    pub retained: usize,
    /// Canvases allocated because the pool had none of the requested size.
    pub allocated: u64,
    /// Checkouts served from a parked canvas.
    pub reused: u64,
    /// Releases dropped because the pool was full or the size did not match.
    pub dropped: u64,
}

#[derive(Default)]
struct PoolState {
    free: Vec<RgbaImage>,
    stats: PoolStats,
}

/// Bounded checkout/return pool of same-sized RGBA canvases.
///
/// Checkout always overwrites every pixel before handing a buffer out, so nothing drawn by a
/// previous render is visible. Release never clears, and drops canvases of any other size.
/// The lock is held only for the push/pop, never while a canvas is being drawn on.
pub struct CanvasPool {
    width: u32,
    height: u32,
    capacity: usize,
    state: Mutex<PoolState>,
}

impl std::fmt::Debug for CanvasPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasPool")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("capacity", &self.capacity)
            .field("stats", &self.stats())
            .finish()
    }
}

impl CanvasPool {
    /// Pool of `width × height` canvases retaining at most `capacity` of them. A capacity of
    /// `0` disables reuse.
    pub fn new(width: u32, height: u32, capacity: usize) -> Self {
        Self {
            width,
            height,
            capacity,
            state: Mutex::new(PoolState::default()),
        }
    }

    /// Size of every canvas handed out.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Maximum number of retained canvases.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the pool counters.
    pub fn stats(&self) -> PoolStats {
        self.lock().stats
    }

    /// Hand out a canvas filled entirely with `clear`.
    pub fn checkout(&self, clear: Rgba8) -> RgbaImage {
        let reused = {
            let mut state = self.lock();
            let canvas = state.free.pop();
            match canvas {
                Some(_) => state.stats.reused += 1,
                None => state.stats.allocated += 1,
            }
            state.stats.retained = state.free.len();
            canvas
        };

        match reused {
            Some(mut canvas) => {
                fill(&mut canvas, clear);
                canvas
            }
            None => RgbaImage::from_pixel(self.width, self.height, clear),
        }
    }

    /// Return a canvas for later reuse. Dropped when the pool is full or the canvas is not
    /// the pool's size.
    pub fn release(&self, canvas: RgbaImage) {
        let mut state = self.lock();
        if state.free.len() >= self.capacity || canvas.dimensions() != self.dimensions() {
            state.stats.dropped += 1;
            return;
        }
        state.free.push(canvas);
        state.stats.retained = state.free.len();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pool.rs"]
mod tests;
