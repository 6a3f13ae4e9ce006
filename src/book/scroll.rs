use std::ops::Range;
use std::sync::Arc;

use crate::catalog::{Catalog, Entry};

/// Number of index rows shown on the contents page.
pub const WINDOW_SIZE: usize = 5;

/// Thumb geometry along the scrollbar, in screen cells.
///
/// The thumb sits at `top` for fraction 0 and at `top + travel` for
/// fraction 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollTrack {
    pub top: i32,
    pub travel: i32,
}

impl ScrollTrack {
    pub fn new(top: i32, travel: i32) -> Self {
        Self {
            top,
            travel: travel.max(0),
        }
    }

    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.travel)
    }

    /// Saturates: pointers above the track give 0, below give 1.
    pub fn fraction_for_pointer(&self, y: i32) -> f32 {
        if self.travel == 0 {
            return 0.0;
        }
        let clamped = y.clamp(self.top, self.bottom());
        (clamped - self.top) as f32 / self.travel as f32
    }

    pub fn pixel_for(&self, fraction: f32) -> i32 {
        let f = fraction.clamp(0.0, 1.0);
        self.top + (f * self.travel as f32).round() as i32
    }
}

impl Default for ScrollTrack {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Scroll state of the contents index: a fraction in `[0, 1]` selecting a
/// window of `window_size` consecutive entries from the name ordering.
///
/// A catalog with no more than `window_size` entries shows all of them and
/// ignores the fraction.
#[derive(Clone, Debug)]
pub struct ScrollWindow {
    catalog: Arc<Catalog>,
    window_size: usize,
    track: ScrollTrack,
    wheel_step: i32,
    fraction: f32,
    dragging: bool,
}

impl ScrollWindow {
    pub fn new(catalog: Arc<Catalog>, window_size: usize, track: ScrollTrack) -> Self {
        Self {
            catalog,
            window_size,
            track,
            wheel_step: 1,
            fraction: 0.0,
            dragging: false,
        }
    }

    pub fn with_wheel_step(mut self, step: i32) -> Self {
        self.wheel_step = step.max(1);
        self
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn track(&self) -> ScrollTrack {
        self.track
    }

    pub fn set_track(&mut self, track: ScrollTrack) {
        self.track = track;
    }

    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// # Panics
    /// If `fraction` is NaN or outside `[0, 1]`.
    pub fn set_fraction(&mut self, fraction: f32) {
        assert!(
            (0.0..=1.0).contains(&fraction),
            "scroll fraction must be within [0, 1], got {fraction}"
        );
        self.fraction = fraction;
    }

    /// Largest valid window start.
    pub fn max_start(&self) -> usize {
        self.catalog.len().saturating_sub(self.window_size)
    }

    /// Positions in the name ordering visible at `fraction`.
    ///
    /// # Panics
    /// If `fraction` is NaN. Finite values outside `[0, 1]` are clamped.
    pub fn window_range(&self, fraction: f32) -> Range<usize> {
        assert!(!fraction.is_nan(), "scroll fraction is NaN");
        let n = self.catalog.len();
        if n <= self.window_size {
            return 0..n;
        }
        let span = n - self.window_size;
        let start = ((fraction.clamp(0.0, 1.0) * span as f32).floor() as usize).min(span);
        start..start + self.window_size
    }

    pub fn window_for(&self, fraction: f32) -> Vec<&Entry> {
        self.catalog.name_range(self.window_range(fraction)).collect()
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.window_range(self.fraction)
    }

    pub fn visible(&self) -> Vec<&Entry> {
        self.window_for(self.fraction)
    }

    pub fn fraction_for_pointer(&self, y: i32) -> f32 {
        self.track.fraction_for_pointer(y)
    }

    /// Screen row of the thumb for the current fraction.
    pub fn thumb_pixel(&self) -> i32 {
        self.track.pixel_for(self.fraction)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Follow the pointer while a drag is engaged. Returns whether the
    /// fraction was recomputed.
    pub fn drag_to(&mut self, y: i32) -> bool {
        if !self.dragging {
            return false;
        }
        self.fraction = self.fraction_for_pointer(y);
        true
    }

    /// Move the thumb by `notches * wheel_step` cells. Positive moves toward
    /// the end of the index. Saturates at either end of the track.
    pub fn on_wheel(&mut self, notches: i32) {
        let delta = notches.saturating_mul(self.wheel_step);
        let pixel = self.thumb_pixel().saturating_add(delta);
        self.fraction = self.fraction_for_pointer(pixel);
    }

    /// Shift the window by whole rows, landing mid-way through the fraction
    /// band that selects the new start so the start survives rounding.
    pub fn scroll_rows(&mut self, rows: isize) {
        let max = self.max_start();
        if max == 0 {
            return;
        }
        let start = self.visible_range().start;
        let target = start.saturating_add_signed(rows).min(max);
        self.fraction = if target == 0 {
            0.0
        } else if target == max {
            1.0
        } else {
            (target as f32 + 0.5) / max as f32
        };
    }
}
