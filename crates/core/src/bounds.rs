//! Selection rectangle geometry.
//!
//! A [`Bounds`] is an axis-aligned rectangle in screen pixel coordinates.
//! It is produced by the selection overlay and consumed by the frame
//! grabber, which crops the captured frame to it.

/// An axis-aligned rectangle in screen pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    /// Creates bounds from explicit origin and size.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the rectangle spanned by two drag corners.
    ///
    /// The anchor and the current pointer position may be in any relative
    /// arrangement; the origin is the component-wise minimum and the size
    /// the absolute difference, so dragging in all four directions yields
    /// a non-negative rectangle.
    pub fn from_corners(anchor: (f32, f32), current: (f32, f32)) -> Self {
        let left = anchor.0.min(current.0).max(0.0);
        let top = anchor.1.min(current.1).max(0.0);
        let width = (anchor.0 - current.0).abs();
        let height = (anchor.1 - current.1).abs();

        Self {
            x: left.round() as u32,
            y: top.round() as u32,
            width: width.round() as u32,
            height: height.round() as u32,
        }
    }

    /// Whether the rectangle has zero area.
    ///
    /// A degenerate selection (no drag, or a drag along a single axis) is
    /// treated as a cancellation by the selector, never captured.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clamps the rectangle so it fits inside a frame of the given size.
    ///
    /// The origin is clamped first, then the size is shrunk so the
    /// rectangle never extends past the frame edge. The result may be
    /// empty if the origin lies outside the frame.
    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> Self {
        let x = self.x.min(frame_width);
        let y = self.y.min(frame_height);
        let width = self.width.min(frame_width.saturating_sub(x));
        let height = self.height.min(frame_height.saturating_sub(y));

        Self {
            x,
            y,
            width,
            height,
        }
    }
}
