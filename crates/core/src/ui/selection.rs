//! Selection drag handling.
//!
//! Pure drag-state processing for the region selector: anchoring on
//! pointer-down, tracking pointer-move, and classifying pointer-up as a
//! completed or degenerate selection.

use eframe::egui;

use crate::bounds::Bounds;

/// Result of processing selection input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionEvent {
    /// User started a new selection drag.
    Started,
    /// User is actively dragging.
    Dragging,
    /// User completed a selection with non-zero area.
    Completed(Bounds),
    /// User released without dragging out an area; treated as cancel.
    Cancelled,
    /// No selection event occurred.
    None,
}

/// Converts two pointer positions to screen-pixel bounds.
///
/// Naive pixel mapping: one UI point maps to one pixel, no DPI scaling.
pub fn bounds_from_positions(anchor: egui::Pos2, current: egui::Pos2) -> Bounds {
    Bounds::from_corners((anchor.x, anchor.y), (current.x, current.y))
}

/// Processes drag events and returns the selection state change.
///
/// The anchor is recorded on pointer-down and the current position is
/// updated while dragging. On release, a zero-area rectangle yields
/// [`SelectionEvent::Cancelled`] rather than a selection.
///
/// # Arguments
/// * `response` - The egui response from the interaction area
/// * `anchor` - Drag anchor position (mutable)
/// * `current` - Current pointer position (mutable)
pub fn process_drag_event(
    response: &egui::Response,
    anchor: &mut Option<egui::Pos2>,
    current: &mut Option<egui::Pos2>,
) -> SelectionEvent {
    if response.drag_started() {
        *anchor = response.interact_pointer_pos();
        *current = response.interact_pointer_pos();
        return SelectionEvent::Started;
    }

    if response.dragged() {
        *current = response.interact_pointer_pos();
        return SelectionEvent::Dragging;
    }

    if response.drag_stopped() {
        if let (Some(a), Some(c)) = (*anchor, *current) {
            let bounds = bounds_from_positions(a, c);
            if bounds.is_empty() {
                *anchor = None;
                *current = None;
                return SelectionEvent::Cancelled;
            }
            return SelectionEvent::Completed(bounds);
        }
    }

    SelectionEvent::None
}
