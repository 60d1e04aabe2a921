//! Overlay painting helpers.
//!
//! Drawing primitives for the region selector: the dimmed surround and
//! the selection rectangle itself.

use eframe::egui;

/// Dims everything outside the selection rectangle.
///
/// Four filled regions (above, below, left, right of the selection)
/// leave the selected area untouched so the user sees exactly what will
/// be captured.
///
/// # Arguments
/// * `painter` - The egui painter to draw with
/// * `screen_rect` - The full screen rectangle
/// * `selection_rect` - The selected area to keep clear
/// * `alpha` - Darkness level (0-255, higher = darker)
pub fn draw_dim_outside(
    painter: &egui::Painter,
    screen_rect: egui::Rect,
    selection_rect: egui::Rect,
    alpha: u8,
) {
    let color = egui::Color32::from_black_alpha(alpha);

    // Above
    painter.rect_filled(
        egui::Rect::from_min_max(
            screen_rect.min,
            egui::pos2(screen_rect.max.x, selection_rect.min.y),
        ),
        0.0,
        color,
    );

    // Below
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(screen_rect.min.x, selection_rect.max.y),
            screen_rect.max,
        ),
        0.0,
        color,
    );

    // Left
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(screen_rect.min.x, selection_rect.min.y),
            egui::pos2(selection_rect.min.x, selection_rect.max.y),
        ),
        0.0,
        color,
    );

    // Right
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(selection_rect.max.x, selection_rect.min.y),
            egui::pos2(screen_rect.max.x, selection_rect.max.y),
        ),
        0.0,
        color,
    );
}

/// Draws the selection rectangle: a light red fill with a solid border.
pub fn draw_selection_rect(painter: &egui::Painter, selection_rect: egui::Rect) {
    painter.rect_filled(
        selection_rect,
        0.0,
        egui::Color32::from_rgba_unmultiplied(255, 0, 0, 25),
    );
    painter.rect_stroke(
        selection_rect,
        0.0,
        egui::Stroke::new(2.0, egui::Color32::RED),
        egui::StrokeKind::Outside,
    );
}
