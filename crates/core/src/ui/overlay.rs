//! The region selection overlay application.
//!
//! A fullscreen, borderless, always-on-top transparent window that lets
//! the user drag out a rectangle. The rectangle is hidden until the
//! first pointer-down; Escape cancels at any time.

use std::sync::{Arc, Mutex};

use eframe::egui;

use super::rendering::{draw_dim_outside, draw_selection_rect};
use super::selection::{SelectionEvent, process_drag_event};
use crate::bounds::Bounds;
use crate::error::{AppError, Result};

/// Darkness of the dimmed surround while a selection is in progress.
const DIM_ALPHA: u8 = 90;

/// The fullscreen selection overlay.
pub struct RegionSelector {
    anchor: Option<egui::Pos2>,
    current: Option<egui::Pos2>,
    result: Arc<Mutex<Option<Bounds>>>,
}

impl RegionSelector {
    /// Creates an overlay writing its outcome into the shared slot.
    pub fn new(result: Arc<Mutex<Option<Bounds>>>) -> Self {
        Self {
            anchor: None,
            current: None,
            result,
        }
    }

    fn finish(&self, ctx: &egui::Context, bounds: Option<Bounds>) {
        if let Ok(mut slot) = self.result.lock() {
            *slot = bounds;
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

impl eframe::App for RegionSelector {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_cursor_icon(egui::CursorIcon::Crosshair);

        // Escape cancels at any point in the drag
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.finish(ctx, None);
            return;
        }

        let panel_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(0))
            .outer_margin(egui::Margin::same(0))
            .fill(egui::Color32::TRANSPARENT);

        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let response = ui.interact(rect, ui.id(), egui::Sense::drag());

                match process_drag_event(&response, &mut self.anchor, &mut self.current) {
                    SelectionEvent::Completed(bounds) => {
                        self.finish(ctx, Some(bounds));
                        return;
                    }
                    SelectionEvent::Cancelled => {
                        // Zero-area release counts as a cancel
                        self.finish(ctx, None);
                        return;
                    }
                    _ => {}
                }

                // Rectangle stays hidden until the first pointer-down
                if let (Some(anchor), Some(current)) = (self.anchor, self.current) {
                    let selection_rect = egui::Rect::from_two_pos(anchor, current);
                    draw_dim_outside(ui.painter(), rect, selection_rect, DIM_ALPHA);
                    draw_selection_rect(ui.painter(), selection_rect);
                }
            });
    }
}

/// Opens the overlay and blocks until the user selects or cancels.
///
/// # Returns
/// - `Ok(Some(bounds))` - the user dragged out a non-empty rectangle
/// - `Ok(None)` - the user pressed Escape or released without an area
/// - `Err(e)` - the overlay window could not be created
pub fn run() -> Result<Option<Bounds>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top(),
        ..Default::default()
    };

    let result = Arc::new(Mutex::new(None));
    let app_result = result.clone();

    eframe::run_native(
        "SnapPress Selection",
        options,
        Box::new(move |_cc| Ok(Box::new(RegionSelector::new(app_result)) as Box<dyn eframe::App>)),
    )
    .map_err(|e| AppError::ui(format!("Failed to run selection overlay: {}", e)))?;

    let bounds = result
        .lock()
        .map_err(|_| AppError::ui("Failed to acquire selection result lock"))?
        .take();

    Ok(bounds)
}
