//! Region selection user interface.
//!
//! This module provides the fullscreen overlay used to drag out a
//! capture rectangle.
//!
//! # Architecture
//!
//! - [`selection`]: pure drag-state handling and coordinate mapping
//! - [`rendering`]: overlay painting helpers
//! - [`overlay`]: the `eframe` application and window setup
//!
//! # Usage
//!
//! ```ignore
//! use snappress_core::ui;
//!
//! match ui::run_region_selector()? {
//!     Some(bounds) => println!("Selected {:?}", bounds),
//!     None => println!("Selection cancelled"),
//! }
//! ```

mod overlay;
mod rendering;
pub mod selection;

pub use overlay::RegionSelector;

use crate::bounds::Bounds;
use crate::error::Result;

/// Opens the selection overlay and returns the chosen bounds.
///
/// Returns `Ok(None)` when the user cancels, either by pressing Escape
/// or by releasing the pointer without dragging out an area.
pub fn run_region_selector() -> Result<Option<Bounds>> {
    overlay::run()
}
