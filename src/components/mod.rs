//! Reusable UI components
//!
//! - `keybindings` - Mode-aware key registry shared by input handling and hints
//! - `nav_bar` - One-line key hint bar at the bottom of the screen
//! - `help_overlay` - Floating help window listing every binding

pub mod help_overlay;
pub mod keybindings;
pub mod nav_bar;

use ratatui::layout::Rect;

/// Compute a rectangle centered in `parent`.
///
/// The size is a percentage of the parent clamped to `[min, max]`, and never
/// larger than the parent itself.
pub fn centered_rect(
    parent: Rect,
    width_percent: u16,
    height_percent: u16,
    min: (u16, u16),
    max: (u16, u16),
) -> Rect {
    let width = scale(parent.width, width_percent)
        .clamp(min.0, max.0)
        .min(parent.width);
    let height = scale(parent.height, height_percent)
        .clamp(min.1, max.1)
        .min(parent.height);
    Rect::new(
        parent.x + (parent.width - width) / 2,
        parent.y + (parent.height - height) / 2,
        width,
        height,
    )
}

fn scale(length: u16, percent: u16) -> u16 {
    (u32::from(length) * u32::from(percent) / 100) as u16
}
