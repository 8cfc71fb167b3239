//! Color constants for the watchface.
//!
//! The face is strictly two-tone: nested rings alternate light/dark from
//! the outermost circle inward, starting light, on a dark window
//! background. Rgb565 is native to the ST7789 and needs no conversion
//! when writing to the framebuffer.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

/// Window background behind the face.
pub const BACKGROUND: Rgb565 = Rgb565::BLACK;

/// Fill for even nesting levels (face, minute ring).
pub const RING_LIGHT: Rgb565 = Rgb565::WHITE;

/// Fill for odd nesting levels (hour ring, seconds ring).
pub const RING_DARK: Rgb565 = Rgb565::BLACK;

/// Splash title text.
pub const SPLASH_TEXT: Rgb565 = Rgb565::WHITE;

/// Splash accent. RGB565: (12, 24, 12) - dim gray ring motif.
pub const SPLASH_ACCENT: Rgb565 = Rgb565::new(12, 24, 12);

/// Fill color for the ring at the given nesting depth (0 = face).
#[inline]
pub const fn ring_color(depth: usize) -> Rgb565 {
    if depth % 2 == 0 { RING_LIGHT } else { RING_DARK }
}
