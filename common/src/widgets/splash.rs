//! Boot splash shown while the display hardware comes up.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Text};
use profont::{PROFONT_10_POINT, PROFONT_24_POINT};

use crate::colors::{BACKGROUND, SPLASH_ACCENT, SPLASH_TEXT};

/// Concentric-ring motif echoing the face, outermost first.
const MOTIF_RINGS: [(u32, u32); 3] = [(150, 3), (94, 2), (58, 1)];

/// Draw the splash for a `width` x `height` display.
pub fn draw_splash<D>(display: &mut D, width: u32, height: u32)
where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BACKGROUND).ok();

    let center = Point::new(width as i32 / 2, height as i32 / 2);
    for (diameter, stroke) in MOTIF_RINGS {
        Circle::with_center(center, diameter)
            .into_styled(PrimitiveStyle::with_stroke(SPLASH_ACCENT, stroke))
            .draw(display)
            .ok();
    }

    Text::with_alignment(
        "EPICYCLE",
        center + Point::new(0, 8),
        MonoTextStyle::new(&PROFONT_24_POINT, SPLASH_TEXT),
        Alignment::Center,
    )
    .draw(display)
    .ok();

    Text::with_alignment(
        "nested circles watchface",
        Point::new(center.x, height as i32 - 24),
        MonoTextStyle::new(&PROFONT_10_POINT, SPLASH_ACCENT),
        Alignment::Center,
    )
    .draw(display)
    .ok();
}
