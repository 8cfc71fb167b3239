//! Clock face renderer.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};

use crate::colors::ring_color;
use crate::geometry::Clock;

/// Fill the circle inscribed in a square region.
fn fill_circle<D>(display: &mut D, top_left: Point, diameter: u32, color: Rgb565)
where
    D: DrawTarget<Color = Rgb565>,
{
    Circle::new(top_left, diameter)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

/// Draw the face and every ring at its current position.
///
/// Ring origins are relative to the immediate parent, so absolute
/// placement accumulates them from the face outward. Painting outermost
/// first lets each ring cover its parent's interior.
pub fn draw_clock<D>(display: &mut D, clock: &Clock)
where
    D: DrawTarget<Color = Rgb565>,
{
    let face = clock.face_bounds();
    fill_circle(display, face.top_left, face.size.width.min(face.size.height), ring_color(0));

    let mut origin = face.top_left;
    for ring in clock.rings() {
        origin += ring.origin;
        fill_circle(display, origin, ring.diameter, ring.color);
    }
}
