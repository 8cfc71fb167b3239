//! Drawing for the watchface.
//!
//! Rendering is a pure consumer of the geometry list: it composes the
//! nested frame origins into absolute coordinates and fills circles. It
//! never feeds back into layout or hand positioning, so either side can
//! be tested without the other.

mod face;
mod splash;

pub use face::draw_clock;
pub use splash::draw_splash;
