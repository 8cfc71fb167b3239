//! Derivation of the nested ring chain from a bounding rectangle.
//!
//! The face is the largest odd-sided square centered in the display
//! bounds. Inside it, one ring per clock hand is derived top-down: each
//! ring is a fixed 10/16 of its parent's interior diameter, forced odd so
//! it has a single center pixel, and carries the orbital radius its
//! center travels when the hand sweeps a full turn.
//!
//! Everything here is computed once at startup. The only field that
//! changes afterwards is each ring's frame origin, rewritten by
//! [`Clock::on_tick`](crate::hands) on time-unit ticks.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use crate::colors::ring_color;
use crate::config::{LENGTH_ADJUST, MAX_RINGS, RING_GAP2, RING_SCALE_NUM, RING_SCALE_SHIFT};
use crate::hands::HourMotion;

// =============================================================================
// Errors
// =============================================================================

/// Rejected bounding rectangle.
///
/// Geometry derivation is total over every usable display size; these are
/// precondition violations and abort initialization rather than produce
/// degenerate nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// The bounding rectangle has a zero width or height.
    EmptyBounds,
    /// The face is too small to fit the requested ring chain.
    BoundsTooSmall,
}

// =============================================================================
// Ring Geometry
// =============================================================================

/// One nested circular region representing a clock hand level.
///
/// Coordinates are relative to the immediate parent region (the face for
/// the hour ring). All fields except `origin` are invariant after
/// derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    /// Outer diameter in pixels. Always odd.
    pub diameter: u32,
    /// Center pixel of the parent region, in the parent's coordinates.
    pub parent_center: Point,
    /// Orbital radius: distance from the parent center to this ring's
    /// center as the hand sweeps.
    pub length: i32,
    /// Half of `diameter`, truncated.
    pub half_width: i32,
    /// Fill color (alternates light/dark per nesting level).
    pub color: Rgb565,
    /// Frame origin (top-left) within the parent's coordinate space.
    /// The only per-tick mutable state.
    pub origin: Point,
}

/// Derive the ring at `depth` (0 = hour ring inside the face) from its
/// parent's diameter.
fn derive_ring(parent_diameter: u32, depth: usize) -> Result<Ring, LayoutError> {
    if parent_diameter <= RING_GAP2 {
        return Err(LayoutError::BoundsTooSmall);
    }
    let interior = parent_diameter - RING_GAP2;
    let diameter = (((u64::from(interior) * u64::from(RING_SCALE_NUM)) >> RING_SCALE_SHIFT) as u32) | 1;

    // The top-level ring halves parent and child separately; deeper rings
    // halve the difference first. The two round differently and the face
    // proportions depend on keeping both cases as-is.
    let length = if depth == 0 {
        (parent_diameter / 2) as i32 - (diameter / 2) as i32 - LENGTH_ADJUST
    } else {
        ((parent_diameter - diameter) / 2) as i32 - LENGTH_ADJUST
    };
    if length < 1 {
        return Err(LayoutError::BoundsTooSmall);
    }

    let center = (parent_diameter / 2) as i32;
    Ok(Ring {
        diameter,
        parent_center: Point::new(center, center),
        length,
        half_width: (diameter / 2) as i32,
        color: ring_color(depth + 1),
        origin: Point::zero(),
    })
}

/// Largest odd-sided square centered in `bounds`.
///
/// The longer axis shrinks to the shorter one, shifting that axis' origin
/// by half the difference; an even side is decremented so the face has a
/// well-defined center pixel.
pub fn square_face_bounds(bounds: Rectangle) -> Result<Rectangle, LayoutError> {
    let Size { width, height } = bounds.size;
    if width == 0 || height == 0 {
        return Err(LayoutError::EmptyBounds);
    }

    let mut face = bounds;
    if width > height {
        face.top_left.x += ((width - height) / 2) as i32;
        let side = if height % 2 == 0 { height - 1 } else { height };
        face.size = Size::new(side, side);
    } else {
        face.top_left.y += ((height - width) / 2) as i32;
        let side = if width % 2 == 0 { width - 1 } else { width };
        face.size = Size::new(side, side);
    }
    Ok(face)
}

// =============================================================================
// Clock
// =============================================================================

/// Static face geometry plus the per-tick ring origins.
///
/// Rings are ordered outermost-first; element `i`'s parent is element
/// `i - 1` and the hour ring's parent is the face. The optional seconds
/// ring lives in the same list, so dropping the clock releases every
/// level uniformly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clock {
    pub(crate) face_bounds: Rectangle,
    pub(crate) rings: Vec<Ring, MAX_RINGS>,
    pub(crate) hour_motion: HourMotion,
}

impl Clock {
    /// Derive the full ring chain for a display area.
    ///
    /// `seconds` adds the third ring; a clock built without it never
    /// allocates one. Fails fast on bounds the chain cannot fit.
    pub fn new(bounds: Rectangle, seconds: bool, hour_motion: HourMotion) -> Result<Self, LayoutError> {
        let face_bounds = square_face_bounds(bounds)?;
        let levels = if seconds { MAX_RINGS } else { MAX_RINGS - 1 };

        let mut rings: Vec<Ring, MAX_RINGS> = Vec::new();
        let mut parent_diameter = face_bounds.size.height;
        for depth in 0..levels {
            let ring = derive_ring(parent_diameter, depth)?;
            parent_diameter = ring.diameter;
            let _ = rings.push(ring);
        }

        Ok(Self {
            face_bounds,
            rings,
            hour_motion,
        })
    }

    /// Squared, odd-sided face bounds in display coordinates.
    #[inline]
    pub const fn face_bounds(&self) -> Rectangle {
        self.face_bounds
    }

    /// Ring chain, outermost (hour) first.
    #[inline]
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Hour-hand motion style selected at construction.
    #[inline]
    pub const fn hour_motion(&self) -> HourMotion {
        self.hour_motion
    }

    /// Whether this clock carries the seconds ring.
    #[inline]
    pub fn has_seconds_ring(&self) -> bool {
        self.rings.len() == MAX_RINGS
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ring_idx;

    fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn test_square_wide_bounds() {
        let face = square_face_bounds(rect(10, 20, 300, 180)).unwrap();
        // Origin shifts by half the excess width; even side drops to odd
        assert_eq!(face.top_left, Point::new(70, 20));
        assert_eq!(face.size, Size::new(179, 179));
    }

    #[test]
    fn test_square_tall_bounds() {
        let face = square_face_bounds(rect(0, 0, 180, 320)).unwrap();
        assert_eq!(face.top_left, Point::new(0, 70));
        assert_eq!(face.size, Size::new(179, 179));
    }

    #[test]
    fn test_square_already_square() {
        // 180x180 stays in place and only loses the even pixel
        let face = square_face_bounds(rect(0, 0, 180, 180)).unwrap();
        assert_eq!(face.top_left, Point::new(0, 0));
        assert_eq!(face.size, Size::new(179, 179));
    }

    #[test]
    fn test_square_odd_square_untouched() {
        let face = square_face_bounds(rect(3, 4, 175, 175)).unwrap();
        assert_eq!(face, rect(3, 4, 175, 175));
    }

    #[test]
    fn test_empty_bounds_rejected() {
        assert_eq!(square_face_bounds(rect(0, 0, 0, 100)), Err(LayoutError::EmptyBounds));
        assert_eq!(square_face_bounds(rect(0, 0, 100, 0)), Err(LayoutError::EmptyBounds));
        assert_eq!(
            Clock::new(rect(0, 0, 0, 0), false, HourMotion::Smooth),
            Err(LayoutError::EmptyBounds)
        );
    }

    #[test]
    fn test_derived_proportions_320x240() {
        let clock = Clock::new(rect(0, 0, 320, 240), true, HourMotion::Smooth).unwrap();
        assert_eq!(clock.face_bounds(), rect(40, 0, 239, 239));

        let hour = &clock.rings()[ring_idx::HOUR];
        assert_eq!(hour.diameter, 143);
        assert_eq!(hour.length, 44);
        assert_eq!(hour.parent_center, Point::new(119, 119));
        assert_eq!(hour.half_width, 71);

        let minute = &clock.rings()[ring_idx::MINUTE];
        assert_eq!(minute.diameter, 83);
        assert_eq!(minute.length, 26);
        assert_eq!(minute.parent_center, Point::new(71, 71));
        assert_eq!(minute.half_width, 41);

        let second = &clock.rings()[ring_idx::SECOND];
        assert_eq!(second.diameter, 45);
        assert_eq!(second.length, 15);
        assert_eq!(second.parent_center, Point::new(41, 41));
        assert_eq!(second.half_width, 22);
    }

    #[test]
    fn test_ring_diameters_odd_and_shrinking() {
        for side in (31..400).step_by(7) {
            let clock = match Clock::new(rect(0, 0, side, side), true, HourMotion::Smooth) {
                Ok(clock) => clock,
                // Small faces legitimately reject the 3-ring chain
                Err(LayoutError::BoundsTooSmall) => continue,
                Err(e) => panic!("side {side}: {e:?}"),
            };
            let mut parent = clock.face_bounds().size.height;
            for ring in clock.rings() {
                assert_eq!(ring.diameter % 2, 1, "side {side}");
                assert!(ring.diameter + RING_GAP2 <= parent, "side {side}");
                assert!(ring.length >= 1, "side {side}");
                parent = ring.diameter;
            }
        }
    }

    #[test]
    fn test_two_ring_clock_has_no_seconds_ring() {
        let clock = Clock::new(rect(0, 0, 320, 240), false, HourMotion::Smooth).unwrap();
        assert_eq!(clock.rings().len(), 2);
        assert!(!clock.has_seconds_ring());

        let with_seconds = Clock::new(rect(0, 0, 320, 240), true, HourMotion::Smooth).unwrap();
        assert_eq!(with_seconds.rings().len(), 3);
        assert!(with_seconds.has_seconds_ring());
    }

    #[test]
    fn test_minimal_face_fits_two_rings_only() {
        // 31px face: hour 13px, minute 1px - no room left for a seconds ring
        let clock = Clock::new(rect(0, 0, 31, 31), false, HourMotion::Smooth).unwrap();
        assert_eq!(clock.rings().len(), 2);
        assert_eq!(
            Clock::new(rect(0, 0, 31, 31), true, HourMotion::Smooth),
            Err(LayoutError::BoundsTooSmall)
        );
    }

    #[test]
    fn test_tiny_bounds_rejected() {
        assert_eq!(
            Clock::new(rect(0, 0, 8, 8), false, HourMotion::Smooth),
            Err(LayoutError::BoundsTooSmall)
        );
    }

    #[test]
    fn test_initial_origins_are_zero() {
        let clock = Clock::new(rect(0, 0, 320, 240), true, HourMotion::Smooth).unwrap();
        for ring in clock.rings() {
            assert_eq!(ring.origin, Point::zero());
        }
    }
}
