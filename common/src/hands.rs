//! Per-tick hand position updates.
//!
//! A hand never rotates: its ring translates so that the ring center sits
//! at `parent_center + (sin(angle), -cos(angle)) * length`, with angle 0
//! at 12 o'clock increasing clockwise. [`Clock::on_tick`] rewrites the
//! frame origins of the rings whose time unit changed; the computation is
//! pure in the time-of-day snapshot, so repeating a tick is harmless.

use embedded_graphics::prelude::*;

use crate::config::ring_idx;
use crate::geometry::{Clock, Ring};
use crate::trig::{TRIG_MAX_ANGLE, TRIG_MAX_RATIO, cos_lookup, sin_lookup};

// =============================================================================
// Time Units
// =============================================================================

/// Bitmask of time-of-day units.
///
/// Used both as a change notification ("these fields differ from the last
/// tick") and as a subscription mask ("wake me when one of these
/// changes").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeUnits(u8);

impl TimeUnits {
    pub const NONE: Self = Self(0);
    pub const SECOND: Self = Self(1);
    pub const MINUTE: Self = Self(1 << 1);
    pub const HOUR: Self = Self(1 << 2);
    pub const ALL: Self = Self(0b111);

    /// True if every unit in `units` is set.
    #[inline]
    pub const fn contains(self, units: Self) -> bool {
        self.0 & units.0 == units.0
    }

    /// True if any unit in `units` is set.
    #[inline]
    pub const fn intersects(self, units: Self) -> bool {
        self.0 & units.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl core::ops::BitOr for TimeUnits {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for TimeUnits {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

// =============================================================================
// Time of Day
// =============================================================================

/// Wall-clock snapshot. Fields are pre-validated time-of-day values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    /// 0-23; folded onto the 12-hour face by the updater.
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
}

impl TimeOfDay {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        debug_assert!(hour < 24 && minute < 60 && second < 60);
        Self { hour, minute, second }
    }

    /// Units whose value differs from `prev`.
    pub fn changed_since(self, prev: Self) -> TimeUnits {
        let mut units = TimeUnits::NONE;
        if self.hour != prev.hour {
            units |= TimeUnits::HOUR;
        }
        if self.minute != prev.minute {
            units |= TimeUnits::MINUTE;
        }
        if self.second != prev.second {
            units |= TimeUnits::SECOND;
        }
        units
    }
}

// =============================================================================
// Hour Motion
// =============================================================================

/// Hour-hand resolution.
///
/// The two styles are selected at construction and never blended: a
/// coarse clock repositions the hour ring only when the hour changes, a
/// smooth clock refines the hour angle with the elapsed minutes and
/// repositions it on every minute tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HourMotion {
    /// Twelve discrete hour positions.
    Coarse,
    /// Minute-refined hour angle, like a mechanical movement.
    #[default]
    Smooth,
}

// =============================================================================
// Angle Derivation
// =============================================================================

const fn hour_angle(time: TimeOfDay, motion: HourMotion) -> i32 {
    let base = (time.hour % 12) as i32 * TRIG_MAX_ANGLE / 12;
    match motion {
        HourMotion::Coarse => base,
        HourMotion::Smooth => base + time.minute as i32 * TRIG_MAX_ANGLE / (12 * 60),
    }
}

const fn sixtieth_angle(value: u8) -> i32 {
    value as i32 * TRIG_MAX_ANGLE / 60
}

/// Frame origin placing `ring`'s center on its orbit at `angle`.
fn orbit_origin(ring: &Ring, angle: i32) -> Point {
    Point::new(
        ring.parent_center.x + sin_lookup(angle) * ring.length / TRIG_MAX_RATIO - ring.half_width,
        ring.parent_center.y - cos_lookup(angle) * ring.length / TRIG_MAX_RATIO - ring.half_width,
    )
}

// =============================================================================
// Tick Handling
// =============================================================================

impl Clock {
    /// Unit mask the host should drive ticks with.
    ///
    /// A clock without a seconds ring never asks for per-second wakeups.
    pub fn subscription_mask(&self) -> TimeUnits {
        let mut mask = TimeUnits::HOUR | TimeUnits::MINUTE;
        if self.has_seconds_ring() {
            mask |= TimeUnits::SECOND;
        }
        mask
    }

    /// Reposition the rings whose time unit is in `changed`.
    ///
    /// Pass [`TimeUnits::ALL`] once after construction to seed the hands
    /// before the first tick arrives.
    pub fn on_tick(&mut self, time: TimeOfDay, changed: TimeUnits) {
        let hour_moved = match self.hour_motion {
            HourMotion::Coarse => changed.contains(TimeUnits::HOUR),
            HourMotion::Smooth => changed.intersects(TimeUnits::HOUR | TimeUnits::MINUTE),
        };
        if hour_moved {
            let origin = orbit_origin(&self.rings[ring_idx::HOUR], hour_angle(time, self.hour_motion));
            self.rings[ring_idx::HOUR].origin = origin;
        }

        if changed.contains(TimeUnits::MINUTE) {
            let origin = orbit_origin(&self.rings[ring_idx::MINUTE], sixtieth_angle(time.minute));
            self.rings[ring_idx::MINUTE].origin = origin;
        }

        if changed.contains(TimeUnits::SECOND) && self.has_seconds_ring() {
            let origin = orbit_origin(&self.rings[ring_idx::SECOND], sixtieth_angle(time.second));
            self.rings[ring_idx::SECOND].origin = origin;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::Rectangle;

    use super::*;

    const BOUNDS: Rectangle = Rectangle::new(Point::zero(), Size::new(320, 240));

    fn clock(seconds: bool, motion: HourMotion) -> Clock {
        Clock::new(BOUNDS, seconds, motion).unwrap()
    }

    fn origins(clock: &Clock) -> heapless::Vec<Point, 3> {
        clock.rings().iter().map(|r| r.origin).collect()
    }

    #[test]
    fn test_units_mask_ops() {
        let mask = TimeUnits::HOUR | TimeUnits::MINUTE;
        assert!(mask.contains(TimeUnits::HOUR));
        assert!(mask.contains(TimeUnits::MINUTE));
        assert!(!mask.contains(TimeUnits::SECOND));
        assert!(!mask.contains(TimeUnits::ALL));
        assert!(mask.intersects(TimeUnits::ALL));
        assert!(TimeUnits::NONE.is_empty());
        assert!(!mask.is_empty());
    }

    #[test]
    fn test_changed_since() {
        let prev = TimeOfDay::new(10, 59, 59);
        assert_eq!(TimeOfDay::new(11, 0, 0).changed_since(prev), TimeUnits::ALL);
        assert_eq!(
            TimeOfDay::new(10, 59, 58).changed_since(prev),
            TimeUnits::SECOND
        );
        assert_eq!(prev.changed_since(prev), TimeUnits::NONE);
    }

    #[test]
    fn test_subscription_mask_per_config() {
        assert_eq!(
            clock(false, HourMotion::Smooth).subscription_mask(),
            TimeUnits::HOUR | TimeUnits::MINUTE
        );
        assert_eq!(clock(true, HourMotion::Smooth).subscription_mask(), TimeUnits::ALL);
    }

    #[test]
    fn test_three_oclock_points_right() {
        let mut clock = clock(false, HourMotion::Coarse);
        clock.on_tick(TimeOfDay::new(3, 0, 0), TimeUnits::ALL);

        let hour = &clock.rings()[crate::config::ring_idx::HOUR];
        // Quarter turn: pure +x offset from the parent center
        assert_eq!(
            hour.origin,
            Point::new(
                hour.parent_center.x + hour.length - hour.half_width,
                hour.parent_center.y - hour.half_width,
            )
        );
    }

    #[test]
    fn test_half_past_points_down() {
        let mut clock = clock(false, HourMotion::Coarse);
        clock.on_tick(TimeOfDay::new(0, 30, 0), TimeUnits::ALL);

        let minute = &clock.rings()[crate::config::ring_idx::MINUTE];
        assert_eq!(
            minute.origin,
            Point::new(
                minute.parent_center.x - minute.half_width,
                minute.parent_center.y + minute.length - minute.half_width,
            )
        );
    }

    #[test]
    fn test_midnight_points_up() {
        let mut clock = clock(false, HourMotion::Coarse);
        clock.on_tick(TimeOfDay::new(0, 0, 0), TimeUnits::ALL);

        let hour = &clock.rings()[crate::config::ring_idx::HOUR];
        assert_eq!(
            hour.origin,
            Point::new(
                hour.parent_center.x - hour.half_width,
                hour.parent_center.y - hour.length - hour.half_width,
            )
        );
    }

    #[test]
    fn test_hour_folds_onto_twelve_hour_face() {
        let mut pm = clock(false, HourMotion::Coarse);
        let mut am = clock(false, HourMotion::Coarse);
        pm.on_tick(TimeOfDay::new(15, 0, 0), TimeUnits::ALL);
        am.on_tick(TimeOfDay::new(3, 0, 0), TimeUnits::ALL);
        assert_eq!(origins(&pm), origins(&am));
    }

    #[test]
    fn test_idempotent_under_repeated_ticks() {
        let mut clock = clock(true, HourMotion::Smooth);
        let time = TimeOfDay::new(7, 41, 23);
        clock.on_tick(time, TimeUnits::ALL);
        let first = origins(&clock);
        clock.on_tick(time, TimeUnits::ALL);
        assert_eq!(origins(&clock), first);
    }

    #[test]
    fn test_minute_wraps_to_top_of_hour() {
        // minute 0 and a full 60-minute sweep land on the same position
        let ring = clock(false, HourMotion::Coarse).rings()[crate::config::ring_idx::MINUTE];
        assert_eq!(
            orbit_origin(&ring, sixtieth_angle(60)),
            orbit_origin(&ring, sixtieth_angle(0))
        );
    }

    #[test]
    fn test_coarse_hour_ignores_minute_ticks() {
        let mut clock = clock(false, HourMotion::Coarse);
        clock.on_tick(TimeOfDay::new(3, 0, 0), TimeUnits::ALL);
        let before = clock.rings()[crate::config::ring_idx::HOUR].origin;

        clock.on_tick(TimeOfDay::new(3, 30, 0), TimeUnits::MINUTE);
        assert_eq!(clock.rings()[crate::config::ring_idx::HOUR].origin, before);
    }

    #[test]
    fn test_smooth_hour_advances_on_minute_ticks() {
        let mut clock = clock(false, HourMotion::Smooth);
        clock.on_tick(TimeOfDay::new(3, 0, 0), TimeUnits::ALL);
        let before = clock.rings()[crate::config::ring_idx::HOUR].origin;

        clock.on_tick(TimeOfDay::new(3, 30, 0), TimeUnits::MINUTE);
        assert_ne!(clock.rings()[crate::config::ring_idx::HOUR].origin, before);
    }

    #[test]
    fn test_second_tick_leaves_other_rings_alone() {
        let mut clock = clock(true, HourMotion::Smooth);
        clock.on_tick(TimeOfDay::new(9, 15, 0), TimeUnits::ALL);
        let before = origins(&clock);

        clock.on_tick(TimeOfDay::new(9, 15, 1), TimeUnits::SECOND);
        let after = origins(&clock);
        assert_eq!(after[crate::config::ring_idx::HOUR], before[crate::config::ring_idx::HOUR]);
        assert_eq!(
            after[crate::config::ring_idx::MINUTE],
            before[crate::config::ring_idx::MINUTE]
        );
        assert_ne!(
            after[crate::config::ring_idx::SECOND],
            before[crate::config::ring_idx::SECOND]
        );
    }

    #[test]
    fn test_second_tick_is_noop_without_seconds_ring() {
        let mut clock = clock(false, HourMotion::Smooth);
        clock.on_tick(TimeOfDay::new(9, 15, 0), TimeUnits::ALL);
        let before = origins(&clock);

        clock.on_tick(TimeOfDay::new(9, 15, 1), TimeUnits::SECOND);
        assert_eq!(origins(&clock), before);
    }

    #[test]
    fn test_orbit_stays_inside_parent_interior() {
        let mut clock = clock(true, HourMotion::Smooth);
        for minute in 0..60u8 {
            clock.on_tick(TimeOfDay::new(11, minute, minute), TimeUnits::ALL);
            for ring in clock.rings() {
                let parent_diameter = ring.parent_center.x * 2 + 1;
                assert!(ring.origin.x >= 0 && ring.origin.y >= 0, "minute {minute}");
                assert!(
                    ring.origin.x + ring.diameter as i32 <= parent_diameter,
                    "minute {minute}"
                );
                assert!(
                    ring.origin.y + ring.diameter as i32 <= parent_diameter,
                    "minute {minute}"
                );
            }
        }
    }
}
