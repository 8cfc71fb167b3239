//! Epicycle watchface simulator for desktop.
//!
//! Runs the clock in an SDL window via embedded-graphics-simulator.
//!
//! # Keys
//!
//! - **S**: toggle the seconds ring (rebuilds the geometry)
//! - **H**: toggle coarse/smooth hour motion
//! - **[** / **]**: decrease / increase time warp
//! - **Esc**: quit

mod sim_clock;

use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use epicycle_common::colors::BACKGROUND;
use epicycle_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use epicycle_common::geometry::Clock;
use epicycle_common::hands::{HourMotion, TimeUnits};
use epicycle_common::widgets::{draw_clock, draw_splash};

use crate::sim_clock::SimClock;

/// Target frame time (~50 FPS). The main loop sleeps if a frame completes early.
const FRAME_TIME: Duration = Duration::from_millis(20);

/// Duration the boot splash stays up.
const SPLASH_TIME: Duration = Duration::from_millis(1500);

fn build_clock(seconds: bool, motion: HourMotion) -> Clock {
    let bounds = Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    Clock::new(bounds, seconds, motion).expect("display bounds rejected by layout derivation")
}

fn main() {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Epicycle", &output_settings);

    println!("Epicycle simulator - S: seconds ring, H: hour motion, [ / ]: time warp");

    // Splash while the "hardware" comes up
    draw_splash(&mut display, SCREEN_WIDTH, SCREEN_HEIGHT);
    window.update(&display);
    let splash_until = Instant::now() + SPLASH_TIME;
    while Instant::now() < splash_until {
        for ev in window.events() {
            if matches!(ev, SimulatorEvent::Quit) {
                return;
            }
        }
        thread::sleep(FRAME_TIME);
    }

    let mut show_seconds = true;
    let mut hour_motion = HourMotion::Smooth;
    let mut clock = build_clock(show_seconds, hour_motion);
    let mut sim = SimClock::from_host();

    // Seed hand positions before the first tick
    clock.on_tick(sim.time(), TimeUnits::ALL);
    let mut needs_redraw = true;
    let mut last_frame = Instant::now();

    'run: loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => break 'run,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::Escape => break 'run,
                        Keycode::S => {
                            show_seconds = !show_seconds;
                            // Rebuild drops the old ring chain wholesale
                            clock = build_clock(show_seconds, hour_motion);
                            clock.on_tick(sim.time(), TimeUnits::ALL);
                            needs_redraw = true;
                            println!("Seconds ring: {}", if show_seconds { "ON" } else { "OFF" });
                        }
                        Keycode::H => {
                            hour_motion = match hour_motion {
                                HourMotion::Coarse => HourMotion::Smooth,
                                HourMotion::Smooth => HourMotion::Coarse,
                            };
                            clock = build_clock(show_seconds, hour_motion);
                            clock.on_tick(sim.time(), TimeUnits::ALL);
                            needs_redraw = true;
                            println!("Hour motion: {hour_motion:?}");
                        }
                        Keycode::LeftBracket => println!("Time warp: x{}", sim.warp_down()),
                        Keycode::RightBracket => println!("Time warp: x{}", sim.warp_up()),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let changed = sim.advance(frame_start - last_frame);
        last_frame = frame_start;
        if changed.intersects(clock.subscription_mask()) {
            clock.on_tick(sim.time(), changed);
            needs_redraw = true;
        }

        if needs_redraw {
            display.clear(BACKGROUND).ok();
            draw_clock(&mut display, &clock);
            needs_redraw = false;
        }
        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME - elapsed);
        }
    }
}
