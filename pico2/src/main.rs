//! Epicycle watchface firmware for Raspberry Pi Pico 2 (RP2350).
//!
//! Renders the nested-circles clock on the Pimoroni PIM715 Display Pack.
//!
//! # Architecture
//!
//! Geometry is derived once at boot; afterwards the main loop sleeps to
//! the next time-unit boundary (one second with the seconds ring, the
//! next minute without it), advances the wall clock, repositions the
//! rings whose unit changed, and flushes a single framebuffer via DMA.
//!
//! # Build Variants
//!
//! - `seconds-ring`: adds the third ring and per-second redraws
//! - `coarse-hour`: hour hand in 12 discrete steps instead of the
//!   minute-refined default

#![no_std]
#![no_main]

mod display;
mod st7789;

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::spi::Spi;
use embassy_time::Timer;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use epicycle_common::colors::BACKGROUND;
use epicycle_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use epicycle_common::geometry::Clock;
use epicycle_common::hands::{HourMotion, TimeOfDay, TimeUnits};
use epicycle_common::widgets::{draw_clock, draw_splash};
use epicycle_pico2::wall_clock::WallClock;
use static_cell::ConstStaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::display::display_spi_config;
use crate::st7789::{BUFFER_SIZE, FrameRenderer, St7789};

/// Boot seed: the board has no battery-backed RTC, so the face starts at
/// the classic retail display time.
const SEED_TIME: TimeOfDay = TimeOfDay::new(10, 8, 0);

/// Duration the boot splash stays on screen.
const SPLASH_MS: u64 = 1500;

const SHOW_SECONDS: bool = cfg!(feature = "seconds-ring");

const HOUR_MOTION: HourMotion = if cfg!(feature = "coarse-hour") {
    HourMotion::Coarse
} else {
    HourMotion::Smooth
};

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"epicycle"),
    embassy_rp::binary_info::rp_program_description!(c"Op-art nested circles watchface for the PIM715 display"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Epicycle watchface starting...");

    let p = embassy_rp::init(Default::default());

    // Display pins
    // PIM715 pinout: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let mut _backlight = Output::new(p.PIN_20, Level::High); // Turn on backlight

    // Async SPI with DMA (TX-only, display doesn't need MISO)
    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, display_spi_config());

    let mut st7789 = St7789::new(spi, dc, cs);
    st7789.init().await;
    info!("Display initialized");

    // Const-initialized so the 150 KB buffer lives in .bss and never
    // passes through the stack
    static FRAMEBUFFER: ConstStaticCell<[u8; BUFFER_SIZE]> = ConstStaticCell::new([0; BUFFER_SIZE]);
    let framebuffer = FRAMEBUFFER.take();

    {
        let mut renderer = FrameRenderer::new(framebuffer);
        draw_splash(&mut renderer, SCREEN_WIDTH, SCREEN_HEIGHT);
    }
    st7789.flush(framebuffer).await;
    Timer::after_millis(SPLASH_MS).await;

    let bounds = Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let mut clock = match Clock::new(bounds, SHOW_SECONDS, HOUR_MOTION) {
        Ok(clock) => clock,
        Err(_) => defmt::panic!("display bounds rejected by layout derivation"),
    };
    let subscription = clock.subscription_mask();
    info!("Geometry derived: {} rings", clock.rings().len());

    let mut wall_clock = WallClock::new(SEED_TIME);

    // Seed hand positions before the first tick arrives
    clock.on_tick(wall_clock.time(), TimeUnits::ALL);
    redraw(&mut st7789, framebuffer, &clock).await;
    info!("First frame on screen");

    loop {
        let sleep_s = if SHOW_SECONDS {
            1
        } else {
            wall_clock.seconds_to_next_minute()
        };
        Timer::after_secs(u64::from(sleep_s)).await;

        let changed = wall_clock.advance(sleep_s);
        if changed.intersects(subscription) {
            let time = wall_clock.time();
            if changed.contains(TimeUnits::MINUTE) {
                info!("tick {}:{}", time.hour, time.minute);
            }
            clock.on_tick(time, changed);
            redraw(&mut st7789, framebuffer, &clock).await;
        }
    }
}

/// Render the current clock state and push it to the display.
async fn redraw(st7789: &mut St7789<'_>, framebuffer: &mut [u8; BUFFER_SIZE], clock: &Clock) {
    let mut renderer = FrameRenderer::new(framebuffer);
    renderer.clear(BACKGROUND).ok();
    draw_clock(&mut renderer, clock);
    st7789.flush(framebuffer).await;
}
