//! Headless desktop driver for the telemetry panel.
//!
//! Feeds synthetic telemetry through [`TelemetryPanel`] frame by frame,
//! replays scripted taps, and writes PNG snapshots of the rendered screen.
//!
//! ```text
//! RUST_LOG=debug panel-simulator --config panel.toml --frames 1200 --snapshot-every 200
//! ```

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod feed;
mod render;
mod settings;
mod timing;

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use log::{debug, info};
use panel_common::{PanelAnchor, TelemetryPanel};

use crate::feed::TelemetryFeed;
use crate::settings::{SimSettings, Units};
use crate::timing::{FRAME_TIME, frame_timestamp};

const SCREEN_WIDTH: u32 = 1280;
const SCREEN_HEIGHT: u32 = 720;

/// Panel hugs the right edge, clear of the top status area.
const ANCHOR: PanelAnchor = PanelAnchor::new(SCREEN_WIDTH as i32 - 40, 120, SCREEN_HEIGHT as i32 - 80);

#[derive(Debug, Parser)]
#[command(version, about = "Render the telemetry panel against a synthetic drive")]
struct Args {
    /// TOML settings file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Directory for PNG snapshots.
    #[arg(short, long, default_value = "snapshots")]
    out_dir: PathBuf,

    /// Write a snapshot every N frames (0 writes only the last frame).
    #[arg(short, long, default_value_t = 100)]
    snapshot_every: u32,

    /// Force imperial units regardless of the settings file.
    #[arg(long)]
    imperial: bool,

    /// Pace frames at wall-clock speed.
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => SimSettings::load(path)?,
        None => SimSettings::default(),
    };
    if args.imperial {
        settings.units = Units::Imperial;
    }
    let mut panel = settings.build_panel()?;
    info!(
        "panel: {} metrics, max {} rows x {} columns, {:?} units",
        panel.config().metrics().len(),
        panel.config().max_rows(),
        panel.config().max_columns(),
        settings.units,
    );

    fs::create_dir_all(&args.out_dir).with_context(|| format!("creating {}", args.out_dir.display()))?;

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().build();
    let mut feed = TelemetryFeed::new();

    for frame_no in 0..args.frames {
        let frame_start = Instant::now();
        let t = frame_timestamp(frame_no);
        let state = feed.sample(t);

        for tap in settings.taps_at(frame_no) {
            apply_tap(&mut panel, Point::new(tap.x, tap.y), t);
        }

        let frame = panel.frame(&state, &ANCHOR, &settings.neighbor_widths);
        debug!("frame {frame_no}: {} slots, scale {:.2}", frame.slots.len(), frame.font_scale);

        display.clear(Rgb565::BLACK).ok();
        render::draw_neighbors(&mut display, &ANCHOR, &settings.neighbor_widths);
        render::draw_panel(&mut display, &frame);

        let last = frame_no + 1 == args.frames;
        let due = args.snapshot_every > 0 && frame_no % args.snapshot_every == 0;
        if due || last {
            let path = args.out_dir.join(format!("frame_{frame_no:05}.png"));
            display
                .to_rgb_output_image(&output_settings)
                .save_png(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {}", path.display());
        }

        if args.realtime {
            let elapsed = frame_start.elapsed();
            if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
                thread::sleep(remaining);
            }
        }
    }

    Ok(())
}

/// A tap on a slot cycles it to the next metric.
fn apply_tap(
    panel: &mut TelemetryPanel,
    point: Point,
    now_s: f32,
) {
    let Some(slot) = panel.tap(point, now_s) else {
        debug!("tap at {point:?} missed the panel");
        return;
    };
    let mut config = panel.config().clone();
    config.advance_slot(slot);
    info!("slot {slot} -> {:?}", config.metrics()[slot].metric());
    panel.reconfigure(config);
}
