//! Software raycaster viewer.
//!
//! Controls  W/S or ↑/↓ move · A/D strafe · ←/→ turn · PgUp/PgDn look ·
//! Space particle burst · Shift focus (slow motion) · Esc quit
//!
//! ```bash
//! cargo run --release --bin view_sw -- --floor parallax
//! RUST_LOG=debug cargo run --release --bin view_sw -- --map maps/arena.txt
//! ```

use anyhow::Context;
use clap::Parser;
use glam::{Vec2, Vec3};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use yaray_rs::{
    renderer::{Effects, FloorMode, RenderConfig, RendererExt, Scene, Software, color::rgb},
    sim::{Drawable, TicRunner, drawables, slide_move, spawn_burst, spawn_target},
    world::{Camera, Grid, Tile, demo_level, load_grid, procedural},
};

const MOVE_SPEED: f32 = 3.0; // cells / s
const TURN_SPEED: f32 = 2.0; // rad / s
const PITCH_SPEED: f32 = 300.0; // rows / s
const LEAN_DEG: f32 = 2.0;
const LEAN_EASE: f32 = 0.1;
const BODY_RADIUS: f32 = 0.2;
const FOCUS_TIME_SCALE: f32 = 0.3;
const BURST_COUNT: usize = 24;

const TARGET_SPOTS: [(f32, f32); 4] = [(6.0, 4.5), (12.5, 14.5), (20.5, 20.5), (4.5, 16.5)];

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Text map to load instead of the built-in demo level
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    #[arg(long, default_value_t = 960)]
    width: usize,

    #[arg(long, default_value_t = 600)]
    height: usize,

    /// How the floor is drawn
    #[arg(long, value_enum, default_value_t = FloorMode::Parallax)]
    floor: FloorMode,

    #[arg(long)]
    no_fog: bool,
    #[arg(long)]
    no_roll: bool,
    #[arg(long)]
    no_vignette: bool,
    #[arg(long)]
    no_pulse: bool,
}

impl Opts {
    fn render_config(&self) -> RenderConfig {
        let mut effects = Effects::all();
        effects.set(Effects::FOG, !self.no_fog);
        effects.set(Effects::ROLL, !self.no_roll);
        effects.set(Effects::VIGNETTE, !self.no_vignette);
        effects.set(Effects::PULSE, !self.no_pulse);
        RenderConfig {
            effects,
            floor: self.floor,
            ..RenderConfig::default()
        }
    }
}

/// First open cell in row-major order; the camera spawns at its centre.
fn spawn_point(grid: &Grid) -> Option<Vec2> {
    (0..grid.height() as i32)
        .flat_map(|y| (0..grid.width() as i32).map(move |x| (x, y)))
        .find(|&(x, y)| grid.get(x, y) == Tile::Open)
        .map(|(x, y)| Vec2::new(x as f32 + 0.5, y as f32 + 0.5))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let opts = Opts::parse();

    let grid = match &opts.map {
        Some(path) => load_grid(path).with_context(|| format!("loading map {}", path.display()))?,
        None => demo_level(),
    };
    tracing::info!(w = grid.width(), h = grid.height(), "map ready");

    let bank = Arc::new(procedural::standard_bank()?);
    let target_tex = bank.id_or_missing(procedural::TARGET);

    let mut sim = TicRunner::new();
    for (x, y) in TARGET_SPOTS {
        if grid.get(x as i32, y as i32) == Tile::Open {
            spawn_target(sim.world_mut(), x, y, target_tex, 1.0);
        }
    }

    let start = spawn_point(&grid).context("map has no open floor tile")?;
    let mut camera = Camera::new(start.extend(0.5), 0.0);

    let mut renderer = Software::new(bank, opts.render_config());
    tracing::info!(config = ?renderer.config(), "renderer configured");

    let (w, h) = (opts.width, opts.height);
    let mut win = Window::new("Rust Raycaster Software Render", w, h, WindowOptions::default())?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    let clock = Instant::now();
    let mut last_frame = Instant::now();
    let mut snapshot: Vec<Drawable> = Vec::new();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();
        let dt = last_frame.elapsed().as_secs_f32().min(0.1);
        last_frame = t0;

        /* movement --------------------------------------------------------- */
        let mut forward = 0.0;
        let mut strafe = 0.0;
        if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
            forward += 1.0;
        }
        if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
            forward -= 1.0;
        }
        if win.is_key_down(Key::A) {
            strafe -= 1.0;
        }
        if win.is_key_down(Key::D) {
            strafe += 1.0;
        }
        if win.is_key_down(Key::Left) {
            camera.turn(-TURN_SPEED * dt);
        }
        if win.is_key_down(Key::Right) {
            camera.turn(TURN_SPEED * dt);
        }
        if win.is_key_down(Key::PageUp) {
            camera.pitch += PITCH_SPEED * dt;
        }
        if win.is_key_down(Key::PageDown) {
            camera.pitch -= PITCH_SPEED * dt;
        }
        camera.pitch = camera.pitch.clamp(-(h as f32) * 0.5, h as f32 * 0.5);

        let basis = camera.basis();
        let wish = (basis.dir * forward + basis.dir.perp() * strafe) * MOVE_SPEED * dt;
        let moved = slide_move(&grid, camera.pos.truncate(), wish, BODY_RADIUS);
        camera.pos.x = moved.pos.x;
        camera.pos.y = moved.pos.y;

        // lean into strafes
        camera.roll += (strafe * LEAN_DEG - camera.roll) * LEAN_EASE;

        /* actions ---------------------------------------------------------- */
        let focus = win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift);
        if win.is_key_pressed(Key::Space, KeyRepeat::No) {
            let at = camera.pos.truncate() + basis.dir * 2.0;
            spawn_burst(sim.world_mut(), Vec3::new(at.x, at.y, 0.5), rgb(255, 160, 40), BURST_COUNT);
        }

        sim.pump(if focus { FOCUS_TIME_SCALE } else { 1.0 });
        drawables(sim.world(), &mut snapshot);

        /* draw */
        let scene = Scene {
            grid: &grid,
            camera: &camera,
            drawables: &snapshot,
            time: clock.elapsed().as_secs_f32(),
            focus,
        };
        let mut presented = Ok(());
        renderer.draw_frame(w, h, &scene, |fb, fw, fh| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            presented = win.update_with_buffer(fb, fw, fh);
        });
        presented?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            let fps = 1000.0 / avg_ms;
            tracing::info!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, fps);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
