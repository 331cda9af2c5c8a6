//! Confetti particle simulation
//!
//! A fixed pool of paper pieces raining over the finale. Pieces are never
//! destroyed: one that falls past the bottom edge is moved back above the
//! top at a new horizontal position. Speeds are per display frame, not per
//! second, and all randomness comes from a seeded RNG.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{CONFETTI_COUNT, CONFETTI_RESPAWN_Y};

/// Piece colors (gold, orange, coral, red, purple, blue)
pub const PALETTE: [&str; 6] = ["#FFD700", "#FFA500", "#FF6B35", "#FF1744", "#9C27B0", "#2196F3"];

/// Piece edge length range in pixels
const SIZE_MIN: f32 = 5.0;
const SIZE_MAX: f32 = 15.0;
/// Fall speed range in pixels per frame
const FALL_MIN: f32 = 2.0;
const FALL_MAX: f32 = 5.0;
/// Maximum sideways drift in pixels per frame
const DRIFT_MAX: f32 = 1.0;
/// Maximum spin in degrees per frame
const SPIN_MAX: f32 = 5.0;

/// A single piece of confetti
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Center position in pixels
    pub pos: Vec2,
    /// Width and height in pixels
    pub size: Vec2,
    /// Index into [`PALETTE`]
    pub color: usize,
    /// Pixels per frame
    pub vel: Vec2,
    /// Degrees
    pub rotation: f32,
    /// Degrees per frame
    pub spin: f32,
}

impl Particle {
    /// Random piece somewhere in the band one screen-height above the top
    fn random(rng: &mut Pcg32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(random_x(rng, width), random_above(rng, height)),
            size: Vec2::new(
                rng.random_range(SIZE_MIN..SIZE_MAX),
                rng.random_range(SIZE_MIN..SIZE_MAX),
            ),
            color: rng.random_range(0..PALETTE.len()),
            vel: Vec2::new(
                rng.random_range(-DRIFT_MAX..DRIFT_MAX),
                rng.random_range(FALL_MIN..FALL_MAX),
            ),
            rotation: rng.random_range(0.0..360.0),
            spin: rng.random_range(-SPIN_MAX..SPIN_MAX),
        }
    }

    pub fn color_hex(&self) -> &'static str {
        PALETTE[self.color]
    }
}

/// Uniform horizontal position in `[0, width)`
fn random_x(rng: &mut Pcg32, width: f32) -> f32 {
    if width > 0.0 {
        rng.random_range(0.0..width)
    } else {
        0.0
    }
}

/// Uniform vertical position in `[-height, 0)`, the band above the top edge
fn random_above(rng: &mut Pcg32, height: f32) -> f32 {
    if height > 0.0 {
        rng.random_range(0.0..height) - height
    } else {
        CONFETTI_RESPAWN_Y
    }
}

/// Drawing target for the particle loop
pub trait ConfettiCanvas {
    /// Wipe the whole surface
    fn clear(&mut self, width: f32, height: f32);

    /// Fill a `size` rectangle centered on `center`, rotated by `radians`
    fn fill_rotated_rect(&mut self, center: Vec2, size: Vec2, radians: f32, color: &str);
}

/// Shared stop flag for a self-scheduling loop
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Simulation lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfettiState {
    #[default]
    Stopped,
    Running,
}

/// Confetti simulation
#[derive(Debug, Clone)]
pub struct Confetti {
    state: ConfettiState,
    particles: Vec<Particle>,
    pool_size: usize,
    width: f32,
    height: f32,
    rng: Pcg32,
    frames: u64,
}

impl Confetti {
    pub fn new(seed: u64) -> Self {
        Self::with_pool_size(seed, CONFETTI_COUNT)
    }

    pub fn with_pool_size(seed: u64, pool_size: usize) -> Self {
        Self {
            state: ConfettiState::Stopped,
            particles: Vec::new(),
            pool_size,
            width: 0.0,
            height: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            frames: 0,
        }
    }

    pub fn state(&self) -> ConfettiState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ConfettiState::Running
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current drawing bounds
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Frames simulated since start
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Size the surface and fill the pool. Only the first call has an effect.
    pub fn start(&mut self, width: f32, height: f32) {
        if self.is_running() {
            log::warn!("Confetti already running");
            return;
        }
        self.width = width;
        self.height = height;
        let rng = &mut self.rng;
        self.particles = (0..self.pool_size)
            .map(|_| Particle::random(rng, width, height))
            .collect();
        self.state = ConfettiState::Running;
        log::info!(
            "Confetti started: {} pieces on {}x{}",
            self.particles.len(),
            width,
            height
        );
    }

    /// Change the drawing bounds. The pool is left untouched.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        log::debug!("Confetti surface resized to {}x{}", width, height);
    }

    /// Advance every piece by one frame, recycling pieces below the bottom edge
    pub fn tick(&mut self) {
        if !self.is_running() {
            return;
        }
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel;
            particle.rotation += particle.spin;

            if particle.pos.y > self.height {
                particle.pos.y = CONFETTI_RESPAWN_Y;
                particle.pos.x = random_x(&mut self.rng, self.width);
            }
        }
        self.frames += 1;
    }

    /// Draw the current frame
    pub fn render(&self, canvas: &mut dyn ConfettiCanvas) {
        canvas.clear(self.width, self.height);
        for particle in &self.particles {
            canvas.fill_rotated_rect(
                particle.pos,
                particle.size,
                particle.rotation.to_radians(),
                particle.color_hex(),
            );
        }
    }

    /// Tick and render up to `frames` frames, stopping early if `token` is
    /// cancelled. Returns the number of frames run.
    pub fn run(&mut self, frames: usize, token: &CancelToken, canvas: &mut dyn ConfettiCanvas) -> usize {
        let mut ran = 0;
        while ran < frames && !token.is_cancelled() {
            self.tick();
            self.render(canvas);
            ran += 1;
        }
        ran
    }
}
