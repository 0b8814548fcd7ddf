//! Drifting particle decoration
//!
//! The field runs on its own clock and knows nothing about themes. It keeps
//! moving straight through transitions and is only reset by `mount`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::time::Duration;

const GLYPHS: [&str; 4] = ["·", "∙", "•", "✧"];
const DIM: Color = Color::Rgb(110, 110, 130);
const BRIGHT: Color = Color::Rgb(210, 210, 230);

/// Particle field settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Particles per 100 cells
    pub density: f32,
    /// Drift speed in cells per second
    pub speed: f32,
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            density: 1.5,
            speed: 1.2,
            seed: 0x5eed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Twinkle phase offset in radians
    pub twinkle: f32,
}

pub struct ParticleField {
    config: ParticleConfig,
    rng: SmallRng,
    area: Option<Rect>,
    particles: Vec<Particle>,
    clock: Duration,
}

impl ParticleField {
    pub fn new(config: ParticleConfig) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(config.seed),
            area: None,
            particles: Vec::new(),
            clock: Duration::ZERO,
        }
    }

    /// Scatter a fresh set of particles over `area`
    pub fn mount(&mut self, area: Rect) {
        self.rng = SmallRng::seed_from_u64(self.config.seed);
        self.area = Some(area);
        self.particles.clear();

        let cells = area.width as f32 * area.height as f32;
        let count = (cells * self.config.density.max(0.0) / 100.0).round() as usize;
        if area.is_empty() {
            return;
        }
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..TAU);
            let speed = self.config.speed * self.rng.random_range(0.3f32..1.0);
            self.particles.push(Particle {
                x: self.rng.random_range(0.0..area.width as f32),
                y: self.rng.random_range(0.0..area.height as f32),
                vx: angle.cos() * speed,
                // Cells are roughly twice as tall as wide
                vy: angle.sin() * speed * 0.5,
                twinkle: self.rng.random_range(0.0..TAU),
            });
        }
    }

    pub fn unmount(&mut self) {
        self.area = None;
        self.particles.clear();
    }

    pub fn is_mounted(&self) -> bool {
        self.area.is_some()
    }

    pub fn tick(&mut self, dt: Duration) {
        self.clock += dt;
        let Some(area) = self.area else {
            return;
        };
        let (w, h) = (area.width as f32, area.height as f32);
        let secs = dt.as_secs_f32();
        for p in &mut self.particles {
            p.x = wrap(p.x + p.vx * secs, w);
            p.y = wrap(p.y + p.vy * secs, h);
        }
    }

    /// Time this field has been running
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Draw glyphs over whatever is in `buf`, keeping the cell backgrounds
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let Some(mounted) = self.area else {
            return;
        };
        let t = self.clock.as_secs_f32();
        for p in &self.particles {
            let x = area.x + (p.x as u16).min(mounted.width.saturating_sub(1));
            let y = area.y + (p.y as u16).min(mounted.height.saturating_sub(1));
            if !area.contains((x, y).into()) {
                continue;
            }
            let phase = ((t * 1.7 + p.twinkle).sin() + 1.0) / 2.0;
            let glyph = GLYPHS[((phase * GLYPHS.len() as f32) as usize).min(GLYPHS.len() - 1)];
            let fg = crate::color::mix(DIM, BRIGHT, phase);
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(glyph).set_fg(fg);
            }
        }
    }
}

/// `value` wrapped into `0.0..len`
fn wrap(value: f32, len: f32) -> f32 {
    let wrapped = value.rem_euclid(len);
    if wrapped >= len { 0.0 } else { wrapped }
}
