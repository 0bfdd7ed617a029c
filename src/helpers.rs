//! Draw utilities for the interactive viewer.
//!
//! Pure presentation: everything here reads engine state through the slice
//! accessors and never mutates it.

use macroquad::prelude::*;

use crate::engine::Engine;
use crate::source::WaveSource;
use crate::wall::Wall;
use crate::wavefront::WaveFront;

const WALL_THICKNESS: f32 = 3.0;
const SOURCE_RADIUS: f32 = 8.0;
const FRONT_RADIUS: f32 = 3.0;

/// Draws walls, sources, and live wavefronts for the current tick.
pub fn draw_scene(engine: &Engine) {
    draw_walls(engine.walls());
    draw_sources(engine.sources());
    draw_wavefronts(engine.wavefronts());
}

pub fn draw_walls(walls: &[Wall]) {
    for wall in walls {
        let [r, g, b] = wall.kind.color();
        draw_line(
            wall.p1.x,
            wall.p1.y,
            wall.p2.x,
            wall.p2.y,
            WALL_THICKNESS,
            Color::from_rgba(r, g, b, 255),
        );
    }
}

pub fn draw_sources(sources: &[WaveSource]) {
    for source in sources {
        draw_circle(source.position.x, source.position.y, SOURCE_RADIUS, RED);
        draw_circle_lines(source.position.x, source.position.y, SOURCE_RADIUS, 2.0, WHITE);
    }
}

pub fn draw_wavefronts(wavefronts: &[WaveFront]) {
    for front in wavefronts {
        let color = generation_color(front.generation, front.amplitude);
        draw_circle_lines(front.position.x, front.position.y, FRONT_RADIUS, 1.5, color);
    }
}

/// Colour by reflection depth, faded by amplitude: cyan for originals, then
/// yellow, orange, red for deeper generations.
fn generation_color(generation: u32, amplitude: f32) -> Color {
    let alpha = amplitude.min(1.0);
    match generation {
        0 => Color::new(0.0, 1.0, 1.0, alpha),
        1 => Color::new(1.0, 1.0, 0.0, alpha),
        2 => Color::new(1.0, 0.65, 0.0, alpha),
        _ => Color::new(1.0, 0.0, 0.0, alpha),
    }
}
