use std::collections::VecDeque;
use std::f32::consts::TAU;

use nalgebra::Point2;

use crate::config;
use crate::error::{RippleError, RippleResult};
use crate::geometry;
use crate::settings::{CascadePolicy, HitPolicy, Settings};
use crate::source::WaveSource;
use crate::wall::{Wall, WallType};
use crate::wavefront::WaveFront;

#[cfg(test)]
mod tests {

    use super::*;

    fn deferred_settings() -> Settings {
        Settings {
            cascade: CascadePolicy::Deferred,
            ..Settings::default()
        }
    }

    /// Vertical wall at x = 5, crossed by a rightward wavefront from (4, 0).
    fn engine_with_wall(settings: Settings, reflection: f32, transmission: f32) -> Engine {
        let mut engine = Engine::new(settings);
        engine
            .add_wall_with(
                Point2::new(5.0, -5.0),
                Point2::new(5.0, 5.0),
                WallType::Custom,
                reflection,
                transmission,
            )
            .unwrap();
        engine
            .wavefronts
            .push(WaveFront::new(Point2::new(4.0, 0.0), 0.0, 1.0, 0));
        engine
    }

    #[test]
    fn reflection_law() {
        let mut engine = engine_with_wall(deferred_settings(), 0.8, 0.0);
        engine.tick();

        // Parent removed, one reflected child heading back the way it came.
        assert_eq!(engine.wavefronts().len(), 1);
        let child = &engine.wavefronts()[0];
        assert!((child.angle - std::f32::consts::PI).abs() < 1e-5);
        assert!((child.amplitude - 0.99 * 0.8).abs() < 1e-5);
        assert_eq!(child.generation, 1);
        assert_eq!(child.age, 0);
    }

    #[test]
    fn transmission_passes_straight_through() {
        let mut engine = engine_with_wall(deferred_settings(), 0.2, 0.8);
        engine.tick();

        assert_eq!(engine.wavefronts().len(), 2);
        let reflected = engine
            .wavefronts()
            .iter()
            .find(|f| f.angle != 0.0)
            .unwrap();
        let transmitted = engine
            .wavefronts()
            .iter()
            .find(|f| f.angle == 0.0)
            .unwrap();
        assert!((reflected.amplitude - 0.99 * 0.2).abs() < 1e-5);
        assert!((transmitted.amplitude - 0.99 * 0.8).abs() < 1e-5);
        // Energy split never gains: each child is at most the parent.
        assert!(reflected.amplitude <= 0.99);
        assert!(transmitted.amplitude <= 0.99);
    }

    #[test]
    fn dead_wall_absorbs_everything() {
        let mut engine = engine_with_wall(deferred_settings(), 0.0, 0.0);
        engine.tick();
        assert!(engine.wavefronts().is_empty());
    }

    #[test]
    fn reflection_capped_at_max_generation() {
        let mut engine = Engine::new(deferred_settings());
        engine
            .add_wall_with(
                Point2::new(5.0, -5.0),
                Point2::new(5.0, 5.0),
                WallType::Custom,
                1.0,
                0.0,
            )
            .unwrap();
        engine
            .wavefronts
            .push(WaveFront::new(Point2::new(4.0, 0.0), 0.0, 1.0, 3));
        engine.tick();
        // Generation 3 may not spawn a reflected child; no transmission either.
        assert!(engine.wavefronts().is_empty());
    }

    #[test]
    fn transmission_not_generation_capped() {
        let mut engine = Engine::new(deferred_settings());
        engine
            .add_wall_with(
                Point2::new(5.0, -5.0),
                Point2::new(5.0, 5.0),
                WallType::Custom,
                1.0,
                0.5,
            )
            .unwrap();
        engine
            .wavefronts
            .push(WaveFront::new(Point2::new(4.0, 0.0), 0.0, 1.0, 3));
        engine.tick();
        // Only the transmitted child survives the cap.
        assert_eq!(engine.wavefronts().len(), 1);
        let child = &engine.wavefronts()[0];
        assert_eq!(child.angle, 0.0);
        assert_eq!(child.generation, 4);
    }

    #[test]
    fn cascade_policies_diverge() {
        // Under Immediate cascading the reflected child advances again this
        // tick, re-crosses the same wall, and the ping-pong runs the lineage
        // into the generation cap within a single tick. Under Deferred the
        // child is untouched until the next tick.
        let mut immediate = engine_with_wall(Settings::default(), 1.0, 0.0);
        immediate.tick();
        assert!(immediate.wavefronts().is_empty());

        let mut deferred = engine_with_wall(deferred_settings(), 1.0, 0.0);
        deferred.tick();
        assert_eq!(deferred.wavefronts().len(), 1);
        assert_eq!(deferred.wavefronts()[0].generation, 1);
    }

    #[test]
    fn nearest_hit_beats_placement_order() {
        let settings = Settings {
            wave_speed: 4.0,
            cascade: CascadePolicy::Deferred,
            ..Settings::default()
        };

        let mut engine = Engine::new(settings.clone());
        // Far wall placed first, near wall second; both purely transmissive
        // with distinct coefficients so the response identifies the wall.
        engine
            .add_wall_with(
                Point2::new(3.0, -5.0),
                Point2::new(3.0, 5.0),
                WallType::Custom,
                0.0,
                0.6,
            )
            .unwrap();
        engine
            .add_wall_with(
                Point2::new(1.0, -5.0),
                Point2::new(1.0, 5.0),
                WallType::Custom,
                0.0,
                0.4,
            )
            .unwrap();
        engine
            .wavefronts
            .push(WaveFront::new(Point2::new(0.0, 0.0), 0.0, 1.0, 0));
        engine.tick();
        assert_eq!(engine.wavefronts().len(), 1);
        assert!((engine.wavefronts()[0].amplitude - 0.99 * 0.4).abs() < 1e-5);

        let mut engine = Engine::new(Settings {
            hit_policy: HitPolicy::FirstListed,
            ..settings
        });
        engine
            .add_wall_with(
                Point2::new(3.0, -5.0),
                Point2::new(3.0, 5.0),
                WallType::Custom,
                0.0,
                0.6,
            )
            .unwrap();
        engine
            .add_wall_with(
                Point2::new(1.0, -5.0),
                Point2::new(1.0, 5.0),
                WallType::Custom,
                0.0,
                0.4,
            )
            .unwrap();
        engine
            .wavefronts
            .push(WaveFront::new(Point2::new(0.0, 0.0), 0.0, 1.0, 0));
        engine.tick();
        assert_eq!(engine.wavefronts().len(), 1);
        assert!((engine.wavefronts()[0].amplitude - 0.99 * 0.6).abs() < 1e-5);
    }

    #[test]
    fn relocate_source() {
        let mut engine = Engine::new(Settings::default());
        let handle = engine.add_source(10.0, 10.0);
        engine.relocate_source(handle, 25.0, 30.0).unwrap();
        assert_eq!(engine.sources()[0].position, Point2::new(25.0, 30.0));

        let stale = SourceHandle(7);
        assert!(matches!(
            engine.relocate_source(stale, 0.0, 0.0),
            Err(RippleError::UnknownSource(7))
        ));
    }

    #[test]
    fn clear_and_reset() {
        let mut engine = Engine::new(Settings::default());
        engine.add_source(10.0, 10.0);
        engine
            .add_wall(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), WallType::Solid)
            .unwrap();
        for _ in 0..10 {
            engine.tick();
        }
        assert!(!engine.wavefronts().is_empty());

        engine.clear_waves();
        assert!(engine.wavefronts().is_empty());
        assert_eq!(engine.sources().len(), 1);
        assert_eq!(engine.walls().len(), 1);

        engine.reset();
        assert!(engine.sources().is_empty());
        assert!(engine.walls().is_empty());
    }
}

/// Handle to a source owned by an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceHandle(usize);

/// Handle to a wall owned by an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallHandle(usize);

/// Owns the simulation state and advances it one discrete tick at a time.
///
/// All mutation goes through the entry points below; the host reads the
/// collections back through the slice accessors after each tick.
#[derive(Debug, Clone)]
pub struct Engine {
    settings: Settings,
    sources: Vec<WaveSource>,
    walls: Vec<Wall>,
    wavefronts: Vec<WaveFront>,
}

impl Engine {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            sources: Vec::new(),
            walls: Vec::new(),
            wavefronts: Vec::new(),
        }
    }

    /// Creates a source at the given position with the default cadence.
    pub fn add_source(&mut self, x: f32, y: f32) -> SourceHandle {
        self.sources
            .push(WaveSource::new(Point2::new(x, y), self.settings.emit_rate));
        SourceHandle(self.sources.len() - 1)
    }

    /// Moves an existing source, e.g. for drag interactions in a host UI.
    pub fn relocate_source(&mut self, handle: SourceHandle, x: f32, y: f32) -> RippleResult<()> {
        let source = self
            .sources
            .get_mut(handle.0)
            .ok_or(RippleError::UnknownSource(handle.0))?;
        source.position = Point2::new(x, y);
        Ok(())
    }

    /// Creates a wall using the type's default coefficients.
    pub fn add_wall(
        &mut self,
        p1: Point2<f32>,
        p2: Point2<f32>,
        kind: WallType,
    ) -> RippleResult<WallHandle> {
        Ok(self.push_wall(Wall::new(p1, p2, kind)?))
    }

    /// Creates a wall with explicit coefficients, overriding the type defaults.
    pub fn add_wall_with(
        &mut self,
        p1: Point2<f32>,
        p2: Point2<f32>,
        kind: WallType,
        reflection: f32,
        transmission: f32,
    ) -> RippleResult<WallHandle> {
        Ok(self.push_wall(Wall::with_coefficients(p1, p2, kind, reflection, transmission)?))
    }

    fn push_wall(&mut self, wall: Wall) -> WallHandle {
        self.walls.push(wall);
        WallHandle(self.walls.len() - 1)
    }

    /// Sets the global per-tick displacement multiplier.
    pub fn set_wave_speed(&mut self, speed: f32) {
        self.settings.wave_speed = speed;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sources(&self) -> &[WaveSource] {
        &self.sources
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn wavefronts(&self) -> &[WaveFront] {
        &self.wavefronts
    }

    /// Empties the live-wavefront set only.
    pub fn clear_waves(&mut self) {
        self.wavefronts.clear();
    }

    /// Empties wavefronts, sources, and walls. Outstanding handles are stale
    /// after this call.
    pub fn reset(&mut self) {
        self.wavefronts.clear();
        self.sources.clear();
        self.walls.clear();
    }

    /// Advances the simulation by one discrete tick: emit, advance, collide,
    /// split, cull.
    pub fn tick(&mut self) {
        self.emit();

        // Drain the live set through a work queue. Collision children either
        // join the queue (Immediate: they advance and may collide again this
        // tick) or sit in `spawned` until the pass is over (Deferred).
        let mut queue: VecDeque<WaveFront> = self.wavefronts.drain(..).collect();
        let mut survivors: Vec<WaveFront> = Vec::with_capacity(queue.len());
        let mut spawned: Vec<WaveFront> = Vec::new();

        while let Some(mut front) = queue.pop_front() {
            if Self::step_front(&mut front, &self.walls, &self.settings, &mut spawned) {
                survivors.push(front);
            }
            if self.settings.cascade == CascadePolicy::Immediate {
                queue.extend(spawned.drain(..));
            }
        }

        survivors.extend(spawned);
        self.wavefronts = survivors;
    }

    /// Spawns a full ring of wavefronts for every source whose cadence is due.
    fn emit(&mut self) {
        let step = TAU / config::EMIT_DIRECTIONS as f32;
        for source in &mut self.sources {
            if source.poll() {
                for i in 0..config::EMIT_DIRECTIONS {
                    self.wavefronts.push(WaveFront::new(
                        source.position,
                        i as f32 * step,
                        config::INITIAL_AMPLITUDE,
                        0,
                    ));
                }
            }
        }
    }

    /// Advances one wavefront and resolves any wall collision along its
    /// motion segment. Children go into `spawned`. Returns whether the
    /// wavefront survives the tick.
    fn step_front(
        front: &mut WaveFront,
        walls: &[Wall],
        settings: &Settings,
        spawned: &mut Vec<WaveFront>,
    ) -> bool {
        let prev = front.position;
        front.advance(settings.wave_speed, settings.amplitude_decay);

        if let Some(wall) = Self::find_hit(prev, front.position, walls, settings.hit_policy) {
            Self::split(front, wall, settings, spawned);
            return false;
        }

        front.age <= settings.max_age && front.amplitude >= settings.min_amplitude
    }

    fn find_hit<'a>(
        prev: Point2<f32>,
        next: Point2<f32>,
        walls: &'a [Wall],
        policy: HitPolicy,
    ) -> Option<&'a Wall> {
        match policy {
            HitPolicy::FirstListed => walls
                .iter()
                .find(|wall| geometry::segment_intersection(prev, next, wall.p1, wall.p2).is_some()),
            HitPolicy::Nearest => walls
                .iter()
                .filter_map(|wall| {
                    geometry::segment_intersection(prev, next, wall.p1, wall.p2)
                        .map(|hit| (hit.t, wall))
                })
                .min_by(|a, b| a.0.total_cmp(&b.0))
                .map(|(_, wall)| wall),
        }
    }

    /// Collision response: replace the colliding wavefront with up to two
    /// children at its post-step position. Reflection is generation-capped;
    /// transmission is not.
    fn split(front: &WaveFront, wall: &Wall, settings: &Settings, spawned: &mut Vec<WaveFront>) {
        if wall.reflection > 0.0 && front.generation < settings.max_reflections {
            let reflected = geometry::reflect(front.direction(), wall.normal);
            spawned.push(WaveFront::new(
                front.position,
                reflected.y.atan2(reflected.x),
                front.amplitude * wall.reflection,
                front.generation + 1,
            ));
        }
        if wall.transmission > 0.0 {
            spawned.push(WaveFront::new(
                front.position,
                front.angle,
                front.amplitude * wall.transmission,
                front.generation + 1,
            ));
        }
    }
}
