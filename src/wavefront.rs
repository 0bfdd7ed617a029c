use nalgebra::{Point2, Vector2};

/// A single traveling point-wave instance.
///
/// `generation` counts the reflection/transmission splits a wavefront's
/// lineage has undergone since its originating emission.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveFront {
    pub position: Point2<f32>,
    pub angle: f32,
    pub age: u32,
    pub amplitude: f32,
    pub generation: u32,
}

impl WaveFront {
    pub fn new(position: Point2<f32>, angle: f32, amplitude: f32, generation: u32) -> Self {
        Self {
            position,
            angle,
            age: 0,
            amplitude,
            generation,
        }
    }

    /// Unit direction vector for the current heading.
    pub fn direction(&self) -> Vector2<f32> {
        Vector2::new(self.angle.cos(), self.angle.sin())
    }

    /// Moves the wavefront one tick forward and applies natural decay.
    pub fn advance(&mut self, speed: f32, decay: f32) {
        self.position += self.direction() * speed;
        self.age += 1;
        self.amplitude *= decay;
    }
}
