use nalgebra::Point2;

/// A wave emitter: a relocatable position and an emission cadence.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSource {
    pub position: Point2<f32>,
    pub emit_rate: u32,
    frame_counter: u32,
}

impl WaveSource {
    pub fn new(position: Point2<f32>, emit_rate: u32) -> Self {
        Self {
            position,
            emit_rate,
            frame_counter: 0,
        }
    }

    /// Advances the cadence counter by one tick. Returns `true` when a full
    /// emission ring is due, resetting the counter so that
    /// `0 <= counter < emit_rate` holds between calls.
    pub fn poll(&mut self) -> bool {
        self.frame_counter += 1;
        if self.frame_counter >= self.emit_rate {
            self.frame_counter = 0;
            true
        } else {
            false
        }
    }
}
