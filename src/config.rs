/// Number of wavefronts in one emission ring (one every 5 degrees).
pub const EMIT_DIRECTIONS: usize = 72;
/// Amplitude assigned to freshly emitted wavefronts.
pub const INITIAL_AMPLITUDE: f32 = 1.0;
/// Minimum wall length (in scene units) to be considered non-degenerate.
pub const MIN_WALL_LENGTH: f32 = 1e-6;
