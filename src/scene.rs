use nalgebra::Point2;

use crate::engine::Engine;
use crate::error::RippleResult;
use crate::wall::WallType;

/// Seeds the canonical demonstration layout: one wall of each type plus two
/// sources. Used by the host binary and as a test fixture.
pub fn demo_scene(engine: &mut Engine) -> RippleResult<()> {
    engine.add_wall(
        Point2::new(200.0, 100.0),
        Point2::new(200.0, 500.0),
        WallType::Solid,
    )?;
    engine.add_wall(
        Point2::new(600.0, 100.0),
        Point2::new(600.0, 500.0),
        WallType::Glass,
    )?;
    engine.add_wall(
        Point2::new(100.0, 300.0),
        Point2::new(700.0, 300.0),
        WallType::Water,
    )?;
    engine.add_wall(
        Point2::new(400.0, 200.0),
        Point2::new(400.0, 400.0),
        WallType::Mirror,
    )?;
    engine.add_wall(
        Point2::new(100.0, 500.0),
        Point2::new(300.0, 300.0),
        WallType::Absorber,
    )?;
    engine.add_wall_with(
        Point2::new(500.0, 500.0),
        Point2::new(700.0, 500.0),
        WallType::Custom,
        0.4,
        0.6,
    )?;

    engine.add_source(300.0, 250.0);
    engine.add_source(500.0, 350.0);

    Ok(())
}
