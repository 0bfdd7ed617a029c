use nalgebra::{Point2, Vector2};

use crate::config;
use crate::error::{RippleError, RippleResult};


/// Named wall presets. Each carries default reflection and transmission
/// coefficients and a display colour. Fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallType {
    Solid,
    Water,
    Glass,
    Absorber,
    Mirror,
    Custom,
}

impl WallType {
    pub const ALL: [WallType; 6] = [
        WallType::Solid,
        WallType::Water,
        WallType::Glass,
        WallType::Absorber,
        WallType::Mirror,
        WallType::Custom,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            WallType::Solid => "Solid Wall",
            WallType::Water => "Water",
            WallType::Glass => "Glass",
            WallType::Absorber => "Absorber",
            WallType::Mirror => "Mirror",
            WallType::Custom => "Custom",
        }
    }

    pub fn default_reflection(&self) -> f32 {
        match self {
            WallType::Solid => 0.9,
            WallType::Water => 0.2,
            WallType::Glass => 0.3,
            WallType::Absorber => 0.1,
            WallType::Mirror => 1.0,
            WallType::Custom => 0.5,
        }
    }

    pub fn default_transmission(&self) -> f32 {
        match self {
            WallType::Solid => 0.1,
            WallType::Water => 0.8,
            WallType::Glass => 0.7,
            WallType::Absorber => 0.0,
            WallType::Mirror => 0.0,
            WallType::Custom => 0.5,
        }
    }

    /// Display-only RGB colour.
    pub fn color(&self) -> [u8; 3] {
        match self {
            WallType::Solid => [255, 255, 255],
            WallType::Water => [0, 255, 255],
            WallType::Glass => [173, 216, 230],
            WallType::Absorber => [169, 169, 169],
            WallType::Mirror => [255, 255, 0],
            WallType::Custom => [255, 0, 255],
        }
    }
}

/// An immutable two-sided line-segment obstacle.
///
/// The unit normal is a fixed perpendicular rotation of the segment
/// direction; it carries no promise of pointing toward any particular side.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub p1: Point2<f32>,
    pub p2: Point2<f32>,
    pub normal: Vector2<f32>,
    pub length: f32,
    pub reflection: f32,
    pub transmission: f32,
    pub kind: WallType,
}

impl Wall {
    /// Creates a wall using the type's default coefficients.
    pub fn new(p1: Point2<f32>, p2: Point2<f32>, kind: WallType) -> RippleResult<Self> {
        Self::with_coefficients(
            p1,
            p2,
            kind,
            kind.default_reflection(),
            kind.default_transmission(),
        )
    }

    /// Creates a wall with explicit coefficients, overriding the type
    /// defaults. Rejects degenerate segments and coefficients outside
    /// `[0, 1]` so the tick loop never sees malformed geometry.
    pub fn with_coefficients(
        p1: Point2<f32>,
        p2: Point2<f32>,
        kind: WallType,
        reflection: f32,
        transmission: f32,
    ) -> RippleResult<Self> {
        let d = p2 - p1;
        let length = d.norm();
        if length <= config::MIN_WALL_LENGTH {
            return Err(RippleError::DegenerateWall { length });
        }
        check_coefficient("reflection", reflection)?;
        check_coefficient("transmission", transmission)?;

        Ok(Self {
            p1,
            p2,
            normal: Vector2::new(-d.y, d.x) / length,
            length,
            reflection,
            transmission,
            kind,
        })
    }
}

fn check_coefficient(name: &'static str, value: f32) -> RippleResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(RippleError::CoefficientOutOfRange { name, value });
    }
    Ok(())
}
