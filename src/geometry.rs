//! Joint angle computation.

use crate::{constants::EPSILON, Error, Result};

/// Anything that exposes planar coordinates.
///
/// Depth, when a point carries one, is ignored by every computation in this module.
pub trait Coordinates {
    /// Horizontal coordinate
    fn x(&self) -> f64;
    /// Vertical coordinate
    fn y(&self) -> f64;
}

impl Coordinates for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }

    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinates for (f32, f32) {
    fn x(&self) -> f64 {
        f64::from(self.0)
    }

    fn y(&self) -> f64 {
        f64::from(self.1)
    }
}

impl Coordinates for [f64; 3] {
    fn x(&self) -> f64 {
        self[0]
    }

    fn y(&self) -> f64 {
        self[1]
    }
}

/// Angle in degrees at vertex `b` between the rays `b -> a` and `b -> c`.
///
/// The result lies in `[0, 180]`.
///
/// # Errors
///
/// Returns [`Error::DegenerateAngle`] when `b` coincides with `a` or `c`, since
/// one of the rays has no direction.
pub fn angle_between_points<A, B, C>(a: &A, b: &B, c: &C) -> Result<f64>
where
    A: Coordinates + ?Sized,
    B: Coordinates + ?Sized,
    C: Coordinates + ?Sized,
{
    let (ba_x, ba_y) = (a.x() - b.x(), a.y() - b.y());
    let (bc_x, bc_y) = (c.x() - b.x(), c.y() - b.y());

    let mag_ba = ba_x.hypot(ba_y);
    let mag_bc = bc_x.hypot(bc_y);

    if mag_ba < EPSILON || mag_bc < EPSILON {
        return Err(Error::DegenerateAngle { x: b.x(), y: b.y() });
    }

    let cos_angle = ((ba_x * bc_x + ba_y * bc_y) / (mag_ba * mag_bc)).clamp(-1.0, 1.0);

    Ok(cos_angle.acos().to_degrees())
}
