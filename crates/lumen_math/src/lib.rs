// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Threshold below which every component of a vector counts as zero.
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Extra queries on `Vec3` used by the tracer.
pub trait Vec3Ext {
    /// Returns true if every component is within [`NEAR_ZERO_EPSILON`] of zero.
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.abs().cmplt(Vec3::splat(NEAR_ZERO_EPSILON)).all()
    }
}
