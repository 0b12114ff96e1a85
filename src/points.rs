use nalgebra::{UnitQuaternion, Vector3};
use rand::Rng;

use crate::config::GenerationConfig;

pub type Point = Vector3<f64>;
pub type PointField = Vec<Point>;

pub const RADIUS: f64 = 2.0;

/// Direction vector of point `(i, j)` before radius jitter.
///
/// The rotation is `rotY(angle1) * rotZ(angle2)` applied to `(0, RADIUS, 0)`,
/// so the Z rotation acts on the vector first. Swapping the order changes
/// the pattern.
#[must_use]
pub fn grid_point(angle1_deg: f64, angle2_deg: f64) -> Point {
    let pointer = Vector3::new(0.0, RADIUS, 0.0);
    let q1 = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle1_deg.to_radians());
    let q2 = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle2_deg.to_radians());
    (q1 * q2).transform_vector(&pointer)
}

/// Lays out `N x N` points in row-major `(i, j)` order, where
/// `N = floor(360 / angle_step)`.
///
/// Expects a validated config. Three values are drawn from `rng` per point
/// (angle1, angle2, radius) even when the jitter is zero, so one seed
/// always walks the same sequence.
#[must_use]
pub fn generate<R: Rng + ?Sized>(config: &GenerationConfig, rng: &mut R) -> PointField {
    let n = config.grid_size();
    let step = config.angle_step;
    let jitter = config.randomize_angle;
    let radius_jitter = config.randomize_radius;

    let mut points = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let angle1 = rng.random::<f64>().mul_add(jitter, i as f64 * step);
            let angle2 = rng.random::<f64>().mul_add(jitter, j as f64 * step);
            let scale = 2.0f64
                .mul_add(rng.random::<f64>(), -1.0)
                .mul_add(radius_jitter, 1.0);
            points.push(grid_point(angle1, angle2) * scale);
        }
    }
    log::debug!(
        "generated {} points (grid {n}x{n}, step {step}, jitter {jitter}, radius jitter {radius_jitter})",
        points.len()
    );
    points
}
