// core/transform.rs
//
// Pseudo-3D particle transform: three axis rotations composed in 3D and
// collapsed onto the XY plane, wrapped in a scale about the particle position.

use glam::{Affine2, Mat2, Mat3, Vec2, Vec3};

/// Compose rotations about X, then Y, then Z (degrees).
/// Applied to a column vector, X acts first: `Rz * Ry * Rx`.
pub fn rotation_xyz(orientation_deg: Vec3) -> Mat3 {
    let rx = Mat3::from_rotation_x(orientation_deg.x.to_radians());
    let ry = Mat3::from_rotation_y(orientation_deg.y.to_radians());
    let rz = Mat3::from_rotation_z(orientation_deg.z.to_radians());
    rz * ry * rx
}

/// Orthographic projection of a 3D linear map onto the XY plane
/// (drop the Z row and column).
pub fn project_2d(m: Mat3) -> Mat2 {
    Mat2::from_cols(m.x_axis.truncate(), m.y_axis.truncate())
}

/// Full particle transform: move `position` to the origin, scale,
/// rotate, then move back. `position` is a fixed point of the result.
pub fn particle_transform(position: Vec2, scale: Vec2, orientation_deg: Vec3) -> Affine2 {
    let rotation = Affine2::from_mat2(project_2d(rotation_xyz(orientation_deg)));
    Affine2::from_translation(position)
        * rotation
        * Affine2::from_scale(scale)
        * Affine2::from_translation(-position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn zero_orientation_unit_scale_is_identity() {
        let t = particle_transform(Vec2::new(40.0, 12.0), Vec2::ONE, Vec3::ZERO);
        let p = Vec2::new(-3.0, 8.5);
        assert!(approx(t.transform_point2(p), p));
    }

    #[test]
    fn position_is_fixed_point() {
        let pos = Vec2::new(100.0, 50.0);
        let t = particle_transform(pos, Vec2::new(2.0, 0.5), Vec3::new(30.0, 60.0, 90.0));
        assert!(approx(t.transform_point2(pos), pos));
    }

    #[test]
    fn z_rotation_is_planar_rotation() {
        let t = particle_transform(Vec2::ZERO, Vec2::ONE, Vec3::new(0.0, 0.0, 90.0));
        assert!(approx(t.transform_point2(Vec2::X), Vec2::Y));
    }

    #[test]
    fn x_rotation_foreshortens_y() {
        let t = particle_transform(Vec2::ZERO, Vec2::ONE, Vec3::new(60.0, 0.0, 0.0));
        assert!(approx(t.transform_point2(Vec2::Y), Vec2::new(0.0, 0.5)));
        assert!(approx(t.transform_point2(Vec2::X), Vec2::X));
    }

    #[test]
    fn composition_order_matters() {
        let xyz = rotation_xyz(Vec3::new(90.0, 0.0, 90.0));
        let rx = Mat3::from_rotation_x(90f32.to_radians());
        let rz = Mat3::from_rotation_z(90f32.to_radians());
        let zx = rx * rz;
        let v = Vec3::Y;
        assert!((xyz * v - zx * v).length() > 0.5);
        assert!((xyz * v - rz * (rx * v)).length() < 1e-5);
    }

    #[test]
    fn scale_applies_about_position() {
        let pos = Vec2::new(10.0, 10.0);
        let t = particle_transform(pos, Vec2::new(2.0, 3.0), Vec3::ZERO);
        assert!(approx(t.transform_point2(Vec2::new(11.0, 11.0)), Vec2::new(12.0, 13.0)));
    }
}
