//! Lighting model constants and reference math
//!
//! The Phong coefficients live here as named constants and are mirrored
//! verbatim in phong_frag.wgsl. [`shade`] evaluates the same formula on
//! the CPU so the model's properties can be tested without a GPU.

use glam::Vec3;

/// Ambient term weight
pub const AMBIENT_STRENGTH: f32 = 0.3;

/// Specular term weight
pub const SPECULAR_STRENGTH: f32 = 0.5;

/// Specular exponent
pub const SHININESS: f32 = 32.0;

/// The per-scene inputs of the lighting formula, matching the uniform block
#[derive(Clone, Copy, Debug)]
pub struct LightingEnv {
    pub light_pos: Vec3,
    pub view_pos: Vec3,
    pub light_color: Vec3,
    pub object_color: Vec3,
}

/// The clamped facing ratio driving the diffuse term
///
/// Zero whenever the surface faces away from the light.
pub fn diffuse_factor(normal: Vec3, light_dir: Vec3) -> f32 {
    normal.normalize().dot(light_dir.normalize()).max(0.0)
}

/// CPU evaluation of the fragment stage's formula
///
/// `normal` may be non-unit; it is normalized here exactly as the
/// interpolated normal is in the shader.
pub fn shade(env: &LightingEnv, frag_pos: Vec3, normal: Vec3, tex_color: Vec3) -> Vec3 {
    let n = normal.normalize();
    let light_dir = (env.light_pos - frag_pos).normalize();

    let ambient = AMBIENT_STRENGTH * env.light_color;

    let diffuse = diffuse_factor(n, light_dir) * env.light_color;

    let view_dir = (env.view_pos - frag_pos).normalize();
    let reflect_dir = (-light_dir).reflect(n);
    let spec = view_dir.dot(reflect_dir).max(0.0).powf(SHININESS);
    let specular = SPECULAR_STRENGTH * spec * env.light_color;

    (ambient + diffuse + specular) * (tex_color * env.object_color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_env() -> LightingEnv {
        LightingEnv {
            light_pos: Vec3::new(0.0, 10.0, 0.0),
            view_pos: Vec3::new(0.0, 10.0, 0.0),
            light_color: Vec3::ONE,
            object_color: Vec3::ONE,
        }
    }

    #[test]
    fn test_diffuse_factor_clamps_below_horizon() {
        let light_dir = Vec3::Y;
        assert_eq!(diffuse_factor(Vec3::NEG_Y, light_dir), 0.0);
        assert_eq!(diffuse_factor(Vec3::X, light_dir), 0.0);
    }

    #[test]
    fn test_diffuse_factor_monotone_in_facing_ratio() {
        // Rotate the normal from facing the light (0 deg) to facing away
        // (180 deg); the factor must never increase.
        let light_dir = Vec3::Y;
        let mut previous = f32::INFINITY;
        for step in 0..=36 {
            let angle = (step as f32) * 5.0_f32.to_radians();
            let normal = Vec3::new(angle.sin(), angle.cos(), 0.0);
            let factor = diffuse_factor(normal, light_dir);
            assert!(
                factor <= previous + 1e-6,
                "factor increased at step {}: {} > {}",
                step,
                factor,
                previous
            );
            previous = factor;
        }
    }

    #[test]
    fn test_shade_ambient_floor_when_facing_away() {
        // Surface facing straight away from the light gets no diffuse and
        // no specular, only the ambient floor.
        let env = LightingEnv {
            light_pos: Vec3::new(0.0, 10.0, 0.0),
            view_pos: Vec3::new(0.0, -5.0, 0.0),
            light_color: Vec3::ONE,
            object_color: Vec3::ONE,
        };
        let result = shade(&env, Vec3::ZERO, Vec3::NEG_Y, Vec3::ONE);
        assert!(result.abs_diff_eq(Vec3::splat(AMBIENT_STRENGTH), 1e-6));
    }

    #[test]
    fn test_shade_peak_alignment_sums_all_terms() {
        // Normal toward the light and the eye on the reflection axis:
        // ambient 0.3 + diffuse 1.0 + specular 0.5 * 1^32.
        let env = white_env();
        let result = shade(&env, Vec3::ZERO, Vec3::Y, Vec3::ONE);
        let expected = AMBIENT_STRENGTH + 1.0 + SPECULAR_STRENGTH;
        assert!(result.abs_diff_eq(Vec3::splat(expected), 1e-4));
    }

    #[test]
    fn test_shade_black_texture_is_black() {
        // The fallback texture is black, so the lit result is black too.
        let env = white_env();
        let result = shade(&env, Vec3::ZERO, Vec3::Y, Vec3::ZERO);
        assert_eq!(result, Vec3::ZERO);
    }

    #[test]
    fn test_shade_accepts_non_unit_normals() {
        let env = white_env();
        let unit = shade(&env, Vec3::ZERO, Vec3::Y, Vec3::ONE);
        let scaled = shade(&env, Vec3::ZERO, Vec3::Y * 4.0, Vec3::ONE);
        assert!(unit.abs_diff_eq(scaled, 1e-6));
    }
}
