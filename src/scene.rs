//! Scene state for the spinning octahedron
//!
//! Owns the transform matrices and lighting parameters uploaded to the GPU
//! each frame. The model matrix accumulates a fixed rotation every frame;
//! the view and projection matrices are built once at startup.

use glam::{Mat4, Vec3};
use octa_render::SceneUniforms;

use crate::config::AppConfig;

/// Rotation applied to the model matrix each frame, in degrees
pub const ROTATION_DEGREES_PER_FRAME: f32 = 0.5;

/// Axis the octahedron spins around, normalized before use
pub const ROTATION_AXIS: Vec3 = Vec3::new(0.5, 1.0, 0.0);

/// Transform and lighting state for the rendered scene
pub struct SceneState {
    model: Mat4,
    view: Mat4,
    projection: Mat4,
    light_pos: Vec3,
    view_pos: Vec3,
    object_color: Vec3,
    light_color: Vec3,
}

impl SceneState {
    /// Build the initial scene state from configuration
    ///
    /// The projection matrix uses the configured window dimensions and is
    /// never rebuilt, so resizing the window stretches the image rather
    /// than changing the field of view.
    pub fn new(config: &AppConfig) -> Self {
        let eye = Vec3::from_array(config.camera.eye);
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);

        let aspect = config.window.width as f32 / config.window.height as f32;
        let projection = Mat4::perspective_rh(
            config.camera.fov.to_radians(),
            aspect,
            config.camera.near,
            config.camera.far,
        );

        Self {
            model: Mat4::IDENTITY,
            view,
            projection,
            light_pos: Vec3::from_array(config.lighting.light_pos),
            view_pos: Vec3::from_array(config.lighting.view_pos),
            object_color: Vec3::from_array(config.lighting.object_color),
            light_color: Vec3::from_array(config.lighting.light_color),
        }
    }

    /// Rotate the model by one frame's increment around the spin axis
    pub fn advance_rotation(&mut self) {
        let rotation = Mat4::from_axis_angle(
            ROTATION_AXIS.normalize(),
            ROTATION_DEGREES_PER_FRAME.to_radians(),
        );
        self.model = self.model * rotation;
    }

    /// Pack the current state into the GPU uniform layout
    ///
    /// The normal matrix is derived from the model matrix here so shaders
    /// never have to invert anything.
    pub fn uniforms(&self) -> SceneUniforms {
        SceneUniforms {
            model: self.model.to_cols_array_2d(),
            view: self.view.to_cols_array_2d(),
            projection: self.projection.to_cols_array_2d(),
            normal: self.model.inverse().transpose().to_cols_array_2d(),
            light_pos: self.light_pos.to_array(),
            view_pos: self.view_pos.to_array(),
            object_color: self.object_color.to_array(),
            light_color: self.light_color.to_array(),
            ..SceneUniforms::default()
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig::default()
    }

    #[test]
    fn test_initial_model_is_identity() {
        let scene = SceneState::new(&test_config());
        assert_eq!(scene.model, Mat4::IDENTITY);
    }

    #[test]
    fn test_rotation_accumulates() {
        let mut scene = SceneState::new(&test_config());
        let axis = ROTATION_AXIS.normalize();

        for frames in [1u32, 10, 720] {
            let mut scene_n = SceneState::new(&test_config());
            for _ in 0..frames {
                scene_n.advance_rotation();
            }
            let expected = Mat4::from_axis_angle(
                axis,
                (ROTATION_DEGREES_PER_FRAME * frames as f32).to_radians(),
            );
            assert!(
                scene_n.model.abs_diff_eq(expected, 1e-3),
                "after {} frames: {:?} != {:?}",
                frames,
                scene_n.model,
                expected
            );
        }

        scene.advance_rotation();
        assert!(!scene.model.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_full_revolution_returns_to_identity() {
        let mut scene = SceneState::new(&test_config());
        let frames = (360.0 / ROTATION_DEGREES_PER_FRAME) as u32;
        for _ in 0..frames {
            scene.advance_rotation();
        }
        assert!(scene.model.abs_diff_eq(Mat4::IDENTITY, 1e-3));
    }

    #[test]
    fn test_projection_unchanged_by_rotation() {
        let mut scene = SceneState::new(&test_config());
        let before = scene.projection;
        for _ in 0..100 {
            scene.advance_rotation();
        }
        assert_eq!(scene.projection, before);
    }

    #[test]
    fn test_view_maps_eye_to_origin() {
        let config = test_config();
        let scene = SceneState::new(&config);
        let view = Mat4::from_cols_array_2d(&scene.uniforms().view);
        let eye = Vec3::from_array(config.camera.eye);
        let transformed = view.transform_point3(eye);
        assert!(transformed.abs_diff_eq(Vec3::ZERO, 1e-5));
    }

    #[test]
    fn test_normal_matrix_matches_rotation() {
        // For a pure rotation the inverse-transpose equals the matrix itself.
        let mut scene = SceneState::new(&test_config());
        for _ in 0..30 {
            scene.advance_rotation();
        }
        let uniforms = scene.uniforms();
        let model = Mat4::from_cols_array_2d(&uniforms.model);
        let normal = Mat4::from_cols_array_2d(&uniforms.normal);
        assert!(normal.abs_diff_eq(model, 1e-4));
    }

    #[test]
    fn test_uniforms_carry_lighting_config() {
        let mut config = test_config();
        config.lighting.light_pos = [3.0, 4.0, 5.0];
        config.lighting.object_color = [0.2, 0.4, 0.6];
        let scene = SceneState::new(&config);
        let uniforms = scene.uniforms();
        assert_eq!(uniforms.light_pos, [3.0, 4.0, 5.0]);
        assert_eq!(uniforms.object_color, [0.2, 0.4, 0.6]);
        assert_eq!(uniforms.light_color, [1.0, 1.0, 1.0]);
    }
}
