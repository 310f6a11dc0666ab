//! Perspective camera for the scene.
//!
//! The camera keeps its projection matrix cached. Changing the aspect ratio does
//! not touch the matrix until [`Camera::update_projection`] is called, which is
//! what the director does as the last step of a resize.

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Vector3, perspective};

use crate::config::CameraConfig;

/// wgpu clip space has z in `[0, 1]`, cgmath produces OpenGL's `[-1, 1]`.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub direction: Vector3<f32>,
    fovy: Deg<f32>,
    aspect: f32,
    znear: f32,
    zfar: f32,
    projection: Matrix4<f32>,
}

impl Camera {
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut camera = Self {
            position: config.position.into(),
            direction: Vector3::from(config.direction).normalize(),
            fovy: Deg(config.fov_degrees),
            aspect: aspect_of(width, height),
            znear: config.near,
            zfar: config.far,
            projection: Matrix4::from_scale(1.0),
        };
        camera.update_projection();
        camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Recompute the cached projection from the current parameters.
    pub fn update_projection(&mut self) {
        self.projection = perspective(self.fovy, self.aspect, self.znear, self.zfar);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fovy(&self) -> Deg<f32> {
        self.fovy
    }

    pub fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    pub fn projection(&self) -> Matrix4<f32> {
        self.projection
    }

    pub fn view(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.direction, Vector3::unit_y())
    }

    /// Combined matrix in wgpu clip space.
    pub fn view_projection(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.projection * self.view()
    }
}

pub(crate) fn aspect_of(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}
