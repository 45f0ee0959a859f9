use glam::Mat4;

use super::pose::CameraPose;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the camera matrices and projection metadata.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// World-to-view matrix.
    pub view: [[f32; 4]; 4],
    /// View-to-clip matrix.
    pub proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Unit view direction.
    pub forward: [f32; 3],
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
    /// 1 for orthographic projection, 0 for perspective.
    pub ortho: u32,
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 2],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity matrices.
    pub fn new() -> Self {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        Self {
            view_proj: identity,
            view: identity,
            proj: identity,
            position: [0.0; 3],
            aspect: 1.0,
            forward: [0.0, 0.0, -1.0],
            near: 0.1,
            far: 100.0,
            ortho: 0,
            _pad: [0.0; 2],
        }
    }

    /// Update uniform fields from the pose's current damped state.
    pub fn update_from_pose(&mut self, pose: &CameraPose) {
        let view = pose.view_matrix();
        let proj = pose.projection_matrix();
        let clip = pose.clip_planes();
        self.view_proj = (proj * view).to_cols_array_2d();
        self.view = view.to_cols_array_2d();
        self.proj = proj.to_cols_array_2d();
        self.position = pose.position().to_array();
        self.aspect = pose.aspect();
        self.forward = pose.look_direction().to_array();
        self.near = clip.near;
        self.far = clip.far;
        self.ortho = u32::from(pose.ortho());
    }
}
