use wgpu::util::DeviceExt;

use super::core::CameraUniform;
use super::pose::CameraPose;

/// GPU side of the camera: the uniform buffer and its bind group.
///
/// The pose itself lives in the [`Viewport`](crate::engine::Viewport);
/// the controller only mirrors it to the GPU once per frame.
pub struct CameraController {
    /// CPU copy of the last uploaded uniform.
    pub uniform: CameraUniform,
    /// Uniform buffer bound at binding 0.
    pub buffer: wgpu::Buffer,
    /// Layout for the camera bind group.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group exposing the camera buffer.
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Allocate the camera buffer and bind group, initialized from `pose`.
    pub fn new(device: &wgpu::Device, pose: &CameraPose) -> Self {
        let mut uniform = CameraUniform::new();
        uniform.update_from_pose(pose);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Camera Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("Camera Bind Group"),
        });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Upload the pose's current state.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue, pose: &CameraPose) {
        self.uniform.update_from_pose(pose);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
