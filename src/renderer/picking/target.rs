//! wgpu implementation of the splat index target.
//!
//! An Rgba8Unorm color texture plus Depth32Float depth, resized lazily to
//! the viewport, with a blocking staging-buffer readback. The color clear
//! value is white, so untouched pixels read back as all-ones (no splat).

use std::sync::mpsc;

use wgpu::util::DeviceExt;

use super::decode::BYTES_PER_PIXEL;
use super::mode::{PickMode, SplatPickUniform};
use super::picker::SplatPickBackend;
use crate::error::ReadbackError;
use crate::scene::ElementId;

/// Color format of the index texture.
pub const INDEX_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Depth format of the index pass.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Host renderer hook that draws one splat element's indices.
///
/// The implementation binds its own pipeline (targeting [`INDEX_FORMAT`]
/// and [`DEPTH_FORMAT`]) and reads the mode uniform from
/// `pick_uniforms`, laid out as [`SplatPickUniform`].
pub trait SplatIndexPass {
    /// Record the draw for `splat` into `pass`.
    fn draw(&self, pass: &mut wgpu::RenderPass<'_>, splat: ElementId, pick_uniforms: &wgpu::BindGroup);
}

struct Textures {
    color: wgpu::Texture,
    color_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

/// Reusable GPU index target for [`SplatPicker`](super::SplatPicker).
pub struct GpuSplatPickTarget {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pass: Box<dyn SplatIndexPass>,
    textures: Option<Textures>,
    /// Staging buffer and its size in bytes; grown on demand.
    staging: Option<(wgpu::Buffer, u64)>,
    uniform_buffer: wgpu::Buffer,
    /// Layout for the pick uniform bind group (group index chosen by the
    /// host pipeline).
    pub uniform_layout: wgpu::BindGroupLayout,
    uniform_bind_group: wgpu::BindGroup,
}

impl GpuSplatPickTarget {
    /// Create an unallocated target. Call
    /// [`ensure_capacity`](SplatPickBackend::ensure_capacity) before use.
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, pass: Box<dyn SplatIndexPass>) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Splat Pick Uniform Buffer"),
            contents: bytemuck::cast_slice(&[SplatPickUniform::from(PickMode::default())]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Splat Pick Bind Group Layout"),
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

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Splat Pick Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            device: device.clone(),
            queue: queue.clone(),
            pass,
            textures: None,
            staging: None,
            uniform_buffer,
            uniform_layout,
            uniform_bind_group,
        }
    }

    fn create_textures(device: &wgpu::Device, width: u32, height: u32) -> Textures {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Splat Pick Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: INDEX_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Splat Pick Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());
        Textures {
            color,
            color_view,
            depth_view,
            width,
            height,
        }
    }

    fn staging_buffer(&mut self, size: u64) -> &wgpu::Buffer {
        if matches!(self.staging, Some((_, have)) if have < size) {
            self.staging = None;
        }
        let device = &self.device;
        let (buffer, _) = self.staging.get_or_insert_with(|| {
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Splat Pick Staging Buffer"),
                size,
                usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
                mapped_at_creation: false,
            });
            (buffer, size)
        });
        buffer
    }

    /// Block until `slice` is mapped for reading.
    fn wait_for_map(device: &wgpu::Device, slice: &wgpu::BufferSlice<'_>) -> Result<(), ReadbackError> {
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = device
            .poll(wgpu::PollType::Wait)
            .map_err(|e| ReadbackError::Poll(e.to_string()))?;
        match rx.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(ReadbackError::Map(e)),
            Err(_) => Err(ReadbackError::Disconnected),
        }
    }
}

/// Bytes per staging row, padded to wgpu's copy alignment.
fn padded_row_bytes(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL as u32;
    unpadded.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT) * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT
}

impl SplatPickBackend for GpuSplatPickTarget {
    fn ensure_capacity(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if matches!(&self.textures, Some(t) if t.width == width && t.height == height) {
            return;
        }
        log::debug!("splat pick target resized to {width}x{height}");
        self.textures = Some(Self::create_textures(&self.device, width, height));
    }

    fn size(&self) -> (u32, u32) {
        self.textures.as_ref().map_or((0, 0), |t| (t.width, t.height))
    }

    fn render_index_pass(&mut self, splat: ElementId, mode: PickMode) -> Result<(), ReadbackError> {
        let textures = self.textures.as_ref().ok_or(ReadbackError::NotAllocated)?;
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[SplatPickUniform::from(mode)]),
        );

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Splat Pick Encoder"),
        });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Splat Pick Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &textures.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &textures.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            self.pass.draw(&mut render_pass, splat, &self.uniform_bind_group);
        }
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    fn read_rect(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<Vec<u8>, ReadbackError> {
        let Some(textures) = self.textures.as_ref() else {
            return Err(ReadbackError::NotAllocated);
        };
        let color = textures.color.clone();
        let row_bytes = padded_row_bytes(width);
        let size = u64::from(row_bytes) * u64::from(height);

        let device = self.device.clone();
        let queue = self.queue.clone();
        let staging = self.staging_buffer(size);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Splat Pick Readback Encoder"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &color,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(row_bytes),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        let _ = queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..size);
        Self::wait_for_map(&device, &slice)?;

        let tight = width as usize * BYTES_PER_PIXEL;
        let mut out = Vec::with_capacity(tight * height as usize);
        {
            let data = slice.get_mapped_range();
            for row in data.chunks(row_bytes as usize).take(height as usize) {
                out.extend_from_slice(&row[..tight]);
            }
        }
        staging.unmap();
        Ok(out)
    }
}
