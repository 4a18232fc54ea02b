use std::mem::size_of;

use wgpu::util::DeviceExt;

use crate::error::KonusError;
use crate::geometries::{BufferGeometry, ConeGeometry, NormalSet};
use crate::wgpual::Gpu;

/// Configuration for a new [`ConeMesh`].
pub struct ConeOptions {
    /// Number of facets around the circumference. Default is 32.
    pub segments: u32,
    /// RGBA color applied to every vertex. Default is opaque light gray.
    pub color: [f32; 4],
}

impl Default for ConeOptions {
    /// Returns the default cone parameters.
    fn default() -> Self {
        Self {
            segments: 32,
            color: ConeGeometry::DEFAULT_COLOR,
        }
    }
}

/// GPU-resident cone mesh.
///
/// Owns the vertex and index buffers for one cone instance and keeps both
/// normal sets CPU-resident so shading can be toggled with a sub-range
/// upload. The buffers are acquired in [`new`](Self::new) and released
/// deterministically by [`delete`](Self::delete); there is no implicit
/// release on drop beyond wgpu's own reclamation.
pub struct ConeMesh {
    /// The compiled geometry buffers backing the GPU buffers. After mutating
    /// the active normal set directly, call
    /// [`update_normals`](Self::update_normals) to re-synchronize the GPU
    /// copy.
    pub geometry: BufferGeometry,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    released: bool,
}

impl ConeMesh {
    /// The largest facet count whose sequential vertex indices fit 16 bits.
    pub const MAX_SEGMENTS: u32 = u16::MAX as u32 / 3;

    /// Creates a cone mesh and uploads its buffers to the GPU.
    ///
    /// The mesh starts out flat-shaded. Facet counts of 1 or 2 are accepted
    /// but produce a degenerate surface; counts of 3 or more produce a
    /// closed side surface (the cone has no base cap).
    ///
    /// # Errors
    ///
    /// Returns [`KonusError::InvalidSegments`] if `options.segments` is zero
    /// and [`KonusError::TooManySegments`] if it exceeds
    /// [`MAX_SEGMENTS`](Self::MAX_SEGMENTS).
    pub fn new(gpu: &Gpu, options: ConeOptions) -> Result<Self, KonusError> {
        Self::validate_segments(options.segments)?;

        let geometry =
            BufferGeometry::from_geometry(&ConeGeometry::new(options.segments, options.color));

        let vertex_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Cone vertex buffer"),
            size: geometry.packed_bytes(),
            usage: wgpu::BufferUsages::VERTEX.union(wgpu::BufferUsages::COPY_DST),
            mapped_at_creation: false,
        });

        // Section order: positions -> normals -> colors -> UVs.
        gpu.queue
            .write_buffer(&vertex_buffer, 0, bytemuck::cast_slice(&geometry.position));
        gpu.queue.write_buffer(
            &vertex_buffer,
            geometry.normal_offset(),
            bytemuck::cast_slice(&geometry.normal),
        );
        gpu.queue.write_buffer(
            &vertex_buffer,
            geometry.color_offset(),
            bytemuck::cast_slice(&geometry.color),
        );
        gpu.queue.write_buffer(
            &vertex_buffer,
            geometry.uv_offset(),
            bytemuck::cast_slice(&geometry.uv),
        );

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cone index buffer"),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        log::debug!(
            "created cone mesh: {} facets, {} vertices",
            options.segments,
            geometry.vertex_count()
        );

        Ok(Self {
            geometry,
            vertex_buffer,
            index_buffer,
            released: false,
        })
    }

    fn validate_segments(segments: u32) -> Result<(), KonusError> {
        if segments == 0 {
            return Err(KonusError::InvalidSegments { segments });
        }

        if segments > Self::MAX_SEGMENTS {
            return Err(KonusError::TooManySegments { segments });
        }

        Ok(())
    }

    /// Vertex-buffer layouts matching the four slots bound by
    /// [`draw`](Self::draw), for render pipeline construction.
    ///
    /// Shader locations: 0 position (3 floats), 1 normal (3 floats), 2 color
    /// (4 floats), 3 UV (2 floats).
    pub fn vertex_buffer_layouts() -> [wgpu::VertexBufferLayout<'static>; 4] {
        const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        }];
        const NORMAL_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 1,
        }];
        const COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x4,
            offset: 0,
            shader_location: 2,
        }];
        const UV_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: 0,
            shader_location: 3,
        }];

        [
            wgpu::VertexBufferLayout {
                array_stride: (3 * size_of::<f32>()) as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &POSITION_ATTRIBUTES,
            },
            wgpu::VertexBufferLayout {
                array_stride: (3 * size_of::<f32>()) as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &NORMAL_ATTRIBUTES,
            },
            wgpu::VertexBufferLayout {
                array_stride: (4 * size_of::<f32>()) as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &COLOR_ATTRIBUTES,
            },
            wgpu::VertexBufferLayout {
                array_stride: (2 * size_of::<f32>()) as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &UV_ATTRIBUTES,
            },
        ]
    }

    /// Binds the mesh's vertex-buffer sections and index buffer and issues
    /// one indexed triangle-list draw.
    ///
    /// The caller must have set a render pipeline built with
    /// [`vertex_buffer_layouts`](Self::vertex_buffer_layouts) and any bind
    /// groups beforehand.
    ///
    /// # Panics
    ///
    /// Panics if the mesh has been [`delete`](Self::delete)d.
    pub fn draw<'pass>(&'pass self, render_pass: &mut wgpu::RenderPass<'pass>) {
        assert!(!self.released, "draw called on a deleted cone mesh");

        render_pass.set_vertex_buffer(
            0,
            self.vertex_buffer.slice(..self.geometry.normal_offset()),
        );
        render_pass.set_vertex_buffer(
            1,
            self.vertex_buffer
                .slice(self.geometry.normal_offset()..self.geometry.color_offset()),
        );
        render_pass.set_vertex_buffer(
            2,
            self.vertex_buffer
                .slice(self.geometry.color_offset()..self.geometry.uv_offset()),
        );
        render_pass.set_vertex_buffer(3, self.vertex_buffer.slice(self.geometry.uv_offset()..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.geometry.index_count() as u32, 0, 0..1);
    }

    /// Switches the mesh to flat shading and re-uploads the normal section.
    ///
    /// # Panics
    ///
    /// Panics if the mesh has been [`delete`](Self::delete)d.
    pub fn use_flat_shading(&mut self, queue: &wgpu::Queue) {
        self.geometry.use_flat_shading();
        self.update_normals(queue);
    }

    /// Switches the mesh to smooth shading and re-uploads the normal section.
    ///
    /// # Panics
    ///
    /// Panics if the mesh has been [`delete`](Self::delete)d.
    pub fn use_smooth_shading(&mut self, queue: &wgpu::Queue) {
        self.geometry.use_smooth_shading();
        self.update_normals(queue);
    }

    /// Re-uploads just the normal section of the packed vertex buffer,
    /// leaving the position, color, and UV sections untouched.
    ///
    /// # Panics
    ///
    /// Panics if the mesh has been [`delete`](Self::delete)d.
    pub fn update_normals(&self, queue: &wgpu::Queue) {
        assert!(
            !self.released,
            "update_normals called on a deleted cone mesh"
        );

        log::trace!(
            "re-uploading {:?} normals",
            self.geometry.active_normal_set()
        );
        queue.write_buffer(
            &self.vertex_buffer,
            self.geometry.normal_offset(),
            bytemuck::cast_slice(&self.geometry.normal),
        );
    }

    /// The normal set currently active for rendering.
    pub fn active_normal_set(&self) -> NormalSet {
        self.geometry.active_normal_set()
    }

    /// Releases the GPU buffers owned by this mesh.
    ///
    /// No further method calls are valid afterward; calling any method on a
    /// deleted mesh, including `delete` itself, panics.
    pub fn delete(&mut self) {
        assert!(!self.released, "cone mesh deleted twice");

        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.released = true;
        log::debug!("released cone mesh buffers");
    }
}
