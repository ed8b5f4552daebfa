//! Indexed-mesh renderer for the loaded model.
//!
//! Each model mesh gets its own vertex/index buffer pair and a small
//! material uniform holding its base colour. Meshes whose bounds fall
//! outside the view frustum are skipped.

use wgpu::util::DeviceExt;

use crate::camera::frustum::Frustum;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, ShaderError, MESH_SHADER};
use crate::renderer::pipeline_util;
use crate::scene::bounds::{Bounded, BoundingBox};
use crate::scene::model::{Model, Vertex};

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialUniform {
    base_color: [f32; 4],
}

/// GPU copy of one [`Mesh`](crate::scene::model::Mesh).
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    material: wgpu::BindGroup,
    bounds: Option<BoundingBox>,
}

/// Draws the model's meshes with the lit, tone-mapped mesh shader.
pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    material_layout: wgpu::BindGroupLayout,
    meshes: Vec<GpuMesh>,
}

impl MeshRenderer {
    /// Build the mesh pipeline. `camera_layout` and `lighting_layout` are
    /// bound at groups 0 and 1.
    ///
    /// # Errors
    ///
    /// [`ShaderError`] if the mesh shader fails to compose.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, ShaderError> {
        let material_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Material Bind Group Layout"),
                entries: &[pipeline_util::uniform_entry(0)],
            },
        );

        let shader = composer.compose(&context.device, "Mesh Shader", MESH_SHADER)?;
        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Mesh Pipeline Layout"),
                bind_group_layouts: &[camera_layout, lighting_layout, &material_layout],
                push_constant_ranges: &[],
            },
        );

        let pipeline = context.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &pipeline_util::color_targets(context.format()),
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Models are often not consistently wound.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(pipeline_util::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            pipeline,
            material_layout,
            meshes: Vec::new(),
        })
    }

    /// Replace the uploaded geometry with `model`'s meshes.
    pub fn set_model(&mut self, context: &RenderContext, model: &Model) {
        self.meshes = model
            .meshes
            .iter()
            .map(|mesh| {
                let label = if mesh.name.is_empty() { "Mesh" } else { mesh.name.as_str() };
                let vertex_buffer =
                    context
                        .device
                        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some(label),
                            contents: bytemuck::cast_slice(&mesh.vertices),
                            usage: wgpu::BufferUsages::VERTEX,
                        });
                let index_buffer =
                    context
                        .device
                        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some(label),
                            contents: bytemuck::cast_slice(&mesh.indices),
                            usage: wgpu::BufferUsages::INDEX,
                        });
                let uniform = MaterialUniform {
                    base_color: mesh.base_color,
                };
                let material_buffer =
                    context
                        .device
                        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some("Material Buffer"),
                            contents: bytemuck::cast_slice(&[uniform]),
                            usage: wgpu::BufferUsages::UNIFORM,
                        });
                let material = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &self.material_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: material_buffer.as_entire_binding(),
                    }],
                    label: Some("Material Bind Group"),
                });
                GpuMesh {
                    vertex_buffer,
                    index_buffer,
                    index_count: mesh.indices.len() as u32,
                    material,
                    bounds: mesh.bounding_box(),
                }
            })
            .collect();
        log::debug!("uploaded {} meshes", self.meshes.len());
    }

    /// Number of uploaded meshes.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Draw every mesh that intersects `frustum`. Returns how many were
    /// drawn.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        camera: &wgpu::BindGroup,
        lighting: &wgpu::BindGroup,
        frustum: &Frustum,
    ) -> usize {
        if self.meshes.is_empty() {
            return 0;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera, &[]);
        render_pass.set_bind_group(1, lighting, &[]);

        let mut drawn = 0;
        for mesh in &self.meshes {
            if mesh.bounds.is_some_and(|b| !frustum.intersects_box(&b)) {
                continue;
            }
            render_pass.set_bind_group(2, &mesh.material, &[]);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            drawn += 1;
        }
        drawn
    }
}
