//! Full-screen environment backdrop drawn before the model.

use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, ShaderError, BACKGROUND_SHADER};
use crate::renderer::pipeline_util;

/// Draws the environment map behind everything else.
pub struct BackgroundRenderer {
    pipeline: wgpu::RenderPipeline,
}

impl BackgroundRenderer {
    /// Build the background pipeline against the camera (group 0) and
    /// lighting (group 1) layouts.
    ///
    /// # Errors
    ///
    /// [`ShaderError`] if the background shader fails to compose.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, ShaderError> {
        let shader =
            composer.compose(&context.device, "Background Shader", BACKGROUND_SHADER)?;
        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Background Pipeline Layout"),
                bind_group_layouts: &[camera_layout, lighting_layout],
                push_constant_ranges: &[],
            },
        );
        let pipeline = context.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Background Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &pipeline_util::color_targets(context.format()),
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(pipeline_util::background_depth_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });
        Ok(Self { pipeline })
    }

    /// Record the full-screen triangle.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        camera: &wgpu::BindGroup,
        lighting: &wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera, &[]);
        render_pass.set_bind_group(1, lighting, &[]);
        render_pass.draw(0..3, 0..1);
    }
}
