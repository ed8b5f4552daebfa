//! The viewer engine: GPU context, scene, camera and render passes tied
//! together behind one explicit application context.

pub mod command;
mod input;
mod loading;
mod options;

pub use command::ViewerCommand;
pub use input::FramingChoice;

use crate::camera::controller::OrbitController;
use crate::camera::frustum::Frustum;
use crate::error::ViewerError;
use crate::gpu::lighting::{Lighting, LightingUniform};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::DepthTexture;
use crate::input::InputProcessor;
use crate::options::Options;
use crate::renderer::{BackgroundRenderer, MeshRenderer};
use crate::scene::loader::AssetLoader;
use crate::scene::Scene;
use crate::util::render_loop::RenderLoop;

/// The viewer's application context: owns the GPU, the scene, the camera
/// and every render pass.
///
/// # Construction
///
/// [`ViewerEngine::new`] sets up the surface and pipelines with an empty
/// scene. Request assets with [`load_model`](Self::load_model) and
/// [`load_environment`](Self::load_environment); they load on background
/// threads and are applied by [`poll_loads`](Self::poll_loads), which
/// frames the camera on every newly loaded model.
///
/// # Frame loop
///
/// Each frame, call [`render`](Self::render) to draw and present. Call
/// [`resize`](Self::resize) when the window size changes. Input is
/// forwarded via [`handle_input`](Self::handle_input) and
/// [`handle_key`](Self::handle_key). The loop is over once
/// [`quit_requested`](Self::quit_requested) returns `true`.
pub struct ViewerEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    /// Orbit camera and its GPU uniform.
    pub camera: OrbitController,
    /// Lighting uniform and environment textures.
    pub lighting: Lighting,
    depth: DepthTexture,
    meshes: MeshRenderer,
    background: BackgroundRenderer,
    /// The model, light and environment being viewed.
    pub scene: Scene,
    loader: AssetLoader,
    input: InputProcessor,
    options: Options,
    framing: FramingChoice,
    /// Frame scheduler and stop state.
    pub render_loop: RenderLoop,
}

impl ViewerEngine {
    /// Create the engine for a window surface of `size` physical pixels.
    ///
    /// # Errors
    ///
    /// [`ViewerError::Gpu`] if the device or surface cannot be set up,
    /// [`ViewerError::Shader`] if a pipeline shader fails to compose.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, ViewerError> {
        let context = RenderContext::new(window, size).await?;
        let mut composer = ShaderComposer::new()?;

        let scene = Scene::from_options(&options);
        let camera = OrbitController::new(&context, &options.camera);
        let lighting = Lighting::new(
            &context,
            LightingUniform::new(&scene.light, &options.lighting),
        );
        let (width, height) = context.size();
        let depth = DepthTexture::new(&context.device, width, height);
        let meshes = MeshRenderer::new(
            &context,
            &mut composer,
            &camera.layout,
            &lighting.layout,
        )?;
        let background = BackgroundRenderer::new(
            &context,
            &mut composer,
            &camera.layout,
            &lighting.layout,
        )?;

        Ok(Self {
            context,
            camera,
            lighting,
            depth,
            meshes,
            background,
            scene,
            loader: AssetLoader::new(),
            input: InputProcessor::with_key_bindings(options.keybindings.clone()),
            framing: FramingChoice::from(&options.camera),
            render_loop: RenderLoop::new(options.display.target_fps, None),
            options,
        })
    }

    /// Stop after `frames` presented frames.
    pub fn set_frame_limit(&mut self, frames: Option<u64>) {
        self.render_loop = RenderLoop::new(self.options.display.target_fps, frames);
    }

    /// `true` once a stop condition fired (window close, frame limit,
    /// `Quit`, surface loss).
    #[must_use]
    pub fn quit_requested(&self) -> bool {
        !self.render_loop.is_running()
    }

    /// Reconfigure the surface and depth buffer for a new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth.resize(&self.context.device, width, height);
        self.camera.state.resize(width, height);
    }

    /// Apply finished loads, then draw and present one frame if the
    /// scheduler says one is due.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.poll_loads();
        if !self.render_loop.begin_frame() {
            return Ok(());
        }

        self.camera
            .update_gpu(&self.context.queue, self.options.display.exposure);
        self.lighting.update_gpu(&self.context.queue);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();

        let frustum = Frustum::from_view_projection(self.camera.camera().build_matrix());
        let [r, g, b] = self.scene.background;
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(r),
                            g: f64::from(g),
                            b: f64::from(b),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if self.options.display.environment_as_background {
                self.background
                    .draw(&mut rp, &self.camera.bind_group, &self.lighting.bind_group);
            }
            let drawn = self.meshes.draw(
                &mut rp,
                &self.camera.bind_group,
                &self.lighting.bind_group,
                &frustum,
            );
            log::trace!("drew {drawn}/{} meshes", self.meshes.mesh_count());
        }

        self.context.submit(encoder);
        frame.present();
        self.render_loop.end_frame();
        Ok(())
    }
}
