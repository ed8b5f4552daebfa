use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::options::LightingOptions;
use crate::scene::environment::EnvironmentMap;
use crate::scene::DirectionalLight;

/// Width of the diffuse irradiance map generated from each environment.
const IRRADIANCE_SIZE: u32 = 64;

/// Lighting parameters shared by the mesh and background shaders.
/// NOTE: Must match WGSL struct layout exactly (48 bytes)
///
/// WGSL layout:
///   light_dir: vec3<f32>          (offset 0,  align 16)
///   light_intensity: f32          (offset 12)
///   light_color: vec3<f32>        (offset 16, align 16)
///   environment_strength: f32     (offset 28)
///   roughness: f32                (offset 32)
///   metalness: f32                (offset 36)
///   _pad: vec2<f32>               (offset 40)
///   Total: 48 bytes
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Unit vector toward the light.
    pub light_dir: [f32; 3],
    /// Directional light intensity.
    pub light_intensity: f32,
    /// Linear RGB light colour.
    pub light_color: [f32; 3],
    /// Scale of environment diffuse and reflection.
    pub environment_strength: f32,
    /// Surface roughness (0.05 = glossy, 1.0 = matte).
    pub roughness: f32,
    /// Surface metalness (0.0 = dielectric, 1.0 = metal).
    pub metalness: f32,
    _pad: [f32; 2],
}

impl LightingUniform {
    /// Build from the scene light and lighting options.
    #[must_use]
    pub fn new(light: &DirectionalLight, options: &LightingOptions) -> Self {
        Self {
            light_dir: light.direction.normalize_or(Vec3::Y).to_array(),
            light_intensity: light.intensity,
            light_color: light.color.to_array(),
            environment_strength: options.environment_strength,
            roughness: options.roughness.clamp(0.05, 1.0),
            metalness: options.metalness.clamp(0.0, 1.0),
            _pad: [0.0; 2],
        }
    }
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self::new(&DirectionalLight::default(), &LightingOptions::default())
    }
}

/// Lighting uniform plus the environment and irradiance textures bound at
/// group 1.
pub struct Lighting {
    /// CPU copy of the uniform.
    pub uniform: LightingUniform,
    /// Uniform buffer (binding 0).
    pub buffer: wgpu::Buffer,
    /// Layout of the lighting bind group.
    pub layout: wgpu::BindGroupLayout,
    /// Current lighting bind group.
    pub bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    environment: wgpu::TextureView,
    irradiance: wgpu::TextureView,
}

impl Lighting {
    /// Create the lighting resources with the procedural studio environment.
    pub fn new(context: &RenderContext, uniform: LightingUniform) -> Self {
        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        // Repeat horizontally so the equirect seam wraps.
        let sampler = context.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Environment Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
                entries: &[
                    // Binding 0: Lighting uniform buffer
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    // Binding 1: Equirectangular environment (reflections, background)
                    texture_entry(1),
                    // Binding 2: Diffuse irradiance
                    texture_entry(2),
                    // Binding 3: Shared sampler
                    wgpu::BindGroupLayoutEntry {
                        binding: 3,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let studio = EnvironmentMap::studio(64, 32);
        let environment = upload_equirect(context, "Studio Environment", &studio);
        let irradiance =
            upload_equirect(context, "Studio Irradiance", &studio.irradiance(IRRADIANCE_SIZE));
        let bind_group = create_bind_group(
            &context.device,
            &layout,
            &buffer,
            &environment,
            &irradiance,
            &sampler,
        );

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
            sampler,
            environment,
            irradiance,
        }
    }

    /// Upload a new environment map and its irradiance, then rebuild the
    /// bind group.
    pub fn set_environment(&mut self, context: &RenderContext, map: &EnvironmentMap) {
        let max = context.device.limits().max_texture_dimension_2d;
        let map = map.downsampled(max);
        self.environment = upload_equirect(context, "Environment Map", &map);
        self.irradiance = upload_equirect(
            context,
            "Environment Irradiance",
            &map.irradiance(IRRADIANCE_SIZE),
        );
        self.bind_group = create_bind_group(
            &context.device,
            &self.layout,
            &self.buffer,
            &self.environment,
            &self.irradiance,
            &self.sampler,
        );
        log::debug!("environment uploaded ({}x{})", map.width, map.height);
    }

    /// Upload the CPU uniform.
    pub fn update_gpu(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    environment: &wgpu::TextureView,
    irradiance: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(environment),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(irradiance),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
        label: Some("Lighting Bind Group"),
    })
}

/// Upload an equirectangular map as `Rgba16Float`.
fn upload_equirect(
    context: &RenderContext,
    label: &str,
    map: &EnvironmentMap,
) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width: map.width,
        height: map.height,
        depth_or_array_layers: 1,
    };
    let texture = context.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba16Float,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    context.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &map.to_rgba16f(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(map.width * 8),
            rows_per_image: Some(map.height),
        },
        size,
    );

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
