//! GPU resources owned by the cube renderer.
//!
//! Built once, in dependency order, by [`CubeResources::build`]. Nothing here
//! is recreated after construction; the per-slot buffers are only written.

use wgpu::util::DeviceExt;

use crate::render::config::RendererConfig;
use crate::render::RenderError;

use super::animator::{CameraRecord, InstanceRecord};
use super::geometry::{MeshGeometry, Vertex};
use super::shader::ShaderProgram;
use super::texture::{checkerboard_rgba, CHECKER_FORMAT};
use super::CubeAssets;

/// Bind slot of the camera uniform inside group 0.
pub const CAMERA_BINDING: u32 = 2;

/// Immutable mesh buffers.
pub struct MeshBuffers {
    pub vertex: wgpu::Buffer,
    pub index: wgpu::Buffer,
    pub index_count: u32,
}

/// Mutable buffers for one ring slot.
pub struct FrameSlot {
    pub instances: wgpu::Buffer,
    pub camera: wgpu::Buffer,
    pub camera_bind_group: wgpu::BindGroup,
    /// Most recent submission that read this slot.
    pub submission: Option<wgpu::SubmissionIndex>,
}

/// Checkerboard texture plus the bind group the fragment stage samples.
pub struct CheckerTexture {
    pub bind_group: wgpu::BindGroup,
    pub sampler: wgpu::Sampler,
    pub view: wgpu::TextureView,
    pub texture: wgpu::Texture,
}

/// Everything the draw path binds.
///
/// Fields are declared in reverse creation order so they are released in
/// reverse order on drop.
pub struct CubeResources {
    pub texture: CheckerTexture,
    pub slots: Vec<FrameSlot>,
    pub mesh: MeshBuffers,
    pub pipeline: wgpu::RenderPipeline,
    pub queue: wgpu::Queue,
}

impl CubeResources {
    /// Builds all GPU resources.
    ///
    /// Any error is fatal for the renderer; no partially built state escapes.
    /// Validation and out-of-memory errors raised by wgpu while building are
    /// caught in error scopes and returned as [`RenderError::Device`].
    pub fn build(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        config: &RendererConfig,
        assets: &CubeAssets,
    ) -> Result<Self, RenderError> {
        config.validate()?;
        assets.geometry.validate()?;
        check_limits(device, config)?;

        // Scopes are popped in reverse push order.
        let oom_scope = device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let validation_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let built = Self::create(device, queue, config, assets);

        let validation = pollster::block_on(validation_scope.pop());
        let oom = pollster::block_on(oom_scope.pop());

        let resources = built?;
        if let Some(err) = validation.or(oom) {
            return Err(RenderError::Device(err.to_string()));
        }

        log::debug!(
            "cube resources: {} vertices, {} indices, {} slots x {} instances ({} bytes/slot), {}x{} texture",
            assets.geometry.vertices.len(),
            resources.mesh.index_count,
            resources.slots.len(),
            config.instance_count(),
            instance_buffer_size(config.instance_count()),
            config.texture_size,
            config.texture_size,
        );

        Ok(resources)
    }

    fn create(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        config: &RendererConfig,
        assets: &CubeAssets,
    ) -> Result<Self, RenderError> {
        // 1. Command queue.
        let queue = queue.clone();

        // 2. Shader program + pipeline, 3. depth state (baked into the pipeline).
        let camera_layout = create_camera_layout(device);
        let texture_layout = create_texture_layout(device);
        let pipeline = create_pipeline(device, config, &assets.shader, &camera_layout, &texture_layout)?;

        // 4. Mesh.
        let mesh = create_mesh(device, &assets.geometry);

        // 5. Ring slots.
        let slots = (0..config.frames_in_flight)
            .map(|i| create_slot(device, &camera_layout, config.instance_count(), i))
            .collect::<Vec<_>>();

        // 6. Texture.
        let texture = create_checker_texture(device, &queue, &texture_layout, config.texture_size);

        Ok(Self {
            texture,
            slots,
            mesh,
            pipeline,
            queue,
        })
    }

    pub fn frames_in_flight(&self) -> usize {
        self.slots.len()
    }
}

fn instance_buffer_size(instance_count: usize) -> u64 {
    (instance_count * std::mem::size_of::<InstanceRecord>()) as u64
}

fn camera_buffer_size() -> u64 {
    std::mem::size_of::<CameraRecord>() as u64
}

fn check_limits(device: &wgpu::Device, config: &RendererConfig) -> Result<(), RenderError> {
    let limits = device.limits();

    let size = instance_buffer_size(config.instance_count());
    if size > limits.max_buffer_size {
        return Err(RenderError::ResourceTooLarge {
            label: "instance buffer",
            size,
            limit: limits.max_buffer_size,
        });
    }

    let size = camera_buffer_size();
    if size > limits.max_uniform_buffer_binding_size as u64 {
        return Err(RenderError::ResourceTooLarge {
            label: "camera uniform",
            size,
            limit: limits.max_uniform_buffer_binding_size as u64,
        });
    }

    let texels = u64::from(config.texture_size);
    if texels > limits.max_texture_dimension_2d as u64 {
        return Err(RenderError::ResourceTooLarge {
            label: "checkerboard texture edge",
            size: texels,
            limit: limits.max_texture_dimension_2d as u64,
        });
    }

    Ok(())
}

fn create_camera_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("cube camera bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: CAMERA_BINDING,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(camera_buffer_size()),
            },
            count: None,
        }],
    })
}

fn create_texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("cube texture bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

fn create_pipeline(
    device: &wgpu::Device,
    config: &RendererConfig,
    program: &ShaderProgram,
    camera_layout: &wgpu::BindGroupLayout,
    texture_layout: &wgpu::BindGroupLayout,
) -> Result<wgpu::RenderPipeline, RenderError> {
    program.validate()?;

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&*program.label),
        source: wgpu::ShaderSource::Wgsl(program.source.clone()),
    });

    let info = pollster::block_on(shader.get_compilation_info());
    let errors: Vec<String> = info
        .messages
        .iter()
        .filter(|m| matches!(m.message_type, wgpu::CompilationMessageType::Error))
        .map(|m| m.message.clone())
        .collect();
    if !errors.is_empty() {
        return Err(RenderError::ShaderCompilation {
            program: program.label.to_string(),
            message: errors.join("\n"),
        });
    }

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("cube pipeline layout"),
        bind_group_layouts: &[camera_layout, texture_layout],
        immediate_size: 0,
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("cube pipeline"),
        layout: Some(&pipeline_layout),

        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some(&*program.vertex_entry),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout(), InstanceRecord::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(&*program.fragment_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: config.color_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        // Back faces culled, counter-clockwise front faces.
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: Some(wgpu::DepthStencilState {
            format: config.depth_format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),

        multiview_mask: None,
        cache: None,
    });

    Ok(pipeline)
}

fn create_mesh(device: &wgpu::Device, geometry: &MeshGeometry) -> MeshBuffers {
    let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("cube vertex buffer"),
        contents: geometry.vertex_bytes(),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_SRC,
    });

    let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("cube index buffer"),
        contents: geometry.index_bytes(),
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_SRC,
    });

    MeshBuffers {
        vertex,
        index,
        index_count: geometry.index_count(),
    }
}

fn create_slot(
    device: &wgpu::Device,
    camera_layout: &wgpu::BindGroupLayout,
    instance_count: usize,
    slot: usize,
) -> FrameSlot {
    let instances = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("cube instance buffer #{slot}")),
        size: instance_buffer_size(instance_count),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::COPY_SRC,
        mapped_at_creation: false,
    });

    let camera = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("cube camera buffer #{slot}")),
        size: camera_buffer_size(),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::COPY_SRC,
        mapped_at_creation: false,
    });

    let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("cube camera bind group #{slot}")),
        layout: camera_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: CAMERA_BINDING,
            resource: camera.as_entire_binding(),
        }],
    });

    FrameSlot {
        instances,
        camera,
        camera_bind_group,
        submission: None,
    }
}

fn create_checker_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    size: u32,
) -> CheckerTexture {
    let extent = wgpu::Extent3d {
        width: size,
        height: size,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("cube checkerboard"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: CHECKER_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &checkerboard_rgba(size),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(size * 4),
            rows_per_image: Some(size),
        },
        extent,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("cube checkerboard sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("cube texture bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    });

    CheckerTexture {
        bind_group,
        sampler,
        view,
        texture,
    }
}
