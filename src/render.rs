//! WebGPU scene state: instanced billboard particles, wireframe shapes, and
//! the bloom post chain.

use crate::constants::*;
use crate::core::{self, geometry, ShapeKind, Simulation};
use glam::{Mat4, Vec3};
use web_sys as web;

mod helpers;
mod post;
mod targets;

use targets::{RenderTargets, HDR_FORMAT};

static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticleInstance {
    pos: [f32; 3],
    opacity: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneGlobals {
    view_proj: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
    misc: [f32; 4], // x: particle half-size, y: time
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ShapeUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4], // rgb + opacity
}

struct ShapeDraw {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    particle_pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    instances: Vec<ParticleInstance>,

    shape_pipeline: wgpu::RenderPipeline,
    shape_draws: Vec<ShapeDraw>,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: post::PostResources,
    bg_hdr: wgpu::BindGroup,
    bg_blur_h: wgpu::BindGroup,
    bg_blur_v: wgpu::BindGroup,
    bg_bloom_a_only: wgpu::BindGroup,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    time_accum: f32,
    torn_down: bool,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, sim: &Simulation) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits to stay compatible with older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::create(&device, width, height);

        // Scene pipelines
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let shape_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shape_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_globals"),
            size: std::mem::size_of::<SceneGlobals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let particle_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particle_pl"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });
        let particle_attrs = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32];
        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
            layout: Some(&particle_pl),
            vertex: wgpu::VertexState {
                module: &scene_shader,
                entry_point: Some("vs_particle"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &particle_attrs,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &scene_shader,
                entry_point: Some("fs_particle"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let shape_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shape_pl"),
            bind_group_layouts: &[&globals_bgl, &shape_bgl],
            push_constant_ranges: &[],
        });
        let shape_attrs = wgpu::vertex_attr_array![0 => Float32x3];
        let shape_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shape_pipeline"),
            layout: Some(&shape_pl),
            vertex: wgpu::VertexState {
                module: &scene_shader,
                entry_point: Some("vs_shape"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: (std::mem::size_of::<f32>() * 3) as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &shape_attrs,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &scene_shader,
                entry_point: Some("fs_shape"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        // One instance slot per particle, written every frame
        let instance_capacity = sim.field.len().max(1);
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_instances"),
            size: (instance_capacity * std::mem::size_of::<ParticleInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Static wireframe vertices plus a per-shape transform/color uniform
        let mut shape_draws = Vec::with_capacity(sim.shapes.len());
        for (i, shape) in sim.shapes.shapes().iter().enumerate() {
            let points = match shape.kind {
                ShapeKind::Torus => geometry::torus_wireframe(
                    core::TORUS_MAJOR_RADIUS,
                    core::TORUS_TUBE_RADIUS,
                    TORUS_MAJOR_SEGMENTS,
                    TORUS_TUBE_SEGMENTS,
                ),
                ShapeKind::Icosahedron => {
                    geometry::icosahedron_wireframe(core::ICOSAHEDRON_RADIUS)
                }
                ShapeKind::Octahedron => geometry::octahedron_wireframe(core::OCTAHEDRON_RADIUS),
                ShapeKind::Tetrahedron => {
                    geometry::tetrahedron_wireframe(core::TETRAHEDRON_RADIUS)
                }
            };
            let (vertex_buffer, vertex_count) =
                helpers::upload_line_vertices(&device, &format!("shape_{i}"), &points);
            let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("shape_uniforms"),
                size: std::mem::size_of::<ShapeUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("shape_bg"),
                layout: &shape_bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });
            shape_draws.push(ShapeDraw {
                vertex_buffer,
                vertex_count,
                uniform_buffer,
                bind_group,
            });
        }

        // Post shader + pipelines
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post = post::create_post_resources(&device, &post_shader, HDR_FORMAT, format);
        let (bg_hdr, bg_blur_h, bg_blur_v, bg_bloom_a_only) = post::build_bind_groups(
            &device,
            &post,
            &linear_sampler,
            &targets.hdr_view,
            &targets.bloom_a_view,
            &targets.bloom_b_view,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            globals_buffer,
            globals_bind_group,
            particle_pipeline,
            instance_buffer,
            instance_capacity,
            instances: Vec::with_capacity(instance_capacity),
            shape_pipeline,
            shape_draws,
            targets,
            linear_sampler,
            post,
            bg_hdr,
            bg_blur_h,
            bg_blur_v,
            bg_bloom_a_only,
            width,
            height,
            clear_color: wgpu::Color {
                r: 0.01,
                g: 0.01,
                b: 0.03,
                a: 1.0,
            },
            time_accum: 0.0,
            torn_down: false,
        })
    }

    /// Reconfigure the surface and rebuild the offscreen targets when the
    /// viewport changed. Zero sizes are ignored, so a resize that races
    /// initialization is absorbed.
    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if self.torn_down || width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            self.targets.recreate(&self.device, width, height);
            let (bg_hdr, bg_blur_h, bg_blur_v, bg_bloom_a_only) = post::build_bind_groups(
                &self.device,
                &self.post,
                &self.linear_sampler,
                &self.targets.hdr_view,
                &self.targets.bloom_a_view,
                &self.targets.bloom_b_view,
            );
            self.bg_hdr = bg_hdr;
            self.bg_blur_h = bg_blur_h;
            self.bg_blur_v = bg_blur_v;
            self.bg_bloom_a_only = bg_bloom_a_only;
        }
    }

    /// Submit one frame of the current simulation state.
    pub fn render(&mut self, dt_sec: f32, sim: &Simulation) -> Result<(), wgpu::SurfaceError> {
        if self.torn_down {
            return Ok(());
        }
        self.time_accum += dt_sec.max(0.0);

        // Instance data for the particle field
        self.instances.clear();
        self.instances
            .extend(sim.field.particles().iter().map(|p| ParticleInstance {
                pos: p.position.to_array(),
                opacity: p.opacity.clamp(0.0, 1.0),
            }));
        let instance_count = self.instances.len().min(self.instance_capacity);
        if instance_count > 0 {
            self.queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&self.instances[..instance_count]),
            );
        }

        // Camera basis for the billboards
        let eye = sim.camera.eye;
        let fwd = (Vec3::ZERO - eye).normalize_or_zero();
        let right = fwd.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(fwd);
        let globals = SceneGlobals {
            view_proj: sim.camera.view_proj().to_cols_array_2d(),
            cam_right: [right.x, right.y, right.z, 0.0],
            cam_up: [up.x, up.y, up.z, 0.0],
            misc: [core::PARTICLE_SIZE, self.time_accum, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        // Per-shape transforms, deterministic in (sim.time, index)
        for (i, (shape, draw)) in sim
            .shapes
            .shapes()
            .iter()
            .zip(&self.shape_draws)
            .enumerate()
        {
            let rot = core::rotation_at(sim.time, i);
            let pos = shape.base_position + core::float_offset_at(sim.time, i);
            let model = Mat4::from_translation(pos)
                * Mat4::from_euler(glam::EulerRot::XYZ, rot.x, rot.y, rot.z);
            let (rgb, a) = if shape.kind == ShapeKind::Torus {
                (TORUS_COLOR, TORUS_OPACITY)
            } else {
                (POLYHEDRON_COLOR, POLYHEDRON_OPACITY)
            };
            let u = ShapeUniforms {
                model: model.to_cols_array_2d(),
                color: [rgb[0], rgb[1], rgb[2], a],
            };
            self.queue
                .write_buffer(&draw.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }

        // Post uniforms, one buffer per pass so blur directions stay distinct
        let full_res = [self.width as f32, self.height as f32];
        let bloom_res = [
            (self.width.max(1) / 2).max(1) as f32,
            (self.height.max(1) / 2).max(1) as f32,
        ];
        post::write_uniforms(
            &self.queue,
            &self.post.base_uniforms,
            full_res,
            self.time_accum,
            [0.0, 0.0],
        );
        post::write_uniforms(
            &self.queue,
            &self.post.blur_h_uniforms,
            bloom_res,
            self.time_accum,
            [1.0, 0.0],
        );
        post::write_uniforms(
            &self.queue,
            &self.post.blur_v_uniforms,
            bloom_res,
            self.time_accum,
            [0.0, 1.0],
        );

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: scene into the HDR target
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if instance_count > 0 {
                rpass.set_pipeline(&self.particle_pipeline);
                rpass.set_bind_group(0, &self.globals_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
                rpass.draw(0..6, 0..instance_count as u32);
            }
            rpass.set_pipeline(&self.shape_pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            for draw in &self.shape_draws {
                rpass.set_bind_group(1, &draw.bind_group, &[]);
                rpass.set_vertex_buffer(0, draw.vertex_buffer.slice(..));
                rpass.draw(0..draw.vertex_count, 0..1);
            }
        }

        // Pass 2: bright pass -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.bg_hdr,
            None,
        );

        // Pass 3: blur horizontal, bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.bg_blur_h,
            None,
        );

        // Pass 4: blur vertical, bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.bg_blur_v,
            None,
        );

        // Pass 5: composite to the swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.bg_hdr,
            Some(&self.bg_bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Release every GPU resource this aggregate owns. Idempotent; the
    /// surface itself is released when the state is dropped.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.targets.destroy();
        self.instance_buffer.destroy();
        self.globals_buffer.destroy();
        for draw in &self.shape_draws {
            draw.vertex_buffer.destroy();
            draw.uniform_buffer.destroy();
        }
        self.post.base_uniforms.destroy();
        self.post.blur_h_uniforms.destroy();
        self.post.blur_v_uniforms.destroy();
    }
}
