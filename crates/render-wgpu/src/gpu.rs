use crate::lights::FrameUniforms;
use crate::mesh::{self, LineVertex, Vertex};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use scenekit_scene::{Geometry, NodeKind, PerspectiveCamera, Scene, Side};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
    /// x metalness, y roughness, z flat shading.
    material: [f32; 4],
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct Draw {
    mesh: usize,
    side: Side,
}

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const INITIAL_INSTANCES: u64 = 64;
const INITIAL_LINE_VERTICES: u64 = 256;

/// wgpu scene graph renderer.
///
/// Draws every visible mesh with its material's face culling, then helper
/// lines on top of the same depth buffer. Geometry is tessellated once per
/// distinct descriptor and cached.
pub struct WgpuRenderer {
    front_pipeline: wgpu::RenderPipeline,
    back_pipeline: wgpu::RenderPipeline,
    double_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    meshes: Vec<(Geometry, GpuMesh)>,
    instance_buffer: wgpu::Buffer,
    instance_capacity: u64,
    line_buffer: wgpu::Buffer,
    line_capacity: u64,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame_uniforms"),
            contents: bytemuck::bytes_of(&FrameUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bind_group_layout"),
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
            label: Some("frame_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::MESH_SHADER.into()),
        });
        let mesh_pipeline = |label: &str, cull_mode: Option<wgpu::Face>| {
            create_mesh_pipeline(device, &pipeline_layout, &mesh_shader, surface_format, label, cull_mode)
        };
        let front_pipeline = mesh_pipeline("mesh_front_pipeline", Some(wgpu::Face::Back));
        let back_pipeline = mesh_pipeline("mesh_back_pipeline", Some(wgpu::Face::Front));
        let double_pipeline = mesh_pipeline("mesh_double_pipeline", None);

        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LINE_SHADER.into()),
        });

        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &line_shader,
                entry_point: Some("vs_line"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &line_shader,
                entry_point: Some("fs_line"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(depth_state()),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let instance_buffer = create_instance_buffer(device, INITIAL_INSTANCES);
        let line_buffer = create_line_buffer(device, INITIAL_LINE_VERTICES);
        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            front_pipeline,
            back_pipeline,
            double_pipeline,
            line_pipeline,
            uniform_buffer,
            uniform_bind_group,
            meshes: Vec::new(),
            instance_buffer,
            instance_capacity: INITIAL_INSTANCES,
            line_buffer,
            line_capacity: INITIAL_LINE_VERTICES,
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Number of distinct geometries tessellated so far.
    pub fn cached_meshes(&self) -> usize {
        self.meshes.len()
    }

    fn mesh_index(&mut self, device: &wgpu::Device, geometry: &Geometry) -> usize {
        if let Some(i) = self.meshes.iter().position(|(g, _)| g == geometry) {
            return i;
        }
        let data = mesh::tessellate(geometry);
        tracing::debug!(
            "tessellated {:?}: {} triangles",
            geometry,
            data.triangle_count()
        );
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertex_buffer"),
            contents: bytemuck::cast_slice::<Vertex, u8>(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_index_buffer"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        self.meshes.push((
            *geometry,
            GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: data.indices.len() as u32,
            },
        ));
        self.meshes.len() - 1
    }

    fn pipeline(&self, side: Side) -> &wgpu::RenderPipeline {
        match side {
            Side::Front => &self.front_pipeline,
            Side::Back => &self.back_pipeline,
            Side::Double => &self.double_pipeline,
        }
    }

    /// Render one frame of `scene` as seen from `camera` into `view`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) {
        let uniforms = FrameUniforms::collect(scene, camera);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut draws = Vec::new();
        let mut instances: Vec<InstanceData> = Vec::new();
        let mut lines: Vec<LineVertex> = Vec::new();

        for entry in scene.walk() {
            match &entry.node.kind {
                NodeKind::Mesh(m) => {
                    let cols = entry.world.to_cols_array_2d();
                    let material = &m.material;
                    instances.push(InstanceData {
                        model_0: cols[0],
                        model_1: cols[1],
                        model_2: cols[2],
                        model_3: cols[3],
                        color: material.color.scaled(1.0, 1.0),
                        material: [
                            material.metalness,
                            material.roughness,
                            if material.flat_shading { 1.0 } else { 0.0 },
                            0.0,
                        ],
                    });
                    draws.push(Draw {
                        mesh: self.mesh_index(device, &m.geometry),
                        side: material.side,
                    });
                }
                NodeKind::AxesHelper { size } => {
                    lines.extend(mesh::axes_lines(*size, entry.world));
                }
                NodeKind::HemisphereLightHelper { light, size } => {
                    if let Some(NodeKind::Light(scenekit_scene::Light::Hemisphere {
                        sky_color,
                        ground_color,
                        ..
                    })) = scene.get(*light).map(|n| &n.kind)
                    {
                        lines.extend(mesh::hemisphere_helper_lines(
                            *size,
                            *sky_color,
                            *ground_color,
                            entry.world,
                        ));
                    }
                }
                NodeKind::Group | NodeKind::Light(_) => {}
            }
        }

        if instances.len() as u64 > self.instance_capacity {
            self.instance_capacity = (instances.len() as u64).next_power_of_two();
            self.instance_buffer = create_instance_buffer(device, self.instance_capacity);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        if lines.len() as u64 > self.line_capacity {
            self.line_capacity = (lines.len() as u64).next_power_of_two();
            self.line_buffer = create_line_buffer(device, self.line_capacity);
        }
        if !lines.is_empty() {
            queue.write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(&lines));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for (i, draw) in draws.iter().enumerate() {
                let gpu_mesh = &self.meshes[draw.mesh].1;
                let instance = i as u32;
                pass.set_pipeline(self.pipeline(draw.side));
                pass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(gpu_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..gpu_mesh.index_count, 0, instance..instance + 1);
            }

            if !lines.is_empty() {
                pass.set_pipeline(&self.line_pipeline);
                pass.set_vertex_buffer(0, self.line_buffer.slice(..));
                pass.draw(0..lines.len() as u32, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

fn depth_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: Default::default(),
        bias: Default::default(),
    }
}

fn create_mesh_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
    label: &str,
    cull_mode: Option<wgpu::Face>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                    ],
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<InstanceData>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![
                        2 => Float32x4,
                        3 => Float32x4,
                        4 => Float32x4,
                        5 => Float32x4,
                        6 => Float32x4,
                        7 => Float32x4,
                    ],
                },
            ],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(depth_state()),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

fn create_instance_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instance_buffer"),
        size: capacity * std::mem::size_of::<InstanceData>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_line_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("line_buffer"),
        size: capacity * std::mem::size_of::<LineVertex>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
