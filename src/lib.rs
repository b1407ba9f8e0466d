pub mod cli;
pub mod components;
pub mod config;
pub mod systems;
pub mod world;

use anyhow::Context;
use components::{
    camera::CameraComponent, material::MaterialUniform, mesh::MeshComponent,
    render_pipelines::RenderPipelineComponent,
};
use config::ViewerConfig;
use systems::{
    camera::CameraSystem,
    geospatial::{coordinates::GeoCoordinate, MarkerPlacement},
    mesh::MeshSystem,
    pipelines::ShapeRenderPipelineSystem,
    scene::SceneSystem,
    window::WindowSystem,
};
use wgpu::Surface;
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use world::SceneWorld;

pub trait Uniform {
    // only allow (multiples of?) 16 bytes of buffer
    // data to be compliant with WebGL2.
    fn create_uniform_buffer<T: bytemuck::Pod>(device: &wgpu::Device, data: &T) -> wgpu::Buffer;

    fn create_uniform_bind_group(
        device: &wgpu::Device,
        buffer: &wgpu::Buffer,
        layout: &wgpu::BindGroupLayout,
    ) -> wgpu::BindGroup;
}

pub fn matrix4_to_array(mat: cgmath::Matrix4<f32>) -> [[f32; 4]; 4] {
    mat.into()
}

/// Builds the scene for an optional coordinate: the globe, plus the marker
/// and its heading disc when a coordinate is given.
pub fn build_scene(config: &ViewerConfig, coordinate: Option<GeoCoordinate>) -> SceneWorld {
    let placement = coordinate.map(MarkerPlacement::from_coordinate);
    let mut world = SceneWorld::new();
    SceneSystem::assemble(&mut world, config, placement.as_ref());
    world
}

struct State {
    // renderer
    size: winit::dpi::PhysicalSize<u32>,
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    // scene
    globe_radius: f32,
    render_pipeline: RenderPipelineComponent,
    meshes: Vec<MeshComponent>,
    camera_component: CameraComponent,
    cursor_position: PhysicalPosition<f64>,
}

impl State {
    async fn new(
        window: &Window,
        viewer_config: &ViewerConfig,
        scene: &mut SceneWorld,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();

        // Backends::all => Vulkan + Metal + DX12 + Browser WebGPU
        let instance = State::create_instance();

        // # Safety
        // The surface needs to live as long as the window that created it.
        // The window outlives State in `run`.
        let surface =
            unsafe { instance.create_surface(window) }.context("failed to create surface")?;
        let adapter = State::create_adapter(&instance, &surface).await?;
        let (device, queue) = State::create_device_and_queue(&adapter).await?;
        tracing::info!(adapter = ?adapter.get_info(), "using adapter");

        let surface_caps = surface.get_capabilities(&adapter);
        // The shader assumes an sRGB surface texture.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no supported formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let depth_view = ShapeRenderPipelineSystem::create_depth_view(&device, &config);

        let camera_component =
            CameraSystem::create_camera(&device, viewer_config, config.width, config.height);
        let object_bind_group_layout = MeshSystem::create_object_bind_group_layout(&device);
        let render_pipeline = ShapeRenderPipelineSystem::new(
            &device,
            &[
                &camera_component.camera_bind_group_layout,
                &object_bind_group_layout,
            ],
            config.format,
        );

        let light = viewer_config.light_direction;
        let meshes = scene
            .renderables()
            .into_iter()
            .map(|renderable| {
                tracing::debug!(role = ?renderable.role, shape = ?renderable.shape, "uploading mesh");
                MeshSystem::create_mesh(
                    &device,
                    &object_bind_group_layout,
                    &renderable.shape,
                    renderable.world_matrix,
                    MaterialUniform {
                        color: renderable.tint.0,
                        light: [light.x, light.y, light.z, viewer_config.ambient_intensity],
                    },
                )
            })
            .collect();

        Ok(Self {
            size,
            surface,
            device,
            queue,
            config,
            depth_view,
            globe_radius: viewer_config.globe_radius,
            render_pipeline,
            meshes,
            camera_component,
            cursor_position: PhysicalPosition::new(0.0, 0.0),
        })
    }

    pub fn create_instance() -> wgpu::Instance {
        wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            dx12_shader_compiler: Default::default(),
        })
    }

    pub async fn create_adapter(
        instance: &wgpu::Instance,
        surface: &Surface,
    ) -> anyhow::Result<wgpu::Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible graphics adapter found")
    }

    pub async fn create_device_and_queue(
        adapter: &wgpu::Adapter,
    ) -> anyhow::Result<(wgpu::Device, wgpu::Queue)> {
        adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    features: wgpu::Features::empty(),
                    // WebGL doesn't support all of wgpu's features
                    limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    label: None,
                },
                None, // Trace path
            )
            .await
            .context("failed to request a device")
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view =
                ShapeRenderPipelineSystem::create_depth_view(&self.device, &self.config);
            CameraSystem::resize(
                &self.queue,
                &mut self.camera_component,
                new_size.width,
                new_size.height,
            );
        }
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_position = *position;
                true
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => {
                WindowSystem::handle_left_click(
                    self.size.width as f32,
                    self.size.height as f32,
                    self.cursor_position.x as f32,
                    self.cursor_position.y as f32,
                    self.globe_radius,
                    &self.camera_component.camera,
                );
                true
            }
            _ => false,
        }
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(config::CLEAR_COLOR),
                    store: true,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: true,
                }),
                stencil_ops: None,
            }),
        });

        render_pass.set_pipeline(&self.render_pipeline.render_pipeline);
        render_pass.set_bind_group(0, &self.camera_component.camera_bind_group, &[]);

        for mesh in &self.meshes {
            render_pass.set_bind_group(1, &mesh.bind_group, &[]);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..mesh.num_indices, 0, 0..1);
        }

        drop(render_pass);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Initializes logging for the current target.
pub fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            console_error_panic_hook::set_once();
            tracing_wasm::set_as_global_default();
        } else {
            tracing_subscriber::fmt::init()
        }
    }
}

/// Opens the window and runs the render loop. Only returns on setup failure.
pub async fn run(
    viewer_config: ViewerConfig,
    coordinate: Option<GeoCoordinate>,
) -> anyhow::Result<()> {
    let mut scene = build_scene(&viewer_config, coordinate);

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(viewer_config.title.as_str())
        .with_inner_size(LogicalSize::new(viewer_config.width, viewer_config.height))
        .build(&event_loop)
        .context("failed to create window")?;

    #[cfg(target_arch = "wasm32")]
    {
        // Winit prevents sizing with CSS, so we have to
        // set the size manually when on web.
        use winit::dpi::PhysicalSize;
        window.set_inner_size(PhysicalSize::new(viewer_config.width, viewer_config.height));

        use winit::platform::web::WindowExtWebSys;
        web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| {
                let dst = doc.get_element_by_id("dutch3d")?;
                let canvas = web_sys::Element::from(window.canvas());
                dst.append_child(&canvas).ok()?;
                Some(())
            })
            .context("couldn't append canvas to the document")?;
    }

    let mut state = State::new(&window, &viewer_config, &mut scene).await?;

    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent {
            ref event,
            window_id,
        } if window_id == window.id() => {
            if !state.input(event) {
                match event {
                    WindowEvent::CloseRequested
                    | WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(VirtualKeyCode::Escape),
                                ..
                            },
                        ..
                    } => *control_flow = ControlFlow::Exit,
                    WindowEvent::Resized(physical_size) => {
                        state.resize(*physical_size);
                    }
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        // new_inner_size is &&mut so we have to dereference it twice
                        state.resize(**new_inner_size);
                    }
                    _ => {}
                }
            }
        }
        Event::RedrawRequested(window_id) if window_id == window.id() => {
            match state.render() {
                Ok(_) => {}
                // Reconfigure the surface if lost
                Err(wgpu::SurfaceError::Lost) => state.resize(state.size),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    tracing::error!("surface out of memory, exiting");
                    *control_flow = ControlFlow::Exit
                }
                // All other errors (Outdated, Timeout) should be resolved by the next frame
                Err(e) => tracing::warn!("{:?}", e),
            }
        }
        Event::MainEventsCleared => {
            window.request_redraw();
        }
        _ => {}
    });
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn start() {
    init_logging();
    if let Err(e) = run(ViewerConfig::default(), None).await {
        tracing::error!("{:#}", e);
    }
}
