//! WGPU-based rendering engine
//!
//! Two passes per frame: a depth-only pass from the spot light into the shadow
//! map, then the lit pass that draws triangle meshes with Phong shading and
//! line meshes (debug helpers) with the same shader.

use std::sync::Arc;

use crate::{
    error::EngineError,
    gfx::{
        geometry::Topology,
        resources::{
            global_bindings::{GlobalBindings, GlobalUBOContent},
            layouts::SceneLayouts,
            texture_resource::TextureResource,
        },
        scene::{object::DrawObject, Scene},
    },
    wgpu_utils::BindGroupBuilder,
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

const SHADOW_PIPELINE: &str = "Shadow";
const PHONG_PIPELINE: &str = "Phong";
const LINES_PIPELINE: &str = "Lines";

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

/// Maps a frame acquisition error to what the engine does about it
pub fn classify_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

/// Picks an sRGB format when the surface offers one so shading stays linear
pub fn choose_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
}

/// Records a new surface size in `config`
///
/// Returns false, leaving `config` untouched, for a zero dimension (minimized
/// window) or an unchanged size.
pub fn apply_resize(config: &mut wgpu::SurfaceConfiguration, width: u32, height: u32) -> bool {
    if width == 0 || height == 0 || (config.width, config.height) == (width, height) {
        return false;
    }
    config.width = width;
    config.height = height;
    true
}

/// Surface settings chosen at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            vsync: true,
        }
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::Fifo
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

struct ShadowTarget {
    map: TextureResource,
    bind_group: wgpu::BindGroup,
    size: u32,
}

impl ShadowTarget {
    fn new(device: &wgpu::Device, layouts: &SceneLayouts, size: u32) -> Self {
        let size = size.max(1);
        let map = TextureResource::create_shadow_map(device, size);
        let bind_group = BindGroupBuilder::new(&layouts.shadow)
            .texture(&map.view)
            .sampler(&map.sampler)
            .create(device, "Shadow Bind Group");
        Self {
            map,
            bind_group,
            size,
        }
    }
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pub pipeline_manager: PipelineManager,
    layouts: SceneLayouts,
    global_bindings: GlobalBindings,
    shadow: ShadowTarget,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// Requests an adapter compatible with the window surface, configures an
    /// sRGB swapchain and builds the shadow, Phong and line pipelines.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        settings: EngineSettings,
    ) -> Result<RenderEngine, EngineError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let info = adapter.get_info();
        log::info!(
            "Using adapter '{}' ({:?}, {:?})",
            info.name,
            info.backend,
            info.device_type
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Clock Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&surface_capabilities.formats)
            .ok_or(EngineError::NoSurfaceFormat)?;
        log::debug!("Surface format: {:?}", format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: settings.width.max(1),
            height: settings.height.max(1),
            present_mode: present_mode(settings.vsync),
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");
        let layouts = SceneLayouts::new(&device);
        let global_bindings = GlobalBindings::new(&device, &layouts.globals);
        let shadow = ShadowTarget::new(&device, &layouts, 512);

        let device: Arc<wgpu::Device> = device.into();
        let queue: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device.clone());

        pipeline_manager.load_shader("phong", include_str!("shaders/phong.wgsl"));
        pipeline_manager.load_shader("shadow", include_str!("shaders/shadow.wgsl"));

        let shadow_layouts = layouts.shadow_pass().into_iter().cloned().collect::<Vec<_>>();
        let main_layouts = layouts.main_pass().into_iter().cloned().collect::<Vec<_>>();

        // Cull nothing in the shadow pass so thin extrusions still occlude
        pipeline_manager.register_pipeline(
            SHADOW_PIPELINE,
            PipelineConfig::default()
                .with_label("Shadow")
                .with_shader("shadow")
                .with_vertex_only()
                .with_cull_mode(None)
                .with_depth(TextureResource::DEPTH_FORMAT)
                .with_depth_bias(2, 2.0)
                .with_bind_group_layouts(shadow_layouts),
        );

        pipeline_manager.register_pipeline(
            PHONG_PIPELINE,
            PipelineConfig::default()
                .with_label("Phong")
                .with_shader("phong")
                .with_color_target(format)
                .with_depth(TextureResource::DEPTH_FORMAT)
                .with_bind_group_layouts(main_layouts.clone()),
        );

        pipeline_manager.register_pipeline(
            LINES_PIPELINE,
            PipelineConfig::default()
                .with_label("Lines")
                .with_shader("phong")
                .with_topology(Topology::Lines)
                .with_color_target(format)
                .with_depth(TextureResource::DEPTH_FORMAT)
                .with_bind_group_layouts(main_layouts),
        );

        if let Err(errors) = pipeline_manager.create_all_pipelines() {
            for error in errors {
                log::error!("{}", error);
            }
        }

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            pipeline_manager,
            layouts,
            global_bindings,
            shadow,
        })
    }

    /// Syncs the scene to the GPU and draws one frame
    ///
    /// Transient surface errors skip the frame; only fatal ones are returned.
    pub fn render_frame(&mut self, scene: &mut Scene) -> Result<(), EngineError> {
        self.prepare(scene);

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(err) => {
                return match classify_surface_error(&err) {
                    SurfaceErrorAction::Reconfigured => {
                        log::warn!("Surface {:?}, reconfiguring", err);
                        self.surface.configure(&self.device, &self.config);
                        Ok(())
                    }
                    SurfaceErrorAction::SkipFrame => {
                        log::debug!("Skipping frame: {:?}", err);
                        Ok(())
                    }
                    SurfaceErrorAction::Fatal => Err(EngineError::Surface(err)),
                };
            }
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.encode_shadow_pass(&mut encoder, scene);
        self.encode_main_pass(&mut encoder, &surface_texture_view, scene);

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Uploads whatever changed since the last frame
    fn prepare(&mut self, scene: &mut Scene) {
        scene.update();
        scene.init_gpu_resources(&self.device, &self.queue, &self.layouts);
        scene.update_all_transforms(&self.queue);

        let spot = scene.shadow_spot_light();
        if let Some(spot) = spot {
            if spot.shadow.map_size != self.shadow.size {
                log::info!("Resizing shadow map to {}", spot.shadow.map_size);
                self.shadow = ShadowTarget::new(&self.device, &self.layouts, spot.shadow.map_size);
            }
        }

        let content = GlobalUBOContent::compose(
            &scene.camera_manager.camera.uniform,
            scene.ambient_light(),
            spot,
        );
        self.global_bindings.update(&self.queue, content);
    }

    fn encode_shadow_pass(&mut self, encoder: &mut wgpu::CommandEncoder, scene: &Scene) {
        let casts = scene.shadow_spot_light().is_some_and(|spot| spot.cast_shadow);
        let pipeline = self.pipeline_manager.get_pipeline(SHADOW_PIPELINE).cloned();

        // Always clear so a disabled caster doesn't leave stale shadows behind
        let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Depth Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.shadow.map.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        let (true, Some(pipeline)) = (casts, pipeline) else {
            return;
        };

        shadow_pass.set_pipeline(&pipeline);
        shadow_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

        for (_, object) in scene.objects() {
            if object.visible && object.cast_shadow && object.mesh.topology() == Topology::Triangles
            {
                shadow_pass.draw_object(object);
            }
        }
    }

    fn encode_main_pass(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        scene: &Scene,
    ) {
        let phong = self.pipeline_manager.get_pipeline(PHONG_PIPELINE).cloned();
        let lines = self.pipeline_manager.get_pipeline(LINES_PIPELINE).cloned();

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Main Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);
        render_pass.set_bind_group(3, &self.shadow.bind_group, &[]);

        for (topology, pipeline) in [(Topology::Triangles, phong), (Topology::Lines, lines)] {
            let Some(pipeline) = pipeline else {
                continue;
            };
            render_pass.set_pipeline(&pipeline);

            for (_, object) in scene.objects() {
                if !object.visible || object.mesh.topology() != topology {
                    continue;
                }

                let material = scene.get_material_for_object(object);
                match material.get_bind_group() {
                    Some(material_bind_group) => {
                        render_pass.set_bind_group(2, material_bind_group, &[]);
                        render_pass.draw_object(object);
                    }
                    None => log::trace!(
                        "Skipping '{}' - material '{}' has no GPU resources",
                        object.name,
                        material.name
                    ),
                }
            }
        }
    }

    /// Resizes the surface and recreates the depth buffer; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if !apply_resize(&mut self.config, width, height) {
            return;
        }

        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");

        log::debug!("Surface resized to {}x{}", width, height);
    }

    /// Current surface dimensions in pixels
    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Set VSync (vertical synchronization) state
    pub fn set_vsync(&mut self, enable: bool) {
        self.config.present_mode = present_mode(enable);
        self.surface.configure(&self.device, &self.config);
    }
}
