//! Flow control and application event loop.
//!
//! [`SceneContext`] holds everything the viewer mutates: the scene, the camera,
//! the viewport, the orbit controls and the light panel. [`FrameLoop`] advances
//! it one frame at a time against an injected [`Clock`], [`Renderer`] and
//! [`FrameScheduler`], so it can be driven by winit or by a test.
//!
//! # Lifecycle Flow
//!
//! Each frame:
//! 1. Read the elapsed time `t` from the clock
//! 2. Overwrite the rotation of the animated meshes from `t`
//! 3. Let the orbit controls apply their damped motion to the camera
//! 4. Render the scene
//! 5. Ask the scheduler for the next frame
//!
//! A failing render stops the loop: the error is returned and no further frame
//! is requested. [`run`] hosts the loop on a winit window.

use std::sync::Arc;

use anyhow::Context as _;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    camera::PerspectiveCamera,
    clock::{Clock, InstantClock},
    config::{AnimationConfig, ViewerConfig},
    context::Context,
    controls::OrbitControls,
    data_structures::{light::LightRig, scene_graph::Scene},
    panel::DebugPanel,
    render::{GpuRenderer, Renderer},
    resources::{SceneObjects, populate_scene},
    viewport::{self, Viewport},
};

/// The viewer's mutable state, shared by the resize handler, the input
/// handlers and the frame loop.
#[derive(Debug)]
pub struct SceneContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub viewport: Viewport,
    pub controls: OrbitControls,
    pub panel: DebugPanel,
    pub objects: SceneObjects,
    pub rig: LightRig,
    pub animation: AnimationConfig,
}

impl SceneContext {
    /// Builds the scene and light rig for a `width` x `height` logical viewport.
    pub fn new(config: &ViewerConfig, width: u32, height: u32, device_ratio: f64) -> Self {
        let mut scene = Scene::new();
        let objects = populate_scene(&mut scene);
        let rig = LightRig::install(&mut scene, &config.lights);
        let panel = DebugPanel::for_rig(&rig);

        let viewport = Viewport::new(width, height, device_ratio);
        let camera = PerspectiveCamera::from_config(&config.camera, viewport.aspect());
        let mut controls = OrbitControls::from_config(&config.controls, camera.target);
        controls.set_viewport_height(viewport::physical_length(viewport.height(), device_ratio));

        Self {
            scene,
            camera,
            viewport,
            controls,
            panel,
            objects,
            rig,
            animation: config.animation.clone(),
        }
    }

    /// Applies a resize to the viewport, the camera and the renderer.
    ///
    /// Returns `false` without touching anything if a dimension is zero.
    pub fn resize<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        width: u32,
        height: u32,
        device_ratio: f64,
    ) -> bool {
        if !self.viewport.resize(width, height, device_ratio) {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return false;
        }
        self.camera.aspect = self.viewport.aspect();
        self.camera.update_projection_matrix();
        self.controls
            .set_viewport_height(viewport::physical_length(height, device_ratio));
        renderer.set_size(
            self.viewport.width(),
            self.viewport.height(),
            self.viewport.pixel_ratio(),
        );
        log::debug!(
            "Resized to {}x{} at pixel ratio {}",
            width,
            height,
            self.viewport.pixel_ratio()
        );
        true
    }

    /// Sets the rotation of the animated meshes for elapsed time `t`.
    pub fn animate(&mut self, t: f32) {
        for id in self.objects.rotating() {
            if let Some(mesh) = self.scene.mesh_mut(id) {
                mesh.transform.rotation.y = self.animation.spin_y * t;
                mesh.transform.rotation.x = self.animation.spin_x * t;
            }
        }
    }

    /// Routes a window event to the panel, then to the orbit controls.
    /// Returns true if the panel changed.
    pub fn handle_window_events(&mut self, event: &WindowEvent) -> bool {
        if self.panel.handle_window_events(&mut self.scene, event) {
            return true;
        }
        self.controls.handle_window_events(event);
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// Requests that [`FrameLoop::frame`] is called again.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

impl FrameScheduler for Arc<Window> {
    fn request_frame(&mut self) {
        self.request_redraw();
    }
}

#[derive(Debug)]
pub struct FrameLoop<C: Clock = InstantClock> {
    clock: C,
    state: LoopState,
    frames: u64,
}

impl Default for FrameLoop<InstantClock> {
    fn default() -> Self {
        Self::new(InstantClock::new())
    }
}

impl<C: Clock> FrameLoop<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: LoopState::Idle,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of frames rendered successfully.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn frame<R, S>(
        &mut self,
        ctx: &mut SceneContext,
        renderer: &mut R,
        scheduler: &mut S,
    ) -> anyhow::Result<()>
    where
        R: Renderer + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        if self.state == LoopState::Idle {
            log::debug!("Render loop started");
            self.state = LoopState::Running;
        }

        let t = self.clock.elapsed_secs();
        ctx.animate(t);
        ctx.controls.update(&mut ctx.camera);
        renderer
            .render(&ctx.scene, &ctx.camera)
            .with_context(|| format!("Rendering frame {} failed", self.frames))?;
        self.frames += 1;

        scheduler.request_frame();
        Ok(())
    }
}

pub(crate) enum FlowEvent {
    /// GPU setup finished on wasm, where it cannot be blocked on.
    #[allow(dead_code)]
    Initialized(anyhow::Result<Context>),
}

pub(crate) struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent>,
    config: ViewerConfig,
    scene: SceneContext,
    frame_loop: FrameLoop,
    renderer: Option<GpuRenderer>,
    initializing: bool,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(event_loop: &EventLoop<FlowEvent>, config: ViewerConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime =
            tokio::runtime::Runtime::new().context("Unable to start the async runtime")?;
        let scene = SceneContext::new(
            &config,
            config.window.width,
            config.window.height,
            1.0,
        );
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            config,
            scene,
            frame_loop: FrameLoop::default(),
            renderer: None,
            initializing: false,
            error: None,
        })
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Arc<Window>> {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(self.title());

        #[cfg(not(target_arch = "wasm32"))]
        {
            window_attributes = window_attributes.with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        }

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            let canvas_id = &self.config.window.canvas_id;
            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(canvas_id))
                .with_context(|| format!("No element with id {:?} in the page", canvas_id))?
                .dyn_into::<web_sys::HtmlCanvasElement>()
                .map_err(|_| anyhow::anyhow!("Element {:?} is not a canvas", canvas_id))?;
            window_attributes = window_attributes.with_canvas(Some(canvas));
        }

        let window = event_loop
            .create_window(window_attributes)
            .context("Unable to create the window")?;
        Ok(Arc::new(window))
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = self.create_window(event_loop)?;
        let clear_colour = self.config.window.clear_colour;

        #[cfg(not(target_arch = "wasm32"))]
        {
            let ctx = self.async_runtime.block_on(Context::new(
                window,
                &self.scene.scene,
                &self.scene.camera,
                clear_colour,
            ))?;
            self.start(ctx);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let scene = self.scene.scene.clone();
            let camera = self.scene.camera.clone();
            let proxy = self.proxy.clone();
            self.initializing = true;
            wasm_bindgen_futures::spawn_local(async move {
                let ctx = Context::new(window, &scene, &camera, clear_colour).await;
                if proxy.send_event(FlowEvent::Initialized(ctx)).is_err() {
                    log::error!("Event loop closed before the GPU was ready");
                }
            });
        }

        Ok(())
    }

    /// Takes over a ready GPU context, sizes it and requests the first frame.
    fn start(&mut self, ctx: Context) {
        let window = ctx.window().clone();
        let mut renderer = GpuRenderer::new(ctx, &self.scene.scene);
        self.resize_to_window(&window, &mut renderer);
        window.request_redraw();
        self.renderer = Some(renderer);
        self.initializing = false;
        log::info!("Viewer ready");
    }

    fn resize_to_window(&mut self, window: &Window, renderer: &mut GpuRenderer) {
        let size = window.inner_size();
        let scale_factor = window.scale_factor();
        let (width, height) = viewport::logical_size(size.width, size.height, scale_factor);
        self.scene.resize(renderer, width, height, scale_factor);
    }

    fn title(&self) -> String {
        let summary = self.scene.panel.summary(&self.scene.scene);
        if summary.is_empty() {
            self.config.window.title.clone()
        } else {
            format!("{} | {}", self.config.window.title, summary)
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() || self.initializing {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            // This is the message from our wasm `spawn_local`
            FlowEvent::Initialized(Ok(ctx)) => self.start(ctx),
            FlowEvent::Initialized(Err(e)) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(mut renderer) = self.renderer.take() else {
            return;
        };
        let window = renderer.context().window().clone();

        if self.scene.handle_window_events(&event) {
            window.set_title(&self.title());
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.resize_to_window(&window, &mut renderer);
            }
            WindowEvent::RedrawRequested => {
                let mut scheduler = window.clone();
                if let Err(e) = self
                    .frame_loop
                    .frame(&mut self.scene, &mut renderer, &mut scheduler)
                {
                    self.fail(event_loop, e);
                }
            }
            _ => {}
        }

        self.renderer = Some(renderer);
    }
}

/// Opens the viewer window and runs until it is closed or a frame fails.
pub fn run(config: ViewerConfig) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Could not initialize logger: {}", e).into());
        }
    }

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event()
        .build()
        .context("Unable to create the event loop")?;

    let mut app = App::new(&event_loop, config)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
