use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use super::lifecycle::{LoopAction, WindowLifecycle};
use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::render::RenderCtx;
use crate::time::FrameStats;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub position: LogicalPosition<f64>,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "arrayuniform".to_string(),
            position: LogicalPosition::new(100.0, 100.0),
            initial_size: LogicalSize::new(960.0, 540.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initialises the app and renders until the window closes.
    ///
    /// Any initialisation or frame error ends the loop and is returned.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        // Reject unsupported backends before the window or any GPU object exists.
        if let Some(backend) = gpu_init.requested_backend()? {
            log::info!("backend requested: {backend:?}");
        }

        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    lifecycle: WindowLifecycle,
    stats: FrameStats,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.entry = None;
        self.failure.get_or_insert(err);
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_position(self.config.position)
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            lifecycle: WindowLifecycle::new(),
            stats: FrameStats::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let app = &mut self.app;
        entry
            .with_gpu(|gpu| {
                let ctx = RenderCtx::new(
                    gpu.device(),
                    gpu.queue(),
                    gpu.backend(),
                    gpu.surface_format(),
                    gpu.depth_format(),
                );
                app.init(&ctx)
            })
            .context("application initialization failed")?;

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        Ok(())
    }

    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let (app, Some(entry)) = (&mut self.app, self.entry.as_mut()) else {
            return;
        };

        let result = entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
                frame_index: fields.stats.total_frames(),
            };
            let control = app.on_frame(&mut ctx)?;

            if let Some(report) = fields.stats.record() {
                log::debug!("{:.1} fps ({} frames)", report.fps, report.total_frames);
            }
            Ok::<_, anyhow::Error>(control)
        });

        match result {
            Ok(AppControl::Continue) => {}
            Ok(AppControl::Exit) => {
                self.entry = None;
                event_loop.exit();
            }
            Err(err) => self.fail(event_loop, err.context("frame failed")),
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.failure.is_some() {
            return;
        }

        if let Err(err) = self.create_window_entry(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_ref() else {
            event_loop.exit();
            return;
        };

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: one frame per pass through the event loop.
        if entry.with_lifecycle(|lc| lc.exists()) {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let action = entry.with_lifecycle_mut(|lc| lc.on_event(&event));
        if action == LoopAction::Ignore && !entry.with_lifecycle(|lc| lc.exists()) {
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.entry = None;
            event_loop.exit();
            return;
        }

        match action {
            LoopAction::Close => {
                log::info!("window closed");
                self.entry = None;
                event_loop.exit();
            }
            LoopAction::Resize(size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(size));
            }
            LoopAction::Rescale => {
                let size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(size));
            }
            LoopAction::Render => self.render_frame(event_loop),
            LoopAction::Ignore => {}
        }
    }
}
