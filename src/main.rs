use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use hoverstage::scene::{Scene, demo_slots};
use hoverstage::{AnimationLoop, Camera, PointerState, RenderSurface, StageConfig, StageError};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RON file overriding the default stage configuration
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Presents each frame as a line in the window title.
struct TitleSurface {
    window: Arc<Window>,
    opacity: f32,
    title: String,
}

impl TitleSurface {
    fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            opacity: 1.0,
            title: String::new(),
        }
    }
}

impl RenderSurface for TitleSurface {
    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    fn present(&mut self, scene: &Scene, _camera: &Camera) {
        let scale = scene.tracked_pose().map_or(0.0, |pose| pose.scale.x);
        let title = format!(
            "hoverstage - {} | scale {:.2} | opacity {:.2}",
            scene.id, scale, self.opacity
        );
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
    }
}

enum DemoApp {
    Pending {
        config: StageConfig,
    },
    Running {
        window: Arc<Window>,
        stage: AnimationLoop<TitleSurface>,
        pointer: PointerState,
        last_frame: Instant,
    },
    Failed,
}

impl DemoApp {
    fn start(
        event_loop: &ActiveEventLoop,
        config: &StageConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let attrs = WindowAttributes::default()
            .with_title("hoverstage")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let mut stage = AnimationLoop::new(
            demo_slots(config)?,
            config,
            TitleSurface::new(window.clone()),
        )?;
        stage.resize(size.width, size.height);
        window.request_redraw();

        Ok(DemoApp::Running {
            window,
            stage,
            pointer: PointerState::new(size.width, size.height),
            last_frame: Instant::now(),
        })
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let DemoApp::Pending { config } = self {
            let config = config.clone();
            *self = match DemoApp::start(event_loop, &config) {
                Ok(running) => running,
                Err(e) => {
                    log::error!("failed to start: {e}");
                    event_loop.exit();
                    DemoApp::Failed
                }
            };
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let DemoApp::Running {
            window,
            stage,
            pointer,
            last_frame,
        } = self
        else {
            return;
        };

        pointer.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                stage.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(*last_frame).as_secs_f32();
                *last_frame = now;

                if let Err(e) = stage.tick(pointer, dt) {
                    log::error!("stage stopped: {e}");
                    event_loop.exit();
                    return;
                }
                pointer.begin_frame();
                window.request_redraw();
            }
            _ => (),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<StageConfig, StageError> {
    match path {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            StageConfig::from_file(path)
        }
        None => Ok(StageConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    config.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    log::info!("Starting hoverstage");
    let mut app = DemoApp::Pending { config };
    event_loop.run_app(&mut app)?;
    Ok(())
}
