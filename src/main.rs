use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use card_scenes::cards::{CardScenes, Orchestrator, TickReport};
use card_scenes::cli::Cli;
use card_scenes::config::SceneConfig;
use card_scenes::core::{Canvas, SurfacePresenter};
use card_scenes::engine::SoftwareContext;
use card_scenes::host::{compose, CardPage, PageEvent, PageLayout};
use card_scenes::window::{route_input, Window};
use clap::Parser;
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window as WinitWindow, WindowId},
};

// === Constants ===

const STATS_INTERVAL: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 1100;
const INITIAL_WINDOW_HEIGHT: u32 = 720;

/// Everything that exists once the window is up
struct Running {
    window: Window,
    presenter: SurfacePresenter,
    page: CardPage,
    scenes: CardScenes,
    frame: Canvas,
}

impl Running {
    fn dispatch(&mut self, events: Vec<PageEvent>) {
        for event in &events {
            self.scenes.handle_event(&self.page, event);
        }
    }

    /// Deliver pending observer callbacks, as the browser does before a frame
    fn flush_observers(&mut self) {
        let resized = self.page.resize_entries();
        if !resized.is_empty() {
            self.scenes.handle_event(&self.page, &PageEvent::Resize(resized));
        }
        let intersections = self.page.intersection_entries();
        if !intersections.is_empty() {
            self.scenes.handle_event(&self.page, &PageEvent::Intersection(intersections));
        }
    }

    fn redraw(&mut self) -> TickReport {
        self.flush_observers();
        let report = self.scenes.on_frame(&self.window);

        let (width, height) = self.presenter.dimensions();
        self.frame.resize(width, height);
        compose(&self.page, self.scenes.registry(), &mut self.frame);
        if let Err(e) = self.presenter.present(&self.frame) {
            warn!("present failed: {e}");
        }
        report
    }
}

/// Rolling frame statistics
struct FrameStats {
    last_report: Instant,
    frames: u32,
    rendered: usize,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            last_report: Instant::now(),
            frames: 0,
            rendered: 0,
        }
    }

    fn record(&mut self, report: &TickReport) {
        self.frames += 1;
        self.rendered += report.rendered;

        let elapsed = self.last_report.elapsed().as_secs_f32();
        if elapsed >= STATS_INTERVAL {
            info!(
                "FPS: {:.1}, scenes rendered/frame: {:.1}",
                self.frames as f32 / elapsed,
                self.rendered as f32 / self.frames.max(1) as f32
            );
            self.last_report = Instant::now();
            self.frames = 0;
            self.rendered = 0;
        }
    }
}

struct App {
    cli: Cli,
    config: SceneConfig,
    running: Option<Running>,
    stats: FrameStats,
}

impl App {
    fn new(cli: Cli, config: SceneConfig) -> Self {
        Self {
            cli,
            config,
            running: None,
            stats: FrameStats::new(),
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running> {
        let window = event_loop
            .create_window(
                WinitWindow::default_attributes()
                    .with_title("Card Scenes")
                    .with_inner_size(winit::dpi::LogicalSize::new(INITIAL_WINDOW_WIDTH, INITIAL_WINDOW_HEIGHT)),
            )
            .context("failed to create window")?;
        let window = Window::new(Arc::new(window));

        let presenter = SurfacePresenter::new(window.inner().clone()).context("failed to initialize presenter")?;

        let layout = PageLayout {
            columns: self.cli.columns,
            ..Default::default()
        };
        let mut page = CardPage::new(self.cli.cards, self.cli.bare, layout, window.logical_size(), &self.config);
        page.set_device_pixel_ratio(window.scale_factor());

        let mut rng = match self.cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut context = SoftwareContext::new();
        let scenes = Orchestrator::new(self.config.clone())
            .start(&mut page, &mut context, &window, &mut rng)
            .context("failed to start card scenes")?;

        let (width, height) = presenter.dimensions();
        let mut running = Running {
            window,
            presenter,
            page,
            scenes,
            frame: Canvas::new(width, height),
        };
        running.flush_observers();
        Ok(running)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => self.running = Some(running),
            Err(e) => {
                error!("{e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                running.presenter.resize(size.width, size.height);
                let viewport = running.window.logical_size();
                running.page.relayout(viewport);
                running.flush_observers();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                running.page.set_device_pixel_ratio(scale_factor as f32);
            }
            WindowEvent::RedrawRequested => {
                let report = running.redraw();
                if !self.cli.no_ui {
                    self.stats.record(&report);
                }
            }
            ref input @ (WindowEvent::CursorMoved { .. }
            | WindowEvent::CursorLeft { .. }
            | WindowEvent::MouseWheel { .. }) => {
                let scale = running.window.scale_factor();
                let events = route_input(&mut running.page, input, scale);
                running.dispatch(events);
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SceneConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => SceneConfig::default(),
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, config);

    info!("Card Scenes - hover cards to interact, scroll to move, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
