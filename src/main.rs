//! Bubble Drift entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use bubble_drift::error::RenderError;
    use bubble_drift::renderer::{GpuRenderer, RenderState};
    use bubble_drift::sim::{SimState, Viewport};
    use bubble_drift::{Driver, FrameOutcome, SimConfig, StopHandle};

    type App = Driver<Rc<Cell<Viewport>>, GpuRenderer>;

    /// Canvas size in CSS pixels (simulation space) and physical pixels (surface)
    fn canvas_size(canvas: &HtmlCanvasElement) -> (Viewport, u32, u32) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let viewport = Viewport::new(client_w as f32, client_h as f32);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        (viewport, width, height)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Bubble Drift starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (viewport, width, height) = canvas_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let config = SimConfig::load();
        let seed = config.seed.unwrap_or(js_sys::Date::now() as u64);
        let entity_count = config.entity_count;
        let state = match SimState::new(config, viewport, seed) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Invalid config: {}", e);
                return;
            }
        };
        log::info!("Spawned {} bubbles with seed: {}", entity_count, seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => render_state,
            Err(e) => {
                log::error!("Failed to set up renderer: {}", e);
                return;
            }
        };

        let shared_viewport = Rc::new(Cell::new(viewport));
        let app = Rc::new(RefCell::new(Driver::new(
            state,
            shared_viewport.clone(),
            GpuRenderer::new(render_state),
        )));
        let stop = app.borrow().stop_handle();

        setup_resize_handler(&canvas, shared_viewport, app.clone());
        setup_stop_on_unload(stop);

        request_animation_frame(app);
        log::info!("Bubble Drift running!");
    }

    /// Keep the canvas, surface and simulation viewport in sync with the window
    fn setup_resize_handler(
        canvas: &HtmlCanvasElement,
        shared_viewport: Rc<Cell<Viewport>>,
        app: Rc<RefCell<App>>,
    ) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (viewport, width, height) = canvas_size(&canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            shared_viewport.set(viewport);
            app.borrow_mut().renderer_mut().state.resize(width, height);
            log::info!("Resized to {}x{}", viewport.width, viewport.height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_stop_on_unload(stop: StopHandle) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            stop.stop();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        let outcome = {
            let mut driver = app.borrow_mut();
            match driver.frame() {
                Ok(outcome) => outcome,
                Err(RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                    driver.renderer_mut().state.reconfigure();
                    FrameOutcome::Rendered(Default::default())
                }
                Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                    log::error!("Out of memory!");
                    FrameOutcome::Stopped
                }
                Err(e) => {
                    log::warn!("Render error: {}", e);
                    FrameOutcome::Rendered(Default::default())
                }
            }
        };

        match outcome {
            FrameOutcome::Rendered(_) => request_animation_frame(app),
            FrameOutcome::Stopped => log::info!("Frame loop stopped"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::time::Instant;

    use bubble_drift::consts::FRAME_RATE_HZ;
    use bubble_drift::renderer::MeshBuilder;
    use bubble_drift::sim::{SimState, Trace, Viewport};
    use bubble_drift::{Driver, SimConfig};
    use clap::Parser;

    /// Headless bubble simulation
    #[derive(Debug, Parser)]
    #[command(
        name = "bubble-drift",
        version,
        about = "Run the bubble simulation without a window"
    )]
    pub struct Options {
        /// JSON config file (defaults apply to missing fields)
        pub config_path: Option<PathBuf>,
        /// Frames to run [default: 10 seconds at 60 Hz]
        #[arg(short, long)]
        pub frames: Option<u64>,
        /// RNG seed, overrides the config
        #[arg(short, long)]
        pub seed: Option<u64>,
        /// Write a JSON trace of every tick here instead of rendering
        #[arg(short, long = "trace")]
        pub trace_path: Option<PathBuf>,
        /// Viewport width in pixels
        #[arg(long, default_value_t = 1280.0)]
        pub width: f32,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 720.0)]
        pub height: f32,
    }

    pub fn run(opts: Options) -> Result<(), Box<dyn std::error::Error>> {
        let mut config = match &opts.config_path {
            Some(path) => SimConfig::load_from_path(path)?,
            None => SimConfig::load(),
        };
        if opts.seed.is_some() {
            config.seed = opts.seed;
        }

        let viewport = Viewport::new(opts.width, opts.height);
        let frames = opts.frames.unwrap_or(10 * FRAME_RATE_HZ as u64);
        let seed = config.seed.unwrap_or_else(clock_seed);

        if let Some(path) = &opts.trace_path {
            let trace = Trace::run(config, viewport, seed, frames)?;
            std::fs::write(path, trace.to_json()?)?;
            log::info!("Wrote {} trace frames to {}", trace.len(), path.display());
            return Ok(());
        }

        log::info!(
            "Running {} frames of {} bubbles in {}x{} with seed {}",
            frames,
            config.entity_count,
            viewport.width,
            viewport.height,
            seed
        );
        let state = SimState::new(config, viewport, seed)?;
        let mut driver = Driver::new(state, viewport, MeshBuilder::default());

        let start = Instant::now();
        let ran = driver.run_frames(frames)?;
        let elapsed = start.elapsed();

        log::info!(
            "{} frames in {:.2?} ({:.0} frames/s), {} vertices in last frame, mean speed {:.2}",
            ran,
            elapsed,
            ran as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
            driver.renderer().vertices().len(),
            driver.state().mean_speed()
        );
        Ok(())
    }

    fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    let opts = headless::Options::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bubble Drift (native, headless) starting...");

    if let Err(e) = headless::run(opts) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
