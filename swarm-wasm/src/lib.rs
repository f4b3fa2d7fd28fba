use core::f64::consts::TAU;

use swarm_core::palette::{dot_size, flicker};
use swarm_core::{
    Command, CycleMode, PaletteContext, PaletteProvider, Resolution, SchemeOverride,
    ShowPalette, Swarm, SwarmConfig,
};
use swarm_shapes::BuiltinRasterizer;
use swarm_shared::{SwarmCommand, SwarmStatus};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

/// HSB(0, 0, 7)
const BACKGROUND: &str = "#121212";
const LABEL_COLOR: &str = "#cccccc";

#[wasm_bindgen]
pub struct SwarmSimulation {
    swarm: Swarm,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    palette: ShowPalette,
    show_status: bool,
}

#[wasm_bindgen]
impl SwarmSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        width: f64,
        height: f64,
        particle_count: usize,
    ) -> Result<SwarmSimulation, JsValue> {
        let mut bytes = [0u8; 8];
        getrandom::getrandom(&mut bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::build(canvas_id, width, height, particle_count, u64::from_le_bytes(bytes))
    }

    /// Deterministic variant for reproducible runs
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(
        canvas_id: &str,
        width: f64,
        height: f64,
        particle_count: usize,
        seed: u32,
    ) -> Result<SwarmSimulation, JsValue> {
        Self::build(canvas_id, width, height, particle_count, seed as u64)
    }

    /// Advance one frame by `dt_ms` milliseconds
    pub fn update(&mut self, dt_ms: f64) {
        self.swarm.step(dt_ms);
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;

        self.context.set_fill_style_str(BACKGROUND);
        self.context.fill_rect(0.0, 0.0, width, height);

        let snapshot = self.swarm.snapshot();
        let palette_context = PaletteContext {
            shape: &snapshot.shape,
            hour: js_sys::Date::new_0().get_hours(),
        };
        let high_detail = snapshot.resolution == Resolution::High;
        let max_speed = self.swarm.config().max_speed;

        for particle in self.swarm.particles() {
            let base = particle.display_hue();
            let color = flicker(self.palette.color(base, &palette_context), base, snapshot.tick);
            let (r, g, b) = color.to_rgb();
            let size = dot_size(particle.velocity.magnitude(), max_speed, high_detail) as f64;

            self.context
                .set_fill_style_str(&format!("rgb({}, {}, {})", r, g, b));
            self.context.begin_path();
            self.context.arc(
                particle.position.x as f64,
                particle.position.y as f64,
                size * 0.5,
                0.0,
                TAU,
            )?;
            self.context.fill();
        }

        if self.show_status {
            self.context.set_fill_style_str(LABEL_COLOR);
            self.context.set_font("14px sans-serif");
            self.context.fill_text(&self.status_line(), 10.0, 24.0)?;
        }

        Ok(())
    }

    /// Keyboard controls: arrows step shapes, A resumes auto, 1-4 and 6 pick
    /// a scheme, 5 toggles detail, +/- change the dot count, H hides the label
    pub fn handle_key(&mut self, event: KeyboardEvent) {
        self.handle_key_name(&event.key());
    }

    /// Returns whether the key mapped to a command
    pub fn handle_key_name(&mut self, key: &str) -> bool {
        match command_for_key(key) {
            Some(command) => {
                self.apply_command(command);
                true
            }
            None => false,
        }
    }

    /// Apply a JSON-encoded `SwarmCommand`
    pub fn command(&mut self, json: &str) -> Result<(), JsValue> {
        let command: SwarmCommand =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.apply_command(command);
        Ok(())
    }

    pub fn set_particle_count(&mut self, count: usize) -> usize {
        self.swarm.set_particle_count(count)
    }

    pub fn grow(&mut self) -> usize {
        self.swarm.grow()
    }

    pub fn shrink(&mut self) -> usize {
        self.swarm.shrink()
    }

    pub fn next_shape(&mut self) {
        self.swarm.next_shape();
    }

    pub fn previous_shape(&mut self) {
        self.swarm.previous_shape();
    }

    /// Resume timed cycling and the real-clock palette
    pub fn auto_cycle(&mut self) {
        self.swarm.set_auto_cycle();
        self.palette.scheme = SchemeOverride::Auto;
    }

    pub fn toggle_detail(&mut self) {
        self.swarm.toggle_detail();
    }

    /// Returns false for an unknown scheme name
    pub fn set_scheme(&mut self, name: &str) -> bool {
        match SchemeOverride::from_name(name) {
            Some(scheme) => {
                self.palette.scheme = scheme;
                true
            }
            None => {
                console_log!("Unknown colour scheme '{}'", name);
                false
            }
        }
    }

    pub fn toggle_status(&mut self) {
        self.show_status = !self.show_status;
    }

    pub fn status_visible(&self) -> bool {
        self.show_status
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.swarm.resize(width as f32, height as f32);
        console_log!("Resized to {}x{}", width, height);
    }

    pub fn particle_count(&self) -> usize {
        self.swarm.particles().len()
    }

    pub fn phase(&self) -> String {
        self.swarm.snapshot().phase.to_string()
    }

    pub fn shape(&self) -> String {
        self.swarm.snapshot().shape
    }

    pub fn scheme(&self) -> String {
        self.palette.scheme.to_string()
    }

    /// `SwarmStatus` as JSON
    pub fn status_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.status()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl SwarmSimulation {
    fn build(
        canvas_id: &str,
        width: f64,
        height: f64,
        particle_count: usize,
        seed: u64,
    ) -> Result<SwarmSimulation, JsValue> {
        console_log!("Initializing swarm with {} particles", particle_count);

        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let swarm = Swarm::new(
            SwarmConfig::default(),
            width as f32,
            height as f32,
            particle_count,
            seed,
            BuiltinRasterizer::new(),
        );

        Ok(SwarmSimulation {
            swarm,
            canvas,
            context,
            palette: ShowPalette::default(),
            show_status: true,
        })
    }

    fn apply_command(&mut self, command: SwarmCommand) {
        match command {
            SwarmCommand::SetParticleCount { count } => {
                self.swarm.apply(Command::SetParticleCount(count))
            }
            SwarmCommand::Grow => self.swarm.apply(Command::Grow),
            SwarmCommand::Shrink => self.swarm.apply(Command::Shrink),
            SwarmCommand::NextShape => self.swarm.apply(Command::NextShape),
            SwarmCommand::PreviousShape => self.swarm.apply(Command::PreviousShape),
            SwarmCommand::AutoCycle => self.auto_cycle(),
            SwarmCommand::ToggleDetail => self.swarm.apply(Command::ToggleDetail),
            SwarmCommand::Resize { width, height } => self.resize(width as f64, height as f64),
            SwarmCommand::SetScheme { scheme } => {
                self.set_scheme(&scheme);
            }
            SwarmCommand::ToggleStatus => self.toggle_status(),
        }
    }

    fn status(&self) -> SwarmStatus {
        let snapshot = self.swarm.snapshot();
        SwarmStatus {
            phase: snapshot.phase.to_string(),
            mode: mode_name(snapshot.mode).to_string(),
            effect: snapshot.effect.map(|e| e.name().to_string()),
            particle_count: snapshot.particle_count,
            target_count: snapshot.target_count,
            high_detail: snapshot.resolution == Resolution::High,
            scheme: self.palette.scheme.to_string(),
            tick: snapshot.tick,
            clock_ms: snapshot.clock_ms,
            shape: snapshot.shape,
        }
    }

    fn status_line(&self) -> String {
        let snapshot = self.swarm.snapshot();
        let mut line = format!(
            "Mode: {} | Dots: {} | Detail: {}",
            self.palette.scheme,
            snapshot.particle_count,
            if snapshot.resolution == Resolution::High {
                "HIGH"
            } else {
                "STANDARD"
            }
        );
        if snapshot.mode == CycleMode::Manual {
            line.push_str(" | SHAPES: MANUAL");
        }
        line.push_str(&format!(
            " | Shape: {} | {}",
            snapshot.shape,
            palette_label(&snapshot.shape)
        ));
        line
    }
}

fn mode_name(mode: CycleMode) -> &'static str {
    match mode {
        CycleMode::Auto => "AUTO",
        CycleMode::Manual => "MANUAL",
    }
}

fn command_for_key(key: &str) -> Option<SwarmCommand> {
    let scheme = |name: &str| {
        Some(SwarmCommand::SetScheme {
            scheme: name.to_string(),
        })
    };
    match key {
        "ArrowLeft" => Some(SwarmCommand::PreviousShape),
        "ArrowRight" => Some(SwarmCommand::NextShape),
        "a" | "A" => Some(SwarmCommand::AutoCycle),
        "h" | "H" => Some(SwarmCommand::ToggleStatus),
        "1" => scheme("midnight"),
        "2" => scheme("dawn"),
        "3" => scheme("noon"),
        "4" => scheme("dusk"),
        "6" => scheme("camo"),
        "5" => Some(SwarmCommand::ToggleDetail),
        "+" | "=" => Some(SwarmCommand::Grow),
        "-" | "_" => Some(SwarmCommand::Shrink),
        _ => None,
    }
}

fn palette_label(shape: &str) -> &'static str {
    match shape {
        "FLAG" => "FLAG: USA colors",
        "UCF" => "UCF: black, gold and white",
        "VAMOS" => "VAMOS: Orlando City colors",
        "MAGIC" => "MAGIC: team colors",
        "VALOR" => "VALOR: Camouflage",
        "PRIDE" => "PRIDE: per-letter rainbow",
        _ => "Palette: time-of-day rainbow",
    }
}
