use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use swarm_core::palette::flicker;
use swarm_core::{
    Command, CycleMode, PaletteContext, PaletteProvider, Resolution, SchemeOverride,
    ShowPalette, Swarm, SwarmConfig, SwarmSnapshot,
};
use swarm_shapes::BuiltinRasterizer;
use swarm_shared::{
    FrameSnapshot, ParticleFrame, Position, ScheduledCommand, SwarmCommand, SwarmSettings,
    SwarmStatus,
};

use crate::settings::{apply_settings, resolution, shape_sequence};

/// Ticks between periodic status lines while the readout is visible
const STATUS_EVERY: u64 = 300;

#[derive(Debug, Clone)]
pub struct RunnerOptions {
    pub width: f32,
    pub height: f32,
    /// Falls back to the settings' particle count
    pub count: Option<usize>,
    pub seed: u64,
    pub frame_ms: f64,
    /// Local hour for the time-of-day palette
    pub hour: u32,
    pub settings: SwarmSettings,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            count: None,
            seed: 0,
            frame_ms: 1000.0 / 60.0,
            hour: 20,
            settings: SwarmSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub commands_applied: usize,
    pub frames_written: usize,
    pub status: SwarmStatus,
}

/// Headless driver: steps a swarm, replays scheduled commands and emits frames
pub struct SwarmRunner {
    swarm: Swarm,
    palette: ShowPalette,
    hour: u32,
    frame_ms: f64,
    show_status: bool,
}

impl SwarmRunner {
    pub fn new(options: &RunnerOptions) -> Self {
        let config = apply_settings(&options.settings, SwarmConfig::default());
        let count = options.count.unwrap_or(config.default_particles);
        let mut swarm = Swarm::new(
            config,
            options.width,
            options.height,
            count,
            options.seed,
            BuiltinRasterizer::new(),
        )
        .with_shapes(shape_sequence(&options.settings));
        if resolution(&options.settings) == Resolution::High {
            swarm.toggle_detail();
        }

        Self {
            swarm,
            palette: ShowPalette::default(),
            hour: options.hour % 24,
            frame_ms: options.frame_ms.max(0.0),
            show_status: true,
        }
    }

    pub fn swarm(&self) -> &Swarm {
        &self.swarm
    }

    pub fn scheme(&self) -> SchemeOverride {
        self.palette.scheme
    }

    pub fn status_visible(&self) -> bool {
        self.show_status
    }

    pub fn apply(&mut self, command: &SwarmCommand) {
        log::debug!("Applying {:?}", command);
        match command {
            SwarmCommand::SetParticleCount { count } => {
                self.swarm.apply(Command::SetParticleCount(*count));
            }
            SwarmCommand::Grow => self.swarm.apply(Command::Grow),
            SwarmCommand::Shrink => self.swarm.apply(Command::Shrink),
            SwarmCommand::NextShape => self.swarm.apply(Command::NextShape),
            SwarmCommand::PreviousShape => self.swarm.apply(Command::PreviousShape),
            SwarmCommand::AutoCycle => {
                self.swarm.apply(Command::AutoCycle);
                self.palette.scheme = SchemeOverride::Auto;
            }
            SwarmCommand::ToggleDetail => self.swarm.apply(Command::ToggleDetail),
            SwarmCommand::Resize { width, height } => self.swarm.apply(Command::Resize {
                width: *width,
                height: *height,
            }),
            SwarmCommand::SetScheme { scheme } => match SchemeOverride::from_name(scheme) {
                Some(scheme) => {
                    log::info!("Colour scheme {}", scheme);
                    self.palette.scheme = scheme;
                }
                None => log::warn!(
                    "Unknown colour scheme '{}', keeping {}",
                    scheme,
                    self.palette.scheme
                ),
            },
            SwarmCommand::ToggleStatus => self.show_status = !self.show_status,
        }
    }

    pub fn status(&self) -> SwarmStatus {
        let snapshot = self.swarm.snapshot();
        SwarmStatus {
            phase: snapshot.phase.to_string(),
            mode: match snapshot.mode {
                CycleMode::Auto => "AUTO".to_string(),
                CycleMode::Manual => "MANUAL".to_string(),
            },
            shape: snapshot.shape,
            effect: snapshot.effect.map(|e| e.name().to_string()),
            particle_count: snapshot.particle_count,
            target_count: snapshot.target_count,
            high_detail: snapshot.resolution == Resolution::High,
            scheme: self.palette.scheme.to_string(),
            tick: snapshot.tick,
            clock_ms: snapshot.clock_ms,
        }
    }

    /// Every particle with its display hue for the current tick
    pub fn frame(&self) -> FrameSnapshot {
        let snapshot = self.swarm.snapshot();
        let context = PaletteContext {
            shape: &snapshot.shape,
            hour: self.hour,
        };
        let particles = self
            .swarm
            .particles()
            .iter()
            .map(|p| {
                let base = p.display_hue();
                let color = flicker(self.palette.color(base, &context), base, snapshot.tick);
                ParticleFrame {
                    position: Position::new(p.position.x, p.position.y),
                    hue: color.h,
                    saturation: color.s,
                    brightness: color.b,
                    speed: p.velocity.magnitude(),
                }
            })
            .collect();

        FrameSnapshot {
            tick: snapshot.tick,
            phase: snapshot.phase.to_string(),
            shape: snapshot.shape.clone(),
            effect: snapshot.effect.map(|e| e.name().to_string()),
            particles,
        }
    }

    /// Step `ticks` frames. Scheduled commands run before the tick they name is
    /// stepped; a frame is written after every `frame_every`-th tick when an
    /// output is given (0 disables frames).
    pub fn run<W: Write>(
        &mut self,
        ticks: u64,
        script: &[ScheduledCommand],
        frame_every: u64,
        mut output: Option<W>,
    ) -> Result<RunSummary> {
        let mut pending = script.iter().peekable();
        let mut commands_applied = 0;
        let mut frames_written = 0;
        let mut last = self.swarm.snapshot();

        for tick in 0..ticks {
            while let Some(scheduled) = pending.next_if(|c| c.tick <= tick) {
                self.apply(&scheduled.command);
                commands_applied += 1;
            }

            self.swarm.step(self.frame_ms);

            let snapshot = self.swarm.snapshot();
            self.log_changes(&last, &snapshot);
            if self.show_status && snapshot.tick % STATUS_EVERY == 0 {
                let status = self.status();
                log::info!(
                    "tick {} | {} {} | {} particles | scheme {}",
                    status.tick,
                    status.phase,
                    status.shape,
                    status.particle_count,
                    status.scheme
                );
            }
            last = snapshot;

            if let Some(out) = output.as_mut() {
                if frame_every > 0 && (tick + 1) % frame_every == 0 {
                    serde_json::to_writer(&mut *out, &self.frame())
                        .context("Failed to serialize frame")?;
                    writeln!(out).context("Failed to write frame")?;
                    frames_written += 1;
                }
            }
        }

        let skipped = pending.count();
        if skipped > 0 {
            log::warn!("{} scripted commands were scheduled after the last tick", skipped);
        }
        if let Some(out) = output.as_mut() {
            out.flush().context("Failed to flush frame output")?;
        }

        Ok(RunSummary {
            ticks,
            commands_applied,
            frames_written,
            status: self.status(),
        })
    }

    fn log_changes(&self, before: &SwarmSnapshot, after: &SwarmSnapshot) {
        if before.phase != after.phase || before.shape != after.shape {
            log::info!("{} '{}' at {:.0}ms", after.phase, after.shape, after.clock_ms);
        }
        if before.effect != after.effect {
            match after.effect {
                Some(effect) => log::info!("Transition {} started", effect),
                None => log::debug!("Transition ended"),
            }
        }
        if before.particle_count != after.particle_count {
            log::info!("{} particles", after.particle_count);
        }
    }
}
