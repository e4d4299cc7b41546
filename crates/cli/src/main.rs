#![deny(unsafe_code)]
//! CLI binary for the flowfield particle simulation.
//!
//! Subcommands:
//! - `run` runs the simulation headless for N steps and summarises the final frame
//! - `schema` prints every tunable with its range and default

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use flowfield_core::{
    Configuration, DrawCommand, Frame, PointerState, Renderer, Simulation, Vector2,
};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flowfield", about = "Noise-driven flow-field particle simulation")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation for N steps and summarise the last frame.
    Run {
        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: usize,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: usize,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 300)]
        steps: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Tunables as a JSON object (see `schema`).
        #[arg(long, default_value = "{}")]
        params: String,

        /// Hovering pointer position as `X,Y`.
        #[arg(long, allow_hyphen_values = true)]
        pointer: Option<String>,

        /// Pointer movement per frame as `DX,DY`.
        #[arg(long, allow_hyphen_values = true)]
        drift: Option<String>,

        /// Hold the pointer button down for the whole run.
        #[arg(long)]
        press: bool,
    },
    /// Print the parameter schema.
    Schema,
}

/// Aggregates a frame as it is replayed, without keeping the commands.
#[derive(Debug, Default)]
struct FrameStats {
    fade: f64,
    count: usize,
    min: Option<(f64, f64)>,
    max: Option<(f64, f64)>,
    hue_sum: f64,
    size_sum: f64,
}

impl Renderer for FrameStats {
    fn fade(&mut self, opacity: f64) {
        self.fade = opacity;
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.count += 1;
        self.hue_sum += command.hue;
        self.size_sum += command.size;
        self.min = Some(match self.min {
            Some((x, y)) => (x.min(command.x), y.min(command.y)),
            None => (command.x, command.y),
        });
        self.max = Some(match self.max {
            Some((x, y)) => (x.max(command.x), y.max(command.y)),
            None => (command.x, command.y),
        });
    }
}

impl FrameStats {
    fn mean(&self, sum: f64) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            sum / self.count as f64
        }
    }

    fn mean_hue(&self) -> f64 {
        self.mean(self.hue_sum)
    }

    fn mean_size(&self) -> f64 {
        self.mean(self.size_sum)
    }
}

/// Parses `"X,Y"` into a pair of finite floats.
fn parse_pair(raw: &str, flag: &str) -> Result<(f64, f64), CliError> {
    let invalid = || CliError::Input(format!("invalid {flag} '{raw}': expected X,Y"));
    let (x, y) = raw.split_once(',').ok_or_else(invalid)?;
    let x: f64 = x.trim().parse().map_err(|_| invalid())?;
    let y: f64 = y.trim().parse().map_err(|_| invalid())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }
    Ok((x, y))
}

fn initial_pointer(
    pointer: Option<&str>,
    press: bool,
    width: usize,
    height: usize,
) -> Result<Option<PointerState>, CliError> {
    match pointer {
        Some(raw) => {
            let (x, y) = parse_pair(raw, "--pointer")?;
            Ok(Some(PointerState {
                position: Vector2::new(x, y),
                velocity: Vector2::ZERO,
                hovering: true,
                pressed: press,
            }))
        }
        None if press => Ok(Some(PointerState {
            pressed: true,
            ..PointerState::centered(width, height)
        })),
        None => Ok(None),
    }
}

/// Builds the simulation and runs `steps` frames.
///
/// Returns the simulation and its last frame; with zero steps that is the
/// spawned population, so the summary always describes live particles.
#[allow(clippy::too_many_arguments)]
fn simulate(
    width: usize,
    height: usize,
    steps: usize,
    seed: u64,
    params: &str,
    pointer: Option<&str>,
    drift: Option<&str>,
    press: bool,
) -> Result<(Simulation, Frame), CliError> {
    let params: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let config = Configuration::try_from_json(&params)?;
    tracing::debug!(config = %config.to_json(), "parsed params");
    let drift = drift.map(|raw| parse_pair(raw, "--drift")).transpose()?;
    let mut pointer = initial_pointer(pointer, press, width, height)?;

    let mut sim = Simulation::new(width, height, seed, config)?;
    sim.poll_pointer(&pointer);

    let mut last = sim.frame();
    for _ in 0..steps {
        if let Some((dx, dy)) = drift {
            if let Some(p) = pointer.as_mut() {
                *p = p.moved_to(p.position.x + dx, p.position.y + dy);
            }
            sim.poll_pointer(&pointer);
        }
        last = sim.step();
    }
    Ok((sim, last))
}

#[allow(clippy::too_many_arguments)]
fn run_simulation(
    json: bool,
    width: usize,
    height: usize,
    steps: usize,
    seed: u64,
    params: &str,
    pointer: Option<&str>,
    drift: Option<&str>,
    press: bool,
) -> Result<(), CliError> {
    let (sim, last) = simulate(width, height, steps, seed, params, pointer, drift, press)?;
    let mut stats = FrameStats::default();
    last.render(&mut stats);

    let particles = sim.state().particles();
    let mean_speed = if particles.is_empty() {
        0.0
    } else {
        particles.iter().map(|p| p.velocity.length()).sum::<f64>() / particles.len() as f64
    };
    let (min_x, min_y) = stats.min.unwrap_or_default();
    let (max_x, max_y) = stats.max.unwrap_or_default();
    tracing::debug!(
        steps,
        particles = stats.count,
        mean_speed,
        mean_hue = stats.mean_hue(),
        noise_time = sim.noise_time(),
        "run finished"
    );

    if json {
        let info = serde_json::json!({
            "width": width,
            "height": height,
            "steps": steps,
            "seed": seed,
            "noise_time": sim.noise_time(),
            "config": sim.config().to_json(),
            "summary": {
                "particles": stats.count,
                "fade": stats.fade,
                "bounds": {
                    "min_x": min_x,
                    "min_y": min_y,
                    "max_x": max_x,
                    "max_y": max_y,
                },
                "mean_speed": mean_speed,
                "mean_hue": stats.mean_hue(),
                "mean_size": stats.mean_size(),
            },
            "frame": last,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!(
            "simulated {steps} steps ({width}x{height}, seed {seed}, noise time {:.4})",
            sim.noise_time()
        );
        println!("  particles:  {}", stats.count);
        println!("  bounds:     ({min_x:.1}, {min_y:.1}) .. ({max_x:.1}, {max_y:.1})");
        println!("  mean speed: {mean_speed:.4}");
        println!("  mean hue:   {:.2}", stats.mean_hue());
        println!("  mean size:  {:.3}", stats.mean_size());
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            let schema = Configuration::param_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Run {
            width,
            height,
            steps,
            seed,
            params,
            pointer,
            drift,
            press,
        } => run_simulation(
            cli.json,
            width,
            height,
            steps,
            seed,
            &params,
            pointer.as_deref(),
            drift.as_deref(),
            press,
        )?,
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pair_accepts_spaces_and_negatives() {
        let (x, y) = parse_pair(" -3.5, 12", "--drift").unwrap();
        assert_eq!((x, y), (-3.5, 12.0));
    }

    #[test]
    fn parse_pair_rejects_malformed_input() {
        for raw in ["", "1", "1;2", "a,b", "1,NaN", "inf,0"] {
            let err = parse_pair(raw, "--pointer").unwrap_err();
            assert_eq!(err.exit_code(), 12, "{raw}");
        }
    }

    #[test]
    fn press_without_pointer_holds_at_center() {
        let p = initial_pointer(None, true, 200, 100).unwrap().unwrap();
        assert_eq!(p.position, Vector2::new(100.0, 50.0));
        assert!(p.pressed && !p.hovering);
        assert!(initial_pointer(None, false, 200, 100).unwrap().is_none());
    }

    #[test]
    fn frame_stats_track_bounds_and_means() {
        let frame = Frame {
            fade: 0.15,
            commands: vec![
                DrawCommand { x: 1.0, y: 8.0, size: 1.0, hue: 10.0 },
                DrawCommand { x: 5.0, y: 2.0, size: 2.0, hue: 20.0 },
            ],
        };
        let mut stats = FrameStats::default();
        frame.render(&mut stats);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min, Some((1.0, 2.0)));
        assert_eq!(stats.max, Some((5.0, 8.0)));
        assert!((stats.mean_hue() - 15.0).abs() < 1e-12);
        assert!((stats.mean_size() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn empty_frame_stats_are_zero() {
        let stats = FrameStats::default();
        assert_eq!(stats.mean_hue(), 0.0);
        assert!(stats.min.is_none());
    }

    #[test]
    fn run_rejects_non_object_params() {
        let err = run_simulation(false, 10, 10, 1, 1, "[1]", None, None, false).unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn zero_steps_summarises_spawned_population() {
        let (sim, frame) =
            simulate(120, 80, 0, 3, r#"{"particle_count": 50}"#, None, None, false).unwrap();
        let mut stats = FrameStats::default();
        frame.render(&mut stats);
        assert_eq!(stats.count, 50);
        assert_eq!(stats.count, sim.state().particles().len());
        let (min_x, min_y) = stats.min.unwrap();
        let (max_x, max_y) = stats.max.unwrap();
        assert!(min_x >= 0.0 && min_y >= 0.0 && max_x < 120.0 && max_y < 80.0);
    }

    #[test]
    fn drifting_pointer_moves_each_frame() {
        let (sim, frame) = simulate(
            200,
            200,
            5,
            3,
            r#"{"particle_count": 10}"#,
            Some("100,100"),
            Some("-2,1"),
            true,
        )
        .unwrap();
        assert_eq!(frame.commands.len(), 10);
        let p = sim.pointer();
        assert_eq!(p.position, Vector2::new(90.0, 105.0));
        assert!(p.pressed && p.hovering);
    }

    #[test]
    fn negative_pointer_coordinates_parse() {
        let cli = Cli::try_parse_from(["flowfield", "run", "--pointer", "-5,3", "--drift", "-1,-1"])
            .unwrap();
        match cli.command {
            Command::Run { pointer, drift, .. } => {
                assert_eq!(pointer.as_deref(), Some("-5,3"));
                assert_eq!(drift.as_deref(), Some("-1,-1"));
            }
            Command::Schema => panic!("expected run"),
        }
    }

    #[test]
    fn run_rejects_empty_viewport() {
        let err = run_simulation(false, 0, 10, 1, 1, "{}", None, None, false).unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }
}
