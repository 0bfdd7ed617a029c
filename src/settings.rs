use anyhow::{ensure, Result};
use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;
use std::fmt;

/// How collision children interact with the tick currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CascadePolicy {
    /// Children join the queue being drained and may advance and collide
    /// again within the same tick. Matches the original behaviour.
    Immediate,
    /// Children are buffered during the pass and merged afterwards; they are
    /// first advanced on the following tick.
    Deferred,
}

/// How a motion segment that crosses several walls picks the one to respond to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum HitPolicy {
    /// The wall with the smallest parametric distance along the motion
    /// segment wins.
    Nearest,
    /// The first intersecting wall in placement order wins, regardless of
    /// distance. Kept for parity with the original.
    FirstListed,
}

/// Runtime configuration for the simulation.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Global multiplier on per-tick wavefront displacement.
    pub wave_speed: f32,
    /// Default emission cadence for new sources, in ticks per ring.
    pub emit_rate: u32,
    /// Per-tick amplitude decay factor.
    pub amplitude_decay: f32,
    /// Wavefronts are culled once their age exceeds this.
    pub max_age: u32,
    /// Wavefronts are culled once their amplitude falls below this.
    pub min_amplitude: f32,
    /// Reflected children require `generation < max_reflections`.
    /// Transmission is deliberately not capped.
    pub max_reflections: u32,
    pub cascade: CascadePolicy,
    pub hit_policy: HitPolicy,
    /// Headless run length in ticks.
    pub ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wave_speed: 2.0,
            emit_rate: 5,
            amplitude_decay: 0.99,
            max_age: 200,
            min_amplitude: 0.05,
            max_reflections: 3,
            cascade: CascadePolicy::Immediate,
            hit_policy: HitPolicy::Nearest,
            ticks: 600,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.wave_speed > 0.0, "Wave speed must be greater than 0");
        ensure!(
            self.amplitude_decay > 0.0 && self.amplitude_decay <= 1.0,
            "Amplitude decay must be in (0, 1]"
        );
        ensure!(self.emit_rate >= 1, "Emit rate must be at least 1");
        ensure!(
            self.min_amplitude > 0.0,
            "Minimum amplitude must be greater than 0"
        );
        Ok(())
    }
}

/// Loads `config/default.toml` without environment or CLI overrides.
pub fn load_default_config() -> Result<Settings> {
    let root = retrieve_project_root();
    let default_config_file = root.join("config/default.toml");

    let settings: Config = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .build()?;

    let config: Settings = settings.try_deserialize()?;
    config.validate()?;

    Ok(config)
}

/// Loads the runtime configuration: `config/default.toml`, overlaid with
/// `RIPPLE_*` environment variables, then command-line overrides.
pub fn load_config() -> Result<Settings> {
    let root = retrieve_project_root();
    let default_config_file = root.join("config/default.toml");
    let local_config = root.join("config/local.toml");

    // Check if local config exists, if not use default
    let config_file = if local_config.exists() {
        println!("Using local configuration: {:?}", local_config);
        local_config
    } else {
        default_config_file
    };

    let settings: Config = Config::builder()
        .add_source(File::from(config_file).required(true))
        .add_source(Environment::with_prefix("ripple"))
        .build()?;

    let mut config: Settings = settings.try_deserialize()?;

    // Parse command-line arguments and override values
    let args = CliArgs::parse();

    if let Some(speed) = args.speed {
        config.wave_speed = speed;
    }
    if let Some(rate) = args.emit_rate {
        config.emit_rate = rate;
    }
    if let Some(decay) = args.decay {
        config.amplitude_decay = decay;
    }
    if let Some(age) = args.max_age {
        config.max_age = age;
    }
    if let Some(floor) = args.min_amplitude {
        config.min_amplitude = floor;
    }
    if let Some(rec) = args.rec {
        config.max_reflections = rec;
    }
    if let Some(cascade) = args.cascade {
        config.cascade = cascade;
    }
    if let Some(hit) = args.hit_policy {
        config.hit_policy = hit;
    }
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }

    config.validate()?;

    Ok(config)
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the RIPPLE_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its parents, use it.
/// If none of these methods work, the function will panic.
fn retrieve_project_root() -> std::path::PathBuf {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        // When running through cargo (e.g. cargo run, cargo test)
        std::path::PathBuf::from(manifest_dir)
    } else if let Ok(path) = env::var("RIPPLE_ROOT_DIR") {
        std::path::PathBuf::from(path)
    } else {
        // Fallback: walk upward from the executable directory until a
        // "config" subdirectory is found.
        let exe_path = env::current_exe().expect("Failed to get current executable path");
        let mut current_dir = exe_path
            .parent()
            .expect("Failed to get executable directory")
            .to_path_buf();

        loop {
            if current_dir.join("config").is_dir() {
                return current_dir;
            }
            match current_dir.parent() {
                Some(parent) => current_dir = parent.to_path_buf(),
                None => panic!("Could not find project root directory"),
            }
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "ripple - 2D wave propagation through segment walls")]
pub struct CliArgs {
    /// Global multiplier on per-tick wavefront displacement.
    #[arg(short, long)]
    speed: Option<f32>,

    /// Emission cadence for new sources, in ticks per ring.
    #[arg(short, long)]
    emit_rate: Option<u32>,

    /// Per-tick amplitude decay factor.
    #[arg(short, long)]
    decay: Option<f32>,

    /// Maximum wavefront age in ticks before culling.
    #[arg(long)]
    max_age: Option<u32>,

    /// Amplitude floor below which wavefronts are culled.
    #[arg(long)]
    min_amplitude: Option<f32>,

    /// The maximum number of reflections before a lineage stops spawning
    /// reflected children. Transmission is not capped.
    #[arg(long)]
    rec: Option<u32>,

    /// Whether collision children cascade within the same tick.
    #[arg(long, value_enum)]
    cascade: Option<CascadePolicy>,

    /// How multiple candidate walls along one motion segment are resolved.
    #[arg(long, value_enum)]
    hit_policy: Option<HitPolicy>,

    /// Number of ticks to run in headless mode.
    #[arg(short, long)]
    ticks: Option<u32>,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Wave Speed: {:.2}
  - Emit Rate: {}
  - Amplitude Decay: {:.3}
  - Max Age: {}
  - Min Amplitude: {:.3}
  - Max Reflections: {}
  - Cascade: {:?}
  - Hit Policy: {:?}
  ",
            self.wave_speed,
            self.emit_rate,
            self.amplitude_decay,
            self.max_age,
            self.min_amplitude,
            self.max_reflections,
            self.cascade,
            self.hit_policy,
        )
    }
}
