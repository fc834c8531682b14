use std::path::PathBuf;

use clap::Parser;
use sortviz_core::limits::{self, DEFAULT_ARRAY_SIZE, MAX_ARRAY_SIZE};
use sortviz_core::{PlaybackConfig, RandomSource};
use sortviz_runtime::{Backend, CrosstermBackend, Program};

use crate::app::App;
use crate::error::{Result, SortvizError};
use crate::logging::{self, LogOptions};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "sortviz",
    about = "Step through insertion sort in the terminal",
    version
)]
pub struct Args {
    /// Number of values to generate (1-40).
    #[arg(long, default_value_t = DEFAULT_ARRAY_SIZE as i64, allow_negative_numbers = true)]
    pub size: i64,

    /// Delay between automatic steps in milliseconds (100-1000).
    #[arg(long = "speed-ms", default_value_t = 500, allow_negative_numbers = true)]
    pub speed_ms: i64,

    /// Seed for the value generator.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Comma-separated values to sort instead of random ones.
    #[arg(long, allow_hyphen_values = true)]
    pub values: Option<String>,

    /// Start playing immediately.
    #[arg(long)]
    pub autoplay: bool,

    /// Append logs to this file.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive.
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,

    /// Write logs as JSON lines.
    #[arg(long = "log-json")]
    pub log_json: bool,
}

/// Validated startup settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config: PlaybackConfig,
    pub seed: Option<u64>,
    pub values: Option<Vec<i64>>,
    pub autoplay: bool,
    pub log: LogOptions,
}

impl Settings {
    /// Clamp numeric flags and parse `--values`.
    pub fn from_args(args: Args) -> Result<Self> {
        let values = args.values.as_deref().map(parse_values).transpose()?;
        Ok(Self {
            config: PlaybackConfig {
                array_size: limits::clamp_size(args.size),
                interval: limits::clamp_interval_ms(args.speed_ms),
            },
            seed: args.seed,
            values,
            autoplay: args.autoplay,
            log: LogOptions {
                file: args.log_file,
                level: args.log_level,
                json: args.log_json,
            },
        })
    }

    /// The model these settings describe.
    #[must_use]
    pub fn build_app(&self) -> App {
        let source = match self.seed {
            Some(seed) => RandomSource::seeded(seed),
            None => RandomSource::from_entropy(),
        };
        let app = match &self.values {
            Some(values) => App::with_values(self.config, source, values.clone()),
            None => App::new(self.config, source),
        };
        app.autoplay(self.autoplay)
    }
}

/// Parse `"5, 3,4"` into values. Empty entries are rejected.
pub fn parse_values(raw: &str) -> Result<Vec<i64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    let values = raw
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<i64>()
                .map_err(|_| SortvizError::invalid(format!("--values: not an integer: {part:?}")))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(values)
}

pub fn run_from_env() -> Result<()> {
    run(Args::parse())
}

pub fn run(args: Args) -> Result<()> {
    let settings = Settings::from_args(args)?;
    logging::init(&settings.log)?;
    if let Some(values) = settings.values.as_ref().filter(|v| v.len() > MAX_ARRAY_SIZE) {
        tracing::warn!(
            given = values.len(),
            kept = MAX_ARRAY_SIZE,
            "too many values, extra ones dropped"
        );
    }
    let app = settings.build_app();
    tracing::info!(
        size = app.playback().array_size(),
        interval_ms = app.playback().interval().as_millis() as u64,
        seeded = settings.seed.is_some(),
        "session started"
    );
    let backend = CrosstermBackend::new()?;
    run_with(app, backend)
}

/// Drive `app` on `backend` until it quits.
pub fn run_with<B: Backend>(app: App, backend: B) -> Result<()> {
    let mut program = Program::new(app, backend);
    let outcome = program.run();
    tracing::info!(frames = program.frames_rendered(), "session ended");
    outcome.map_err(SortvizError::from)
}
