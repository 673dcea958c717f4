use std::path::PathBuf;

use runner_app::error::AppError;
use runner_app::session::Session;
use runner_core::config::StreamingConfig;
use runner_core::constants::DT;
use runner_save::{JsonFileStore, SaveData};
use runner_sim::SimConfig;

/// Command-line options: `runner [--seed N] [--seconds S] [--config FILE] [--save FILE]`.
struct Options {
    seed: u64,
    seconds: f64,
    config: Option<PathBuf>,
    save: PathBuf,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut options = Options {
            seed: SimConfig::default().seed,
            seconds: 60.0,
            config: None,
            save: std::env::temp_dir().join("runner").join("progress.json"),
        };
        while let Some(flag) = args.next() {
            let value = args
                .next()
                .ok_or_else(|| format!("missing value for {flag}"))?;
            match flag.as_str() {
                "--seed" => options.seed = value.parse().map_err(|e| format!("--seed: {e}"))?,
                "--seconds" => {
                    options.seconds = value.parse().map_err(|e| format!("--seconds: {e}"))?
                }
                "--config" => options.config = Some(value.into()),
                "--save" => options.save = value.into(),
                other => return Err(format!("unknown option {other}")),
            }
        }
        Ok(options)
    }
}

fn load_streaming(path: Option<&PathBuf>) -> Result<StreamingConfig, AppError> {
    let Some(path) = path else {
        return Ok(StreamingConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(StreamingConfig::from_toml_str(&text)?)
}

fn run(options: Options) -> Result<(), AppError> {
    let streaming = load_streaming(options.config.as_ref())?;
    let save = SaveData::new(JsonFileStore::open(&options.save)?);
    let mut session = Session::new(
        SimConfig {
            seed: options.seed,
            streaming,
        },
        save,
    )?;

    let result = session.run_for(options.seconds, DT)?;
    let diagnostics = session.engine().diagnostics();
    tracing::info!(
        coins = result.coins,
        score = result.score,
        distance = session.player().z(),
        total_coins = session.save().total_coins(),
        high_score = session.save().high_score(),
        unknown_tags = diagnostics.unknown_tags,
        placement_exhausted = diagnostics.placement_exhausted,
        forced_reuses = diagnostics.forced_reuses,
        "run finished"
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: runner [--seed N] [--seconds S] [--config FILE] [--save FILE]");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(options) {
        tracing::error!(%err, "runner failed");
        std::process::exit(1);
    }
}
