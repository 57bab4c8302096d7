use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mono_silhouette::IconSource;
use statusmono::models::{EngineConfig, IconRef};
use statusmono::rendering::{read_png, write_png};
use statusmono::services::{run_batch, BatchOptions, FileResolver, IconEngine};

#[derive(Parser)]
#[command(name = "statusmono")]
#[command(about = "Monochrome silhouettes for colored status icons")]
struct Cli {
    /// YAML configuration file (defaults to $STATUSMONO_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether PNG icons are colored or monochrome
    Classify {
        /// PNG files to check
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Synthesize a monochrome silhouette from a PNG icon
    Mono {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Fit the result to this width
        #[arg(long, requires = "height")]
        width: Option<i32>,

        /// Fit the result to this height
        #[arg(long, requires = "width")]
        height: Option<i32>,

        /// Skip oxipng re-compression
        #[arg(long)]
        no_optimize: bool,
    },
    /// Resize a PNG icon with bilinear filtering
    Fit {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Target width
        #[arg(long)]
        width: i32,

        /// Target height
        #[arg(long)]
        height: i32,
    },
    /// Resolve every icon in a directory tree in parallel
    Batch {
        /// Root directory (<package>/<id>.png, <id>.raw.png, icon.png)
        input: PathBuf,

        /// Output directory for silhouettes
        #[arg(short, long)]
        output: PathBuf,

        /// Parallel jobs (defaults to available CPUs)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Fit every silhouette to WIDTHxHEIGHT (e.g. 24x24)
        #[arg(long, value_parser = parse_size)]
        size: Option<(i32, i32)>,

        /// Skip oxipng re-compression
        #[arg(long)]
        no_optimize: bool,

        /// Print the report and cache statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statusmono=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = cli
        .config
        .or_else(|| std::env::var_os("STATUSMONO_CONFIG").map(PathBuf::from));
    let config = EngineConfig::load(config_path.as_deref());

    match cli.command {
        Some(Commands::Classify { inputs, json }) => run_classify_command(&config, &inputs, json),
        Some(Commands::Mono {
            input,
            output,
            width,
            height,
            no_optimize,
        }) => run_mono_command(&config, &input, &output, width.zip(height), !no_optimize),
        Some(Commands::Fit {
            input,
            output,
            width,
            height,
        }) => run_fit_command(&config, &input, &output, width, height),
        Some(Commands::Batch {
            input,
            output,
            jobs,
            size,
            no_optimize,
            json,
        }) => {
            let jobs = jobs.unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4)
            });
            let options = BatchOptions {
                output_dir: output,
                jobs,
                target: size,
                optimize: !no_optimize,
            };
            run_batch_command(&config, input, options, json).await
        }
        None => {
            run_status_command(&config, config_path.as_deref());
            Ok(())
        }
    }
}

/// Parse "WIDTHxHEIGHT"
fn parse_size(s: &str) -> Result<(i32, i32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse().map_err(|e| format!("invalid width: {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("invalid height: {e}"))?;
    Ok((w, h))
}

/// CLI icons have no resource behind them; key them by file name
fn file_icon_ref(path: &Path) -> IconRef {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "icon".to_string());
    IconRef::opaque(name)
}

fn run_classify_command(config: &EngineConfig, inputs: &[PathBuf], json: bool) -> anyhow::Result<()> {
    let engine = IconEngine::new(config);
    let mut results = Vec::new();

    for input in inputs {
        let image = read_png(input)?;
        let classification = engine.classify(&file_icon_ref(input), &image);
        if json {
            results.push(serde_json::json!({
                "path": input.display().to_string(),
                "is_colored": classification.is_colored,
            }));
        } else {
            let label = if classification.is_colored {
                "colored"
            } else {
                "monochrome"
            };
            println!("{}: {label}", input.display());
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }
    Ok(())
}

fn run_mono_command(
    config: &EngineConfig,
    input: &Path,
    output: &Path,
    size: Option<(i32, i32)>,
    optimize: bool,
) -> anyhow::Result<()> {
    let engine = IconEngine::new(config);
    let icon = file_icon_ref(input);
    let source = IconSource::Flat(read_png(input)?);

    let mut image = engine.synthesize_monochrome(&icon, &source, None);
    if let Some((width, height)) = size {
        image = engine.fit(&image, width, height, Some(&icon.cache_key()));
    }

    write_png(output, &image, optimize)?;
    println!(
        "Wrote {} ({}x{})",
        output.display(),
        image.width(),
        image.height()
    );
    Ok(())
}

fn run_fit_command(
    config: &EngineConfig,
    input: &Path,
    output: &Path,
    width: i32,
    height: i32,
) -> anyhow::Result<()> {
    let engine = IconEngine::new(config);
    let image = read_png(input)?;
    let fitted = engine.fit(&image, width, height, None);

    write_png(output, &fitted, true)?;
    println!(
        "Wrote {} ({}x{})",
        output.display(),
        fitted.width(),
        fitted.height()
    );
    Ok(())
}

async fn run_batch_command(
    config: &EngineConfig,
    input: PathBuf,
    options: BatchOptions,
    json: bool,
) -> anyhow::Result<()> {
    let engine = Arc::new(IconEngine::new(config));
    let resolver = Arc::new(FileResolver::new(input));

    let report = run_batch(engine.clone(), resolver, options).await?;

    if json {
        let out = serde_json::json!({
            "report": report,
            "caches": engine.cache_snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "Processed {} icons: {} monochrome, {} passthrough, {} failed",
        report.total, report.monochrome, report.passthrough, report.failed
    );
    println!("\nCaches:");
    for stats in engine.cache_snapshot() {
        println!(
            "  {:<13} {:>4}/{:<4} hits {:>5}  misses {:>5}  evicted {:>5}",
            stats.kind.as_str(),
            stats.len,
            stats.capacity,
            stats.hits,
            stats.misses,
            stats.evictions
        );
    }
    Ok(())
}

/// Display version and effective configuration
fn run_status_command(config: &EngineConfig, config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Statusmono v{VERSION}");
    println!("Monochrome silhouettes for colored status icons\n");

    println!("Environment Variables:");
    println!(
        "  STATUSMONO_CONFIG = {}",
        std::env::var("STATUSMONO_CONFIG")
            .as_deref()
            .unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG          = {}",
        std::env::var("RUST_LOG")
            .as_deref()
            .unwrap_or("statusmono=warn (default)")
    );

    let source = match config_path {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("\nConfiguration: {source}");

    match serde_yaml::to_string(config) {
        Ok(yaml) => {
            for line in yaml.lines() {
                println!("  {line}");
            }
        }
        Err(e) => eprintln!("  (could not render configuration: {e})"),
    }

    println!("\nRun 'statusmono --help' for commands.");
}
