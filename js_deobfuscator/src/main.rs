use clap::{Parser, ValueEnum};
use js_deobfuscator::config::{load_config, Overrides};
use js_deobfuscator::errors::AppError;
use js_deobfuscator::logger;
use js_deobfuscator::{transform_with_timeout, TransformResult};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[derive(Parser)]
#[command(name = "js-deobfuscator", version, about = "Rename obfuscated JavaScript identifiers and numbers")]
struct Cli {
    /// Script to transform, `-` for stdin
    input: PathBuf,

    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replace char-code numbers with character literals instead of tokens
    #[arg(long)]
    decode_chars: bool,

    #[arg(long)]
    timeout_secs: Option<u64>,

    #[arg(short, long, value_enum, default_value = "json")]
    format: Format,

    #[arg(short, long)]
    output: Option<PathBuf>,
}

async fn read_input(path: &Path) -> Result<String, AppError> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        tokio::io::stdin().read_to_string(&mut source).await?;
        Ok(source)
    } else {
        Ok(tokio::fs::read_to_string(path).await?)
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    logger::init_logging();
    let cli = Cli::parse();

    let overrides = Overrides {
        decode_numbers_as_chars: cli.decode_chars.then_some(true),
        timeout_secs: cli.timeout_secs,
        bind: None,
    };
    let cfg = load_config(cli.config.as_deref(), &overrides)?;

    let source = read_input(&cli.input).await?;
    info!(input = %cli.input.display(), length = source.len(), "transforming");

    let result = transform_with_timeout(source, cfg.engine(), cfg.timeout()).await;
    let failure = result.as_ref().err().map(|e| e.to_string());
    let report = TransformResult::from(result);

    let rendered = match cli.format {
        Format::Json => serde_json::to_string_pretty(&report)?,
        Format::Yaml => serde_yaml::to_string(&report)?,
    };
    match &cli.output {
        Some(path) => tokio::fs::write(path, rendered).await?,
        None => println!("{}", rendered),
    }

    if let Some(message) = failure {
        tracing::error!(%message, "transform failed");
        std::process::exit(1);
    }
    Ok(())
}
