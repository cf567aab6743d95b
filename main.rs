mod chart;
mod config;
mod fetch;
mod html;
mod normalize;
mod rank;
mod types;
mod wc;

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::chart::ChartStyle;
use crate::config::{Config, ConfigError, OutputFormat, Strategy, DEFAULT_BAR_WIDTH};
use crate::fetch::Fetcher;
use crate::wc::Aggregator;

const NO_WORDS: &str = "No words found to analyze.";

#[derive(Parser)]
#[command(name = "wordfreq", version, about = "Chart the most frequent words of a web document")]
struct Cli {
    /// URL of the text to analyze; prompted for when omitted
    url: Option<String>,
    /// How many top words to show (default 10)
    #[arg(short = 'n', long = "top")]
    top: Option<String>,
    /// Worker threads for counting (default: available parallelism)
    #[arg(short = 'j', long)]
    workers: Option<usize>,
    #[arg(long, value_enum, default_value_t = Strategy::Parallel)]
    strategy: Strategy,
    #[arg(long, value_enum, default_value_t = OutputFormat::Chart)]
    format: OutputFormat,
    /// Write the result to a file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// Width of the longest bar, in columns
    #[arg(long, default_value_t = DEFAULT_BAR_WIDTH)]
    width: usize,
    #[arg(long)]
    no_color: bool,
    /// Log debug details (stage timings)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);
    let config = build_config(&cli, &mut io::stdin().lock())?;
    let fetcher = Fetcher::new()?;
    run(&config, &fetcher)
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_writer(io::stderr)
        .init();
}

/// Arguments take precedence; a missing URL falls back to the interactive prompts.
fn build_config(cli: &Cli, input: &mut impl BufRead) -> Result<Config, ConfigError> {
    let (source, top) = match &cli.url {
        Some(url) => (url.clone(), cli.top.clone().unwrap_or_default()),
        None => {
            let url = prompt("Enter the URL of the text to analyze: ", input)?;
            let top = match &cli.top {
                Some(top) => top.clone(),
                None => prompt("How many top words to show? (default 10): ", input)?,
            };
            (url, top)
        }
    };

    let mut config = Config::from_inputs(&source, &top)?
        .with_workers(cli.workers)?
        .with_bar_width(cli.width)?;
    config.strategy = cli.strategy;
    config.format = cli.format;
    config.output = cli.output.clone();
    config.color = !cli.no_color && cli.output.is_none() && io::stdout().is_terminal();
    Ok(config)
}

fn prompt(question: &str, input: &mut impl BufRead) -> Result<String, ConfigError> {
    print!("{question}");
    io::stdout().flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

fn run(config: &Config, fetcher: &Fetcher) -> Result<()> {
    let start = Instant::now();
    let document = fetcher
        .fetch_text(&config.source)
        .with_context(|| format!("could not fetch text from {}", config.source))?;
    debug!(
        "{} bytes of text ({})",
        document.text.len(),
        document.content_type.as_deref().unwrap_or("unknown content type")
    );

    match analyze(config, &document.url, &document.text)? {
        Some(rendered) => emit(config, &rendered)?,
        None => {
            warn!("{} produced no tokens", document.url);
            println!("{NO_WORDS}");
        }
    }
    info!("done in {:.2?}", start.elapsed());
    Ok(())
}

/// Tokenize, count, rank and render. `None` when the text holds no words,
/// in which case nothing is ranked or rendered.
fn analyze(config: &Config, source: &str, text: &str) -> Result<Option<String>> {
    let tokens = normalize::tokenize(text);
    info!("{} tokens", tokens.len());
    if tokens.is_empty() {
        return Ok(None);
    }

    let aggregator = Aggregator::new(config.workers, config.strategy)?;
    info!("counting with {:?} strategy on {} workers", config.strategy, aggregator.workers());
    let table = aggregator.aggregate(&tokens);
    debug_assert_eq!(table.total(), tokens.len());
    info!("{} distinct words", table.len());

    let ranked = rank::top_n(&table, config.top_n);
    debug!("ranked {} of {} requested", ranked.len(), config.top_n);

    let rendered = match config.format {
        OutputFormat::Chart => chart::render_chart(
            &ranked,
            config.top_n,
            ChartStyle {
                bar_width: config.bar_width,
                color: config.color,
            },
        ),
        OutputFormat::Json => chart::render_json(source, &table, &ranked, config.top_n)?,
    };
    Ok(Some(rendered))
}

fn emit(config: &Config, rendered: &str) -> Result<()> {
    match &config.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("saved result to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
