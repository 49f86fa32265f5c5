use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use console::style;
use tracing::level_filters::LevelFilter;
use tracing::{info, info_span, Span};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use zap::coder::{create_output, open_input};
use zap::decoding::decompress;
use zap::encoding::{compress, CompressionSummary};

mod progress;
use progress::{fmt_size, ProgressMonitor};

#[derive(Parser)]
#[command(version, about = "Compress and decompress files with Huffman coding", long_about = None)]
struct Cli {
    /// Print debug output, give it twice for trace output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Log the count and the code of every symbol after compressing
    #[arg(long, global = true)]
    print_codes: bool,
    /// Never draw a progress bar
    #[arg(long, global = true)]
    no_progress: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress INPUT into a zap container at OUTPUT
    Zap { input: PathBuf, output: PathBuf },
    /// Restore the content of the zap container INPUT into OUTPUT
    Unzap { input: PathBuf, output: PathBuf },
}

struct Options {
    print_codes: bool,
    progress: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = Options {
        print_codes: cli.print_codes,
        progress: !cli.no_progress && console::Term::stderr().is_term(),
    };
    match cli.command {
        Commands::Zap { input, output } => zap(&input, &output, &options),
        Commands::Unzap { input, output } => unzap(&input, &output, &options),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_target(false)
                .without_time(),
        )
        .with(indicatif_layer)
        .with(level)
        .init();
}

/// Open `input` together with its size and wrap it into a progress monitor
fn monitored_input(path: &Path, options: &Options) -> Result<ProgressMonitor<BufReader<File>>> {
    let file = open_input(path)?;
    let size = file
        .metadata()
        .wrap_err_with(|| format!("Unable to read metadata of {}", path.display()))?
        .len();
    let span = if options.progress {
        info_span!("reading", path = %path.display())
    } else {
        Span::none()
    };
    Ok(ProgressMonitor::new(BufReader::new(file), size, span))
}

fn zap(input: &Path, output: &Path, options: &Options) -> Result<()> {
    let source = monitored_input(input, options)?;
    let drain = create_output(output)?;

    let result = {
        let span = source.span().clone();
        let _entered = span.enter();
        compress(source, BufWriter::new(drain))
    };
    let summary = match result {
        Ok(summary) => summary,
        Err(err) if err.is_empty_input() => {
            info!("{} is empty and cannot be compressed.", input.display());
            return Ok(());
        }
        Err(err) => {
            return Err(err).wrap_err_with(|| format!("Failed to compress {}", input.display()))
        }
    };

    if options.print_codes {
        print_codes(&summary);
    }
    info!(
        "{} Encoded given text using {} bits.",
        style("Success!").green().bold(),
        summary.encoded_bits
    );
    info!(
        "{} -> {} ({:.1}% of the input)",
        fmt_size(summary.input_bytes),
        fmt_size(summary.output_bytes),
        ratio(summary.output_bytes, summary.input_bytes)
    );
    Ok(())
}

fn unzap(input: &Path, output: &Path, options: &Options) -> Result<()> {
    let source = monitored_input(input, options)?;
    let drain = create_output(output)?;

    let written = {
        let span = source.span().clone();
        let _entered = span.enter();
        decompress(source, BufWriter::new(drain))
            .wrap_err_with(|| format!("Failed to decompress {}", input.display()))?
    };
    info!(
        "{} Restored {} into {}",
        style("Success!").green().bold(),
        fmt_size(written as u64),
        output.display()
    );
    Ok(())
}

fn print_codes(summary: &CompressionSummary) {
    info!("{}", style("FREQUENCIES AND CODES:").bold());
    for (symbol, count) in summary.frequencies.iter() {
        let code = summary
            .code_table
            .get(symbol)
            .map(|code| code.to_string())
            .unwrap_or_default();
        info!(
            "{:>6}: {:>10} {}",
            std::ascii::escape_default(symbol).to_string(),
            count,
            style(code).cyan()
        );
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}
