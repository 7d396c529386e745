use anyhow::{bail, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use spamsum::{logging, util, FuzzyDigest};

#[derive(Parser)]
#[command(name = "spamsum", about = "Compute a context-triggered piecewise (fuzzy) hash")]
struct Cli {
    /// File to hash, or `-` for standard input
    input: PathBuf,
    /// Memory-map the file instead of streaming it
    #[arg(long)]
    mmap: bool,
    /// Read buffer size in bytes for streaming input
    #[arg(long, default_value_t = util::DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,
    /// Print only the digest, without the file name
    #[arg(long)]
    bare: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose, cli.log_json);

    if cli.buffer_size == 0 {
        bail!("--buffer-size must be greater than zero");
    }
    if cli.mmap && is_stdin(&cli.input) {
        bail!("--mmap cannot be used with standard input");
    }

    let input = cli.input.clone();
    let (mmap, buffer_size) = (cli.mmap, cli.buffer_size);

    let start = Instant::now();
    let digest: FuzzyDigest = tokio::task::spawn_blocking(move || {
        if is_stdin(&input) {
            util::hash_reader(std::io::stdin().lock(), buffer_size)
                .context("Failed to hash standard input")
        } else if mmap {
            util::hash_file_mmap(&input)
        } else {
            util::hash_file(&input, buffer_size)
        }
    })
    .await??;
    let elapsed = start.elapsed();

    info!(
        input = %cli.input.display(),
        block_size = digest.block_size,
        elapsed_ms = elapsed.as_millis() as u64,
        "hashed input"
    );

    if cli.bare {
        println!("{}", digest);
    } else {
        println!("{},\"{}\"", digest, cli.input.display());
    }

    Ok(())
}
