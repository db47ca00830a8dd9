//! A simple CLI to pack asset folders and to inspect or unpack the
//! resulting archives

use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use yep_asset_pack::pack_io::compiling::AssetPackCompiler;
use yep_asset_pack::pack_io::format::CompressionKind;
use yep_asset_pack::pack_io::reading::AssetPackReader;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pack an asset folder into an archive.
    Pack {
        /// Path to the folder containing the assets.
        #[arg(short, long)]
        assets: PathBuf,
        /// Path to the output pack file.
        #[arg(short, long)]
        out: PathBuf,
        /// Minimum file size in bytes before an entry is stored deflated.
        #[arg(long)]
        compression_threshold: Option<u64>,
    },
    /// Extract one entry of an archive.
    Extract {
        /// Path to the pack file.
        pack: PathBuf,
        /// Entry name relative to the packed root.
        name: String,
        /// Write the entry here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List the entries of an archive.
    List {
        /// Path to the pack file.
        pack: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    if let Err(err) = run(args.command) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Pack {
            assets,
            out,
            compression_threshold,
        } => {
            let mut compiler = AssetPackCompiler::new();
            if let Some(threshold) = compression_threshold {
                compiler.compression_threshold(threshold);
            }
            compiler.compile(assets, out)?;
        }
        Command::Extract { pack, name, out } => {
            let mut reader = AssetPackReader::new_from_path(pack)?;
            let bytes = reader.extract(&name)?;

            match out {
                Some(path) => std::fs::write(path, bytes)?,
                None => std::io::stdout().write_all(&bytes)?,
            }
        }
        Command::List { pack } => {
            let reader = AssetPackReader::new_from_path(&pack)?;

            println!(
                "{}: format v{}, {} entries",
                pack.display(),
                reader.version(),
                reader.entry_count()
            );
            for (name, header) in reader.entries() {
                match header.compression {
                    CompressionKind::Deflate => println!(
                        "  {name}  {} -> {} bytes (deflate)",
                        header.uncompressed_size, header.size
                    ),
                    CompressionKind::None => println!("  {name}  {} bytes", header.size),
                }
            }
        }
    }

    Ok(())
}
