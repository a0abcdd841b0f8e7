use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use minisrc_disasm::{listing, load_readmemh};

#[derive(Parser, Debug)]
#[command(author, version, about = "Mini SRC disassembler CLI", long_about = None)]
struct Cli {
    /// Input `$readmemh` image
    #[arg(value_name = "HEXFILE")]
    input: PathBuf,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List segments (one per `@addr` run)
    Segments,
    /// Disassemble every word in the image
    List {
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ListFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let img = load_readmemh(&cli.input)?;
    debug!(segments = img.segments.len(), "loaded image");

    match cli.cmd {
        Command::Segments => {
            println!("{:<10} {:<10} {:<10} {:<6}", "name", "start", "end", "words");
            for s in &img.segments {
                println!("{:<10} {:#010x} {:#010x} {:<6}", s.name, s.base, s.end(), s.words.len());
            }
        }
        Command::List { format, out } => {
            let lines = listing(&img);
            let mut buf = String::new();
            match format {
                ListFormat::Json => {
                    buf = serde_json::to_string_pretty(&lines)?;
                    buf.push('\n');
                }
                ListFormat::Text => {
                    let mut seg = None;
                    for l in &lines {
                        if seg != Some(&l.segment) {
                            writeln!(buf, "{}:", l.segment)?;
                            seg = Some(&l.segment);
                        }
                        writeln!(buf, "  {:#010x}: {:08X}  {}", l.address, l.word, l.text)?;
                    }
                }
            }
            if let Some(path) = out {
                std::fs::write(path, buf)?;
            } else {
                print!("{buf}");
            }
        }
    }

    Ok(())
}
