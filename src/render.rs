use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::image::{MemoryImage, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `memory[N] = 32'hXXXXXXXX; // source` statements
    #[default]
    Verilog,
    /// `$readmemh` image with `@addr` jumps
    Readmemh,
    Json,
}

pub fn render(img: &MemoryImage, format: OutputFormat) -> Result<String> {
    let mut buf = String::new();
    match format {
        OutputFormat::Verilog => {
            for r in img.records() {
                match r {
                    Record::Org { source, .. } => writeln!(buf, "// ORG {source}")?,
                    Record::Word(e) => writeln!(
                        buf,
                        "memory[{}] = 32'h{}; // {}",
                        e.address, e.word, e.source
                    )?,
                }
            }
        }
        OutputFormat::Readmemh => {
            for (i, (start, run)) in img.segments().into_iter().enumerate() {
                if i > 0 || start != 0 {
                    writeln!(buf, "@{start:X}")?;
                }
                for e in run {
                    writeln!(buf, "{} // {}", e.word, e.source)?;
                }
            }
        }
        OutputFormat::Json => {
            buf = serde_json::to_string_pretty(img)?;
            buf.push('\n');
        }
    }
    Ok(buf)
}
