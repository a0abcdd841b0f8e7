use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::encoder::{encode_line, tokenize};
use crate::error::{AsmError, AsmErrors, LineError};
use crate::image::{Entry, MemoryImage, Record};
use crate::operand::RangeMode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmConfig {
    /// Policy for displacements that do not fit in 19 bits.
    pub range: RangeMode,
    /// Emit `brmi` with an empty condition field (28-bit word), as the
    /// original instruction generator did.
    pub legacy_brmi: bool,
}

/// Result of one run: every line that assembled, plus every line that didn't.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub image: MemoryImage,
    pub errors: Vec<LineError>,
}

impl Assembly {
    pub fn into_result(self) -> Result<MemoryImage, AsmErrors> {
        if self.errors.is_empty() {
            Ok(self.image)
        } else {
            Err(AsmErrors(self.errors))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Assembler {
    cfg: AsmConfig,
}

impl Assembler {
    pub fn new(cfg: AsmConfig) -> Self {
        Self { cfg }
    }

    pub fn assemble(&self, source: &str) -> Assembly {
        let mut out = Assembly::default();
        // word address of the next instruction
        let mut counter: u32 = 0;

        for (idx, raw) in source.lines().enumerate() {
            let line = idx + 1;
            let text = strip_comment(raw).trim();
            if text.is_empty() {
                continue;
            }

            let result = match org_address(text) {
                Some(addr) => addr.map(|address| {
                    debug!(line, address, "org");
                    counter = address;
                    Record::Org { address, source: org_operand(text).to_string() }
                }),
                None => {
                    let address = counter;
                    counter = counter.wrapping_add(1);
                    encode_line(text, &self.cfg).map(|enc| {
                        debug!(line, address, word = %enc.word, kind = %enc.kind, "{text}");
                        Record::Word(Entry { address, word: enc.word, source: text.to_string() })
                    })
                }
            };

            match result {
                Ok(record) => out.image.push(record),
                Err(error) => {
                    warn!(line, %error, "{text}");
                    out.errors.push(LineError { line, source_text: text.to_string(), error });
                }
            }
        }
        out
    }
}

/// Assembles with the default configuration.
pub fn assemble(source: &str) -> Result<MemoryImage, AsmErrors> {
    Assembler::default().assemble(source).into_result()
}

fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(p) => &line[..p],
        None => line,
    }
}

/// `None` when the line is not an `ORG` directive.
fn org_address(text: &str) -> Option<Result<u32, AsmError>> {
    let tokens = tokenize(text);
    if !tokens.first()?.eq_ignore_ascii_case("org") {
        return None;
    }
    let bad = || AsmError::MalformedDirective(text.to_string());
    let parsed = match tokens.as_slice() {
        [_, addr] => parse_address(addr).ok_or_else(bad),
        _ => Err(bad()),
    };
    Some(parsed)
}

fn org_operand(text: &str) -> &str {
    tokenize(text).get(1).copied().unwrap_or_default()
}

/// `$hex` or decimal.
pub fn parse_address(s: &str) -> Option<u32> {
    let (digits, radix) = match s.strip_prefix('$') {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}
