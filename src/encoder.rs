use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::assembler::AsmConfig;
use crate::error::AsmError;
use crate::instructions::{Format, Kind};
use crate::operand::{parse_displaced, FIELD_BITS};
use crate::reg::Register;

/// One 32-bit instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(pub u32);

impl Word {
    pub fn opcode(self) -> u8 {
        (self.0 >> 27) as u8
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoded {
    pub kind: Kind,
    pub word: Word,
}

/// MSB-first field concatenation.
struct Fields {
    acc: u32,
    width: u32,
}

impl Fields {
    fn new(opcode: u8) -> Self {
        Self { acc: opcode as u32, width: 5 }
    }

    fn push(&mut self, value: u32, bits: u32) -> &mut Self {
        debug_assert!(value >> bits == 0, "{value:#x} wider than {bits} bits");
        self.acc = (self.acc << bits) | value;
        self.width += bits;
        self
    }

    fn reg(&mut self, r: Register) -> &mut Self {
        self.push(r.index() as u32, 4)
    }

    fn zeros(&mut self, bits: u32) -> &mut Self {
        self.push(0, bits)
    }

    fn word(&self) -> Word {
        debug_assert_eq!(self.width, 32);
        Word(self.acc)
    }
}

/// Splits a source line on runs of whitespace and commas.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn encode_line(line: &str, cfg: &AsmConfig) -> Result<Encoded, AsmError> {
    let tokens = tokenize(line);
    let (name, args) = tokens
        .split_first()
        .ok_or_else(|| AsmError::UnknownMnemonic(String::new()))?;
    let kind = Kind::parse(name)?;
    let word = encode(kind, args, cfg)?;
    Ok(Encoded { kind, word })
}

pub fn encode(kind: Kind, args: &[&str], cfg: &AsmConfig) -> Result<Word, AsmError> {
    let expected = kind.arity();
    if args.len() != expected {
        return Err(AsmError::ArityMismatch {
            mnemonic: kind.mnemonic(),
            expected,
            found: args.len(),
        });
    }
    let reg = |i: usize| Register::parse(args[i]);
    let disp = |i: usize| parse_displaced(args[i], cfg.range);

    let mut f = Fields::new(kind.opcode());
    match kind.format() {
        Format::LoadStore => {
            let (ra, d) = if kind == Kind::St {
                let d = disp(0)?;
                (reg(1)?, d)
            } else {
                (reg(0)?, disp(1)?)
            };
            f.reg(ra).reg(d.base).push(d.field, FIELD_BITS);
        }
        Format::RegTriple => {
            let (ra, rb, rc) = (reg(0)?, reg(1)?, reg(2)?);
            f.reg(ra).reg(rb).reg(rc).zeros(15);
        }
        Format::RegImm => {
            let (ra, rb, c) = (reg(0)?, reg(1)?, disp(2)?);
            f.reg(ra).reg(rb).push(c.field, FIELD_BITS);
        }
        Format::RegPair => {
            let (ra, rb) = (reg(0)?, reg(1)?);
            f.reg(ra).reg(rb).zeros(19);
        }
        Format::Branch => {
            let (ra, c) = (reg(0)?, disp(1)?);
            f.reg(ra);
            if kind == Kind::Brmi && cfg.legacy_brmi {
                // condition field left empty: only 28 bits are concatenated
                f.push(c.field, FIELD_BITS);
                trace!(word = %Word(f.acc), "legacy brmi");
                return Ok(Word(f.acc));
            }
            let cond = kind.condition().unwrap_or_default();
            f.push(cond as u32, 4).push(c.field, FIELD_BITS);
        }
        Format::RegSingle => {
            f.reg(reg(0)?).zeros(23);
        }
        Format::NoOperand => {
            f.zeros(27);
        }
    }
    let word = f.word();
    trace!(%kind, %word, "encoded");
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(line: &str) -> u32 {
        encode_line(line, &AsmConfig::default()).unwrap().word.0
    }

    #[test]
    fn tokenize_mixed_separators() {
        assert_eq!(tokenize("st $60(R1),R3"), vec!["st", "$60(R1)", "R3"]);
        assert_eq!(tokenize("  add\tr1 ,, r2 ,r3 "), vec!["add", "r1", "r2", "r3"]);
        assert!(tokenize(" , ").is_empty());
    }

    #[test]
    fn reference_words() {
        assert_eq!(enc("ldi R2, 2"), 0x0900_0002);
        assert_eq!(enc("xor R3, R1, R2"), 0xE189_0000);
        assert_eq!(enc("xori R4, R2, 1"), 0xEA10_0001);
        assert_eq!(enc("halt"), 0xD800_0000);
        assert_eq!(enc("nop"), 0xD000_0000);
    }

    #[test]
    fn store_swaps_operand_order() {
        // st $60(R1), R3 -> op 2, Ra=3, base=1, off=0x60
        assert_eq!(enc("st $60(R1), R3"), (2 << 27) | (3 << 23) | (1 << 19) | 0x60);
    }

    #[test]
    fn empty_line_has_no_mnemonic() {
        assert_eq!(
            encode_line("   ", &AsmConfig::default()),
            Err(AsmError::UnknownMnemonic(String::new()))
        );
    }

    #[test]
    fn word_display_is_upper_hex() {
        assert_eq!(Word(0xea10_0001).to_string(), "EA100001");
        assert_eq!(Word(0x2).to_string(), "00000002");
    }
}
