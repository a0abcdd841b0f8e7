use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AsmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Ld,
    Ldi,
    St,
    Add,
    Sub,
    And,
    Or,
    Shr,
    Shra,
    Shl,
    Ror,
    Rol,
    Addi,
    Andi,
    Ori,
    Mul,
    Div,
    Neg,
    Not,
    Brzr,
    Brnz,
    Brmi,
    Brpl,
    Jr,
    Jal,
    In,
    Out,
    Mfhi,
    Mflo,
    Nop,
    Halt,
    Xor,
    Xori,
}

/// Bit layout an instruction's operands are packed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    /// op | Ra | base | offset19
    LoadStore,
    /// op | Ra | Rb | Rc | 0(15)
    RegTriple,
    /// op | Ra | Rb | imm19
    RegImm,
    /// op | Ra | Rb | 0(19)
    RegPair,
    /// op | Ra | cond | offset19
    Branch,
    /// op | Ra | 0(23)
    RegSingle,
    /// op | 0(27)
    NoOperand,
}

impl Format {
    pub fn arity(self) -> usize {
        match self {
            Format::RegTriple | Format::RegImm => 3,
            Format::LoadStore | Format::RegPair | Format::Branch => 2,
            Format::RegSingle => 1,
            Format::NoOperand => 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub kind: Kind,
    pub mnemonic: &'static str,
    pub opcode: u8,
    pub format: Format,
}

const fn desc(kind: Kind, mnemonic: &'static str, opcode: u8, format: Format) -> InstrDesc {
    InstrDesc { kind, mnemonic, opcode, format }
}

/// Indexed by `Kind as usize`.
pub const TABLE: &[InstrDesc] = &[
    desc(Kind::Ld, "ld", 0, Format::LoadStore),
    desc(Kind::Ldi, "ldi", 1, Format::LoadStore),
    desc(Kind::St, "st", 2, Format::LoadStore),
    desc(Kind::Add, "add", 3, Format::RegTriple),
    desc(Kind::Sub, "sub", 4, Format::RegTriple),
    desc(Kind::And, "and", 5, Format::RegTriple),
    desc(Kind::Or, "or", 6, Format::RegTriple),
    desc(Kind::Shr, "shr", 7, Format::RegTriple),
    desc(Kind::Shra, "shra", 8, Format::RegTriple),
    desc(Kind::Shl, "shl", 9, Format::RegTriple),
    desc(Kind::Ror, "ror", 10, Format::RegTriple),
    desc(Kind::Rol, "rol", 11, Format::RegTriple),
    desc(Kind::Addi, "addi", 12, Format::RegImm),
    desc(Kind::Andi, "andi", 13, Format::RegImm),
    desc(Kind::Ori, "ori", 14, Format::RegImm),
    desc(Kind::Mul, "mul", 15, Format::RegPair),
    desc(Kind::Div, "div", 16, Format::RegPair),
    desc(Kind::Neg, "neg", 17, Format::RegPair),
    desc(Kind::Not, "not", 18, Format::RegPair),
    desc(Kind::Brzr, "brzr", 19, Format::Branch),
    desc(Kind::Brnz, "brnz", 19, Format::Branch),
    desc(Kind::Brmi, "brmi", 19, Format::Branch),
    desc(Kind::Brpl, "brpl", 19, Format::Branch),
    desc(Kind::Jr, "jr", 20, Format::RegSingle),
    desc(Kind::Jal, "jal", 21, Format::RegSingle),
    desc(Kind::In, "in", 22, Format::RegSingle),
    desc(Kind::Out, "out", 23, Format::RegSingle),
    desc(Kind::Mfhi, "mfhi", 24, Format::RegSingle),
    desc(Kind::Mflo, "mflo", 25, Format::RegSingle),
    desc(Kind::Nop, "nop", 26, Format::NoOperand),
    desc(Kind::Halt, "halt", 27, Format::NoOperand),
    desc(Kind::Xor, "xor", 28, Format::RegTriple),
    desc(Kind::Xori, "xori", 29, Format::RegImm),
];

pub const BRANCH_OPCODE: u8 = 19;

impl Kind {
    pub fn desc(self) -> &'static InstrDesc {
        &TABLE[self as usize]
    }

    pub fn mnemonic(self) -> &'static str {
        self.desc().mnemonic
    }

    pub fn opcode(self) -> u8 {
        self.desc().opcode
    }

    pub fn format(self) -> Format {
        self.desc().format
    }

    pub fn arity(self) -> usize {
        self.format().arity()
    }

    /// Case-insensitive mnemonic lookup.
    pub fn parse(s: &str) -> Result<Self, AsmError> {
        TABLE
            .iter()
            .find(|d| d.mnemonic.eq_ignore_ascii_case(s))
            .map(|d| d.kind)
            .ok_or_else(|| AsmError::UnknownMnemonic(s.to_string()))
    }

    /// Condition field of the branch family; `None` for everything else.
    pub fn condition(self) -> Option<u8> {
        match self {
            Kind::Brzr => Some(0b0000),
            Kind::Brnz => Some(0b0001),
            Kind::Brpl => Some(0b0010),
            Kind::Brmi => Some(0b0011),
            _ => None,
        }
    }

    pub fn from_opcode(opcode: u8) -> Option<Self> {
        if opcode == BRANCH_OPCODE {
            return None;
        }
        TABLE.iter().find(|d| d.opcode == opcode).map(|d| d.kind)
    }

    pub fn branch_from_condition(cond: u8) -> Option<Self> {
        match cond {
            0b0000 => Some(Kind::Brzr),
            0b0001 => Some(Kind::Brnz),
            0b0010 => Some(Kind::Brpl),
            0b0011 => Some(Kind::Brmi),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
