use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AsmError;

/// General purpose register. The discriminant is the 4-bit field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Register {
    #[default]
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
}

impl Register {
    pub const ALL: [Register; 16] = [
        Register::R0,
        Register::R1,
        Register::R2,
        Register::R3,
        Register::R4,
        Register::R5,
        Register::R6,
        Register::R7,
        Register::R8,
        Register::R9,
        Register::R10,
        Register::R11,
        Register::R12,
        Register::R13,
        Register::R14,
        Register::R15,
    ];

    /// Case-insensitive exact match on `r0`..`r15`.
    pub fn parse(s: &str) -> Result<Self, AsmError> {
        let unknown = || AsmError::UnknownRegister(s.to_string());
        let digits = s
            .strip_prefix('r')
            .or_else(|| s.strip_prefix('R'))
            .ok_or_else(unknown)?;
        // reject "r01", "r+1" and friends that u8::from_str would accept
        if digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
            || (digits.len() > 1 && digits.starts_with('0'))
        {
            return Err(unknown());
        }
        let idx: u8 = digits.parse().map_err(|_| unknown())?;
        Self::from_index(idx).ok_or_else(unknown)
    }

    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.index())
    }
}
