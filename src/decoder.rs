use serde::{Deserialize, Serialize};

use crate::instructions::{Format, Kind, BRANCH_OPCODE};
use crate::operand::{decode_field, FIELD_MASK};
use crate::reg::Register;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub kind: Kind,
    pub ra: Register,
    /// Second register field; the base register for loads and stores.
    pub rb: Register,
    pub rc: Register,
    /// Sign-extended 19-bit offset or immediate.
    pub imm: i32,
}

pub trait Decoder {
    fn decode(&self, raw32: u32) -> Option<Decoded>;
}

/// Decoder for canonical words: unused fields must be zero.
pub struct WordDecoder;

impl WordDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WordDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for WordDecoder {
    fn decode(&self, raw32: u32) -> Option<Decoded> {
        fn reg(raw32: u32, shift: u32) -> Register {
            Register::ALL[((raw32 >> shift) & 0xF) as usize]
        }
        // low `bits` bits must be clear
        fn zero_below(raw32: u32, bits: u32) -> bool {
            raw32 & ((1u32 << bits) - 1) == 0
        }

        let opcode = (raw32 >> 27) as u8;
        let kind = if opcode == BRANCH_OPCODE {
            Kind::branch_from_condition(((raw32 >> 19) & 0xF) as u8)?
        } else {
            Kind::from_opcode(opcode)?
        };

        let ra = reg(raw32, 23);
        let rb = reg(raw32, 19);
        let rc = reg(raw32, 15);
        let imm = decode_field(raw32 & FIELD_MASK);
        let d = Decoded { kind, ra, rb, rc, imm };

        match kind.format() {
            Format::LoadStore | Format::RegImm => Some(Decoded { rc: Register::R0, ..d }),
            Format::Branch => Some(Decoded { rb: Register::R0, rc: Register::R0, ..d }),
            Format::RegTriple => zero_below(raw32, 15).then_some(Decoded { imm: 0, ..d }),
            Format::RegPair => zero_below(raw32, 19)
                .then_some(Decoded { rc: Register::R0, imm: 0, ..d }),
            Format::RegSingle => zero_below(raw32, 23).then_some(Decoded {
                rb: Register::R0,
                rc: Register::R0,
                imm: 0,
                ..d
            }),
            Format::NoOperand => zero_below(raw32, 27).then_some(Decoded {
                ra: Register::R0,
                rb: Register::R0,
                rc: Register::R0,
                imm: 0,
                ..d
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_condition_and_offset() {
        let dec = WordDecoder::new();
        // brnz r6, -3
        let raw = (19 << 27) | (6 << 23) | (1 << 19) | 0x7FFFD;
        let d = dec.decode(raw).unwrap();
        assert_eq!(d.kind, Kind::Brnz);
        assert_eq!(d.ra, Register::R6);
        assert_eq!(d.imm, -3);
    }

    #[test]
    fn condition_is_not_taken_from_the_offset() {
        let dec = WordDecoder::new();
        // brmi r3, 4
        let d = dec.decode((19 << 27) | (3 << 23) | (3 << 19) | 4).unwrap();
        assert_eq!(d.kind, Kind::Brmi);
        assert_eq!(d.ra, Register::R3);
        assert_eq!(d.imm, 4);
        // brzr r1, -1: offset's top bits are all ones
        let d = dec.decode((19 << 27) | (1 << 23) | 0x7FFFF).unwrap();
        assert_eq!(d.kind, Kind::Brzr);
        assert_eq!(d.imm, -1);
    }

    #[test]
    fn rejects_unknown_opcode_and_condition() {
        let dec = WordDecoder::new();
        assert!(dec.decode(30 << 27).is_none());
        assert!(dec.decode(31 << 27).is_none());
        assert!(dec.decode((19 << 27) | (0b0100 << 19)).is_none());
    }

    #[test]
    fn rejects_dirty_padding() {
        let dec = WordDecoder::new();
        assert!(dec.decode(0xD800_0001).is_none());
        assert!(dec.decode(0xE189_0001).is_none());
        assert!(dec.decode(0xE189_0000).is_some());
    }
}
