use minisrc_rs::decoder::{Decoder, WordDecoder};
use minisrc_rs::{encode_line, AsmConfig, Kind, Register};

fn enc_with(line: &str, cfg: &AsmConfig) -> u32 {
    encode_line(line, cfg).unwrap().word.0
}

fn enc(line: &str) -> u32 {
    enc_with(line, &AsmConfig::default())
}

fn cond(word: u32) -> u32 {
    (word >> 19) & 0xF
}

#[test]
fn condition_codes() {
    assert_eq!(cond(enc("brzr R5, 8")), 0b0000);
    assert_eq!(cond(enc("brnz R6, -3")), 0b0001);
    assert_eq!(cond(enc("brpl R7, 2")), 0b0010);
    assert_eq!(cond(enc("brmi R3, 4")), 0b0011);
}

#[test]
fn branch_layout() {
    // brzr R5, 8: op 19 | Ra 5 | cond 0 | offset 8
    assert_eq!(enc("brzr R5, 8"), (19 << 27) | (5 << 23) | 8);
    // brnz R4, -9
    assert_eq!(enc("brnz R4, -9"), (19 << 27) | (4 << 23) | (1 << 19) | 0x7FFF7);
}

#[test]
fn branch_offset_base_suffix_is_discarded() {
    assert_eq!(enc("brpl R7, 2(R9)"), enc("brpl R7, 2"));
}

#[test]
fn all_branches_share_the_opcode() {
    for mn in ["brzr", "brnz", "brmi", "brpl"] {
        let w = enc(&format!("{mn} R1, 1"));
        assert_eq!(w >> 27, 19, "{mn}");
    }
}

#[test]
fn decoder_recovers_branch_kind() {
    let dec = WordDecoder::new();
    for (mn, kind) in [("brzr", Kind::Brzr), ("brnz", Kind::Brnz), ("brmi", Kind::Brmi), ("brpl", Kind::Brpl)] {
        let d = dec.decode(enc(&format!("{mn} R12, -100"))).unwrap();
        assert_eq!(d.kind, kind);
        assert_eq!(d.ra, Register::R12);
        assert_eq!(d.imm, -100);
    }
}

#[test]
fn legacy_brmi_leaves_condition_out() {
    let legacy = AsmConfig { legacy_brmi: true, ..AsmConfig::default() };
    // 5 + 4 + 19 = 28 bits, right-aligned
    assert_eq!(enc_with("brmi R3, 4", &legacy), (19 << 23) | (3 << 19) | 4);
    assert_eq!(enc_with("brmi R3, 4", &legacy), 0x0998_0004);
    // the other branches are unaffected
    assert_eq!(enc_with("brnz R3, 4", &legacy), enc("brnz R3, 4"));
}
