use minisrc_rs::decoder::{Decoder, WordDecoder};
use minisrc_rs::disasm::fmt_decoded;
use minisrc_rs::{assemble, encode_line, AsmConfig};

#[test]
fn disasm_add_ldi() {
    let dec = WordDecoder::new();
    let d = dec.decode(0x1991_8000).unwrap();
    assert_eq!(fmt_decoded(&d), "add r3, r2, r3");

    let d = dec.decode(0x0900_0002).unwrap();
    assert_eq!(fmt_decoded(&d), "ldi r2, 2(r0)");
}

#[test]
fn disassembly_reassembles_to_the_same_word() {
    let img = assemble(include_str!("../demos/phase3.s")).unwrap();
    let dec = WordDecoder::new();
    let cfg = AsmConfig::default();
    for e in img.entries() {
        let d = dec.decode(e.word.0).unwrap_or_else(|| panic!("undecodable: {}", e.source));
        let text = fmt_decoded(&d);
        let again = encode_line(&text, &cfg).unwrap();
        assert_eq!(again.word, e.word, "{} -> {}", e.source, text);
    }
}
