use serde::Serialize;

use minisrc_rs::decoder::{Decoder, WordDecoder};
use minisrc_rs::disasm::fmt_decoded;

use crate::model::Image;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineOut {
    pub segment: String,
    pub address: u32,
    pub word: u32,
    pub text: String,
}

/// Disassembles every word of every segment, in segment order.
pub fn listing(img: &Image) -> Vec<LineOut> {
    let dec = WordDecoder::new();
    let mut out = Vec::new();
    for s in &img.segments {
        for (i, &word) in s.words.iter().enumerate() {
            let text = match dec.decode(word) {
                Some(d) => fmt_decoded(&d),
                None => format!(".word {word:#010x}"),
            };
            out.push(LineOut {
                segment: s.name.clone(),
                address: s.base.wrapping_add(i as u32),
                word,
                text,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_readmemh;
    use pretty_assertions::assert_eq;

    #[test]
    fn undecodable_words_fall_back_to_data() {
        let img = parse_readmemh("@4\nD8000000\nFFFFFFFF\n").unwrap();
        let lines: Vec<(u32, String)> = listing(&img).into_iter().map(|l| (l.address, l.text)).collect();
        assert_eq!(
            lines,
            vec![(4, "halt".to_string()), (5, ".word 0xffffffff".to_string())]
        );
    }
}
