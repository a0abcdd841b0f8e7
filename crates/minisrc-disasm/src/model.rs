use anyhow::{anyhow, Result};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub name: String,
    /// Word address of `words[0]`.
    pub base: u32,
    pub words: Vec<u32>,
}

impl Segment {
    pub fn end(&self) -> u32 {
        self.base.wrapping_add(self.words.len() as u32)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Image {
    pub segments: Vec<Segment>,
}

pub fn load_readmemh(path: &Path) -> Result<Image> {
    let text = std::fs::read_to_string(path)?;
    parse_readmemh(&text)
}

/// Parses `$readmemh` text: `@addr` starts a segment, `//` starts a comment.
pub fn parse_readmemh(text: &str) -> Result<Image> {
    let mut img = Image::default();
    for (i, line) in text.lines().enumerate() {
        let code = line.split("//").next().unwrap_or_default();
        for tok in code.split_whitespace() {
            if let Some(addr) = tok.strip_prefix('@') {
                let base = parse_hex(addr).ok_or_else(|| anyhow!("line {}: bad address `{tok}`", i + 1))?;
                let name = format!("segment{}", img.segments.len());
                img.segments.push(Segment { name, base, words: Vec::new() });
                continue;
            }
            let word = parse_hex(tok).ok_or_else(|| anyhow!("line {}: bad word `{tok}`", i + 1))?;
            if img.segments.is_empty() {
                img.segments.push(Segment { name: "segment0".into(), base: 0, words: Vec::new() });
            }
            if let Some(seg) = img.segments.last_mut() {
                seg.words.push(word);
            }
        }
    }
    img.segments.retain(|s| !s.words.is_empty());
    Ok(img)
}

fn parse_hex(s: &str) -> Option<u32> {
    let digits: String = s.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() {
        return None;
    }
    u32::from_str_radix(&digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_segments_and_comments() {
        let img = parse_readmemh("09000002 // ldi R2, 2\n@12C\n1EC5_0000\nA7800000 // jr R15\n").unwrap();
        assert_eq!(img.segments.len(), 2);
        assert_eq!(img.segments[0].base, 0);
        assert_eq!(img.segments[0].words, vec![0x0900_0002]);
        assert_eq!(img.segments[1].base, 0x12C);
        assert_eq!(img.segments[1].end(), 0x12E);
        assert_eq!(img.segments[1].words[1], 0xA780_0000);
    }

    #[test]
    fn empty_segments_are_dropped() {
        let img = parse_readmemh("@10\n@20\nD8000000\n").unwrap();
        assert_eq!(img.segments.len(), 1);
        assert_eq!(img.segments[0].base, 0x20);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_readmemh("xyz").is_err());
        assert!(parse_readmemh("@").is_err());
    }
}
