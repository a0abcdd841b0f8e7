use crate::decoder::Decoded;
use crate::instructions::{Format, Kind};

/// Canonical source text; assembling it reproduces the decoded word.
pub fn fmt_decoded(d: &Decoded) -> String {
    let mn = d.kind.mnemonic();
    match d.kind.format() {
        Format::LoadStore if d.kind == Kind::St => format!("{mn} {}, {}", mem(d), d.ra),
        Format::LoadStore => format!("{mn} {}, {}", d.ra, mem(d)),
        Format::RegTriple => format!("{mn} {}, {}, {}", d.ra, d.rb, d.rc),
        Format::RegImm => format!("{mn} {}, {}, {}", d.ra, d.rb, d.imm),
        Format::RegPair => format!("{mn} {}, {}", d.ra, d.rb),
        Format::Branch => format!("{mn} {}, {}", d.ra, d.imm),
        Format::RegSingle => format!("{mn} {}", d.ra),
        Format::NoOperand => mn.to_string(),
    }
}

fn mem(d: &Decoded) -> String {
    format!("{}({})", d.imm, d.rb)
}
