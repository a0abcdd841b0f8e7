use std::fmt;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),
    #[error("unknown register `{0}`")]
    UnknownRegister(String),
    #[error("malformed operand `{0}`")]
    MalformedOperand(String),
    #[error("`{mnemonic}` takes {expected} operand(s), found {found}")]
    ArityMismatch {
        mnemonic: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("displacement {value} does not fit in a 19-bit field")]
    DisplacementOutOfRange { value: i64 },
    #[error("malformed directive `{0}`")]
    MalformedDirective(String),
}

/// A rejected source line, 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub line: usize,
    pub source_text: String,
    pub error: AsmError,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.source_text, self.error)
    }
}

impl std::error::Error for LineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Every line rejected during one assembly run, in source order.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{} line(s) failed to assemble", .0.len())]
pub struct AsmErrors(pub Vec<LineError>);

impl AsmErrors {
    pub fn iter(&self) -> impl Iterator<Item = &LineError> {
        self.0.iter()
    }
}
