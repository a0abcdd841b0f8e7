pub mod assembler;
pub mod decoder;
pub mod disasm;
pub mod encoder;
pub mod error;
pub mod image;
pub mod instructions;
pub mod operand;
pub mod reg;
pub mod render;

pub use assembler::{assemble, AsmConfig, Assembler, Assembly};
pub use encoder::{encode, encode_line, Encoded, Word};
pub use error::{AsmError, AsmErrors, LineError};
pub use image::{Entry, MemoryImage, Record};
pub use instructions::{Format, Kind};
pub use reg::Register;
