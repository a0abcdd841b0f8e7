pub mod listing;
pub mod model;

pub use listing::{listing, LineOut};
pub use model::{load_readmemh, parse_readmemh, Image, Segment};
