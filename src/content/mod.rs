//! Article body normalization for feed content fields.

mod normalize;

pub use normalize::{normalize, SEPARATOR, WRAP_WIDTH};
