mod dialect;
mod like_pattern;

pub use dialect::*;
pub(crate) use like_pattern::*;
