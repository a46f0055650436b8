mod specification_builder;

pub use specification_builder::*;
