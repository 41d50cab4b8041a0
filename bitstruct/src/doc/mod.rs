//! Documentation of concepts and example types.

pub mod example;
pub mod overview;
