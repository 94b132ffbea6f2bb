//! Output formatting modules

pub mod colors;
