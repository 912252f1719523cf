#![warn(rust_2018_idioms, missing_debug_implementations)]
mod domain;
mod engine;
mod io;
pub mod program;

pub use crate::domain::*;
pub use crate::engine::*;
pub use crate::io::*;
pub use crate::program::*;
