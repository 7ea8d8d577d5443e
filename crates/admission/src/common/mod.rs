#[macro_use]
pub(crate) mod macros;

pub(crate) mod data_structures;
pub mod error;
pub(crate) mod utils;

pub use data_structures::{Map, Set};
