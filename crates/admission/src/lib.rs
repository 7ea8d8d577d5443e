//! Admission layer of a cluster resource scheduler: normalizes raw resource
//! asks to allocation increments, validates them against queue and cluster
//! label policy, and answers the partition predicates consulted on the
//! scheduling hot path.

#[macro_use]
pub mod common;

pub mod cluster;
pub mod config;
pub mod labels;
pub mod placement;
pub mod queue;
pub mod request;
pub mod resources;
pub mod usage;
pub mod validate;


pub use crate::common::{Map, Set};

// Priority: Bigger number -> Higher priority
pub type Priority = i32;

pub type Error = common::error::AdmissionError;
pub type Result<T> = std::result::Result<T, Error>;
