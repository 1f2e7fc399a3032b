//! Unit tests over the public library surface

pub mod hub_propagation;
pub mod derived_figures;
