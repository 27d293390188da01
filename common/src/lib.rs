//! Game state and wire protocol shared by the Connect Four client crates.

pub mod models;
pub mod protocol;
