//! Command runners behind the `markup` binary

pub mod compute;
pub mod defaults;
pub mod setup;
pub mod solve;
pub mod ui;
