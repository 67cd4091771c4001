//! Price composition: line items, the engine and its configuration

pub mod breakdown;
pub mod calculator;
pub mod config;
pub mod contract;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod item;
pub mod log;
pub mod money;

// Re-export main types for cleaner imports
pub use breakdown::{CostBreakdown, SaleBreakdown};
pub use calculator::Calculator;
pub use engine::{Composition, Convergence, Solver, recompute};
pub use error::CompositionError;
pub use item::{LineItem, Operation};
