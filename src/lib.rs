pub mod api;
pub mod config;
pub mod cost;
pub mod error;
pub mod job;
pub mod model;
pub mod optimizer;
pub mod stats;
pub mod synth;

pub use api::{evaluate, optimize};
pub use error::{ChangeoverError, CoResult};
pub use model::{AttributeConfig, AttributeStat, OptimizationResult, OptimizedOrder, Order};
pub use optimizer::{Objective, OptimizeOptions};
