//! API request handlers

mod events;
mod health;
mod risks;
mod workflow;

pub use events::*;
pub use health::*;
pub use risks::*;
pub use workflow::*;
