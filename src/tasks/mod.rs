//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service
//! operation.
//!
//! # Tasks
//! - Cache sweep: removes expired memory and durable cache entries at
//!   configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
