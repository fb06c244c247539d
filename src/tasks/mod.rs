//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service operation.
//!
//! # Tasks
//! - Maintenance: pings the backend at a fixed interval, which drives the
//!   in-process sweep and doubles as a Redis health check

mod maintenance;

pub use maintenance::spawn_maintenance_task;
