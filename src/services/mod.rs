// Service module exports

pub mod schedule;
pub mod session;
pub mod sync;
