// src/model/mod.rs

pub mod customer;
pub mod queues;
pub mod random;

/// Simulated time, in ticks since the shop opened. One tick is one minute in
/// the reference setup.
pub type Tick = u64;
