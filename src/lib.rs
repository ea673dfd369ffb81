//! Single-line, multi-server service counter simulation.
//!
//! Customers arrive at most one per tick, wait in one FIFO line, and give up
//! once they have waited five ticks without reaching a server. The engine
//! tracks who was served, who left, how long served customers waited, and how
//! long servers stood idle.

pub mod io;
pub mod model;
pub mod simulation;

pub use model::customer::{Customer, CustomerFactory, CustomerId};
pub use model::queues::{ClientQueue, DispatchOutcome, QueueStats, ABANDON_THRESHOLD};
pub use model::random::{RandomSource, ScriptedSource, SimRng};
pub use model::Tick;
pub use simulation::config::SimulationConfig;
pub use simulation::engine::{Simulation, SimulationSummary};
pub use simulation::error::{ConfigError, SimError, SimResult};
pub use simulation::observer::{NoopObserver, TickObserver};
