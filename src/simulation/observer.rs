// src/simulation/observer.rs

use crate::model::customer::Customer;
use crate::model::Tick;

/// Callbacks invoked by [`Simulation::step`][crate::simulation::engine::Simulation::step]
/// as the tick unfolds.
///
/// Every method defaults to a no-op so implementors only override what they
/// report on. Server indices are zero-based.
pub trait TickObserver {
    fn on_tick_start(&mut self, _tick: Tick) {}

    fn on_arrival(&mut self, _tick: Tick, _customer: &Customer) {}

    fn on_dropped(&mut self, _tick: Tick, _customer: &Customer) {}

    fn on_served(&mut self, _tick: Tick, _server: usize, _customer: &Customer) {}

    fn on_idle(&mut self, _tick: Tick, _server: usize) {}

    /// Called after every server has been visited, with the line length.
    fn on_tick_end(&mut self, _tick: Tick, _queue_len: usize) {}
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl TickObserver for NoopObserver {}

impl<O: TickObserver> TickObserver for Option<O> {
    fn on_tick_start(&mut self, tick: Tick) {
        if let Some(o) = self {
            o.on_tick_start(tick);
        }
    }

    fn on_arrival(&mut self, tick: Tick, customer: &Customer) {
        if let Some(o) = self {
            o.on_arrival(tick, customer);
        }
    }

    fn on_dropped(&mut self, tick: Tick, customer: &Customer) {
        if let Some(o) = self {
            o.on_dropped(tick, customer);
        }
    }

    fn on_served(&mut self, tick: Tick, server: usize, customer: &Customer) {
        if let Some(o) = self {
            o.on_served(tick, server, customer);
        }
    }

    fn on_idle(&mut self, tick: Tick, server: usize) {
        if let Some(o) = self {
            o.on_idle(tick, server);
        }
    }

    fn on_tick_end(&mut self, tick: Tick, queue_len: usize) {
        if let Some(o) = self {
            o.on_tick_end(tick, queue_len);
        }
    }
}

/// Fan out to two observers, left first.
impl<A: TickObserver, B: TickObserver> TickObserver for (A, B) {
    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }

    fn on_arrival(&mut self, tick: Tick, customer: &Customer) {
        self.0.on_arrival(tick, customer);
        self.1.on_arrival(tick, customer);
    }

    fn on_dropped(&mut self, tick: Tick, customer: &Customer) {
        self.0.on_dropped(tick, customer);
        self.1.on_dropped(tick, customer);
    }

    fn on_served(&mut self, tick: Tick, server: usize, customer: &Customer) {
        self.0.on_served(tick, server, customer);
        self.1.on_served(tick, server, customer);
    }

    fn on_idle(&mut self, tick: Tick, server: usize) {
        self.0.on_idle(tick, server);
        self.1.on_idle(tick, server);
    }

    fn on_tick_end(&mut self, tick: Tick, queue_len: usize) {
        self.0.on_tick_end(tick, queue_len);
        self.1.on_tick_end(tick, queue_len);
    }
}
