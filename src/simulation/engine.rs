// src/simulation/engine.rs

use serde::Serialize;
use tracing::{info, trace, warn};

use crate::model::queues::ClientQueue;
use crate::model::random::RandomSource;
use crate::model::Tick;
use crate::simulation::config::SimulationConfig;
use crate::simulation::error::SimResult;
use crate::simulation::observer::TickObserver;

/// End-of-run figures handed to the reporting layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub ticks_simulated: Tick,
    pub admitted: u64,
    pub served: u64,
    pub dropped: u64,
    /// `None` when nobody was served.
    pub average_wait: Option<f64>,
    pub total_wait: u64,
    pub idle_ticks: u64,
    pub final_queue_len: usize,
}

/// The shop: one line, `num_servers` counters, and a clock.
pub struct Simulation<R: RandomSource> {
    config: SimulationConfig,
    queue: ClientQueue,
    // Tick at which each server is free again. Free at `t` iff busy_until <= t.
    busy_until: Vec<Tick>,
    rng: R,
    next_tick: Tick,
}

impl<R: RandomSource> Simulation<R> {
    pub fn new(config: SimulationConfig, rng: R) -> SimResult<Self> {
        config.validate()?;

        let arrival_rate = config.arrival_rate();
        if arrival_rate > 1.0 {
            warn!(
                arrival_rate,
                "more clients per day than ticks; at most one arrives per tick"
            );
        }

        Ok(Self {
            queue: ClientQueue::new(arrival_rate),
            busy_until: vec![0; config.num_servers],
            config,
            rng,
            next_tick: 0,
        })
    }

    /// Run the remaining ticks of the day (or of the abbreviated window).
    pub fn run<O: TickObserver>(&mut self, observer: &mut O) -> SimulationSummary {
        let end = self.config.run_length();
        info!(
            servers = self.config.num_servers,
            ticks = end,
            arrival_rate = self.queue.arrival_rate(),
            "simulation started"
        );

        while self.next_tick < end {
            self.step(observer);
        }

        let summary = self.summary();
        info!(
            served = summary.served,
            dropped = summary.dropped,
            idle = summary.idle_ticks,
            "simulation finished"
        );
        summary
    }

    /// Advance one tick: one admission chance, then every server in order.
    ///
    /// Returns the tick that was simulated.
    pub fn step<O: TickObserver>(&mut self, observer: &mut O) -> Tick {
        let tick = self.next_tick;
        observer.on_tick_start(tick);

        if let Some(customer) = self.queue.offer_arrival(tick, &mut self.rng) {
            observer.on_arrival(tick, &customer);
        }

        for server in 0..self.busy_until.len() {
            if self.busy_until[server] > tick {
                continue;
            }

            if self.queue.is_empty() {
                self.queue.record_idle_tick();
                trace!(tick, server, "server idle");
                observer.on_idle(tick, server);
                continue;
            }

            let outcome = self.queue.dispatch(tick, server);
            for customer in &outcome.dropped {
                observer.on_dropped(tick, customer);
            }
            if let Some(customer) = &outcome.served {
                observer.on_served(tick, server, customer);
            }
            self.busy_until[server] = outcome.busy_until;
        }

        observer.on_tick_end(tick, self.queue.len());
        self.next_tick += 1;
        tick
    }

    pub fn summary(&self) -> SimulationSummary {
        let stats = self.queue.stats();
        SimulationSummary {
            ticks_simulated: self.next_tick,
            admitted: self.queue.admitted(),
            served: stats.served,
            dropped: stats.dropped,
            average_wait: stats.average_wait(),
            total_wait: stats.total_wait,
            idle_ticks: stats.idle_ticks,
            final_queue_len: self.queue.len(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn queue(&self) -> &ClientQueue {
        &self.queue
    }

    pub fn busy_until(&self) -> &[Tick] {
        &self.busy_until
    }

    /// The next tick `step` will simulate.
    pub fn current_tick(&self) -> Tick {
        self.next_tick
    }
}
