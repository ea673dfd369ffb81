// src/model/queues.rs

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, trace};

use crate::model::customer::{Customer, CustomerFactory};
use crate::model::random::RandomSource;
use crate::model::Tick;

/// A customer who has waited this many ticks by the time a server reaches
/// them has already left the line.
pub const ABANDON_THRESHOLD: Tick = 5;

/// Running totals kept by the queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct QueueStats {
    pub served: u64,
    pub dropped: u64,
    /// Sum of wait times over served customers only.
    pub total_wait: u64,
    /// One per (tick, server) pair where the server was free and the line empty.
    pub idle_ticks: u64,
}

impl QueueStats {
    /// Mean wait of served customers, `None` if nobody was served.
    pub fn average_wait(&self) -> Option<f64> {
        if self.served == 0 {
            None
        } else {
            Some(self.total_wait as f64 / self.served as f64)
        }
    }
}

/// What a single dispatch did.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    /// The server's new busy-until tick. Equal to the dispatch tick when
    /// nobody was served.
    pub busy_until: Tick,
    pub served: Option<Customer>,
    /// Stale customers removed ahead of the served one, in line order.
    pub dropped: Vec<Customer>,
}

/// The single FIFO line in front of the counter.
#[derive(Debug, Clone)]
pub struct ClientQueue {
    pending: VecDeque<Customer>,
    factory: CustomerFactory,
    arrival_rate: f64,
    stats: QueueStats,
}

impl ClientQueue {
    /// `arrival_rate` is the chance per tick that one customer joins the line.
    /// Rates above 1 are accepted and behave like 1.
    pub fn new(arrival_rate: f64) -> Self {
        Self {
            pending: VecDeque::new(),
            factory: CustomerFactory::new(),
            arrival_rate,
            stats: QueueStats::default(),
        }
    }

    pub fn arrival_rate(&self) -> f64 {
        self.arrival_rate
    }

    /// Give the line its one admission chance for `tick`.
    ///
    /// Returns the admitted customer, if any.
    pub fn offer_arrival<R: RandomSource>(&mut self, tick: Tick, rng: &mut R) -> Option<Customer> {
        if rng.unit() >= self.arrival_rate {
            return None;
        }
        let customer = self.factory.create(tick, rng);
        debug!(
            tick,
            customer = customer.id.0,
            service = customer.service_duration,
            "client entered the line"
        );
        self.pending.push_back(customer.clone());
        Some(customer)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn record_idle_tick(&mut self) {
        self.stats.idle_ticks += 1;
    }

    /// Hand the next customer to `server`, dropping anyone at the head who has
    /// waited [`ABANDON_THRESHOLD`] ticks or more.
    ///
    /// Drops and the eventual service happen in one call. If the line runs
    /// dry first, the server stays free and `busy_until == tick`.
    pub fn dispatch(&mut self, tick: Tick, server: usize) -> DispatchOutcome {
        let mut dropped = Vec::new();

        while let Some(mut customer) = self.pending.pop_front() {
            let wait = customer.waited_at(tick);
            customer.wait_time = Some(wait);

            if wait >= ABANDON_THRESHOLD {
                self.stats.dropped += 1;
                debug!(tick, customer = customer.id.0, wait, "client dropped out of line");
                dropped.push(customer);
                continue;
            }

            self.stats.served += 1;
            self.stats.total_wait += wait;
            let busy_until = tick + Tick::from(customer.service_duration);
            debug!(
                tick,
                server,
                customer = customer.id.0,
                wait,
                busy_until,
                "client served"
            );
            return DispatchOutcome {
                busy_until,
                served: Some(customer),
                dropped,
            };
        }

        trace!(tick, server, "line emptied before anyone was served");
        DispatchOutcome {
            busy_until: tick,
            served: None,
            dropped,
        }
    }

    pub fn stats(&self) -> QueueStats {
        self.stats
    }

    pub fn total_served(&self) -> u64 {
        self.stats.served
    }

    pub fn total_dropped(&self) -> u64 {
        self.stats.dropped
    }

    pub fn total_wait_time(&self) -> u64 {
        self.stats.total_wait
    }

    pub fn average_wait(&self) -> Option<f64> {
        self.stats.average_wait()
    }

    pub fn idle_tick_count(&self) -> u64 {
        self.stats.idle_ticks
    }

    /// Everyone who ever joined the line: served, dropped or still waiting.
    pub fn admitted(&self) -> u64 {
        self.stats.served + self.stats.dropped + self.pending.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::random::ScriptedSource;

    fn always_admit(service: u32) -> ScriptedSource {
        ScriptedSource::constant(0.0, service)
    }

    fn fill(queue: &mut ClientQueue, ticks: std::ops::Range<Tick>, rng: &mut ScriptedSource) {
        for t in ticks {
            assert!(queue.offer_arrival(t, rng).is_some());
        }
    }

    #[test]
    fn zero_rate_never_admits() {
        let mut queue = ClientQueue::new(0.0);
        let mut rng = always_admit(1);
        for t in 0..1_000 {
            assert!(queue.offer_arrival(t, &mut rng).is_none());
        }
        assert!(queue.is_empty());
        assert_eq!(queue.admitted(), 0);
    }

    #[test]
    fn draw_equal_to_rate_is_rejected() {
        let mut queue = ClientQueue::new(0.5);
        let mut rng = ScriptedSource::new(vec![0.5, 0.4999], vec![3]);
        assert!(queue.offer_arrival(0, &mut rng).is_none());
        assert!(queue.offer_arrival(1, &mut rng).is_some());
    }

    #[test]
    fn rate_above_one_admits_at_most_one_per_tick() {
        let mut queue = ClientQueue::new(7.5);
        let mut rng = ScriptedSource::new(vec![0.0, 0.3, 0.99], vec![2]);
        for t in 0..30 {
            queue.offer_arrival(t, &mut rng);
            assert_eq!(queue.len() as u64, t + 1);
        }
    }

    #[test]
    fn dispatch_serves_head_and_returns_busy_until() {
        let mut queue = ClientQueue::new(1.0);
        let mut rng = always_admit(3);
        fill(&mut queue, 0..2, &mut rng);

        let outcome = queue.dispatch(2, 0);
        let served = outcome.served.expect("head should be served");
        assert_eq!(served.id.0, 1);
        assert_eq!(served.wait_time, Some(2));
        assert_eq!(outcome.busy_until, 5);
        assert!(outcome.dropped.is_empty());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.total_wait_time(), 2);
    }

    #[test]
    fn wait_of_four_is_served_and_five_is_dropped() {
        let mut queue = ClientQueue::new(1.0);
        let mut rng = always_admit(1);
        fill(&mut queue, 0..2, &mut rng);

        // At tick 5 the first customer has waited 5, the second 4.
        let outcome = queue.dispatch(5, 0);
        assert_eq!(outcome.dropped.len(), 1);
        assert_eq!(outcome.dropped[0].wait_time, Some(5));
        let served = outcome.served.expect("second customer is within threshold");
        assert_eq!(served.wait_time, Some(4));
        assert_eq!(queue.total_dropped(), 1);
        assert_eq!(queue.total_served(), 1);
        assert_eq!(queue.total_wait_time(), 4);
    }

    #[test]
    fn single_dispatch_drains_all_stale_customers() {
        let mut queue = ClientQueue::new(1.0);
        let mut rng = always_admit(2);
        fill(&mut queue, 0..6, &mut rng);

        let outcome = queue.dispatch(20, 1);
        assert_eq!(outcome.busy_until, 20);
        assert!(outcome.served.is_none());
        assert_eq!(outcome.dropped.len(), 6);
        assert!(queue.is_empty());
        assert_eq!(queue.total_dropped(), 6);
        assert_eq!(queue.total_served(), 0);
        assert_eq!(queue.total_wait_time(), 0);
    }

    #[test]
    fn dispatch_on_empty_line_leaves_server_free() {
        let mut queue = ClientQueue::new(0.0);
        let outcome = queue.dispatch(9, 0);
        assert_eq!(outcome.busy_until, 9);
        assert!(outcome.served.is_none());
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn long_stale_line_drains_without_deep_recursion() {
        let mut queue = ClientQueue::new(1.0);
        let mut rng = always_admit(1);
        fill(&mut queue, 0..200_000, &mut rng);

        let outcome = queue.dispatch(1_000_000, 0);
        assert_eq!(outcome.dropped.len(), 200_000);
        assert!(queue.is_empty());
    }

    #[test]
    fn average_wait_is_undefined_until_someone_is_served() {
        let mut queue = ClientQueue::new(1.0);
        assert_eq!(queue.average_wait(), None);

        let mut rng = always_admit(1);
        fill(&mut queue, 0..3, &mut rng);
        queue.dispatch(1, 0);
        queue.dispatch(3, 0);
        assert_eq!(queue.average_wait(), Some(1.5));
    }

    #[test]
    fn idle_ticks_accumulate() {
        let mut queue = ClientQueue::new(0.0);
        for _ in 0..4 {
            queue.record_idle_tick();
        }
        assert_eq!(queue.idle_tick_count(), 4);
    }

    #[test]
    fn admitted_counts_every_state() {
        let mut queue = ClientQueue::new(1.0);
        let mut rng = always_admit(1);
        fill(&mut queue, 0..4, &mut rng);
        queue.dispatch(6, 0); // drops #1 (6) and #2 (5), serves #3 (4)
        assert_eq!(queue.total_dropped(), 2);
        assert_eq!(queue.total_served(), 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.admitted(), 4);
    }
}
