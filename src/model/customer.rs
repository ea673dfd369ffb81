// src/model/customer.rs

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::model::random::RandomSource;
use crate::model::Tick;

/// Service durations are drawn uniformly from this range, in ticks.
pub const SERVICE_RANGE: RangeInclusive<u32> = 1..=5;

/// Sequential customer identifier. The first customer of a run is `#1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CustomerId(pub u64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A client standing in (or just removed from) the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub arrival_tick: Tick,
    pub service_duration: u32,
    /// Set when the customer leaves the line, served or dropped.
    pub wait_time: Option<Tick>,
}

impl Customer {
    /// Ticks spent in line as of `tick`.
    #[inline]
    pub fn waited_at(&self, tick: Tick) -> Tick {
        tick.saturating_sub(self.arrival_tick)
    }
}

/// Creates customers with run-scoped sequential IDs.
///
/// Each simulation owns its own factory, so independent runs never share an
/// identifier space.
#[derive(Debug, Clone)]
pub struct CustomerFactory {
    next_id: u64,
    service_range: RangeInclusive<u32>,
}

impl CustomerFactory {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            service_range: SERVICE_RANGE,
        }
    }

    /// Create the next customer, arriving at `tick`.
    pub fn create<R: RandomSource>(&mut self, tick: Tick, rng: &mut R) -> Customer {
        let id = CustomerId(self.next_id);
        self.next_id += 1;
        Customer {
            id,
            arrival_tick: tick,
            service_duration: rng.service_duration(self.service_range.clone()),
            wait_time: None,
        }
    }

    /// Number of customers created so far.
    pub fn issued(&self) -> u64 {
        self.next_id - 1
    }
}

impl Default for CustomerFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::random::{ScriptedSource, SimRng};

    #[test]
    fn ids_start_at_one_and_increase_by_one() {
        let mut factory = CustomerFactory::new();
        let mut rng = SimRng::new(1);
        let ids: Vec<u64> = (0..10).map(|t| factory.create(t, &mut rng).id.0).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(factory.issued(), 10);
    }

    #[test]
    fn independent_factories_do_not_share_ids() {
        let mut rng = SimRng::new(1);
        let mut a = CustomerFactory::new();
        let mut b = CustomerFactory::new();
        a.create(0, &mut rng);
        a.create(1, &mut rng);
        assert_eq!(b.create(0, &mut rng).id, CustomerId(1));
    }

    #[test]
    fn arrival_and_service_come_from_inputs() {
        let mut factory = CustomerFactory::new();
        let mut rng = ScriptedSource::constant(0.0, 4);
        let c = factory.create(17, &mut rng);
        assert_eq!(c.arrival_tick, 17);
        assert_eq!(c.service_duration, 4);
        assert_eq!(c.wait_time, None);
        assert_eq!(c.waited_at(20), 3);
    }

    #[test]
    fn display_uses_hash_prefix() {
        assert_eq!(CustomerId(12).to_string(), "#12");
    }
}
