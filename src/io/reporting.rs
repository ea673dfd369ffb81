// src/io/reporting.rs

use std::io::{self, Write};

use serde::Serialize;

use crate::model::customer::Customer;
use crate::model::Tick;
use crate::simulation::engine::SimulationSummary;
use crate::simulation::error::SimResult;
use crate::simulation::observer::TickObserver;

/// Minute-by-minute trace of the shop, in the shop's own words.
///
/// Observer callbacks can't fail, so the first write error is kept and
/// handed back by [`ConsoleTrace::finish`]; later writes are skipped.
pub struct ConsoleTrace<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleTrace<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_fmt(text).and_then(|_| self.out.write_all(b"\n")) {
            self.error = Some(e);
        }
    }
}

impl<W: Write> TickObserver for ConsoleTrace<W> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.line(format_args!("Clock: {tick}"));
    }

    fn on_arrival(&mut self, _tick: Tick, customer: &Customer) {
        self.line(format_args!("     Client {} entered the line.", customer.id));
    }

    fn on_dropped(&mut self, _tick: Tick, customer: &Customer) {
        self.line(format_args!("     ! Client {} dropped out of line.", customer.id));
    }

    fn on_served(&mut self, _tick: Tick, server: usize, customer: &Customer) {
        self.line(format_args!(
            "     Client {} served by server #{}. They waited {} minute(s) in line, \
             and it takes {} minute(s) to serve them.",
            customer.id,
            server + 1,
            customer.wait_time.unwrap_or_default(),
            customer.service_duration
        ));
    }

    fn on_idle(&mut self, _tick: Tick, server: usize) {
        self.line(format_args!("     Server #{} is idle.", server + 1));
    }

    fn on_tick_end(&mut self, _tick: Tick, queue_len: usize) {
        self.line(format_args!("     Queue size: {queue_len}"));
    }
}

/// One CSV row per simulated tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickRecord {
    pub tick: Tick,
    pub arrivals: u32,
    pub served: u32,
    pub dropped: u32,
    pub idle_servers: u32,
    pub queue_len: usize,
}

/// Writes a [`TickRecord`] for every tick to any writer.
pub struct CsvTrace<W: Write> {
    writer: csv::Writer<W>,
    current: TickRecord,
    rows: usize,
    error: Option<csv::Error>,
}

impl<W: Write> CsvTrace<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(out),
            current: TickRecord::default(),
            rows: 0,
            error: None,
        }
    }

    /// Flush and return the number of rows written.
    pub fn finish(mut self) -> SimResult<usize> {
        if let Some(e) = self.error.take() {
            return Err(e.into());
        }
        self.writer.flush()?;
        Ok(self.rows)
    }
}

impl<W: Write> TickObserver for CsvTrace<W> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.current = TickRecord {
            tick,
            ..TickRecord::default()
        };
    }

    fn on_arrival(&mut self, _tick: Tick, _customer: &Customer) {
        self.current.arrivals += 1;
    }

    fn on_dropped(&mut self, _tick: Tick, _customer: &Customer) {
        self.current.dropped += 1;
    }

    fn on_served(&mut self, _tick: Tick, _server: usize, _customer: &Customer) {
        self.current.served += 1;
    }

    fn on_idle(&mut self, _tick: Tick, _server: usize) {
        self.current.idle_servers += 1;
    }

    fn on_tick_end(&mut self, _tick: Tick, queue_len: usize) {
        if self.error.is_some() {
            return;
        }
        self.current.queue_len = queue_len;
        match self.writer.serialize(&self.current) {
            Ok(()) => self.rows += 1,
            Err(e) => self.error = Some(e),
        }
    }
}

/// Print the end-of-day results block.
pub fn write_summary<W: Write>(out: &mut W, summary: &SimulationSummary) -> io::Result<()> {
    writeln!(out, "\nResults of Simulation:")?;
    writeln!(out, "     Clients who entered the shop: {}", summary.admitted)?;
    writeln!(out, "     Number of clients served: {}", summary.served)?;
    writeln!(out, "     Number of clients dropped out of line: {}", summary.dropped)?;
    match summary.average_wait {
        Some(avg) => writeln!(out, "     Average client wait time: {avg:.2} minutes")?,
        None => writeln!(out, "     Average client wait time: n/a (no clients served)")?,
    }
    writeln!(out, "     Total client wait time: {} minutes", summary.total_wait)?;
    writeln!(out, "     Total server idle time: {} minutes", summary.idle_ticks)?;
    writeln!(out, "     Final size of queue: {}", summary.final_queue_len)?;
    Ok(())
}
