/*
 * This file is part of Envdash.
 *
 * Copyright (C) 2025 Envdash contributors
 *
 * Envdash is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Envdash is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Envdash. If not, see <https://www.gnu.org/licenses/>.
 */

//! Fixed-interval sensor polling.
//!
//! Each loop runs on its own worker thread and reports through a channel that
//! the UI thread drains. Ticks of one loop never overlap: the next request is
//! issued only after the previous one returned, and ticks missed while a slow
//! request was outstanding are not replayed.
//!
//! Every event is tagged with the generation of the loop that produced it.
//! Stopping or restarting bumps the live generation, so whatever a cancelled
//! loop still sends afterwards is dropped on receipt.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use serde_json::json;

use crate::error::Result;
use crate::logger::log_event;
use crate::source::{SensorSnapshot, SensorSource};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Request about to be issued
    Connecting,
    Snapshot(SensorSnapshot),
    /// Transport failure, bad status or unreadable body
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct PollEvent {
    pub generation: u64,
    pub outcome: PollOutcome,
}

/// Live loop. Dropping it disconnects the stop channel, which wakes the
/// worker out of its tick wait and ends the loop.
struct PollLoopHandle {
    generation: u64,
    _stop_tx: Sender<()>,
}

struct LiveGuard(Arc<AtomicUsize>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct SensorPoller {
    source: Arc<dyn SensorSource>,
    interval: Duration,
    next_generation: u64,
    handle: Option<PollLoopHandle>,
    events_tx: Sender<PollEvent>,
    events_rx: Receiver<PollEvent>,
    live_loops: Arc<AtomicUsize>,
}

impl SensorPoller {
    pub fn new(source: Arc<dyn SensorSource>, interval: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            source,
            interval,
            next_generation: 1,
            handle: None,
            events_tx,
            events_rx,
            live_loops: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Worker threads that have not exited yet, cancelled ones included
    pub fn live_loops(&self) -> usize {
        self.live_loops.load(Ordering::SeqCst)
    }

    /// Start polling: one request now, then one per interval.
    /// A loop that is already running is cancelled first.
    pub fn start(&mut self) -> Result<()> {
        self.stop();

        let generation = self.next_generation;
        self.next_generation += 1;

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let source = Arc::clone(&self.source);
        let events_tx = self.events_tx.clone();
        let interval = self.interval;

        self.live_loops.fetch_add(1, Ordering::SeqCst);
        let guard = LiveGuard(Arc::clone(&self.live_loops));

        thread::Builder::new()
            .name(format!("envdash-poll-{}", generation))
            .spawn(move || {
                let _guard = guard;
                run_loop(source.as_ref(), interval, generation, &stop_rx, &events_tx);
            })?;

        self.handle = Some(PollLoopHandle { generation, _stop_tx: stop_tx });
        log_event("poll_started", json!({
            "generation": generation,
            "interval_ms": interval.as_millis() as u64,
            "source": self.source.describe(),
        }));
        Ok(())
    }

    /// Cancel the running loop, if any. Nothing it sends afterwards is delivered.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            log_event("poll_stopped", json!({ "generation": handle.generation }));
        }
    }

    /// Pending outcomes of the live loop, oldest first. Events of cancelled
    /// loops are discarded.
    pub fn drain(&mut self) -> Vec<PollOutcome> {
        let live = self.handle.as_ref().map(|h| h.generation);
        let mut fresh = Vec::new();
        loop {
            match self.events_rx.try_recv() {
                Ok(event) => {
                    if Some(event.generation) == live {
                        fresh.push(event.outcome);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        fresh
    }
}

fn run_loop(
    source: &dyn SensorSource,
    interval: Duration,
    generation: u64,
    stop_rx: &Receiver<()>,
    events_tx: &Sender<PollEvent>,
) {
    let send = |outcome: PollOutcome| events_tx.send(PollEvent { generation, outcome }).is_ok();
    let mut next_tick = Instant::now();

    loop {
        if !matches!(stop_rx.try_recv(), Err(TryRecvError::Empty)) {
            break;
        }
        if !send(PollOutcome::Connecting) {
            break;
        }
        let outcome = match source.fetch() {
            Ok(snapshot) => PollOutcome::Snapshot(snapshot),
            Err(e) => PollOutcome::Failed(e.to_string()),
        };
        if !send(outcome) {
            break;
        }

        next_tick += interval;
        let now = Instant::now();
        if next_tick < now {
            next_tick = now;
        }
        match stop_rx.recv_timeout(next_tick - now) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
