use leptos::*;
use std::cell::Cell;
use std::rc::Rc;

pub const DASHBOARD_POLL_MS: u32 = 30_000;
pub const NOTIFICATION_POLL_MS: u32 = 10_000;

#[derive(Debug, Default)]
struct GateState {
    in_flight: Cell<bool>,
    cancelled: Cell<bool>,
    generation: Cell<u64>,
}

impl GateState {
    fn issue(self: &Rc<Self>) -> PollTicket {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.in_flight.set(true);
        PollTicket {
            state: self.clone(),
            generation,
        }
    }
}

/// Serializes one polling loop: a tick is dropped while the previous request
/// is outstanding, and nothing is written back once the owner is torn down.
#[derive(Debug, Clone, Default)]
pub struct PollGate {
    state: Rc<GateState>,
}

impl PollGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self) -> Option<PollTicket> {
        if self.state.cancelled.get() || self.state.in_flight.get() {
            return None;
        }
        Some(self.state.issue())
    }

    /// Starts a request even while another is outstanding. The older
    /// ticket turns stale, so only the newest response is applied.
    pub fn begin_fresh(&self) -> Option<PollTicket> {
        if self.state.cancelled.get() {
            return None;
        }
        Some(self.state.issue())
    }

    /// Marks any outstanding request stale without starting a new one, and
    /// frees the gate for the next tick.
    pub fn invalidate(&self) {
        drop(self.state.issue());
    }

    pub fn cancel(&self) {
        self.state.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }

    pub fn is_in_flight(&self) -> bool {
        self.state.in_flight.get()
    }
}

/// Held for the duration of one request; releases the gate on drop.
#[derive(Debug)]
pub struct PollTicket {
    state: Rc<GateState>,
    generation: u64,
}

impl PollTicket {
    /// True once the gate is cancelled or a newer request superseded this one.
    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get() || self.state.generation.get() != self.generation
    }
}

impl Drop for PollTicket {
    fn drop(&mut self) {
        if self.state.generation.get() == self.generation {
            self.state.in_flight.set(false);
        }
    }
}

/// Runs `tick` every `interval_ms` until the owning reactive scope is
/// disposed. The gate is cancelled on cleanup so late responses are dropped.
pub fn use_interval(gate: PollGate, interval_ms: u32, tick: impl Fn() + 'static) {
    #[cfg(target_arch = "wasm32")]
    {
        // Dropped, and so cleared, together with the owning scope.
        let _interval = store_value(gloo_timers::callback::Interval::new(interval_ms, tick));
        on_cleanup(move || gate.cancel());
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (interval_ms, tick);
        on_cleanup(move || gate.cancel());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_ticks_are_skipped_until_ticket_dropped() {
        let gate = PollGate::new();
        let first = gate.try_begin().expect("first tick runs");
        assert!(gate.is_in_flight());
        assert!(gate.try_begin().is_none());
        drop(first);
        assert!(!gate.is_in_flight());
        assert!(gate.try_begin().is_some());
    }

    #[test]
    fn cancel_marks_outstanding_tickets_and_blocks_new_ones() {
        let gate = PollGate::new();
        let ticket = gate.try_begin().unwrap();
        assert!(!ticket.is_cancelled());
        gate.cancel();
        assert!(ticket.is_cancelled());
        drop(ticket);
        assert!(gate.try_begin().is_none());
    }

    #[test]
    fn fresh_request_supersedes_outstanding_one() {
        let gate = PollGate::new();
        let old = gate.try_begin().unwrap();
        let fresh = gate.begin_fresh().expect("fresh request always starts");
        assert!(old.is_cancelled());
        assert!(!fresh.is_cancelled());
        drop(old);
        assert!(gate.is_in_flight());
        drop(fresh);
        assert!(!gate.is_in_flight());
        gate.cancel();
        assert!(gate.begin_fresh().is_none());
    }

    #[test]
    fn invalidate_discards_outstanding_response() {
        let gate = PollGate::new();
        let outstanding = gate.try_begin().unwrap();
        gate.invalidate();
        assert!(outstanding.is_cancelled());
        assert!(!gate.is_in_flight());
        let next = gate.try_begin().expect("next tick runs");
        drop(outstanding);
        assert!(gate.is_in_flight());
        assert!(!next.is_cancelled());
    }

    #[test]
    fn clones_share_state() {
        let gate = PollGate::new();
        let other = gate.clone();
        let _ticket = gate.try_begin().unwrap();
        assert!(other.try_begin().is_none());
        other.cancel();
        assert!(gate.is_cancelled());
    }
}
