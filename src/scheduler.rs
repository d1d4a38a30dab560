//! Fit scheduler - a single-slot request coalescer
//!
//! Every [`Scheduler::request`] made before the next turn boundary joins the
//! same pending slot and gets a clone of the same [`FitHandle`]. At the
//! boundary the owner takes the slot with [`Scheduler::begin`], runs one
//! computation and settles it with [`Scheduler::complete`]. A request made
//! while that computation runs opens a fresh slot for the following turn.
//!
//! Detaching cancels: the pending slot is abandoned and its handles stay
//! pending forever. Requests made while disabled get an already abandoned
//! handle.

use crate::dom::NodeId;
use crate::layout::{LayoutResult, SkipReason};
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// What one fit run did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitReport {
    /// Titles that received a new style
    pub applied: Vec<(NodeId, LayoutResult)>,
    /// Titles left untouched, with the reason
    pub skipped: Vec<(NodeId, SkipReason)>,
    /// Measurement or geometry failed; nothing was applied
    pub failed: bool,
    /// `no-font-fit` was set; nothing was measured
    pub suppressed: bool,
}

impl FitReport {
    pub fn failed() -> Self {
        FitReport {
            failed: true,
            ..Self::default()
        }
    }

    pub fn suppressed() -> Self {
        FitReport {
            suppressed: true,
            ..Self::default()
        }
    }

    /// Layout applied to a title in this run
    pub fn result_for(&self, id: NodeId) -> Option<&LayoutResult> {
        self.applied.iter().find(|(n, _)| *n == id).map(|(_, r)| r)
    }
}

#[derive(Default)]
struct HandleState {
    outcome: Option<FitReport>,
    abandoned: bool,
    wakers: Vec<Waker>,
}

/// Completion of the next fit
///
/// Clones observe the same completion. Resolves with the [`FitReport`] of the
/// run it was coalesced into; an abandoned handle never resolves.
#[derive(Clone, Default)]
pub struct FitHandle {
    state: Rc<RefCell<HandleState>>,
}

impl FitHandle {
    fn new() -> Self {
        Self::default()
    }

    fn abandoned() -> Self {
        let handle = Self::new();
        handle.state.borrow_mut().abandoned = true;
        handle
    }

    pub fn is_settled(&self) -> bool {
        self.state.borrow().outcome.is_some()
    }

    pub fn is_abandoned(&self) -> bool {
        self.state.borrow().abandoned
    }

    /// Report of the run, once settled
    pub fn report(&self) -> Option<FitReport> {
        self.state.borrow().outcome.clone()
    }

    /// Whether two handles wait on the same slot
    pub fn same_slot(&self, other: &FitHandle) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    fn settle(&self, report: FitReport) {
        let wakers = {
            let mut state = self.state.borrow_mut();
            if state.abandoned || state.outcome.is_some() {
                return;
            }
            state.outcome = Some(report);
            std::mem::take(&mut state.wakers)
        };
        for waker in wakers {
            waker.wake();
        }
    }

    fn abandon(&self) {
        let mut state = self.state.borrow_mut();
        state.abandoned = true;
        state.wakers.clear();
    }
}

impl Future for FitHandle {
    type Output = FitReport;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.borrow_mut();
        if let Some(report) = &state.outcome {
            return Poll::Ready(report.clone());
        }
        if !state.abandoned && !state.wakers.iter().any(|w| w.will_wake(cx.waker())) {
            state.wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}

impl std::fmt::Debug for FitHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("FitHandle")
            .field("settled", &state.outcome.is_some())
            .field("abandoned", &state.abandoned)
            .finish()
    }
}

/// Single-slot fit coalescer
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Option<FitHandle>,
    running: bool,
    enabled: bool,
    runs: usize,
}

impl Scheduler {
    /// Create a disabled scheduler; it accepts work once enabled
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stop accepting work and abandon the pending slot
    pub fn disable(&mut self) {
        self.enabled = false;
        self.cancel();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Ask for a fit at the next turn boundary
    pub fn request(&mut self) -> FitHandle {
        if !self.enabled {
            tracing::debug!("fit requested while detached");
            return FitHandle::abandoned();
        }
        if let Some(handle) = &self.pending {
            return handle.clone();
        }
        tracing::debug!(running = self.running, "fit scheduled");
        let handle = FitHandle::new();
        self.pending = Some(handle.clone());
        handle
    }

    /// Abandon the pending slot, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            tracing::debug!("pending fit abandoned");
            handle.abandon();
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of computations run so far
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Take the pending slot to run it. Returns `None` when there is nothing
    /// to do or a run is already in progress.
    pub fn begin(&mut self) -> Option<FitHandle> {
        if self.running || !self.enabled {
            return None;
        }
        let handle = self.pending.take()?;
        self.running = true;
        self.runs += 1;
        Some(handle)
    }

    /// Settle a slot taken by [`begin`](Scheduler::begin)
    pub fn complete(&mut self, handle: FitHandle, report: FitReport) {
        self.running = false;
        handle.settle(report);
    }
}
