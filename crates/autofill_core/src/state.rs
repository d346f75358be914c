use std::time::Duration;

use crate::view_model::{AutofillView, Phase};
use crate::PageOrigin;

pub type TimerId = u64;
pub type RequestId = u64;

/// Quiet period after the last keystroke before a suggestion is requested.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingTimer {
    id: TimerId,
    candidate: String,
}

/// State of one autofill controller, bound to one bookmark form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutofillState {
    page: PageOrigin,
    debounce: Duration,
    pending: Option<PendingTimer>,
    pasted: bool,
    in_flight: Option<RequestId>,
    name: Option<String>,
    last_timer_id: TimerId,
    last_request_id: RequestId,
}

impl AutofillState {
    pub fn new(page: PageOrigin) -> Self {
        Self::with_debounce(page, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(page: PageOrigin, debounce: Duration) -> Self {
        Self {
            page,
            debounce,
            pending: None,
            pasted: false,
            in_flight: None,
            name: None,
            last_timer_id: 0,
            last_request_id: 0,
        }
    }

    pub fn page(&self) -> &PageOrigin {
        &self.page
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn view(&self) -> AutofillView {
        let phase = if self.pending.is_some() {
            Phase::Pending
        } else if self.in_flight.is_some() {
            Phase::Requesting
        } else {
            Phase::Idle
        };
        AutofillView {
            phase,
            pending_candidate: self.pending.as_ref().map(|p| p.candidate.clone()),
            paste_suppression: self.pasted,
            in_flight: self.in_flight,
            name: self.name.clone(),
        }
    }

    /// Replaces any pending timer with a fresh one for `candidate`.
    ///
    /// Returns the cancelled timer id, if there was one, and the new id.
    pub(crate) fn arm_timer(&mut self, candidate: String) -> (Option<TimerId>, TimerId) {
        let cancelled = self.cancel_timer();
        self.last_timer_id += 1;
        let id = self.last_timer_id;
        self.pending = Some(PendingTimer { id, candidate });
        (cancelled, id)
    }

    pub(crate) fn cancel_timer(&mut self) -> Option<TimerId> {
        self.pending.take().map(|p| p.id)
    }

    /// Takes the captured candidate if `timer_id` is the armed timer.
    pub(crate) fn fire_timer(&mut self, timer_id: TimerId) -> Option<String> {
        match &self.pending {
            Some(pending) if pending.id == timer_id => self.pending.take().map(|p| p.candidate),
            _ => None,
        }
    }

    pub(crate) fn set_pasted(&mut self) {
        self.pasted = true;
    }

    /// Clears the paste flag, returning whether it was set.
    pub(crate) fn consume_pasted(&mut self) -> bool {
        std::mem::take(&mut self.pasted)
    }

    /// Issues a new request id; any earlier one becomes stale.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.in_flight = Some(self.last_request_id);
        self.last_request_id
    }

    /// Settles `request_id` if it is the latest issued request.
    pub(crate) fn finish_request(&mut self, request_id: RequestId) -> bool {
        if self.in_flight == Some(request_id) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }
}
