use crate::RequestId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// A debounce timer is armed.
    Pending,
    /// A lookup is outstanding and no timer is armed.
    Requesting,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AutofillView {
    pub phase: Phase,
    pub pending_candidate: Option<String>,
    pub paste_suppression: bool,
    pub in_flight: Option<RequestId>,
    pub name: Option<String>,
}
