use std::time::Duration;

use crate::{RequestId, TimerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Schedule `Msg::DebounceElapsed(timer_id)` after `delay`.
    ArmTimer { timer_id: TimerId, delay: Duration },
    /// Drop a timer armed earlier; its fire would be ignored anyway.
    CancelTimer { timer_id: TimerId },
    /// Ask the title endpoint for a suggestion for `webpage`.
    FetchTitle {
        request_id: RequestId,
        webpage: String,
    },
    /// Overwrite the name field.
    SetName(String),
}
