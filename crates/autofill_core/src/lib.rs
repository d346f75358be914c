//! Autofill core: pure state machine for the bookmark title autofill.
mod effect;
mod msg;
mod origin;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use origin::PageOrigin;
pub use state::{AutofillState, RequestId, TimerId, DEFAULT_DEBOUNCE};
pub use update::update;
pub use view_model::{AutofillView, Phase};
