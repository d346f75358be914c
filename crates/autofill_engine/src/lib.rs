//! Autofill engine: effect execution for the title autofill controller.
mod controller;
mod decode;
mod field;
mod lookup;
mod types;

pub use controller::AutofillHandle;
pub use decode::{decode_text, DecodedText};
pub use field::{NameField, SharedNameField};
pub use lookup::{
    encode_uri_component, short_title_url, LookupSettings, ReqwestTitleLookup, TitleLookup,
    SHORT_TITLE_PATH, WEBPAGE_PARAM,
};
pub use types::{FailureKind, LookupError};
