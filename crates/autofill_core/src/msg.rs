#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The URL field changed; carries the whole current field value.
    UrlInput(String),
    /// Text was pasted into the URL field; carries the clipboard text.
    UrlPasted(String),
    /// A debounce timer fired.
    DebounceElapsed(crate::TimerId),
    /// A title lookup finished. `title` is `None` on any failure.
    TitleFetched {
        request_id: crate::RequestId,
        title: Option<String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
