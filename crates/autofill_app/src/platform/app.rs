use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use autofill_core::AutofillState;
use autofill_engine::{AutofillHandle, NameField, ReqwestTitleLookup};
use autofill_logging::{autofill_info, autofill_warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::config::ResolvedConfig;
use super::form::{parse_line, FormEvent, StdoutNameField};

pub async fn run_app(config: ResolvedConfig) -> anyhow::Result<()> {
    autofill_info!(
        "Bookmark form on {} using endpoint {}",
        config.page.url(),
        config.endpoint
    );

    let lookup = ReqwestTitleLookup::new(config.endpoint.clone(), config.lookup.clone())
        .context("failed to build title lookup client")?;
    let name_field: Arc<dyn NameField> = Arc::new(StdoutNameField);
    let state = AutofillState::with_debounce(config.page.clone(), config.debounce);
    let handle = AutofillHandle::spawn(state, Arc::new(lookup), name_field);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("failed to read from stdin")?
    {
        match parse_line(&line) {
            FormEvent::Input(value) => handle.url_input(value),
            FormEvent::Paste(text) => {
                // Pasting replaces the field, which then reports its new value.
                handle.url_pasted(text.clone());
                handle.url_input(text);
            }
            FormEvent::Quit => break,
        }
    }

    let limit = config.debounce + config.lookup.request_timeout + Duration::from_secs(1);
    settle(&handle, limit).await;
    handle.shutdown().await;
    Ok(())
}

/// Waits for a pending timer and lookup to play out before the form closes.
async fn settle(handle: &AutofillHandle, limit: Duration) {
    if tokio::time::timeout(limit, handle.wait_idle()).await.is_err() {
        autofill_warn!("Gave up waiting for the last suggestion after {:?}", limit);
    }
}
