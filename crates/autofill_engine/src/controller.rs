use std::sync::Arc;

use autofill_core::{update, AutofillState, AutofillView, Effect, Msg, Phase, RequestId, TimerId};
use autofill_logging::{autofill_debug, autofill_info, autofill_trace};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::{NameField, TitleLookup};

enum ControllerCommand {
    Apply(Msg),
    /// Answered once every command queued before it has been applied.
    Sync(oneshot::Sender<()>),
    Shutdown,
}

/// Handle to a running autofill controller.
///
/// The controller task owns the [`AutofillState`] and applies messages one at
/// a time; timers and lookups run as separate tasks that report back through
/// the same queue. Dropping the handle stops the controller.
pub struct AutofillHandle {
    cmd_tx: mpsc::UnboundedSender<ControllerCommand>,
    view_rx: watch::Receiver<AutofillView>,
    task: Option<JoinHandle<()>>,
}

impl AutofillHandle {
    /// Starts the controller on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn(
        state: AutofillState,
        lookup: Arc<dyn TitleLookup>,
        name_field: Arc<dyn NameField>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(state.view());
        let runner = EffectRunner {
            cmd_tx: cmd_tx.clone(),
            lookup,
            name_field,
            timer: None,
        };
        let task = tokio::spawn(run_controller(state, runner, cmd_rx, view_tx));

        Self {
            cmd_tx,
            view_rx,
            task: Some(task),
        }
    }

    /// The URL field's value changed.
    pub fn url_input(&self, value: impl Into<String>) {
        self.send(Msg::UrlInput(value.into()));
    }

    /// Text was pasted into the URL field.
    pub fn url_pasted(&self, text: impl Into<String>) {
        self.send(Msg::UrlPasted(text.into()));
    }

    /// Latest view published by the controller.
    pub fn view(&self) -> AutofillView {
        self.view_rx.borrow().clone()
    }

    /// Receiver that is notified after every applied message.
    pub fn subscribe(&self) -> watch::Receiver<AutofillView> {
        self.view_rx.clone()
    }

    /// Resolves once everything sent so far is applied and no timer or
    /// lookup is outstanding.
    pub async fn wait_idle(&self) {
        let mut views = self.view_rx.clone();
        let (synced_tx, synced_rx) = oneshot::channel();
        if self.cmd_tx.send(ControllerCommand::Sync(synced_tx)).is_err() {
            return;
        }
        if synced_rx.await.is_err() {
            return;
        }
        let _ = views.wait_for(|view| view.phase == Phase::Idle).await;
    }

    /// Stops the controller and waits for its task to finish.
    pub async fn shutdown(mut self) {
        let _ = self.cmd_tx.send(ControllerCommand::Shutdown);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn send(&self, msg: Msg) {
        let _ = self.cmd_tx.send(ControllerCommand::Apply(msg));
    }
}

impl Drop for AutofillHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(ControllerCommand::Shutdown);
    }
}

async fn run_controller(
    mut state: AutofillState,
    mut runner: EffectRunner,
    mut cmd_rx: mpsc::UnboundedReceiver<ControllerCommand>,
    view_tx: watch::Sender<AutofillView>,
) {
    autofill_info!("Autofill controller started for page {}", state.page().url());
    while let Some(command) = cmd_rx.recv().await {
        let msg = match command {
            ControllerCommand::Apply(msg) => msg,
            ControllerCommand::Sync(synced_tx) => {
                let _ = synced_tx.send(());
                continue;
            }
            ControllerCommand::Shutdown => break,
        };
        autofill_trace!("Applying {:?}", msg);
        let (next, effects) = update(state, msg);
        state = next;
        for effect in effects {
            runner.execute(effect);
        }
        view_tx.send_replace(state.view());
    }
    runner.cancel_timer();
    autofill_info!("Autofill controller stopped");
}

struct EffectRunner {
    cmd_tx: mpsc::UnboundedSender<ControllerCommand>,
    lookup: Arc<dyn TitleLookup>,
    name_field: Arc<dyn NameField>,
    timer: Option<(TimerId, JoinHandle<()>)>,
}

impl EffectRunner {
    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::ArmTimer { timer_id, delay } => {
                self.cancel_timer();
                let cmd_tx = self.cmd_tx.clone();
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = cmd_tx.send(ControllerCommand::Apply(Msg::DebounceElapsed(timer_id)));
                });
                self.timer = Some((timer_id, handle));
            }
            Effect::CancelTimer { timer_id } => {
                if matches!(&self.timer, Some((armed, _)) if *armed == timer_id) {
                    self.cancel_timer();
                }
            }
            Effect::FetchTitle {
                request_id,
                webpage,
            } => {
                autofill_debug!("Checking {} (request {})", webpage, request_id);
                self.spawn_lookup(request_id, webpage);
            }
            Effect::SetName(title) => {
                autofill_info!("Suggested name: {}", title);
                self.name_field.set_name(&title);
            }
        }
    }

    fn spawn_lookup(&self, request_id: RequestId, webpage: String) {
        let lookup = self.lookup.clone();
        let cmd_tx = self.cmd_tx.clone();
        tokio::spawn(async move {
            let title = match lookup.lookup(&webpage).await {
                Ok(title) => Some(title),
                Err(err) => {
                    autofill_debug!("Lookup {} for {} failed: {}", request_id, webpage, err);
                    None
                }
            };
            let _ = cmd_tx.send(ControllerCommand::Apply(Msg::TitleFetched {
                request_id,
                title,
            }));
        });
    }

    fn cancel_timer(&mut self) {
        if let Some((_, handle)) = self.timer.take() {
            handle.abort();
        }
    }
}
