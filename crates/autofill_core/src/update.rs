use crate::{AutofillState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AutofillState, msg: Msg) -> (AutofillState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlInput(value) => {
            let (cancelled, timer_id) = state.arm_timer(value);
            let mut effects = Vec::with_capacity(2);
            if let Some(timer_id) = cancelled {
                effects.push(Effect::CancelTimer { timer_id });
            }
            effects.push(Effect::ArmTimer {
                timer_id,
                delay: state.debounce(),
            });
            effects
        }
        Msg::UrlPasted(text) => {
            state.set_pasted();
            let mut effects = Vec::with_capacity(2);
            if let Some(timer_id) = state.cancel_timer() {
                effects.push(Effect::CancelTimer { timer_id });
            }
            effects.extend(suggest(&mut state, text));
            effects
        }
        Msg::DebounceElapsed(timer_id) => {
            let Some(candidate) = state.fire_timer(timer_id) else {
                return (state, Vec::new());
            };
            // The paste that set the flag already asked for a suggestion.
            if state.consume_pasted() {
                Vec::new()
            } else {
                suggest(&mut state, candidate).into_iter().collect()
            }
        }
        Msg::TitleFetched { request_id, title } => {
            if !state.finish_request(request_id) {
                return (state, Vec::new());
            }
            match title {
                Some(title) => {
                    state.set_name(title.clone());
                    vec![Effect::SetName(title)]
                }
                None => Vec::new(),
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn suggest(state: &mut AutofillState, candidate: String) -> Option<Effect> {
    if !state.page().is_valid_url(&candidate) {
        return None;
    }
    let request_id = state.begin_request();
    Some(Effect::FetchTitle {
        request_id,
        webpage: candidate,
    })
}
