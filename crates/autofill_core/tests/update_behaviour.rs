use std::sync::Once;
use std::time::Duration;

use autofill_core::{
    update, AutofillState, Effect, Msg, PageOrigin, Phase, DEFAULT_DEBOUNCE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(autofill_logging::initialize_for_tests);
}

fn new_state() -> AutofillState {
    AutofillState::new(PageOrigin::parse("https://mysite.test/bookmarks/new").unwrap())
}

fn input(state: AutofillState, value: &str) -> (AutofillState, Vec<Effect>) {
    update(state, Msg::UrlInput(value.to_string()))
}

fn paste(state: AutofillState, text: &str) -> (AutofillState, Vec<Effect>) {
    update(state, Msg::UrlPasted(text.to_string()))
}

fn fetch_title(request_id: u64, webpage: &str) -> Effect {
    Effect::FetchTitle {
        request_id,
        webpage: webpage.to_string(),
    }
}

#[test]
fn input_arms_debounce_timer() {
    init_logging();
    let (state, effects) = input(new_state(), "https://example.com/page");

    assert_eq!(
        effects,
        vec![Effect::ArmTimer {
            timer_id: 1,
            delay: DEFAULT_DEBOUNCE,
        }]
    );
    let view = state.view();
    assert_eq!(view.phase, Phase::Pending);
    assert_eq!(view.pending_candidate.as_deref(), Some("https://example.com/page"));
}

#[test]
fn each_keystroke_replaces_the_timer() {
    init_logging();
    let (state, _) = input(new_state(), "h");
    let (state, effects) = input(state, "ht");

    assert_eq!(
        effects,
        vec![
            Effect::CancelTimer { timer_id: 1 },
            Effect::ArmTimer {
                timer_id: 2,
                delay: DEFAULT_DEBOUNCE,
            },
        ]
    );

    // The replaced timer firing late must not trigger anything.
    let (state, effects) = update(state, Msg::DebounceElapsed(1));
    assert!(effects.is_empty());
    assert_eq!(state.view().phase, Phase::Pending);
    assert_eq!(state.view().pending_candidate.as_deref(), Some("ht"));
}

#[test]
fn timer_fire_requests_title_for_captured_value() {
    init_logging();
    let (state, _) = input(new_state(), "https://example.com/page");
    let (state, effects) = update(state, Msg::DebounceElapsed(1));

    assert_eq!(effects, vec![fetch_title(1, "https://example.com/page")]);
    let view = state.view();
    assert_eq!(view.phase, Phase::Requesting);
    assert_eq!(view.in_flight, Some(1));
    assert_eq!(view.pending_candidate, None);
}

#[test]
fn same_host_input_issues_no_request() {
    init_logging();
    let (state, _) = input(new_state(), "mysite.test/page");
    let (state, effects) = update(state, Msg::DebounceElapsed(1));

    assert!(effects.is_empty());
    assert_eq!(state.view().phase, Phase::Idle);

    let (state, _) = input(state, "https://mysite.test/elsewhere");
    let (state, effects) = update(state, Msg::DebounceElapsed(2));
    assert!(effects.is_empty());
    assert_eq!(state.view().in_flight, None);
}

#[test]
fn paste_requests_immediately_and_cancels_pending_timer() {
    init_logging();
    let (state, _) = input(new_state(), "https://typed.example/");
    let (state, effects) = paste(state, "http://other.test/x");

    assert_eq!(
        effects,
        vec![
            Effect::CancelTimer { timer_id: 1 },
            fetch_title(1, "http://other.test/x"),
        ]
    );
    let view = state.view();
    assert_eq!(view.phase, Phase::Requesting);
    assert!(view.paste_suppression);

    // A fire of the cancelled timer racing in is ignored and keeps the flag.
    let (state, effects) = update(state, Msg::DebounceElapsed(1));
    assert!(effects.is_empty());
    assert!(state.view().paste_suppression);
}

#[test]
fn paste_without_pending_timer_still_requests() {
    init_logging();
    let (_state, effects) = paste(new_state(), "http://other.test/x");
    assert_eq!(effects, vec![fetch_title(1, "http://other.test/x")]);
}

#[test]
fn paste_flag_suppresses_next_timer_fire_once() {
    init_logging();
    let (state, _) = paste(new_state(), "http://other.test/x");
    // The field's own input event follows the paste.
    let (state, _) = input(state, "http://other.test/x");
    let (state, effects) = update(state, Msg::DebounceElapsed(1));

    assert!(effects.is_empty());
    assert!(!state.view().paste_suppression);

    // The flag is consumed: the next cycle requests normally.
    let (state, _) = input(state, "http://other.test/y");
    let (_state, effects) = update(state, Msg::DebounceElapsed(2));
    assert_eq!(effects, vec![fetch_title(2, "http://other.test/y")]);
}

#[test]
fn invalid_paste_sets_flag_but_issues_no_request() {
    init_logging();
    let (state, effects) = paste(new_state(), "not a url at all");
    assert!(effects.is_empty());
    assert!(state.view().paste_suppression);
    assert_eq!(state.view().phase, Phase::Idle);
}

#[test]
fn successful_lookup_sets_name() {
    init_logging();
    let (state, _) = paste(new_state(), "https://example.com/page");
    let (state, effects) = update(
        state,
        Msg::TitleFetched {
            request_id: 1,
            title: Some("Example Page".to_string()),
        },
    );

    assert_eq!(effects, vec![Effect::SetName("Example Page".to_string())]);
    let view = state.view();
    assert_eq!(view.name.as_deref(), Some("Example Page"));
    assert_eq!(view.phase, Phase::Idle);
}

#[test]
fn title_is_assigned_verbatim() {
    init_logging();
    let (state, _) = paste(new_state(), "https://example.com/page");
    let (_state, effects) = update(
        state,
        Msg::TitleFetched {
            request_id: 1,
            title: Some("  Padded\n".to_string()),
        },
    );
    assert_eq!(effects, vec![Effect::SetName("  Padded\n".to_string())]);
}

#[test]
fn failed_lookup_is_silent() {
    init_logging();
    let (state, _) = paste(new_state(), "https://example.com/page");
    let (state, effects) = update(
        state,
        Msg::TitleFetched {
            request_id: 1,
            title: None,
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.view().name, None);
    assert_eq!(state.view().phase, Phase::Idle);
}

#[test]
fn stale_response_is_discarded() {
    init_logging();
    let (state, _) = paste(new_state(), "http://a.test/");
    let (state, _) = paste(state, "http://b.test/");
    assert_eq!(state.view().in_flight, Some(2));

    let (state, effects) = update(
        state,
        Msg::TitleFetched {
            request_id: 2,
            title: Some("B".to_string()),
        },
    );
    assert_eq!(effects, vec![Effect::SetName("B".to_string())]);

    let (state, effects) = update(
        state,
        Msg::TitleFetched {
            request_id: 1,
            title: Some("A".to_string()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().name.as_deref(), Some("B"));
}

#[test]
fn stale_response_before_latest_does_not_settle_request() {
    init_logging();
    let (state, _) = paste(new_state(), "http://a.test/");
    let (state, _) = paste(state, "http://b.test/");
    let (state, effects) = update(
        state,
        Msg::TitleFetched {
            request_id: 1,
            title: Some("A".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.view().in_flight, Some(2));
    assert_eq!(state.view().phase, Phase::Requesting);
}

#[test]
fn typing_during_request_returns_to_pending() {
    init_logging();
    let (state, _) = paste(new_state(), "http://a.test/");
    let (state, _) = input(state, "http://a.test/more");
    assert_eq!(state.view().phase, Phase::Pending);
    assert_eq!(state.view().in_flight, Some(1));
}

#[test]
fn custom_debounce_is_used_for_timers() {
    init_logging();
    let page = PageOrigin::parse("https://mysite.test/").unwrap();
    let state = AutofillState::with_debounce(page, Duration::from_millis(250));
    let (_state, effects) = input(state, "x");
    assert_eq!(
        effects,
        vec![Effect::ArmTimer {
            timer_id: 1,
            delay: Duration::from_millis(250),
        }]
    );
}
