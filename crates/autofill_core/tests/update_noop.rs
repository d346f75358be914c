use autofill_core::{update, AutofillState, Msg, PageOrigin};

#[test]
fn update_is_noop() {
    let state = AutofillState::new(PageOrigin::parse("https://mysite.test/").unwrap());
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
