/// End-to-end translation tests: native events fired at the scripted host,
/// observed through the recording collaborator.
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::rc::Rc;
use touchline_core::{
    InputGate, LockTrigger, PointerTransition, TouchCategory, TouchConfig, TouchNormalizer,
};
use touchline_testing::prelude::*;

fn listening(pointers: PointerRecorder, config: TouchConfig) -> (Rc<TestNormalizer>, InputGate) {
    let gate = InputGate::new();
    let normalizer =
        TouchNormalizer::with_config(ScriptedHost::new(), pointers, gate.clone(), config);
    normalizer.start().unwrap();
    (normalizer, gate)
}

fn listening_default() -> (Rc<TestNormalizer>, InputGate) {
    listening(PointerRecorder::new(), TouchConfig::default())
}

fn fire(normalizer: &TestNormalizer, category: TouchCategory, ids: &[u32]) -> SyntheticEvent {
    let event = SyntheticEvent::with_ids(ids);
    normalizer.host().touch(category, &event).unwrap();
    event
}

#[test]
fn test_move_forwards_in_changed_order() {
    let (normalizer, _gate) = listening_default();

    let event = fire(&normalizer, TouchCategory::Move, &[10, 20, 30]);

    let log = normalizer.with_pointers(|p| p.transitions().to_vec());
    assert_eq!(
        log,
        vec![
            RecordedTransition {
                transition: PointerTransition::Update,
                touch_id: 10,
            },
            RecordedTransition {
                transition: PointerTransition::Update,
                touch_id: 20,
            },
            RecordedTransition {
                transition: PointerTransition::Update,
                touch_id: 30,
            },
        ]
    );
    assert_eq!(event.prevent_default_calls(), 1);
}

#[test]
fn test_begin_count_matches_ungated_start_contacts() {
    let (normalizer, gate) = listening_default();

    fire(&normalizer, TouchCategory::Start, &[1, 2]);
    gate.set_input_disabled(true);
    fire(&normalizer, TouchCategory::Start, &[3, 4, 5]);
    gate.set_input_disabled(false);
    fire(&normalizer, TouchCategory::Start, &[6]);
    fire(&normalizer, TouchCategory::Move, &[1, 2, 6]);
    normalizer.set_disabled(true);
    fire(&normalizer, TouchCategory::Start, &[7]);

    let begins = normalizer.with_pointers(|p| p.ids_for(PointerTransition::Begin));
    assert_eq!(begins, vec![1, 2, 6]);
}

#[test]
fn test_each_category_routes_to_its_transition() {
    let (normalizer, _gate) = listening_default();

    fire(&normalizer, TouchCategory::Start, &[1]);
    fire(&normalizer, TouchCategory::Move, &[1]);
    fire(&normalizer, TouchCategory::End, &[1]);
    fire(&normalizer, TouchCategory::Start, &[2]);
    fire(&normalizer, TouchCategory::Cancel, &[2]);
    fire(&normalizer, TouchCategory::Enter, &[3]);
    fire(&normalizer, TouchCategory::Leave, &[3]);

    let log = normalizer.with_pointers(|p| p.transitions().to_vec());
    let expected = [
        (PointerTransition::Begin, 1),
        (PointerTransition::Update, 1),
        (PointerTransition::End, 1),
        (PointerTransition::Begin, 2),
        (PointerTransition::End, 2),
    ];
    assert_eq!(log.len(), expected.len());
    for (recorded, (transition, id)) in log.iter().zip(expected) {
        assert_eq!(recorded.transition, transition);
        assert_eq!(recorded.touch_id, id);
    }
}

#[test]
fn test_gated_start_and_cancel_skip_collaborator_but_run_callback() {
    let closers: [fn(&InputGate); 2] = [
        |gate| gate.set_input_disabled(true),
        |gate| gate.set_touch_disabled(true),
    ];
    for close in closers {
        let (normalizer, gate) = listening_default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for category in [TouchCategory::Start, TouchCategory::Cancel] {
            let seen = seen.clone();
            normalizer.set_callback(category, move |_, _| seen.borrow_mut().push(category));
        }
        close(&gate);

        let start = fire(&normalizer, TouchCategory::Start, &[1]);
        let cancel = fire(&normalizer, TouchCategory::Cancel, &[1]);

        assert_eq!(*seen.borrow(), vec![TouchCategory::Start, TouchCategory::Cancel]);
        assert!(normalizer.with_pointers(|p| p.is_empty()));
        assert!(!start.default_prevented());
        assert!(!cancel.default_prevented());
    }
}

#[test]
fn test_gated_enter_skips_suppression() {
    let (normalizer, gate) = listening_default();

    let open = fire(&normalizer, TouchCategory::Enter, &[1]);
    gate.set_touch_disabled(true);
    let closed = fire(&normalizer, TouchCategory::Enter, &[1]);

    assert!(open.default_prevented());
    assert!(!closed.default_prevented());
    assert!(normalizer.with_pointers(|p| p.is_empty()));
}

#[test]
fn test_move_end_and_leave_ignore_gate() {
    let (normalizer, gate) = listening_default();
    gate.set_input_disabled(true);
    gate.set_touch_disabled(true);

    let moved = fire(&normalizer, TouchCategory::Move, &[1, 2]);
    let ended = fire(&normalizer, TouchCategory::End, &[2]);
    let left = fire(&normalizer, TouchCategory::Leave, &[1]);

    assert!(moved.default_prevented());
    assert!(ended.default_prevented());
    assert!(left.default_prevented());
    normalizer.with_pointers(|p| {
        assert_eq!(p.ids_for(PointerTransition::Update), vec![1, 2]);
        assert_eq!(p.ids_for(PointerTransition::End), vec![2]);
        assert_eq!(p.count(PointerTransition::Begin), 0);
    });
}

#[test]
fn test_disabled_flag_reads_local_gate() {
    let (normalizer, gate) = listening_default();

    normalizer.set_disabled(true);
    assert!(normalizer.disabled());
    assert!(gate.touch_disabled());
    assert!(!gate.input_disabled());

    gate.set_touch_disabled(false);
    assert!(!normalizer.disabled());
}

#[test]
fn test_document_move_only_suppresses() {
    let (normalizer, gate) = listening_default();
    let calls = Rc::new(Cell::new(0));
    for category in TouchCategory::ALL {
        let calls = calls.clone();
        normalizer.set_callback(category, move |_, _| calls.set(calls.get() + 1));
    }
    let locks = Rc::new(Cell::new(0));
    {
        let locks = locks.clone();
        normalizer.add_touch_lock(LockTrigger::Start, move |_| {
            locks.set(locks.get() + 1);
            false
        });
    }
    gate.set_input_disabled(true);

    let event = SyntheticEvent::with_ids(&[1, 2]);
    assert_eq!(normalizer.host().document_move(&event).unwrap(), 1);

    assert_eq!(event.prevent_default_calls(), 1);
    assert_eq!(calls.get(), 0);
    assert_eq!(locks.get(), 0);
    assert!(normalizer.with_pointers(|p| p.is_empty()));
    assert!(normalizer.last_event().is_none());
}

#[test]
fn test_document_move_ignores_prevent_default_setting() {
    let (normalizer, _gate) = listening(
        PointerRecorder::new(),
        TouchConfig::new().with_prevent_default(false),
    );

    let event = SyntheticEvent::with_ids(&[1]);
    normalizer.host().document_move(&event).unwrap();

    assert!(event.default_prevented());
}

#[test]
fn test_prevent_default_disabled_still_forwards() {
    let (normalizer, _gate) = listening(
        PointerRecorder::new(),
        TouchConfig::new().with_prevent_default(false),
    );

    let moved = fire(&normalizer, TouchCategory::Move, &[5]);
    let started = fire(&normalizer, TouchCategory::Start, &[6]);

    assert!(!moved.default_prevented());
    assert!(!started.default_prevented());
    normalizer.with_pointers(|p| {
        assert_eq!(p.ids_for(PointerTransition::Update), vec![5]);
        assert_eq!(p.ids_for(PointerTransition::Begin), vec![6]);
    });
}

#[test]
fn test_callbacks_receive_raw_event_before_forwarding() {
    let (normalizer, _gate) = listening_default();
    let observed = Rc::new(RefCell::new(None));
    {
        let observed = observed.clone();
        normalizer.set_callback(TouchCategory::Start, move |_, event: &SyntheticEvent| {
            *observed.borrow_mut() = Some((event.touches().len(), event.default_prevented()));
        });
    }

    fire(&normalizer, TouchCategory::Start, &[1, 2, 3]);

    // Callback ran before default suppression.
    assert_eq!(*observed.borrow(), Some((3, false)));
}

#[test]
fn test_callback_context_defaults_to_host_and_can_be_replaced() {
    let (normalizer, _gate) = listening_default();
    let labels = Rc::new(RefCell::new(Vec::new()));
    {
        let labels = labels.clone();
        normalizer.set_callback(TouchCategory::End, move |context, _| {
            let label = if context.is::<ScriptedHost>() {
                "host".to_string()
            } else {
                context
                    .downcast_ref::<String>()
                    .cloned()
                    .unwrap_or_else(|| "unknown".into())
            };
            labels.borrow_mut().push(label);
        });
    }

    fire(&normalizer, TouchCategory::End, &[1]);
    normalizer.set_callback_context(Rc::new(String::from("scene")));
    fire(&normalizer, TouchCategory::End, &[1]);
    normalizer.reset_callback_context();
    fire(&normalizer, TouchCategory::End, &[1]);

    assert_eq!(*labels.borrow(), vec!["host", "scene", "host"]);
}

#[test]
fn test_callback_may_close_gate_for_its_own_event() {
    let (normalizer, gate) = listening_default();
    {
        let gate = gate.clone();
        normalizer.set_callback(TouchCategory::Start, move |_, _| gate.set_input_disabled(true));
    }

    let event = fire(&normalizer, TouchCategory::Start, &[1]);

    assert!(!event.default_prevented());
    assert!(normalizer.with_pointers(|p| p.is_empty()));
}

#[test]
fn test_clear_callback() {
    let (normalizer, _gate) = listening_default();
    let calls = Rc::new(Cell::new(0));
    {
        let calls = calls.clone();
        normalizer.set_callback(TouchCategory::Move, move |_, _| calls.set(calls.get() + 1));
    }
    assert!(normalizer.has_callback(TouchCategory::Move));

    fire(&normalizer, TouchCategory::Move, &[1]);
    assert!(normalizer.clear_callback(TouchCategory::Move));
    fire(&normalizer, TouchCategory::Move, &[1]);

    assert_eq!(calls.get(), 1);
    assert!(!normalizer.clear_callback(TouchCategory::Move));
}

#[test]
fn test_collaborator_failure_stops_forwarding() {
    let (normalizer, _gate) = listening(
        PointerRecorder::failing_on(PointerTransition::Update, 2),
        TouchConfig::default(),
    );

    let event = SyntheticEvent::with_ids(&[1, 2, 3]);
    let err = normalizer
        .host()
        .touch(TouchCategory::Move, &event)
        .unwrap_err();

    assert_eq!(err.category(), TouchCategory::Move);
    assert_eq!(err.transition(), PointerTransition::Update);
    let source = err
        .source()
        .and_then(|source| source.downcast_ref::<RecorderError>())
        .cloned();
    assert_eq!(
        source,
        Some(RecorderError {
            transition: PointerTransition::Update,
            touch_id: 2
        })
    );
    assert_eq!(
        normalizer.with_pointers(|p| p.ids_for(PointerTransition::Update)),
        vec![1]
    );
    assert!(event.default_prevented());
}

#[test]
fn test_empty_changed_set_forwards_nothing() {
    let (normalizer, _gate) = listening_default();

    let event = SyntheticEvent::empty();
    normalizer.host().touch(TouchCategory::Start, &event).unwrap();

    assert!(event.default_prevented());
    assert!(normalizer.with_pointers(|p| p.is_empty()));
}

#[test]
fn test_touch_lock_released_when_callback_succeeds() {
    let (normalizer, _gate) = listening_default();
    let attempts = Rc::new(Cell::new(0));
    {
        let attempts = attempts.clone();
        normalizer.add_touch_lock(LockTrigger::Start, move |_| {
            attempts.set(attempts.get() + 1);
            attempts.get() == 2
        });
    }

    for _ in 0..3 {
        fire(&normalizer, TouchCategory::Start, &[1]);
    }

    assert_eq!(attempts.get(), 2);
    assert_eq!(normalizer.touch_lock_count(), 0);
}

#[test]
fn test_touch_locks_run_newest_first_even_when_gated() {
    let (normalizer, gate) = listening_default();
    let order = Rc::new(RefCell::new(Vec::new()));
    for name in ["first", "second"] {
        let order = order.clone();
        normalizer.add_touch_lock(LockTrigger::End, move |_| {
            order.borrow_mut().push(name);
            true
        });
    }
    {
        let order = order.clone();
        normalizer.add_touch_lock(LockTrigger::Start, move |_| {
            order.borrow_mut().push("start");
            true
        });
    }
    gate.set_input_disabled(true);

    fire(&normalizer, TouchCategory::Move, &[1]);
    fire(&normalizer, TouchCategory::End, &[1]);

    assert_eq!(*order.borrow(), vec!["second", "first"]);
    assert_eq!(normalizer.touch_lock_count(), 1);
}

#[test]
fn test_start_lock_runs_before_callback_while_gated() {
    let (normalizer, gate) = listening_default();
    let order = Rc::new(RefCell::new(Vec::new()));
    {
        let order = order.clone();
        normalizer.add_touch_lock(LockTrigger::Start, move |_| {
            order.borrow_mut().push("lock");
            true
        });
    }
    {
        let order = order.clone();
        normalizer.set_callback(TouchCategory::Start, move |_, _| {
            order.borrow_mut().push("callback")
        });
    }
    gate.set_input_disabled(true);

    let event = fire(&normalizer, TouchCategory::Start, &[1]);

    assert_eq!(*order.borrow(), vec!["lock", "callback"]);
    assert!(!event.default_prevented());
    assert_eq!(
        normalizer.with_pointers(|p| p.count(PointerTransition::Begin)),
        0
    );
    assert_eq!(normalizer.touch_lock_count(), 0);
}

#[test]
fn test_remove_touch_lock() {
    let (normalizer, _gate) = listening_default();
    let ran = Rc::new(Cell::new(false));
    let id = {
        let ran = ran.clone();
        normalizer.add_touch_lock(LockTrigger::Start, move |_| {
            ran.set(true);
            true
        })
    };

    assert!(normalizer.remove_touch_lock(id));
    assert!(!normalizer.remove_touch_lock(id));
    fire(&normalizer, TouchCategory::Start, &[1]);

    assert!(!ran.get());
}

#[test]
fn test_touch_lock_may_register_another() {
    let (normalizer, _gate) = listening_default();
    let weak = Rc::downgrade(&normalizer);
    normalizer.add_touch_lock(LockTrigger::Start, move |_| {
        if let Some(normalizer) = weak.upgrade() {
            normalizer.add_touch_lock(LockTrigger::End, |_| true);
        }
        true
    });

    fire(&normalizer, TouchCategory::Start, &[1]);

    assert_eq!(normalizer.touch_lock_count(), 1);
}

#[test]
fn test_last_event_recorded_per_config() {
    let (normalizer, _gate) = listening_default();
    assert!(normalizer.last_event().is_none());

    fire(&normalizer, TouchCategory::Leave, &[8, 9]);
    let last = normalizer.last_event().unwrap();
    assert_eq!(last.touches().len(), 2);

    let (quiet, _gate) = listening(
        PointerRecorder::new(),
        TouchConfig::new().with_record_last_event(false),
    );
    fire(&quiet, TouchCategory::Leave, &[8]);
    assert!(quiet.last_event().is_none());
}

#[test]
fn test_direct_dispatch_without_listeners() {
    let gate = InputGate::new();
    let normalizer =
        TouchNormalizer::new(ScriptedHost::without_touch(), PointerRecorder::new(), gate);

    normalizer
        .dispatch(TouchCategory::Start, &SyntheticEvent::with_ids(&[1]))
        .unwrap();
    let event = SyntheticEvent::with_ids(&[1]);
    normalizer.consume_touch_move(&event);

    assert_eq!(
        normalizer.with_pointers(|p| p.ids_for(PointerTransition::Begin)),
        vec![1]
    );
    assert!(event.default_prevented());
    assert!(normalizer.with_pointers(|p| p.count(PointerTransition::Update) == 0));
}
