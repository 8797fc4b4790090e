#![forbid(unsafe_code)]

//! Deterministic replays of fixed operation scripts.

use retrace_harness::{Op, Session};

fn replay(entities: u32, script: &[Op]) -> Session {
    let mut s = Session::new(entities);
    for op in script {
        s.apply(*op);
        if let Err(violation) = s.check_invariants() {
            panic!("after {op}: {violation}");
        }
    }
    s
}

#[test]
fn browse_delete_and_return() {
    let s = replay(
        4,
        &[
            Op::Click(0),
            Op::Click(1),
            Op::Click(2),
            Op::Click(3),
            Op::Back,
            Op::Back,
            Op::Delete(0),
            Op::Back,
            Op::Forward,
        ],
    );
    // Back from 1 hit the deleted 0 and had nowhere older to go.
    assert_eq!(s.recorded(), vec![Some(1), Some(2), Some(3)]);
    assert_eq!(s.focused(), Some(2));
}

#[test]
fn deselect_then_back_restores_current() {
    let s = replay(3, &[Op::Click(0), Op::Click(1), Op::Deselect, Op::Back]);
    assert_eq!(s.focused(), Some(1));
    assert_eq!(s.recorded().len(), 2);
}

#[test]
fn clear_then_continue() {
    let s = replay(3, &[Op::Click(0), Op::Click(1), Op::Clear, Op::Click(2)]);
    assert_eq!(s.recorded(), vec![Some(2)]);
    assert_eq!(s.navigator().current_index(), Some(0));
}

#[test]
fn pair_selection_is_one_entry() {
    let s = replay(3, &[Op::ClickPair(0, 2), Op::Click(1), Op::Back]);
    assert_eq!(s.recorded(), vec![Some(0), Some(1)]);
    assert_eq!(
        retrace_core::HostFocus::selected_items(s.host()),
        vec![0, 2]
    );
}
