#![forbid(unsafe_code)]

//! Property tests for [`CommandBindings`] and chord strings.
//!
//! Validates:
//! - After any bind/unbind sequence each command has at most one chord, and
//!   resolving that chord yields the command back.
//! - Release events never resolve.
//! - Lower-case chord strings in canonical modifier order parse to the chord
//!   they describe.

use std::collections::HashMap;

use proptest::prelude::*;

use retrace_core::{
    CommandBindings, HistoryCommand, KeyChord, KeyCode, KeyEvent, KeyEventKind, Modifiers,
};

// ============================================================================
// Strategy helpers
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Bind(HistoryCommand, KeyChord),
    Unbind(HistoryCommand),
}

fn command_strategy() -> impl Strategy<Value = HistoryCommand> {
    prop::sample::select(HistoryCommand::ALL.to_vec())
}

fn code_strategy() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        prop::char::range('a', 'z').prop_map(KeyCode::Char),
        (1u8..=24).prop_map(KeyCode::F),
        Just(KeyCode::Left),
        Just(KeyCode::Right),
        Just(KeyCode::Home),
        Just(KeyCode::PageDown),
        Just(KeyCode::Backspace),
    ]
}

fn chord_strategy() -> impl Strategy<Value = KeyChord> {
    (code_strategy(), 0u8..16).prop_map(|(code, bits)| {
        KeyChord::new(code, Modifiers::from_bits_truncate(bits))
    })
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (command_strategy(), chord_strategy()).prop_map(|(c, k)| Op::Bind(c, k)),
        1 => command_strategy().prop_map(Op::Unbind),
    ]
}

fn press(chord: KeyChord) -> KeyEvent {
    KeyEvent::new(chord.code).with_modifiers(chord.modifiers)
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn bindings_stay_one_to_one(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut bindings = CommandBindings::empty();
        let mut model: HashMap<HistoryCommand, KeyChord> = HashMap::new();

        for op in ops {
            match op {
                Op::Bind(cmd, chord) => {
                    bindings.bind(cmd, chord);
                    model.retain(|_, k| *k != chord);
                    model.insert(cmd, chord);
                }
                Op::Unbind(cmd) => {
                    prop_assert_eq!(bindings.unbind(cmd), model.remove(&cmd));
                }
            }
        }

        for cmd in HistoryCommand::ALL {
            prop_assert_eq!(bindings.chord_for(cmd), model.get(&cmd).copied());
            if let Some(chord) = model.get(&cmd) {
                prop_assert_eq!(bindings.resolve(&press(*chord)), Some(cmd));
            }
        }
    }

    #[test]
    fn release_never_resolves(chord in chord_strategy(), cmd in command_strategy()) {
        let mut bindings = CommandBindings::empty();
        bindings.bind(cmd, chord);
        let release = press(chord).with_kind(KeyEventKind::Release);
        prop_assert_eq!(bindings.resolve(&release), None);
        let repeat = press(chord).with_kind(KeyEventKind::Repeat);
        prop_assert_eq!(bindings.resolve(&repeat), Some(cmd));
    }

    #[test]
    fn canonical_chord_strings_parse(chord in chord_strategy()) {
        let text = chord.to_string();
        let parsed: KeyChord = text.parse().map_err(|e| TestCaseError::fail(format!("{text}: {e}")))?;
        prop_assert_eq!(parsed, chord);
        let shouted: KeyChord = text.to_ascii_uppercase().parse()
            .map_err(|e| TestCaseError::fail(format!("{text}: {e}")))?;
        prop_assert_eq!(shouted, chord);
    }
}
