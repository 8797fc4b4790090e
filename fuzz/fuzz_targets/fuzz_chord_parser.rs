#![no_main]

use libfuzzer_sys::fuzz_target;
use retrace_core::KeyChord;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(chord) = text.parse::<KeyChord>() {
        // Whatever parses must print to something that parses to the same chord.
        let printed = chord.to_string();
        let reparsed: KeyChord = printed.parse().expect("printed chord parses");
        assert_eq!(reparsed, chord, "{text:?} -> {printed:?}");
    }
});
