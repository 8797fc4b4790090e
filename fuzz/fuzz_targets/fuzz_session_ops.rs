#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use retrace_harness::{Op, Session};

#[derive(Debug, Arbitrary)]
enum FuzzOp {
    Click(u8),
    ClickPair(u8, u8),
    Deselect,
    Delete(u8),
    Back,
    Forward,
    SelectIndex(u8),
    Clear,
    Prune,
}

impl From<FuzzOp> for Op {
    fn from(op: FuzzOp) -> Self {
        match op {
            FuzzOp::Click(i) => Op::Click(i.into()),
            FuzzOp::ClickPair(a, b) => Op::ClickPair(a.into(), b.into()),
            FuzzOp::Deselect => Op::Deselect,
            FuzzOp::Delete(i) => Op::Delete(i.into()),
            FuzzOp::Back => Op::Back,
            FuzzOp::Forward => Op::Forward,
            FuzzOp::SelectIndex(i) => Op::SelectIndex(i.into()),
            FuzzOp::Clear => Op::Clear,
            FuzzOp::Prune => Op::Prune,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Script {
    entities: u8,
    capacity: u8,
    ops: Vec<FuzzOp>,
}

fuzz_target!(|script: Script| {
    let entities = u32::from(script.entities % 32) + 1;
    let capacity = usize::from(script.capacity % 40);
    let mut session = Session::with_capacity(entities, capacity);

    for op in script.ops.into_iter().take(512) {
        let op = Op::from(op);
        session.apply(op);
        if let Err(violation) = session.check_invariants() {
            panic!("after {op}: {violation}");
        }
    }
});
