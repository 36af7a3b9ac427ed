use std::cell::Cell;
use std::thread_local;
use derivative::Derivative;

/// Identifies a [crate::FlowGraph], so handles from one graph can't be used on another.
#[derive(Debug, Derivative)]
#[derivative(Clone, Copy, PartialEq, Eq)]
pub(crate) struct GraphUid(usize);

thread_local! {
    static GRAPH_UID: Cell<usize> = Cell::new(0);
    static SCOPE_UID: Cell<usize> = Cell::new(0);
}

impl GraphUid {
    pub(crate) fn next() -> GraphUid {
        GraphUid(bump(&GRAPH_UID))
    }
}

/// Next number for an anonymous isolation scope (unique per thread).
pub(crate) fn next_scope_number() -> usize {
    bump(&SCOPE_UID)
}

fn bump(key: &'static std::thread::LocalKey<Cell<usize>>) -> usize {
    key.with(|uid_cell| {
        let uid = uid_cell.get() + 1;
        uid_cell.set(uid);
        uid
    })
}
