use std::cell::Cell;
use std::fmt::{Display, Formatter};
use std::thread_local;
use derivative::Derivative;

/// Identifies a [Dep](crate::Dep). Only used so a watcher doesn't subscribe to the same dep twice,
/// the order of ids means nothing.
#[derive(Debug, Derivative)]
#[derivative(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepId(usize);

thread_local! {
    static DEP_ID: Cell<usize> = Cell::new(0);
}

impl DepId {
    pub(crate) fn next() -> DepId {
        DEP_ID.with(|id_cell| {
            let id = id_cell.get();
            id_cell.set(id + 1);
            DepId(id)
        })
    }
}

impl Display for DepId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
