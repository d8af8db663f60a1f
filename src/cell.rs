use std::cell::RefCell;
use std::rc::Rc;
use log::debug;
use crate::context;
use crate::dep::Dep;
use crate::observe::observe;
use crate::value::Value;

/// An instrumented property: reads subscribe the evaluating watcher, writes notify subscribers.
///
/// The dep is created with the cell and never replaced.
#[derive(Debug)]
pub(crate) struct ReactiveCell {
    value: RefCell<Value>,
    dep: Rc<Dep>
}

impl ReactiveCell {
    pub(crate) fn new(value: Value) -> Self {
        ReactiveCell {
            value: RefCell::new(value),
            dep: Rc::new(Dep::new())
        }
    }

    pub(crate) fn get(&self) -> Value {
        if let Some(target) = context::target() {
            target.add_dep(&self.dep);
        }
        self.peek()
    }

    pub(crate) fn peek(&self) -> Value {
        self.value.borrow().clone()
    }

    /// Replace the value and notify. There is no equality check, so writing the same value notifies too.
    pub(crate) fn set(&self, value: Value) {
        // Replacement objects must be reactive before watchers re-read through them
        observe(&value);
        let old_value = self.value.replace(value);
        debug!("value changed: {} --> {}", old_value, self.value.borrow());
        self.dep.notify();
    }

    pub(crate) fn dep(&self) -> &Rc<Dep> {
        &self.dep
    }
}
