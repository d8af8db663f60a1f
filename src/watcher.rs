use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use derivative::Derivative;
use crate::context::Tracking;
use crate::dep::{Dep, Observer};
use crate::dep_id::DepId;
use crate::path::Path;
use crate::value::{Object, Value, WeakObject};

/// Watches the value at a dotted path of an object, calling back with `(new, old)` whenever
/// any reactive property read while resolving the path is written.
///
/// The set of properties is found by resolving the path, not declared up front, so when an
/// intermediate object is replaced the watcher follows the new structure.
///
/// ## Limitations
///
/// - The watcher never unsubscribes. After `a` is replaced, writes to the *old* `a.b` still
///   re-run it (it then reads the new structure, so the callback sees the current value).
/// - There is no equality check: every write to a dependency calls back, even with an unchanged value.
/// - `old` is the value from the previous evaluation, since every update stores the new value.
///   The watcher doesn't keep reporting the value it was created with.
/// - The root is held weakly. Once every other handle to it is dropped the path resolves to `Undefined`.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Watcher {
    root: WeakObject,
    path: Path,
    #[derivative(Debug = "ignore")]
    callback: Box<dyn Fn(&Value, &Value)>,
    value: RefCell<Value>,
    dep_ids: RefCell<HashSet<DepId>>
}

impl Watcher {
    /// Create a watcher, evaluating the path once to get its initial value and dependencies.
    /// The callback isn't called until a dependency changes.
    pub fn new<F: Fn(&Value, &Value) + 'static>(root: &Object, path: impl Into<Path>, callback: F) -> Rc<Self> {
        let watcher = Rc::new(Watcher {
            root: root.downgrade(),
            path: path.into(),
            callback: Box::new(callback),
            value: RefCell::new(Value::Undefined),
            dep_ids: RefCell::new(HashSet::new())
        });
        let value = watcher.get();
        *watcher.value.borrow_mut() = value;
        watcher
    }

    /// The value from the latest evaluation
    pub fn value(&self) -> Value {
        self.value.borrow().clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of distinct deps this watcher is subscribed to, including stale ones
    pub fn dep_count(&self) -> usize {
        self.dep_ids.borrow().len()
    }

    /// Tracked evaluation: resolve the path while installed as the current observer.
    fn get(self: &Rc<Self>) -> Value {
        let _tracking = Tracking::install(Rc::clone(self) as Rc<dyn Observer>);
        match self.root.upgrade() {
            None => Value::Undefined,
            Some(root) => self.path.resolve(&Value::Object(root))
        }
    }

    fn run(self: &Rc<Self>) {
        let value = self.get();
        let old_value = self.value.replace(value.clone());
        (self.callback)(&value, &old_value);
    }
}

impl Observer for Watcher {
    fn add_dep(self: Rc<Self>, dep: &Rc<Dep>) {
        if self.dep_ids.borrow_mut().insert(dep.id()) {
            dep.add_sub(self);
        }
    }

    fn update(self: Rc<Self>) {
        self.run();
    }
}

/// Bind `on_change` to the value at `path`. The watcher lives as long as the deps it subscribed to.
///
/// `on_change` may be called with an unchanged value, so it should be idempotent.
pub fn create_binding<F: Fn(&Value, &Value) + 'static>(root: &Object, path: &str, on_change: F) {
    let _ = Watcher::new(root, path, on_change);
}
