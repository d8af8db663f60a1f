//! The observer currently evaluating, which reactive reads subscribe.

use std::cell::RefCell;
use std::rc::Rc;
use std::thread_local;
use crate::dep::Observer;

thread_local! {
    static TARGET: RefCell<Option<Rc<dyn Observer>>> = RefCell::new(None);
}

/// The observer reads should subscribe, if any
pub(crate) fn target() -> Option<Rc<dyn Observer>> {
    TARGET.with(|target| target.borrow().clone())
}

/// Whether a watcher is evaluating on this thread right now
pub fn is_tracking() -> bool {
    TARGET.with(|target| target.borrow().is_some())
}

/// Installs an observer as the target until dropped, so the slot is restored even on unwind.
#[must_use]
pub(crate) struct Tracking {
    previous: Option<Rc<dyn Observer>>
}

impl Tracking {
    pub(crate) fn install(observer: Rc<dyn Observer>) -> Self {
        let previous = TARGET.with(|target| target.replace(Some(observer)));
        debug_assert!(previous.is_none(), "nested tracked evaluation");
        Tracking { previous }
    }
}

impl Drop for Tracking {
    fn drop(&mut self) {
        let previous = self.previous.take();
        TARGET.with(|target| *target.borrow_mut() = previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use crate::dep::Dep;

    #[derive(Debug)]
    struct Nobody;

    impl Observer for Nobody {
        fn add_dep(self: Rc<Self>, _dep: &Rc<Dep>) {}

        fn update(self: Rc<Self>) {}
    }

    #[test]
    fn test_install_and_restore() {
        assert!(!is_tracking());
        {
            let _tracking = Tracking::install(Rc::new(Nobody));
            assert!(is_tracking());
            assert!(target().is_some());
        }
        assert!(!is_tracking());
    }

    #[test]
    fn test_restored_on_unwind() {
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _tracking = Tracking::install(Rc::new(Nobody));
            assert!(is_tracking());
            panic!("evaluation failed");
        }));
        assert!(result.is_err());
        assert!(!is_tracking());
        assert!(target().is_none());
    }
}
