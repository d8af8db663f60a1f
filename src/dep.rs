use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;
use derivative::Derivative;
use log::trace;
use crate::dep_id::DepId;

/// Something which can subscribe to a [Dep]: it's told which deps it reads while it evaluates,
/// and re-runs when one of them changes.
pub trait Observer: Debug {
    /// Called by a reactive read while this observer is the one evaluating.
    /// Implementations should subscribe with [Dep::add_sub] unless they already did.
    fn add_dep(self: Rc<Self>, dep: &Rc<Dep>);

    /// Called when a dep this observer subscribed to changes.
    fn update(self: Rc<Self>);
}

/// The subscriber list of one reactive property.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Dep {
    id: DepId,
    #[derivative(Debug = "ignore")]
    subs: RefCell<Vec<Rc<dyn Observer>>>
}

impl Dep {
    pub(crate) fn new() -> Self {
        Dep {
            id: DepId::next(),
            subs: RefCell::new(Vec::new())
        }
    }

    pub fn id(&self) -> DepId {
        self.id
    }

    /// Append a subscriber. This doesn't check for duplicates: adding the same observer twice
    /// means it gets updated twice per change.
    pub fn add_sub(&self, sub: Rc<dyn Observer>) {
        self.subs.borrow_mut().push(sub);
    }

    /// Update every subscriber in the order they subscribed.
    ///
    /// This is synchronous: each update runs to completion (including any writes it makes, and the
    /// notifications those cause) before the next subscriber is updated.
    /// Subscribers added while notifying aren't updated until the next notify.
    /// Nothing detects cycles, so an update which transitively writes this dep again recurses
    /// until the stack overflows.
    pub fn notify(&self) {
        let subs = self.subs.borrow().clone();
        trace!("dep {} notifying {} subscribers", self.id, subs.len());
        for sub in subs {
            sub.update();
        }
    }

    /// Number of subscriptions
    pub fn len(&self) -> usize {
        self.subs.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, Default)]
    struct Counter {
        updates: Cell<usize>
    }

    impl Observer for Counter {
        fn add_dep(self: Rc<Self>, dep: &Rc<Dep>) {
            dep.add_sub(self);
        }

        fn update(self: Rc<Self>) {
            self.updates.set(self.updates.get() + 1);
        }
    }

    #[test]
    fn test_notify_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));

        #[derive(Debug)]
        struct Named(&'static str, Rc<RefCell<Vec<&'static str>>>);
        impl Observer for Named {
            fn add_dep(self: Rc<Self>, dep: &Rc<Dep>) {
                dep.add_sub(self);
            }

            fn update(self: Rc<Self>) {
                self.1.borrow_mut().push(self.0);
            }
        }

        let dep = Rc::new(Dep::new());
        for name in ["first", "second", "third"] {
            Rc::new(Named(name, Rc::clone(&log))).add_dep(&dep);
        }
        dep.notify();
        assert_eq!(&*log.borrow(), &vec!["first", "second", "third"]);
    }

    #[test]
    fn test_no_dedup_in_dep() {
        let dep = Rc::new(Dep::new());
        let counter = Rc::new(Counter::default());
        Rc::clone(&counter).add_dep(&dep);
        Rc::clone(&counter).add_dep(&dep);
        assert_eq!(dep.len(), 2);
        dep.notify();
        assert_eq!(counter.updates.get(), 2);
    }

    #[test]
    fn test_subscribers_added_while_notifying_wait() {
        #[derive(Debug)]
        struct Recruiter {
            dep: Rc<Dep>,
            recruit: Rc<Counter>
        }
        impl Observer for Recruiter {
            fn add_dep(self: Rc<Self>, dep: &Rc<Dep>) {
                dep.add_sub(self);
            }

            fn update(self: Rc<Self>) {
                self.dep.add_sub(Rc::clone(&self.recruit) as Rc<dyn Observer>);
            }
        }

        let dep = Rc::new(Dep::new());
        let recruit = Rc::new(Counter::default());
        Rc::new(Recruiter { dep: Rc::clone(&dep), recruit: Rc::clone(&recruit) }).add_dep(&dep);

        dep.notify();
        assert_eq!(dep.len(), 2);
        assert_eq!(recruit.updates.get(), 0);

        // the next pass sees it (and the recruiter adds it again)
        dep.notify();
        assert_eq!(recruit.updates.get(), 1);
        assert_eq!(dep.len(), 3);
    }

    #[test]
    fn test_empty_notify() {
        let dep = Dep::new();
        assert!(dep.is_empty());
        dep.notify();
    }
}
