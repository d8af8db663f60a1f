//! Reactive data binding: instrument an [Object] so that reading its properties is tracked and
//! writing them re-runs whatever read them.
//!
//! Call [observe] on your data once. Every property becomes a reactive cell with its own [Dep]
//! (subscriber list), recursively through nested objects.
//! Then create [Watcher]s on dotted paths. A watcher resolves its path while installed as the
//! thread's current observer, so every reactive property it reads subscribes it. When one of those
//! properties is written, the watcher re-resolves its path and calls back with the new and old value.
//!
//! Everything happens synchronously: by the time [Object::set] returns, every watcher which
//! depended on the property has re-run (and so have the watchers of anything *they* wrote).
//! There is no equality check, batching, or cycle detection, so a callback which writes
//! one of its own dependencies recurses until the stack overflows.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use mini_watch::{object, observe, Value, Watcher};
//!
//! let data = object! { "msg" => "hi" };
//! observe(&Value::from(data.clone()));
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let seen2 = Rc::clone(&seen);
//! let _watcher = Watcher::new(&data, "msg", move |new, old| {
//!     seen2.borrow_mut().push((new.to_string(), old.to_string()));
//! });
//! data.set("msg", "bye");
//! assert_eq!(&*seen.borrow(), &[("bye".to_string(), "hi".to_string())]);
//! ```
//!
//! [ViewModel] and [Compiler] bind `{{ path }}` interpolations in a small view tree
//! ([Node]) on top of this.

pub(crate) mod cell;
pub(crate) mod context;
pub(crate) mod dep;
pub(crate) mod dep_id;
pub(crate) mod error;
pub(crate) mod observe;
pub(crate) mod path;
pub(crate) mod value;
pub(crate) mod view;
pub(crate) mod vm;
pub(crate) mod watcher;

pub use context::is_tracking;
pub use dep::*;
pub use dep_id::*;
pub use error::*;
pub use observe::*;
pub use path::*;
pub use value::{Object, Value, WeakObject};
pub use view::{Compiler, Delimiters, Node, TextNode};
pub use vm::*;
pub use watcher::*;
