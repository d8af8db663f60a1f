use std::rc::Rc;
use indexmap::IndexSet;
use crate::error::ViewModelError;
use crate::observe::observe;
use crate::path::Path;
use crate::value::{Object, Value};
use crate::view::{Compiler, Delimiters, Node};
use crate::watcher::Watcher;

/// How to build a [ViewModel]
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// The data to instrument
    pub data: Object,
    /// The view to bind, if any
    pub el: Option<Node>,
    pub delimiters: Delimiters
}

/// Data plus the view bound to it.
///
/// The view model proxies the data's top-level properties by name, so `vm.set("msg", ..)` is the
/// same as writing `msg` on the data (and re-renders any text bound to it).
#[derive(Debug)]
pub struct ViewModel {
    data: Object,
    el: Option<Node>,
    proxied: IndexSet<String>
}

impl ViewModel {
    /// Instrument `options.data`, then bind `options.el` to it.
    pub fn new(options: Options) -> Self {
        let Options { data, el, delimiters } = options;
        let proxied = data.keys().into_iter().collect::<IndexSet<_>>();
        observe(&Value::Object(data.clone()));
        if let Some(el) = &el {
            Compiler::new(delimiters).compile(el, &data);
        }
        ViewModel { data, el, proxied }
    }

    /// Read a proxied property
    pub fn get(&self, name: &str) -> Result<Value, ViewModelError> {
        self.check_proxied(name)?;
        Ok(self.data.get(name))
    }

    /// Write a proxied property, notifying its watchers
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<(), ViewModelError> {
        self.check_proxied(name)?;
        self.data.set(name, value);
        Ok(())
    }

    /// Names which [ViewModel::get] and [ViewModel::set] accept
    pub fn proxied(&self) -> impl Iterator<Item=&str> {
        self.proxied.iter().map(String::as_str)
    }

    /// Watch a path of the data
    pub fn watch<F: Fn(&Value, &Value) + 'static>(&self, path: impl Into<Path>, callback: F) -> Rc<Watcher> {
        Watcher::new(&self.data, path, callback)
    }

    pub fn data(&self) -> &Object {
        &self.data
    }

    pub fn el(&self) -> Option<&Node> {
        self.el.as_ref()
    }

    fn check_proxied(&self, name: &str) -> Result<(), ViewModelError> {
        if self.proxied.contains(name) {
            Ok(())
        } else {
            Err(ViewModelError::UnknownProperty(name.to_owned()))
        }
    }
}
