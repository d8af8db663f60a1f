use std::cell::{Cell, RefCell};
use std::fmt::{Debug, Display, Formatter};
use std::rc::{Rc, Weak};
use indexmap::IndexMap;
use crate::cell::ReactiveCell;
use crate::dep::Dep;

/// A dynamically-typed value stored in an [Object] property.
///
/// Objects are shared handles, so cloning a `Value::Object` aliases the same object
/// (and its reactive properties). Everything else is a plain value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Plain sequence. Its elements are never instrumented, replace the whole array to notify.
    Array(Vec<Value>),
    Object(Object),
}

/// Shared handle to a bag of named properties.
///
/// Before [observe](fn@crate::observe) every property is plain. Afterwards every property which existed
/// at that time is a reactive cell: reading it inside a tracked evaluation subscribes the evaluating
/// [Watcher](crate::Watcher), and writing it notifies every subscribed watcher.
/// Properties added after instrumentation stay plain.
#[derive(Clone)]
pub struct Object(Rc<ObjectData>);

/// Non-owning handle to an [Object]. Watchers hold their root this way.
#[derive(Clone)]
pub struct WeakObject(Weak<ObjectData>);

pub(crate) struct ObjectData {
    props: RefCell<IndexMap<String, Slot>>,
    observed: Cell<bool>
}

#[derive(Clone)]
pub(crate) enum Slot {
    Plain(Value),
    Reactive(Rc<ReactiveCell>)
}

impl Object {
    /// Create an empty, uninstrumented object
    pub fn new() -> Self {
        Object(Rc::new(ObjectData {
            props: RefCell::new(IndexMap::new()),
            observed: Cell::new(false)
        }))
    }

    /// Read a property. `Undefined` if it doesn't exist.
    ///
    /// If the property is reactive and a watcher is currently evaluating, the watcher subscribes to it.
    pub fn get(&self, key: &str) -> Value {
        // Clone the slot out so the map isn't borrowed while the cell registers its dep
        let slot = self.0.props.borrow().get(key).cloned();
        match slot {
            None => Value::Undefined,
            Some(Slot::Plain(value)) => value,
            Some(Slot::Reactive(cell)) => cell.get()
        }
    }

    /// Write a property.
    ///
    /// If the property is reactive, every subscribed watcher re-runs before this returns,
    /// even if `value` equals the old value. Otherwise the property is (re)defined as plain.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let cell = match self.0.props.borrow().get(&key) {
            Some(Slot::Reactive(cell)) => Some(Rc::clone(cell)),
            _ => None
        };
        match cell {
            Some(cell) => cell.set(value),
            None => {
                self.0.props.borrow_mut().insert(key, Slot::Plain(value));
            }
        }
    }

    /// Define a plain property, replacing whatever was there. Never notifies.
    ///
    /// Meant for building data before [observe](fn@crate::observe). On an observed object this
    /// replaces a reactive property with a plain one, and its watchers are no longer told about writes.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.props.borrow_mut().insert(key.into(), Slot::Plain(value.into()));
    }

    /// Property names in definition order
    pub fn keys(&self) -> Vec<String> {
        self.0.props.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.0.props.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.props.borrow().contains_key(key)
    }

    /// Whether the property exists and was instrumented
    pub fn is_reactive(&self, key: &str) -> bool {
        matches!(self.0.props.borrow().get(key), Some(Slot::Reactive(_)))
    }

    /// Whether [observe](fn@crate::observe) already ran on this object
    pub fn is_observed(&self) -> bool {
        self.0.observed.get()
    }

    /// The dep of a reactive property, which lists the watchers subscribed to it.
    pub fn dep(&self, key: &str) -> Option<Rc<Dep>> {
        match self.0.props.borrow().get(key) {
            Some(Slot::Reactive(cell)) => Some(Rc::clone(cell.dep())),
            _ => None
        }
    }

    /// Read a property without subscribing the current watcher
    pub fn peek(&self, key: &str) -> Value {
        match self.0.props.borrow().get(key) {
            None => Value::Undefined,
            Some(Slot::Plain(value)) => value.clone(),
            Some(Slot::Reactive(cell)) => cell.peek()
        }
    }

    pub fn downgrade(&self) -> WeakObject {
        WeakObject(Rc::downgrade(&self.0))
    }

    /// Whether both handles point to the same object
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Sets the observed mark. Returns `false` if it was already set.
    pub(crate) fn mark_observed(&self) -> bool {
        !self.0.observed.replace(true)
    }

    /// The value of a property if it's plain, `None` if it's missing or already reactive
    pub(crate) fn plain_value(&self, key: &str) -> Option<Value> {
        match self.0.props.borrow().get(key) {
            Some(Slot::Plain(value)) => Some(value.clone()),
            _ => None
        }
    }

    /// Replace a property with a reactive cell, keeping its position
    pub(crate) fn make_reactive(&self, key: &str, cell: ReactiveCell) {
        let mut props = self.0.props.borrow_mut();
        debug_assert!(props.contains_key(key), "make_reactive: no property {}", key);
        if let Some(slot) = props.get_mut(key) {
            *slot = Slot::Reactive(Rc::new(cell));
        }
    }
}

impl WeakObject {
    pub fn upgrade(&self) -> Option<Object> {
        self.0.upgrade().map(Object)
    }
}

impl Value {
    /// Read a property if this is an object, otherwise `Undefined`.
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Object(object) => object.get(key),
            _ => Value::Undefined
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(string) => Some(string),
            _ => None
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }
}

impl Default for Object {
    fn default() -> Self {
        Object::new()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<T: IntoIterator<Item=(K, V)>>(iter: T) -> Self {
        let object = Object::new();
        for (key, value) in iter {
            object.set(key, value);
        }
        object
    }
}

/// Create an [Object] with plain properties.
///
/// ```
/// use mini_watch::{object, Value};
///
/// let data = object! { "msg" => "hi", "nested" => object! { "count" => 1 } };
/// assert_eq!(data.get("nested").get("count"), Value::from(1));
/// ```
#[macro_export]
macro_rules! object {
    () => { $crate::Object::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let object = $crate::Object::new();
        $(object.set($key, $value);)+
        object
    }};
}

// region conversions

macro_rules! impl_from_number {
    ($($ty:ty)*) => {
        $(impl From<$ty> for Value {
            fn from(number: $ty) -> Self {
                Value::Number(number as f64)
            }
        })*
    }
}

impl_from_number!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize f32 f64);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(string: &str) -> Self {
        Value::String(string.to_owned())
    }
}

impl From<String> for Value {
    fn from(string: String) -> Self {
        Value::String(string)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<Vec<Value>> for Value {
    fn from(array: Vec<Value>) -> Self {
        Value::Array(array)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        match option {
            None => Value::Null,
            Some(value) => value.into()
        }
    }
}

// endregion

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(number) if number.is_nan() => write!(f, "NaN"),
            Value::Number(number) if number.is_infinite() => {
                write!(f, "{}", if *number > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // -0 prints as 0
            Value::Number(number) if *number == 0.0 => write!(f, "0"),
            Value::Number(number) => write!(f, "{}", number),
            Value::String(string) => write!(f, "{}", string),
            Value::Array(array) => {
                for (index, elem) in array.iter().enumerate() {
                    if index > 0 {
                        write!(f, ",")?;
                    }
                    match elem {
                        Value::Undefined | Value::Null => {}
                        elem => write!(f, "{}", elem)?
                    }
                }
                Ok(())
            }
            Value::Object(_) => write!(f, "[object Object]")
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "{:?}", b),
            Value::Number(number) => write!(f, "{:?}", number),
            Value::String(string) => write!(f, "{:?}", string),
            Value::Array(array) => f.debug_list().entries(array).finish(),
            Value::Object(object) => write!(f, "{:?}", object)
        }
    }
}

impl Debug for Object {
    /// Doesn't subscribe the current watcher. Self-referential objects will recurse forever.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let props = self.0.props.borrow();
        f.debug_map()
            .entries(props.iter().map(|(key, slot)| (key, match slot {
                Slot::Plain(value) => value.clone(),
                Slot::Reactive(cell) => cell.peek()
            })))
            .finish()
    }
}

impl Debug for WeakObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "WeakObject(alive = {})", self.0.strong_count() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(1).to_string(), "1");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(-0.0).to_string(), "0");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::from("hi").to_string(), "hi");
        assert_eq!(Value::from(vec![Value::from(1), Value::Null, Value::from("a")]).to_string(), "1,,a");
        assert_eq!(Value::from(Object::new()).to_string(), "[object Object]");
    }

    #[test]
    fn test_object_identity() {
        let a = Object::new();
        let b = Object::new();
        assert_eq!(Value::from(a.clone()), Value::from(a.clone()));
        assert_ne!(Value::from(a), Value::from(b));
        assert_ne!(Value::from(1), Value::from("1"));
        assert_eq!(Value::from(None::<i32>), Value::Null);
    }

    #[test]
    fn test_plain_properties() {
        let object = object! { "a" => 1, "b" => "two" };
        assert_eq!(object.keys(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(object.get("a"), Value::from(1));
        assert_eq!(object.get("missing"), Value::Undefined);
        assert!(!object.is_reactive("a"));
        assert!(object.dep("a").is_none());

        object.set("a", 3);
        object.set("c", true);
        assert_eq!(object.get("a"), Value::from(3));
        assert_eq!(object.keys(), vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(object.len(), 3);
    }

    #[test]
    fn test_insert_is_plain() {
        let object = Object::new();
        object.insert("a", 1);
        object.insert("b", "two");
        object.insert("a", 3);
        assert_eq!(object.keys(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(object.get("a"), Value::from(3));
        assert!(!object.is_reactive("a"));

        crate::observe(&Value::from(object.clone()));
        assert!(object.is_reactive("b"));
        let dep = object.dep("b");
        object.insert("b", 4);
        assert!(!object.is_reactive("b"));
        assert_eq!(object.get("b"), Value::from(4));
        assert!(dep.is_some_and(|dep| dep.is_empty()));
    }

    #[test]
    fn test_lookup_on_non_object() {
        assert_eq!(Value::from(1).get("a"), Value::Undefined);
        assert_eq!(Value::Undefined.get("a"), Value::Undefined);
        assert_eq!(Value::from("str").get("len"), Value::Undefined);
    }

    #[test]
    fn test_weak_root() {
        let object = object! { "a" => 1 };
        let weak = object.downgrade();
        assert!(weak.upgrade().is_some_and(|o| o.ptr_eq(&object)));
        drop(object);
        assert!(weak.upgrade().is_none());
    }
}
