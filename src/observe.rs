use crate::cell::ReactiveCell;
use crate::value::{Object, Value};

/// Instrument an object so that every property is a reactive cell, recursing into nested objects first.
///
/// Non-objects (including arrays) are left alone. Objects which were already observed are skipped,
/// so calling this again, or on a self-referential object, is fine.
/// Properties added to an object after it's observed stay plain.
pub fn observe(value: &Value) {
    if let Value::Object(object) = value {
        observe_object(object);
    }
}

fn observe_object(object: &Object) {
    if !object.mark_observed() {
        return;
    }
    for key in object.keys() {
        define_reactive(object, &key);
    }
}

fn define_reactive(object: &Object, key: &str) {
    let Some(value) = object.plain_value(key) else {
        return;
    };
    observe(&value);
    object.make_reactive(key, ReactiveCell::new(value));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object;

    #[test]
    fn test_observe_recursive() {
        let inner = object! { "b" => 1 };
        let data = object! { "a" => inner.clone(), "c" => "str" };
        observe(&Value::from(data.clone()));

        assert!(data.is_observed());
        assert!(data.is_reactive("a"));
        assert!(data.is_reactive("c"));
        assert!(inner.is_observed());
        assert!(inner.is_reactive("b"));
        // in place, not a copy
        assert!(data.get("a").as_object().is_some_and(|a| a.ptr_eq(&inner)));
    }

    #[test]
    fn test_observe_non_object() {
        observe(&Value::from(1));
        observe(&Value::Undefined);
        observe(&Value::from(vec![Value::from(object! { "a" => 1 })]));
    }

    #[test]
    fn test_arrays_not_descended() {
        let elem = object! { "a" => 1 };
        let data = object! { "list" => vec![Value::from(elem.clone())] };
        observe(&Value::from(data.clone()));
        assert!(data.is_reactive("list"));
        assert!(!elem.is_observed());
        assert!(!elem.is_reactive("a"));
    }

    #[test]
    fn test_observe_twice_keeps_deps() {
        let data = object! { "a" => 1 };
        observe(&Value::from(data.clone()));
        let dep = data.dep("a").map(|dep| dep.id());
        observe(&Value::from(data.clone()));
        assert_eq!(data.dep("a").map(|dep| dep.id()), dep);
    }

    #[test]
    fn test_observe_self_referential() {
        let data = object! { "x" => 1 };
        data.set("me", data.clone());
        observe(&Value::from(data.clone()));
        assert!(data.is_reactive("me"));
        assert!(data.is_reactive("x"));
        // break the cycle so the test doesn't leak
        data.set("me", Value::Null);
    }

    #[test]
    fn test_late_keys_stay_plain() {
        let data = object! { "a" => 1 };
        observe(&Value::from(data.clone()));
        data.set("b", 2);
        assert!(!data.is_reactive("b"));
        assert_eq!(data.get("b"), Value::from(2));
    }
}
