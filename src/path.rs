use std::fmt::{Display, Formatter};
use crate::value::Value;

/// A dotted property path like `a.b.c`, split into segments once.
///
/// Segments are taken literally: `a..b` has an empty middle segment, which resolves to `Undefined`
/// unless the object actually has a property named `""`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(Vec<String>);

impl Path {
    pub fn parse(expr: &str) -> Self {
        Path(expr.split('.').map(str::to_owned).collect())
    }

    pub fn segments(&self) -> impl Iterator<Item=&str> {
        self.0.iter().map(String::as_str)
    }

    /// Look up each segment in turn. Reactive properties along the way subscribe the current watcher.
    ///
    /// Never fails: a missing property, or a lookup on something which isn't an object, gives `Undefined`.
    pub fn resolve(&self, root: &Value) -> Value {
        let mut value = root.clone();
        for segment in &self.0 {
            if value.is_undefined() {
                break;
            }
            value = value.get(segment);
        }
        value
    }
}

impl From<&str> for Path {
    fn from(expr: &str) -> Self {
        Path::parse(expr)
    }
}

impl From<String> for Path {
    fn from(expr: String) -> Self {
        Path::parse(&expr)
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}
