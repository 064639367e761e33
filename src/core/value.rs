use crate::core::value_path::{PathSegment, ValuePath};
use indexmap::IndexMap;

/// Tree-shaped value used for field bindings, touched flags and errors.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Text(String),
    Bool(bool),
    List(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.is_empty(),
            Self::List(v) => v.is_empty(),
            Self::Object(v) => v.is_empty(),
            Self::Bool(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Truthiness as a form library would read a touched flag: missing and
    /// empty values are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(v) => *v,
            other => !other.is_empty(),
        }
    }

    pub fn get_path(&self, path: &ValuePath) -> Option<&Value> {
        lookup(self, path.segments())
    }

    pub fn set_path(&mut self, path: &ValuePath, value: Value) {
        if path.is_empty() {
            *self = value;
            return;
        }
        assign(self, path.segments(), value);
    }
}

fn lookup<'a>(current: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    let Some((head, rest)) = segments.split_first() else {
        return Some(current);
    };
    let next = match (head, current) {
        (PathSegment::Key(key), Value::Object(map)) => map.get(key.as_str())?,
        (PathSegment::Index(index), Value::List(list)) => list.get(*index)?,
        // Numeric keys on objects behave like JS property access.
        (PathSegment::Index(index), Value::Object(map)) => map.get(index.to_string().as_str())?,
        _ => return None,
    };
    lookup(next, rest)
}

fn container_for(next: Option<&PathSegment>) -> Value {
    match next {
        Some(PathSegment::Index(_)) => Value::List(Vec::new()),
        Some(PathSegment::Key(_)) => Value::Object(IndexMap::new()),
        None => Value::None,
    }
}

fn assign(current: &mut Value, segments: &[PathSegment], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *current = value;
        return;
    };
    match head {
        PathSegment::Key(key) => {
            if !matches!(current, Value::Object(_)) {
                *current = Value::Object(IndexMap::new());
            }
            if let Value::Object(map) = current {
                let slot = map
                    .entry(key.clone())
                    .or_insert_with(|| container_for(rest.first()));
                assign(slot, rest, value);
            }
        }
        PathSegment::Index(index) => {
            if !matches!(current, Value::List(_)) {
                *current = Value::List(Vec::new());
            }
            if let Value::List(list) = current {
                if list.len() <= *index {
                    list.resize_with(index + 1, || Value::None);
                }
                if matches!(list[*index], Value::None) {
                    list[*index] = container_for(rest.first());
                }
                assign(&mut list[*index], rest, value);
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::core::value_path::ValuePath;

    #[test]
    fn set_path_creates_nested_structure() {
        let mut root = Value::None;
        let path = ValuePath::parse("rows[1].path").expect("path");
        root.set_path(&path, Value::from("/tmp/out"));

        let fetched = root.get_path(&path).and_then(Value::as_text);
        assert_eq!(fetched, Some("/tmp/out"));
    }

    #[test]
    fn set_path_overwrites_existing_leaf() {
        let mut root = Value::None;
        let path = ValuePath::parse("profile.enabled").expect("path");
        root.set_path(&path, Value::Bool(false));
        root.set_path(&path, Value::Bool(true));

        assert_eq!(root.get_path(&path).and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn get_path_misses_on_shape_mismatch() {
        let mut root = Value::None;
        root.set_path(&ValuePath::parse("name").expect("path"), Value::from("Amir"));

        let deeper = ValuePath::parse("name.first").expect("path");
        assert_eq!(root.get_path(&deeper), None);
        assert_eq!(root.get_path(&ValuePath::parse("email").expect("path")), None);
    }

    #[test]
    fn truthiness_follows_touched_semantics() {
        assert!(!Value::None.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::from("x").is_truthy());
    }
}
