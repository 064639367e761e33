use crate::core::value::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Dotted/bracketed field path such as `name`, `address.city` or `rows[0].path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        self.segments.as_slice()
    }

    pub fn parse(input: &str) -> Result<Self, ValuePathParseError> {
        parse_path(input)
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if is_identifier(key) => {
                    if idx > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Key(key) => {
                    f.write_str("[\"")?;
                    f.write_str(key.replace('\\', "\\\\").replace('"', "\\\"").as_str())?;
                    f.write_str("\"]")?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuePathParseError {
    message: String,
}

impl ValuePathParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValuePathParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl std::error::Error for ValuePathParseError {}

/// Read access to a tree of field state keyed by field path.
pub trait FieldLookup {
    fn get(&self, path: &str) -> Option<&Value>;
}

impl FieldLookup for Value {
    fn get(&self, path: &str) -> Option<&Value> {
        let parsed = ValuePath::parse(path).ok()?;
        self.get_path(&parsed)
    }
}

fn parse_path(input: &str) -> Result<ValuePath, ValuePathParseError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Ok(ValuePath::empty());
    }

    let chars: Vec<char> = raw.chars().collect();
    let mut idx = 0usize;
    let mut out = Vec::<PathSegment>::new();

    while idx < chars.len() {
        let ch = chars[idx];
        if ch == '.' {
            if out.is_empty() {
                return Err(ValuePathParseError::new("path cannot start with '.'"));
            }
            idx += 1;
            out.push(PathSegment::Key(parse_key(&chars, &mut idx)?));
            continue;
        }

        if ch == '[' {
            out.push(parse_bracket_segment(&chars, &mut idx)?);
            continue;
        }

        if out.is_empty() {
            out.push(PathSegment::Key(parse_key(&chars, &mut idx)?));
            continue;
        }

        return Err(ValuePathParseError::new(format!(
            "unexpected character '{}' at position {}",
            ch, idx
        )));
    }

    Ok(ValuePath::new(out))
}

fn parse_key(chars: &[char], idx: &mut usize) -> Result<String, ValuePathParseError> {
    let start = *idx;
    while *idx < chars.len() {
        let ch = chars[*idx];
        if ch == '.' || ch == '[' || ch == ']' {
            break;
        }
        *idx += 1;
    }
    if *idx == start {
        return Err(ValuePathParseError::new(format!(
            "expected key at position {}",
            start
        )));
    }
    Ok(chars[start..*idx].iter().collect::<String>())
}

fn parse_bracket_segment(
    chars: &[char],
    idx: &mut usize,
) -> Result<PathSegment, ValuePathParseError> {
    *idx += 1;
    if *idx >= chars.len() {
        return Err(ValuePathParseError::new("unterminated '[' segment"));
    }

    let ch = chars[*idx];
    if ch == '"' || ch == '\'' {
        let quote = ch;
        *idx += 1;
        let mut key = String::new();
        let mut closed = false;
        while *idx < chars.len() {
            let c = chars[*idx];
            *idx += 1;
            if c == '\\' {
                let Some(next) = chars.get(*idx).copied() else {
                    return Err(ValuePathParseError::new("unterminated escape in quoted key"));
                };
                key.push(next);
                *idx += 1;
                continue;
            }
            if c == quote {
                closed = true;
                break;
            }
            key.push(c);
        }
        if !closed {
            return Err(ValuePathParseError::new("unterminated quoted key"));
        }
        if chars.get(*idx).copied() != Some(']') {
            return Err(ValuePathParseError::new("expected closing ']'"));
        }
        *idx += 1;
        return Ok(PathSegment::Key(key));
    }

    let start = *idx;
    while *idx < chars.len() && chars[*idx] != ']' {
        *idx += 1;
    }
    if *idx >= chars.len() {
        return Err(ValuePathParseError::new("unterminated '[' segment"));
    }
    let raw = chars[start..*idx].iter().collect::<String>();
    *idx += 1;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValuePathParseError::new("empty bracket segment"));
    }
    if let Ok(index) = trimmed.parse::<usize>() {
        return Ok(PathSegment::Index(index));
    }
    Ok(PathSegment::Key(trimmed.to_string()))
}

fn is_identifier(input: &str) -> bool {
    let mut chars = input.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::{FieldLookup, PathSegment, ValuePath};
    use crate::core::value::Value;

    #[test]
    fn parse_dotted_path_with_indexes() {
        let path = ValuePath::parse("users[0].profile.name").expect("path should parse");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("users".to_string()),
                PathSegment::Index(0),
                PathSegment::Key("profile".to_string()),
                PathSegment::Key("name".to_string()),
            ]
        );
    }

    #[test]
    fn display_round_trips_quoted_keys() {
        let path = ValuePath::parse("errors[\"first name\"].text").expect("path should parse");
        assert_eq!(path.to_string(), "errors[\"first name\"].text");
    }

    #[test]
    fn rejects_leading_dot_and_unterminated_brackets() {
        assert!(ValuePath::parse(".name").is_err());
        assert!(ValuePath::parse("rows[1").is_err());
        assert!(ValuePath::parse("rows[]").is_err());
    }

    #[test]
    fn lookup_resolves_nested_field_names() {
        let mut touched = Value::None;
        touched.set_path(
            &ValuePath::parse("address.city").expect("path"),
            Value::Bool(true),
        );

        assert_eq!(touched.get("address.city"), Some(&Value::Bool(true)));
        assert_eq!(touched.get("address.street"), None);
        assert_eq!(touched.get("address..city"), None);
    }
}
