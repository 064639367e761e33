use crate::core::form_values::{Field, FormValues};
use crate::core::value::Value;
use crate::core::value_path::ValuePath;
use indexmap::IndexMap;

pub const REQUIRED: &str = "Required";
pub const PASSWORDS_MUST_MATCH: &str = "Passwords must match";

pub type ValidationError = String;
pub type Validator = Box<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

/// Run a list of validators against `value`, returning the first error.
pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), ValidationError> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

/// Rejects empty and whitespace-only input.
pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.trim().is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

/// Rejects only the empty string.
pub fn non_empty(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn equals(expected: impl Into<String>, message: impl Into<String>) -> Validator {
    let expected = expected.into();
    let message = message.into();
    Box::new(move |value: &str| {
        if value == expected {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

/// Field path to message, in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    entries: IndexMap<String, ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.entries.insert(path.into(), message.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Nested view so dotted field names resolve through path lookup.
    pub fn to_value(&self) -> Value {
        let mut root = Value::Object(IndexMap::new());
        for (path, message) in &self.entries {
            match ValuePath::parse(path) {
                Ok(parsed) => root.set_path(&parsed, Value::from(message.as_str())),
                Err(err) => tracing::debug!(%path, %err, "skipping unparsable error path"),
            }
        }
        root
    }
}

fn rules_for(field: Field, values: &FormValues) -> Vec<Validator> {
    match field {
        Field::Name => vec![required(REQUIRED)],
        Field::Email | Field::Password => vec![non_empty(REQUIRED)],
        Field::ConfirmPassword => vec![
            non_empty(REQUIRED),
            equals(
                values.password.clone().unwrap_or_default(),
                PASSWORDS_MUST_MATCH,
            ),
        ],
    }
}

/// Evaluates every field independently; within a field the first failing rule wins.
pub fn validate(values: &FormValues) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ] {
        let Some(value) = values.get(field) else {
            continue;
        };
        if let Err(message) = run_validators(&rules_for(field, values), value) {
            errors.insert(field.path(), message);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::{PASSWORDS_MUST_MATCH, REQUIRED, validate};
    use crate::core::form_values::{Field, FormValues, FormVariant};
    use crate::core::value_path::FieldLookup;

    fn filled(variant: FormVariant) -> FormValues {
        let mut values = FormValues::empty(variant);
        values.set(Field::Name, "Amir");
        values.set(Field::Email, "a@b.com");
        values.set(Field::Password, "x");
        values.set(Field::ConfirmPassword, "x");
        values
    }

    #[test]
    fn empty_required_fields_report_required_exactly() {
        let values = FormValues::empty(FormVariant::WithPassword);
        let errors = validate(&values);
        assert_eq!(errors.len(), 4);
        for field in FormVariant::WithPassword.fields() {
            assert_eq!(errors.get(field.path()), Some(REQUIRED));
        }

        let mut partial = filled(FormVariant::WithPassword);
        partial.set(Field::Email, "");
        let errors = validate(&partial);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some(REQUIRED));
    }

    #[test]
    fn missing_name_blocks_basic_form() {
        let mut values = FormValues::empty(FormVariant::Basic);
        values.set(Field::Email, "a@b.com");

        let errors = validate(&values);
        assert_eq!(errors.iter().collect::<Vec<_>>(), vec![("name", REQUIRED)]);
    }

    #[test]
    fn whitespace_name_is_required_but_whitespace_email_is_not() {
        let mut values = FormValues::empty(FormVariant::Basic);
        values.set(Field::Name, "   ");
        values.set(Field::Email, " ");

        let errors = validate(&values);
        assert_eq!(errors.get("name"), Some(REQUIRED));
        assert_eq!(errors.get("email"), None);
    }

    #[test]
    fn mismatched_passwords_flag_confirmation_only() {
        let mut values = filled(FormVariant::WithPassword);
        values.set(Field::ConfirmPassword, "y");

        let errors = validate(&values);
        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            vec![("confirmPassword", PASSWORDS_MUST_MATCH)]
        );
        assert_eq!(errors.get("password"), None);
    }

    #[test]
    fn required_takes_precedence_over_match() {
        let mut values = filled(FormVariant::WithPassword);
        values.set(Field::ConfirmPassword, "");

        assert_eq!(validate(&values).get("confirmPassword"), Some(REQUIRED));
    }

    #[test]
    fn valid_values_produce_no_errors_and_validation_is_idempotent() {
        let values = filled(FormVariant::WithPassword);
        let first = validate(&values);
        let second = validate(&values);
        assert!(first.is_empty());
        assert_eq!(first, second);

        let broken = FormValues::empty(FormVariant::Basic);
        assert_eq!(validate(&broken), validate(&broken));
    }

    #[test]
    fn error_tree_supports_path_lookup() {
        let errors = validate(&FormValues::empty(FormVariant::Basic));
        let tree = errors.to_value();
        assert_eq!(tree.get("name").and_then(|v| v.as_text()), Some(REQUIRED));
    }
}
