use crate::core::form_values::{Field, FormValues, FormVariant};
use crate::core::validation::{ValidationErrors, validate};
use crate::core::value::Value;
use crate::core::value_path::{FieldLookup, ValuePath};
use indexmap::IndexMap;

/// Touched flags keyed by field path.
pub type TouchedMap = Value;

/// What an input needs to know about its bound field.
pub trait FieldBindings {
    fn touched_tree(&self) -> &dyn FieldLookup;
    fn errors_tree(&self) -> &dyn FieldLookup;

    fn is_touched(&self, path: &str) -> bool {
        self.touched_tree()
            .get(path)
            .is_some_and(Value::is_truthy)
    }

    fn error_of(&self, path: &str) -> Option<&str> {
        self.errors_tree().get(path).and_then(Value::as_text)
    }
}

/// Values, touched flags and derived errors for one mounted form.
#[derive(Debug, Clone)]
pub struct FormState {
    variant: FormVariant,
    values: FormValues,
    touched: TouchedMap,
    errors: ValidationErrors,
    errors_tree: Value,
    is_submitting: bool,
}

impl FormState {
    pub fn new(variant: FormVariant) -> Self {
        let values = FormValues::empty(variant);
        let errors = validate(&values);
        let errors_tree = errors.to_value();
        Self {
            variant,
            values,
            touched: Value::Object(IndexMap::new()),
            errors,
            errors_tree,
            is_submitting: false,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) -> bool {
        if !self.values.set(field, value) {
            return false;
        }
        self.revalidate();
        true
    }

    pub fn set_touched(&mut self, path: &str) {
        match ValuePath::parse(path) {
            Ok(parsed) => self.touched.set_path(&parsed, Value::Bool(true)),
            Err(err) => tracing::debug!(%path, %err, "ignoring touch on unparsable path"),
        }
    }

    pub fn touch_all(&mut self) {
        for field in self.variant.fields() {
            self.set_touched(field.path());
        }
    }

    /// True only while a submission is capturing or copying.
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.is_submitting = submitting;
    }

    pub fn revalidate(&mut self) -> &ValidationErrors {
        self.errors = validate(&self.values);
        self.errors_tree = self.errors.to_value();
        &self.errors
    }
}

impl FieldBindings for FormState {
    fn touched_tree(&self) -> &dyn FieldLookup {
        &self.touched
    }

    fn errors_tree(&self) -> &dyn FieldLookup {
        &self.errors_tree
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldBindings, FormState};
    use crate::core::form_values::{Field, FormVariant};
    use crate::core::validation::REQUIRED;

    #[test]
    fn errors_exist_before_touch_but_touch_starts_false() {
        let state = FormState::new(FormVariant::Basic);
        assert_eq!(state.error_of("name"), Some(REQUIRED));
        assert!(!state.is_touched("name"));
    }

    #[test]
    fn editing_recomputes_errors() {
        let mut state = FormState::new(FormVariant::Basic);
        assert!(state.set_value(Field::Name, "Amir"));
        assert_eq!(state.error_of("name"), None);
        assert_eq!(state.values().get(Field::Name), Some("Amir"));
        assert_eq!(state.error_of("email"), Some(REQUIRED));
    }

    #[test]
    fn touch_all_covers_variant_fields() {
        let mut state = FormState::new(FormVariant::WithPassword);
        state.touch_all();
        for field in FormVariant::WithPassword.fields() {
            assert!(state.is_touched(field.path()));
        }
    }

    #[test]
    fn nested_touch_paths_resolve() {
        let mut state = FormState::new(FormVariant::Basic);
        state.set_touched("address.city");
        assert!(state.is_touched("address.city"));
        assert!(!state.is_touched("address.street"));
    }
}
