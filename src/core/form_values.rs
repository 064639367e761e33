use serde::Deserialize;

/// Which fields the form carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormVariant {
    #[default]
    Basic,
    WithPassword,
}

impl FormVariant {
    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::Basic => &[Field::Name, Field::Email],
            Self::WithPassword => &[
                Field::Name,
                Field::Email,
                Field::Password,
                Field::ConfirmPassword,
            ],
        }
    }

    pub fn has_passwords(self) -> bool {
        matches!(self, Self::WithPassword)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn path(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "password" => Some(Self::Password),
            "confirmPassword" => Some(Self::ConfirmPassword),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl FormValues {
    /// Empty values for a freshly mounted form.
    pub fn empty(variant: FormVariant) -> Self {
        let password_slot = variant.has_passwords().then(String::new);
        Self {
            name: String::new(),
            email: String::new(),
            password: password_slot.clone(),
            confirm_password: password_slot,
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(self.name.as_str()),
            Field::Email => Some(self.email.as_str()),
            Field::Password => self.password.as_deref(),
            Field::ConfirmPassword => self.confirm_password.as_deref(),
        }
    }

    /// Returns false when the field does not exist in this form.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> bool {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Password => match self.password.as_mut() {
                Some(slot) => *slot = value,
                None => return false,
            },
            Field::ConfirmPassword => match self.confirm_password.as_mut() {
                Some(slot) => *slot = value,
                None => return false,
            },
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, FormValues, FormVariant};

    #[test]
    fn basic_variant_rejects_password_writes() {
        let mut values = FormValues::empty(FormVariant::Basic);
        assert!(!values.set(Field::Password, "secret"));
        assert_eq!(values.get(Field::Password), None);
        assert!(values.set(Field::Name, "Amir"));
        assert_eq!(values.get(Field::Name), Some("Amir"));
    }

    #[test]
    fn field_paths_round_trip() {
        for field in FormVariant::WithPassword.fields() {
            assert_eq!(Field::from_path(field.path()), Some(*field));
        }
        assert_eq!(Field::from_path("phone"), None);
    }
}
