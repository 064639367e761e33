use crate::capture::RasterOptions;
use crate::core::form_values::{Field, FormVariant};
use crate::error::ConfigError;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_TITLE: &str = "Form Screenshot to Base64";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub title: String,
    pub variant: FormVariant,
    /// Namespace prepended to every style class, e.g. `fs-`.
    pub class_prefix: Option<String>,
    /// Hint text keyed by field path.
    pub hints: IndexMap<String, String>,
    pub capture: RasterOptions,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            variant: FormVariant::Basic,
            class_prefix: None,
            hints: IndexMap::new(),
            capture: RasterOptions::default(),
            log_file: None,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub with_password: bool,
    pub class_prefix: Option<String>,
    pub scale: Option<u32>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if overrides.with_password {
            self.variant = FormVariant::WithPassword;
        }
        if overrides.class_prefix.is_some() {
            self.class_prefix = overrides.class_prefix;
        }
        if let Some(scale) = overrides.scale {
            self.capture.scale = scale;
        }
        if overrides.log_file.is_some() {
            self.log_file = overrides.log_file;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=8).contains(&self.capture.scale) {
            return Err(ConfigError::Invalid(format!(
                "capture.scale must be between 1 and 8, got {}",
                self.capture.scale
            )));
        }
        for path in self.hints.keys() {
            let known = Field::from_path(path)
                .is_some_and(|field| self.variant.fields().contains(&field));
            if !known {
                return Err(ConfigError::Invalid(format!(
                    "hint for unknown field '{path}'"
                )));
            }
        }
        Ok(())
    }

    pub fn hint(&self, field: Field) -> Option<&str> {
        self.hints.get(field.path()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigOverrides};
    use crate::core::form_values::{Field, FormVariant};
    use crate::error::ConfigError;

    #[test]
    fn empty_document_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("yaml");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn parses_password_variant_with_prefix_and_hints() {
        let yaml = r#"
title: Sign up
variant: with_password
class_prefix: "fs-"
hints:
  password: At least one character
capture:
  scale: 3
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).expect("yaml");
        config.validate().expect("valid");
        assert_eq!(config.variant, FormVariant::WithPassword);
        assert_eq!(config.class_prefix.as_deref(), Some("fs-"));
        assert_eq!(config.hint(Field::Password), Some("At least one character"));
        assert_eq!(config.capture.scale, 3);
        assert_eq!(config.capture.padding, 1);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(serde_yaml::from_str::<AppConfig>("colour: red").is_err());
    }

    #[test]
    fn hints_must_target_fields_of_the_variant() {
        let config: AppConfig =
            serde_yaml::from_str("hints:\n  password: hidden").expect("yaml");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let upgraded = config
            .apply(ConfigOverrides {
                with_password: true,
                ..ConfigOverrides::default()
            })
            .expect("password variant knows the field");
        assert_eq!(upgraded.variant, FormVariant::WithPassword);
    }

    #[test]
    fn overrides_are_validated() {
        let err = AppConfig::default()
            .apply(ConfigOverrides {
                scale: Some(0),
                ..ConfigOverrides::default()
            })
            .expect_err("scale out of range");
        assert!(err.to_string().contains("capture.scale"));
    }
}
