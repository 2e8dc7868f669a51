//! Settings for data model generation.

use std::path::PathBuf;

use crate::error::GenerationError;

/// Directory used when the caller does not pick one.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "Generated";

/// Settings that control one generation run. Built by the caller; there is no
/// process-wide default instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataModelGeneratorSettings {
    /// Where rendered files are written.
    pub output_directory: PathBuf,

    /// Replace existing files instead of failing with `OutputExists`.
    pub force_overwrite: bool,

    /// Namespace recorded on every generated model. Required.
    pub namespace_name: String,

    /// Name of the class synthesized from the root schema. Required.
    pub root_class_name: String,

    /// Emit explicit structural equality and hash implementations.
    pub generate_overrides: bool,

    /// When true, fail before generation if the schema uses keywords outside
    /// the supported subset. All issues are reported together.
    ///
    /// **Default: false.** Unsupported keywords are otherwise ignored.
    pub deny_unsupported_keywords: bool,
}

impl Default for DataModelGeneratorSettings {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            force_overwrite: false,
            namespace_name: String::new(),
            root_class_name: String::new(),
            generate_overrides: false,
            deny_unsupported_keywords: false,
        }
    }
}

impl DataModelGeneratorSettings {
    /// Settings with the two required names filled in and everything else defaulted.
    #[must_use]
    pub fn new(namespace_name: impl Into<String>, root_class_name: impl Into<String>) -> Self {
        Self {
            namespace_name: namespace_name.into(),
            root_class_name: root_class_name.into(),
            ..Self::default()
        }
    }

    /// Check that every required setting is present.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Configuration` naming every missing setting at once.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let mut missing: Vec<&'static str> = Vec::new();
        if self.namespace_name.trim().is_empty() {
            missing.push("namespace_name");
        }
        if self.root_class_name.trim().is_empty() {
            missing.push("root_class_name");
        }
        if self.output_directory.as_os_str().is_empty() {
            missing.push("output_directory");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(GenerationError::Configuration { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_directory() {
        let settings: DataModelGeneratorSettings = DataModelGeneratorSettings::default();
        assert_eq!(PathBuf::from("Generated"), settings.output_directory);
        assert!(!settings.force_overwrite);
        assert!(!settings.generate_overrides);
        assert!(!settings.deny_unsupported_keywords);
    }

    #[test]
    fn validate_reports_all_missing_fields() {
        let settings: DataModelGeneratorSettings = DataModelGeneratorSettings {
            output_directory: PathBuf::new(),
            ..DataModelGeneratorSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(
            matches!(
                err,
                GenerationError::Configuration { ref missing }
                    if missing == &vec!["namespace_name", "root_class_name", "output_directory"]
            ),
            "{err}"
        );
    }

    #[test]
    fn blank_names_count_as_missing() {
        let settings: DataModelGeneratorSettings = DataModelGeneratorSettings::new("N", "  ");
        assert!(matches!(
            settings.validate(),
            Err(GenerationError::Configuration { ref missing }) if missing == &vec!["root_class_name"]
        ));
    }

    #[test]
    fn complete_settings_validate() {
        assert!(DataModelGeneratorSettings::new("N", "C").validate().is_ok());
    }
}
