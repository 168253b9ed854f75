//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a company
//! configuration from a YAML directory and validating it fail-fast.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::CompanyConfig;

/// Loads and validates the company configuration.
///
/// # Directory Structure
///
/// ```text
/// config/acme/
/// └── company.yaml   # CompanyConfig graph
/// ```
///
/// Column references are validated at load time: every output column named
/// by an overtime rule or a special-column setting must be declared in
/// `output_columns`, so a typo fails the load instead of silently dropping
/// hours at computation time.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CompanyConfig,
}

impl ConfigLoader {
    /// Loads the configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] when `company.yaml` is missing
    /// - [`EngineError::ConfigParseError`] on invalid YAML
    /// - [`EngineError::UndeclaredColumn`] / [`EngineError::DuplicateCatchAll`]
    ///   when validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let company_path = path.as_ref().join("company.yaml");
        let config = Self::load_yaml::<CompanyConfig>(&company_path)?;
        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Wraps an already constructed configuration after validating it.
    pub fn from_config(config: CompanyConfig) -> EngineResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Returns the loaded company configuration.
    pub fn config(&self) -> &CompanyConfig {
        &self.config
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Validates cross-references inside a configuration.
    pub fn validate(config: &CompanyConfig) -> EngineResult<()> {
        use super::types::OvertimeRuleKind;

        for group in &config.shift_groups {
            let mut catch_alls = 0;
            for rule in &group.overtime_rules {
                if !config.is_declared_column(&rule.column) {
                    return Err(EngineError::UndeclaredColumn {
                        group: group.name.clone(),
                        column: rule.column.clone(),
                    });
                }
                if matches!(rule.kind, OvertimeRuleKind::CatchAll) {
                    catch_alls += 1;
                }
            }
            if catch_alls > 1 {
                return Err(EngineError::DuplicateCatchAll {
                    group: group.name.clone(),
                });
            }
        }

        let specials = &config.special_columns;
        let special_refs = [
            Some(specials.earned_rest.as_str()),
            Some(specials.holiday_work.as_str()),
            specials.weekend_work.as_deref(),
        ];
        for column in special_refs.into_iter().flatten() {
            if !config.is_declared_column(column) {
                return Err(EngineError::UndeclaredColumn {
                    group: "special_columns".to_string(),
                    column: column.to_string(),
                });
            }
        }

        if let Some(forced) = &config.grid.forced_shift_group
            && config.group(forced).is_none()
        {
            return Err(EngineError::ConfigParseError {
                path: "company.yaml".to_string(),
                message: format!("grid.forced_shift_group '{forced}' does not name a shift group"),
            });
        }

        Ok(())
    }
}
