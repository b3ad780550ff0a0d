use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_STYLE: &str = "width: 900px; height: 500px;";

/// How the runtime bundle is registered when a RequireJS-style loader is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoaderConfig {
    /// Module name the runtime bundle is registered under.
    pub module_name: String,
    /// `window` property the loaded module export is bound to.
    pub global_name: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            module_name: "echarts".to_string(),
            global_name: "echarts".to_string(),
        }
    }
}

/// Options for turning a chart into a notebook snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayOptions {
    /// CSS applied to the container `<div>`. Not validated.
    pub style: String,
    pub loader: LoaderConfig,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            style: DEFAULT_STYLE.to_string(),
            loader: LoaderConfig::default(),
        }
    }
}

fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl DisplayOptions {
    pub fn with_style(style: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            ..Self::default()
        }
    }

    /// Builds options from a JSON object; missing keys keep their defaults.
    pub fn from_value(value: Value) -> Result<Self> {
        let options: Self = serde_json::from_value(value).map_err(|err| Error::InvalidOptions {
            message: err.to_string(),
        })?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|err| Error::InvalidOptions {
            message: err.to_string(),
        })?;
        Self::from_value(value)
    }

    /// The loader names end up in generated JavaScript; the style is left to the caller.
    pub fn validate(&self) -> Result<()> {
        if self.loader.module_name.trim().is_empty() {
            return Err(Error::InvalidOptions {
                message: "loader.moduleName must not be empty".to_string(),
            });
        }
        if !is_js_identifier(&self.loader.global_name) {
            return Err(Error::InvalidOptions {
                message: format!(
                    "loader.globalName must be a JavaScript identifier, got {:?}",
                    self.loader.global_name
                ),
            });
        }
        Ok(())
    }
}
