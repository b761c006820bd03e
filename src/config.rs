//! Configuration for conversion and emission
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (typegen.toml)
//!
//! ## Example config file (typegen.toml):
//! ```toml
//! schema_sections = ["#/components/schemas", "#/definitions"]
//! include_comments = true
//! indent = "  "
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Conversion and emission settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypegenConfig {
    /// Document pointers scanned for named schemas, in scan order
    pub schema_sections: Vec<String>,

    /// Whether title/description comment blocks are emitted
    pub include_comments: bool,

    /// Indentation unit for interface bodies
    pub indent: String,
}

impl Default for TypegenConfig {
    fn default() -> Self {
        Self {
            schema_sections: vec![
                "#/components/schemas".to_string(),
                "#/definitions".to_string(),
            ],
            include_comments: true,
            indent: "  ".to_string(),
        }
    }
}

impl TypegenConfig {
    /// Load configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
