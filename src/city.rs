// Copyright 2025 Cowboy AI, LLC.

//! City value object used for geographic grouping
//!
//! Cities are immutable, compared by value, and referenced from an
//! agreement's company section. The IBGE code is the government-issued
//! identifier; `uf` is the two-letter state code.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A city, identified by its IBGE code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// City name (e.g., "Maceió")
    pub name: String,
    /// Two-letter state code (e.g., "AL")
    pub uf: String,
    /// IBGE government code
    pub ibge: String,
}

impl City {
    /// Create a city value object
    pub fn new(name: impl Into<String>, uf: impl Into<String>, ibge: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uf: uf.into(),
            ibge: ibge.into(),
        }
    }
}
