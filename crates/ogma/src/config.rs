// Dweve Ogma - Object Graph Mapping for Cypher Stores
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration types for entity mapping.

use serde::{Deserialize, Serialize};

/// Configuration for mapping result rows onto typed entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Treat a row key with no registered field as an error instead of
    /// logging and skipping it (default: false).
    pub deny_unknown_properties: bool,

    /// Merge incoming collection values with the target's existing ones
    /// instead of overwriting (default: true).
    pub merge_collections: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            deny_unknown_properties: false,
            merge_collections: true,
        }
    }
}

impl MapperConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for MapperConfig.
    pub fn builder() -> MapperConfigBuilder {
        MapperConfigBuilder::default()
    }

    /// Fail on row keys with no registered field.
    pub fn with_deny_unknown_properties(mut self) -> Self {
        self.deny_unknown_properties = true;
        self
    }

    /// Overwrite collection fields instead of merging.
    pub fn without_collection_merge(mut self) -> Self {
        self.merge_collections = false;
        self
    }
}

/// Builder for MapperConfig.
///
/// # Examples
///
/// ```
/// # use ogma::MapperConfig;
/// let config = MapperConfig::builder()
///     .deny_unknown_properties(true)
///     .merge_collections(false)
///     .build();
/// ```
#[derive(Default)]
pub struct MapperConfigBuilder {
    deny_unknown_properties: Option<bool>,
    merge_collections: Option<bool>,
}

impl MapperConfigBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether unknown row keys are an error.
    pub fn deny_unknown_properties(mut self, deny: bool) -> Self {
        self.deny_unknown_properties = Some(deny);
        self
    }

    /// Set whether collection fields merge with existing values.
    pub fn merge_collections(mut self, merge: bool) -> Self {
        self.merge_collections = Some(merge);
        self
    }

    /// Build the MapperConfig instance.
    ///
    /// All unset fields will use their default values.
    pub fn build(self) -> MapperConfig {
        let defaults = MapperConfig::default();
        MapperConfig {
            deny_unknown_properties: self
                .deny_unknown_properties
                .unwrap_or(defaults.deny_unknown_properties),
            merge_collections: self.merge_collections.unwrap_or(defaults.merge_collections),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = MapperConfig::default();
        assert!(!config.deny_unknown_properties);
        assert!(config.merge_collections);
    }

    #[test]
    fn test_fluent_methods() {
        let config = MapperConfig::new()
            .with_deny_unknown_properties()
            .without_collection_merge();
        assert!(config.deny_unknown_properties);
        assert!(!config.merge_collections);
    }

    #[test]
    fn test_builder_defaults() {
        let config = MapperConfig::builder().build();
        assert!(!config.deny_unknown_properties);
        assert!(config.merge_collections);
    }

    #[test]
    fn test_builder_custom() {
        let config = MapperConfig::builder()
            .deny_unknown_properties(true)
            .merge_collections(false)
            .build();
        assert!(config.deny_unknown_properties);
        assert!(!config.merge_collections);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = MapperConfig::default().with_deny_unknown_properties();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: MapperConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.deny_unknown_properties, parsed.deny_unknown_properties);
        assert_eq!(config.merge_collections, parsed.merge_collections);
    }
}
