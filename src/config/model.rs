//! Project configuration records.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// The project configuration: `muss.yaml` plus the user's `muss.user.yaml`.
///
/// Only the keys the resolver reads are typed. Everything else is kept in
/// `extra` so it survives a round trip through `config show`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// User-level choices and overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserConfig>,

    /// Service definitions in declaration order. Order matters: later
    /// definitions are merged on top of earlier ones.
    pub service_definitions: Vec<ServiceDefinition>,

    /// Project-wide variant preference, consulted after the user's.
    pub default_service_preference: Vec<String>,

    /// Unknown top-level keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The `user` section of the project configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Per-service explicit choices, keyed by service definition name.
    pub services: BTreeMap<String, UserServiceChoice>,

    /// Variant tags in order of preference.
    pub service_preference: Vec<String>,

    /// Compose fragment merged last, with the highest precedence.
    #[serde(rename = "override", skip_serializing_if = "Option::is_none")]
    pub override_config: Option<Mapping>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// `user.services.<name>`: `{config: <variant-tag>}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserServiceChoice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A logical service and its named configuration variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceDefinition {
    /// Used for user preference lookup only; not required to be unique.
    pub name: String,

    /// Variant tag to configuration fragment, in declaration order.
    pub configs: Mapping,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ServiceDefinition {
    /// Look up a variant by tag.
    pub fn config(&self, tag: &str) -> Option<&Value> {
        self.configs.get(tag)
    }

    /// Variant tags in declaration order, skipping non-string keys.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().filter_map(Value::as_str)
    }

    /// Tags that count as selectable alternatives.
    ///
    /// Tags starting with `_` are hidden: they hold YAML anchors or shared
    /// bases meant to be pulled in through `include`.
    pub fn visible_tags(&self) -> Vec<&str> {
        self.tags().filter(|tag| !tag.starts_with('_')).collect()
    }
}

impl ProjectConfig {
    /// The user's explicit variant choice for a service, if any.
    pub fn user_choice(&self, service: &str) -> Option<&str> {
        self.user
            .as_ref()?
            .services
            .get(service)?
            .config
            .as_deref()
    }

    /// Candidate variant order: user preference first, then project defaults.
    pub fn preference_order(&self) -> Vec<&str> {
        let user = self
            .user
            .iter()
            .flat_map(|u| u.service_preference.iter());
        user.chain(self.default_service_preference.iter())
            .map(String::as_str)
            .collect()
    }

    /// The user's override fragment, if any.
    pub fn user_override(&self) -> Option<&Mapping> {
        self.user.as_ref()?.override_config.as_ref()
    }
}
