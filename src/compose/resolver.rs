//! Variant selection for a single service definition.

use super::merge::{kind, merge};
use crate::config::{ProjectConfig, ServiceDefinition};
use crate::error::{MussError, Result};
use serde_yaml::{Mapping, Value};

const INCLUDE_KEY: &str = "include";

/// Why a variant was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// `user.services.<name>.config`.
    UserChoice,
    /// The service defines a single visible variant.
    OnlyOption,
    /// First match in the user then project preference lists.
    Preference,
}

/// Select the effective configuration fragment for `service`.
///
/// Rules, first match wins:
/// 1. the user's explicit choice, which must exist;
/// 2. the only visible variant, regardless of preferences;
/// 3. the first tag of `user.service_preference ++ default_service_preference`
///    that the service defines.
///
/// The chosen fragment's `include` list is then resolved one level deep.
pub fn resolve_service(project: &ProjectConfig, service: &ServiceDefinition) -> Result<Mapping> {
    let (tag, selection) = select_variant(project, service)?;
    tracing::debug!(service = %service.name, config = tag, ?selection, "selected config");

    let selected = fragment(service, tag)?;
    apply_includes(service, selected)
}

/// Pick the variant tag for `service` and report which rule picked it.
pub fn select_variant<'a>(
    project: &ProjectConfig,
    service: &'a ServiceDefinition,
) -> Result<(&'a str, Selection)> {
    if let Some(choice) = project.user_choice(&service.name) {
        return service
            .tags()
            .find(|tag| *tag == choice)
            .map(|tag| (tag, Selection::UserChoice))
            .ok_or_else(|| MussError::UnknownVariant {
                service: service.name.clone(),
                config: choice.to_string(),
            });
    }

    if let [only] = service.visible_tags()[..] {
        return Ok((only, Selection::OnlyOption));
    }

    project
        .preference_order()
        .into_iter()
        .find_map(|pref| service.tags().find(|tag| *tag == pref))
        .map(|tag| (tag, Selection::Preference))
        .ok_or_else(|| MussError::NoVariantSelected {
            service: service.name.clone(),
        })
}

fn fragment<'a>(service: &'a ServiceDefinition, tag: &str) -> Result<&'a Mapping> {
    match service.config(tag) {
        Some(Value::Mapping(m)) => Ok(m),
        Some(other) => Err(MussError::InvalidConfig(format!(
            "config '{}' for service '{}' must be a mapping, found {}",
            tag,
            service.name,
            kind(other)
        ))),
        None => Err(MussError::UnknownVariant {
            service: service.name.clone(),
            config: tag.to_string(),
        }),
    }
}

/// Merge the fragment's includes, in order, underneath the fragment itself.
///
/// Includes are not followed recursively; an `include` key inside an
/// included variant is dropped.
fn apply_includes(service: &ServiceDefinition, selected: &Mapping) -> Result<Mapping> {
    let Some(includes) = selected.get(INCLUDE_KEY) else {
        return Ok(selected.clone());
    };

    let Value::Sequence(includes) = includes else {
        return Err(MussError::InvalidConfig(format!(
            "'include' for service '{}' must be a list, found {}",
            service.name,
            kind(includes)
        )));
    };

    let mut base = Mapping::new();
    for include in includes {
        let tag = include.as_str().ok_or_else(|| {
            MussError::InvalidConfig(format!(
                "'include' entries for service '{}' must be strings, found {}",
                service.name,
                kind(include)
            ))
        })?;

        let included = match service.config(tag) {
            Some(Value::Mapping(m)) => {
                if m.contains_key(INCLUDE_KEY) {
                    tracing::warn!(
                        service = %service.name,
                        config = tag,
                        "nested include ignored; includes are resolved one level deep"
                    );
                }
                without_include(m)
            }
            Some(other) => {
                return Err(MussError::InvalidConfig(format!(
                    "config '{}' for service '{}' must be a mapping, found {}",
                    tag,
                    service.name,
                    kind(other)
                )));
            }
            None => {
                return Err(MussError::UnresolvedInclude {
                    service: service.name.clone(),
                    include: tag.to_string(),
                });
            }
        };

        tracing::debug!(service = %service.name, include = tag, "applying include");
        base = merge(&base, &included)?;
    }

    merge(&base, &without_include(selected))
}

fn without_include(fragment: &Mapping) -> Mapping {
    let mut stripped = fragment.clone();
    stripped.shift_remove(INCLUDE_KEY);
    stripped
}
