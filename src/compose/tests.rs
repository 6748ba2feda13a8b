//! End-to-end tests for compose synthesis.

use super::expand::{PathExpander, expand_path};
use super::{DEFAULT_VERSION, Document, synthesize};
use crate::config::ProjectConfig;
use crate::error::{MussError, Result};
use pretty_assertions::assert_eq;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

struct FakeHome;

impl PathExpander for FakeHome {
    fn expand(&self, raw: &str) -> Result<PathBuf> {
        expand_path(raw, Some(Path::new("/home/dev")), |name| {
            (name == "PROJECT").then(|| "/src/project".to_string())
        })
    }
}

fn project(yaml: &str) -> ProjectConfig {
    ProjectConfig::from_yaml(yaml).unwrap()
}

fn map(yaml: &str) -> Mapping {
    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn empty_project_yields_base_document() {
    let synthesis = synthesize(&ProjectConfig::default(), &FakeHome).unwrap();

    assert_eq!(synthesis.document, Document::default());
    assert_eq!(synthesis.document.version(), Some(DEFAULT_VERSION));
    assert!(synthesis.files.is_empty());
}

#[test]
fn single_variant_fragment_is_used_verbatim_minus_invalid_services() {
    let cfg = project(
        r#"
user:
  services:
    foo:
      config: bar
  service_preference: [repo, registry]
service_definitions:
  - name: app
    configs:
      sole:
        version: "3.5"
        volumes: {}
        services:
          app:
            image: alpine
            environment:
              FOO: bar
            volumes:
              - ./here:/there
          store:
            volumes:
              - data:/var/data
"#,
    );

    let synthesis = synthesize(&cfg, &FakeHome).unwrap();

    assert_eq!(
        synthesis.document.as_mapping(),
        &map(
            r#"
version: "3.5"
volumes: {}
services:
  app:
    image: alpine
    environment:
      FOO: bar
    volumes:
      - ./here:/there
"#
        )
    );
    assert!(synthesis.document.service("store").is_none());
}

#[test]
fn definitions_fold_in_declaration_order() {
    let cfg = project(
        r#"
default_service_preference: [registry]
service_definitions:
  - name: app
    configs:
      registry:
        services:
          app:
            image: example/app
            command: [serve]
            volumes: [./a:/a]
  - name: app-debug
    configs:
      registry:
        services:
          app:
            command: [serve, --debug]
            volumes: [./b:/b]
"#,
    );

    let synthesis = synthesize(&cfg, &FakeHome).unwrap();

    assert_eq!(
        synthesis.document.service("app"),
        Some(&map(
            "image: example/app\ncommand: [serve, --debug]\nvolumes: [./a:/a, ./b:/b]\n"
        ))
    );
}

#[test]
fn user_override_is_applied_last() {
    let cfg = project(
        r#"
user:
  override:
    services:
      app:
        command: [sh]
        environment: {DEBUG: "1"}
      tools:
        image: busybox
service_definitions:
  - name: app
    configs:
      sole:
        services:
          app:
            image: alpine
            command: [serve]
            environment: {LOG: info}
"#,
    );

    let synthesis = synthesize(&cfg, &FakeHome).unwrap();

    assert_eq!(
        synthesis.document.service("app"),
        Some(&map(
            "image: alpine\ncommand: [sh]\nenvironment: {LOG: info, DEBUG: '1'}\n"
        ))
    );
    assert_eq!(
        synthesis.document.service("tools"),
        Some(&map("image: busybox"))
    );
}

#[test]
fn override_can_complete_an_incomplete_service() {
    let cfg = project(
        r#"
user:
  override:
    services:
      worker: {build: ./worker}
service_definitions:
  - name: worker
    configs:
      sole:
        services:
          worker: {environment: {QUEUE: default}}
"#,
    );

    let synthesis = synthesize(&cfg, &FakeHome).unwrap();

    assert_eq!(
        synthesis.document.service("worker"),
        Some(&map("environment: {QUEUE: default}\nbuild: ./worker"))
    );
}

#[test]
fn services_missing_build_and_image_are_dropped() {
    let cfg = project(
        r#"
service_definitions:
  - name: stack
    configs:
      sole:
        services:
          web: {build: .}
          cache: {image: redis}
          sidecar: {environment: {A: b}}
          placeholder:
"#,
    );

    let synthesis = synthesize(&cfg, &FakeHome).unwrap();
    let names: Vec<_> = synthesis
        .document
        .services()
        .unwrap()
        .keys()
        .filter_map(Value::as_str)
        .collect();

    assert_eq!(names, vec!["web", "cache"]);
}

#[test]
fn file_volumes_are_collected_across_services() {
    let cfg = project(
        r#"
service_definitions:
  - name: app
    configs:
      sole:
        services:
          app:
            image: alpine
            volumes:
              - type: bind
                source: ~/.netrc
                target: /root/.netrc
                file: true
          worker:
            image: alpine
            volumes:
              - type: bind
                source: ~/.netrc
                target: /root/.netrc
                file: true
              - type: bind
                source: $PROJECT/worker.ini
                target: /etc/worker.ini
                file: true
"#,
    );

    let synthesis = synthesize(&cfg, &FakeHome).unwrap();

    assert_eq!(
        synthesis.files.paths(),
        vec![
            Path::new("/home/dev/.netrc"),
            Path::new("/home/dev/.netrc"),
            Path::new("/src/project/worker.ini"),
        ]
    );
    let rendered = synthesis.document.to_yaml().unwrap();
    assert!(!rendered.contains("file:"), "{}", rendered);
}

#[test]
fn dropped_services_still_contribute_files() {
    let cfg = project(
        r#"
service_definitions:
  - name: app
    configs:
      sole:
        services:
          stub:
            volumes:
              - {type: bind, source: ~/stub.conf, target: /stub.conf, file: true}
"#,
    );

    let synthesis = synthesize(&cfg, &FakeHome).unwrap();

    assert!(synthesis.document.service("stub").is_none());
    assert_eq!(synthesis.files.paths(), vec![Path::new("/home/dev/stub.conf")]);
}

#[test]
fn resolution_error_aborts_synthesis() {
    let cfg = project(
        r#"
user:
  services:
    db: {config: cloud}
service_definitions:
  - name: app
    configs:
      sole: {services: {app: {image: alpine}}}
  - name: db
    configs:
      local: {services: {db: {image: postgres}}}
      remote: {services: {db: {image: proxy}}}
"#,
    );

    let err = synthesize(&cfg, &FakeHome).unwrap_err();

    match err {
        MussError::UnknownVariant { service, config } => {
            assert_eq!(service, "db");
            assert_eq!(config, "cloud");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn merge_conflict_in_override_is_reported() {
    let cfg = project(
        r#"
user:
  override:
    services:
      app:
        volumes: {not: a list}
service_definitions:
  - name: app
    configs:
      sole: {services: {app: {image: alpine, volumes: [./a:/a]}}}
"#,
    );

    let err = synthesize(&cfg, &FakeHome).unwrap_err();

    assert!(
        matches!(err, MussError::MergeConflict { ref key, .. } if key == "services.app.volumes"),
        "{:?}",
        err
    );
}

#[test]
fn expansion_error_aborts_synthesis() {
    let cfg = project(
        r#"
service_definitions:
  - name: app
    configs:
      sole:
        services:
          app:
            image: alpine
            volumes:
              - {type: bind, source: ~root/.netrc, target: /x, file: true}
"#,
    );

    let err = synthesize(&cfg, &FakeHome).unwrap_err();

    assert!(matches!(err, MussError::PathExpansion { .. }));
}

#[test]
fn null_version_override_restores_default() {
    let cfg = project(
        r#"
user:
  override:
    version: null
"#,
    );

    let synthesis = synthesize(&cfg, &FakeHome).unwrap();

    assert_eq!(synthesis.document.version(), Some(DEFAULT_VERSION));
}

#[test]
fn null_volumes_override_is_a_conflict() {
    let cfg = project(
        r#"
user:
  override:
    volumes: null
"#,
    );

    let err = synthesize(&cfg, &FakeHome).unwrap_err();

    assert!(
        matches!(err, MussError::MergeConflict { ref key, .. } if key == "volumes"),
        "{:?}",
        err
    );
}
