//! Applying a synthesis to disk.

use super::{FileAction, Synthesis};
use crate::error::Result;
use crate::fs::{atomic_write_file, ensure_file};
use std::path::Path;

/// Default location of the generated compose file.
pub const COMPOSE_FILE: &str = "docker-compose.yml";

const HEADER: &str = "\
# This file is generated by muss from muss.yaml and muss.user.yaml.
# Edit those files and run `muss config save` instead of editing this one.
";

/// Render the document with the generated-file header.
pub fn render(synthesis: &Synthesis) -> Result<String> {
    Ok(format!("{}{}", HEADER, synthesis.document.to_yaml()?))
}

/// Create the files the document needs, then write the compose file.
///
/// Files are handled first so a directory blocking a file-backed volume
/// stops the save before a compose file referencing it is written.
pub fn save<P: AsRef<Path>>(synthesis: &Synthesis, compose_file: P) -> Result<()> {
    for (path, action) in synthesis.files.iter() {
        match action {
            FileAction::EnsureEmpty => ensure_file(path)?,
        }
    }

    let compose_file = compose_file.as_ref();
    atomic_write_file(compose_file, &render(synthesis)?)?;
    tracing::debug!(compose_file = %compose_file.display(), "wrote compose file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{Document, FileManifest};
    use crate::error::MussError;
    use tempfile::TempDir;

    #[test]
    fn save_writes_header_and_document() {
        let temp_dir = TempDir::new().unwrap();
        let compose_file = temp_dir.path().join(COMPOSE_FILE);

        save(&Synthesis::default(), &compose_file).unwrap();

        let written = std::fs::read_to_string(&compose_file).unwrap();
        assert!(written.starts_with("# This file is generated by muss"));

        let parsed: serde_yaml::Mapping = serde_yaml::from_str(&written).unwrap();
        assert_eq!(&parsed, Document::default().as_mapping());
    }

    #[test]
    fn save_creates_manifest_files() {
        let temp_dir = TempDir::new().unwrap();
        let secret = temp_dir.path().join("secrets").join("token");
        let mut files = FileManifest::default();
        files.push(secret.clone(), FileAction::EnsureEmpty);
        files.push(secret.clone(), FileAction::EnsureEmpty);
        let synthesis = Synthesis {
            document: Document::default(),
            files,
        };

        save(&synthesis, temp_dir.path().join(COMPOSE_FILE)).unwrap();

        assert!(secret.is_file());
    }

    #[test]
    fn directory_in_the_way_prevents_the_save() {
        let temp_dir = TempDir::new().unwrap();
        let blocked = temp_dir.path().join("config.ini");
        std::fs::create_dir(&blocked).unwrap();
        let mut files = FileManifest::default();
        files.push(blocked, FileAction::EnsureEmpty);
        let synthesis = Synthesis {
            document: Document::default(),
            files,
        };
        let compose_file = temp_dir.path().join(COMPOSE_FILE);

        let err = save(&synthesis, &compose_file).unwrap_err();

        assert!(matches!(err, MussError::UserError(_)));
        assert!(!compose_file.exists());
    }
}
