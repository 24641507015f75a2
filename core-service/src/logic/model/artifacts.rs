//! Model Artifacts - locating and fingerprinting the exported classifier

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::{MODEL_FILE_NAME, VOCAB_FILE_NAME};
use crate::error::{CoreError, CoreResult};

/// Which configured directory the artifacts came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactSource {
    AppLocal,
    ParentLevel,
}

/// Resolved model + vocabulary paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelArtifacts {
    pub dir: PathBuf,
    pub model_path: PathBuf,
    pub vocab_path: PathBuf,
    pub source: ArtifactSource,
}

/// Find the model, preferring the app-local directory.
///
/// Absence in both directories is fatal for the caller.
pub fn locate(app_dir: &Path, fallback_dir: &Path) -> CoreResult<ModelArtifacts> {
    let candidates = [
        (app_dir, ArtifactSource::AppLocal),
        (fallback_dir, ArtifactSource::ParentLevel),
    ];

    for (dir, source) in candidates {
        let model_path = dir.join(MODEL_FILE_NAME);
        if model_path.is_file() {
            match source {
                ArtifactSource::AppLocal => log::info!("Using model from app directory"),
                ArtifactSource::ParentLevel => log::info!("Using model from root directory"),
            }
            return Ok(ModelArtifacts {
                dir: dir.to_path_buf(),
                vocab_path: dir.join(VOCAB_FILE_NAME),
                model_path,
                source,
            });
        }
    }

    Err(CoreError::ModelNotFound {
        file: MODEL_FILE_NAME.to_string(),
        searched: vec![app_dir.to_path_buf(), fallback_dir.to_path_buf()],
    })
}

/// SHA-256 of a file as lowercase hex
pub fn checksum(path: &Path) -> CoreResult<String> {
    let bytes = std::fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch_model(dir: &Path) {
        std::fs::write(dir.join(MODEL_FILE_NAME), b"onnx").unwrap();
    }

    #[test]
    fn test_prefers_app_local() {
        let app = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        touch_model(app.path());
        touch_model(root.path());

        let artifacts = locate(app.path(), root.path()).unwrap();
        assert_eq!(artifacts.source, ArtifactSource::AppLocal);
        assert_eq!(artifacts.model_path, app.path().join(MODEL_FILE_NAME));
        assert_eq!(artifacts.vocab_path, app.path().join(VOCAB_FILE_NAME));
    }

    #[test]
    fn test_falls_back_to_parent_level() {
        let app = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        touch_model(root.path());

        let artifacts = locate(app.path(), root.path()).unwrap();
        assert_eq!(artifacts.source, ArtifactSource::ParentLevel);
        assert_eq!(artifacts.dir, root.path());
    }

    #[test]
    fn test_missing_everywhere_lists_both_dirs() {
        let app = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();

        match locate(app.path(), root.path()) {
            Err(CoreError::ModelNotFound { file, searched }) => {
                assert_eq!(file, MODEL_FILE_NAME);
                assert_eq!(searched, vec![app.path().to_path_buf(), root.path().to_path_buf()]);
            }
            other => panic!("expected ModelNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_checksum_is_sha256_hex() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob");
        std::fs::write(&path, b"abc").unwrap();

        assert_eq!(
            checksum(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
