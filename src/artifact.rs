#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::error::{DeployError, Result};
use crate::types::ContractArtifact;
use std::path::Path;

/// Reads compiled contract code from disk without interpreting it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactLoader;

impl ArtifactLoader {
    /// # Errors
    /// Returns `DeployError::Load` if `path` is missing or unreadable. Invalid
    /// UTF-8 is replaced, not rejected.
    pub fn load(path: &Path) -> Result<ContractArtifact> {
        std::fs::read(path)
            .map(|bytes| ContractArtifact::new(String::from_utf8_lossy(&bytes).into_owned()))
            .map_err(|source| DeployError::Load {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::ArtifactLoader;
    use crate::error::DeployError;
    use std::io::Write;

    #[test]
    fn given_existing_file_when_loaded_then_contents_are_returned_verbatim() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "parameter unit;\nstorage unit;\ncode {{ CDR ; NIL operation ; PAIR }}")
            .expect("write");

        let artifact = ArtifactLoader::load(file.path()).expect("load");

        assert_eq!(
            artifact.code(),
            "parameter unit;\nstorage unit;\ncode { CDR ; NIL operation ; PAIR }"
        );
    }

    #[test]
    fn given_non_utf8_file_when_loaded_then_artifact_is_decoded_lossily() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(b"co\xffe").expect("write");

        let artifact = ArtifactLoader::load(file.path()).expect("load");

        assert_eq!(artifact.code(), "co\u{fffd}e");
    }

    #[test]
    fn given_missing_file_when_loaded_then_load_error_names_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("batch_auction.tz");

        let err = ArtifactLoader::load(&missing).expect_err("missing file");

        assert!(matches!(&err, DeployError::Load { path, .. } if path == &missing));
        assert!(err.to_string().contains("batch_auction.tz"));
    }
}
