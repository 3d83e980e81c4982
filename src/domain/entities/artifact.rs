//! PackagedArtifact entity
//!
//! The zip archive handed to the control plane. The archive file and the
//! staging directory are owned by the cleanup registry, not by this value.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedArtifact {
    archive_path: PathBuf,
    staging_dir: PathBuf,
    /// SHA-256 of the packaged source, hex encoded
    source_digest: String,
    size_bytes: u64,
}

impl PackagedArtifact {
    pub fn new(
        archive_path: impl Into<PathBuf>,
        staging_dir: impl Into<PathBuf>,
        source_digest: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            archive_path: archive_path.into(),
            staging_dir: staging_dir.into(),
            source_digest: source_digest.into(),
            size_bytes,
        }
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    pub fn source_digest(&self) -> &str {
        &self.source_digest
    }

    /// Short digest prefix for status lines.
    pub fn short_digest(&self) -> &str {
        let end = self.source_digest.len().min(12);
        &self.source_digest[..end]
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// `fileb://` URI the CLI client expects for binary uploads.
    pub fn fileb_uri(&self) -> String {
        format!("fileb://{}", self.archive_path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fileb_uri_prefixes_archive_path() {
        let artifact = PackagedArtifact::new("/work/lambda-deployment.zip", "/tmp/x", "abc", 10);
        assert_eq!(artifact.fileb_uri(), "fileb:///work/lambda-deployment.zip");
    }

    #[test]
    fn short_digest_handles_short_values() {
        let artifact = PackagedArtifact::new("a.zip", "/tmp/x", "abc", 0);
        assert_eq!(artifact.short_digest(), "abc");

        let artifact = PackagedArtifact::new("a.zip", "/tmp/x", "0123456789abcdef", 0);
        assert_eq!(artifact.short_digest(), "0123456789ab");
    }
}
