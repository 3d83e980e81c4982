//! Artifact packager
//!
//! Stages the function source in a fresh temporary directory, zips the
//! directory's contents and moves the archive into the working directory.
//! Both the staging directory and the archive are registered for cleanup
//! before they exist, so a failure halfway through leaves nothing behind.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::application::cleanup::CleanupRegistry;
use crate::domain::entities::PackagedArtifact;
use crate::domain::value_objects::ARCHIVE_FILE;
use crate::error::{DeployError, DeployResult};

const STAGING_PREFIX: &str = "aimon-package-";
const BUNDLE_DIR: &str = "bundle";

/// Package `source` into `work_dir/lambda-deployment.zip`.
pub fn package_function(
    source: &Path,
    work_dir: &Path,
    registry: &CleanupRegistry,
) -> DeployResult<PackagedArtifact> {
    let fail = |message: String| DeployError::Packaging {
        source_file: source.to_path_buf(),
        message,
    };

    let file_name = source
        .file_name()
        .ok_or_else(|| fail("source path has no file name".to_string()))?;

    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir()
        .map_err(|e| fail(format!("cannot create staging directory: {e}")))?;
    let staging_dir = registry.track_dir(staging);

    let bundle = staging_dir.join(BUNDLE_DIR);
    fs::create_dir(&bundle).map_err(|e| fail(e.to_string()))?;
    fs::copy(source, bundle.join(file_name))
        .map_err(|e| fail(format!("cannot copy into staging directory: {e}")))?;

    let staged_archive = staging_dir.join(ARCHIVE_FILE);
    write_archive(&bundle, &staged_archive).map_err(|e| fail(e.to_string()))?;

    let archive_path = work_dir.join(ARCHIVE_FILE);
    registry.track_file(&archive_path);
    relocate(&staged_archive, &archive_path)
        .map_err(|e| fail(format!("cannot move archive into {}: {e}", work_dir.display())))?;

    let source_bytes = fs::read(source).map_err(|e| fail(e.to_string()))?;
    let digest = Sha256::digest(&source_bytes);
    let size = fs::metadata(&archive_path)
        .map_err(|e| fail(e.to_string()))?
        .len();

    Ok(PackagedArtifact::new(
        archive_path,
        staging_dir,
        hex(&digest),
        size,
    ))
}

/// Zip every regular file directly under `dir`, sorted by name, with a fixed
/// timestamp so unchanged input yields identical entries.
fn write_archive(dir: &Path, archive: &Path) -> io::Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    entries.sort();

    let file = File::create(archive)?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    for path in entries {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        zip.start_file(name, options).map_err(zip_to_io)?;
        zip.write_all(&fs::read(&path)?)?;
    }

    zip.finish().map_err(zip_to_io)?;
    Ok(())
}

fn zip_to_io(err: zip::result::ZipError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

// rename fails across filesystems (tmpfs -> disk); fall back to copy.
fn relocate(from: &Path, to: &Path) -> io::Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)?;
    fs::remove_file(from)
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
