//! Dataset persistence
//!
//! Datasets are stored as pretty-printed JSON so they stay readable and
//! diff cleanly.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::config::ConfigError;
use crate::error::{FixtureError, Result};
use crate::models::Dataset;

/// Write `dataset` to `path`.
///
/// The document is written next to the target and renamed into place, so a
/// reader never sees a half-written file.
pub fn save(dataset: &Dataset, path: &Path) -> Result<()> {
    let dir = parent_dir(path);
    if !dir.is_dir() {
        return Err(ConfigError::OutputDirMissing { dir }.into());
    }

    let staging = staging_path(path);
    write_json(dataset, &staging).map_err(|source| {
        let _ = fs::remove_file(&staging);
        FixtureError::Io {
            path: staging.clone(),
            source,
        }
    })?;
    fs::rename(&staging, path).map_err(|source| {
        let _ = fs::remove_file(&staging);
        FixtureError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(
        path = %path.display(),
        users = dataset.users.len(),
        orgs = dataset.orgs.len(),
        "Dataset saved"
    );
    Ok(())
}

/// Read and validate a dataset previously written by [`save`].
pub fn load(path: &Path) -> Result<Dataset> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(FixtureError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(FixtureError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let dataset: Dataset = serde_json::from_str(&content).map_err(|source| FixtureError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    dataset
        .validate()
        .map_err(|violation| FixtureError::MalformedDataset {
            path: path.to_path_buf(),
            violation,
        })?;

    debug!(path = %path.display(), "Dataset loaded");
    Ok(dataset)
}

fn write_json(dataset: &Dataset, path: &Path) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, dataset)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_file_name_resolves_to_working_dir() {
        assert_eq!(parent_dir(Path::new("data.json")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("out/data.json")), PathBuf::from("out"));
    }

    #[test]
    fn staging_file_sits_next_to_target() {
        assert_eq!(
            staging_path(Path::new("out/data.json")),
            PathBuf::from("out/data.json.tmp")
        );
    }
}
