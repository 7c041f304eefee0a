//! Disk spool for uploaded audio
//!
//! Uploads are staged just long enough to hand them to the speech
//! collaborator, then discarded. The spool is a boundary concern; it is
//! never the record store.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Staging area for uploaded audio files
#[derive(Debug, Clone)]
pub struct Staging {
    dir: PathBuf,
}

impl Staging {
    /// Create a staging area rooted at `dir`, creating the directory if
    /// needed.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Root directory of the spool.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write uploaded bytes under a unique name and return the path.
    pub async fn stage(&self, filename: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        let name = format!("{}-{}", Uuid::new_v4(), sanitize(filename));
        let path = self.dir.join(name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// Remove a staged file. Missing files are not an error.
    pub async fn discard(&self, path: &Path) {
        if let Err(err) = tokio::fs::remove_file(path).await {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), %err, "failed to discard staged upload");
            }
        }
    }
}

/// Keep only the final path component and drop characters that could
/// escape the spool directory.
fn sanitize(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or("");
    let cleaned: String = base.chars().filter(|c| !matches!(c, '\0' | ':')).collect();
    if cleaned.is_empty() {
        "upload.wav".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn stage_writes_bytes_under_spool_dir() {
        let tmp = TempDir::new().unwrap();
        let staging = Staging::new(tmp.path().join("spool")).unwrap();

        let path = staging.stage("clip.wav", b"RIFF....").await.unwrap();

        assert!(path.starts_with(staging.dir()));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"RIFF....");
    }

    #[tokio::test]
    async fn staged_names_are_unique_per_upload() {
        let tmp = TempDir::new().unwrap();
        let staging = Staging::new(tmp.path()).unwrap();

        let first = staging.stage("clip.wav", b"a").await.unwrap();
        let second = staging.stage("clip.wav", b"b").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn discard_removes_the_file() {
        let tmp = TempDir::new().unwrap();
        let staging = Staging::new(tmp.path()).unwrap();

        let path = staging.stage("clip.wav", b"a").await.unwrap();
        staging.discard(&path).await;

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn discard_tolerates_missing_files() {
        let tmp = TempDir::new().unwrap();
        let staging = Staging::new(tmp.path()).unwrap();

        staging.discard(&tmp.path().join("never-staged.wav")).await;
    }

    #[test]
    fn sanitize_strips_directory_components() {
        assert_eq!(sanitize("../../etc/passwd"), "passwd");
        assert_eq!(sanitize(r"C:\Users\x\clip.wav"), "clip.wav");
        assert_eq!(sanitize("clip.wav"), "clip.wav");
        assert_eq!(sanitize(""), "upload.wav");
    }
}
