use super::Result;
use crate::error::StorageError;
use crate::storage::config::PROFILE_DIR;
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const TOKEN_FILE: &str = "token";

/// File-backed store for the single bearer token. The file is owner-only;
/// every read re-checks the permissions and tightens them if the file was
/// widened externally.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    token_path: PathBuf,
}

impl CredentialStore {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(Self {
            token_path: config_dir.join(PROFILE_DIR).join(TOKEN_FILE),
        })
    }

    pub fn with_path(token_path: PathBuf) -> Self {
        Self { token_path }
    }

    pub fn path(&self) -> &Path {
        &self.token_path
    }

    /// Overwrite the stored token wholesale and restrict the file to the
    /// owning user.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.token_path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.file_io(parent, source))?;
        }

        fs::write(&self.token_path, token)
            .map_err(|source| self.file_io(&self.token_path, source))?;
        self.restrict_permissions()
    }

    /// Read the stored token. A missing or empty file is not an error.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.token_path.exists() {
            return Ok(None);
        }

        self.ensure_owner_only()?;

        let content = fs::read_to_string(&self.token_path)
            .map_err(|source| self.file_io(&self.token_path, source))?;
        let token = content.trim();
        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(token.to_string()))
        }
    }

    /// Remove the stored token. Idempotent.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.token_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.file_io(&self.token_path, source)),
        }
    }

    #[cfg(unix)]
    fn restrict_permissions(&self) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(&self.token_path, fs::Permissions::from_mode(0o600))
            .map_err(|source| self.file_io(&self.token_path, source))
    }

    #[cfg(not(unix))]
    fn restrict_permissions(&self) -> Result<()> {
        Ok(())
    }

    #[cfg(unix)]
    fn ensure_owner_only(&self) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(&self.token_path)
            .map_err(|source| self.file_io(&self.token_path, source))?;
        let mode = metadata.permissions().mode() & 0o777;

        // Group or other bits set means the file was widened externally.
        if mode & 0o077 != 0 {
            debug!(
                "tightening credential file permissions from {:o} to 600",
                mode
            );
            self.restrict_permissions()?;
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn ensure_owner_only(&self) -> Result<()> {
        Ok(())
    }

    fn file_io(&self, path: &Path, source: io::Error) -> StorageError {
        StorageError::FileIo {
            path: path.display().to_string(),
            source,
        }
    }
}
