//! Teardown of the data directory and its convenience link.

use super::app_data::AppData;
use super::error::AppDataError;

impl AppData {
    /// Remove the data directory tree and the convenience link.
    ///
    /// Both removals run concurrently. Only a failure to remove the directory
    /// is reported; a missing directory counts as success.
    pub async fn remove(&self) -> Result<(), AppDataError> {
        let path = self.data_dir()?;

        let (removed, _link) = tokio::join!(self.fs.remove_dir_all(&path), self.remove_symlink());

        removed.map_err(|source| AppDataError::TeardownFailed { path, source })
    }
}
