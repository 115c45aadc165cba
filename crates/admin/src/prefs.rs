//! Notification preferences.
//!
//! A small JSON file records when the dashboard notification tray was
//! last cleared. New-order notifications stay suppressed for 24 hours
//! after a clear, then resurface.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// How long a clear suppresses notifications.
const SUPPRESSION_HOURS: i64 = 24;

/// Persisted preference state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrefsFile {
    notifications_cleared_at: Option<DateTime<Utc>>,
}

/// Errors reading or writing the preferences file.
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("prefs i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("prefs serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// File-backed notification preferences.
pub struct AdminPrefs {
    path: PathBuf,
    lock: Mutex<()>,
}

impl AdminPrefs {
    /// Open preferences backed by the given file. A missing file reads as
    /// defaults.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether new-order notifications are currently suppressed.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError`] if the file cannot be read or parsed.
    pub async fn notifications_suppressed(&self, now: DateTime<Utc>) -> Result<bool, PrefsError> {
        let _guard = self.lock.lock().await;
        let prefs = self.read().await?;
        Ok(prefs.notifications_cleared_at.is_some_and(|cleared| {
            now - cleared < Duration::hours(SUPPRESSION_HOURS)
        }))
    }

    /// Record a notification clear at the given time.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError`] on read, parse, or write failure.
    pub async fn clear_notifications(&self, now: DateTime<Utc>) -> Result<(), PrefsError> {
        let _guard = self.lock.lock().await;
        let mut prefs = self.read().await?;
        prefs.notifications_cleared_at = Some(now);
        self.write(&prefs).await
    }

    async fn read(&self) -> Result<PrefsFile, PrefsError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(PrefsFile::default()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write(&self, prefs: &PrefsFile) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(prefs)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_means_not_suppressed() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = AdminPrefs::new(dir.path().join("admin-prefs.json"));
        assert!(!prefs.notifications_suppressed(Utc::now()).await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_suppresses_for_24_hours() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = AdminPrefs::new(dir.path().join("admin-prefs.json"));
        let cleared_at = Utc::now();
        prefs.clear_notifications(cleared_at).await.unwrap();

        assert!(
            prefs
                .notifications_suppressed(cleared_at + Duration::hours(1))
                .await
                .unwrap()
        );
        assert!(
            !prefs
                .notifications_suppressed(cleared_at + Duration::hours(24))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin-prefs.json");
        let cleared_at = Utc::now();
        {
            let prefs = AdminPrefs::new(&path);
            prefs.clear_notifications(cleared_at).await.unwrap();
        }
        let reopened = AdminPrefs::new(&path);
        assert!(
            reopened
                .notifications_suppressed(cleared_at + Duration::hours(2))
                .await
                .unwrap()
        );
    }
}
