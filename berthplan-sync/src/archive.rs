use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use chrono::{DateTime, Local};
use snafu::ResultExt;
use strum::Display;
use tracing::{error, info, instrument, warn};

use crate::{
    error::{Result, error::ArchiveSnafu},
    settings::ArchiveSettings,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ArchiveKind {
    #[strum(serialize = "ETC")]
    Etc,
    #[strum(serialize = "BP")]
    BerthPlan,
}

/// Local copy of every generated document, pruned by age.
#[derive(Debug, Clone)]
pub struct Archive {
    directory: PathBuf,
    retention: Duration,
}

impl Archive {
    pub fn new(settings: &ArchiveSettings) -> Archive {
        Archive {
            directory: PathBuf::from(&settings.directory),
            retention: settings.retention,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[instrument(skip(self, xml))]
    pub async fn store(&self, kind: ArchiveKind, xml: &str, at: DateTime<Local>) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .context(ArchiveSnafu {
                path: &self.directory,
            })?;

        let path = self
            .directory
            .join(format!("APMT_{kind}_{}.xml", at.format("%Y%m%d_%H%M%S")));

        tokio::fs::write(&path, xml)
            .await
            .context(ArchiveSnafu { path: &path })?;

        info!("archived xml to {}", path.display());
        Ok(path)
    }

    /// Deletes `.xml` files last modified before `now - retention` and returns how many were
    /// removed. Files that cannot be inspected or deleted are logged and skipped.
    #[instrument(skip(self))]
    pub async fn prune(&self, now: SystemTime) -> Result<usize> {
        let cutoff = now.checked_sub(self.retention).unwrap_or(SystemTime::UNIX_EPOCH);

        let mut entries = match tokio::fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(e).context(ArchiveSnafu {
                    path: &self.directory,
                });
            }
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await.context(ArchiveSnafu {
            path: &self.directory,
        })? {
            let path = entry.path();
            if !is_xml(&path) {
                continue;
            }

            let modified = match entry.metadata().await.and_then(|m| {
                if m.is_file() {
                    m.modified().map(Some)
                } else {
                    Ok(None)
                }
            }) {
                Ok(Some(modified)) => modified,
                Ok(None) => continue,
                Err(e) => {
                    warn!("failed to read modification time of {}: {e}", path.display());
                    continue;
                }
            };

            if modified >= cutoff {
                continue;
            }

            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    info!("deleted old xml file {}", path.display());
                    removed += 1;
                }
                Err(e) => error!("failed to delete {}: {e}", path.display()),
            }
        }

        Ok(removed)
    }
}

fn is_xml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}
