//! File-backed exact-match search engine.
//!
//! Two operating modes over a single reference file:
//!
//! - **Reread**: every query streams the file line by line, so edits
//!   to the file are visible immediately and memory stays bounded for
//!   large files.
//! - **Cached**: the file is loaded once into an in-memory set guarded
//!   by a read/write lock; lookups are average O(1) and later file
//!   edits are not observed.

use crate::core::error::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::RwLock;
use tracing::debug;

/// Search mode, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Read the reference file fresh for every query
    Reread,
    /// Load the reference file once and serve lookups from memory
    Cached,
}

/// Exact-match search over the lines of the reference file.
pub struct SearchEngine {
    file_path: PathBuf,
    mode: SearchMode,
    /// Populated lazily in cached mode. `None` until the first
    /// successful load; readers never observe a partially built set
    /// because the load completes under the write lock.
    cache: RwLock<Option<HashSet<String>>>,
}

impl SearchEngine {
    /// Create an engine over the given file in the given mode.
    pub fn new(file_path: impl Into<PathBuf>, mode: SearchMode) -> Self {
        Self {
            file_path: file_path.into(),
            mode,
            cache: RwLock::new(None),
        }
    }

    /// The mode this engine was constructed with.
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Preload the cache so the first query does not pay the load
    /// cost. No-op in reread mode.
    ///
    /// A failure here is not permanent: cached-mode queries retry the
    /// load until the file becomes readable.
    pub async fn load(&self) -> Result<()> {
        if self.mode == SearchMode::Reread {
            return Ok(());
        }

        let mut guard = self.cache.write().await;
        if guard.is_none() {
            *guard = Some(self.read_lines().await?);
        }
        Ok(())
    }

    /// Whether the given term matches a full line of the reference
    /// file exactly.
    pub async fn contains(&self, term: &str) -> Result<bool> {
        match self.mode {
            SearchMode::Reread => self.contains_reread(term).await,
            SearchMode::Cached => self.contains_cached(term).await,
        }
    }

    /// Stream the file and stop at the first matching line. The file
    /// handle closes on every exit path, match or error.
    async fn contains_reread(&self, term: &str) -> Result<bool> {
        let file = File::open(&self.file_path).await?;
        let mut lines = BufReader::new(file).lines();

        while let Some(line) = lines.next_line().await? {
            if line == term {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn contains_cached(&self, term: &str) -> Result<bool> {
        {
            let guard = self.cache.read().await;
            if let Some(lines) = guard.as_ref() {
                return Ok(lines.contains(term));
            }
        }

        // The startup load failed or never ran. Retry under the write
        // lock; another query may have loaded it while we waited.
        let mut guard = self.cache.write().await;
        if guard.is_none() {
            debug!("Cache empty, loading {}", self.file_path.display());
            *guard = Some(self.read_lines().await?);
        }
        Ok(guard.as_ref().is_some_and(|lines| lines.contains(term)))
    }

    async fn read_lines(&self) -> Result<HashSet<String>> {
        let contents = tokio::fs::read_to_string(&self.file_path).await?;
        Ok(contents.lines().map(str::to_owned).collect())
    }
}
