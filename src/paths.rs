//! Turns a caller-supplied, possibly bare, file path into an existing workbook path.

use crate::error::InspectError;
use crate::platform::HostEnv;
use std::fmt;
use std::path::{Path, PathBuf};

const DESKTOP_DIR: &str = "Desktop";
const DOWNLOADS_DIR: &str = "Downloads";

/// A filesystem path that existed when it was resolved.
///
/// Only [`PathResolver`] constructs it; nothing guarantees the file still exists
/// by the time it is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookPath(PathBuf);

impl WorkbookPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for WorkbookPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for WorkbookPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[derive(Debug, Clone)]
pub struct PathResolver {
    host: HostEnv,
}

impl PathResolver {
    pub fn new(host: HostEnv) -> Self {
        Self { host }
    }

    /// Expand a leading `~` against the host's home directory.
    pub fn expand(&self, input: &str) -> PathBuf {
        let expanded = shellexpand::tilde_with_context(input, || {
            self.host.home_dir().map(|home| home.to_string_lossy().into_owned())
        });
        PathBuf::from(expanded.as_ref())
    }

    /// Candidate paths for `input`, in the order they are probed.
    ///
    /// The expanded literal path always comes first. Desktop and Downloads follow
    /// only when the platform treats `input` as a bare filename and a home
    /// directory is known.
    pub fn search_locations(&self, input: &str) -> Vec<PathBuf> {
        let mut locations = vec![self.expand(input)];
        if self.host.platform.treats_as_bare_filename(input)
            && let Some(home) = self.host.home_dir()
        {
            locations.push(home.join(DESKTOP_DIR).join(input));
            locations.push(home.join(DOWNLOADS_DIR).join(input));
        }
        locations
    }

    pub fn resolve(&self, input: &str) -> Result<WorkbookPath, InspectError> {
        for (idx, candidate) in self.search_locations(input).into_iter().enumerate() {
            let exists = candidate.exists();
            tracing::debug!(candidate = %candidate.display(), exists, "probing workbook location");
            if exists {
                if idx > 0 {
                    tracing::info!(
                        input = input,
                        resolved = %candidate.display(),
                        platform = %self.host.platform,
                        "resolved bare filename from default folder"
                    );
                }
                return Ok(WorkbookPath(candidate));
            }
        }
        Err(InspectError::FileNotFound {
            path: input.to_string(),
        })
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(HostEnv::detect())
    }
}
