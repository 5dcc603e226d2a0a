use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum::{Display, EnumString};

/// Host platform family, as far as default-folder lookup is concerned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, ValueEnum, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Windows,
    #[value(name = "macos", alias = "darwin")]
    #[strum(to_string = "macos", serialize = "darwin")]
    #[serde(alias = "darwin")]
    MacOS,
    Other,
}

impl PlatformKind {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            PlatformKind::Windows
        } else if cfg!(target_os = "macos") {
            PlatformKind::MacOS
        } else {
            PlatformKind::Other
        }
    }

    /// Whether `input` looks like a bare filename on this platform, i.e. it carries
    /// none of the platform's own directory separator.
    ///
    /// Always false for [`PlatformKind::Other`].
    pub fn treats_as_bare_filename(&self, input: &str) -> bool {
        match self {
            PlatformKind::Windows => !input.contains('\\'),
            PlatformKind::MacOS => !input.contains('/'),
            PlatformKind::Other => false,
        }
    }
}

/// The host capabilities the path resolver is allowed to query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnv {
    pub platform: PlatformKind,
    pub home_dir: Option<PathBuf>,
}

impl HostEnv {
    pub fn new(platform: PlatformKind, home_dir: Option<PathBuf>) -> Self {
        Self { platform, home_dir }
    }

    pub fn detect() -> Self {
        Self::new(PlatformKind::current(), dirs::home_dir())
    }

    pub fn home_dir(&self) -> Option<&Path> {
        self.home_dir.as_deref()
    }
}

impl Default for HostEnv {
    fn default() -> Self {
        Self::detect()
    }
}
