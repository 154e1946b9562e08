use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::fetcher::FetcherConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub playlist: PlaylistConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

/// Playlist source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistConfig {
    /// Path to the M3U playlist file.
    #[serde(default = "default_playlist_path")]
    pub path: PathBuf,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            path: default_playlist_path(),
        }
    }
}

fn default_playlist_path() -> PathBuf {
    PathBuf::from("chans.m3u")
}

/// Download destination configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadConfig {
    /// Directory that receives final files and their temp markers.
    /// Created if absent.
    #[serde(default = "default_destination")]
    pub destination: PathBuf,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            destination: default_destination(),
        }
    }
}

fn default_destination() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.playlist.path, PathBuf::from("chans.m3u"));
        assert_eq!(config.download.destination, PathBuf::from("."));
        assert_eq!(config.fetcher.timeout_secs, 30);
    }
}
