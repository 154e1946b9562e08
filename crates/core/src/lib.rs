pub mod config;
pub mod fetcher;
pub mod matcher;
pub mod orchestrator;
pub mod playlist;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DownloadConfig,
    PlaylistConfig,
};
pub use fetcher::{ByteStream, FetcherConfig, HttpTransport, Transport, TransportError};
pub use matcher::{find_matches, has_video_extension, MatchResult, VIDEO_EXTENSIONS};
pub use orchestrator::{
    plan, sanitize_file_name, DownloadProgress, DownloadRunner, DownloadTask, Outcome,
    OutcomeStatus,
};
pub use playlist::{load_playlist, Entry, PlaylistError};
