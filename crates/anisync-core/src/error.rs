use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("catalog returned no episodes for season {season_id} of series {series_id}")]
    EmptySeason {
        series_id: String,
        season_id: String,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
