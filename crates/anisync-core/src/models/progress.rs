use serde::{Deserialize, Serialize};

/// Watch progress for one season, in the shape the media-server sync expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonAggregate {
    pub season_number: u32,
    /// Always 0; ratings are sourced elsewhere.
    pub rating: u32,
    pub watched_episodes: u32,
    /// Bounds of the season's episode catalog, not of the watched subset.
    pub first_episode: u32,
    pub last_episode: u32,
    pub title: Option<String>,
}

/// Watch progress for one series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesAggregate {
    pub title: String,
    pub sort_title: String,
    pub original_title: String,
    pub external_id: String,
    pub start_year: i32,
    /// Never empty: a synthetic season stands in when the catalog links none.
    pub seasons: Vec<SeasonAggregate>,
    /// Always 0; ratings are sourced elsewhere.
    pub rating: u32,
}

impl SeriesAggregate {
    pub fn total_watched_episodes(&self) -> u32 {
        self.seasons.iter().map(|s| s.watched_episodes).sum()
    }
}
