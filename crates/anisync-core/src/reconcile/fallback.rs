use anisync_api::{SeriesMetadata, ViewingEvent};

use super::grouping::count_watched_episodes;
use crate::models::SeasonAggregate;

/// Stand-in season for a series whose history the catalog could not link
/// to any of its seasons.
///
/// Season boundaries are unknown here, so the season spans episode 1 to
/// the series' total episode count, and progress is counted across the
/// whole series rather than per season. Draws only on series-level data
/// and never fails.
pub fn synthesize_fallback_season(
    series: &SeriesMetadata,
    series_id: &str,
    history: &[ViewingEvent],
) -> SeasonAggregate {
    let watched_episodes = count_watched_episodes(
        history
            .iter()
            .filter(|event| event.series_id.as_deref() == Some(series_id)),
    );

    SeasonAggregate {
        season_number: 1,
        rating: 0,
        watched_episodes,
        first_episode: 1,
        last_episode: series.episode_count,
        title: Some(series.title.trim().to_string()),
    }
}
