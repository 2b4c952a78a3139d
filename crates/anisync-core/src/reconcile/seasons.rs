use std::collections::BTreeSet;

use anisync_api::{CatalogService, EpisodeMetadata, SeriesMetadata, ViewingEvent};
use tracing::debug;

use super::grouping::count_watched_episodes;
use crate::error::SyncError;
use crate::models::SeasonAggregate;

/// Series metadata together with the progress of each watched season.
#[derive(Debug, Clone)]
pub struct ResolvedSeries {
    pub series: SeriesMetadata,
    /// Catalog order. Empty when the catalog links none of the watched seasons.
    pub seasons: Vec<SeasonAggregate>,
}

/// Fetch a series and its seasons, keeping only the watched ones.
#[tracing::instrument(skip_all, fields(series_id = %series_id))]
pub async fn resolve_seasons<C: CatalogService>(
    catalog: &C,
    session: &C::Session,
    series_id: &str,
    watched_season_ids: &BTreeSet<String>,
    history: &[ViewingEvent],
) -> Result<ResolvedSeries, SyncError> {
    let series = catalog
        .get_series(session, series_id)
        .await
        .map_err(|e| SyncError::Catalog(format!("series {series_id}: {e}")))?;
    let all_seasons = catalog
        .get_seasons(session, series_id)
        .await
        .map_err(|e| SyncError::Catalog(format!("seasons of {series_id}: {e}")))?;

    let mut seasons = Vec::new();
    for season in all_seasons
        .into_iter()
        .filter(|s| watched_season_ids.contains(&s.id))
    {
        let episodes = catalog
            .get_episodes(session, &season.id)
            .await
            .map_err(|e| SyncError::Catalog(format!("episodes of {}: {e}", season.id)))?;
        if episodes.is_empty() {
            return Err(SyncError::EmptySeason {
                series_id: series_id.to_string(),
                season_id: season.id,
            });
        }

        let watched_episodes = count_watched_episodes(
            history.iter().filter(|event| event.season_id == season.id),
        );
        let (first_episode, last_episode) = episode_bounds(&episodes);
        let season_number = season.display_number();

        debug!(
            title = %series.title,
            season = season_number,
            watched = watched_episodes,
            "Resolved season progress"
        );

        seasons.push(SeasonAggregate {
            season_number,
            rating: 0,
            watched_episodes,
            first_episode,
            last_episode,
            title: season.title,
        });
    }

    Ok(ResolvedSeries { series, seasons })
}

/// First and last episode numbers in catalog order.
///
/// Unnumbered episodes (specials, recaps) are skipped. A season with no
/// numbered episodes at all spans `1..=len`.
fn episode_bounds(episodes: &[EpisodeMetadata]) -> (u32, u32) {
    let mut numbered = episodes.iter().filter_map(|e| e.episode_number);
    match numbered.next() {
        Some(first) => (first, numbered.last().unwrap_or(first)),
        None => (1, episodes.len() as u32),
    }
}
