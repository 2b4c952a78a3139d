//! Turns a catalog's per-episode viewing history into per-series,
//! per-season watch progress.
//!
//! History is grouped by series, each series' watched seasons are
//! resolved against the catalog one series at a time, and a synthetic
//! season 1 stands in whenever the catalog cannot link the watched
//! episodes to any season it knows about. Any catalog failure aborts
//! the whole run; there are no partial results.

pub mod aggregate;
pub mod fallback;
pub mod grouping;
pub mod seasons;

#[cfg(test)]
pub(crate) mod fake;

use anisync_api::{CatalogService, ViewingEvent};
use tracing::{debug, info, warn};

use crate::error::SyncError;
use crate::models::SeriesAggregate;

pub use aggregate::{build_series_aggregate, resolve_start_year};
pub use fallback::synthesize_fallback_season;
pub use grouping::{count_watched_episodes, group_history, SeriesSeasons};
pub use seasons::{resolve_seasons, ResolvedSeries};

/// Reconcile a history snapshot into one aggregate per watched series.
///
/// Returns `None` when no event in `history` belongs to a series, so
/// callers can tell "found nothing" apart from an explicit empty state.
pub async fn reconcile<C: CatalogService>(
    catalog: &C,
    session: &C::Session,
    history: &[ViewingEvent],
) -> Result<Option<Vec<SeriesAggregate>>, SyncError> {
    let grouped = group_history(history);
    debug!(events = history.len(), series = grouped.len(), "Grouped watch history");

    let mut watched = Vec::with_capacity(grouped.len());
    for (series_id, season_ids) in &grouped {
        let ResolvedSeries { series, mut seasons } =
            resolve_seasons(catalog, session, series_id, season_ids, history).await?;

        if seasons.is_empty() {
            warn!(
                series_id = %series_id,
                title = %series.title,
                "Catalog has not linked watched episodes to a season, inferring season 1"
            );
            seasons.push(synthesize_fallback_season(&series, series_id, history));
        }

        watched.push(build_series_aggregate(&series, series_id, seasons, history));
    }

    info!(count = watched.len(), "Found watched series");

    if watched.is_empty() {
        Ok(None)
    } else {
        Ok(Some(watched))
    }
}

/// Authenticate, pull the full history, and reconcile it.
pub async fn fetch_watched_series<C: CatalogService>(
    catalog: &C,
) -> Result<Option<Vec<SeriesAggregate>>, SyncError> {
    debug!("Retrieving watch count for series");

    let session = catalog
        .authenticate()
        .await
        .map_err(|e| SyncError::Catalog(format!("authentication failed: {e}")))?;
    let history = catalog
        .get_history(&session)
        .await
        .map_err(|e| SyncError::Catalog(format!("history: {e}")))?;

    reconcile(catalog, &session, &history).await
}
