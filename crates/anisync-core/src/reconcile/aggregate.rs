use anisync_api::{SeriesMetadata, ViewingEvent};
use chrono::Datelike;

use crate::models::{SeasonAggregate, SeriesAggregate};

/// Earliest year the user could have watched this series.
///
/// Air dates win over premium availability dates, which win over the
/// catalog's launch year.
pub fn resolve_start_year(
    series: &SeriesMetadata,
    series_id: &str,
    history: &[ViewingEvent],
) -> i32 {
    let events = || {
        history
            .iter()
            .filter(move |event| event.series_id.as_deref() == Some(series_id))
    };

    events()
        .filter_map(|event| event.air_date)
        .map(|date| date.year())
        .min()
        .or_else(|| {
            events()
                .filter_map(|event| event.premium_available_date)
                .map(|date| date.year())
                .min()
        })
        .unwrap_or(series.launch_year)
}

pub fn build_series_aggregate(
    series: &SeriesMetadata,
    series_id: &str,
    seasons: Vec<SeasonAggregate>,
    history: &[ViewingEvent],
) -> SeriesAggregate {
    debug_assert!(!seasons.is_empty(), "series aggregate needs at least one season");

    let title = series.title.trim().to_string();
    SeriesAggregate {
        sort_title: title.clone(),
        original_title: title.clone(),
        title,
        external_id: series.id.clone(),
        start_year: resolve_start_year(series, series_id, history),
        seasons,
        rating: 0,
    }
}
