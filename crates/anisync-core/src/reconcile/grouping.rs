use std::collections::{BTreeMap, BTreeSet, HashMap};

use anisync_api::ViewingEvent;

/// Watched season ids per series id.
pub type SeriesSeasons = BTreeMap<String, BTreeSet<String>>;

/// Group viewing events into series id → set of watched season ids.
///
/// Each season id is attributed to exactly one series; if two events
/// disagree the later one wins. Events without a series id (linear or
/// unmapped content) are dropped.
pub fn group_history(history: &[ViewingEvent]) -> SeriesSeasons {
    let season_to_series: HashMap<&str, &str> = history
        .iter()
        .filter_map(|event| {
            event
                .series_id
                .as_deref()
                .map(|series_id| (event.season_id.as_str(), series_id))
        })
        .collect();

    let mut grouped = SeriesSeasons::new();
    for (season_id, series_id) in season_to_series {
        grouped
            .entry(series_id.to_string())
            .or_default()
            .insert(season_id.to_string());
    }
    grouped
}

/// Number of distinct episode numbers among `events`.
///
/// Crunchyroll numbers episodes inconsistently within a season, so the
/// highest episode number seen is not a usable progress marker. Events
/// without an episode number are ignored.
pub fn count_watched_episodes<'a>(events: impl IntoIterator<Item = &'a ViewingEvent>) -> u32 {
    let distinct: BTreeSet<u32> = events
        .into_iter()
        .filter_map(|event| event.episode_number)
        .collect();
    distinct.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::fake::event;

    #[test]
    fn test_groups_seasons_by_series() {
        let history = vec![
            event("A", "A1", Some(1)),
            event("A", "A1", Some(2)),
            event("A", "A2", Some(1)),
            event("B", "B1", Some(5)),
        ];

        let grouped = group_history(&history);
        assert_eq!(grouped.len(), 2);
        assert_eq!(
            grouped["A"].iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["A1", "A2"]
        );
        assert_eq!(grouped["B"].len(), 1);
    }

    #[test]
    fn test_events_without_series_are_dropped() {
        let mut linear = event("A", "L1", Some(1));
        linear.series_id = None;
        let history = vec![linear, event("B", "B1", None)];

        let grouped = group_history(&history);
        assert_eq!(grouped.len(), 1);
        assert!(grouped.contains_key("B"));
    }

    #[test]
    fn test_empty_history_groups_to_nothing() {
        assert!(group_history(&[]).is_empty());
    }

    #[test]
    fn test_conflicting_series_for_season_last_wins() {
        let history = vec![event("A", "S1", Some(1)), event("B", "S1", Some(2))];

        let grouped = group_history(&history);
        assert_eq!(grouped.len(), 1);
        assert!(grouped["B"].contains("S1"));
    }

    #[test]
    fn test_count_distinct_episode_numbers() {
        let history = vec![
            event("A", "S1", Some(1)),
            event("A", "S1", Some(2)),
            event("A", "S1", Some(2)),
            event("A", "S1", None),
        ];
        assert_eq!(count_watched_episodes(&history), 2);
    }

    #[test]
    fn test_count_without_episode_numbers_is_zero() {
        let history = vec![event("A", "S1", None), event("A", "S1", None)];
        assert_eq!(count_watched_episodes(&history), 0);
    }
}
