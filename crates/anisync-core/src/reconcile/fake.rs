//! In-memory catalog used by the reconciliation tests.

use std::collections::HashMap;
use std::sync::Mutex;

use anisync_api::{
    CatalogService, EpisodeMetadata, SeasonMetadata, SeriesMetadata, ViewingEvent,
};
use chrono::{DateTime, TimeZone, Utc};

#[derive(Debug, thiserror::Error)]
pub enum FakeError {
    #[error("bad credentials")]
    Auth,
    #[error("{0} unavailable")]
    Unavailable(&'static str),
    #[error("unknown series {0}")]
    UnknownSeries(String),
}

#[derive(Default)]
pub struct FakeCatalog {
    pub history: Vec<ViewingEvent>,
    pub series: HashMap<String, SeriesMetadata>,
    pub seasons: HashMap<String, Vec<SeasonMetadata>>,
    pub episodes: HashMap<String, Vec<EpisodeMetadata>>,
    /// Name of the operation that should fail, if any.
    pub fail_on: Option<&'static str>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_series(
        mut self,
        id: &str,
        title: &str,
        launch_year: i32,
        episode_count: u32,
    ) -> Self {
        self.series.insert(
            id.into(),
            SeriesMetadata {
                id: id.into(),
                title: title.into(),
                launch_year,
                episode_count,
            },
        );
        self
    }

    /// Add a season whose episodes are numbered `first..=last`.
    pub fn with_season(
        mut self,
        series_id: &str,
        season_id: &str,
        season_number: u32,
        sequence_number: Option<f64>,
        episodes: std::ops::RangeInclusive<u32>,
    ) -> Self {
        self.seasons
            .entry(series_id.into())
            .or_default()
            .push(SeasonMetadata {
                id: season_id.into(),
                season_number,
                sequence_number,
                title: Some(format!("Season {season_number}")),
            });
        self.episodes.insert(
            season_id.into(),
            episodes
                .map(|n| EpisodeMetadata {
                    episode_number: Some(n),
                })
                .collect(),
        );
        self
    }

    pub fn with_history(mut self, history: Vec<ViewingEvent>) -> Self {
        self.history = history;
        self
    }

    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String, operation: &'static str) -> Result<(), FakeError> {
        self.calls.lock().unwrap().push(call);
        if self.fail_on == Some(operation) {
            return Err(FakeError::Unavailable(operation));
        }
        Ok(())
    }
}

impl CatalogService for FakeCatalog {
    type Session = String;
    type Error = FakeError;

    async fn authenticate(&self) -> Result<String, FakeError> {
        self.calls.lock().unwrap().push("authenticate".into());
        if self.fail_on == Some("authenticate") {
            return Err(FakeError::Auth);
        }
        Ok("session".into())
    }

    async fn get_history(&self, _session: &String) -> Result<Vec<ViewingEvent>, FakeError> {
        self.record("get_history".into(), "get_history")?;
        Ok(self.history.clone())
    }

    async fn get_series(
        &self,
        _session: &String,
        series_id: &str,
    ) -> Result<SeriesMetadata, FakeError> {
        self.record(format!("get_series:{series_id}"), "get_series")?;
        self.series
            .get(series_id)
            .cloned()
            .ok_or_else(|| FakeError::UnknownSeries(series_id.into()))
    }

    async fn get_seasons(
        &self,
        _session: &String,
        series_id: &str,
    ) -> Result<Vec<SeasonMetadata>, FakeError> {
        self.record(format!("get_seasons:{series_id}"), "get_seasons")?;
        Ok(self.seasons.get(series_id).cloned().unwrap_or_default())
    }

    async fn get_episodes(
        &self,
        _session: &String,
        season_id: &str,
    ) -> Result<Vec<EpisodeMetadata>, FakeError> {
        self.record(format!("get_episodes:{season_id}"), "get_episodes")?;
        Ok(self.episodes.get(season_id).cloned().unwrap_or_default())
    }
}

/// A viewing event with no dates attached.
pub fn event(series_id: &str, season_id: &str, episode_number: Option<u32>) -> ViewingEvent {
    ViewingEvent {
        episode_number,
        season_id: season_id.into(),
        series_id: Some(series_id.into()),
        air_date: None,
        premium_available_date: None,
    }
}

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}
