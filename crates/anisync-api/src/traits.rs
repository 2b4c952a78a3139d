//! Trait definitions for streaming catalog services.
//!
//! A catalog exposes the user's viewing history alongside series, season
//! and episode metadata. The reconciliation pipeline only talks to this
//! trait, so any provider (or an in-memory fake) can drive it.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A streaming catalog that can report watch history and content metadata.
pub trait CatalogService: Send + Sync {
    /// Authenticated session handle passed to every lookup.
    type Session: Send + Sync;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Establish a session with the provider.
    fn authenticate(&self) -> impl Future<Output = Result<Self::Session, Self::Error>> + Send;

    /// Fetch the full viewing history for the session's account.
    fn get_history(
        &self,
        session: &Self::Session,
    ) -> impl Future<Output = Result<Vec<ViewingEvent>, Self::Error>> + Send;

    /// Fetch series-level metadata.
    fn get_series(
        &self,
        session: &Self::Session,
        series_id: &str,
    ) -> impl Future<Output = Result<SeriesMetadata, Self::Error>> + Send;

    /// Fetch every season of a series, in catalog order.
    fn get_seasons(
        &self,
        session: &Self::Session,
        series_id: &str,
    ) -> impl Future<Output = Result<Vec<SeasonMetadata>, Self::Error>> + Send;

    /// Fetch every episode of a season, in catalog order.
    fn get_episodes(
        &self,
        session: &Self::Session,
        season_id: &str,
    ) -> impl Future<Output = Result<Vec<EpisodeMetadata>, Self::Error>> + Send;
}

/// One recorded instance of an episode being watched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewingEvent {
    pub episode_number: Option<u32>,
    pub season_id: String,
    /// Absent for content the provider never mapped to a series.
    pub series_id: Option<String>,
    pub air_date: Option<DateTime<Utc>>,
    pub premium_available_date: Option<DateTime<Utc>>,
}

/// Series-level catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMetadata {
    pub id: String,
    pub title: String,
    pub launch_year: i32,
    pub episode_count: u32,
}

/// Season catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonMetadata {
    pub id: String,
    pub season_number: u32,
    /// Provider ordering within the series; may be fractional (e.g. `1.5`).
    pub sequence_number: Option<f64>,
    pub title: Option<String>,
}

impl SeasonMetadata {
    /// Season number to report downstream: sequence number if present and
    /// nonzero, truncated to an integer, else the plain season number.
    pub fn display_number(&self) -> u32 {
        match self.sequence_number {
            Some(seq) if seq.is_finite() && seq != 0.0 => seq.trunc() as u32,
            _ => self.season_number,
        }
    }
}

/// Episode catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeMetadata {
    pub episode_number: Option<u32>,
}
