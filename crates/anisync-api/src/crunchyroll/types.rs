use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::error::CrunchyrollError;
use crate::traits::{EpisodeMetadata, SeasonMetadata, SeriesMetadata, ViewingEvent};

// ── Response envelopes ───────────────────────────────────────────

/// Standard `{ "total": n, "data": [...] }` envelope used by the content API.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    pub total: Option<u32>,
    pub data: Vec<T>,
}

// ── Auth ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub account_id: Option<String>,
    pub expires_in: Option<u64>,
    #[allow(dead_code)]
    pub token_type: Option<String>,
    #[allow(dead_code)]
    pub refresh_token: Option<String>,
}

// ── Watch history ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct WatchHistoryItem {
    pub panel: Option<Panel>,
    #[allow(dead_code)]
    pub date_played: Option<DateTime<Utc>>,
    #[allow(dead_code)]
    pub fully_watched: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct Panel {
    #[allow(dead_code)]
    pub id: String,
    #[allow(dead_code)]
    pub title: Option<String>,
    #[serde(rename = "type")]
    #[allow(dead_code)]
    pub kind: Option<String>,
    pub episode_metadata: Option<PanelEpisodeMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct PanelEpisodeMetadata {
    pub episode_number: Option<u32>,
    pub season_id: String,
    pub series_id: Option<String>,
    pub episode_air_date: Option<DateTime<Utc>>,
    pub premium_available_date: Option<DateTime<Utc>>,
}

// ── Content ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SeriesItem {
    pub id: String,
    pub title: String,
    pub series_launch_year: Option<i32>,
    pub episode_count: Option<u32>,
    #[allow(dead_code)]
    pub season_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SeasonItem {
    pub id: String,
    pub title: Option<String>,
    pub season_number: u32,
    pub season_sequence_number: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct EpisodeItem {
    #[allow(dead_code)]
    pub id: String,
    pub episode_number: Option<u32>,
}

// ── Conversions ──────────────────────────────────────────────────

impl WatchHistoryItem {
    /// Movies and other non-episode panels carry no episode metadata.
    pub fn into_viewing_event(self) -> Option<ViewingEvent> {
        let meta = self.panel?.episode_metadata?;
        Some(ViewingEvent {
            episode_number: meta.episode_number,
            season_id: meta.season_id,
            series_id: meta.series_id.filter(|id| !id.is_empty()),
            air_date: meta.episode_air_date,
            premium_available_date: meta.premium_available_date,
        })
    }
}

impl SeriesItem {
    pub fn into_metadata(self) -> Result<SeriesMetadata, CrunchyrollError> {
        let launch_year = self.series_launch_year.ok_or_else(|| {
            CrunchyrollError::Parse(format!("series {} has no launch year", self.id))
        })?;

        Ok(SeriesMetadata {
            id: self.id,
            title: self.title,
            launch_year,
            episode_count: self.episode_count.unwrap_or(0),
        })
    }
}

impl From<SeasonItem> for SeasonMetadata {
    fn from(item: SeasonItem) -> Self {
        Self {
            id: item.id,
            season_number: item.season_number,
            sequence_number: item.season_sequence_number,
            title: item.title,
        }
    }
}

impl From<EpisodeItem> for EpisodeMetadata {
    fn from(item: EpisodeItem) -> Self {
        Self {
            episode_number: item.episode_number,
        }
    }
}
