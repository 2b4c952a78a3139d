use reqwest::Client;
use serde::de::DeserializeOwned;

use super::auth::{self, ClientCredentials, CrunchyrollSession};
use super::error::CrunchyrollError;
use super::types::{EpisodeItem, ListResponse, SeasonItem, SeriesItem, WatchHistoryItem};
use crate::traits::{
    CatalogService, EpisodeMetadata, SeasonMetadata, SeriesMetadata, ViewingEvent,
};

const BASE_URL: &str = "https://www.crunchyroll.com";
const HISTORY_PAGE_SIZE: usize = 100;

/// Crunchyroll content API client.
pub struct CrunchyrollClient {
    email: String,
    password: String,
    credentials: ClientCredentials,
    locale: String,
    http: Client,
}

impl CrunchyrollClient {
    pub fn new(
        email: String,
        password: String,
        credentials: ClientCredentials,
        locale: String,
    ) -> Self {
        Self {
            email,
            password,
            credentials,
            locale,
            http: Client::new(),
        }
    }

    async fn check_response(
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, CrunchyrollError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(CrunchyrollError::Api {
                status,
                message: body,
            })
        }
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        session: &CrunchyrollSession,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ListResponse<T>, CrunchyrollError> {
        let resp = self
            .http
            .get(format!("{BASE_URL}{path}"))
            .bearer_auth(&session.access_token)
            .query(&[("locale", self.locale.as_str())])
            .query(query)
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| CrunchyrollError::Parse(e.to_string()))
    }
}

impl CatalogService for CrunchyrollClient {
    type Session = CrunchyrollSession;
    type Error = CrunchyrollError;

    async fn authenticate(&self) -> Result<CrunchyrollSession, CrunchyrollError> {
        auth::authenticate(&self.http, &self.credentials, &self.email, &self.password).await
    }

    async fn get_history(
        &self,
        session: &CrunchyrollSession,
    ) -> Result<Vec<ViewingEvent>, CrunchyrollError> {
        let path = format!("/content/v2/{}/watch-history", session.account_id);
        let mut events = Vec::new();
        let mut seen = 0usize;
        let mut page = 1u32;

        loop {
            let resp: ListResponse<WatchHistoryItem> = self
                .get_list(
                    session,
                    &path,
                    &[
                        ("page", page.to_string()),
                        ("page_size", HISTORY_PAGE_SIZE.to_string()),
                    ],
                )
                .await?;

            let fetched = resp.data.len();
            seen += fetched;
            events.extend(
                resp.data
                    .into_iter()
                    .filter_map(WatchHistoryItem::into_viewing_event),
            );

            let exhausted = resp.total.is_some_and(|total| seen >= total as usize);
            if fetched < HISTORY_PAGE_SIZE || exhausted {
                break;
            }
            page += 1;
        }

        tracing::debug!(entries = seen, episodes = events.len(), "Fetched watch history");
        Ok(events)
    }

    async fn get_series(
        &self,
        session: &CrunchyrollSession,
        series_id: &str,
    ) -> Result<SeriesMetadata, CrunchyrollError> {
        let resp: ListResponse<SeriesItem> = self
            .get_list(session, &format!("/content/v2/cms/series/{series_id}"), &[])
            .await?;

        resp.data
            .into_iter()
            .next()
            .ok_or_else(|| CrunchyrollError::NotFound(format!("series {series_id}")))?
            .into_metadata()
    }

    async fn get_seasons(
        &self,
        session: &CrunchyrollSession,
        series_id: &str,
    ) -> Result<Vec<SeasonMetadata>, CrunchyrollError> {
        let resp: ListResponse<SeasonItem> = self
            .get_list(
                session,
                &format!("/content/v2/cms/series/{series_id}/seasons"),
                &[],
            )
            .await?;

        Ok(resp.data.into_iter().map(Into::into).collect())
    }

    async fn get_episodes(
        &self,
        session: &CrunchyrollSession,
        season_id: &str,
    ) -> Result<Vec<EpisodeMetadata>, CrunchyrollError> {
        let resp: ListResponse<EpisodeItem> = self
            .get_list(
                session,
                &format!("/content/v2/cms/seasons/{season_id}/episodes"),
                &[],
            )
            .await?;

        Ok(resp.data.into_iter().map(Into::into).collect())
    }
}
