use std::time::Duration;

use serde::Deserialize;
use ureq::Agent;

use crate::config::LookupSettings;
use crate::error::LookupError;

use super::{DiscMetadata, MetadataLookup};

#[derive(Debug, Deserialize)]
struct DiscIdResponse {
    #[serde(default)]
    releases: Vec<Release>,
}

#[derive(Debug, Deserialize)]
struct Release {
    #[serde(default)]
    title: String,
    #[serde(rename = "artist-credit", default)]
    artist_credit: Vec<ArtistCredit>,
    #[serde(default)]
    media: Vec<Medium>,
}

#[derive(Debug, Deserialize)]
struct ArtistCredit {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Medium {
    #[serde(default)]
    tracks: Vec<MediumTrack>,
}

#[derive(Debug, Deserialize)]
struct MediumTrack {
    title: String,
}

/// Parse a `discid` web service response, keeping the first release.
pub fn parse_discid_response(body: &str) -> Result<Option<DiscMetadata>, LookupError> {
    let response: DiscIdResponse = serde_json::from_str(body)?;
    let Some(release) = response.releases.into_iter().next() else {
        return Ok(None);
    };

    Ok(Some(DiscMetadata {
        title: Some(release.title).filter(|t| !t.is_empty()),
        artist: release.artist_credit.into_iter().next().map(|a| a.name),
        track_titles: release
            .media
            .into_iter()
            .next()
            .map(|m| m.tracks.into_iter().map(|t| t.title).collect())
            .unwrap_or_default(),
    }))
}

/// MusicBrainz web service client.
pub struct MusicBrainz {
    agent: Agent,
    base_url: String,
    user_agent: String,
}

impl MusicBrainz {
    pub fn new(settings: &LookupSettings) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_millis(settings.timeout_ms)))
            .build()
            .into();

        Self {
            agent,
            base_url: settings.base_url.clone(),
            user_agent: settings.user_agent.clone(),
        }
    }

    pub(crate) fn request_url(&self, disc_id: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/discid/{disc_id}?inc=recordings+artists&fmt=json")
    }
}

impl MetadataLookup for MusicBrainz {
    fn lookup(&self, disc_id: &str) -> Result<Option<DiscMetadata>, LookupError> {
        let url = self.request_url(disc_id);
        tracing::debug!(url = %url, "metadata lookup started");

        let mut response = match self
            .agent
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(429)) => return Err(LookupError::RateLimited),
            // An unknown disc id is a miss, not a failure.
            Err(ureq::Error::StatusCode(404)) => return Ok(None),
            Err(ureq::Error::StatusCode(code)) => return Err(LookupError::Status(code)),
            Err(e) => return Err(LookupError::Unavailable(e.to_string())),
        };

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;
        parse_discid_response(&body)
    }
}
