//! Next-race lookup against the Ergast-compatible schedule API.
//!
//! The schedule document nests its races under `MRData.RaceTable.Races`.
//! Candidate endpoints are tried in order through [`crate::fallback`]; a
//! transport error, a non-200 status, or an unparseable body all count as a
//! failed endpoint.

use crate::error::AppError;
use crate::fallback::{Attempt, first_success};
use crate::model::parse_calendar_date;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::{Date, OffsetDateTime, UtcOffset};
use tracing::info;

pub const DEFAULT_ENDPOINTS: [&str; 2] = [
    "https://api.jolpi.ca/ergast/f1/current.json",
    "https://ergast.com/api/f1/current.json",
];

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

pub const SEASON_FINISHED: &str = "Season Finished";
pub const UNAVAILABLE: &str = "Unable to load race data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaceInfo {
    pub name: String,
    pub venue: String,
    pub locality: String,
    pub country: String,
    pub date: String,
}

impl RaceInfo {
    pub fn location_line(&self) -> String {
        format!("{} - {}, {}", self.venue, self.locality, self.country)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextRace {
    Upcoming(RaceInfo),
    SeasonFinished,
}

#[derive(Debug, Deserialize)]
struct ScheduleDocument {
    #[serde(rename = "MRData")]
    mr_data: MrData,
}

#[derive(Debug, Deserialize)]
struct MrData {
    #[serde(rename = "RaceTable")]
    race_table: RaceTable,
}

#[derive(Debug, Deserialize)]
struct RaceTable {
    #[serde(rename = "Races", default)]
    races: Vec<RaceRecord>,
}

#[derive(Debug, Deserialize)]
struct RaceRecord {
    #[serde(rename = "raceName", default)]
    race_name: String,
    #[serde(default)]
    date: String,
    #[serde(rename = "Circuit", default)]
    circuit: Option<CircuitRecord>,
}

#[derive(Debug, Deserialize)]
struct CircuitRecord {
    #[serde(rename = "circuitName", default)]
    circuit_name: Option<String>,
    #[serde(rename = "Location", default)]
    location: Option<LocationRecord>,
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    #[serde(default)]
    locality: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl From<RaceRecord> for RaceInfo {
    fn from(record: RaceRecord) -> Self {
        let (venue, location) = match record.circuit {
            Some(circuit) => (circuit.circuit_name.unwrap_or_default(), circuit.location),
            None => (String::new(), None),
        };
        let (locality, country) = match location {
            Some(location) => (
                location.locality.unwrap_or_default(),
                location.country.unwrap_or_default(),
            ),
            None => (String::new(), String::new()),
        };

        Self {
            name: record.race_name,
            venue,
            locality,
            country,
            date: record.date,
        }
    }
}

/// Parses a schedule body into races, in document order.
pub fn parse_schedule(body: &str) -> Result<Vec<RaceInfo>, AppError> {
    let document: ScheduleDocument = serde_json::from_str(body)
        .map_err(|err| AppError::invalid_data(format!("race schedule: {err}")))?;
    Ok(document
        .mr_data
        .race_table
        .races
        .into_iter()
        .map(RaceInfo::from)
        .collect())
}

/// First race dated on or after `today`. Input is assumed ascending; races
/// with an unreadable date are skipped.
pub fn select_next(races: Vec<RaceInfo>, today: Date) -> NextRace {
    races
        .into_iter()
        .find(|race| parse_calendar_date(&race.date).is_ok_and(|date| date >= today))
        .map_or(NextRace::SeasonFinished, NextRace::Upcoming)
}

/// Source of raw schedule documents.
pub trait RaceFeed {
    fn fetch(&self, url: &str) -> Result<String, AppError>;
}

pub struct HttpFeed {
    agent: ureq::Agent,
}

impl HttpFeed {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(timeout)
                .timeout_read(timeout)
                .user_agent(concat!("pitlane/", env!("CARGO_PKG_VERSION")))
                .build(),
        }
    }
}

impl Default for HttpFeed {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl RaceFeed for HttpFeed {
    fn fetch(&self, url: &str) -> Result<String, AppError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|err| AppError::io(format!("{url}: {err}")))?;

        let status = response.status();
        if status != 200 {
            return Err(AppError::io(format!("{url}: unexpected status {status}")));
        }

        response
            .into_string()
            .map_err(|err| AppError::io(format!("{url}: {err}")))
    }
}

pub struct RaceClient<F> {
    feed: F,
}

impl<F: RaceFeed> RaceClient<F> {
    pub fn new(feed: F) -> Self {
        Self { feed }
    }

    pub fn fetch_next(&self, endpoints: &[String]) -> Result<NextRace, AppError> {
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        let today = OffsetDateTime::now_utc().to_offset(offset).date();
        self.fetch_next_on(endpoints, today)
    }

    pub fn fetch_next_on(&self, endpoints: &[String], today: Date) -> Result<NextRace, AppError> {
        let attempts = endpoints.iter().map(|url| {
            Attempt::new(url.as_str(), move || {
                let body = self.feed.fetch(url)?;
                parse_schedule(&body)
            })
        });

        let races = first_success(attempts)?;
        let next = select_next(races, today);
        if let NextRace::Upcoming(race) = &next {
            info!(race = %race.name, date = %race.date, "next race resolved");
        }
        Ok(next)
    }
}
