//! City database for the world clock.
//!
//! Cities ship embedded in the binary (data/base_cities.json). Each entry
//! carries an IANA timezone name plus coordinates for day/night detection.

use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

/// Time format used in the world-clock table.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M %a %Z";

/// Raw city entry as stored in base_cities.json.
#[derive(Debug, Clone, Deserialize)]
struct CityRecord {
    id: u32,
    name: String,
    timezone: String,
    lat: f64,
    lng: f64,
    country: String,
    #[serde(default)]
    state: String,
}

/// A city with a validated time zone.
#[derive(Debug, Clone)]
pub struct City {
    pub id: u32,
    pub name: String,
    pub tz: Tz,
    pub lat: f64,
    pub lng: f64,
    pub country: String,
    pub state: String,
}

impl City {
    fn from_record(record: CityRecord) -> Result<Self> {
        let tz = Tz::from_str(&record.timezone).map_err(|e| {
            anyhow::anyhow!("Unknown timezone '{}' for city {}: {e}", record.timezone, record.name)
        })?;
        Ok(Self {
            id: record.id,
            name: record.name,
            tz,
            lat: record.lat,
            lng: record.lng,
            country: record.country,
            state: record.state,
        })
    }

    /// The current time in the city's time zone.
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }

    /// The given instant in the city's time zone, formatted for display.
    pub fn time_text_at(&self, now_utc: DateTime<Utc>, fmt: &str) -> String {
        now_utc.with_timezone(&self.tz).format(fmt).to_string()
    }

    /// The current time in the city's time zone, formatted for display.
    pub fn now_text(&self) -> String {
        self.time_text_at(Utc::now(), DEFAULT_TIME_FORMAT)
    }

    /// Whether the given instant falls between sunset and sunrise in the city.
    ///
    /// When the sun never rises or sets on the city's local date (polar
    /// regions), falls back to a crude heuristic: northern-hemisphere winter
    /// months count as night.
    pub fn is_night_at(&self, now_utc: DateTime<Utc>) -> bool {
        let local = now_utc.with_timezone(&self.tz);
        let (rise, set) =
            sunrise::sunrise_sunset(self.lat, self.lng, local.year(), local.month(), local.day());
        if rise >= set {
            let winter_northern = local.month() < 4 || local.month() > 10;
            return winter_northern && self.lat > 0.0;
        }
        let ts = now_utc.timestamp();
        ts < rise || ts > set
    }

    /// Whether it is currently night in the city.
    pub fn is_night(&self) -> bool {
        self.is_night_at(Utc::now())
    }
}

fn embedded_json() -> &'static str {
    include_str!("../data/base_cities.json")
}

/// Parses a city list from JSON text into an id-keyed map.
pub fn parse_cities(json: &str) -> Result<BTreeMap<u32, City>> {
    let records: Vec<CityRecord> =
        serde_json::from_str(json).context("Failed to parse city database")?;
    let mut cities = BTreeMap::new();
    for record in records {
        let city = City::from_record(record)?;
        if let Some(previous) = cities.insert(city.id, city) {
            anyhow::bail!("Duplicate city id {} ({})", previous.id, previous.name);
        }
    }
    Ok(cities)
}

/// Loads the embedded city database.
pub fn load_cities() -> Result<BTreeMap<u32, City>> {
    let cities = parse_cities(embedded_json())?;
    tracing::debug!(count = cities.len(), "loaded embedded city database");
    Ok(cities)
}
