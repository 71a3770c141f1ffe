//! World-clock row assembly: which cities to show, in what order, and the
//! per-city display fields. Table layout itself lives in the CLI.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::cities::{City, DEFAULT_TIME_FORMAT};

/// One row of the world-clock table.
#[derive(Debug, Clone)]
pub struct ClockRow {
    pub id: u32,
    pub name: String,
    pub time_text: String,
    pub tz_name: String,
    pub night: bool,
    pub country: String,
    pub state: String,
    pub lat: f64,
    pub lng: f64,
}

/// Prepends the home city to the requested list, removing duplicates.
pub fn prepend_home_city(home: u32, requested: &[u32]) -> Vec<u32> {
    let mut ids = vec![home];
    ids.extend(requested.iter().copied().filter(|id| *id != home));
    ids
}

/// Every known city id, ordered west to east (by longitude).
pub fn ids_by_longitude(cities: &BTreeMap<u32, City>) -> Vec<u32> {
    let mut ordered: Vec<&City> = cities.values().collect();
    ordered.sort_by(|a, b| a.lng.total_cmp(&b.lng));
    ordered.iter().map(|city| city.id).collect()
}

/// Builds display rows for the given city ids at the given instant.
///
/// Unknown ids are skipped with a warning rather than failing the whole
/// table.
pub fn clock_rows(cities: &BTreeMap<u32, City>, ids: &[u32], now: DateTime<Utc>) -> Vec<ClockRow> {
    ids.iter()
        .filter_map(|id| {
            let Some(city) = cities.get(id) else {
                tracing::warn!(id, "skipping unknown city id");
                return None;
            };
            Some(ClockRow {
                id: city.id,
                name: city.name.clone(),
                time_text: city.time_text_at(now, DEFAULT_TIME_FORMAT),
                tz_name: city.tz.name().to_string(),
                night: city.is_night_at(now),
                country: city.country.clone(),
                state: city.state.clone(),
                lat: city.lat,
                lng: city.lng,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::cities::load_cities;

    #[test]
    fn home_city_is_first_and_deduplicated() {
        assert_eq!(prepend_home_city(5, &[1, 5, 2]), vec![5, 1, 2]);
        assert_eq!(prepend_home_city(5, &[]), vec![5]);
    }

    #[test]
    fn unknown_ids_are_skipped() {
        let cities = load_cities().unwrap();
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let rows = clock_rows(&cities, &[50388, 999_999], now);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Berkeley");
    }

    #[test]
    fn rows_preserve_requested_order() {
        let cities = load_cities().unwrap();
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let rows = clock_rows(&cities, &[76395, 50388], now);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Tokyo", "Berkeley"]);
    }

    #[test]
    fn longitude_order_runs_west_to_east() {
        let cities = load_cities().unwrap();
        let ids = ids_by_longitude(&cities);
        let lngs: Vec<f64> = ids.iter().map(|id| cities[id].lng).collect();
        assert!(lngs.windows(2).all(|w| w[0] <= w[1]));
        // Honolulu is the westernmost of the embedded set
        assert_eq!(cities[&ids[0]].name, "Honolulu");
    }
}
