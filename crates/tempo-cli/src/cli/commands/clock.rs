//! World-clock command handler: table layout over tempo-core rows.

use anyhow::Result;
use chrono::Utc;
use comfy_table::{Attribute, Cell, CellAlignment, ColumnConstraint, ContentArrangement, Table, Width};
use tempo_core::cities;
use tempo_core::config::Config;
use tempo_core::worldclock::{self, ClockRow, prepend_home_city};

pub struct ClockOptions {
    pub all: bool,
    pub cities: Option<Vec<u32>>,
    pub home_city: Option<u32>,
    pub column_width: Option<u16>,
    pub verbose: bool,
}

pub fn run(opts: &ClockOptions, config: &Config) -> Result<()> {
    let cities = cities::load_cities()?;

    let ids = if opts.all {
        worldclock::ids_by_longitude(&cities)
    } else {
        // CLI flags win over config
        let home = opts.home_city.unwrap_or(config.home_city);
        let requested = opts
            .cities
            .clone()
            .unwrap_or_else(|| config.requested_cities.clone());
        prepend_home_city(home, &requested)
    };

    let rows = worldclock::clock_rows(&cities, &ids, Utc::now());
    if rows.is_empty() {
        anyhow::bail!("No known cities to display. Use `tempo search <name>` to find city ids.");
    }

    let column_width = opts.column_width.unwrap_or(config.column_width);
    let table = build_table(&rows, column_width, opts.verbose);
    println!("{table}");
    Ok(())
}

fn build_table(rows: &[ClockRow], column_width: u16, verbose: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["City", "Local Time", "Timezone"];
    if verbose {
        header.extend(["Country", "State", "Lat", "Lng", "ID"]);
    }
    table.set_header(header);

    for row in rows {
        let marker = if row.night { "☾" } else { "☼" };
        let mut cells = vec![
            Cell::new(format!("{marker} {}", row.name)),
            Cell::new(&row.time_text),
            Cell::new(&row.tz_name),
        ];
        if verbose {
            cells.push(Cell::new(&row.country));
            cells.push(Cell::new(&row.state));
            cells.push(Cell::new(format!("{:.4}", row.lat)).set_alignment(CellAlignment::Right));
            cells.push(Cell::new(format!("{:.4}", row.lng)).set_alignment(CellAlignment::Right));
            cells.push(Cell::new(row.id).set_alignment(CellAlignment::Right));
        }
        if row.night {
            cells = cells
                .into_iter()
                .map(|cell| cell.add_attribute(Attribute::Dim))
                .collect();
        }
        table.add_row(cells);
    }

    if let Some(column) = table.column_mut(0) {
        column.set_constraint(ColumnConstraint::LowerBoundary(Width::Fixed(column_width)));
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(night: bool) -> ClockRow {
        ClockRow {
            id: 76395,
            name: "Tokyo".to_string(),
            time_text: "21:00 Mon JST".to_string(),
            tz_name: "Asia/Tokyo".to_string(),
            night,
            country: "Japan".to_string(),
            state: "Tokyo".to_string(),
            lat: 35.6762,
            lng: 139.6503,
        }
    }

    #[test]
    fn table_contains_city_and_time() {
        let table = build_table(&[sample_row(false)], 20, false);
        let text = table.to_string();
        assert!(text.contains("Tokyo"));
        assert!(text.contains("21:00 Mon JST"));
        assert!(text.contains("☼"));
    }

    #[test]
    fn night_rows_use_moon_marker() {
        let table = build_table(&[sample_row(true)], 20, false);
        assert!(table.to_string().contains("☾"));
    }

    #[test]
    fn verbose_adds_id_column() {
        let table = build_table(&[sample_row(false)], 20, true);
        let text = table.to_string();
        assert!(text.contains("76395"));
        assert!(text.contains("Japan"));
        assert!(text.contains("35.6762"));
    }
}
