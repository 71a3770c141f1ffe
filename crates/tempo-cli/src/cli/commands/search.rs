//! City search command handler.

use anyhow::Result;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use tempo_core::{cities, search};

/// Above this many hits the query is too broad to be useful.
const MAX_MATCHES: usize = 50;

pub fn run(query: &str) -> Result<()> {
    let cities = cities::load_cities()?;
    let hits = search::search_cities(&cities, query);

    if hits.is_empty() {
        println!("No matches for '{query}'.");
        return Ok(());
    }
    if hits.len() > MAX_MATCHES {
        anyhow::bail!("Too many matches ({}). Please narrow the query.", hits.len());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "State", "Country", "Timezone", "ID"]);
    for hit in &hits {
        table.add_row(vec![
            Cell::new(&hit.city.name),
            Cell::new(&hit.city.state),
            Cell::new(&hit.city.country),
            Cell::new(hit.city.tz.name()),
            Cell::new(hit.city.id).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("\nMatches for: '{query}'\n");
    println!("{table}");
    Ok(())
}
