//! Config command handlers.

use anyhow::{Context, Result};
use tempo_core::cities;
use tempo_core::config::{Config, paths};

pub fn set_home(id: u32) -> Result<()> {
    ensure_known_city(id)?;
    Config::save_home_city(id).context("save home city")?;
    println!("Home city updated -> {id}");
    Ok(())
}

pub fn add_city(id: u32) -> Result<()> {
    ensure_known_city(id)?;
    let mut config = Config::load()?;

    if config.requested_cities.contains(&id) {
        println!("City {id} already in requested list.");
        return Ok(());
    }
    config.requested_cities.push(id);
    Config::save_requested_cities(&config.requested_cities).context("save requested cities")?;
    println!("Added city -> {id}");
    Ok(())
}

pub fn remove_city(id: u32) -> Result<()> {
    let mut config = Config::load()?;

    if !config.requested_cities.contains(&id) {
        println!("City {id} not found in requested list.");
        return Ok(());
    }
    config.requested_cities.retain(|cid| *cid != id);
    Config::save_requested_cities(&config.requested_cities).context("save requested cities")?;
    println!("Removed city -> {id}");
    Ok(())
}

pub fn reset() -> Result<()> {
    if Config::reset()? {
        println!("Removed configuration -> {}", paths::config_path().display());
    } else {
        println!("No config file found.");
    }
    Ok(())
}

pub fn show() -> Result<()> {
    let config = Config::load()?;
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn path() {
    println!("{}", paths::config_path().display());
}

fn ensure_known_city(id: u32) -> Result<()> {
    let cities = cities::load_cities()?;
    if !cities.contains_key(&id) {
        anyhow::bail!("Unknown city id {id}. Use `tempo search <name>` to find ids.");
    }
    Ok(())
}
