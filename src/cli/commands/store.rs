use std::fs;

use anyhow::Context;
use serde_json::json;

use crate::config::StoreConfig;
use crate::state::{FlagRecord, FlyState, StateStore, StoreFile};

fn load(file: &StoreFile) -> anyhow::Result<StateStore> {
    file.load()
        .with_context(|| format!("Fly state unavailable ({})", file.path().display()))
}

fn save(file: &StoreFile, store: &StateStore) -> anyhow::Result<()> {
    if let Some(parent) = file.path().parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    file.save(store)?;
    Ok(())
}

pub fn handle_set(config: &StoreConfig, player: &str, state: FlyState) -> anyhow::Result<()> {
    let file = config.store_file();
    let mut store = load(&file)?;
    store.set(player, state);
    save(&file, &store)?;
    println!("{player}: {state}");
    Ok(())
}

pub fn handle_show(config: &StoreConfig, player: &str) -> anyhow::Result<()> {
    let store = load(&config.store_file())?;
    match store.lookup(player) {
        Some(state) => println!("{player}: {state}"),
        None => println!("{player}: {} (default)", store.get(player)),
    }
    Ok(())
}

pub fn handle_list(config: &StoreConfig, json: bool) -> anyhow::Result<()> {
    let file = config.store_file();
    let store = load(&file)?;
    let records: Vec<FlagRecord> = store.records().collect();

    if json {
        let output = json!({
            "path": file.path(),
            "players": records,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No stored fly states in {}", file.path().display());
    }
    for record in records {
        println!("{}: {}", record.id, record.state);
    }
    Ok(())
}

pub fn handle_reset(config: &StoreConfig, player: &str) -> anyhow::Result<()> {
    let file = config.store_file();
    let mut store = load(&file)?;
    match store.remove(player) {
        Some(previous) => {
            save(&file, &store)?;
            println!("{player}: reset (was {previous})");
        }
        None => println!("{player}: nothing stored"),
    }
    Ok(())
}
