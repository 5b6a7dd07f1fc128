//! Simple decoder to inspect serialized registry entities.

use std::fs;

use feast_entity::{decode_entity_with_options, DecodeOptions, Entity};

fn print_entity(entity: &Entity) {
    println!("Name: {}", entity.name());
    if !entity.description().is_empty() {
        println!("Description: {}", entity.description());
    }
    if !entity.owner().is_empty() {
        println!("Owner: {}", entity.owner());
    }
    if !entity.join_key().is_empty() {
        println!("Legacy join key: {}", entity.join_key());
    }

    println!("\n=== Join Keys ({}) ===", entity.join_keys().len());
    for (name, value_type) in entity.join_keys() {
        println!("  {} : {}", name, value_type);
    }

    if !entity.tags().is_empty() {
        println!("\n=== Tags ({}) ===", entity.tags().len());
        for (key, value) in entity.tags() {
            println!("  {} = {}", key, value);
        }
    }

    if let Some(ts) = entity.created_timestamp() {
        println!("\nCreated: {}", ts);
    }
    if let Some(ts) = entity.last_updated_timestamp() {
        println!("Last updated: {}", ts);
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "entity.pb".to_string());
    let strict = args.any(|arg| arg == "--strict");

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes\n", data.len());

    let options = if strict {
        DecodeOptions::strict()
    } else {
        DecodeOptions::default()
    };

    match decode_entity_with_options(&data, options) {
        Ok(entity) => print_entity(&entity),
        Err(err) => {
            eprintln!("{} {}", err.code().code(), err);
            std::process::exit(1);
        }
    }
}
