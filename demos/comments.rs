//! Attaching comments to keys by path.
//!
//! Run with: cargo run --example comments

use serde::Serialize;
use serde_yaml_emit::{to_string_with_comments, CommentStore, EmitterOptions};
use std::error::Error;

#[derive(Serialize)]
struct Database {
    host: String,
    port: u16,
}

#[derive(Serialize)]
struct Config {
    name: String,
    database: Database,
    workers: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "inventory".to_string(),
        database: Database {
            host: "db.internal".to_string(),
            port: 5432,
        },
        workers: 8,
    };

    let mut comments = CommentStore::new();
    comments.insert_dotted("", "Service configuration");
    comments.insert_dotted("database.port", "Change together with the firewall rules");
    comments.insert_dotted("workers", "Number of worker threads\nDefaults to the CPU count");

    println!("Short comments:");
    let yaml = to_string_with_comments(&config, &comments, EmitterOptions::new())?;
    println!("{}", yaml);

    println!("Long comments with a border:");
    let options = EmitterOptions::new()
        .with_long_comments(2, "=-")
        .with_long_comment_right_border("#");
    let yaml = to_string_with_comments(&config, &comments, options)?;
    println!("{}", yaml);

    Ok(())
}
