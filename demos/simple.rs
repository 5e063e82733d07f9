//! Basic YAML serialization of Serde types.
//!
//! Run with: cargo run --example simple

use serde::Serialize;
use serde_yaml_emit::to_string;
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    email: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            roles: vec!["admin".to_string()],
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
            roles: vec![],
        },
    ];

    // Serialize to YAML
    let yaml = to_string(&users)?;
    println!("YAML output:\n{}", yaml);

    // Strings that would read back as another type are quoted
    let tricky = vec!["yes", "123", "~", " padded", "plain words"];
    println!("Quoted where needed:\n{}", to_string(&tricky)?);

    Ok(())
}
