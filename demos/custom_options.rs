//! Customizing YAML output with EmitterOptions.
//!
//! Run with: cargo run --example custom_options

use serde::Serialize;
use serde_yaml_emit::{to_string_with_options, EmitterOptions, LineBreak, Version};
use std::error::Error;

#[derive(Debug, Serialize)]
struct Config {
    name: String,
    version: String,
    debug: bool,
    features: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        debug: true,
        features: vec!["search".to_string(), "export".to_string()],
    };

    println!("Default (block, indent 2):");
    println!("{}", serde_yaml_emit::to_string(&config)?);

    println!("Indent 4, indentless sequences:");
    let options = EmitterOptions::new()
        .with_indent(4)
        .with_indentless_sequences(true);
    println!("{}", to_string_with_options(&config, options)?);

    println!("Explicit markers and a version directive:");
    let options = EmitterOptions::new()
        .with_explicit_start(true)
        .with_explicit_end(true)
        .with_version(Version::V1_1)
        .with_tag("!app!", "tag:example.com,2024:");
    println!("{}", to_string_with_options(&config, options)?);

    println!("Canonical:");
    println!("{}", to_string_with_options(&config, EmitterOptions::canonical())?);

    println!("Pretty flow:");
    let options = EmitterOptions::pretty_flow();
    println!("{}", to_string_with_options(&config, options)?);

    println!("Narrow width, ASCII only:");
    let options = EmitterOptions::new()
        .with_width(30)
        .with_allow_unicode(false)
        .with_line_break(LineBreak::Unix);
    let note = "Grüße aus einer sehr langen Zeile, die umbrochen werden muss";
    println!("{}", to_string_with_options(&note, options)?);

    Ok(())
}
