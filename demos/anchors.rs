//! Shared nodes become anchors and aliases.
//!
//! Run with: cargo run --example anchors

use serde_yaml_emit::{node, node_to_string, EmitterOptions, Node, Serializer};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Cloning a node shares it; the body is written once
    let defaults = node!({"retries": 3, "timeout": 30});
    let environments = node!({
        "dev": (defaults.clone()),
        "staging": (defaults.clone()),
        "prod": {"retries": 5, "timeout": 30}
    });
    println!("Shared defaults:\n{}", node_to_string(&environments)?);

    // Caller-chosen names are kept and generated names avoid them
    let named = Node::from("primary").with_anchor("id1");
    let other = node!(["secondary"]);
    let doc = Node::seq(vec![named.clone(), other.clone(), named, other]);
    println!("Named anchors:\n{}", node_to_string(&doc)?);

    // Anchor numbering starts again in every document
    let mut serializer = Serializer::new(Vec::new(), EmitterOptions::new());
    serializer.open()?;
    for _ in 0..2 {
        let item = node!("repeated");
        serializer.serialize(&Node::seq(vec![item.clone(), item]))?;
    }
    serializer.close()?;
    println!("Two documents:\n{}", String::from_utf8(serializer.into_inner())?);

    Ok(())
}
