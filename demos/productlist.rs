// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writes a product feed to stdout.
//!
//! Without arguments the built-in sample feed is written. With a path, the file is read as a
//! JSON node tree (`name`, `attributes`, `content`, `nodes`) or a list of them.

use std::fs;
use std::io;

use tracing_subscriber::EnvFilter;
use xmlfeed::{FeedWriter, ItemWriter, Node};

fn product() -> Node {
    Node::builder("product")
        .attr("type", "product type value")
        .append(Node::leaf("manufacturer", "manufacturer value"))
        .append(Node::leaf(
            "description",
            "Lorem ipsum & dolor consectetuer adipiscing elit",
        ))
        .build()
}

fn sample() -> Vec<Node> {
    vec![Node::builder("productlist")
        .attr("retailer", "www.example.com")
        .append(product())
        .append(product())
        .build()]
}

fn load(path: &str) -> Result<Vec<Node>, Box<dyn std::error::Error>> {
    let data = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&data)?;
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let nodes = match std::env::args().nth(1) {
        Some(path) => load(&path)?,
        None => sample(),
    };

    let stdout = io::stdout();
    let mut feed = FeedWriter::from_nodes(ItemWriter::new(stdout.lock()), &nodes)?;
    feed.write()?;
    Ok(())
}
