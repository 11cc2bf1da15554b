// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#![deny(missing_docs)]

//! A small serializer built on top of rxml, streaming trees of nodes out as XML feed documents.
//!
//! This library exports a `Node` struct, which describes an element with its attributes, text
//! and children, and a `FeedWriter`, which writes a tree of them to any `StreamWriter`. The
//! provided `ItemWriter` encodes with rxml and hands every piece to a [`std::io::Write`] as soon
//! as it is produced, so the document is never built up in memory.
//!
//! # Example
//!
//! Run with `cargo run --features serde --example productlist`. Located in
//! `demos/productlist.rs`.
//!
//! ```rust
//! use xmlfeed::{FeedWriter, ItemWriter, Node};
//!
//! let feed = Node::builder("productlist")
//!     .attr("retailer", "www.example.com")
//!     .append(
//!         Node::builder("product")
//!             .attr("type", "t")
//!             .append(Node::leaf("manufacturer", "m"))
//!             .append(Node::leaf("description", "Lorem ipsum & dolor")),
//!     )
//!     .build();
//!
//! let mut writer = FeedWriter::new(ItemWriter::new(Vec::new()), &feed);
//! writer.write().unwrap();
//! let output = String::from_utf8(writer.into_inner().into_inner()).unwrap();
//!
//! assert_eq!(
//!     output,
//!     r#"<?xml version="1.0" encoding="UTF-8"?>
//! <productlist retailer="www.example.com">
//!   <product type="t">
//!     <manufacturer>m</manufacturer>
//!     <description>Lorem ipsum &amp; dolor</description>
//!   </product>
//! </productlist>
//! "#
//! );
//! ```
//!
//! # Usage
//!
//! To use `xmlfeed`, add this to your `Cargo.toml` under `dependencies`:
//!
//! ```toml,ignore
//! xmlfeed = "*"
//! ```

pub mod error;
pub mod feed;
pub mod node;
pub mod writer;


pub use error::{Error, Result};
pub use feed::FeedWriter;
pub use node::{Attrs, Children, Node, NodeBuilder};
pub use writer::{ItemWriter, StreamWriter, WriterConfig};
