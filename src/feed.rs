// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Provides `FeedWriter`, which walks a `Node` tree and streams it to a `StreamWriter`.

use crate::error::{Error, Result};
use crate::node::Node;
use crate::writer::StreamWriter;

use tracing::{instrument, trace};

/// Writes one feed document, rooted at a single `Node`, to a sink.
///
/// The tree is only read. Ownership rules out cycles, so the traversal always terminates; its
/// recursion depth is the depth of the tree.
pub struct FeedWriter<'a, S> {
    sink: S,
    root: &'a Node,
}

impl<'a, S: StreamWriter> FeedWriter<'a, S> {
    /// Prepares a feed rooted at `root`. Nothing is written yet.
    pub fn new(sink: S, root: &'a Node) -> Self {
        FeedWriter { sink, root }
    }

    /// Prepares a feed whose root is the first of `nodes`; the others are ignored.
    pub fn from_nodes(sink: S, nodes: &'a [Node]) -> Result<Self> {
        match nodes.first() {
            Some(root) => Ok(FeedWriter::new(sink, root)),
            None => Err(Error::EmptyFeed),
        }
    }

    /// Writes the whole document, then flushes the sink.
    ///
    /// On error the sink is left with whatever was already written.
    #[instrument(skip_all, fields(root = self.root.name()))]
    pub fn write(&mut self) -> Result<()> {
        self.sink.start_document()?;
        self.sink.set_indent(true);
        write_node(&mut self.sink, self.root)?;
        self.sink.end_document()?;
        self.sink.flush()
    }

    /// Gives the sink back.
    pub fn into_inner(self) -> S {
        self.sink
    }
}

fn write_node<S: StreamWriter + ?Sized>(sink: &mut S, node: &Node) -> Result<()> {
    let name = node.name();
    if name.is_empty() {
        return Err(Error::MissingName);
    }
    trace!(name, "writing element");

    let has_attributes = node.has_attributes();
    let has_content = node.has_content();
    let has_children = node.has_children();

    if !has_children && !has_attributes {
        return sink.write_element(name, node.content().filter(|_| has_content));
    }

    sink.start_element(name)?;
    if has_attributes {
        write_attributes(sink, node)?;
    }
    if let Some(content) = node.content().filter(|_| has_content) {
        sink.write_text(content)?;
    }
    for child in node.children() {
        write_node(sink, child)?;
    }
    sink.end_element()
}

fn write_attributes<S: StreamWriter + ?Sized>(sink: &mut S, node: &Node) -> Result<()> {
    for (name, value) in node.attrs() {
        sink.write_attribute(name, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        StartDocument,
        Indent(bool),
        Start(String),
        Attr(String, String),
        Text(String),
        Element(String, Option<String>),
        End,
        EndDocument,
        Flush,
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
    }

    impl StreamWriter for Recorder {
        fn start_document(&mut self) -> Result<()> {
            self.events.push(Event::StartDocument);
            Ok(())
        }

        fn set_indent(&mut self, indent: bool) {
            self.events.push(Event::Indent(indent));
        }

        fn start_element(&mut self, name: &str) -> Result<()> {
            self.events.push(Event::Start(name.to_owned()));
            Ok(())
        }

        fn write_attribute(&mut self, name: &str, value: &str) -> Result<()> {
            self.events
                .push(Event::Attr(name.to_owned(), value.to_owned()));
            Ok(())
        }

        fn write_text(&mut self, text: &str) -> Result<()> {
            self.events.push(Event::Text(text.to_owned()));
            Ok(())
        }

        fn write_element(&mut self, name: &str, content: Option<&str>) -> Result<()> {
            self.events
                .push(Event::Element(name.to_owned(), content.map(str::to_owned)));
            Ok(())
        }

        fn end_element(&mut self) -> Result<()> {
            self.events.push(Event::End);
            Ok(())
        }

        fn end_document(&mut self) -> Result<()> {
            self.events.push(Event::EndDocument);
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.events.push(Event::Flush);
            Ok(())
        }
    }

    fn record(root: &Node) -> Vec<Event> {
        let mut recorder = Recorder::default();
        FeedWriter::new(&mut recorder, root).write().unwrap();
        recorder.events
    }

    fn s(x: &str) -> String {
        x.to_owned()
    }

    #[test]
    fn document_is_opened_and_closed_around_the_root() {
        let events = record(&Node::leaf("root", "x"));
        assert_eq!(
            events,
            [
                Event::StartDocument,
                Event::Indent(true),
                Event::Element(s("root"), Some(s("x"))),
                Event::EndDocument,
                Event::Flush,
            ]
        );
    }

    #[test]
    fn leaf_without_content() {
        let events = record(&Node::new("root"));
        assert_eq!(events[2], Event::Element(s("root"), None));
    }

    #[test]
    fn empty_content_is_written_as_no_content() {
        assert_eq!(record(&Node::leaf("root", "")), record(&Node::new("root")));

        let with_attr = Node::builder("root").attr("a", "1").content("").build();
        assert!(!record(&with_attr)
            .iter()
            .any(|event| matches!(event, Event::Text(_))));
    }

    #[test]
    fn attributes_keep_insertion_order() {
        let root = Node::builder("root")
            .attr("b", "2")
            .attr("a", "1")
            .build();
        assert_eq!(
            &record(&root)[2..6],
            [
                Event::Start(s("root")),
                Event::Attr(s("b"), s("2")),
                Event::Attr(s("a"), s("1")),
                Event::End,
            ]
        );
    }

    #[test]
    fn values_are_handed_over_unescaped() {
        let root = Node::builder("root")
            .attr("q", "say \"hi\"")
            .content("a & b")
            .build();
        let events = record(&root);
        assert!(events.contains(&Event::Attr(s("q"), s("say \"hi\""))));
        assert!(events.contains(&Event::Text(s("a & b"))));
    }

    #[test]
    fn content_comes_before_children_and_children_are_depth_first() {
        let root = Node::builder("root")
            .content("intro")
            .append(Node::builder("x").append(Node::leaf("x1", "1")))
            .append(Node::leaf("y", "2"))
            .build();
        assert_eq!(
            &record(&root)[2..9],
            [
                Event::Start(s("root")),
                Event::Text(s("intro")),
                Event::Start(s("x")),
                Event::Element(s("x1"), Some(s("1"))),
                Event::End,
                Event::Element(s("y"), Some(s("2"))),
                Event::End,
            ]
        );
    }

    #[test]
    fn missing_name_aborts_the_traversal() {
        let root = Node::builder("root")
            .append(Node::leaf("before", "1"))
            .append(Node::leaf("", "nameless"))
            .append(Node::leaf("after", "2"))
            .build();
        let mut recorder = Recorder::default();
        let result = FeedWriter::new(&mut recorder, &root).write();

        assert!(matches!(result, Err(Error::MissingName)));
        assert_eq!(
            recorder.events.last(),
            Some(&Event::Element(s("before"), Some(s("1"))))
        );
        assert!(!recorder.events.contains(&Event::Flush));
    }

    #[test]
    fn first_node_of_a_list_is_the_root() {
        let nodes = [Node::new("first"), Node::new("second")];
        let mut recorder = Recorder::default();
        FeedWriter::from_nodes(&mut recorder, &nodes)
            .unwrap()
            .write()
            .unwrap();
        assert_eq!(recorder.events[2], Event::Element(s("first"), None));
        assert!(!recorder
            .events
            .contains(&Event::Element(s("second"), None)));
    }

    #[test]
    fn empty_list_has_no_root() {
        let result = FeedWriter::from_nodes(Recorder::default(), &[]);
        assert!(matches!(result, Err(Error::EmptyFeed)));
    }

    #[test]
    fn constructing_writes_nothing() {
        let root = Node::new("root");
        let feed = FeedWriter::new(Recorder::default(), &root);
        assert!(feed.into_inner().events.is_empty());
    }
}
