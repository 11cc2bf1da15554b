// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Provides the `Node` struct, which describes one element of a feed, and a builder to create
//! them with.

use indexmap::IndexMap;

use std::slice;

/// An element of a feed tree.
///
/// A node always has a name. Its attributes, text content and children are each optional, and
/// an empty value is treated exactly like an absent one: a node whose content is `""` is written
/// the same way as a node without content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "IndexMap::is_empty")
    )]
    attributes: IndexMap<String, String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    content: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, alias = "nodes", skip_serializing_if = "Vec::is_empty")
    )]
    children: Vec<Node>,
}

impl Node {
    /// Returns a node with this name and nothing else.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use xmlfeed::Node;
    ///
    /// let node = Node::new("product");
    ///
    /// assert_eq!(node.name(), "product");
    /// assert_eq!(node.attr("type"), None);
    /// assert_eq!(node.content(), None);
    /// assert_eq!(node.children().count(), 0);
    /// ```
    pub fn new<S: Into<String>>(name: S) -> Node {
        Node {
            name: name.into(),
            attributes: IndexMap::new(),
            content: None,
            children: Vec::new(),
        }
    }

    /// Returns a simple name/value node.
    pub fn leaf<S: Into<String>, C: Into<String>>(name: S, content: C) -> Node {
        Node {
            content: Some(content.into()),
            ..Node::new(name)
        }
    }

    /// Return a builder for a `Node` with the given `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use xmlfeed::Node;
    ///
    /// let node = Node::builder("product")
    ///                 .attr("type", "book")
    ///                 .append(Node::leaf("manufacturer", "ACME"))
    ///                 .build();
    ///
    /// assert_eq!(node.name(), "product");
    /// assert_eq!(node.attr("type"), Some("book"));
    /// assert_eq!(node.children().next().unwrap().content(), Some("ACME"));
    /// ```
    pub fn builder<S: Into<String>>(name: S) -> NodeBuilder {
        NodeBuilder {
            root: Node::new(name),
        }
    }

    /// Returns a reference to the element name of this node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a reference to the value of the given attribute, if it exists, else `None`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns an iterator over the attributes of this node, in insertion order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use xmlfeed::Node;
    ///
    /// let node = Node::builder("a").attr("z", "1").attr("b", "2").build();
    ///
    /// let mut iter = node.attrs();
    ///
    /// assert_eq!(iter.next().unwrap(), ("z", "1"));
    /// assert_eq!(iter.next().unwrap(), ("b", "2"));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn attrs(&self) -> Attrs {
        Attrs {
            iter: self.attributes.iter(),
        }
    }

    /// Returns the text content of this node, if any.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns an iterator over the children of this node, in order.
    #[inline]
    pub fn children(&self) -> Children {
        Children {
            iter: self.children.iter(),
        }
    }

    /// Whether this node has at least one attribute.
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Whether this node has non-empty text content.
    ///
    /// ```rust
    /// use xmlfeed::Node;
    ///
    /// assert!(Node::leaf("a", "b").has_content());
    /// assert!(!Node::leaf("a", "").has_content());
    /// assert!(!Node::new("a").has_content());
    /// ```
    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Whether this node has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// An iterator over references to the children of a `Node`.
pub struct Children<'a> {
    iter: slice::Iter<'a, Node>,
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a> ExactSizeIterator for Children<'a> {}

/// An iterator over the attributes of a `Node`.
pub struct Attrs<'a> {
    iter: indexmap::map::Iter<'a, String, String>,
}

impl<'a> Iterator for Attrs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(x, y)| (x.as_ref(), y.as_ref()))
    }
}

/// A builder for `Node`s.
pub struct NodeBuilder {
    root: Node,
}

impl NodeBuilder {
    /// Sets an attribute. Setting an existing attribute again replaces its value but keeps its
    /// original position.
    pub fn attr<S: Into<String>, V: Into<String>>(mut self, name: S, value: V) -> NodeBuilder {
        self.root.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the text content.
    pub fn content<S: Into<String>>(mut self, content: S) -> NodeBuilder {
        self.root.content = Some(content.into());
        self
    }

    /// Appends a child node.
    pub fn append<T: Into<Node>>(mut self, node: T) -> NodeBuilder {
        self.root.children.push(node.into());
        self
    }

    /// Appends an iterator of child nodes.
    pub fn append_all<T: Into<Node>, I: IntoIterator<Item = T>>(mut self, iter: I) -> NodeBuilder {
        self.root.children.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Builds the `Node`.
    pub fn build(self) -> Node {
        self.root
    }
}

impl From<NodeBuilder> for Node {
    fn from(builder: NodeBuilder) -> Node {
        builder.build()
    }
}
