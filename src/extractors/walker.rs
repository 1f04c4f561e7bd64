// src/extractors/walker.rs
//
// Pre-order traversal over the scraper tree, plus the small predicate type the
// extractors use to pick fragments out of it.

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Lazy pre-order walk: a node, then each of its children left to right.
/// Consumed once; start a new walk to traverse again.
pub struct DepthFirst<'a> {
    stack: Vec<NodeRef<'a, Node>>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = NodeRef<'a, Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push right to left so the leftmost child is popped first
        let mut child = node.last_child();
        while let Some(c) = child {
            self.stack.push(c);
            child = c.prev_sibling();
        }
        Some(node)
    }
}

pub fn walk(root: NodeRef<'_, Node>) -> DepthFirst<'_> {
    DepthFirst { stack: vec![root] }
}

/// Element nodes only, in walk order.
pub fn walk_elements(root: NodeRef<'_, Node>) -> impl Iterator<Item = ElementRef<'_>> {
    walk(root).filter_map(ElementRef::wrap)
}

/// Concatenated text leaves under `element`; `<br>` contributes a newline.
pub fn text_of(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in walk(*element) {
        match node.value() {
            Node::Text(t) => text.push_str(&t.text),
            Node::Element(e) if e.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}

#[derive(Debug, Clone)]
enum AttrConstraint {
    Equals(String, String),
    ClassContains(String),
    NonEmpty(String),
}

/// Tag name plus attribute constraints, all of which must hold.
#[derive(Debug, Clone)]
pub struct ElementMatcher {
    tag: String,
    constraints: Vec<AttrConstraint>,
}

impl ElementMatcher {
    pub fn tag(tag: &str) -> Self {
        Self { tag: tag.to_ascii_lowercase(), constraints: Vec::new() }
    }

    /// Attribute value must equal `value` exactly.
    pub fn attr_eq(mut self, name: &str, value: &str) -> Self {
        self.constraints.push(AttrConstraint::Equals(name.to_string(), value.to_string()));
        self
    }

    /// Raw `class` attribute must contain `needle` as a substring.
    pub fn class_contains(mut self, needle: &str) -> Self {
        self.constraints.push(AttrConstraint::ClassContains(needle.to_string()));
        self
    }

    pub fn attr_non_empty(mut self, name: &str) -> Self {
        self.constraints.push(AttrConstraint::NonEmpty(name.to_string()));
        self
    }

    pub fn matches(&self, element: ElementRef<'_>) -> bool {
        let value = element.value();
        if value.name() != self.tag {
            return false;
        }
        self.constraints.iter().all(|c| match c {
            AttrConstraint::Equals(name, expected) => value.attr(name) == Some(expected.as_str()),
            AttrConstraint::ClassContains(needle) => {
                value.attr("class").is_some_and(|class| class.contains(needle.as_str()))
            }
            AttrConstraint::NonEmpty(name) => value.attr(name).is_some_and(|v| !v.is_empty()),
        })
    }
}

/// Every element in `document` accepted by `matcher`, in document order.
pub fn find_all<'a>(
    document: &'a Html,
    matcher: &'a ElementMatcher,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    walk_elements(*document.root_element()).filter(move |el| matcher.matches(*el))
}
