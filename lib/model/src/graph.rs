use crate::Literal;
use std::collections::BTreeMap;
use std::fmt;

/// Direction of an edge relative to the preceding node in a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeDirection {
    Incoming,
    Outgoing,
    Undirected,
}

/// A node element in a graph match pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePattern {
    pub variable: Option<String>,
    pub labels: Vec<String>,
    /// Property constraints. A `BTreeMap` keeps equality independent of
    /// insertion order.
    pub properties: BTreeMap<String, Literal>,
}

impl NodePattern {
    pub fn new(variable: Option<String>) -> Self {
        Self {
            variable,
            labels: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for NodePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        if let Some(variable) = &self.variable {
            write!(f, "{variable}")?;
        }
        for label in &self.labels {
            write!(f, ":{label}")?;
        }
        f.write_str(")")
    }
}

/// An edge element in a graph match pattern.
///
/// `min_hops`/`max_hops` of `None` mean a single hop; a variable-length edge
/// sets at least one bound (`max_hops` of `None` with `min_hops` set means
/// unbounded above).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgePattern {
    pub variable: Option<String>,
    pub labels: Vec<String>,
    pub direction: EdgeDirection,
    pub min_hops: Option<u32>,
    pub max_hops: Option<u32>,
}

impl EdgePattern {
    pub fn new(variable: Option<String>, direction: EdgeDirection) -> Self {
        Self {
            variable,
            labels: Vec::new(),
            direction,
            min_hops: None,
            max_hops: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    #[must_use]
    pub fn with_hops(mut self, min_hops: Option<u32>, max_hops: Option<u32>) -> Self {
        self.min_hops = min_hops;
        self.max_hops = max_hops;
        self
    }

    #[must_use]
    pub fn is_variable_length(&self) -> bool {
        self.min_hops.is_some() || self.max_hops.is_some()
    }
}

impl fmt::Display for EdgePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction == EdgeDirection::Incoming {
            f.write_str("<-")?;
        } else {
            f.write_str("-")?;
        }
        f.write_str("[")?;
        if let Some(variable) = &self.variable {
            write!(f, "{variable}")?;
        }
        for label in &self.labels {
            write!(f, ":{label}")?;
        }
        if self.is_variable_length() {
            f.write_str("*")?;
            if let Some(min_hops) = self.min_hops {
                write!(f, "{min_hops}")?;
            }
            f.write_str("..")?;
            if let Some(max_hops) = self.max_hops {
                write!(f, "{max_hops}")?;
            }
        }
        f.write_str("]")?;
        if self.direction == EdgeDirection::Outgoing {
            f.write_str("->")
        } else {
            f.write_str("-")
        }
    }
}

/// One element of a path: patterns alternate between nodes and edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    Node(NodePattern),
    Edge(EdgePattern),
}

/// An alternating node/edge chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathPattern {
    pub elements: Vec<PathElement>,
}

impl PathPattern {
    pub fn new(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            match element {
                PathElement::Node(node) => write!(f, "{node}")?,
                PathElement::Edge(edge) => write!(f, "{edge}")?,
            }
        }
        Ok(())
    }
}

/// The full pattern of a graph match: an ordered list of paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MatchPattern {
    pub paths: Vec<PathPattern>,
}

impl MatchPattern {
    pub fn new(paths: Vec<PathPattern>) -> Self {
        Self { paths }
    }
}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{path}")?;
        }
        Ok(())
    }
}
