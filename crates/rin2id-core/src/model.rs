use serde::{Deserialize, Serialize};

/// Delimiter wrapped around cross-reference identifiers (`@I1@`).
pub const XREF_DELIMITER: char = '@';

/// Stable handle to a node in a [`RecordTree`](crate::tree::RecordTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The synthetic root. It holds no record; top-level records are its children.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// One GEDCOM line.
///
/// `xref` is kept bare (`I1`), `value` is kept verbatim, so a pointer value
/// still carries its delimiters (`@I1@`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub level: u32,
    pub xref: Option<String>,
    pub tag: String,
    pub value: Option<String>,
}

impl Record {
    pub fn new(level: u32, tag: impl Into<String>) -> Self {
        Self {
            level,
            xref: None,
            tag: tag.into(),
            value: None,
        }
    }

    pub fn with_xref(mut self, xref: impl Into<String>) -> Self {
        self.xref = Some(xref.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn has_xref(&self) -> bool {
        self.xref.as_deref().is_some_and(|x| !x.is_empty())
    }

    /// Value as a string slice, empty when absent.
    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// True when the value is a reference to another record (`@X@`).
    ///
    /// Escapes such as `@#DJULIAN@` are not pointers.
    pub fn is_pointer(&self) -> bool {
        self.pointer().is_some()
    }

    /// The bare identifier this record points at, if its value is a pointer.
    pub fn pointer(&self) -> Option<&str> {
        let inner = self
            .value
            .as_deref()?
            .strip_prefix(XREF_DELIMITER)?
            .strip_suffix(XREF_DELIMITER)?;

        if inner.is_empty() || inner.starts_with('#') || inner.contains(XREF_DELIMITER) {
            return None;
        }
        Some(inner)
    }
}

/// Wrap a bare identifier in the cross-reference delimiters.
pub fn wrap_xref(id: &str) -> String {
    let mut s = String::with_capacity(id.len() + 2);
    s.push(XREF_DELIMITER);
    s.push_str(id);
    s.push(XREF_DELIMITER);
    s
}
