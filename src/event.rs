//! Document event model.
//!
//! The shape of a SAX-style `ContentHandler`/`LexicalHandler`/`DeclHandler`
//! triad, folded into one enum so event streams can be stored, replayed and
//! serialized (see [`crate::serializer::events_to_string`]).

use std::rc::Rc;

/// Content for StartElement events.
///
/// Attributes travel with the element start, in producer order. That order
/// is preserved exactly on output — never sorted, never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeContent {
    /// The namespace URI, or empty if none.
    pub uri: Rc<str>,
    /// The local name (without prefix), or empty if namespace processing
    /// is not being performed.
    pub local_name: Rc<str>,
    /// The qualified name (with prefix); this is what gets written.
    pub qname: Rc<str>,
    /// The attributes attached to the element, if any.
    pub attributes: Vec<AtContent>,
}

impl SeContent {
    /// Element ohne Namespace und ohne Attribute.
    pub fn named(name: &str) -> Self {
        Self {
            uri: Rc::from(""),
            local_name: Rc::from(name),
            qname: Rc::from(name),
            attributes: Vec::new(),
        }
    }

    /// Haengt ein Attribut an (Builder fuer Tests und Event-Produzenten).
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push(AtContent {
            qname: Rc::from(name),
            value: Rc::from(value),
        });
        self
    }
}

/// Content for EndElement events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EeContent {
    /// The namespace URI, or empty if none.
    pub uri: Rc<str>,
    /// The local name, or empty.
    pub local_name: Rc<str>,
    /// The qualified name; must match the corresponding StartElement.
    pub qname: Rc<str>,
}

impl EeContent {
    /// End-Tag ohne Namespace.
    pub fn named(name: &str) -> Self {
        Self {
            uri: Rc::from(""),
            local_name: Rc::from(name),
            qname: Rc::from(name),
        }
    }
}

/// One attribute: qualified name + value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtContent {
    /// The qualified name of the attribute.
    pub qname: Rc<str>,
    /// The attribute value (unescaped; the serializer escapes on output).
    pub value: Rc<str>,
}

/// Character data content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChContent {
    /// The character data.
    pub value: Rc<str>,
}

/// Comment content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmContent {
    /// The comment text (may contain `--`; the serializer repairs it).
    pub text: Rc<str>,
}

/// Processing instruction content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiContent {
    /// The PI target name.
    pub target: Rc<str>,
    /// The PI data (may contain `?>`; the serializer repairs it).
    pub data: Rc<str>,
}

/// Document type declaration content (startDTD).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtContent {
    /// The document type name.
    pub name: Rc<str>,
    /// The public identifier (empty if none).
    pub public: Rc<str>,
    /// The system identifier (empty if none).
    pub system: Rc<str>,
}

/// Entity reference content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErContent {
    /// The entity name.
    pub name: Rc<str>,
}

impl Default for ChContent {
    fn default() -> Self {
        Self { value: Rc::from("") }
    }
}

impl Default for CmContent {
    fn default() -> Self {
        Self { text: Rc::from("") }
    }
}

impl Default for PiContent {
    fn default() -> Self {
        Self { target: Rc::from(""), data: Rc::from("") }
    }
}

impl Default for DtContent {
    fn default() -> Self {
        Self {
            name: Rc::from(""),
            public: Rc::from(""),
            system: Rc::from(""),
        }
    }
}

impl Default for ErContent {
    fn default() -> Self {
        Self { name: Rc::from("") }
    }
}

/// The document events the serializer consumes.
///
/// Producers emit these in well-formed nesting order; the serializer state
/// machine has no synchronization and must be driven sequentially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// Start of the document; resets pending-doctype and previous-node state.
    StartDocument,
    /// End of the document; flushes the sink.
    EndDocument,
    /// Begins an element (attributes included).
    StartElement(SeContent),
    /// Closes the matching open element.
    EndElement(EeContent),
    /// Character data content.
    Characters(ChContent),
    /// Ignorable whitespace in element content (treated as character data).
    IgnorableWhitespace(ChContent),
    /// An XML comment.
    Comment(CmContent),
    /// A processing instruction. Two reserved targets toggle output
    /// escaping off/on instead of being written.
    ProcessingInstruction(PiContent),
    /// A pre-resolved entity reference, passed through as `&name;`.
    EntityReference(ErContent),
    /// Start of a CDATA section (lexical event).
    StartCData,
    /// End of a CDATA section (lexical event).
    EndCData,
    /// Start of DTD declarations (XML only).
    StartDtd(DtContent),
    /// End of DTD declarations (XML only).
    EndDtd,
    /// An element type declaration from the DTD internal subset.
    ElementDecl {
        /// The element type name.
        name: Rc<str>,
        /// The content model as a normalized string.
        model: Rc<str>,
    },
    /// An attribute type declaration from the DTD internal subset.
    AttributeDecl {
        /// The name of the associated element.
        ename: Rc<str>,
        /// The name of the attribute.
        aname: Rc<str>,
        /// The attribute type ("CDATA", "ID", ...).
        attr_type: Rc<str>,
        /// "#IMPLIED", "#REQUIRED", "#FIXED" or empty.
        value_default: Rc<str>,
    },
    /// An internal entity declaration from the DTD internal subset.
    InternalEntityDecl {
        /// The entity name.
        name: Rc<str>,
        /// The replacement text.
        value: Rc<str>,
    },
    /// Start of an entity expansion. The pseudo-name `[dtd]` marks the
    /// external DTD subset, whose declarations are suppressed from output.
    StartEntity(ErContent),
    /// End of an entity expansion.
    EndEntity(ErContent),
}
