//! saxout – Streaming-Serialisierung von Dokument-Events nach XML, HTML
//! oder Plain Text.
//!
//! Ein externer Event-Produzent (Tree-Walker, Streaming-Parser) treibt den
//! [`Serializer`] Event fuer Event; der Serializer escaped, normalisiert
//! Zeilenenden, rueckt ein und encodiert direkt in einen `io::Write`.
//!
//! # Beispiel
//!
//! ```
//! use saxout::{ChContent, EeContent, OutputFormat, SeContent, XmlEvent};
//!
//! let format = OutputFormat::default().with_omit_xml_declaration(true);
//! let events = vec![
//!     XmlEvent::StartDocument,
//!     XmlEvent::StartElement(SeContent::named("root")),
//!     XmlEvent::Characters(ChContent { value: "a < b & c".into() }),
//!     XmlEvent::EndElement(EeContent::named("root")),
//!     XmlEvent::EndDocument,
//! ];
//! let xml = saxout::events_to_string(&events, &format).unwrap();
//! assert_eq!(xml, "<root>a &lt; b &amp; c</root>");
//! ```
//!
//! Drei Output-Methoden ueber eine einzige Engine:
//! - [`Method::Xml`] — XML 1.0 mit XML-Declaration, CDATA-Sections,
//!   Internal-DTD-Subset-Roundtripping und Self-Closing Tags.
//! - [`Method::Html`] — HTML 4.0 mit Element-Katalog (Block/Inline/EMPTY/RAW),
//!   META-Injektion, minimierten Boolean-Attributen und URL-Escaping.
//! - [`Method::Text`] — nur Zeichendaten, keinerlei Markup oder Escaping.

pub mod bool_stack;
pub mod charinfo;
pub mod elem_desc;
pub mod encodings;
pub mod error;
pub mod event;
pub mod html_catalog;
pub mod output_format;
pub mod qname;
pub mod serializer;
pub mod trie;
pub mod writer;

pub use error::{Error, Result};

/// HashMap mit ahash (schneller, nicht DoS-resistent — fuer interne
/// Datenstrukturen wie Entity-Tabellen und Caches).
pub(crate) type FastHashMap<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;

/// HashSet mit ahash.
pub(crate) type FastHashSet<K> = hashbrown::HashSet<K, ahash::RandomState>;

// Public API: Events
pub use event::{
    AtContent, ChContent, CmContent, DtContent, EeContent, ErContent, PiContent, SeContent,
    XmlEvent,
};

// Public API: Optionen
pub use output_format::{Method, OutputFormat};

// Public API: QName
pub use qname::QName;

// Public API: Klassifikation und Encoding-Faehigkeiten
pub use charinfo::CharInfo;
pub use elem_desc::ElemDesc;
pub use html_catalog::html_elem_desc;

// Public API: Serializer
pub use serializer::{
    events_to_string, events_to_writer, Serializer, PI_DISABLE_OUTPUT_ESCAPING,
    PI_ENABLE_OUTPUT_ESCAPING,
};

// Public API: Output-Sink
pub use writer::EncodedWriter;
