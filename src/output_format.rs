//! Output-Format-Optionen.
//!
//! Der Options-Satz, den ein (externer) Konfigurations-Loader aufgeloest
//! anliefert. Der Serializer konsultiert ihn einmal beim Konstruieren;
//! danach ist er eingefroren.
//!
//! # Beispiel
//!
//! ```
//! use saxout::{Method, OutputFormat};
//!
//! let format = OutputFormat::default()
//!     .with_method(Method::Xml)
//!     .with_indent(true)
//!     .with_indent_amount(2)
//!     .with_doctype_system("book.dtd");
//!
//! assert!(format.indent());
//! assert_eq!(format.doctype_system(), Some("book.dtd"));
//! ```

use std::borrow::Cow;

use crate::encodings;
use crate::qname::QName;

/// The output method: which markup dialect the engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// XML 1.0 output (default).
    #[default]
    Xml,
    /// HTML 4.0 output (element catalog, minimized attributes, META tag).
    Html,
    /// Plain text: character data only, no markup, no escaping.
    Text,
}

/// Resolved output options for one serializer session.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFormat {
    pub(crate) method: Method,
    pub(crate) version: Option<String>,
    pub(crate) encoding: Option<String>,
    pub(crate) indent: bool,
    pub(crate) indent_amount: usize,
    pub(crate) omit_xml_declaration: bool,
    pub(crate) doctype_system: Option<String>,
    pub(crate) doctype_public: Option<String>,
    pub(crate) standalone: Option<bool>,
    pub(crate) media_type: Option<String>,
    pub(crate) cdata_section_elements: Vec<QName>,
    pub(crate) omit_meta_tag: bool,
    pub(crate) use_url_escaping: bool,
    pub(crate) entities: Option<String>,
    pub(crate) line_separator: Option<String>,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            method: Method::Xml,
            version: None,
            encoding: None,
            indent: false,
            indent_amount: 0,
            omit_xml_declaration: false,
            doctype_system: None,
            doctype_public: None,
            standalone: None,
            media_type: None,
            cdata_section_elements: Vec::new(),
            omit_meta_tag: false,
            use_url_escaping: true,
            entities: None,
            line_separator: None,
        }
    }
}

impl OutputFormat {
    // --- Getter ---

    /// Die Ausgabemethode.
    pub fn method(&self) -> Method { self.method }
    /// XML-Version fuer die Declaration ("1.0" wenn nicht gesetzt).
    pub fn version(&self) -> &str { self.version.as_deref().unwrap_or("1.0") }
    /// Deklarierter Encoding-Name (MIME), falls gesetzt.
    pub fn encoding(&self) -> Option<&str> { self.encoding.as_deref() }
    /// Pretty-Printing an?
    pub fn indent(&self) -> bool { self.indent }
    /// Leerzeichen pro Einrueck-Ebene.
    pub fn indent_amount(&self) -> usize { self.indent_amount }
    /// XML-Declaration unterdruecken?
    pub fn omit_xml_declaration(&self) -> bool { self.omit_xml_declaration }
    /// System-Identifier fuer die DOCTYPE-Deklaration.
    pub fn doctype_system(&self) -> Option<&str> { self.doctype_system.as_deref() }
    /// Public-Identifier fuer die DOCTYPE-Deklaration.
    pub fn doctype_public(&self) -> Option<&str> { self.doctype_public.as_deref() }
    /// `standalone`-Wert der XML-Declaration; `None` = nicht angegeben.
    pub fn standalone(&self) -> Option<bool> { self.standalone }
    /// Media-Type (gespeichert, derzeit nicht in den Output geschrieben).
    pub fn media_type(&self) -> Option<&str> { self.media_type.as_deref() }
    /// Elemente, deren Text-Inhalt als CDATA-Section geschrieben wird.
    pub fn cdata_section_elements(&self) -> &[QName] { &self.cdata_section_elements }
    /// META-Tag-Injektion im HEAD unterdruecken (HTML)?
    pub fn omit_meta_tag(&self) -> bool { self.omit_meta_tag }
    /// URL-Attribute %HH-escapen (HTML)?
    pub fn use_url_escaping(&self) -> bool { self.use_url_escaping }
    /// Resource-Name einer Entity-Tabelle, die den Default ersetzt.
    pub fn entities(&self) -> Option<&str> { self.entities.as_deref() }

    /// Der Zeilentrenner fuer den Output (Plattform-Default wenn nicht
    /// gesetzt).
    pub fn line_separator(&self) -> &str {
        match &self.line_separator {
            Some(sep) => sep,
            None => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
        }
    }

    /// Der normalisierte MIME-Name des Encodings (UTF-8 wenn keins
    /// deklariert ist).
    pub fn mime_encoding(&self) -> Cow<'static, str> {
        encodings::mime_encoding(self.encoding())
    }

    /// XHTML-Kompatibilitaet: Leerzeichen vor `/>` wenn der Public-Identifier
    /// eine XHTML-DTD benennt.
    pub fn space_before_close(&self) -> bool {
        self.doctype_public
            .as_deref()
            .is_some_and(|p| p.starts_with("-//W3C//DTD XHTML"))
    }

    // --- Builder-Setter (Fluent API) ---

    /// Setzt die Ausgabemethode.
    pub fn with_method(mut self, method: Method) -> Self { self.method = method; self }
    /// Setzt die XML-Version.
    pub fn with_version(mut self, version: &str) -> Self { self.version = Some(version.to_string()); self }
    /// Setzt den Encoding-Namen.
    pub fn with_encoding(mut self, encoding: &str) -> Self { self.encoding = Some(encoding.to_string()); self }
    /// Schaltet Pretty-Printing.
    pub fn with_indent(mut self, indent: bool) -> Self { self.indent = indent; self }
    /// Setzt die Leerzeichen pro Einrueck-Ebene.
    pub fn with_indent_amount(mut self, amount: usize) -> Self { self.indent_amount = amount; self }
    /// Unterdrueckt die XML-Declaration.
    pub fn with_omit_xml_declaration(mut self, omit: bool) -> Self { self.omit_xml_declaration = omit; self }
    /// Setzt den DOCTYPE-System-Identifier.
    pub fn with_doctype_system(mut self, system: &str) -> Self { self.doctype_system = Some(system.to_string()); self }
    /// Setzt den DOCTYPE-Public-Identifier.
    pub fn with_doctype_public(mut self, public: &str) -> Self { self.doctype_public = Some(public.to_string()); self }
    /// Setzt den `standalone`-Wert.
    pub fn with_standalone(mut self, standalone: bool) -> Self { self.standalone = Some(standalone); self }
    /// Setzt den Media-Type.
    pub fn with_media_type(mut self, media_type: &str) -> Self { self.media_type = Some(media_type.to_string()); self }
    /// Setzt die CDATA-Section-Elemente.
    pub fn with_cdata_section_elements(mut self, qnames: Vec<QName>) -> Self { self.cdata_section_elements = qnames; self }
    /// Unterdrueckt das META-Tag (HTML).
    pub fn with_omit_meta_tag(mut self, omit: bool) -> Self { self.omit_meta_tag = omit; self }
    /// Schaltet URL-%HH-Escaping (HTML).
    pub fn with_use_url_escaping(mut self, escape: bool) -> Self { self.use_url_escaping = escape; self }
    /// Setzt den Entity-Tabellen-Resource-Namen.
    pub fn with_entities(mut self, resource: &str) -> Self { self.entities = Some(resource.to_string()); self }
    /// Setzt den Zeilentrenner.
    pub fn with_line_separator(mut self, sep: &str) -> Self { self.line_separator = Some(sep.to_string()); self }

    // --- Mutable Setter ---

    /// Setzt die Ausgabemethode.
    pub fn set_method(&mut self, method: Method) { self.method = method; }
    /// Setzt den Encoding-Namen.
    pub fn set_encoding(&mut self, encoding: Option<String>) { self.encoding = encoding; }
    /// Schaltet Pretty-Printing.
    pub fn set_indent(&mut self, indent: bool) { self.indent = indent; }
    /// Setzt die Leerzeichen pro Einrueck-Ebene.
    pub fn set_indent_amount(&mut self, amount: usize) { self.indent_amount = amount; }
    /// Unterdrueckt die XML-Declaration.
    pub fn set_omit_xml_declaration(&mut self, omit: bool) { self.omit_xml_declaration = omit; }
    /// Setzt den DOCTYPE-System-Identifier.
    pub fn set_doctype_system(&mut self, system: Option<String>) { self.doctype_system = system; }
    /// Setzt den DOCTYPE-Public-Identifier.
    pub fn set_doctype_public(&mut self, public: Option<String>) { self.doctype_public = public; }
    /// Setzt den `standalone`-Wert.
    pub fn set_standalone(&mut self, standalone: Option<bool>) { self.standalone = standalone; }
    /// Setzt die CDATA-Section-Elemente.
    pub fn set_cdata_section_elements(&mut self, qnames: Vec<QName>) { self.cdata_section_elements = qnames; }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let f = OutputFormat::default();
        assert_eq!(f.method(), Method::Xml);
        assert_eq!(f.version(), "1.0");
        assert_eq!(f.encoding(), None);
        assert_eq!(f.mime_encoding(), "UTF-8");
        assert!(!f.indent());
        assert_eq!(f.indent_amount(), 0);
        assert!(!f.omit_xml_declaration());
        assert!(f.standalone().is_none());
        assert!(f.use_url_escaping());
        assert!(!f.omit_meta_tag());
    }

    #[test]
    fn builder_kette() {
        let f = OutputFormat::default()
            .with_method(Method::Html)
            .with_encoding("latin1")
            .with_indent(true)
            .with_indent_amount(4)
            .with_omit_meta_tag(true);
        assert_eq!(f.method(), Method::Html);
        assert_eq!(f.mime_encoding(), "ISO-8859-1");
        assert_eq!(f.indent_amount(), 4);
        assert!(f.omit_meta_tag());
    }

    /// XHTML-Public-Identifier schaltet das Leerzeichen vor `/>`.
    #[test]
    fn space_before_close_aus_public_id() {
        let f = OutputFormat::default()
            .with_doctype_public("-//W3C//DTD XHTML 1.0 Strict//EN");
        assert!(f.space_before_close());

        let f = OutputFormat::default().with_doctype_public("-//W3C//DTD HTML 4.0//EN");
        assert!(!f.space_before_close());

        assert!(!OutputFormat::default().space_before_close());
    }

    #[test]
    fn line_separator_override() {
        let f = OutputFormat::default().with_line_separator("\r\n");
        assert_eq!(f.line_separator(), "\r\n");
    }

    #[test]
    fn cdata_section_elements_liste() {
        let f = OutputFormat::default().with_cdata_section_elements(
            QName::parse_list("code {urn:x}screen").unwrap(),
        );
        assert_eq!(f.cdata_section_elements().len(), 2);
    }
}
