//! Dokument-Events → XML / HTML / Text Serialisierung.
//!
//! Eine Engine fuer alle drei Ausgabemethoden; die Methoden-Unterschiede
//! (Attribut-Escaping, End-Tag-Politik, DOCTYPE-Timing, Element-Katalog)
//! haengen am [`Method`]-Enum statt an einer Vererbungshierarchie.
//!
//! Zwei APIs:
//! - SAX-artige Push-Methoden ([`Serializer::start_element`],
//!   [`Serializer::characters`], ...) fuer Event-Produzenten.
//! - [`Serializer::process`] + [`events_to_string`] / [`events_to_writer`]
//!   fuer gespeicherte Event-Folgen (Convenience).

use std::borrow::Cow;
use std::io::Write;
use std::sync::Arc;

use crate::bool_stack::BoolStack;
use crate::charinfo::CharInfo;
use crate::elem_desc::ElemDesc;
use crate::encodings;
use crate::event::{AtContent, XmlEvent};
use crate::html_catalog::html_elem_desc;
use crate::output_format::{Method, OutputFormat};
use crate::qname::QName;
use crate::writer::EncodedWriter;
use crate::{Error, Result};

/// Reserviertes PI-Target: schaltet das Output-Escaping fuer folgende
/// Characters-Events ab (der Weg, auf dem ein Dokumentmodell "dieses
/// Fragment unveraendert ausgeben" signalisiert).
pub const PI_DISABLE_OUTPUT_ESCAPING: &str = "disable-output-escaping";
/// Reserviertes PI-Target: schaltet das Output-Escaping wieder ein.
pub const PI_ENABLE_OUTPUT_ESCAPING: &str = "enable-output-escaping";

/// Serialisiert eine Event-Folge als String (UTF-8).
pub fn events_to_string(events: &[XmlEvent], format: &OutputFormat) -> Result<String> {
    let mut buf = Vec::new();
    events_to_writer(events, format, &mut buf)?;
    String::from_utf8(buf).map_err(|_| Error::Io("output is not valid UTF-8".into()))
}

/// Serialisiert eine Event-Folge direkt in einen Writer (Streaming).
pub fn events_to_writer(
    events: &[XmlEvent],
    format: &OutputFormat,
    writer: impl Write,
) -> Result<()> {
    let mut ser = Serializer::new(writer, format)?;
    for event in events {
        ser.process(event)?;
    }
    ser.finish()
}

/// The serialization engine: one instance per output document.
///
/// Strictly sequential — the nesting stacks have no synchronization. A
/// document in progress is abandoned by dropping the instance.
pub struct Serializer<W: Write> {
    writer: EncodedWriter<W>,
    method: Method,

    // --- Aus dem OutputFormat abgeleitet, fuer die Session eingefroren ---
    char_info: Arc<CharInfo>,
    /// Groesster ohne numerische Reference schreibbarer Codepoint.
    max_character: u32,
    /// Normalisierter MIME-Name (XML-Declaration, META-Tag).
    encoding: String,
    version: String,
    line_sep: Box<str>,
    do_indent: bool,
    indent_amount: usize,
    omit_xml_declaration: bool,
    doctype_system: Option<String>,
    doctype_public: Option<String>,
    standalone: Option<bool>,
    cdata_section_names: Vec<QName>,
    space_before_close: bool,
    omit_meta_tag: bool,
    use_url_escaping: bool,

    // --- Session-Zustand ---
    /// Pro offenem Element: wurden schon Kinder ausgegeben (steht das `>`)?
    elem_stack: BoolStack,
    /// Disable-output-escaping Zustaende (PI-gesteuert).
    disable_escaping_states: BoolStack,
    /// Pro offenem Element: Text-Inhalt als CDATA-Section schreiben?
    cdata_states: BoolStack,
    /// Whitespace-Preservation pro Ebene.
    preserves: BoolStack,
    /// HTML: pro offenem Element, ob Escaping komplett aus ist (SCRIPT/STYLE).
    raw_stack: BoolStack,
    ispreserve: bool,
    isprevtext: bool,
    current_indent: usize,
    start_new_line: bool,
    /// DOCTYPE steht noch aus (XML wartet auf das erste Element, weil die
    /// Deklaration dessen Namen braucht).
    need_doctype: bool,
    in_cdata: bool,
    in_entity_ref: bool,
    in_doctype: bool,
    in_external_dtd: bool,
    /// HTML: war das zuletzt geoeffnete/geschlossene Element non-block?
    in_block_elem: bool,
    /// HTML: Name des aktuellen Elements (SCRIPT/STYLE-Erkennung, Indent).
    current_element_name: Option<Box<str>>,
}

impl<W: Write> Serializer<W> {
    /// Erstellt einen Serializer fuer das gegebene Format.
    ///
    /// # Errors
    ///
    /// `Error::UnsupportedEncoding` wenn das deklarierte Encoding keinen
    /// Byte-Encoder hat — fangen und mit [`Serializer::with_utf8_fallback`]
    /// oder UTF-8 erneut versuchen. `Error::ResourceLoad` wenn eine
    /// konfigurierte Entity-Tabelle nicht ladbar ist.
    pub fn new(out: W, format: &OutputFormat) -> Result<Self> {
        Self::build(out, format, format.mime_encoding())
    }

    /// Wie [`Serializer::new`], aber ein nicht unterstuetztes Encoding
    /// faellt mit Warnung auf UTF-8 zurueck statt zu scheitern (dann
    /// spiegeln XML-Declaration und META-Tag das tatsaechliche Encoding).
    pub fn with_utf8_fallback(out: W, format: &OutputFormat) -> Result<Self> {
        let mime = format.mime_encoding();
        let mime = if encodings::encoder_kind(&mime).is_some() {
            mime
        } else {
            log::warn!(
                "encoding \"{mime}\" not supported, using {}",
                encodings::DEFAULT_MIME_ENCODING
            );
            Cow::Borrowed(encodings::DEFAULT_MIME_ENCODING)
        };
        Self::build(out, format, mime)
    }

    fn build(out: W, format: &OutputFormat, mime: Cow<'static, str>) -> Result<Self> {
        let writer = EncodedWriter::new(out, &mime)?;
        let char_info = match format.entities() {
            Some(resource) => CharInfo::from_resource(resource)?,
            None => match format.method() {
                Method::Html => Arc::clone(CharInfo::html()),
                _ => Arc::clone(CharInfo::xml()),
            },
        };
        Ok(Self {
            writer,
            method: format.method(),
            char_info,
            max_character: encodings::last_printable(&mime),
            encoding: mime.into_owned(),
            version: format.version().to_string(),
            line_sep: Box::from(format.line_separator()),
            do_indent: format.indent(),
            indent_amount: format.indent_amount(),
            omit_xml_declaration: format.omit_xml_declaration(),
            doctype_system: format.doctype_system().map(str::to_string),
            doctype_public: format.doctype_public().map(str::to_string),
            standalone: format.standalone(),
            cdata_section_names: format.cdata_section_elements().to_vec(),
            space_before_close: format.space_before_close(),
            omit_meta_tag: format.omit_meta_tag(),
            use_url_escaping: format.use_url_escaping(),
            elem_stack: BoolStack::new(),
            disable_escaping_states: BoolStack::new(),
            cdata_states: BoolStack::new(),
            preserves: BoolStack::new(),
            raw_stack: BoolStack::new(),
            ispreserve: false,
            isprevtext: false,
            current_indent: 0,
            start_new_line: false,
            need_doctype: true,
            in_cdata: false,
            in_entity_ref: false,
            in_doctype: false,
            in_external_dtd: false,
            in_block_elem: false,
            current_element_name: None,
        })
    }

    /// Verarbeitet ein gespeichertes Event (Dispatch auf die Push-Methoden).
    pub fn process(&mut self, event: &XmlEvent) -> Result<()> {
        match event {
            XmlEvent::StartDocument => self.start_document(),
            XmlEvent::EndDocument => self.end_document(),
            XmlEvent::StartElement(se) => {
                self.start_element(&se.uri, &se.local_name, &se.qname, &se.attributes)
            }
            XmlEvent::EndElement(ee) => self.end_element(&ee.uri, &ee.local_name, &ee.qname),
            XmlEvent::Characters(ch) => self.characters(&ch.value),
            XmlEvent::IgnorableWhitespace(ch) => self.ignorable_whitespace(&ch.value),
            XmlEvent::Comment(cm) => self.comment(&cm.text),
            XmlEvent::ProcessingInstruction(pi) => {
                self.processing_instruction(&pi.target, &pi.data)
            }
            XmlEvent::EntityReference(er) => self.entity_reference(&er.name),
            XmlEvent::StartCData => self.start_cdata(),
            XmlEvent::EndCData => self.end_cdata(),
            XmlEvent::StartDtd(dt) => self.start_dtd(&dt.name, &dt.public, &dt.system),
            XmlEvent::EndDtd => self.end_dtd(),
            XmlEvent::ElementDecl { name, model } => self.element_decl(name, model),
            XmlEvent::AttributeDecl { ename, aname, attr_type, value_default } => {
                self.attribute_decl(ename, aname, attr_type, value_default)
            }
            XmlEvent::InternalEntityDecl { name, value } => {
                self.internal_entity_decl(name, value)
            }
            XmlEvent::StartEntity(er) => self.start_entity(&er.name),
            XmlEvent::EndEntity(er) => self.end_entity(&er.name),
        }
    }

    /// Schreibt Restpuffer und flusht den Sink.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()
    }

    /// Gibt den inneren Sink zurueck (Restpuffer wird geschrieben).
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner()
    }

    // ========================================================================
    // Dokument-Grenzen
    // ========================================================================

    /// Beginn des Dokuments. XML schreibt sofort die XML-Declaration (falls
    /// nicht unterdrueckt); HTML schreibt sofort die DOCTYPE-Zeile (falls
    /// konfiguriert — HTML braucht keinen Root-Namen dafuer); XML verschiebt
    /// seine DOCTYPE bis zum ersten Element.
    pub fn start_document(&mut self) -> Result<()> {
        if self.in_entity_ref {
            return Ok(());
        }
        self.need_doctype = true;
        self.start_new_line = false;
        match self.method {
            Method::Xml => {
                if !self.omit_xml_declaration {
                    self.writer.write_str("<?xml version=\"")?;
                    self.writer.write_str(&self.version)?;
                    self.writer.write_str("\" encoding=\"")?;
                    self.writer.write_str(&self.encoding)?;
                    self.writer.write_str("\"")?;
                    match self.standalone {
                        Some(true) => self.writer.write_str(" standalone=\"yes\"")?,
                        Some(false) => self.writer.write_str(" standalone=\"no\"")?,
                        None => {}
                    }
                    self.writer.write_str("?>")?;
                    self.output_line_sep()?;
                }
            }
            Method::Html => {
                if self.doctype_system.is_some() || self.doctype_public.is_some() {
                    self.writer.write_str("<!DOCTYPE HTML")?;
                    if let Some(public) = &self.doctype_public {
                        self.writer.write_str(" PUBLIC \"")?;
                        self.writer.write_str(public)?;
                        self.writer.write_str("\"")?;
                    }
                    if let Some(system) = &self.doctype_system {
                        if self.doctype_public.is_none() {
                            self.writer.write_str(" SYSTEM \"")?;
                        } else {
                            self.writer.write_str(" \"")?;
                        }
                        self.writer.write_str(system)?;
                        self.writer.write_str("\"")?;
                    }
                    self.writer.write_str(">")?;
                    self.output_line_sep()?;
                }
                self.need_doctype = false;
            }
            Method::Text => {}
        }
        Ok(())
    }

    /// Ende des Dokuments: optionaler Zeilentrenner, dann Flush.
    pub fn end_document(&mut self) -> Result<()> {
        if self.method != Method::Text && self.do_indent && !self.isprevtext {
            self.output_line_sep()?;
        }
        self.writer.flush()
    }

    // ========================================================================
    // Elemente
    // ========================================================================

    /// Beginn eines Elements. `attrs` wird in exakt der gelieferten
    /// Reihenfolge geschrieben — nie sortiert, nie dedupliziert.
    pub fn start_element(
        &mut self,
        uri: &str,
        local_name: &str,
        qname: &str,
        attrs: &[AtContent],
    ) -> Result<()> {
        if self.in_entity_ref {
            return Ok(());
        }
        match self.method {
            Method::Text => Ok(()),
            Method::Html if uri.is_empty() => self.html_start_element(local_name, qname, attrs),
            _ => self.xml_start_element(uri, local_name, qname, attrs),
        }
    }

    fn xml_start_element(
        &mut self,
        uri: &str,
        local_name: &str,
        qname: &str,
        attrs: &[AtContent],
    ) -> Result<()> {
        if self.need_doctype && self.doctype_system.is_some() {
            self.output_doctype_decl(qname, true)?;
        }
        self.need_doctype = false;

        self.write_parent_tag_end()?;
        self.push_cdata_state(uri, local_name);
        self.ispreserve = false;

        if self.should_indent() && self.start_new_line {
            self.indent(self.current_indent)?;
        }
        self.start_new_line = true;

        self.writer.write_str("<")?;
        self.writer.write_str(qname)?;
        for attr in attrs {
            self.process_attribute_xml(&attr.qname, &attr.value)?;
        }

        // Neues Element: noch keine Kinder, `>` steht noch aus.
        self.elem_stack.push(false);
        self.current_indent += self.indent_amount;
        self.isprevtext = false;
        Ok(())
    }

    fn html_start_element(
        &mut self,
        local_name: &str,
        qname: &str,
        attrs: &[AtContent],
    ) -> Result<()> {
        self.write_parent_tag_end()?;
        self.push_cdata_state("", local_name);

        let desc = html_elem_desc(qname);
        let is_block = desc.is(ElemDesc::BLOCK);
        let is_head_elem = desc.is(ElemDesc::HEADELEM);

        if self.ispreserve {
            self.ispreserve = false;
        } else if self.do_indent
            && self.current_element_name.is_some()
            && (!self.in_block_elem || is_block)
        {
            // Inline-in-Inline bleibt im Fluss; nur Block-Uebergaenge
            // bekommen eine neue Zeile.
            self.start_new_line = true;
            self.indent(self.current_indent)?;
        }
        self.in_block_elem = !is_block;

        self.raw_stack.push(desc.is(ElemDesc::RAW));
        self.current_element_name = Some(Box::from(qname));

        self.writer.write_str("<")?;
        self.writer.write_str(qname)?;
        for attr in attrs {
            self.process_attribute_html(&attr.qname, desc, &attr.value)?;
        }

        self.elem_stack.push(false);
        self.current_indent += self.indent_amount;
        self.isprevtext = false;

        if is_head_elem {
            self.write_parent_tag_end()?;
            if !self.omit_meta_tag {
                if self.do_indent {
                    self.indent(self.current_indent)?;
                }
                self.writer.write_str(
                    "<META http-equiv=\"Content-Type\" content=\"text/html; charset=",
                )?;
                self.writer.write_str(&self.encoding)?;
                self.writer.write_str("\">")?;
            }
        }
        Ok(())
    }

    /// Ende eines Elements. Ohne jemals ausgegebene Kinder: `/>` (XML,
    /// konfigurierbar mit fuehrendem Leerzeichen fuer XHTML) bzw. `>` plus
    /// explizitem End-Tag ausser bei EMPTY-Elementen (HTML).
    pub fn end_element(&mut self, uri: &str, _local_name: &str, qname: &str) -> Result<()> {
        if self.in_entity_ref {
            return Ok(());
        }
        match self.method {
            Method::Text => Ok(()),
            Method::Html if uri.is_empty() => self.html_end_element(qname),
            _ => self.xml_end_element(qname),
        }
    }

    fn xml_end_element(&mut self, qname: &str) -> Result<()> {
        self.current_indent = self.current_indent.saturating_sub(self.indent_amount);
        let has_child_nodes = self.child_nodes_were_added();

        if has_child_nodes {
            if self.should_indent() {
                self.indent(self.current_indent)?;
            }
            self.writer.write_str("</")?;
            self.writer.write_str(qname)?;
            self.writer.write_str(">")?;
        } else if self.space_before_close {
            self.writer.write_str(" />")?;
        } else {
            self.writer.write_str("/>")?;
        }

        if has_child_nodes {
            self.ispreserve = self.pop_preserve();
        }
        self.isprevtext = false;
        self.cdata_states.pop();
        Ok(())
    }

    fn html_end_element(&mut self, qname: &str) -> Result<()> {
        self.current_indent = self.current_indent.saturating_sub(self.indent_amount);
        let has_child_nodes = self.child_nodes_were_added();
        self.raw_stack.pop();

        let desc = html_elem_desc(qname);
        let is_block = desc.is(ElemDesc::BLOCK);
        let mut should_indent = false;

        if self.ispreserve {
            self.ispreserve = false;
        } else if self.do_indent && (!self.in_block_elem || is_block) {
            self.start_new_line = true;
            should_indent = true;
        }
        self.in_block_elem = !is_block;

        if has_child_nodes {
            if should_indent {
                self.indent(self.current_indent)?;
            }
            self.writer.write_str("</")?;
            self.writer.write_str(qname)?;
            self.writer.write_str(">")?;
            self.current_element_name = Some(Box::from(qname));
        } else if !desc.is(ElemDesc::EMPTY) {
            // HTML kennt kein universelles Self-Closing: End-Tag trotzdem.
            self.writer.write_str("></")?;
            self.writer.write_str(qname)?;
            self.writer.write_str(">")?;
        } else {
            self.writer.write_str(">")?;
        }

        if desc.is(ElemDesc::WHITESPACESENSITIVE) {
            self.ispreserve = true;
        }
        if has_child_nodes && !self.preserves.is_empty() {
            self.preserves.pop();
        }
        self.isprevtext = false;
        self.cdata_states.pop();
        Ok(())
    }

    // ========================================================================
    // Zeichendaten — der heisseste Pfad
    // ========================================================================

    /// Zeichendaten. Single-Pass: maximale "saubere" Runs werden als ein
    /// Bulk-Write geschrieben, nur die Unterbrecher einzeln behandelt.
    pub fn characters(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if self.method == Method::Text {
            self.write_normalized_chars(text, false)?;
            return self.writer.flush();
        }
        if self.method == Method::Html && self.raw_stack.peek_or_false() {
            // SCRIPT/STYLE: niemals escapen.
            self.write_parent_tag_end()?;
            self.ispreserve = true;
            if self.should_indent() {
                self.indent(self.current_indent)?;
            }
            return self.write_normalized_chars(text, false);
        }
        if self.in_cdata || self.cdata_states.peek_or_false() {
            return self.cdata(text);
        }
        if self.disable_escaping_states.peek_or_false() {
            return self.characters_raw(text);
        }

        self.write_parent_tag_end()?;

        let mut run_start = 0usize;
        let mut check_white = true;
        for (i, ch) in text.char_indices() {
            if check_white && !matches!(ch, ' ' | '\t' | '\r' | '\n') {
                // Erstes echtes Zeichen: ab jetzt Whitespace erhalten.
                self.ispreserve = true;
                check_white = false;
            }

            let clean = (self.can_convert(ch) && !self.char_info.is_special(ch)) || ch == '"';
            if clean {
                continue;
            }

            if run_start < i {
                let run = &text[run_start..i];
                self.writer.write_str(run)?;
            }
            run_start = i + ch.len_utf8();

            if ch == '\n' {
                self.output_line_sep()?;
            } else {
                self.accum_default_escape(ch, false)?;
            }
        }
        if run_start < text.len() {
            self.writer.write_str(&text[run_start..])?;
        }

        self.isprevtext = true;
        Ok(())
    }

    /// UTF-16-Adapter: validiert Surrogate-Paarung und reicht den
    /// decodierten Text an [`Serializer::characters`] weiter.
    ///
    /// # Errors
    ///
    /// `Error::InvalidSurrogate` bei einem High-Surrogate ohne folgendes
    /// Low-Surrogate (oder mit einer Einheit ausserhalb des Low-Bereichs)
    /// sowie bei einem alleinstehenden Low-Surrogate.
    pub fn characters_utf16(&mut self, units: &[u16]) -> Result<()> {
        let mut decoded = String::with_capacity(units.len());
        let mut i = 0;
        while i < units.len() {
            let unit = units[i];
            if (0xD800..0xDC00).contains(&unit) {
                let Some(&low) = units.get(i + 1) else {
                    return Err(Error::InvalidSurrogate { high: unit, low: None });
                };
                if !(0xDC00..0xE000).contains(&low) {
                    return Err(Error::InvalidSurrogate { high: unit, low: Some(low) });
                }
                let cp =
                    (((unit as u32 - 0xD800) << 10) | (low as u32 - 0xDC00)) + 0x1_0000;
                if let Some(ch) = char::from_u32(cp) {
                    decoded.push(ch);
                }
                i += 2;
            } else if (0xDC00..0xE000).contains(&unit) {
                return Err(Error::InvalidSurrogate { high: unit, low: None });
            } else {
                if let Some(ch) = char::from_u32(unit as u32) {
                    decoded.push(ch);
                }
                i += 1;
            }
        }
        self.characters(&decoded)
    }

    /// Zeichendaten ohne jedes Escaping (disable-output-escaping).
    /// Nur Zeilentrenner werden normalisiert.
    pub fn characters_raw(&mut self, text: &str) -> Result<()> {
        if self.in_entity_ref {
            return Ok(());
        }
        if self.method == Method::Text {
            self.write_normalized_chars(text, false)?;
            return self.writer.flush();
        }
        self.write_parent_tag_end()?;
        self.ispreserve = true;
        self.write_verbatim_normalized(text)
    }

    /// Ignorierbarer Whitespace — wie Zeichendaten behandelt.
    pub fn ignorable_whitespace(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.characters(text)
    }

    // ========================================================================
    // CDATA
    // ========================================================================

    /// Beginn einer CDATA-Section (Lexical-Event).
    pub fn start_cdata(&mut self) -> Result<()> {
        self.in_cdata = true;
        Ok(())
    }

    /// Ende einer CDATA-Section.
    pub fn end_cdata(&mut self) -> Result<()> {
        self.in_cdata = false;
        Ok(())
    }

    /// Zeichendaten als CDATA-Block. Enthaltene `]]>`-Folgen werden
    /// gesplittet, nicht darstellbare Zeichen schliessen den Block fuer
    /// eine numerische Reference und oeffnen ihn wieder.
    pub fn cdata(&mut self, text: &str) -> Result<()> {
        if self.method == Method::Text {
            self.write_normalized_chars(text, false)?;
            return self.writer.flush();
        }
        if self.method == Method::Html {
            return self.html_cdata(text);
        }
        self.xml_cdata(text)
    }

    fn xml_cdata(&mut self, text: &str) -> Result<()> {
        self.write_parent_tag_end()?;
        self.ispreserve = true;
        if self.should_indent() {
            self.indent(self.current_indent)?;
        }

        // Oeffnende Klammer nur, wenn das erste Zeichen darstellbar ist —
        // sonst wuerde der Block sofort wieder geschlossen.
        let write_brackets = match text.chars().next() {
            Some(first) => self.can_convert(first),
            None => false,
        };
        if write_brackets {
            self.writer.write_str("<![CDATA[")?;
        }
        if self.disable_escaping_states.peek_or_false() {
            self.write_verbatim_normalized(text)?;
        } else {
            self.write_normalized_chars(text, true)?;
        }
        if write_brackets {
            self.writer.write_str("]]>")?;
        }
        Ok(())
    }

    fn html_cdata(&mut self, text: &str) -> Result<()> {
        let is_raw_elem = self
            .current_element_name
            .as_deref()
            .is_some_and(|n| n.eq_ignore_ascii_case("SCRIPT") || n.eq_ignore_ascii_case("STYLE"));
        if is_raw_elem {
            self.write_parent_tag_end()?;
            self.ispreserve = true;
            if self.should_indent() {
                self.indent(self.current_indent)?;
            }
            self.write_normalized_chars(text, true)
        } else {
            self.xml_cdata(text)
        }
    }

    // ========================================================================
    // Kommentare, PIs, Entity-Referenzen
    // ========================================================================

    /// Schreibt einen Kommentar. `--`-Laeufe werden durch ein eingefuegtes
    /// Leerzeichen gebrochen und ein einzelnes `-` vor `-->` gepolstert —
    /// Pflicht fuer wohlgeformten Output, nicht Kosmetik.
    pub fn comment(&mut self, text: &str) -> Result<()> {
        if self.in_entity_ref || self.method == Method::Text {
            return Ok(());
        }
        self.write_parent_tag_end()?;
        if self.should_indent() {
            self.indent(self.current_indent)?;
        }

        self.writer.write_str("<!--")?;
        let bytes = text.as_bytes();
        let mut run_start = 0usize;
        let mut was_dash = false;
        for (i, &b) in bytes.iter().enumerate() {
            if was_dash && b == b'-' {
                self.writer.write_str(&text[run_start..i])?;
                self.writer.write_str(" -")?;
                run_start = i + 1;
            }
            was_dash = b == b'-';
        }
        self.writer.write_str(&text[run_start..])?;
        if text.ends_with('-') {
            self.writer.write_str(" ")?;
        }
        self.writer.write_str("-->")?;

        self.start_new_line = true;
        Ok(())
    }

    /// Schreibt eine Processing Instruction. Die reservierten Targets
    /// [`PI_DISABLE_OUTPUT_ESCAPING`] / [`PI_ENABLE_OUTPUT_ESCAPING`]
    /// schalten stattdessen das Escaping um. `?>` in den Daten wird als
    /// `? >` gebrochen (Recovery, kein Fehler).
    pub fn processing_instruction(&mut self, target: &str, data: &str) -> Result<()> {
        if self.in_entity_ref {
            return Ok(());
        }
        if target == PI_DISABLE_OUTPUT_ESCAPING {
            return self.start_non_escaping();
        }
        if target == PI_ENABLE_OUTPUT_ESCAPING {
            return self.end_non_escaping();
        }
        if self.method == Method::Text {
            return Ok(());
        }

        self.write_parent_tag_end()?;
        if self.should_indent() {
            self.indent(self.current_indent)?;
        }

        self.writer.write_str("<?")?;
        self.writer.write_str(target)?;
        if !data.is_empty() && !data.starts_with(' ') {
            self.writer.write_str(" ")?;
        }
        let mut rest = data;
        while let Some(idx) = rest.find("?>") {
            self.writer.write_str(&rest[..idx])?;
            self.writer.write_str("? >")?;
            rest = &rest[idx + 2..];
        }
        self.writer.write_str(rest)?;
        match self.method {
            // HTML 4.0 Section B.3.6: PI endet mit `>`.
            Method::Html => self.writer.write_str(">")?,
            _ => self.writer.write_str("?>")?,
        }

        // Auf Dokument-Ebene ist der Whitespace nicht signifikant:
        // immer eine neue Zeile.
        if self.elem_stack.is_empty() {
            self.output_line_sep()?;
        }
        self.start_new_line = true;
        Ok(())
    }

    /// Schreibt eine bereits aufgeloeste Entity-Referenz als `&name;` —
    /// Passthrough, kein erneutes Escaping.
    pub fn entity_reference(&mut self, name: &str) -> Result<()> {
        if self.method == Method::Text {
            return Ok(());
        }
        self.write_parent_tag_end()?;
        if self.should_indent() {
            self.indent(self.current_indent)?;
        }
        self.writer.write_str("&")?;
        self.writer.write_str(name)?;
        self.writer.write_str(";")?;
        Ok(())
    }

    // ========================================================================
    // Escaping-Schalter und Preservation (oeffentliche Zusatz-API)
    // ========================================================================

    /// Beginnt einen Abschnitt ohne Output-Escaping.
    pub fn start_non_escaping(&mut self) -> Result<()> {
        self.disable_escaping_states.push(true);
        Ok(())
    }

    /// Beendet einen Abschnitt ohne Output-Escaping.
    pub fn end_non_escaping(&mut self) -> Result<()> {
        if !self.disable_escaping_states.is_empty() {
            self.disable_escaping_states.pop();
        }
        Ok(())
    }

    /// Beginnt einen Whitespace-erhaltenden Abschnitt
    /// (Aequivalent zu `xml:space="preserve"`).
    pub fn start_preserving(&mut self) -> Result<()> {
        self.preserves.push(true);
        self.ispreserve = true;
        Ok(())
    }

    /// Beendet einen Whitespace-erhaltenden Abschnitt.
    pub fn end_preserving(&mut self) -> Result<()> {
        self.ispreserve = self.pop_preserve();
        Ok(())
    }

    // ========================================================================
    // DTD-Deklarationen (nur XML-Methode)
    // ========================================================================

    /// Beginn der DTD-Deklarationen. Uebernimmt Public/System-Identifier
    /// (leer = nicht vorhanden) und schreibt den offenen DOCTYPE-Kopf.
    pub fn start_dtd(&mut self, name: &str, public: &str, system: &str) -> Result<()> {
        if self.method != Method::Xml {
            return Ok(());
        }
        self.doctype_public = (!public.is_empty()).then(|| public.to_string());
        self.doctype_system = (!system.is_empty()).then(|| system.to_string());
        if self.need_doctype {
            self.output_doctype_decl(name, false)?;
        }
        self.need_doctype = false;
        self.in_doctype = true;
        Ok(())
    }

    /// Ende der DTD-Deklarationen: schliesst das Internal Subset (`]>`)
    /// bzw. die nackte Deklaration (`>`).
    pub fn end_dtd(&mut self) -> Result<()> {
        if self.method != Method::Xml {
            return Ok(());
        }
        if !self.in_doctype {
            self.writer.write_str("]>")?;
        } else {
            self.writer.write_str(">")?;
        }
        self.output_line_sep()
    }

    /// Element-Typ-Deklaration aus dem Internal Subset. Deklarationen aus
    /// dem externen Subset (siehe [`Serializer::start_entity`]) werden
    /// unterdrueckt — nur was physisch im Internal Subset steht, wird
    /// wieder ausgegeben.
    pub fn element_decl(&mut self, name: &str, model: &str) -> Result<()> {
        if self.method != Method::Xml || self.in_external_dtd {
            return Ok(());
        }
        self.open_internal_subset()?;
        self.writer.write_str("<!ELEMENT ")?;
        self.writer.write_str(name)?;
        self.writer.write_str(" ")?;
        self.writer.write_str(model)?;
        self.writer.write_str(">")?;
        self.output_line_sep()
    }

    /// Attribut-Deklaration aus dem Internal Subset.
    pub fn attribute_decl(
        &mut self,
        ename: &str,
        aname: &str,
        attr_type: &str,
        value_default: &str,
    ) -> Result<()> {
        if self.method != Method::Xml || self.in_external_dtd {
            return Ok(());
        }
        self.open_internal_subset()?;
        self.writer.write_str("<!ATTLIST ")?;
        self.writer.write_str(ename)?;
        self.writer.write_str(" ")?;
        self.writer.write_str(aname)?;
        self.writer.write_str(" ")?;
        self.writer.write_str(attr_type)?;
        if !value_default.is_empty() {
            self.writer.write_str(" ")?;
            self.writer.write_str(value_default)?;
        }
        self.writer.write_str(">")?;
        self.output_line_sep()
    }

    /// Interne Entity-Deklaration aus dem Internal Subset.
    pub fn internal_entity_decl(&mut self, name: &str, value: &str) -> Result<()> {
        if self.method != Method::Xml || self.in_external_dtd {
            return Ok(());
        }
        self.open_internal_subset()?;
        self.writer.write_str("<!ENTITY ")?;
        self.writer.write_str(name)?;
        self.writer.write_str(" \"")?;
        self.writer.write_str(value)?;
        self.writer.write_str("\">")?;
        self.output_line_sep()
    }

    /// Beginn einer Entity-Expansion. Das Pseudo-Entity `[dtd]` markiert
    /// das externe DTD-Subset; waehrend einer Expansion werden
    /// Content-Events unterdrueckt.
    pub fn start_entity(&mut self, name: &str) -> Result<()> {
        if name == "[dtd]" {
            self.in_external_dtd = true;
        }
        self.in_entity_ref = true;
        Ok(())
    }

    /// Ende einer Entity-Expansion.
    pub fn end_entity(&mut self, name: &str) -> Result<()> {
        if name == "[dtd]" {
            self.in_external_dtd = false;
        }
        self.in_entity_ref = false;
        Ok(())
    }

    // ========================================================================
    // Interne Helfer
    // ========================================================================

    /// Schreibt das noch offene `>` des Parent-Start-Tags, falls noetig.
    fn write_parent_tag_end(&mut self) -> Result<()> {
        if !self.elem_stack.peek_or_true() {
            self.writer.write_str(">")?;
            self.isprevtext = false;
            self.elem_stack.set_top(true);
            self.preserves.push(self.ispreserve);
        }
        Ok(())
    }

    /// Pop des has-children-Frames; `false` bei leerem Stack
    /// (EndElement ohne StartElement — Programmierfehler des Produzenten).
    fn child_nodes_were_added(&mut self) -> bool {
        debug_assert!(
            !self.elem_stack.is_empty(),
            "end_element without matching start_element"
        );
        if self.elem_stack.is_empty() {
            false
        } else {
            self.elem_stack.pop()
        }
    }

    fn pop_preserve(&mut self) -> bool {
        if self.preserves.is_empty() {
            false
        } else {
            self.preserves.pop()
        }
    }

    /// Pusht den CDATA-Section-Zustand fuer ein neues Element anhand der
    /// konfigurierten QName-Liste. Es wird immer genau ein Zustand gepusht.
    fn push_cdata_state(&mut self, uri: &str, local_name: &str) {
        let b = if self.cdata_section_names.is_empty() {
            self.cdata_states.peek_or_false()
        } else {
            self.cdata_section_names
                .iter()
                .any(|q| q.matches(uri, local_name))
        };
        self.cdata_states.push(b);
    }

    fn should_indent(&self) -> bool {
        self.do_indent && !self.ispreserve && !self.isprevtext
    }

    fn output_line_sep(&mut self) -> Result<()> {
        self.writer.write_str(&self.line_sep)
    }

    /// Neue Zeile (falls angefordert) plus `n` Leerzeichen.
    fn indent(&mut self, n: usize) -> Result<()> {
        if self.start_new_line {
            self.output_line_sep()?;
        }
        if self.do_indent {
            const SPACES: &str = "                                                                ";
            let mut remaining = n;
            while remaining > 0 {
                let chunk = remaining.min(SPACES.len());
                self.writer.write_str(&SPACES[..chunk])?;
                remaining -= chunk;
            }
        }
        Ok(())
    }

    #[inline]
    fn can_convert(&self, ch: char) -> bool {
        encodings::can_convert(ch, self.max_character)
    }

    /// Schreibt die DOCTYPE-Deklaration. `close_decl` schliesst sie sofort
    /// (deferred-Emission beim ersten Element); sonst bleibt sie fuer das
    /// Internal Subset offen.
    fn output_doctype_decl(&mut self, name: &str, close_decl: bool) -> Result<()> {
        self.writer.write_str("<!DOCTYPE ")?;
        self.writer.write_str(name)?;
        if let Some(public) = &self.doctype_public {
            self.writer.write_str(" PUBLIC \"")?;
            self.writer.write_str(public)?;
            self.writer.write_str("\"")?;
        }
        let mut close_after = false;
        if let Some(system) = &self.doctype_system {
            if self.doctype_public.is_none() {
                self.writer.write_str(" SYSTEM \"")?;
            } else {
                self.writer.write_str(" \"")?;
            }
            self.writer.write_str(system)?;
            if close_decl {
                self.writer.write_str("\">")?;
                close_after = true;
            } else {
                self.writer.write_str("\"")?;
            }
        }
        if close_after {
            self.output_line_sep()?;
        }
        Ok(())
    }

    /// Oeffnet das Internal Subset (` [`) vor der ersten Deklaration.
    fn open_internal_subset(&mut self) -> Result<()> {
        if self.in_doctype {
            self.writer.write_str(" [")?;
            self.output_line_sep()?;
            self.in_doctype = false;
        }
        Ok(())
    }

    /// Behandelt eines der Default-Entities; `false` wenn das Zeichen kein
    /// Default-Entity ist (dann muss der Aufrufer weiter eskalieren).
    fn accum_default_entity(&mut self, ch: char, esc_lf: bool) -> Result<bool> {
        if !esc_lf && ch == '\n' {
            self.output_line_sep()?;
            return Ok(true);
        }
        if self.char_info.is_special(ch) {
            if let Some(name) = self.char_info.entity_name(ch) {
                self.writer.write_str("&")?;
                self.writer.write_str(name)?;
                self.writer.write_str(";")?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Escaped und schreibt ein Zeichen: benannte Entity, sonst numerische
    /// Character Reference, sonst roh.
    fn accum_default_escape(&mut self, ch: char, esc_lf: bool) -> Result<()> {
        if self.accum_default_entity(ch, esc_lf)? {
            return Ok(());
        }
        if !self.can_convert(ch) || self.char_info.is_special(ch) {
            self.write_numeric_ref(ch)
        } else {
            self.writer.write_char(ch)
        }
    }

    fn write_numeric_ref(&mut self, ch: char) -> Result<()> {
        let mut buf = itoa_buf();
        let s = write_u32(&mut buf, ch as u32);
        self.writer.write_str("&#")?;
        self.writer.write_str(s)?;
        self.writer.write_str(";")
    }

    /// XML-Attributwert: Specials und nicht darstellbare Zeichen werden
    /// ersetzt; ein CR direkt vor LF kollabiert zum escapeten LF.
    fn write_attr_string_xml(&mut self, value: &str) -> Result<()> {
        let mut chars = value.chars().peekable();
        while let Some(mut ch) = chars.next() {
            if self.can_convert(ch) && !self.char_info.is_special(ch) {
                self.writer.write_char(ch)?;
            } else {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                    ch = '\n';
                }
                self.accum_default_escape(ch, true)?;
            }
        }
        Ok(())
    }

    fn process_attribute_xml(&mut self, name: &str, value: &str) -> Result<()> {
        self.writer.write_str(" ")?;
        self.writer.write_str(name)?;
        self.writer.write_str("=\"")?;
        self.write_attr_string_xml(value)?;
        self.writer.write_str("\"")
    }

    /// HTML-Attributwert: `<` und `>` bleiben unescaped (HTML 4.0 laesst
    /// sie in Attributwerten zu), `&{` bleibt unescaped
    /// (HTML 4.0 Section B.7.1 Script-Makros).
    fn write_attr_string_html(&mut self, value: &str) -> Result<()> {
        let mut chars = value.chars().peekable();
        while let Some(ch) = chars.next() {
            if self.can_convert(ch) && !self.char_info.is_special(ch) {
                self.writer.write_char(ch)?;
            } else if ch == '<' || ch == '>' {
                self.writer.write_char(ch)?;
            } else if ch == '&' && chars.peek() == Some(&'{') {
                self.writer.write_char(ch)?;
            } else if self.accum_default_entity(ch, false)? {
                // benannte Entity geschrieben
            } else if self.can_convert(ch) {
                self.writer.write_char(ch)?;
            } else {
                self.write_numeric_ref(ch)?;
            }
        }
        Ok(())
    }

    /// URL-wertiger HTML-Attributwert: Zeichen < 0x20 oder > 0x7E werden
    /// als UTF-8-Bytes `%HH`-encodiert (wenn URL-Escaping an ist), `"` wird
    /// `%22` bzw. `&quot;`. Ein `%` passiert immer unveraendert — bereits
    /// escapete URIs bleiben stabil.
    fn write_attr_uri(&mut self, value: &str) -> Result<()> {
        let do_url_escaping = self.use_url_escaping;
        for ch in value.chars() {
            let cp = ch as u32;
            if cp < 32 || cp > 126 {
                if do_url_escaping {
                    // UTF-16 → UTF-8 → %HH pro Byte (RFC 2396).
                    let mut utf8 = [0u8; 4];
                    for &b in ch.encode_utf8(&mut utf8).as_bytes() {
                        self.writer.write_char('%')?;
                        self.writer.write_char(HEX[(b >> 4) as usize] as char)?;
                        self.writer.write_char(HEX[(b & 0xF) as usize] as char)?;
                    }
                } else if self.can_convert(ch) {
                    self.writer.write_char(ch)?;
                } else {
                    self.write_numeric_ref(ch)?;
                }
            } else if ch == '%' {
                self.writer.write_char(ch)?;
            } else if ch == '"' {
                if do_url_escaping {
                    self.writer.write_str("%22")?;
                } else {
                    self.writer.write_str("&quot;")?;
                }
            } else {
                self.writer.write_char(ch)?;
            }
        }
        Ok(())
    }

    /// HTML-Attribut: Boolean-Attribute (leerer Wert oder Wert == Name)
    /// werden minimiert geschrieben, URL-Attribute %HH-escaped.
    fn process_attribute_html(
        &mut self,
        name: &str,
        desc: &ElemDesc,
        value: &str,
    ) -> Result<()> {
        self.writer.write_str(" ")?;
        if (value.is_empty() || value.eq_ignore_ascii_case(name))
            && desc.is_attr_flag_set(name, ElemDesc::ATTREMPTY)
        {
            self.writer.write_str(name)
        } else {
            self.writer.write_str(name)?;
            self.writer.write_str("=\"")?;
            if desc.is_attr_flag_set(name, ElemDesc::ATTRURL) {
                self.write_attr_uri(value)?;
            } else {
                self.write_attr_string_html(value)?;
            }
            self.writer.write_str("\"")
        }
    }

    /// Normalisiert Zeichen ohne Entity-Escaping: LF → Zeilentrenner,
    /// nicht darstellbare Zeichen → numerische Reference. Im CDATA-Modus
    /// wird `]]>` gesplittet und fuer References der Block kurz verlassen.
    fn write_normalized_chars(&mut self, text: &str, is_cdata: bool) -> Result<()> {
        if self.method == Method::Text {
            return self.write_text_normalized(text);
        }
        let len = text.len();
        let mut skip = 0usize;
        for (i, ch) in text.char_indices() {
            if skip > 0 {
                skip -= 1;
                continue;
            }
            if ch == '\n' {
                self.output_line_sep()?;
            } else if is_cdata && !self.can_convert(ch) {
                if i != 0 {
                    self.writer.write_str("]]>")?;
                }
                self.write_numeric_ref(ch)?;
                if i != 0 && i + ch.len_utf8() < len {
                    self.writer.write_str("<![CDATA[")?;
                }
            } else if is_cdata && text[i..].starts_with("]]>") {
                self.writer.write_str("]]]]><![CDATA[>")?;
                skip = 2;
            } else if self.can_convert(ch) {
                self.writer.write_char(ch)?;
            } else {
                self.write_numeric_ref(ch)?;
            }
        }
        Ok(())
    }

    /// Text-Methode: gar kein Escaping, nur LF-Normalisierung.
    /// Runs zwischen Zeilenenden werden als Bulk-Write geschrieben.
    fn write_text_normalized(&mut self, text: &str) -> Result<()> {
        let bytes = text.as_bytes();
        let mut start = 0usize;
        while start < bytes.len() {
            match memchr::memchr(b'\n', &bytes[start..]) {
                Some(offset) => {
                    let pos = start + offset;
                    if start < pos {
                        self.writer.write_str(&text[start..pos])?;
                    }
                    self.output_line_sep()?;
                    start = pos + 1;
                }
                None => {
                    self.writer.write_str(&text[start..])?;
                    break;
                }
            }
        }
        Ok(())
    }

    /// Verbatim-Ausgabe mit reiner LF-Normalisierung
    /// (disable-output-escaping).
    fn write_verbatim_normalized(&mut self, text: &str) -> Result<()> {
        self.write_text_normalized(text)
    }
}

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Dezimal-Formatierung ohne `format!`-Allokation (Hot Path).
fn itoa_buf() -> [u8; 10] {
    [0; 10]
}

fn write_u32(buf: &mut [u8; 10], mut value: u32) -> &str {
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    // Nur ASCII-Ziffern im Slice
    std::str::from_utf8(&buf[pos..]).unwrap_or("0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ChContent, EeContent, SeContent};

    fn xml_format() -> OutputFormat {
        OutputFormat::default()
            .with_omit_xml_declaration(true)
            .with_line_separator("\n")
    }

    fn serialize(events: &[XmlEvent], format: &OutputFormat) -> String {
        events_to_string(events, format).unwrap()
    }

    fn se(name: &str) -> XmlEvent {
        XmlEvent::StartElement(SeContent::named(name))
    }

    fn ee(name: &str) -> XmlEvent {
        XmlEvent::EndElement(EeContent::named(name))
    }

    fn ch(text: &str) -> XmlEvent {
        XmlEvent::Characters(ChContent { value: text.into() })
    }

    #[test]
    fn write_u32_formatierung() {
        let mut buf = itoa_buf();
        assert_eq!(write_u32(&mut buf, 0), "0");
        let mut buf = itoa_buf();
        assert_eq!(write_u32(&mut buf, 38), "38");
        let mut buf = itoa_buf();
        assert_eq!(write_u32(&mut buf, 1_114_111), "1114111");
    }

    #[test]
    fn leeres_element_self_closing() {
        let events = vec![XmlEvent::StartDocument, se("root"), ee("root"), XmlEvent::EndDocument];
        assert_eq!(serialize(&events, &xml_format()), "<root/>");
    }

    #[test]
    fn text_escaping_im_inhalt() {
        let events = vec![
            XmlEvent::StartDocument,
            se("root"),
            ch("a < b & c"),
            ee("root"),
            XmlEvent::EndDocument,
        ];
        assert_eq!(
            serialize(&events, &xml_format()),
            "<root>a &lt; b &amp; c</root>"
        );
    }

    /// Anfuehrungszeichen sind im Element-Inhalt sauber (nur in
    /// Attributwerten escaped).
    #[test]
    fn quote_im_inhalt_bleibt_roh() {
        let events = vec![
            XmlEvent::StartDocument,
            se("r"),
            ch("say \"hi\""),
            ee("r"),
            XmlEvent::EndDocument,
        ];
        assert_eq!(serialize(&events, &xml_format()), "<r>say \"hi\"</r>");
    }

    #[test]
    fn xml_declaration_mit_standalone() {
        let format = OutputFormat::default()
            .with_standalone(true)
            .with_line_separator("\n");
        let events = vec![XmlEvent::StartDocument, se("r"), ee("r"), XmlEvent::EndDocument];
        let out = serialize(&events, &format);
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<r/>"
        );
    }

    #[test]
    fn utf16_adapter_kombiniert_surrogate() {
        let format = xml_format().with_encoding("US-ASCII");
        let mut ser = Serializer::new(Vec::new(), &format).unwrap();
        ser.start_document().unwrap();
        ser.start_element("", "r", "r", &[]).unwrap();
        // U+1D11E (MUSICAL SYMBOL G CLEF) = D834 DD1E
        ser.characters_utf16(&[0xD834, 0xDD1E]).unwrap();
        ser.end_element("", "r", "r").unwrap();
        ser.end_document().unwrap();
        let out = String::from_utf8(ser.into_inner().unwrap()).unwrap();
        assert_eq!(out, "<r>&#119070;</r>");
    }

    #[test]
    fn utf16_adapter_fehler_bei_einzelnem_high_surrogate() {
        let mut ser = Serializer::new(Vec::new(), &xml_format()).unwrap();
        ser.start_element("", "r", "r", &[]).unwrap();
        let err = ser.characters_utf16(&[0xD834]).unwrap_err();
        assert!(matches!(err, Error::InvalidSurrogate { high: 0xD834, low: None }));
    }

    #[test]
    fn utf16_adapter_fehler_bei_falschem_low_surrogate() {
        let mut ser = Serializer::new(Vec::new(), &xml_format()).unwrap();
        ser.start_element("", "r", "r", &[]).unwrap();
        let err = ser.characters_utf16(&[0xD834, 0x0041]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSurrogate { high: 0xD834, low: Some(0x0041) }
        ));
    }

    #[test]
    fn unsupported_encoding_faellt_mit_fallback_auf_utf8() {
        let format = xml_format().with_encoding("EUC-JP");
        assert!(matches!(
            Serializer::new(Vec::new(), &format),
            Err(Error::UnsupportedEncoding(_))
        ));
        let ser = Serializer::with_utf8_fallback(Vec::new(), &format).unwrap();
        assert_eq!(ser.encoding, "UTF-8");
    }

    /// start_preserving wirkt ueber den Preserve-Stack: das Element selbst
    /// rueckt noch ein (jeder Element-Start setzt ispreserve zurueck), aber
    /// nach end_preserving bleibt die wiederhergestellte Preservation aktiv
    /// und unterdrueckt die Einrueckung des schliessenden Tags.
    #[test]
    fn preserving_stack_wiederherstellung() {
        let format = xml_format().with_indent(true).with_indent_amount(2);
        let mut ser = Serializer::new(Vec::new(), &format).unwrap();
        ser.start_document().unwrap();
        ser.start_element("", "r", "r", &[]).unwrap();
        ser.start_preserving().unwrap();
        ser.start_element("", "a", "a", &[]).unwrap();
        ser.end_element("", "a", "a").unwrap();
        ser.end_preserving().unwrap();
        ser.end_element("", "r", "r").unwrap();
        ser.end_document().unwrap();
        let out = String::from_utf8(ser.into_inner().unwrap()).unwrap();
        assert_eq!(out, "<r>\n  <a/></r>\n");
    }
}
