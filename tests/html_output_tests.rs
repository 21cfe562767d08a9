//! Integrationstests fuer die HTML-4.0-Ausgabemethode (Events → HTML).

use saxout::event::{ChContent, CmContent, EeContent, SeContent};
use saxout::{events_to_string, Method, OutputFormat, XmlEvent};

// ============================================================================
// Hilfsfunktionen
// ============================================================================

fn format() -> OutputFormat {
    OutputFormat::default()
        .with_method(Method::Html)
        .with_line_separator("\n")
}

fn se(name: &str) -> XmlEvent {
    XmlEvent::StartElement(SeContent::named(name))
}

fn se_attrs(name: &str, attrs: &[(&str, &str)]) -> XmlEvent {
    let mut content = SeContent::named(name);
    for (n, v) in attrs {
        content = content.with_attr(n, v);
    }
    XmlEvent::StartElement(content)
}

fn ee(name: &str) -> XmlEvent {
    XmlEvent::EndElement(EeContent::named(name))
}

fn ch(text: &str) -> XmlEvent {
    XmlEvent::Characters(ChContent { value: text.into() })
}

const SD: XmlEvent = XmlEvent::StartDocument;
const ED: XmlEvent = XmlEvent::EndDocument;

fn serialize(events: Vec<XmlEvent>, format: &OutputFormat) -> String {
    events_to_string(&events, format).unwrap()
}

// ============================================================================
// End-Tag-Politik
// ============================================================================

/// HTML kennt kein universelles Self-Closing: kinderlose Elemente bekommen
/// trotzdem ein explizites End-Tag.
#[test]
fn kinderloses_element_explizites_end_tag() {
    let out = serialize(vec![SD, se("div"), ee("div"), ED], &format());
    assert_eq!(out, "<div></div>");
}

/// EMPTY-Elemente des Katalogs bleiben ohne End-Tag.
#[test]
fn empty_element_ohne_end_tag() {
    let out = serialize(
        vec![SD, se("p"), ch("a"), se("br"), ee("br"), ch("b"), ee("p"), ED],
        &format(),
    );
    assert_eq!(out, "<p>a<br>b</p>");
}

/// Katalog-Lookup ist case-insensitiv.
#[test]
fn empty_element_case_insensitiv() {
    let out = serialize(vec![SD, se("BR"), ee("BR"), ED], &format());
    assert_eq!(out, "<BR>");
}

// ============================================================================
// DOCTYPE (sofort, nicht verschoben)
// ============================================================================

/// HTML schreibt die DOCTYPE sofort bei Dokumentbeginn — es gibt keinen
/// Root-Namen, auf den gewartet werden muesste.
#[test]
fn doctype_sofort_bei_dokumentbeginn() {
    let f = format()
        .with_doctype_public("-//W3C//DTD HTML 4.0//EN")
        .with_doctype_system("http://www.w3.org/TR/REC-html40/strict.dtd");
    let out = serialize(vec![SD, se("html"), ee("html"), ED], &f);
    assert_eq!(
        out,
        "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.0//EN\" \
         \"http://www.w3.org/TR/REC-html40/strict.dtd\">\n<html></html>"
    );
}

#[test]
fn doctype_nur_system() {
    let f = format().with_doctype_system("strict.dtd");
    let out = serialize(vec![SD, se("html"), ee("html"), ED], &f);
    assert_eq!(out, "<!DOCTYPE HTML SYSTEM \"strict.dtd\">\n<html></html>");
}

// ============================================================================
// META-Injektion
// ============================================================================

/// HEAD schliesst sofort und injiziert das Content-Type-META-Tag.
#[test]
fn head_injiziert_meta_tag() {
    let out = serialize(vec![SD, se("head"), ee("head"), ED], &format());
    assert_eq!(
        out,
        "<head><META http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\"></head>"
    );
}

/// Das META-Tag traegt den deklarierten MIME-Encoding-Namen.
#[test]
fn meta_tag_mit_encoding() {
    let f = format().with_encoding("latin1");
    let out = serialize(vec![SD, se("head"), ee("head"), ED], &f);
    assert!(out.contains("charset=ISO-8859-1"), "{out}");
}

#[test]
fn omit_meta_tag() {
    let f = format().with_omit_meta_tag(true);
    let out = serialize(vec![SD, se("head"), ee("head"), ED], &f);
    assert_eq!(out, "<head></head>");
}

// ============================================================================
// Attribute
// ============================================================================

/// Boolean-Attribute (leerer Wert oder Wert == Name) werden minimiert.
#[test]
fn boolean_attribute_minimiert() {
    let out = serialize(
        vec![
            SD,
            se_attrs("input", &[("checked", "checked"), ("disabled", ""), ("value", "x")]),
            ee("input"),
            ED,
        ],
        &format(),
    );
    assert_eq!(out, "<input checked disabled value=\"x\">");
}

/// Nur ATTREMPTY-Attribute duerfen minimiert werden.
#[test]
fn nicht_boolean_attribut_bleibt_voll() {
    let out = serialize(
        vec![SD, se_attrs("p", &[("title", "")]), ee("p"), ED],
        &format(),
    );
    assert_eq!(out, "<p title=\"\"></p>");
}

/// `<` und `>` bleiben in HTML-Attributwerten unescaped.
#[test]
fn spitze_klammern_in_attributwerten() {
    let out = serialize(
        vec![SD, se_attrs("p", &[("title", "a<b>c")]), ee("p"), ED],
        &format(),
    );
    assert_eq!(out, "<p title=\"a<b>c\"></p>");
}

/// `&{` leitet ein Script-Makro ein (HTML 4.0 Section B.7.1) und bleibt
/// unescaped; nacktes `&` wird escaped.
#[test]
fn script_makro_in_attributwerten() {
    let out = serialize(
        vec![SD, se_attrs("p", &[("title", "a&{x}b"), ("alt", "a&b")]), ee("p"), ED],
        &format(),
    );
    assert_eq!(out, "<p title=\"a&{x}b\" alt=\"a&amp;b\"></p>");
}

// ============================================================================
// URL-Attribute (%HH-Escaping, RFC 2396)
// ============================================================================

/// Nicht-ASCII-Zeichen in URL-Attributen werden als UTF-8-Bytes
/// %HH-encodiert.
#[test]
fn url_attribut_percent_encoding() {
    let out = serialize(
        vec![SD, se_attrs("a", &[("href", "http://ex.org/\u{E4}")]), ee("a"), ED],
        &format(),
    );
    assert_eq!(out, "<a href=\"http://ex.org/%C3%A4\"></a>");
}

/// Zeichen jenseits der BMP ergeben vier %HH-Bytes.
#[test]
fn url_attribut_astrales_zeichen() {
    let out = serialize(
        vec![SD, se_attrs("a", &[("href", "http://ex.org/\u{1D11E}")]), ee("a"), ED],
        &format(),
    );
    assert_eq!(out, "<a href=\"http://ex.org/%F0%9D%84%9E\"></a>");
}

/// `%` wird nie doppelt escaped — bereits escapete URIs bleiben stabil.
#[test]
fn url_attribut_prozent_passthrough() {
    let out = serialize(
        vec![SD, se_attrs("a", &[("href", "a%20b%ZZ")]), ee("a"), ED],
        &format(),
    );
    assert_eq!(out, "<a href=\"a%20b%ZZ\"></a>");
}

/// `"` in URLs wird %22; Leerzeichen passiert unveraendert.
#[test]
fn url_attribut_quote_und_leerzeichen() {
    let out = serialize(
        vec![SD, se_attrs("a", &[("href", "a \"b\"")]), ee("a"), ED],
        &format(),
    );
    assert_eq!(out, "<a href=\"a %22b%22\"></a>");
}

/// Abgeschaltetes URL-Escaping: Nicht-ASCII bleibt (wenn darstellbar),
/// `"` wird zur Entity.
#[test]
fn url_escaping_abgeschaltet() {
    let f = format().with_use_url_escaping(false);
    let out = serialize(
        vec![SD, se_attrs("a", &[("href", "\u{E4} \"x\"")]), ee("a"), ED],
        &f,
    );
    assert_eq!(out, "<a href=\"\u{E4} &quot;x&quot;\"></a>");
}

/// Nicht-URL-Attribute desselben Elements werden normal escaped.
#[test]
fn nur_url_attribute_percent_encodiert() {
    let out = serialize(
        vec![SD, se_attrs("a", &[("href", "\u{E4}"), ("title", "\u{E4}")]), ee("a"), ED],
        &format(),
    );
    assert_eq!(out, "<a href=\"%C3%A4\" title=\"&auml;\"></a>");
}

// ============================================================================
// Zeichendaten
// ============================================================================

/// Die HTML-Entity-Tabelle ist voll besetzt: U+00A0 → `&nbsp;`.
#[test]
fn html_entities_im_inhalt() {
    let out = serialize(vec![SD, se("p"), ch("a\u{A0}b \u{E4}"), ee("p"), ED], &format());
    assert_eq!(out, "<p>a&nbsp;b &auml;</p>");
}

/// SCRIPT ist ein RAW-Element: Inhalt wird niemals escaped.
#[test]
fn script_inhalt_unescaped() {
    let out = serialize(
        vec![SD, se("script"), ch("if (a<b && c>d) x();"), ee("script"), ED],
        &format(),
    );
    assert_eq!(out, "<script>if (a<b && c>d) x();</script>");
}

#[test]
fn style_inhalt_unescaped() {
    let out = serialize(
        vec![SD, se("style"), ch("a>b { color: red }"), ee("style"), ED],
        &format(),
    );
    assert_eq!(out, "<style>a>b { color: red }</style>");
}

// ============================================================================
// Namespaces: HTML faellt fuer namespaced Elemente auf XML zurueck
// ============================================================================

#[test]
fn namespaced_element_xml_pfad() {
    let mut content = SeContent::named("custom");
    content.uri = "urn:x".into();
    content.qname = "x:custom".into();
    let mut end = EeContent::named("custom");
    end.uri = "urn:x".into();
    end.qname = "x:custom".into();
    let out = serialize(
        vec![SD, XmlEvent::StartElement(content), XmlEvent::EndElement(end), ED],
        &format(),
    );
    // XML-Politik: self-closing
    assert_eq!(out, "<x:custom/>");
}

// ============================================================================
// Whitespace-Sensitivitaet und Indent
// ============================================================================

/// Block-in-Block wird eingerueckt, Inline-in-Inline nicht.
#[test]
fn indent_block_vs_inline() {
    let f = format().with_indent(true).with_indent_amount(2);
    let events = vec![
        SD,
        se("div"),
        se("p"),
        se("em"),
        se("b"),
        ee("b"),
        ee("em"),
        ee("p"),
        ee("div"),
        ED,
    ];
    let out = serialize(events, &f);
    // em (inline in block p) bekommt eine Zeile, b (inline in inline em) nicht
    assert_eq!(
        out,
        "<div>\n  <p>\n    <em><b></b></em>\n  </p>\n</div>\n"
    );
}

/// Nach einem WHITESPACESENSITIVE-Element werden die Geschwister nicht
/// reformatiert.
#[test]
fn whitespace_sensitive_unterdrueckt_folge_indent() {
    let f = format().with_indent(true).with_indent_amount(2);
    let events = vec![
        SD,
        se("p"),
        se("img"),
        ee("img"),
        se("span"),
        ee("span"),
        ee("p"),
        ED,
    ];
    let out = serialize(events, &f);
    // img ist WHITESPACESENSITIVE: span wird nicht auf eine neue Zeile gesetzt
    assert!(!out.contains(">\n  <span"), "{out}");
    assert!(out.contains("<img><span>"), "{out}");
}

// ============================================================================
// PIs und Kommentare
// ============================================================================

/// HTML-PI endet mit `>` statt `?>` (HTML 4.0 Section B.3.6).
#[test]
fn pi_ohne_fragezeichen_terminator() {
    let out = serialize(
        vec![
            SD,
            se("p"),
            XmlEvent::ProcessingInstruction(saxout::PiContent {
                target: "import".into(),
                data: "namespace=\"x\"".into(),
            }),
            ee("p"),
            ED,
        ],
        &format(),
    );
    assert_eq!(out, "<p><?import namespace=\"x\"></p>");
}

/// Kommentar-Reparatur gilt auch in HTML.
#[test]
fn kommentar_doppel_bindestrich() {
    let out = serialize(
        vec![SD, se("p"), XmlEvent::Comment(CmContent { text: "a--b".into() }), ee("p"), ED],
        &format(),
    );
    assert_eq!(out, "<p><!--a- -b--></p>");
}
