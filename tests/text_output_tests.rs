//! Integrationstests fuer die Text-Ausgabemethode: nur Zeichendaten,
//! kein Markup, kein Escaping.

use saxout::event::{AtContent, ChContent, CmContent, EeContent, PiContent, SeContent};
use saxout::{events_to_string, Method, OutputFormat, XmlEvent};

fn format() -> OutputFormat {
    OutputFormat::default()
        .with_method(Method::Text)
        .with_line_separator("\n")
}

fn serialize(events: Vec<XmlEvent>) -> String {
    events_to_string(&events, &format()).unwrap()
}

/// Tags produzieren keinerlei Output, Text schon.
#[test]
fn nur_zeichendaten() {
    let events = vec![
        XmlEvent::StartDocument,
        XmlEvent::StartElement(SeContent::named("root")),
        XmlEvent::Characters(ChContent { value: "hello".into() }),
        XmlEvent::EndElement(EeContent::named("root")),
        XmlEvent::EndDocument,
    ];
    assert_eq!(serialize(events), "hello");
}

/// Kein Escaping: Markup-Zeichen passieren roh.
#[test]
fn kein_escaping() {
    let events = vec![
        XmlEvent::StartDocument,
        XmlEvent::StartElement(SeContent::named("r")),
        XmlEvent::Characters(ChContent { value: "a < b & c > d".into() }),
        XmlEvent::EndElement(EeContent::named("r")),
        XmlEvent::EndDocument,
    ];
    assert_eq!(serialize(events), "a < b & c > d");
}

/// Zeilenenden werden auf den konfigurierten Trenner normalisiert.
#[test]
fn zeilenenden_normalisiert() {
    let f = OutputFormat::default()
        .with_method(Method::Text)
        .with_line_separator("\r\n");
    let events = vec![
        XmlEvent::StartDocument,
        XmlEvent::Characters(ChContent { value: "a\nb".into() }),
        XmlEvent::EndDocument,
    ];
    assert_eq!(events_to_string(&events, &f).unwrap(), "a\r\nb");
}

/// Kommentare, PIs und Attribute verschwinden vollstaendig.
#[test]
fn markup_events_verschwinden() {
    let mut se = SeContent::named("r");
    se.attributes.push(AtContent {
        qname: "a".into(),
        value: "v".into(),
    });
    let events = vec![
        XmlEvent::StartDocument,
        XmlEvent::Comment(CmContent { text: "hidden".into() }),
        XmlEvent::StartElement(se),
        XmlEvent::ProcessingInstruction(PiContent {
            target: "t".into(),
            data: "d".into(),
        }),
        XmlEvent::Characters(ChContent { value: "x".into() }),
        XmlEvent::EndElement(EeContent::named("r")),
        XmlEvent::EndDocument,
    ];
    assert_eq!(serialize(events), "x");
}

/// CDATA-Inhalt wird als blanker Text geschrieben.
#[test]
fn cdata_als_text() {
    let events = vec![
        XmlEvent::StartDocument,
        XmlEvent::StartElement(SeContent::named("r")),
        XmlEvent::StartCData,
        XmlEvent::Characters(ChContent { value: "a]]>b".into() }),
        XmlEvent::EndCData,
        XmlEvent::EndElement(EeContent::named("r")),
        XmlEvent::EndDocument,
    ];
    assert_eq!(serialize(events), "a]]>b");
}
