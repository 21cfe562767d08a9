//! Zeichen-Klassifikation: welche Zeichen brauchen Sonderbehandlung, und
//! welche benannte Entity gehoert zu einem Zeichen?
//!
//! Beide Fragen in O(1). Die Tabellen werden einmal aus einer Resource
//! geladen (eingebaute XML/HTML-Tabellen oder eine Datei im
//! `<name> <codepoint>`-Zeilenformat) und sind danach unveraenderlich —
//! Lookups sind nebenlaeufig ohne Synchronisation moeglich.

use std::sync::{Arc, Mutex, OnceLock};

use crate::{Error, FastHashMap, FastHashSet, Result};

/// Linefeed — immer in der Specials-Menge, unabhaengig von der Entity-Tabelle.
pub const S_LINEFEED: char = '\n';
/// Carriage Return — immer in der Specials-Menge.
pub const S_CARRIAGERETURN: char = '\r';

/// Name der eingebauten XML-Entity-Tabelle.
pub const XML_ENTITIES_RESOURCE: &str = "xml";
/// Name der eingebauten HTML-4.0-Entity-Tabelle.
pub const HTML_ENTITIES_RESOURCE: &str = "html";

const XML_ENTITIES: &str = include_str!("res/xml.ent");
const HTML_ENTITIES: &str = include_str!("res/html.ent");

/// Character classifier: specials membership + char→entity-name lookup.
///
/// Immutable after construction; share via `Arc` across serializer sessions.
#[derive(Debug)]
pub struct CharInfo {
    specials: FastHashSet<char>,
    entities: FastHashMap<char, Box<str>>,
}

impl CharInfo {
    /// Parst eine Entity-Definition (Zeilenformat `<name> <codepoint>`,
    /// Leerzeilen und `#`-Zeilen werden uebersprungen, weitere Felder
    /// ignoriert). LF und CR landen anschliessend immer in den Specials.
    ///
    /// # Errors
    ///
    /// `Error::ResourceLoad` bei Zeilen ohne Codepoint-Feld oder mit
    /// ungueltigem Codepoint (kein Dezimalwert, Surrogat, > U+10FFFF).
    pub fn parse(content: &str, resource: &str) -> Result<Self> {
        let mut specials = FastHashSet::default();
        let mut entities: FastHashMap<char, Box<str>> = FastHashMap::default();

        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let name = fields.next().unwrap_or_default();
            let Some(code) = fields.next() else {
                return Err(Error::resource_load(
                    resource,
                    format!("line {}: missing code point", lineno + 1),
                ));
            };
            let cp: u32 = code.parse().map_err(|_| {
                Error::resource_load(
                    resource,
                    format!("line {}: '{code}' is not a decimal code point", lineno + 1),
                )
            })?;
            let Some(ch) = char::from_u32(cp) else {
                return Err(Error::resource_load(
                    resource,
                    format!("line {}: U+{cp:X} is not a Unicode scalar value", lineno + 1),
                ));
            };
            specials.insert(ch);
            entities.insert(ch, Box::from(name));
        }

        // Zeilenenden brauchen immer Normalisierung, egal was die Tabelle sagt.
        specials.insert(S_LINEFEED);
        specials.insert(S_CARRIAGERETURN);

        Ok(Self { specials, entities })
    }

    /// Die eingebaute XML-Tabelle (`quot amp lt gt`).
    pub fn xml() -> &'static Arc<CharInfo> {
        static XML: OnceLock<Arc<CharInfo>> = OnceLock::new();
        XML.get_or_init(|| {
            Arc::new(
                CharInfo::parse(XML_ENTITIES, XML_ENTITIES_RESOURCE)
                    .expect("built-in XML entity table is valid"),
            )
        })
    }

    /// Die eingebaute HTML-4.0-Tabelle (voller Entity-Satz).
    pub fn html() -> &'static Arc<CharInfo> {
        static HTML: OnceLock<Arc<CharInfo>> = OnceLock::new();
        HTML.get_or_init(|| {
            Arc::new(
                CharInfo::parse(HTML_ENTITIES, HTML_ENTITIES_RESOURCE)
                    .expect("built-in HTML entity table is valid"),
            )
        })
    }

    /// Loads a character table by resource name.
    ///
    /// Resolution order: built-in name (`"xml"`, `"html"`), then the
    /// process-wide cache of previously loaded tables, then the filesystem.
    /// Loaded files are decoded as UTF-8; byte sequences that are not valid
    /// UTF-8 degrade to replacement characters instead of failing the load.
    ///
    /// # Errors
    ///
    /// `Error::ResourceLoad` wenn keine Aufloesung greift oder der Inhalt
    /// nicht parsebar ist.
    pub fn from_resource(name: &str) -> Result<Arc<CharInfo>> {
        match name {
            XML_ENTITIES_RESOURCE => return Ok(Arc::clone(Self::xml())),
            HTML_ENTITIES_RESOURCE => return Ok(Arc::clone(Self::html())),
            _ => {}
        }

        // Cache-Population ist synchronisiert; der Serializer selbst haelt
        // danach nur noch seinen Arc und fragt lock-frei ab.
        static CACHE: OnceLock<Mutex<FastHashMap<String, Arc<CharInfo>>>> = OnceLock::new();
        let cache = CACHE.get_or_init(|| Mutex::new(FastHashMap::default()));

        {
            let cache = cache.lock().expect("charinfo cache poisoned");
            if let Some(info) = cache.get(name) {
                return Ok(Arc::clone(info));
            }
        }

        let bytes = std::fs::read(name)
            .map_err(|e| Error::resource_load(name, e.to_string()))?;
        let content = String::from_utf8_lossy(&bytes);
        let info = Arc::new(Self::parse(&content, name)?);

        let mut cache = cache.lock().expect("charinfo cache poisoned");
        Ok(Arc::clone(
            cache.entry(name.to_string()).or_insert(info),
        ))
    }

    /// O(1): braucht dieses Zeichen Sonderbehandlung?
    #[inline]
    pub fn is_special(&self, ch: char) -> bool {
        self.specials.contains(&ch)
    }

    /// O(1): die benannte Entity fuer dieses Zeichen, falls registriert.
    #[inline]
    pub fn entity_name(&self, ch: char) -> Option<&str> {
        self.entities.get(&ch).map(|s| &**s)
    }
}
