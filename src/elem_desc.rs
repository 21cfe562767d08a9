//! Element-Beschreibung fuer die HTML-Ausgabemethode: ein Flag-Bitmask pro
//! Element plus Attribut-Flags (URL-wertig, Boolean/leer-wertig).

/// Formatting properties of one HTML element type.
///
/// Flags sind ein Bitmask; Attribut-Flags leben in einem eigenen kleinen
/// Namensraum (`ATTRURL`, `ATTREMPTY`) und werden pro Attributname
/// case-insensitiv abgefragt.
#[derive(Debug, Clone)]
pub struct ElemDesc {
    flags: u32,
    /// Attributname (uppercase) → Attribut-Flags. Linear-Scan statt Map:
    /// maximal sechs Eintraege pro Element.
    attrs: Vec<(&'static str, u32)>,
}

impl ElemDesc {
    /// Leeres Element — kein End-Tag in HTML (`<br>`, `<img>`, ...).
    pub const EMPTY: u32 = 1 << 0;
    /// Fliesstext-Inhalt.
    pub const FLOW: u32 = 1 << 1;
    /// Block-Element (Einrueckung erlaubt davor/danach).
    pub const BLOCK: u32 = 1 << 2;
    /// Block-Element innerhalb von FORM.
    pub const BLOCKFORM: u32 = 1 << 3;
    /// Block-Element innerhalb von FORM/FIELDSET.
    pub const BLOCKFORMFIELDSET: u32 = 1 << 4;
    /// CDATA-Inhaltsmodell.
    pub const CDATA: u32 = 1 << 5;
    /// PCDATA-Inhaltsmodell.
    pub const PCDATA: u32 = 1 << 6;
    /// Raw-Text-Element: Inhalt wird nie escaped (`SCRIPT`, `STYLE`).
    pub const RAW: u32 = 1 << 7;
    /// Inline-Element.
    pub const INLINE: u32 = 1 << 8;
    /// Inline-Element innerhalb von A.
    pub const INLINEA: u32 = 1 << 9;
    /// Inline-Element innerhalb von LABEL.
    pub const INLINELABEL: u32 = 1 << 10;
    /// Schrift-Stil-Element (`TT`, `I`, `B`, ...).
    pub const FONTSTYLE: u32 = 1 << 11;
    /// Phrasen-Element (`EM`, `STRONG`, `CODE`, ...).
    pub const PHRASE: u32 = 1 << 12;
    /// Formular-Steuerelement (`INPUT`, `SELECT`, ...).
    pub const FORMCTRL: u32 = 1 << 13;
    /// "special" Inline-Kategorie der DTD.
    pub const SPECIAL: u32 = 1 << 14;
    /// "special" Kategorie innerhalb von A.
    pub const ASPECIAL: u32 = 1 << 15;
    /// In HEAD erlaubtes Misc-Element (`META`, `LINK`, ...).
    pub const HEADMISC: u32 = 1 << 16;
    /// Ueberschrift (`H1`..`H6`).
    pub const HEAD: u32 = 1 << 17;
    /// Listen-Element (`OL`, `UL`).
    pub const LIST: u32 = 1 << 18;
    /// Vorformatierter Inhalt (`PRE`).
    pub const PREFORMATTED: u32 = 1 << 19;
    /// Whitespace-sensitiv: nach dem End-Tag keine Reformatierung der
    /// Geschwister (`IMG`, `OBJECT`, `APPLET`).
    pub const WHITESPACESENSITIVE: u32 = 1 << 20;
    /// Das HEAD-Element selbst (META-Injektion).
    pub const HEADELEM: u32 = 1 << 21;

    /// Attribut-Flag: URL-wertig (`HREF`, `SRC`, ...).
    pub const ATTRURL: u32 = 1 << 1;
    /// Attribut-Flag: Boolean/leer-wertig (`CHECKED`, `DISABLED`, ...).
    pub const ATTREMPTY: u32 = 1 << 2;

    /// Erstellt eine Beschreibung mit den gegebenen Element-Flags.
    pub const fn new(flags: u32) -> Self {
        Self { flags, attrs: Vec::new() }
    }

    /// Haengt ein Attribut-Flag an (Katalog-Aufbau).
    pub(crate) fn with_attr(mut self, name: &'static str, flags: u32) -> Self {
        self.attrs.push((name, flags));
        self
    }

    /// Bitwise-Test auf Element-Flags.
    #[inline]
    pub fn is(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }

    /// Case-insensitiver Bitwise-Test auf Attribut-Flags;
    /// `false` fuer Attribute, die dieses Element nicht kennt.
    pub fn is_attr_flag_set(&self, attr_name: &str, flag: u32) -> bool {
        self.attrs
            .iter()
            .any(|(name, flags)| flags & flag != 0 && name.eq_ignore_ascii_case(attr_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_testet_bitmask() {
        let d = ElemDesc::new(ElemDesc::EMPTY | ElemDesc::BLOCK);
        assert!(d.is(ElemDesc::EMPTY));
        assert!(d.is(ElemDesc::BLOCK));
        assert!(!d.is(ElemDesc::RAW));
    }

    #[test]
    fn attr_flags_case_insensitiv() {
        let d = ElemDesc::new(0)
            .with_attr("HREF", ElemDesc::ATTRURL)
            .with_attr("NOHREF", ElemDesc::ATTREMPTY);
        assert!(d.is_attr_flag_set("href", ElemDesc::ATTRURL));
        assert!(d.is_attr_flag_set("Href", ElemDesc::ATTRURL));
        assert!(!d.is_attr_flag_set("href", ElemDesc::ATTREMPTY));
        assert!(d.is_attr_flag_set("nohref", ElemDesc::ATTREMPTY));
    }

    /// Unbekannte Attribute sind nie geflaggt.
    #[test]
    fn unbekanntes_attribut_ist_false() {
        let d = ElemDesc::new(ElemDesc::BLOCK);
        assert!(!d.is_attr_flag_set("onclick", ElemDesc::ATTRURL));
    }
}
