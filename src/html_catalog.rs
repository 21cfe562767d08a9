//! Der statische HTML-4.0-Element-Katalog.
//!
//! Reine Daten (HTML 4.0 loose + strict DTD, dazu Transitional- und
//! NS4-Eintraege), einmal beim ersten Zugriff in den Trie gebaut und danach
//! read-only. Elemente, die der Katalog nicht kennt, liefern einen
//! generischen Block-Deskriptor — Aufrufer muessen nie auf Abwesenheit
//! pruefen.

use std::sync::OnceLock;

use crate::elem_desc::ElemDesc;
use crate::trie::Trie;

struct Catalog {
    elements: Trie<ElemDesc>,
    /// Fallback fuer unbekannte Elemente: generisches Block-Element.
    dummy: ElemDesc,
}

/// Liefert die Beschreibung eines HTML-Elements (case-insensitiv).
/// Unbekannte Elemente ergeben den generischen Block-Deskriptor.
pub fn html_elem_desc(name: &str) -> &'static ElemDesc {
    let catalog = catalog();
    catalog.elements.get(name).unwrap_or(&catalog.dummy)
}

fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(build)
}

fn build() -> Catalog {
    use crate::elem_desc::ElemDesc as E;
    let mut t = Trie::new();

    // HTML 4.0 loose DTD
    t.put("BASEFONT", E::new(E::EMPTY));
    t.put(
        "FRAME",
        E::new(E::EMPTY | E::BLOCK)
            .with_attr("SRC", E::ATTRURL)
            .with_attr("LONGDESC", E::ATTRURL),
    );
    t.put("FRAMESET", E::new(E::BLOCK));
    t.put("NOFRAMES", E::new(E::BLOCK));
    t.put("ISINDEX", E::new(E::EMPTY | E::BLOCK));
    t.put("APPLET", E::new(E::WHITESPACESENSITIVE));
    t.put("CENTER", E::new(E::BLOCK));
    t.put("DIR", E::new(E::BLOCK));
    t.put("MENU", E::new(E::BLOCK));

    // HTML 4.0 strict DTD
    t.put("TT", E::new(E::FONTSTYLE));
    t.put("I", E::new(E::FONTSTYLE));
    t.put("B", E::new(E::FONTSTYLE));
    t.put("BIG", E::new(E::FONTSTYLE));
    t.put("SMALL", E::new(E::FONTSTYLE));
    t.put("EM", E::new(E::PHRASE));
    t.put("STRONG", E::new(E::PHRASE));
    t.put("DFN", E::new(E::PHRASE));
    t.put("CODE", E::new(E::PHRASE));
    t.put("SAMP", E::new(E::PHRASE));
    t.put("KBD", E::new(E::PHRASE));
    t.put("VAR", E::new(E::PHRASE));
    t.put("CITE", E::new(E::PHRASE));
    t.put("ABBR", E::new(E::PHRASE));
    t.put("ACRONYM", E::new(E::PHRASE));
    t.put("SUP", E::new(E::SPECIAL | E::ASPECIAL));
    t.put("SUB", E::new(E::SPECIAL | E::ASPECIAL));
    t.put("SPAN", E::new(E::SPECIAL | E::ASPECIAL));
    t.put("BDO", E::new(E::SPECIAL | E::ASPECIAL));
    t.put("BR", E::new(E::SPECIAL | E::ASPECIAL | E::EMPTY | E::BLOCK));
    t.put("BODY", E::new(E::BLOCK));
    t.put("ADDRESS", E::new(E::BLOCK | E::BLOCKFORM | E::BLOCKFORMFIELDSET));
    t.put(
        "DIV",
        E::new(E::BLOCK | E::BLOCKFORM | E::BLOCKFORMFIELDSET).with_attr("SRC", E::ATTRURL),
    );
    t.put(
        "A",
        E::new(E::SPECIAL)
            .with_attr("HREF", E::ATTRURL)
            .with_attr("NAME", E::ATTRURL),
    );
    t.put("MAP", E::new(E::SPECIAL | E::ASPECIAL | E::BLOCK));
    t.put(
        "AREA",
        E::new(E::EMPTY | E::BLOCK)
            .with_attr("HREF", E::ATTRURL)
            .with_attr("NOHREF", E::ATTREMPTY),
    );
    t.put(
        "LINK",
        E::new(E::HEADMISC | E::EMPTY | E::BLOCK).with_attr("HREF", E::ATTRURL),
    );
    t.put(
        "IMG",
        E::new(E::SPECIAL | E::ASPECIAL | E::EMPTY | E::WHITESPACESENSITIVE)
            .with_attr("SRC", E::ATTRURL)
            .with_attr("LONGDESC", E::ATTRURL)
            .with_attr("USEMAP", E::ATTRURL)
            .with_attr("ISMAP", E::ATTREMPTY),
    );
    t.put(
        "OBJECT",
        E::new(E::SPECIAL | E::ASPECIAL | E::HEADMISC | E::WHITESPACESENSITIVE)
            .with_attr("CLASSID", E::ATTRURL)
            .with_attr("CODEBASE", E::ATTRURL)
            .with_attr("DATA", E::ATTRURL)
            .with_attr("ARCHIVE", E::ATTRURL)
            .with_attr("USEMAP", E::ATTRURL)
            .with_attr("DECLARE", E::ATTREMPTY),
    );
    t.put("PARAM", E::new(E::EMPTY));
    t.put("HR", E::new(E::BLOCK | E::BLOCKFORM | E::BLOCKFORMFIELDSET | E::EMPTY));
    t.put("P", E::new(E::BLOCK | E::BLOCKFORM | E::BLOCKFORMFIELDSET));
    t.put("H1", E::new(E::HEAD | E::BLOCK));
    t.put("H2", E::new(E::HEAD | E::BLOCK));
    t.put("H3", E::new(E::HEAD | E::BLOCK));
    t.put("H4", E::new(E::HEAD | E::BLOCK));
    t.put("H5", E::new(E::HEAD | E::BLOCK));
    t.put("H6", E::new(E::HEAD | E::BLOCK));
    t.put("PRE", E::new(E::PREFORMATTED | E::BLOCK));
    t.put(
        "Q",
        E::new(E::SPECIAL | E::ASPECIAL).with_attr("CITE", E::ATTRURL),
    );
    t.put(
        "BLOCKQUOTE",
        E::new(E::BLOCK | E::BLOCKFORM | E::BLOCKFORMFIELDSET).with_attr("CITE", E::ATTRURL),
    );
    t.put("INS", E::new(0).with_attr("CITE", E::ATTRURL));
    t.put("DEL", E::new(0).with_attr("CITE", E::ATTRURL));
    t.put("DL", E::new(E::BLOCK | E::BLOCKFORM | E::BLOCKFORMFIELDSET));
    t.put("DT", E::new(E::BLOCK));
    t.put("DD", E::new(E::BLOCK));
    t.put("OL", E::new(E::LIST | E::BLOCK));
    t.put("UL", E::new(E::LIST | E::BLOCK));
    t.put("LI", E::new(E::BLOCK));
    t.put("FORM", E::new(E::BLOCK).with_attr("ACTION", E::ATTRURL));
    t.put("LABEL", E::new(E::FORMCTRL));
    t.put(
        "INPUT",
        E::new(E::FORMCTRL | E::INLINELABEL | E::EMPTY)
            .with_attr("SRC", E::ATTRURL)
            .with_attr("USEMAP", E::ATTRURL)
            .with_attr("CHECKED", E::ATTREMPTY)
            .with_attr("DISABLED", E::ATTREMPTY)
            .with_attr("ISMAP", E::ATTREMPTY)
            .with_attr("READONLY", E::ATTREMPTY),
    );
    t.put(
        "SELECT",
        E::new(E::FORMCTRL | E::INLINELABEL)
            .with_attr("DISABLED", E::ATTREMPTY)
            .with_attr("MULTIPLE", E::ATTREMPTY),
    );
    t.put("OPTGROUP", E::new(0).with_attr("DISABLED", E::ATTREMPTY));
    t.put(
        "OPTION",
        E::new(0)
            .with_attr("SELECTED", E::ATTREMPTY)
            .with_attr("DISABLED", E::ATTREMPTY),
    );
    t.put(
        "TEXTAREA",
        E::new(E::FORMCTRL | E::INLINELABEL)
            .with_attr("DISABLED", E::ATTREMPTY)
            .with_attr("READONLY", E::ATTREMPTY),
    );
    t.put("FIELDSET", E::new(E::BLOCK | E::BLOCKFORM));
    t.put("LEGEND", E::new(0));
    t.put(
        "BUTTON",
        E::new(E::FORMCTRL | E::INLINELABEL).with_attr("DISABLED", E::ATTREMPTY),
    );
    t.put("TABLE", E::new(E::BLOCK | E::BLOCKFORM | E::BLOCKFORMFIELDSET));
    t.put("CAPTION", E::new(E::BLOCK));
    t.put("THEAD", E::new(E::BLOCK));
    t.put("TFOOT", E::new(E::BLOCK));
    t.put("TBODY", E::new(E::BLOCK));
    t.put("COLGROUP", E::new(E::BLOCK));
    t.put("COL", E::new(E::EMPTY | E::BLOCK));
    t.put("TR", E::new(E::BLOCK));
    t.put("TH", E::new(0));
    t.put("TD", E::new(0));
    t.put(
        "HEAD",
        E::new(E::BLOCK | E::HEADELEM).with_attr("PROFILE", E::ATTRURL),
    );
    t.put("TITLE", E::new(E::BLOCK));
    t.put("BASE", E::new(E::EMPTY | E::BLOCK).with_attr("HREF", E::ATTRURL));
    t.put("META", E::new(E::HEADMISC | E::EMPTY | E::BLOCK));
    t.put("STYLE", E::new(E::HEADMISC | E::RAW | E::BLOCK));
    t.put(
        "SCRIPT",
        E::new(E::SPECIAL | E::ASPECIAL | E::HEADMISC | E::RAW)
            .with_attr("SRC", E::ATTRURL)
            .with_attr("FOR", E::ATTRURL)
            .with_attr("DEFER", E::ATTREMPTY),
    );
    t.put("NOSCRIPT", E::new(E::BLOCK | E::BLOCKFORM | E::BLOCKFORMFIELDSET));
    t.put("HTML", E::new(E::BLOCK));

    // Transitional DTD
    t.put("FONT", E::new(E::FONTSTYLE));
    t.put("S", E::new(E::FONTSTYLE));
    t.put("STRIKE", E::new(E::FONTSTYLE));
    t.put("U", E::new(E::FONTSTYLE));
    t.put("NOBR", E::new(E::FONTSTYLE));

    // HTML 4.0 Section 16.5
    t.put(
        "IFRAME",
        E::new(E::BLOCK | E::BLOCKFORM | E::BLOCKFORMFIELDSET)
            .with_attr("SRC", E::ATTRURL)
            .with_attr("LONGDESC", E::ATTRURL),
    );

    // NS4-Erweiterungen
    t.put(
        "LAYER",
        E::new(E::BLOCK | E::BLOCKFORM | E::BLOCKFORMFIELDSET).with_attr("SRC", E::ATTRURL),
    );
    t.put(
        "ILAYER",
        E::new(E::BLOCK | E::BLOCKFORM | E::BLOCKFORMFIELDSET).with_attr("SRC", E::ATTRURL),
    );

    Catalog {
        elements: t,
        dummy: E::new(E::BLOCK),
    }
}
