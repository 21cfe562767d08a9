//! Encoding-Faehigkeiten: MIME-Namen, Aliase und der groesste Codepoint,
//! der ohne numerische Character Reference serialisierbar ist.
//!
//! Statische Tabelle statt Laufzeit-Introspektion: pro Encoding steht der
//! Last-Printable-Codepoint fest. Unbekannte Namen fallen konservativ auf
//! 0x7F zurueck — lieber zu viel escapen als korrupten Output riskieren.

use std::borrow::Cow;

/// The default output encoding when none is declared.
pub const DEFAULT_MIME_ENCODING: &str = "UTF-8";

/// Wie der Encoder des [`crate::writer::EncodedWriter`] Zeichen in Bytes
/// uebersetzt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderKind {
    /// Handgerollte UTF-8-Encodierung (1–4 Bytes pro Zeichen).
    Utf8,
    /// Ein Byte pro Zeichen (US-ASCII / Latin-Familie). Der Serializer
    /// garantiert, dass nur Zeichen <= last-printable den Sink erreichen.
    SingleByte,
}

struct EncodingInfo {
    /// Bevorzugter MIME-Name.
    mime: &'static str,
    /// Case-insensitive Aliase.
    aliases: &'static [&'static str],
    /// Groesster ohne numerische Reference serialisierbarer Codepoint.
    last_printable: u32,
}

/// Bekannte Encodings. `last_printable` 0xFFFF heisst Unicode-vollstaendig
/// (alles jenseits der BMP wird ohnehin als kombinierte Reference
/// geschrieben, siehe Serializer).
static ENCODINGS: &[EncodingInfo] = &[
    EncodingInfo {
        mime: "UTF-8",
        aliases: &["UTF8", "unicode-1-1-utf-8"],
        last_printable: 0xFFFF,
    },
    EncodingInfo {
        mime: "UTF-16",
        aliases: &["UTF16", "ISO-10646-UCS-2"],
        last_printable: 0xFFFF,
    },
    EncodingInfo { mime: "UTF-16BE", aliases: &[], last_printable: 0xFFFF },
    EncodingInfo { mime: "UTF-16LE", aliases: &[], last_printable: 0xFFFF },
    EncodingInfo {
        mime: "US-ASCII",
        aliases: &["ASCII", "ANSI_X3.4-1968", "ISO646-US"],
        last_printable: 0x7F,
    },
    EncodingInfo {
        mime: "ISO-8859-1",
        aliases: &["ISO8859_1", "LATIN1", "L1", "8859_1"],
        last_printable: 0xFF,
    },
    EncodingInfo { mime: "ISO-8859-2", aliases: &["ISO8859_2", "LATIN2", "8859_2"], last_printable: 0xFF },
    EncodingInfo { mime: "ISO-8859-3", aliases: &["ISO8859_3", "8859_3"], last_printable: 0xFF },
    EncodingInfo { mime: "ISO-8859-4", aliases: &["ISO8859_4", "8859_4"], last_printable: 0xFF },
    EncodingInfo { mime: "ISO-8859-5", aliases: &["ISO8859_5", "8859_5"], last_printable: 0xFF },
    EncodingInfo { mime: "ISO-8859-6", aliases: &["ISO8859_6", "8859_6"], last_printable: 0xFF },
    EncodingInfo { mime: "ISO-8859-7", aliases: &["ISO8859_7", "8859_7"], last_printable: 0xFF },
    EncodingInfo { mime: "ISO-8859-8", aliases: &["ISO8859_8", "8859_8"], last_printable: 0xFF },
    EncodingInfo { mime: "ISO-8859-9", aliases: &["ISO8859_9", "LATIN5", "8859_9"], last_printable: 0xFF },
    EncodingInfo { mime: "ISO-8859-15", aliases: &["ISO8859_15", "LATIN9", "8859_15"], last_printable: 0xFF },
    EncodingInfo { mime: "WINDOWS-1250", aliases: &["CP1250"], last_printable: 0xFF },
    EncodingInfo { mime: "WINDOWS-1251", aliases: &["CP1251"], last_printable: 0xFF },
    EncodingInfo { mime: "WINDOWS-1252", aliases: &["CP1252"], last_printable: 0xFF },
    // CJK-Encodings: die Original-Implementierung behandelt sie als
    // Unicode-vollstaendig und verliess sich auf den (hier entfernten)
    // Converter-Tiefencheck. Ohne nativen Byte-Encoder lehnt der
    // EncodedWriter sie ohnehin ab; die Werte dienen reinen
    // Character-Stream-Abnehmern.
    EncodingInfo { mime: "Shift_JIS", aliases: &["SJIS", "MS_Kanji"], last_printable: 0xFFFF },
    EncodingInfo { mime: "EUC-JP", aliases: &["EUCJIS", "EUC_JP"], last_printable: 0xFFFF },
    EncodingInfo { mime: "ISO-2022-JP", aliases: &["JIS"], last_printable: 0xFFFF },
    EncodingInfo { mime: "EUC-KR", aliases: &["KSC5601", "EUC_KR"], last_printable: 0xFFFF },
    EncodingInfo { mime: "Big5", aliases: &[], last_printable: 0xFFFF },
    EncodingInfo { mime: "GB2312", aliases: &["EUC-CN"], last_printable: 0xFFFF },
    EncodingInfo { mime: "KOI8-R", aliases: &["KOI8_R"], last_printable: 0xFF },
];

fn find(name: &str) -> Option<&'static EncodingInfo> {
    ENCODINGS.iter().find(|info| {
        info.mime.eq_ignore_ascii_case(name)
            || info.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    })
}

/// Normalisiert einen deklarierten Encoding-Namen auf den bevorzugten
/// MIME-Namen. `None`/leer ergibt UTF-8; unbekannte Namen passieren
/// unveraendert (Identity-Fallback).
pub fn mime_encoding(name: Option<&str>) -> Cow<'static, str> {
    match name {
        None => Cow::Borrowed(DEFAULT_MIME_ENCODING),
        Some("") => Cow::Borrowed(DEFAULT_MIME_ENCODING),
        Some(name) => match find(name) {
            Some(info) => Cow::Borrowed(info.mime),
            None => Cow::Owned(name.to_string()),
        },
    }
}

/// Groesster Codepoint, der in diesem Encoding ohne numerische Character
/// Reference garantiert darstellbar ist. 0x7F fuer unbekannte Encodings.
pub fn last_printable(name: &str) -> u32 {
    find(name).map_or(0x7F, |info| info.last_printable)
}

/// Last-Printable des Default-Encodings.
pub fn default_last_printable() -> u32 {
    last_printable(DEFAULT_MIME_ENCODING)
}

/// Kann dieses Zeichen ohne Escaping geschrieben werden?
///
/// Unter 0x7F entscheidet die Control-Zeichen-Regel (Tab, LF, CR ja,
/// uebrige C0-Controls nein), darueber der Range-Check gegen
/// `last_printable`.
#[inline]
pub fn can_convert(ch: char, last_printable: u32) -> bool {
    let cp = ch as u32;
    if cp < 127 {
        cp >= 0x20 || matches!(ch, '\t' | '\n' | '\r')
    } else {
        cp <= last_printable
    }
}

/// Welchen Byte-Encoder der Sink fuer dieses (normalisierte) Encoding
/// verwenden kann; `None` wenn keiner existiert.
pub(crate) fn encoder_kind(mime: &str) -> Option<EncoderKind> {
    if mime.eq_ignore_ascii_case("UTF-8") {
        return Some(EncoderKind::Utf8);
    }
    match find(mime) {
        Some(info) if info.last_printable <= 0xFF => Some(EncoderKind::SingleByte),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_encoding_default_ist_utf8() {
        assert_eq!(mime_encoding(None), "UTF-8");
        assert_eq!(mime_encoding(Some("")), "UTF-8");
    }

    /// Aliase werden case-insensitiv auf den bevorzugten Namen normalisiert.
    #[test]
    fn mime_encoding_normalisiert_aliase() {
        assert_eq!(mime_encoding(Some("utf8")), "UTF-8");
        assert_eq!(mime_encoding(Some("latin1")), "ISO-8859-1");
        assert_eq!(mime_encoding(Some("ascii")), "US-ASCII");
        assert_eq!(mime_encoding(Some("sjis")), "Shift_JIS");
    }

    /// Unbekannte Namen passieren unveraendert (Identity-Fallback).
    #[test]
    fn mime_encoding_identity_fallback() {
        assert_eq!(mime_encoding(Some("X-CUSTOM-ENC")), "X-CUSTOM-ENC");
    }

    #[test]
    fn last_printable_werte() {
        assert_eq!(last_printable("US-ASCII"), 0x7F);
        assert_eq!(last_printable("ascii"), 0x7F);
        assert_eq!(last_printable("ISO-8859-1"), 0xFF);
        assert_eq!(last_printable("UTF-8"), 0xFFFF);
        assert_eq!(last_printable("UTF-16"), 0xFFFF);
    }

    /// Konservativer Default: unbekannt → 0x7F (mehr Escaping, nie korrupt).
    #[test]
    fn last_printable_unbekannt_ist_7f() {
        assert_eq!(last_printable("X-CUSTOM-ENC"), 0x7F);
    }

    #[test]
    fn can_convert_ascii_bereich() {
        assert!(can_convert('a', 0x7F));
        assert!(can_convert(' ', 0x7F));
        assert!(can_convert('\t', 0x7F));
        assert!(can_convert('\n', 0x7F));
        assert!(can_convert('\r', 0x7F));
        // uebrige C0-Controls nie
        assert!(!can_convert('\u{0}', 0x7F));
        assert!(!can_convert('\u{7}', 0xFFFF));
    }

    #[test]
    fn can_convert_range_check() {
        assert!(!can_convert('\u{E4}', 0x7F));
        assert!(can_convert('\u{E4}', 0xFF));
        assert!(!can_convert('\u{20AC}', 0xFF));
        assert!(can_convert('\u{20AC}', 0xFFFF));
    }

    #[test]
    fn encoder_kind_zuordnung() {
        assert_eq!(encoder_kind("UTF-8"), Some(EncoderKind::Utf8));
        assert_eq!(encoder_kind("US-ASCII"), Some(EncoderKind::SingleByte));
        assert_eq!(encoder_kind("ISO-8859-1"), Some(EncoderKind::SingleByte));
        assert_eq!(encoder_kind("UTF-16"), None);
        assert_eq!(encoder_kind("Shift_JIS"), None);
        assert_eq!(encoder_kind("X-CUSTOM-ENC"), None);
    }
}
