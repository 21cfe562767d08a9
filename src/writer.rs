//! Gepufferter Output-Sink mit direkter Zeichen→Byte-Encodierung.
//!
//! Kein generischer Charset-Layer: UTF-8 wird von Hand encodiert (der
//! haeufigste Fall — `&str`-Runs sind bereits UTF-8 und werden als Bytes
//! durchkopiert), die Single-Byte-Familie (US-ASCII, Latin-*) schreibt ein
//! Byte pro Zeichen. Alles andere lehnt [`EncodedWriter::new`] ab; der
//! Serializer faengt das und faellt dokumentiert auf UTF-8 zurueck.

use std::io::Write;

use crate::encodings::{self, EncoderKind};
use crate::{Error, Result};

/// Puffergroesse — gross genug, dass Flushes selten sind, klein genug fuer
/// den Stack von Embedded-Abnehmern.
const BUF_SIZE: usize = 16 * 1024;

/// A buffered byte sink that encodes characters itself.
#[derive(Debug)]
pub struct EncodedWriter<W: Write> {
    out: W,
    buf: Vec<u8>,
    kind: EncoderKind,
}

impl<W: Write> EncodedWriter<W> {
    /// Erstellt einen Writer fuer den (normalisierten) MIME-Encoding-Namen.
    ///
    /// # Errors
    ///
    /// `Error::UnsupportedEncoding` wenn es fuer das Encoding keinen
    /// nativen Byte-Encoder gibt (z.B. UTF-16, CJK-Encodings). Aufrufer
    /// koennen fangen und mit UTF-8 erneut versuchen.
    pub fn new(out: W, mime_encoding: &str) -> Result<Self> {
        let Some(kind) = encodings::encoder_kind(mime_encoding) else {
            return Err(Error::UnsupportedEncoding(mime_encoding.to_string()));
        };
        Ok(Self {
            out,
            buf: Vec::with_capacity(BUF_SIZE),
            kind,
        })
    }

    /// Schreibt einen String-Slice.
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        match self.kind {
            EncoderKind::Utf8 => {
                // &str ist bereits UTF-8 — Bulk-Kopie.
                let bytes = s.as_bytes();
                if self.buf.len() + bytes.len() > BUF_SIZE {
                    self.flush_buffer()?;
                }
                if bytes.len() > BUF_SIZE {
                    self.out.write_all(bytes)?;
                } else {
                    self.buf.extend_from_slice(bytes);
                }
            }
            EncoderKind::SingleByte => {
                for ch in s.chars() {
                    self.push_single_byte(ch)?;
                }
            }
        }
        Ok(())
    }

    /// Schreibt ein einzelnes Zeichen.
    pub fn write_char(&mut self, ch: char) -> Result<()> {
        match self.kind {
            EncoderKind::Utf8 => {
                if self.buf.len() + 4 > BUF_SIZE {
                    self.flush_buffer()?;
                }
                push_utf8(&mut self.buf, ch);
                Ok(())
            }
            EncoderKind::SingleByte => self.push_single_byte(ch),
        }
    }

    /// Schreibt den Puffer in den Sink, ohne diesen zu flushen.
    pub fn flush_buffer(&mut self) -> Result<()> {
        if !self.buf.is_empty() {
            self.out.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }

    /// Schreibt den Puffer und flusht den darunterliegenden Sink.
    pub fn flush(&mut self) -> Result<()> {
        self.flush_buffer()?;
        self.out.flush()?;
        Ok(())
    }

    /// Gibt den inneren Sink zurueck (Restpuffer wird vorher geschrieben).
    pub fn into_inner(mut self) -> Result<W> {
        self.flush_buffer()?;
        Ok(self.out)
    }

    #[inline]
    fn push_single_byte(&mut self, ch: char) -> Result<()> {
        if self.buf.len() >= BUF_SIZE {
            self.flush_buffer()?;
        }
        // Der Serializer escaped alles oberhalb von last-printable; was hier
        // ankommt, passt in ein Byte (Unicode-Praefix-Eigenschaft der
        // Latin-Familie).
        debug_assert!((ch as u32) <= 0xFF, "unescaped char U+{:04X} reached single-byte sink", ch as u32);
        self.buf.push((ch as u32 & 0xFF) as u8);
        Ok(())
    }
}

/// Handgerollte UTF-8-Encodierung (1–4 Bytes).
#[inline]
fn push_utf8(buf: &mut Vec<u8>, ch: char) {
    let cp = ch as u32;
    if cp < 0x80 {
        buf.push(cp as u8);
    } else if cp < 0x800 {
        buf.push(0xC0 | (cp >> 6) as u8);
        buf.push(0x80 | (cp & 0x3F) as u8);
    } else if cp < 0x1_0000 {
        buf.push(0xE0 | (cp >> 12) as u8);
        buf.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        buf.push(0x80 | (cp & 0x3F) as u8);
    } else {
        buf.push(0xF0 | (cp >> 18) as u8);
        buf.push(0x80 | ((cp >> 12) & 0x3F) as u8);
        buf.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        buf.push(0x80 | (cp & 0x3F) as u8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf8_writer() -> EncodedWriter<Vec<u8>> {
        EncodedWriter::new(Vec::new(), "UTF-8").unwrap()
    }

    /// Die Hand-Encodierung muss byte-identisch zu std sein.
    #[test]
    fn utf8_encoding_stimmt_mit_std_ueberein() {
        for ch in ['a', '\u{7F}', '\u{80}', '\u{7FF}', '\u{800}', '\u{FFFD}', '\u{10000}', '\u{10FFFF}'] {
            let mut buf = Vec::new();
            push_utf8(&mut buf, ch);
            let mut expected = [0u8; 4];
            assert_eq!(buf, ch.encode_utf8(&mut expected).as_bytes(), "U+{:04X}", ch as u32);
        }
    }

    #[test]
    fn write_str_roundtrip() {
        let mut w = utf8_writer();
        w.write_str("<root>äöü</root>").unwrap();
        let out = w.into_inner().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<root>äöü</root>");
    }

    #[test]
    fn write_char_gemischt_mit_str() {
        let mut w = utf8_writer();
        w.write_str("a").unwrap();
        w.write_char('€').unwrap();
        w.write_str("b").unwrap();
        assert_eq!(String::from_utf8(w.into_inner().unwrap()).unwrap(), "a€b");
    }

    /// Eingaben groesser als der Puffer werden direkt geschrieben.
    #[test]
    fn write_str_groesser_als_puffer() {
        let big = "x".repeat(BUF_SIZE * 2 + 17);
        let mut w = utf8_writer();
        w.write_str(&big).unwrap();
        assert_eq!(w.into_inner().unwrap().len(), big.len());
    }

    #[test]
    fn single_byte_ascii() {
        let mut w = EncodedWriter::new(Vec::new(), "US-ASCII").unwrap();
        w.write_str("plain").unwrap();
        w.write_char('!').unwrap();
        assert_eq!(w.into_inner().unwrap(), b"plain!");
    }

    /// Latin-1: ein Byte pro Zeichen, Codepoint == Byte.
    #[test]
    fn single_byte_latin1() {
        let mut w = EncodedWriter::new(Vec::new(), "ISO-8859-1").unwrap();
        w.write_str("gr\u{FC}n").unwrap();
        assert_eq!(w.into_inner().unwrap(), b"gr\xFCn");
    }

    #[test]
    fn unsupported_encoding_abgelehnt() {
        let err = EncodedWriter::new(Vec::new(), "UTF-16").unwrap_err();
        assert!(matches!(err, Error::UnsupportedEncoding(_)));
        assert!(EncodedWriter::new(Vec::new(), "EUC-JP").is_err());
    }

    #[test]
    fn flush_leert_den_puffer() {
        let mut w = utf8_writer();
        w.write_str("abc").unwrap();
        w.flush().unwrap();
        assert_eq!(w.out, b"abc");
        // nochmal flushen ist harmlos
        w.flush().unwrap();
        assert_eq!(w.out, b"abc");
    }
}
