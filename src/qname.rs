//! Qualified names fuer die `cdata-section-elements` Konfiguration.
//!
//! Ein QName ist URI + local-name + optionaler Prefix. Zwei QNames sind
//! gleich wenn URI und local-name uebereinstimmen — der Prefix zaehlt nicht.

use std::fmt;
use std::rc::Rc;

use crate::{Error, Result};

/// A qualified name: namespace URI, local name, optional prefix.
#[derive(Debug, Clone, Eq)]
pub struct QName {
    /// The namespace URI (empty string for no namespace).
    pub uri: Rc<str>,
    /// The local part.
    pub local_name: Rc<str>,
    /// The prefix, if one was given (not part of identity).
    pub prefix: Option<Rc<str>>,
}

impl QName {
    /// Erstellt einen QName ohne Prefix.
    pub fn new(uri: &str, local_name: &str) -> Self {
        Self {
            uri: Rc::from(uri),
            local_name: Rc::from(local_name),
            prefix: None,
        }
    }

    /// Erstellt einen QName mit Prefix.
    pub fn with_prefix(uri: &str, local_name: &str, prefix: &str) -> Self {
        Self {
            uri: Rc::from(uri),
            local_name: Rc::from(local_name),
            prefix: Some(Rc::from(prefix)),
        }
    }

    /// Parst einen QName aus String-Form.
    ///
    /// Unterstuetzt Clark-Notation `{uri}local`, `prefix:local` (der Prefix
    /// bleibt unaufgeloest, URI leer) und nacktes `local`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidQName` bei leerem Input, unbalancierter `{`/`}` oder
    /// leerem local-name.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidQName(s.to_string()));
        }
        if let Some(rest) = s.strip_prefix('{') {
            let Some(close) = rest.find('}') else {
                return Err(Error::InvalidQName(s.to_string()));
            };
            let (uri, local) = rest.split_at(close);
            let local = &local[1..];
            if local.is_empty() {
                return Err(Error::InvalidQName(s.to_string()));
            }
            return Ok(Self::new(uri, local));
        }
        match s.split_once(':') {
            Some((prefix, local)) => {
                if prefix.is_empty() || local.is_empty() {
                    return Err(Error::InvalidQName(s.to_string()));
                }
                Ok(Self::with_prefix("", local, prefix))
            }
            None => Ok(Self::new("", s)),
        }
    }

    /// Parst eine whitespace-separierte Liste von QNames
    /// (das Format der `cdata-section-elements` Option).
    pub fn parse_list(s: &str) -> Result<Vec<Self>> {
        s.split_whitespace().map(Self::parse).collect()
    }

    /// Prueft ob dieser QName das Element (uri, local) bezeichnet.
    ///
    /// Leere URI und fehlende URI sind aequivalent.
    pub fn matches(&self, uri: &str, local_name: &str) -> bool {
        &*self.local_name == local_name && &*self.uri == uri
    }
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri && self.local_name == other.local_name
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.uri.is_empty() {
            write!(f, "{}", self.local_name)
        } else {
            write!(f, "{{{}}}{}", self.uri, self.local_name)
        }
    }
}
