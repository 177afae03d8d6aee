//! Rack identifier derivation.
//!
//! Every infrastructure name used during bring-up (switches, PDU, BMC network,
//! server prefix) is mechanically derived from the rack number embedded in the
//! full rack name, e.g. `dc2-row4-rk17` yields `r17-mtor`, `r17-tor`, `r17pdu`,
//! `r17bmc` and `r17s`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Matches the primary rack token; group 1 is the rack number.
static RACK_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rk(\d+)").expect("rack token pattern is valid"));

/// Matches the alternate `sr<digits>` token; group 1 is its own number.
static SR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sr(\d+)").expect("sr token pattern is valid"));

/// Names mechanically derived from a single rack number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierFamily {
    /// Management top-of-rack switch (`r{N}-mtor`)
    pub mtor: String,
    /// Data top-of-rack switch (`r{N}-tor`)
    pub tor: String,
    /// Power distribution unit (`r{N}pdu`)
    pub pdu: String,
    /// BMC network name (`r{N}bmc`)
    pub bmc: String,
    /// Server hostname prefix (`r{N}s`)
    pub server: String,
}

impl IdentifierFamily {
    /// Builds the family for rack number `number` (kept as written, leading zeros included).
    pub fn for_number(number: &str) -> Self {
        Self {
            mtor: format!("r{number}-mtor"),
            tor: format!("r{number}-tor"),
            pdu: format!("r{number}pdu"),
            bmc: format!("r{number}bmc"),
            server: format!("r{number}s"),
        }
    }
}

/// Result of parsing a rack name: the plain `rk<N>` token and its family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackDerivation {
    /// First `rk<digits>` substring of the rack name
    pub plain_rack: String,
    /// Names derived from the digits of `plain_rack`
    pub family: IdentifierFamily,
}

/// Parses `rack` and derives the primary identifier family.
///
/// Returns `None` when the rack name contains no `rk<digits>` token. Pure and
/// idempotent: the same input always yields the same result.
pub fn derive(rack: &str) -> Option<RackDerivation> {
    let captures = RACK_TOKEN.captures(rack)?;
    let plain_rack = captures.get(0)?.as_str().to_string();
    let number = captures.get(1)?.as_str();

    Some(RackDerivation {
        plain_rack,
        family: IdentifierFamily::for_number(number),
    })
}

/// Derives the alternate family from the first `sr<digits>` token, using that
/// token's own number.
pub fn derive_alternate(rack: &str) -> Option<IdentifierFamily> {
    SR_TOKEN
        .captures(rack)
        .and_then(|captures| captures.get(1))
        .map(|number| IdentifierFamily::for_number(number.as_str()))
}

/// The full identifier set substituted into procedure text.
///
/// `sys`, `rack` and `mtm` are raw operator input; everything else is derived
/// from `rack` and stays `None` until a rack name with an `rk<N>` token is
/// confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierSet {
    /// Ticket / system reference
    pub sys: String,
    /// Full rack name as entered
    pub rack: String,
    /// `rk<N>` token extracted from `rack`
    pub plain_rack: Option<String>,
    /// Machine type/model of the servers in the rack
    pub mtm: String,
    /// Management top-of-rack switch
    pub mtor: Option<String>,
    /// Data top-of-rack switch
    pub tor: Option<String>,
    /// Power distribution unit
    pub pdu: Option<String>,
    /// BMC network name
    pub bmc: Option<String>,
    /// Server hostname prefix
    pub server: Option<String>,
}

impl IdentifierSet {
    /// Placeholder names understood by the template renderer, in display order.
    pub const PLACEHOLDERS: [&'static str; 9] = [
        "sys",
        "rack",
        "plain_rack",
        "mtm",
        "mtor",
        "tor",
        "pdu",
        "bmc",
        "server",
    ];

    /// Stores raw input and re-derives dependents from `rack`.
    ///
    /// Returns `false` when `rack` has no `rk<N>` token; in that case the
    /// previously derived names are left as they were.
    pub fn apply_input(&mut self, sys: &str, rack: &str, mtm: &str) -> bool {
        self.sys = sys.to_string();
        self.rack = rack.to_string();
        self.mtm = mtm.to_string();

        match derive(rack) {
            Some(derivation) => {
                self.apply_derivation(derivation);
                true
            }
            None => false,
        }
    }

    fn apply_derivation(&mut self, derivation: RackDerivation) {
        let RackDerivation { plain_rack, family } = derivation;
        self.plain_rack = Some(plain_rack);
        self.mtor = Some(family.mtor);
        self.tor = Some(family.tor);
        self.pdu = Some(family.pdu);
        self.bmc = Some(family.bmc);
        self.server = Some(family.server);
    }

    /// Looks up a placeholder by name.
    ///
    /// Returns `None` for names that are not placeholders at all and
    /// `Some("")` for known placeholders without a current value.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        let value = match name {
            "sys" => self.sys.as_str(),
            "rack" => self.rack.as_str(),
            "mtm" => self.mtm.as_str(),
            "plain_rack" => self.plain_rack.as_deref().unwrap_or_default(),
            "mtor" => self.mtor.as_deref().unwrap_or_default(),
            "tor" => self.tor.as_deref().unwrap_or_default(),
            "pdu" => self.pdu.as_deref().unwrap_or_default(),
            "bmc" => self.bmc.as_deref().unwrap_or_default(),
            "server" => self.server.as_deref().unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }

    /// True once a rack name with an `rk<N>` token has been confirmed.
    pub fn is_derived(&self) -> bool {
        self.plain_rack.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_from_plain_token() {
        let derivation = derive("rk5").unwrap();
        assert_eq!(derivation.plain_rack, "rk5");
        assert_eq!(derivation.family.mtor, "r5-mtor");
        assert_eq!(derivation.family.tor, "r5-tor");
        assert_eq!(derivation.family.pdu, "r5pdu");
        assert_eq!(derivation.family.bmc, "r5bmc");
        assert_eq!(derivation.family.server, "r5s");
    }

    #[test]
    fn test_derive_from_full_rack_name() {
        let derivation = derive("fra2-hall3-rk117-a").unwrap();
        assert_eq!(derivation.plain_rack, "rk117");
        assert_eq!(derivation.family.server, "r117s");
    }

    #[test]
    fn test_derive_uses_first_token() {
        let derivation = derive("rk12-rk34").unwrap();
        assert_eq!(derivation.plain_rack, "rk12");
        assert_eq!(derivation.family.pdu, "r12pdu");
    }

    #[test]
    fn test_derive_keeps_leading_zeros() {
        let derivation = derive("rk007").unwrap();
        assert_eq!(derivation.family.bmc, "r007bmc");
    }

    #[test]
    fn test_derive_is_case_sensitive() {
        assert!(derive("RK5").is_none());
        assert!(derive("rk").is_none());
        assert!(derive("rack-5").is_none());
    }

    #[test]
    fn test_derive_is_idempotent() {
        assert_eq!(derive("dc1-rk9"), derive("dc1-rk9"));
    }

    #[test]
    fn test_alternate_family_uses_own_number() {
        let family = derive_alternate("rk5-sr12").unwrap();
        assert_eq!(family.mtor, "r12-mtor");
        assert_eq!(family.server, "r12s");
        assert!(derive_alternate("rk5").is_none());
    }

    #[test]
    fn test_apply_input_unmatched_keeps_previous() {
        let mut ids = IdentifierSet::default();
        assert!(ids.apply_input("SYS-1", "dc1-rk4", "7X06"));
        assert!(!ids.apply_input("SYS-2", "unknown", "7X21"));

        assert_eq!(ids.sys, "SYS-2");
        assert_eq!(ids.rack, "unknown");
        assert_eq!(ids.mtm, "7X21");
        assert_eq!(ids.plain_rack.as_deref(), Some("rk4"));
        assert_eq!(ids.tor.as_deref(), Some("r4-tor"));
    }

    #[test]
    fn test_unmatched_from_blank_leaves_dependents_unset() {
        let mut ids = IdentifierSet::default();
        assert!(!ids.apply_input("SYS-1", "lab", ""));
        assert!(!ids.is_derived());
        assert_eq!(ids.mtor, None);
    }

    #[test]
    fn test_lookup() {
        let mut ids = IdentifierSet::default();
        assert_eq!(ids.lookup("mtor"), Some(""));
        assert_eq!(ids.lookup("nope"), None);

        ids.apply_input("S", "rk3", "M");
        assert_eq!(ids.lookup("plain_rack"), Some("rk3"));
        assert_eq!(ids.lookup("mtm"), Some("M"));
        for name in IdentifierSet::PLACEHOLDERS {
            assert!(ids.lookup(name).is_some(), "{name} should be a placeholder");
        }
    }
}
