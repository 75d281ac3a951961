//! Airport code types and the rules used to validate them.
//!
//! Codes are compared case-insensitively: everything is upper-cased before a
//! rule is applied or a code is embedded in a request.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use super::error::LookupError;

static TC_LID_PATTERN: OnceLock<Regex> = OnceLock::new();
static FAA_LID_PATTERN: OnceLock<Regex> = OnceLock::new();

fn tc_lid_pattern() -> &'static Regex {
    TC_LID_PATTERN.get_or_init(|| Regex::new(r"^C[A-Z0-9]{3}$").expect("static TC LID pattern"))
}

fn faa_lid_pattern() -> &'static Regex {
    FAA_LID_PATTERN
        .get_or_init(|| Regex::new(r"^[A-Z0-9]{3,4}$").expect("static FAA LID pattern"))
}

/// The kind of code a request is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeType {
    Icao,
    Iata,
    Lid,
}

impl CodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeType::Icao => "ICAO",
            CodeType::Iata => "IATA",
            CodeType::Lid => "LID",
        }
    }

    /// Whether `code` could be a code of this type. A LID is accepted under
    /// either authority's rule.
    pub fn accepts(&self, code: &str) -> bool {
        match self {
            CodeType::Icao => CodeRule::Icao.matches(code),
            CodeType::Iata => CodeRule::Iata.matches(code),
            CodeType::Lid => CodeRule::TcLid.matches(code) || CodeRule::FaaLid.matches(code),
        }
    }
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeType {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ICAO" => Ok(CodeType::Icao),
            "IATA" => Ok(CodeType::Iata),
            "LID" => Ok(CodeType::Lid),
            _ => Err(LookupError::invalid("Invalid Code Type!")),
        }
    }
}

/// Length and pattern rule for one family of codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeRule {
    /// Exactly 4 characters
    Icao,
    /// Exactly 3 characters
    Iata,
    /// `C` followed by 3 alphanumerics
    TcLid,
    /// 3 or 4 alphanumerics
    FaaLid,
}

impl CodeRule {
    pub fn matches(&self, code: &str) -> bool {
        let upper = code.to_uppercase();
        // Case folding must not change the length, `ß` becomes `SS`
        if upper.chars().count() != code.chars().count() {
            return false;
        }
        let code = upper;
        match self {
            CodeRule::Icao => code.chars().count() == 4,
            CodeRule::Iata => code.chars().count() == 3,
            CodeRule::TcLid => tc_lid_pattern().is_match(&code),
            CodeRule::FaaLid => faa_lid_pattern().is_match(&code),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            CodeRule::Icao => "ICAO",
            CodeRule::Iata => "IATA",
            CodeRule::TcLid => "TC_LID",
            CodeRule::FaaLid => "FAA_LID",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_uppercase().as_str() {
            "ICAO" => Some(CodeRule::Icao),
            "IATA" => Some(CodeRule::Iata),
            "TC_LID" => Some(CodeRule::TcLid),
            "FAA_LID" => Some(CodeRule::FaaLid),
            _ => None,
        }
    }
}

/// Validates a code against a textual rule tag (`ICAO`, `IATA`, `TC_LID`,
/// `FAA_LID`, any case). An unknown tag is simply not valid; unlike
/// [`CodeType::from_str`] it never produces an error.
pub fn validate_code(tag: &str, code: &str) -> bool {
    CodeRule::from_tag(tag).is_some_and(|rule| rule.matches(code))
}

/// Local authority issuing a location identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Authority {
    Faa,
    Tc,
}

impl Authority {
    pub fn rule(&self) -> CodeRule {
        match self {
            Authority::Faa => CodeRule::FaaLid,
            Authority::Tc => CodeRule::TcLid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Authority::Faa => "FAA",
            Authority::Tc => "TC",
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Authority {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FAA" => Ok(Authority::Faa),
            "TC" => Ok(Authority::Tc),
            _ => Err(LookupError::invalid("Invalid Authority!")),
        }
    }
}
