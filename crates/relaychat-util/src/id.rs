//! ULID-based identifier generation with prefixes.
//!
//! Identifiers follow the pattern `prefix_ulid`, e.g. `msg_01hqxyz...` for
//! messages created locally.

use ulid::Ulid;

/// Known identifier prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPrefix {
    Session,
    Message,
}

impl IdPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdPrefix::Session => "ses",
            IdPrefix::Message => "msg",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ses" => Some(IdPrefix::Session),
            "msg" => Some(IdPrefix::Message),
            _ => None,
        }
    }
}

/// Generate a new ascending identifier (newer = larger).
pub fn ascending(prefix: IdPrefix) -> String {
    format!(
        "{}_{}",
        prefix.as_str(),
        Ulid::new().to_string().to_lowercase()
    )
}

/// Split an identifier into its prefix and ULID.
pub fn parse(id: &str) -> Option<(IdPrefix, Ulid)> {
    let (prefix, ulid) = id.split_once('_')?;
    Some((IdPrefix::parse(prefix)?, Ulid::from_string(ulid).ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascending_has_prefix() {
        let id = ascending(IdPrefix::Message);
        assert!(id.starts_with("msg_"));
        assert_eq!(id.len(), 4 + 26);
    }

    #[test]
    fn test_parse_round_trip() {
        let id = ascending(IdPrefix::Session);
        let (prefix, _) = parse(&id).unwrap();
        assert_eq!(prefix, IdPrefix::Session);
    }

    #[test]
    fn test_parse_rejects_unknown_prefix() {
        assert!(parse("xyz_01hqxyz").is_none());
        assert!(parse("no-separator").is_none());
    }
}
