//! Storage key derivation.
//!
//! `https://example.com/health` → `example_com_health.txt`
//!
//! The key is built from the target exactly as configured: the authority
//! (host and any port, userinfo removed) with dots turned into underscores,
//! followed by the percent-decoded path with slashes turned into
//! underscores. Query and fragment are ignored. Case and explicit default
//! ports are preserved, so `https://example.com/` maps to `example_com_.txt`.

use std::fmt;

use percent_encoding::percent_decode_str;

const SUFFIX: &str = ".txt";

/// Object name under which a target's status is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey(String);

impl StateKey {
    pub fn for_target(target: &str) -> Self {
        let rest = target.split_once("://").map_or(target, |(_, rest)| rest);
        let (authority, tail) = rest.split_at(rest.find(['/', '?', '#']).unwrap_or(rest.len()));
        let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

        let raw_path = &tail[..tail.find(['?', '#']).unwrap_or(tail.len())];
        let path = percent_decode_str(raw_path).decode_utf8_lossy();

        Self(format!(
            "{}{}{SUFFIX}",
            host.replace('.', "_"),
            path.replace('/', "_")
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
