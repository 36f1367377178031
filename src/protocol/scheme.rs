//! Scheme dispatch capability table
//!
//! Maps a URI scheme to the protocol types eligible to handle it. Which
//! protocol families are present is decided once at startup by building
//! the table; the dispatch logic itself carries no compiled-in knowledge
//! of optional families.

use super::ProtocolType;

/// How a rule matches a scheme string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeMatcher {
    /// Scheme starts with the given literal (e.g. "rtmp" covers rtmp,
    /// rtmpt, rtmps)
    Prefix(String),
    /// Scheme equals the given literal exactly
    Exact(String),
}

impl SchemeMatcher {
    fn matches(&self, scheme: &str) -> bool {
        match self {
            SchemeMatcher::Prefix(p) => scheme.starts_with(p.as_str()),
            SchemeMatcher::Exact(e) => scheme == e,
        }
    }
}

/// One dispatch rule: a matcher plus candidate types in priority order
#[derive(Debug, Clone)]
pub struct SchemeRule {
    matcher: SchemeMatcher,
    candidates: Vec<ProtocolType>,
}

impl SchemeRule {
    /// Create a rule
    pub fn new(matcher: SchemeMatcher, candidates: Vec<ProtocolType>) -> Self {
        Self {
            matcher,
            candidates,
        }
    }
}

/// Ordered set of scheme dispatch rules
///
/// Rules are evaluated in insertion order and the first matcher that
/// accepts the scheme wins; its candidates are then tried in order
/// against the handler map. An empty table recognizes no scheme at all.
#[derive(Debug, Clone, Default)]
pub struct SchemeTable {
    rules: Vec<SchemeRule>,
}

impl SchemeTable {
    /// Create an empty table (no protocol families enabled)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule
    pub fn rule(mut self, matcher: SchemeMatcher, candidates: Vec<ProtocolType>) -> Self {
        self.rules.push(SchemeRule::new(matcher, candidates));
        self
    }

    /// Enable the RTMP family: any `rtmp*` scheme resolves to the
    /// inbound type first, then the outbound type
    pub fn with_rtmp(self, inbound: ProtocolType, outbound: ProtocolType) -> Self {
        self.rule(
            SchemeMatcher::Prefix("rtmp".into()),
            vec![inbound, outbound],
        )
    }

    /// Enable the RTSP family: the exact `rtsp` scheme resolves to the
    /// given type
    pub fn with_rtsp(self, ty: ProtocolType) -> Self {
        self.rule(SchemeMatcher::Exact("rtsp".into()), vec![ty])
    }

    /// Candidate types for a scheme, in priority order
    ///
    /// Returns the candidates of the first matching rule, or an empty
    /// slice when no rule recognizes the scheme.
    pub fn candidates(&self, scheme: &str) -> &[ProtocolType] {
        self.rules
            .iter()
            .find(|r| r.matcher.matches(scheme))
            .map(|r| r.candidates.as_slice())
            .unwrap_or(&[])
    }

    /// Whether any rule recognizes the scheme
    pub fn recognizes(&self, scheme: &str) -> bool {
        !self.candidates(scheme).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::types;

    fn full_table() -> SchemeTable {
        SchemeTable::new()
            .with_rtmp(types::INBOUND_RTMP, types::OUTBOUND_RTMP)
            .with_rtsp(types::RTSP)
    }

    #[test]
    fn test_rtmp_prefix_covers_variants() {
        let table = full_table();

        for scheme in ["rtmp", "rtmpt", "rtmps", "rtmpte"] {
            assert_eq!(
                table.candidates(scheme),
                &[types::INBOUND_RTMP, types::OUTBOUND_RTMP],
                "scheme {scheme}"
            );
        }
    }

    #[test]
    fn test_rtsp_is_exact() {
        let table = full_table();

        assert_eq!(table.candidates("rtsp"), &[types::RTSP]);
        assert!(table.candidates("rtspu").is_empty());
    }

    #[test]
    fn test_unknown_scheme_has_no_candidates() {
        let table = full_table();

        assert!(table.candidates("http").is_empty());
        assert!(!table.recognizes("file"));
    }

    #[test]
    fn test_empty_table_recognizes_nothing() {
        let table = SchemeTable::new();

        assert!(table.candidates("rtmp").is_empty());
        assert!(table.candidates("rtsp").is_empty());
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // A broader prefix rule inserted first shadows the later exact rule.
        let table = SchemeTable::new()
            .rule(SchemeMatcher::Prefix("rt".into()), vec![types::RTSP])
            .with_rtmp(types::INBOUND_RTMP, types::OUTBOUND_RTMP);

        assert_eq!(table.candidates("rtmp"), &[types::RTSP]);
    }
}
