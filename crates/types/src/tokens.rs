//! The well-known placeholder tokens and the token → value map.

use indexmap::IndexMap;
use std::fmt;

/// A placeholder token recognized by the template backend.
///
/// The string form of every variant is byte-exact and case-sensitive; tokens a
/// template contains that are not listed here are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    ExecutiveSummary,
    AlertId,
    Title,
    Severity,
    DatetimeUtc,
    ItsmTicket,
    MitreTactic,
    EventSummary,
    User,
    IpAddress,
    Host,
    FileName,
    Sha1Hash,
    FilePath,
    FileSignature,
    SocActionLabel,
    SocActionsTakenLabel,
    SocAssessment,
    SocActionsTaken,
    RecommendedActions,
    FinalObservation,
    References,
    GeneratedDate,
}

impl Token {
    pub const ALL: [Token; 23] = [
        Token::ExecutiveSummary,
        Token::AlertId,
        Token::Title,
        Token::Severity,
        Token::DatetimeUtc,
        Token::ItsmTicket,
        Token::MitreTactic,
        Token::EventSummary,
        Token::User,
        Token::IpAddress,
        Token::Host,
        Token::FileName,
        Token::Sha1Hash,
        Token::FilePath,
        Token::FileSignature,
        Token::SocActionLabel,
        Token::SocActionsTakenLabel,
        Token::SocAssessment,
        Token::SocActionsTaken,
        Token::RecommendedActions,
        Token::FinalObservation,
        Token::References,
        Token::GeneratedDate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Token::ExecutiveSummary => "{{EXECUTIVE_SUMMARY}}",
            Token::AlertId => "{{ALERT_ID}}",
            Token::Title => "{{TITLE}}",
            Token::Severity => "{{SEVERITY}}",
            Token::DatetimeUtc => "{{DATETIME_UTC}}",
            Token::ItsmTicket => "{{ITSM_TICKET}}",
            Token::MitreTactic => "{{MITRE_TACTIC}}",
            Token::EventSummary => "{{EVENT_SUMMARY}}",
            Token::User => "{{USER}}",
            Token::IpAddress => "{{IP_ADDRESS}}",
            Token::Host => "{{HOST}}",
            Token::FileName => "{{FILE_NAME}}",
            Token::Sha1Hash => "{{SHA1_HASH}}",
            Token::FilePath => "{{FILE_PATH}}",
            Token::FileSignature => "{{FILE_SIGNATURE}}",
            Token::SocActionLabel => "{{SOC_ACTION_LABEL}}",
            Token::SocActionsTakenLabel => "{{SOC_ACTIONS_TAKEN_LABEL}}",
            Token::SocAssessment => "{{SOC_ASSESSMENT}}",
            Token::SocActionsTaken => "{{SOC_ACTIONS_TAKEN}}",
            Token::RecommendedActions => "{{RECOMMENDED_ACTIONS}}",
            Token::FinalObservation => "{{FINAL_OBSERVATION}}",
            Token::References => "{{REFERENCES}}",
            Token::GeneratedDate => "{{GENERATED_DATE}}",
        }
    }

    pub fn from_str_exact(s: &str) -> Option<Token> {
        Token::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered token → rendered value map.
///
/// Replacement walks the input once from left to right. At each position the
/// longest token that matches is replaced; replaced values are never scanned
/// again, so a value that happens to contain a token string is emitted
/// verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenMap {
    values: IndexMap<Token, String>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: Token, value: impl Into<String>) -> Option<String> {
        self.values.insert(token, value.into())
    }

    pub fn get(&self, token: Token) -> Option<&str> {
        self.values.get(&token).map(String::as_str)
    }

    pub fn remove(&mut self, token: Token) -> Option<String> {
        self.values.shift_remove(&token)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Token, &str)> {
        self.values.iter().map(|(t, v)| (*t, v.as_str()))
    }

    /// True when `text` contains at least one mapped token.
    pub fn matches(&self, text: &str) -> bool {
        self.values.keys().any(|t| text.contains(t.as_str()))
    }

    /// Replaces every mapped token in `text`. Returns `None` when nothing matched.
    pub fn replace_all(&self, text: &str) -> Option<String> {
        if !self.matches(text) {
            return None;
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let candidate = &rest[open..];
            let hit = self
                .values
                .iter()
                .filter(|(t, _)| candidate.starts_with(t.as_str()))
                .max_by_key(|(t, _)| t.as_str().len());
            match hit {
                Some((token, value)) => {
                    out.push_str(value);
                    rest = &candidate[token.as_str().len()..];
                }
                None => {
                    out.push_str("{{");
                    rest = &candidate[2..];
                }
            }
        }
        out.push_str(rest);
        Some(out)
    }
}

impl FromIterator<(Token, String)> for TokenMap {
    fn from_iter<I: IntoIterator<Item = (Token, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
