//! Repository search filter parsing

use crate::error::{Error, Result};
use crate::language::Language;
use regex::Regex;
use std::sync::OnceLock;

/// Term used when no repository name is given, so that a search by
/// language or owner alone still matches everything.
pub const WILDCARD_TERM: &str = "*";

/// Validated repository search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text term matched against repository names
    pub term: String,

    /// Restrict to a language
    pub language: Option<Language>,

    /// Restrict to repositories owned by this login
    pub owner: Option<String>,
}

impl SearchQuery {
    /// Build a query from raw, optional request parameters.
    ///
    /// Blank values count as absent. A blank repository name becomes
    /// [`WILDCARD_TERM`]; a name carrying search qualifiers is rejected.
    pub fn parse(
        repo_name: Option<&str>,
        language: Option<&str>,
        user: Option<&str>,
    ) -> Result<Self> {
        let term = non_blank(repo_name).unwrap_or(WILDCARD_TERM);
        // Repository names never contain ':', so one here would be a search qualifier.
        if term.contains(':') {
            return Err(Error::InvalidFilter {
                field: "repoName",
                value: term.to_string(),
            });
        }
        let term = term.to_string();

        let language = non_blank(language).map(str::parse::<Language>).transpose()?;

        let owner = match non_blank(user) {
            Some(login) if is_valid_login(login) => Some(login.to_string()),
            Some(login) => {
                return Err(Error::InvalidFilter {
                    field: "user",
                    value: login.to_string(),
                })
            }
            None => None,
        };

        Ok(Self {
            term,
            language,
            owner,
        })
    }

    /// The `q` parameter for the upstream search endpoint
    pub fn to_query_string(&self) -> String {
        let mut q = self.term.clone();
        if let Some(language) = self.language {
            q.push_str(" language:");
            q.push_str(language.qualifier());
        }
        if let Some(ref owner) = self.owner {
            q.push_str(" user:");
            q.push_str(owner);
        }
        q
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn is_valid_login(login: &str) -> bool {
    static LOGIN: OnceLock<Regex> = OnceLock::new();
    let re = LOGIN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9]|-[A-Za-z0-9])*$").expect("login pattern compiles")
    });
    login.len() <= 39 && re.is_match(login)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_becomes_wildcard() {
        let query = SearchQuery::parse(Some(""), None, Some("alice")).unwrap();
        assert_eq!(query.term, WILDCARD_TERM);
        assert_eq!(query.owner.as_deref(), Some("alice"));
        assert_eq!(query.to_query_string(), "* user:alice");

        let query = SearchQuery::parse(Some("   "), None, None).unwrap();
        assert_eq!(query.term, WILDCARD_TERM);

        let query = SearchQuery::parse(None, None, None).unwrap();
        assert_eq!(query.to_query_string(), "*");
    }

    #[test]
    fn test_all_qualifiers() {
        let query = SearchQuery::parse(Some("tokio"), Some("rust"), Some("tokio-rs")).unwrap();
        assert_eq!(query.language, Some(Language::Rust));
        assert_eq!(query.to_query_string(), "tokio language:rust user:tokio-rs");
    }

    #[test]
    fn test_blank_language_and_user_are_ignored() {
        let query = SearchQuery::parse(Some("cli"), Some(" "), Some("")).unwrap();
        assert_eq!(query.language, None);
        assert_eq!(query.owner, None);
        assert_eq!(query.to_query_string(), "cli");
    }

    #[test]
    fn test_invalid_language() {
        let err = SearchQuery::parse(None, Some("not-a-real-language"), None).unwrap_err();
        assert!(matches!(err, Error::InvalidFilter { field: "language", .. }));
    }

    #[test]
    fn test_qualifiers_in_name_are_rejected() {
        for bad in ["x user:someone", "language:rust", "repo:octocat/hello"] {
            let err = SearchQuery::parse(Some(bad), None, Some("alice")).unwrap_err();
            assert!(
                matches!(err, Error::InvalidFilter { field: "repoName", .. }),
                "{bad}"
            );
        }
        let query = SearchQuery::parse(Some("hello world.rs"), None, None).unwrap();
        assert_eq!(query.to_query_string(), "hello world.rs");
    }

    #[test]
    fn test_invalid_user() {
        for bad in ["-alice", "alice-", "al--ice", "alice bob", "user:evil"] {
            let err = SearchQuery::parse(None, None, Some(bad)).unwrap_err();
            assert!(
                matches!(err, Error::InvalidFilter { field: "user", .. }),
                "{bad}"
            );
        }
        let too_long = "a".repeat(40);
        assert!(SearchQuery::parse(None, None, Some(&too_long)).is_err());
    }
}
