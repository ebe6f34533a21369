//! Token model: mechanical classification of argv.
//!
//! Every element after the command token is either a positional or an
//! option token (leading `-`). Option tokens split on the first `=` into
//! flag and inline value. Whether a flag claims the following token as its
//! value depends on the declared option set, so lexing takes the merged
//! specs of the resolved command as input.

use crate::spec::{OptionSpec, ValueKind};

/// One classified argv element.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// Bare value, candidate for argument binding.
    Positional(String),
    /// Dashed token. `value` is the inline part when written `--flag=v`,
    /// or the claimed follower for declared value-taking options.
    Option {
        flag: String,
        value: Option<String>,
    },
}

/// Classified argv in original order. Followers claimed as option values
/// are folded into their option token and never appear as positionals.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Lex the argv remainder against a command's merged option set.
    ///
    /// A declared non-boolean option without an inline value claims the
    /// next token as its value, unless that token starts with `-`.
    /// Boolean and undeclared flags never claim a follower.
    pub(crate) fn lex(argv: &[String], options: &[OptionSpec]) -> Self {
        let mut tokens = Vec::with_capacity(argv.len());
        let mut i = 0;
        while i < argv.len() {
            let raw = argv[i].as_str();
            if raw.starts_with('-') {
                let (flag, inline) = split_inline(raw);
                let takes_value = options
                    .iter()
                    .find(|o| o.matches(flag))
                    .is_some_and(|o| o.kind != ValueKind::Bool);
                let mut value = inline.map(str::to_string);
                if value.is_none() && takes_value {
                    if let Some(next) = argv.get(i + 1) {
                        if !next.starts_with('-') {
                            value = Some(next.clone());
                            i += 1;
                        }
                    }
                }
                tokens.push(Token::Option {
                    flag: flag.to_string(),
                    value,
                });
            } else {
                tokens.push(Token::Positional(raw.to_string()));
            }
            i += 1;
        }
        TokenStream { tokens }
    }

    /// Positional tokens in argv order.
    pub(crate) fn positionals(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|t| match t {
            Token::Positional(value) => Some(value.as_str()),
            Token::Option { .. } => None,
        })
    }

    /// Option tokens in argv order, as `(flag, value)` pairs.
    pub(crate) fn option_tokens(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.tokens.iter().filter_map(|t| match t {
            Token::Option { flag, value } => Some((flag.as_str(), value.as_deref())),
            Token::Positional(_) => None,
        })
    }

    /// First occurrence of the given token form, if any.
    pub(crate) fn find_flag(&self, form: &str) -> Option<FlagUse<'_>> {
        self.option_tokens()
            .find(|(flag, _)| *flag == form)
            .map(|(_, value)| FlagUse { value })
    }
}

/// A matched option token. `value` is inline or claimed-follower text.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FlagUse<'a> {
    pub(crate) value: Option<&'a str>,
}

/// Split an option token on its first `=`.
fn split_inline(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('=') {
        Some((flag, inline)) => (flag, Some(inline)),
        None => (raw, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::OptionSpec;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_inline_on_first_equals() {
        assert_eq!(split_inline("--env=prod"), ("--env", Some("prod")));
        assert_eq!(split_inline("--env=a=b"), ("--env", Some("a=b")));
        assert_eq!(split_inline("--env="), ("--env", Some("")));
        assert_eq!(split_inline("--env"), ("--env", None));
    }

    #[test]
    fn declared_string_option_claims_follower() {
        let opts = vec![OptionSpec::new("env", "--env")];
        let stream = TokenStream::lex(&argv(&["--env", "prod", "rest"]), &opts);
        assert_eq!(
            stream.find_flag("--env").and_then(|u| u.value),
            Some("prod")
        );
        assert_eq!(stream.positionals().collect::<Vec<_>>(), vec!["rest"]);
    }

    #[test]
    fn boolean_option_never_claims_follower() {
        let opts = vec![OptionSpec::boolean("force", "--force")];
        let stream = TokenStream::lex(&argv(&["--force", "prod"]), &opts);
        assert_eq!(stream.find_flag("--force").and_then(|u| u.value), None);
        assert_eq!(stream.positionals().collect::<Vec<_>>(), vec!["prod"]);
    }

    #[test]
    fn undeclared_flag_never_claims_follower() {
        let stream = TokenStream::lex(&argv(&["--tag", "v1"]), &[]);
        assert_eq!(stream.find_flag("--tag").and_then(|u| u.value), None);
        assert_eq!(stream.positionals().collect::<Vec<_>>(), vec!["v1"]);
    }

    #[test]
    fn dashed_follower_is_not_claimed() {
        let opts = vec![
            OptionSpec::new("env", "--env"),
            OptionSpec::boolean("force", "--force"),
        ];
        let stream = TokenStream::lex(&argv(&["--env", "--force"]), &opts);
        assert_eq!(stream.find_flag("--env").and_then(|u| u.value), None);
        assert!(stream.find_flag("--force").is_some());
    }

    #[test]
    fn inline_value_wins_over_follower() {
        let opts = vec![OptionSpec::new("env", "--env")];
        let stream = TokenStream::lex(&argv(&["--env=prod", "staging"]), &opts);
        assert_eq!(
            stream.find_flag("--env").and_then(|u| u.value),
            Some("prod")
        );
        assert_eq!(stream.positionals().collect::<Vec<_>>(), vec!["staging"]);
    }

    #[test]
    fn alias_forms_claim_like_the_flag() {
        let opts = vec![OptionSpec::new("env", "--env").alias("-e")];
        let stream = TokenStream::lex(&argv(&["-e", "prod"]), &opts);
        assert_eq!(stream.find_flag("-e").and_then(|u| u.value), Some("prod"));
    }

    #[test]
    fn first_occurrence_wins_in_find_flag() {
        let opts = vec![OptionSpec::new("env", "--env")];
        let stream = TokenStream::lex(&argv(&["--env=a", "--env=b"]), &opts);
        assert_eq!(stream.find_flag("--env").and_then(|u| u.value), Some("a"));
    }
}
