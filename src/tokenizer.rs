use std::fmt;

/// Upper bound on words kept from one line.
///
/// Mirrors a 64-slot argument vector with one slot reserved for the
/// terminator. Words past the bound are dropped silently; this is a resource
/// bound, not an error.
pub const MAX_TOKENS: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
}

impl Token {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn is_separator(ch: char) -> bool {
    ch == ' ' || ch == '\n'
}

/// Split a line into words on runs of spaces and newlines.
///
/// No quoting, escaping or substitution. Tabs are ordinary word characters.
pub fn tokenize(line: &str) -> Vec<Token> {
    line.split(is_separator)
        .filter(|s| !s.is_empty())
        .take(MAX_TOKENS)
        .map(|s| Token {
            text: s.to_string(),
        })
        .collect()
}
