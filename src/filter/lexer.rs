//! Filter string tokenizer
//!
//! Splits a filter string on whitespace. Outside quotes, `(` and `)` are
//! tokens of their own. A token may be wrapped in single or double quotes, in
//! which case whitespace, parens and the other quote style are literal
//! content. There is no escape character.

use std::fmt;

use smallvec::SmallVec;

use crate::error::LexError;

/// Token buffer; most filters fit inline
pub type Tokens = SmallVec<[Token; 8]>;

/// A single lexical unit of a filter string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text without quote delimiters
    pub text: String,
    /// Quote character that delimited the token, if any
    pub quote: Option<char>,
    /// Character offset of the token's first character in the input
    pub offset: usize,
}

impl Token {
    /// Create an unquoted token
    pub fn bare(text: impl Into<String>, offset: usize) -> Self {
        Self {
            text: text.into(),
            quote: None,
            offset,
        }
    }

    /// Create a token delimited by `quote`
    pub fn quoted(text: impl Into<String>, quote: char, offset: usize) -> Self {
        Self {
            text: text.into(),
            quote: Some(quote),
            offset,
        }
    }

    pub fn is_quoted(&self) -> bool {
        self.quote.is_some()
    }

    /// True if this is the unquoted symbol `symbol`
    #[inline]
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.quote.is_none() && self.text == symbol
    }

    /// True if this is the unquoted keyword `keyword`, ignoring case
    #[inline]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.quote.is_none() && self.text.eq_ignore_ascii_case(keyword)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quote {
            None => f.write_str(&self.text),
            Some(q) => {
                write!(f, "{}", q)?;
                for c in self.text.chars() {
                    if c == q {
                        write!(f, "\\{}", c)?;
                    } else {
                        write!(f, "{}", c)?;
                    }
                }
                write!(f, "{}", q)
            }
        }
    }
}

#[inline]
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

/// Split a filter string into tokens
pub fn tokenize(input: &str) -> Result<Tokens, LexError> {
    let mut tokens = Tokens::new();
    let mut current: Option<Token> = None;

    // Trailing separator closes a final unquoted token.
    let chars = input.chars().chain(std::iter::once('\n'));

    for (offset, c) in chars.enumerate() {
        // None: nothing open. Some(None): bare token open. Some(Some(q)): quoted.
        let open = current.as_ref().map(|t| t.quote);

        match (c, open) {
            (c, None) if is_separator(c) => {}
            (c, Some(None)) if is_separator(c) => tokens.extend(current.take()),
            ('"' | '\'', None) => current = Some(Token::quoted(String::new(), c, offset)),
            ('"' | '\'', Some(None)) => {
                return Err(LexError::UnexpectedQuote { quote: c, offset })
            }
            ('"' | '\'', Some(Some(q))) if q == c => tokens.extend(current.take()),
            ('(' | ')', None) => tokens.push(Token::bare(c.to_string(), offset)),
            ('(' | ')', Some(None)) => {
                tokens.extend(current.take());
                tokens.push(Token::bare(c.to_string(), offset));
            }
            (_, None) => current = Some(Token::bare(c.to_string(), offset)),
            (_, Some(_)) => {
                if let Some(token) = current.as_mut() {
                    token.text.push(c);
                }
            }
        }
    }

    if let Some(token) = current {
        return Err(LexError::IncompleteToken {
            text: token.text,
            offset: token.offset,
        });
    }

    Ok(tokens)
}
