//! Quote record and the built-in quote set.

use serde::{Deserialize, Serialize};

/// One quote as persisted under `userQuotes` (`{ "text", "author" }`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    /// Free text; may be empty or missing in stored payloads.
    #[serde(default)]
    pub author: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }

    /// Clipboard rendering used by the dashboard copy action.
    pub fn share_text(&self) -> String {
        format!("\"{}\" - {}", self.text, self.author)
    }
}

/// Built-in quote as compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinQuote {
    pub text: &'static str,
    pub author: &'static str,
}

impl From<&BuiltinQuote> for Quote {
    fn from(value: &BuiltinQuote) -> Self {
        Quote::new(value.text, value.author)
    }
}

/// Fixed, ordered quote set shipped with every installation.
pub const BUILTIN_QUOTES: [BuiltinQuote; 8] = [
    BuiltinQuote {
        text: "The only way to do great work is to love what you do.",
        author: "Steve Jobs",
    },
    BuiltinQuote {
        text: "In the middle of every difficulty lies opportunity.",
        author: "Albert Einstein",
    },
    BuiltinQuote {
        text: "It does not matter how slowly you go as long as you do not stop.",
        author: "Confucius",
    },
    BuiltinQuote {
        text: "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        author: "Winston Churchill",
    },
    BuiltinQuote {
        text: "Believe you can and you're halfway there.",
        author: "Theodore Roosevelt",
    },
    BuiltinQuote {
        text: "Act as if what you do makes a difference. It does.",
        author: "William James",
    },
    BuiltinQuote {
        text: "Keep your face always toward the sunshine\u{2014}and shadows will fall behind you.",
        author: "Walt Whitman",
    },
    BuiltinQuote {
        text: "What lies behind us and what lies before us are tiny matters compared to what lies within us.",
        author: "Ralph Waldo Emerson",
    },
];

/// Built-in quotes as owned records, in their fixed order.
pub fn builtin_quotes() -> Vec<Quote> {
    BUILTIN_QUOTES.iter().map(Quote::from).collect()
}

#[cfg(test)]
mod tests {
    use super::{builtin_quotes, Quote, BUILTIN_QUOTES};

    #[test]
    fn builtins_keep_declared_order() {
        let quotes = builtin_quotes();
        assert_eq!(quotes.len(), BUILTIN_QUOTES.len());
        assert_eq!(quotes[0].author, "Steve Jobs");
        assert_eq!(quotes[7].author, "Ralph Waldo Emerson");
    }

    #[test]
    fn serializes_with_external_field_names() {
        let value = serde_json::to_value(Quote::new("Test", "A")).unwrap();
        assert_eq!(value, serde_json::json!({ "text": "Test", "author": "A" }));
    }

    #[test]
    fn share_text_wraps_text_in_quotes() {
        let quote = Quote::new("Stay curious.", "Anon");
        assert_eq!(quote.share_text(), "\"Stay curious.\" - Anon");
    }
}
