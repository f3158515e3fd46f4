//! Typed nodes of Zon data files.

use std::borrow::Cow;

use rustc_hash::FxHashSet;
use text_size::TextRange;

use super::{AstNode, child, children, string, token};
use crate::zon::{SyntaxKind, SyntaxNode, SyntaxToken};

ast_nodes! {
    File => FILE,
    Struct => STRUCT,
    Array => ARRAY,
    Entry => ENTRY,
    Identifier => IDENT,
    EnumLiteral => ENUM_LITERAL,
    StringLiteral => STRING_LITERAL,
    Char => CHAR,
    Number => NUMBER,
    Error => ERROR,
}

/// Any value position of a Zon document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Value<'a> {
    Struct(Struct<'a>),
    Array(Array<'a>),
    Identifier(Identifier<'a>),
    EnumLiteral(EnumLiteral<'a>),
    StringLiteral(StringLiteral<'a>),
    Char(Char<'a>),
    Number(Number<'a>),
    Error(Error<'a>),
}

impl<'a> Value<'a> {
    pub fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        let value = match AnyNode::cast(syntax)? {
            AnyNode::Struct(it) => Self::Struct(it),
            AnyNode::Array(it) => Self::Array(it),
            AnyNode::Identifier(it) => Self::Identifier(it),
            AnyNode::EnumLiteral(it) => Self::EnumLiteral(it),
            AnyNode::StringLiteral(it) => Self::StringLiteral(it),
            AnyNode::Char(it) => Self::Char(it),
            AnyNode::Number(it) => Self::Number(it),
            AnyNode::Error(it) => Self::Error(it),
            AnyNode::File(_) | AnyNode::Entry(_) => return None,
        };
        Some(value)
    }

    pub fn syntax(self) -> SyntaxNode<'a> {
        match self {
            Self::Struct(it) => it.0,
            Self::Array(it) => it.0,
            Self::Identifier(it) => it.0,
            Self::EnumLiteral(it) => it.0,
            Self::StringLiteral(it) => it.0,
            Self::Char(it) => it.0,
            Self::Number(it) => it.0,
            Self::Error(it) => it.0,
        }
    }
}

impl<'a> File<'a> {
    /// The top-level value.
    pub fn value(self) -> Option<Value<'a>> {
        self.0.children().find_map(Value::cast)
    }
}

impl<'a> Struct<'a> {
    pub fn entries(self) -> impl Iterator<Item = Entry<'a>> + 'a {
        children(self.0)
    }

    /// Decoded names of all fields.
    pub fn keys(self) -> FxHashSet<String> {
        self.entries().filter_map(|entry| entry.key()).map(|key| key.value().into_owned()).collect()
    }

    /// Every entry whose key repeats an earlier one in the same struct.
    pub fn duplicate_keys(self) -> Vec<Entry<'a>> {
        let mut seen = FxHashSet::default();
        let mut duplicates = Vec::new();
        for entry in self.entries() {
            let Some(key) = entry.key() else {
                continue;
            };
            if !seen.insert(key.value()) {
                duplicates.push(entry);
            }
        }
        duplicates
    }

    /// Value of the field named `key`, first occurrence wins.
    pub fn get(self, key: &str) -> Option<Value<'a>> {
        self.entries()
            .find(|entry| entry.key().is_some_and(|name| name.value() == key))
            .and_then(Entry::value)
    }
}

impl<'a> Array<'a> {
    pub fn entries(self) -> impl Iterator<Item = Entry<'a>> + 'a {
        children(self.0)
    }

    pub fn values(self) -> impl Iterator<Item = Value<'a>> + 'a {
        self.entries().filter_map(Entry::value)
    }
}

impl<'a> Entry<'a> {
    /// `.name` of a `.name = value` entry.
    pub fn key(self) -> Option<Identifier<'a>> {
        token(self.0, SyntaxKind::EQ)?;
        child(self.0)
    }

    /// The value after the `=`, or the whole entry when it is positional.
    ///
    /// A missing or malformed value is the `ERROR` node that stands in its
    /// place, so this is `Some(Value::Error(_))` rather than `None`.
    pub fn value(self) -> Option<Value<'a>> {
        let mut values = self.0.children().filter_map(Value::cast);
        match token(self.0, SyntaxKind::EQ) {
            Some(eq) => {
                values.find(|value| value.syntax().text_range().start() >= eq.text_range().end())
            }
            None => values.next(),
        }
    }
}

impl<'a> Identifier<'a> {
    pub fn token(self) -> Option<SyntaxToken<'a>> {
        token(self.0, SyntaxKind::IDENTIFIER)
    }

    pub fn text(self) -> &'a str {
        self.token().map_or("", |token| token.text())
    }

    /// Name with the `@"..."` quoting removed and escapes decoded.
    pub fn value(self) -> Cow<'a, str> {
        string::identifier_value(self.text())
    }
}

impl<'a> EnumLiteral<'a> {
    pub fn name(self) -> Option<Identifier<'a>> {
        child(self.0)
    }
}

impl<'a> StringLiteral<'a> {
    pub fn is_multiline(self) -> bool {
        token(self.0, SyntaxKind::LINE_STRING).is_some()
    }

    /// One range per `\\` line, or the quoted text without its quotes.
    pub fn content_ranges(self) -> Vec<TextRange> {
        if self.is_multiline() {
            return self
                .0
                .children_with_tokens()
                .filter_map(|it| it.into_token())
                .filter(|token| token.kind() == SyntaxKind::LINE_STRING)
                .flat_map(|token| string::multiline_content_ranges(token.text(), token.text_range()))
                .collect();
        }
        token(self.0, SyntaxKind::STRING_LITERAL_SINGLE)
            .map(|token| string::quoted_content_range(token.text(), token.text_range(), '"'))
            .into_iter()
            .collect()
    }

    pub fn content(self) -> String {
        let source = self.0.tree().text();
        let ranges = self.content_ranges();
        if self.is_multiline() {
            string::multiline_content(source, &ranges)
        } else {
            ranges
                .first()
                .map(|&range| super::unescape(&source[range]).into_owned())
                .unwrap_or_default()
        }
    }
}

impl<'a> Char<'a> {
    pub fn value(self) -> Option<char> {
        let token = token(self.0, SyntaxKind::CHAR_LITERAL)?;
        let range = string::quoted_content_range(token.text(), token.text_range(), '\'');
        let value = super::unescape(&self.0.tree().text()[range]);
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }
}

impl<'a> Number<'a> {
    pub fn is_negative(self) -> bool {
        token(self.0, SyntaxKind::MINUS).is_some()
    }

    pub fn is_float(self) -> bool {
        token(self.0, SyntaxKind::FLOAT).is_some()
    }

    /// Literal text without the sign.
    pub fn literal(self) -> Option<SyntaxToken<'a>> {
        token(self.0, SyntaxKind::INTEGER).or_else(|| token(self.0, SyntaxKind::FLOAT))
    }
}

#[cfg(test)]
mod tests {
    use ziglet_tree::{Builder, TriviaPiece};

    use super::*;
    use crate::zon::SyntaxKind::*;

    /// `.{.a=1,.a=2}` built by hand, as the parser would.
    fn duplicate_struct() -> crate::zon::SyntaxTree {
        let mut builder = Builder::new(".{.a=1,.a=2}");
        builder.start_node(FILE);
        builder.start_node(STRUCT);
        builder.token([], DOT, 1.into(), []);
        builder.token([], LEFT_BRACE, 1.into(), []);
        for comma in [true, false] {
            builder.start_node(ENTRY);
            builder.token([], DOT, 1.into(), []);
            builder.start_node(IDENT);
            builder.token([], IDENTIFIER, 1.into(), []);
            builder.finish_node();
            builder.token([], EQ, 1.into(), []);
            builder.start_node(NUMBER);
            builder.token([], INTEGER, 1.into(), []);
            builder.finish_node();
            builder.finish_node();
            if comma {
                builder.token([], COMMA, 1.into(), []);
            }
        }
        builder.token([], RIGHT_BRACE, 1.into(), []);
        builder.finish_node();
        builder.finish_node();
        builder.finish()
    }

    #[test]
    fn duplicate_keys_collapse() {
        let tree = duplicate_struct();
        let Some(Value::Struct(value)) = File::cast(tree.root()).unwrap().value() else {
            panic!("expected a struct");
        };
        assert_eq!(value.entries().count(), 2);
        assert_eq!(value.keys().into_iter().collect::<Vec<_>>(), ["a"]);

        let duplicates = value.duplicate_keys();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].syntax().text(), ".a=2");

        let Some(Value::Number(first)) = value.get("a") else {
            panic!("expected a number");
        };
        assert_eq!(first.syntax().text_range(), TextRange::new(5.into(), 6.into()));
    }

    #[test]
    fn line_string_content() {
        let text = "\\\\a\n\\\\b";
        let ws = TriviaPiece::new(WHITESPACE, 1.into());
        let mut builder = Builder::new(text);
        builder.start_node(FILE);
        builder.start_node(STRING_LITERAL);
        builder.token([], LINE_STRING, 3.into(), [ws]);
        builder.token([], LINE_STRING, 3.into(), []);
        builder.finish_node();
        builder.finish_node();
        let tree = builder.finish();

        let Some(Value::StringLiteral(literal)) = File::cast(tree.root()).unwrap().value() else {
            panic!("expected a string");
        };
        assert!(literal.is_multiline());
        assert_eq!(literal.content(), "a\nb");
    }
}
