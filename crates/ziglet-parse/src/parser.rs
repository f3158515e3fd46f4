use std::borrow::Cow;

use drop_bomb::DropBomb;
use text_size::TextRange;
use ziglet_errors::Diagnostic;
use ziglet_syntax::{zig, zon};
use ziglet_tokenizer::Token;
use ziglet_tree::{Builder, Kind, SyntaxSet, SyntaxTree};

/// The kinds a grammar needs to know about beyond the `Kind` contract.
pub(crate) trait Language: Kind {
    const EOF: Self;
    const ERROR: Self;
    const BAD_CHARACTER: Self;

    /// Name of the kind as shown in diagnostics.
    fn describe(self) -> Cow<'static, str>;

    fn delimiter(self) -> Option<Delimiter>;
}

/// Role of a token when skipping over a nested construct.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
    Open,
    Close,
    Separator,
}

/// Grammar functions that recurse may nest this deep before the rest of the
/// construct is skipped.
const MAX_DEPTH: u32 = 256;

fn describe_by_name<K: std::fmt::Debug>(kind: K, text: Option<&'static str>) -> Cow<'static, str> {
    match text {
        Some(text) => Cow::Owned(format!("`{text}`")),
        None => Cow::Owned(format!("{kind:?}").to_lowercase().replace('_', " ")),
    }
}

impl Language for zig::SyntaxKind {
    const EOF: Self = Self::EOF;
    const ERROR: Self = Self::ERROR;
    const BAD_CHARACTER: Self = Self::BAD_CHARACTER;

    fn describe(self) -> Cow<'static, str> {
        match self {
            Self::EOF => Cow::Borrowed("end of file"),
            Self::STRING_LITERAL_SINGLE | Self::STRING_LITERAL_MULTI => {
                Cow::Borrowed("string literal")
            }
            _ => describe_by_name(self, self.text()),
        }
    }

    fn delimiter(self) -> Option<Delimiter> {
        match self {
            Self::LEFT_PAREN | Self::LEFT_BRACKET | Self::LEFT_BRACE => Some(Delimiter::Open),
            Self::RIGHT_PAREN | Self::RIGHT_BRACKET | Self::RIGHT_BRACE => Some(Delimiter::Close),
            Self::COMMA | Self::SEMICOLON => Some(Delimiter::Separator),
            _ => None,
        }
    }
}

impl Language for zon::SyntaxKind {
    const EOF: Self = Self::EOF;
    const ERROR: Self = Self::ERROR;
    const BAD_CHARACTER: Self = Self::BAD_CHARACTER;

    fn describe(self) -> Cow<'static, str> {
        match self {
            Self::EOF => Cow::Borrowed("end of file"),
            Self::STRING_LITERAL_SINGLE | Self::LINE_STRING => Cow::Borrowed("string literal"),
            _ => describe_by_name(self, self.text()),
        }
    }

    fn delimiter(self) -> Option<Delimiter> {
        match self {
            Self::LEFT_BRACE => Some(Delimiter::Open),
            Self::RIGHT_BRACE => Some(Delimiter::Close),
            Self::COMMA => Some(Delimiter::Separator),
            _ => None,
        }
    }
}

/// Recursive-descent driver. Grammar functions inspect upcoming kinds and
/// record events; `build_tree` replays them into a `SyntaxTree`.
pub(crate) struct Parser<'t, K: Language> {
    text: &'t str,
    tokens: Vec<Token<K>>,
    pos: usize,
    depth: u32,
    events: Vec<Event<K>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'t, K: Language> Parser<'t, K> {
    /// `tokens` must end with the `EOF` token.
    pub(crate) fn new(text: &'t str, tokens: Vec<Token<K>>) -> Self {
        debug_assert_eq!(tokens.last().map(|token| token.kind), Some(K::EOF));
        Self { text, tokens, pos: 0, depth: 0, events: Vec::new(), diagnostics: Vec::new() }
    }

    fn token(&self, n: usize) -> &Token<K> {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    /// Index of the current token; grows monotonically.
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn nth_kind(&self, n: usize) -> K {
        self.token(n).kind
    }

    pub(crate) fn peek_kind(&self) -> K {
        self.nth_kind(0)
    }

    pub(crate) fn at(&self, kind: K) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn nth_at(&self, n: usize, kind: K) -> bool {
        self.nth_kind(n) == kind
    }

    pub(crate) fn at_set(&self, set: &SyntaxSet<K>) -> bool {
        set.contains(self.peek_kind())
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.at(K::EOF)
    }

    pub(crate) fn current_text(&self) -> &'t str {
        &self.text[self.token(0).range]
    }

    /// Kind of the last consumed token.
    pub(crate) fn prev_kind(&self) -> Option<K> {
        self.pos.checked_sub(1).map(|pos| self.tokens[pos].kind)
    }

    pub(crate) fn advance(&mut self) {
        if self.at_eof() {
            return;
        }

        self.events.push(Event::Token(self.pos as u32));
        self.pos += 1;
    }

    /// Consumes the final `EOF` token so its leading trivia lands in the tree.
    pub(crate) fn finish_eof(&mut self) {
        debug_assert!(self.at_eof());
        self.events.push(Event::Token(self.pos as u32));
    }

    pub(crate) fn eat(&mut self, kind: K) -> bool {
        if !self.at(kind) {
            return false;
        }
        self.advance();
        true
    }

    pub(crate) fn expect(&mut self, kind: K) -> bool {
        if self.eat(kind) {
            return true;
        }
        let found = self.peek_kind().describe();
        self.error(format!("expected {}, found {found}", kind.describe()));
        false
    }

    /// Enters one level of grammar recursion. Past [`MAX_DEPTH`] the rest of
    /// the nested construct, up to its balanced closing token, is wrapped in
    /// an `ERROR` node and `false` is returned; the caller must not `leave`.
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth < MAX_DEPTH {
            self.depth += 1;
            return true;
        }

        let m = self.start();
        self.error("nesting too deep");
        let mut open = 0usize;
        while !self.at_eof() {
            match self.peek_kind().delimiter() {
                Some(Delimiter::Open) => open += 1,
                Some(Delimiter::Close) if open == 0 => break,
                Some(Delimiter::Close) => open -= 1,
                Some(Delimiter::Separator) if open == 0 => break,
                _ => {}
            }
            self.advance();
        }
        m.complete(self, K::ERROR);
        false
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    /// Reports an error at the current token without consuming it.
    pub(crate) fn error(&mut self, message: impl Into<String>) {
        let range = self.error_range();
        self.diagnostics.push(Diagnostic::error(message, range));
    }

    fn error_range(&self) -> TextRange {
        let token = self.token(0);
        if token.kind == K::EOF { TextRange::empty(token.range.start()) } else { token.range }
    }

    fn error_message(&self, message: &str) -> String {
        if self.at(K::BAD_CHARACTER) {
            format!("unexpected character `{}`", self.current_text())
        } else {
            message.to_string()
        }
    }

    /// Wraps the current token in an `ERROR` node, or leaves an empty `ERROR`
    /// node when the current token belongs to `recovery` or is the end.
    pub(crate) fn err_recover(&mut self, message: &str, recovery: &SyntaxSet<K>) {
        if self.at_set(recovery) || self.at_eof() {
            let m = self.start();
            self.error(message);
            m.complete(self, K::ERROR);
            return;
        }
        self.err_and_bump(message);
    }

    pub(crate) fn err_and_bump(&mut self, message: &str) {
        let m = self.start();
        let message = self.error_message(message);
        self.error(message);
        self.advance();
        m.complete(self, K::ERROR);
    }

    pub(crate) fn build_tree(self) -> (SyntaxTree<K>, Vec<Diagnostic>) {
        let Parser { text, mut tokens, pos: _, depth: _, mut events, diagnostics } = self;
        let mut builder = Builder::new(text);
        let mut forward_parents = Vec::new();

        for i in 0..events.len() {
            match std::mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent } => {
                    if kind == K::TOMBSTONE {
                        continue;
                    }

                    forward_parents.push(kind);
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match std::mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent } => {
                                if kind != K::TOMBSTONE {
                                    forward_parents.push(kind);
                                }
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for kind in forward_parents.drain(..).rev() {
                        builder.start_node(kind);
                    }
                }
                Event::Finish => {
                    builder.finish_node();
                }
                Event::Token(index) => {
                    let token = &mut tokens[index as usize];
                    builder.token(
                        std::mem::take(&mut token.leading),
                        token.kind,
                        token.range.len(),
                        std::mem::take(&mut token.trailing),
                    );
                }
            }
        }

        (builder.finish(), diagnostics)
    }
}

enum Event<K> {
    Start { kind: K, forward_parent: Option<u32> },
    Token(u32),
    Finish,
}

impl<K: Kind> Event<K> {
    const TOMBSTONE: Self = Event::Start { kind: K::TOMBSTONE, forward_parent: None };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Marker {
        Marker {
            position: pos,
            bomb: DropBomb::new("Marker must be completed"),
        }
    }

    pub(crate) fn complete<K: Language>(
        mut self,
        p: &mut Parser<'_, K>,
        kind: K,
    ) -> CompletedMarker<K> {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => {
                *slot = kind;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker::new(self.position, kind)
    }
}

pub(crate) struct CompletedMarker<K> {
    pos: u32,
    kind: K,
}

impl<K: Language> CompletedMarker<K> {
    fn new(pos: u32, kind: K) -> Self {
        CompletedMarker { pos, kind }
    }

    pub(crate) fn kind(&self) -> K {
        self.kind
    }

    pub(crate) fn precede(self, p: &mut Parser<'_, K>) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }
}
