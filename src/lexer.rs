//! Lexical analysis of a single input line into argument strings.

use thiserror::Error;

/// Errors that can occur while splitting a line into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A quote was opened and the same quote character never appeared again.
    #[error("unterminated {quote} quote starting at column {}", .offset + 1)]
    UnterminatedQuote {
        /// The quote character that opened the span, `'` or `"`.
        quote: char,
        /// Character index of the opening quote.
        offset: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Start,
    ReadingWord,
    ReadingQuote { quote: char, opened_at: usize },
}

struct LexingFSM {
    input: Vec<char>,
    pos: usize,
    state: LexingState,
    buffer: String,
}

impl LexingFSM {
    fn new(line: &str) -> Self {
        LexingFSM {
            input: line.chars().collect(),
            pos: 0,
            state: LexingState::Start,
            buffer: String::new(),
        }
    }

    /// Runs the machine over the whole input.
    ///
    /// A word is emitted whenever whitespace ends it outside of a quote, and once more
    /// at the end of input if one is still being read. Being in the `ReadingWord`
    /// state is what makes a word exist, so `''` produces an empty token.
    fn make_tokens(mut self) -> Result<Vec<String>, ParseError> {
        let mut out = Vec::new();

        while let Some(ch) = self.read_char() {
            match self.state {
                LexingState::Start => self.handle_start(ch),
                LexingState::ReadingWord => self.handle_word(ch, &mut out),
                LexingState::ReadingQuote { quote, .. } => self.handle_quote(ch, quote),
            }
        }

        match self.state {
            LexingState::ReadingQuote { quote, opened_at } => Err(ParseError::UnterminatedQuote {
                quote,
                offset: opened_at,
            }),
            LexingState::ReadingWord => {
                out.push(self.buffer);
                Ok(out)
            }
            LexingState::Start => Ok(out),
        }
    }

    fn read_char(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn open_quote(&mut self, quote: char) {
        self.state = LexingState::ReadingQuote {
            quote,
            opened_at: self.pos - 1,
        };
    }

    fn handle_start(&mut self, ch: char) {
        match ch {
            c if is_separator(c) => {}
            '\'' | '"' => self.open_quote(ch),
            c => {
                self.buffer.push(c);
                self.state = LexingState::ReadingWord;
            }
        }
    }

    fn handle_word(&mut self, ch: char, out: &mut Vec<String>) {
        match ch {
            c if is_separator(c) => {
                out.push(std::mem::take(&mut self.buffer));
                self.state = LexingState::Start;
            }
            '\'' | '"' => self.open_quote(ch),
            c => self.buffer.push(c),
        }
    }

    fn handle_quote(&mut self, ch: char, quote: char) {
        if ch == quote {
            self.state = LexingState::ReadingWord;
        } else {
            self.buffer.push(ch);
        }
    }
}

fn is_separator(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Splits `line` into its arguments, in order.
///
/// Words are separated by spaces and tabs. A `'` or `"` starts a quoted span that runs
/// to the next occurrence of the same character; the span is glued to whatever word it
/// touches and the quote marks are dropped, so `ab'c d'ef` is the single token
/// `abc def`. An empty or blank line gives an empty vector.
///
/// # Errors
/// [`ParseError::UnterminatedQuote`] if a quote is never closed. Nothing is returned
/// for the rest of the line in that case.
pub fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    LexingFSM::new(line).make_tokens()
}
