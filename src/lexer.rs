/// Longest word the lexer will hand out. Longer runs are skipped.
pub const MAX_WORD_LENGTH: usize = 45;

/// Zero-based line and column. Columns count UTF-16 code units, which is
/// what LSP clients expect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pos(pub u32, pub u32);

impl Pos {
    pub fn start() -> Pos {
        Pos(0, 0)
    }

    pub fn line(&self) -> u32 {
        self.0
    }

    pub fn column(&self) -> u32 {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub start: Pos,
    pub end: Pos,
    pub lexeme: String,
}

/// Splits text into words: an ASCII letter followed by letters, with
/// apostrophes allowed between letters. Runs that contain digits or exceed
/// [`MAX_WORD_LENGTH`] are skipped.
#[derive(Debug)]
pub struct Lexer {
    text: String,
    offset: usize,
    pos: Pos,
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl Lexer {
    pub fn new<T: AsRef<str>>(text: T) -> Lexer {
        Lexer {
            text: text.as_ref().to_string(),
            offset: 0,
            pos: Pos::start(),
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        loop {
            let next_char = self.peek()?;
            match next_char {
                'a'..='z' | 'A'..='Z' => {
                    if let Some(token) = self.word() {
                        return Some(token);
                    }
                }
                '0'..='9' => self.skip_alphanumeric(),
                _ => {
                    self.next()?;
                }
            }
        }
    }

    fn next(&mut self) -> Option<char> {
        let char = self.peek()?;
        self.offset += char.len_utf8();
        if char == '\n' {
            self.pos = Pos(self.pos.line() + 1, 0);
        } else {
            self.pos = Pos(self.pos.line(), self.pos.column() + char.len_utf16() as u32);
        }
        Some(char)
    }

    fn peek(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.text[self.offset..].chars().nth(1)
    }

    fn word(&mut self) -> Option<Token> {
        let start = self.pos;
        let mut lexeme = String::new();

        while let Some(char) = self.peek() {
            match char {
                'a'..='z' | 'A'..='Z' => lexeme.push(char),
                '\'' if self.peek_second().is_some_and(|c| c.is_ascii_alphabetic()) => {
                    lexeme.push(char)
                }
                '0'..='9' => {
                    self.skip_alphanumeric();
                    return None;
                }
                _ => break,
            }
            self.next();
        }

        if lexeme.len() > MAX_WORD_LENGTH {
            return None;
        }

        Some(Token {
            start,
            end: self.pos,
            lexeme,
        })
    }

    fn skip_alphanumeric(&mut self) {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '\'')
        {
            self.next();
        }
    }
}
