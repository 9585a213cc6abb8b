use crate::config::Config;
use crate::lexer::{Lexer, Token};

/// Outcome of spell checking one text.
#[derive(Debug, Default)]
pub struct Report {
    pub misspelled: Vec<Token>,
    pub words_checked: usize,
}

pub struct Pipeline {
    min_word_length: usize,
}

impl Pipeline {
    pub fn new(config: &Config) -> Pipeline {
        Pipeline {
            min_word_length: config.min_word_length,
        }
    }

    /// Checks every token long enough to matter against `is_known`, keeping
    /// the unknown ones in text order.
    pub fn run(&self, lexer: Lexer, is_known: impl Fn(&str) -> bool) -> Report {
        lexer
            .into_iter()
            .filter(|v| v.lexeme.len() >= self.min_word_length)
            .fold(Report::default(), |mut report, token| {
                report.words_checked += 1;
                if !is_known(&token.lexeme) {
                    report.misspelled.push(token);
                }
                report
            })
    }
}
