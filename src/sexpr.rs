/// S-expression lexer and parser for MeTTa surface syntax
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    Symbol(String),
    /// `$name`, stored without the `$`
    Variable(String),
    String(String),
    Integer(i64),
    Float(f64),
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Symbol(s) => write!(f, "{}", s),
            Token::Variable(s) => write!(f, "${}", s),
            Token::String(s) => write!(f, "\"{}\"", s),
            Token::Integer(i) => write!(f, "{}", i),
            Token::Float(fl) => write!(f, "{:?}", fl),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// A token together with the position it started at (1-based)
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

/// Malformed surface syntax
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

const UNTERMINATED_STRING: &str = "Unterminated string literal";

impl ParseError {
    fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        ParseError {
            message: message.into(),
            line,
            column,
        }
    }

    /// Whether the input ended inside a string literal
    pub fn is_unterminated_string(&self) -> bool {
        self.message == UNTERMINATED_STRING
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Number literals: optional minus, digits, optional fraction
fn number_regex() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("valid number regex"))
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '(' | ')' | '"' | ';')
}

/// Hand-written lexer for MeTTa
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.current() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == ';' {
                while let Some(c) = self.advance() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn read_string(&mut self) -> Result<String, ParseError> {
        let (line, column) = (self.line, self.column);
        let mut result = String::new();
        self.advance(); // consume opening quote

        while let Some(ch) = self.advance() {
            match ch {
                '"' => return Ok(result),
                '\\' => match self.advance() {
                    Some('n') => result.push('\n'),
                    Some('t') => result.push('\t'),
                    Some('r') => result.push('\r'),
                    Some(c) => result.push(c),
                    None => break,
                },
                c => result.push(c),
            }
        }
        Err(ParseError::new(UNTERMINATED_STRING, line, column))
    }

    /// Maximal run of non-delimiter characters
    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current() {
            if is_delimiter(ch) {
                break;
            }
            result.push(ch);
            self.advance();
        }
        result
    }

    fn number_token(word: &str, line: usize, column: usize) -> Result<Token, ParseError> {
        if !number_regex().is_match(word) {
            return Err(ParseError::new(
                format!("Invalid number literal '{}'", word),
                line,
                column,
            ));
        }
        if word.contains('.') {
            word.parse::<f64>()
                .map(Token::Float)
                .map_err(|e| ParseError::new(format!("Invalid float '{}': {}", word, e), line, column))
        } else {
            word.parse::<i64>().map(Token::Integer).map_err(|e| {
                ParseError::new(format!("Invalid integer '{}': {}", word, e), line, column)
            })
        }
    }

    pub fn next_token(&mut self) -> Result<Spanned, ParseError> {
        self.skip_whitespace_and_comments();
        let (line, column) = (self.line, self.column);
        let spanned = |token| Spanned {
            token,
            line,
            column,
        };

        let ch = match self.current() {
            None => return Ok(spanned(Token::Eof)),
            Some(ch) => ch,
        };

        match ch {
            '(' => {
                self.advance();
                Ok(spanned(Token::LParen))
            }
            ')' => {
                self.advance();
                Ok(spanned(Token::RParen))
            }
            '"' => Ok(spanned(Token::String(self.read_string()?))),
            '$' => {
                self.advance();
                let name = self.read_word();
                if name.is_empty() {
                    return Err(ParseError::new("Expected variable name after '$'", line, column));
                }
                Ok(spanned(Token::Variable(name)))
            }
            c if c.is_control() => Err(ParseError::new(
                format!("Unexpected character {:?}", c),
                line,
                column,
            )),
            c => {
                let starts_number = c.is_ascii_digit()
                    || (c == '-' && self.peek(1).is_some_and(|n| n.is_ascii_digit()));
                let word = self.read_word();
                if starts_number {
                    Ok(spanned(Self::number_token(&word, line, column)?))
                } else {
                    Ok(spanned(Token::Symbol(word)))
                }
            }
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Spanned>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_token()?;
            let done = spanned.token == Token::Eof;
            tokens.push(spanned);
            if done {
                break;
            }
        }
        Ok(tokens)
    }
}

/// Parsed s-expression, before conversion into atoms
#[derive(Debug, Clone, PartialEq)]
pub enum SExpr {
    Symbol(String),
    Variable(String),
    String(String),
    Integer(i64),
    Float(f64),
    List(Vec<SExpr>),
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SExpr::Symbol(s) => write!(f, "{}", s),
            SExpr::Variable(s) => write!(f, "${}", s),
            SExpr::String(s) => write!(f, "\"{}\"", s),
            SExpr::Integer(i) => write!(f, "{}", i),
            SExpr::Float(fl) => write!(f, "{:?}", fl),
            SExpr::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Deepest expression nesting the parser accepts
pub const MAX_NESTING: usize = 1024;

/// Hand-written recursive descent parser over lexer tokens
pub struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Spanned>) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn current(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn at_eof(&self) -> bool {
        self.current().map_or(true, |s| s.token == Token::Eof)
    }

    pub fn parse_sexpr(&mut self) -> Result<SExpr, ParseError> {
        let spanned = match self.current() {
            Some(s) => s.clone(),
            None => return Err(ParseError::new("Unexpected end of input", 0, 0)),
        };
        self.advance();

        match spanned.token {
            Token::LParen => {
                if self.depth >= MAX_NESTING {
                    return Err(ParseError::new(
                        format!("Expression nested deeper than {} levels", MAX_NESTING),
                        spanned.line,
                        spanned.column,
                    ));
                }
                self.depth += 1;
                let list = self.parse_list_items(&spanned);
                self.depth -= 1;
                list
            }
            Token::RParen => Err(ParseError::new(
                "Unmatched ')'",
                spanned.line,
                spanned.column,
            )),
            Token::Symbol(s) => Ok(SExpr::Symbol(s)),
            Token::Variable(s) => Ok(SExpr::Variable(s)),
            Token::String(s) => Ok(SExpr::String(s)),
            Token::Integer(i) => Ok(SExpr::Integer(i)),
            Token::Float(f) => Ok(SExpr::Float(f)),
            Token::Eof => Err(ParseError::new(
                "Unexpected end of input",
                spanned.line,
                spanned.column,
            )),
        }
    }

    /// Items of a list whose `(` is `open`, through the matching `)`
    fn parse_list_items(&mut self, open: &Spanned) -> Result<SExpr, ParseError> {
        let mut items = Vec::new();
        loop {
            match self.current().map(|s| &s.token) {
                Some(Token::RParen) => {
                    self.advance();
                    return Ok(SExpr::List(items));
                }
                Some(Token::Eof) | None => {
                    return Err(ParseError::new(
                        "Unmatched '(': expected ')' before end of input",
                        open.line,
                        open.column,
                    ))
                }
                _ => items.push(self.parse_sexpr()?),
            }
        }
    }

    /// Parse every top-level s-expression
    pub fn parse(&mut self) -> Result<Vec<SExpr>, ParseError> {
        let mut exprs = Vec::new();
        while !self.at_eof() {
            exprs.push(self.parse_sexpr()?);
        }
        Ok(exprs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn test_lexer_basic() {
        assert_eq!(
            tokens("(foo $x 42)"),
            vec![
                Token::LParen,
                Token::Symbol("foo".to_string()),
                Token::Variable("x".to_string()),
                Token::Integer(42),
                Token::RParen,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_operator_symbols() {
        assert_eq!(
            tokens("+ - * / == <= >= let* nil? &self"),
            vec![
                Token::Symbol("+".to_string()),
                Token::Symbol("-".to_string()),
                Token::Symbol("*".to_string()),
                Token::Symbol("/".to_string()),
                Token::Symbol("==".to_string()),
                Token::Symbol("<=".to_string()),
                Token::Symbol(">=".to_string()),
                Token::Symbol("let*".to_string()),
                Token::Symbol("nil?".to_string()),
                Token::Symbol("&self".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_numbers() {
        assert_eq!(
            tokens("0 -7 3.25 -0.5"),
            vec![
                Token::Integer(0),
                Token::Integer(-7),
                Token::Float(3.25),
                Token::Float(-0.5),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_minus_symbol_prefix() {
        assert_eq!(
            tokens("-foo"),
            vec![Token::Symbol("-foo".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_lexer_invalid_numbers() {
        assert!(Lexer::new("1.2.3").tokenize().is_err());
        assert!(Lexer::new("12abc").tokenize().is_err());
        assert!(Lexer::new("1.").tokenize().is_err());
        assert!(Lexer::new("99999999999999999999").tokenize().is_err());
    }

    #[test]
    fn test_lexer_string_escapes() {
        assert_eq!(
            tokens(r#""a\nb\t\"q\" \\""#),
            vec![Token::String("a\nb\t\"q\" \\".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_lexer_string_unclosed() {
        let err = Lexer::new("\"abc").tokenize().unwrap_err();
        assert!(err.message.contains("Unterminated"));
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn test_lexer_comments() {
        assert_eq!(
            tokens("; leading comment\nfoo ; trailing\n; done"),
            vec![Token::Symbol("foo".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_lexer_bare_dollar() {
        assert!(Lexer::new("($ x)").tokenize().is_err());
    }

    #[test]
    fn test_lexer_control_character() {
        let err = Lexer::new("foo \u{7}").tokenize().unwrap_err();
        assert!(err.message.contains("Unexpected character"));
    }

    #[test]
    fn test_lexer_positions() {
        let spanned = Lexer::new("a\n  (b)").tokenize().unwrap();
        assert_eq!((spanned[1].line, spanned[1].column), (2, 3));
    }

    #[test]
    fn test_parser_nested() {
        let toks = Lexer::new("(a (b c) ())").tokenize().unwrap();
        let exprs = Parser::new(toks).parse().unwrap();
        assert_eq!(exprs.len(), 1);
        assert_eq!(exprs[0].to_string(), "(a (b c) ())");
    }

    #[test]
    fn test_parser_unmatched_parens() {
        let toks = Lexer::new("(a (b)").tokenize().unwrap();
        assert!(Parser::new(toks).parse().is_err());

        let toks = Lexer::new("a)").tokenize().unwrap();
        let err = Parser::new(toks).parse().unwrap_err();
        assert!(err.message.contains("Unmatched ')'"));
    }

    #[test]
    fn test_parser_nesting_limit() {
        let nested = |depth: usize| format!("{}x{}", "(".repeat(depth), ")".repeat(depth));

        let toks = Lexer::new(&nested(MAX_NESTING)).tokenize().unwrap();
        assert_eq!(Parser::new(toks).parse().unwrap().len(), 1);

        let toks = Lexer::new(&nested(MAX_NESTING + 1)).tokenize().unwrap();
        let err = Parser::new(toks).parse().unwrap_err();
        assert!(err.message.contains("nested deeper"));
        assert_eq!((err.line, err.column), (1, MAX_NESTING + 1));

        let toks = Lexer::new(&"(".repeat(100_000)).tokenize().unwrap();
        assert!(Parser::new(toks).parse().is_err());
    }

    #[test]
    fn test_parser_empty_input() {
        let toks = Lexer::new("  ; nothing here").tokenize().unwrap();
        assert!(Parser::new(toks).parse().unwrap().is_empty());
    }
}
