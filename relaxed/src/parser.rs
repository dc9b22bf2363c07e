//! Recursive descent parser over the raw input string.

use serde_json::{Map, Number, Value};

use crate::{MAX_DEPTH, ParseError};

pub(crate) struct Parser<'a> {
    src: &'a str,
    /// Byte offset of the next unread character.
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self { src, pos: 0, depth: 0 }
    }

    pub(crate) fn parse_document(mut self) -> Result<Value, ParseError> {
        self.skip_trivia()?;
        let value = self.parse_value()?;
        self.skip_trivia()?;
        match self.peek() {
            None => Ok(value),
            Some(c) => Err(self.unexpected(c, self.pos)),
        }
    }

    // =========================================================================
    // CURSOR
    // =========================================================================

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &src[start..self.pos]
    }

    fn location(&self, at: usize) -> (usize, usize) {
        let before = &self.src[..at];
        let line = before.matches('\n').count() + 1;
        let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
        (line, column)
    }

    fn end(&self) -> ParseError {
        let (line, column) = self.location(self.src.len());
        ParseError::UnexpectedEnd { line, column }
    }

    fn unexpected(&self, found: char, at: usize) -> ParseError {
        let (line, column) = self.location(at);
        ParseError::UnexpectedChar { found, line, column }
    }

    fn invalid_number(&self, at: usize) -> ParseError {
        let (line, column) = self.location(at);
        ParseError::InvalidNumber { line, column }
    }

    fn non_finite(&self, at: usize) -> ParseError {
        let (line, column) = self.location(at);
        ParseError::NonFinite { line, column }
    }

    fn invalid_escape(&self, at: usize) -> ParseError {
        let (line, column) = self.location(at);
        ParseError::InvalidEscape { line, column }
    }

    fn expect(&mut self, want: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == want => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(self.unexpected(c, self.pos)),
            None => Err(self.end()),
        }
    }

    /// Skip whitespace, `//` line comments and `/* */` block comments.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(c) if is_whitespace(c) => {
                    self.pos += c.len_utf8();
                }
                Some('/') => match self.peek_nth(1) {
                    Some('/') => {
                        self.pos += 2;
                        self.eat_while(|c| !is_line_terminator(c));
                    }
                    Some('*') => {
                        self.pos += 2;
                        loop {
                            match self.bump() {
                                None => return Err(self.end()),
                                Some('*') if self.peek() == Some('/') => {
                                    self.pos += 1;
                                    break;
                                }
                                Some(_) => {}
                            }
                        }
                    }
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    // =========================================================================
    // VALUES
    // =========================================================================

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.peek() {
            None => Err(self.end()),
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                Ok(Value::String(self.parse_string(quote)?))
            }
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if is_identifier_start(c) => self.parse_literal(),
            Some(c) => Err(self.unexpected(c, self.pos)),
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            let (line, column) = self.location(self.pos);
            return Err(ParseError::TooDeep { line, column });
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some('}') {
                self.pos += 1;
                break;
            }
            let key = self.parse_key()?;
            self.skip_trivia()?;
            self.expect(':')?;
            self.skip_trivia()?;
            let value = self.parse_value()?;
            map.insert(key, value);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {
                    self.pos += 1;
                    break;
                }
                Some(c) => return Err(self.unexpected(c, self.pos)),
                None => return Err(self.end()),
            }
        }
        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(']') {
                self.pos += 1;
                break;
            }
            items.push(self.parse_value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(']') => {
                    self.pos += 1;
                    break;
                }
                Some(c) => return Err(self.unexpected(c, self.pos)),
                None => return Err(self.end()),
            }
        }
        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn parse_key(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                self.parse_string(quote)
            }
            Some(c) if is_identifier_start(c) || c == '\\' => self.parse_identifier(),
            Some(c) => Err(self.unexpected(c, self.pos)),
            None => Err(self.end()),
        }
    }

    /// Unquoted key. `\uXXXX` escapes are allowed but must still decode to
    /// an identifier character.
    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let mut out = String::new();
        loop {
            let at = self.pos;
            let accepts = |c: char, first: bool| if first { is_identifier_start(c) } else { is_identifier_part(c) };
            match self.peek() {
                Some('\\') => {
                    self.pos += 1;
                    if self.bump() != Some('u') {
                        return Err(self.invalid_escape(at));
                    }
                    let code = self.hex_code(4, at)?;
                    let c = self.finish_unicode_escape(code, at)?;
                    if !accepts(c, out.is_empty()) {
                        return Err(self.invalid_escape(at));
                    }
                    out.push(c);
                }
                Some(c) if accepts(c, out.is_empty()) => {
                    self.pos += c.len_utf8();
                    out.push(c);
                }
                _ => return Ok(out),
            }
        }
    }

    fn parse_literal(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        let word = self.eat_while(is_identifier_part);
        match word {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" => Ok(Value::Null),
            "Infinity" | "NaN" => Err(self.non_finite(start)),
            other => {
                let (line, column) = self.location(start);
                Err(ParseError::UnknownLiteral { word: other.to_owned(), line, column })
            }
        }
    }

    // =========================================================================
    // STRINGS
    // =========================================================================

    /// Parse string contents; the opening quote has already been consumed.
    fn parse_string(&mut self, quote: char) -> Result<String, ParseError> {
        let mut out = String::new();
        loop {
            let at = self.pos;
            match self.bump() {
                None => return Err(self.end()),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.parse_escape(at, &mut out)?,
                Some(c @ ('\n' | '\r')) => return Err(self.unexpected(c, at)),
                Some(c) => out.push(c),
            }
        }
    }

    /// `at` is the offset of the backslash.
    fn parse_escape(&mut self, at: usize, out: &mut String) -> Result<(), ParseError> {
        let Some(c) = self.bump() else {
            return Err(self.end());
        };
        match c {
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{b}'),
            '0' => {
                if self.peek().is_some_and(|d| d.is_ascii_digit()) {
                    return Err(self.invalid_escape(at));
                }
                out.push('\0');
            }
            '1'..='9' => return Err(self.invalid_escape(at)),
            'x' => {
                let code = self.hex_code(2, at)?;
                out.push(char::from_u32(code).ok_or_else(|| self.invalid_escape(at))?);
            }
            'u' => {
                let code = self.hex_code(4, at)?;
                out.push(self.finish_unicode_escape(code, at)?);
            }
            // Line continuations produce nothing.
            '\r' => {
                if self.peek() == Some('\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
        Ok(())
    }

    /// Combine surrogate pairs written as two `\u` escapes. Unpaired
    /// surrogates become U+FFFD since Rust strings cannot hold them.
    fn finish_unicode_escape(&mut self, code: u32, at: usize) -> Result<char, ParseError> {
        if (0xD800..0xDC00).contains(&code) {
            if self.peek() == Some('\\') && self.peek_nth(1) == Some('u') {
                let resume = self.pos;
                self.pos += 2;
                let low = self.hex_code(4, resume)?;
                if (0xDC00..0xE000).contains(&low) {
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    return char::from_u32(combined).ok_or_else(|| self.invalid_escape(at));
                }
                self.pos = resume;
            }
            return Ok(char::REPLACEMENT_CHARACTER);
        }
        Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn hex_code(&mut self, len: usize, at: usize) -> Result<u32, ParseError> {
        let mut code = 0_u32;
        for _ in 0..len {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.invalid_escape(at))?;
            self.pos += 1;
            code = code * 16 + digit;
        }
        Ok(code)
    }

    // =========================================================================
    // NUMBERS
    // =========================================================================

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        let negative = match self.peek() {
            Some('-') => {
                self.pos += 1;
                true
            }
            Some('+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        if self.peek().is_some_and(is_identifier_start) {
            return match self.eat_while(is_identifier_part) {
                "Infinity" | "NaN" => Err(self.non_finite(start)),
                _ => Err(self.invalid_number(start)),
            };
        }

        if self.peek() == Some('0') && matches!(self.peek_nth(1), Some('x' | 'X')) {
            self.pos += 2;
            let digits = self.eat_while(|c| c.is_ascii_hexdigit());
            if digits.is_empty() {
                return Err(self.invalid_number(start));
            }
            return self.finish_hex(digits, negative, start);
        }

        let int_digits = self.eat_while(|c| c.is_ascii_digit());
        if int_digits.len() > 1 && int_digits.starts_with('0') {
            return Err(self.invalid_number(start));
        }

        let mut frac_digits = None;
        if self.peek() == Some('.') {
            self.pos += 1;
            frac_digits = Some(self.eat_while(|c| c.is_ascii_digit()));
        }
        if int_digits.is_empty() && frac_digits.is_none_or(str::is_empty) {
            return Err(self.invalid_number(start));
        }

        let mut exponent = None;
        if matches!(self.peek(), Some('e' | 'E')) {
            let exp_start = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.pos += 1;
            }
            if self.eat_while(|c| c.is_ascii_digit()).is_empty() {
                return Err(self.invalid_number(start));
            }
            exponent = Some(&self.src[exp_start + 1..self.pos]);
        }

        if frac_digits.is_none() && exponent.is_none() {
            if let Some(number) = integer_number(int_digits, negative) {
                return Ok(Value::Number(number));
            }
        }

        let normalized = format!(
            "{}{}.{}e{}",
            if negative { "-" } else { "" },
            if int_digits.is_empty() { "0" } else { int_digits },
            frac_digits.filter(|d| !d.is_empty()).unwrap_or("0"),
            exponent.unwrap_or("0"),
        );
        let float: f64 = normalized.parse().map_err(|_| self.invalid_number(start))?;
        Number::from_f64(float)
            .map(Value::Number)
            .ok_or_else(|| self.non_finite(start))
    }

    fn finish_hex(&self, digits: &str, negative: bool, start: usize) -> Result<Value, ParseError> {
        if let Ok(magnitude) = u64::from_str_radix(digits, 16) {
            if !negative {
                return Ok(Value::Number(magnitude.into()));
            }
            if let Ok(signed) = i64::try_from(-i128::from(magnitude)) {
                return Ok(Value::Number(signed.into()));
            }
        }
        let magnitude = digits
            .chars()
            .filter_map(|c| c.to_digit(16))
            .fold(0.0_f64, |acc, d| acc * 16.0 + f64::from(d));
        let float = if negative { -magnitude } else { magnitude };
        Number::from_f64(float)
            .map(Value::Number)
            .ok_or_else(|| self.non_finite(start))
    }
}

fn integer_number(digits: &str, negative: bool) -> Option<Number> {
    let magnitude: u64 = digits.parse().ok()?;
    if negative {
        i64::try_from(-i128::from(magnitude)).ok().map(Number::from)
    } else {
        Some(Number::from(magnitude))
    }
}

fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || unicode_ident::is_xid_start(c)
}

/// Includes combining marks, digits and connector punctuation.
fn is_identifier_part(c: char) -> bool {
    c == '$' || unicode_ident::is_xid_continue(c) || c == '\u{200C}' || c == '\u{200D}'
}
