//! Scanner for the `key=value,...` list inside selector brackets.

/// A `key=value` pair, both trimmed.
pub(crate) type Argument<'a> = (&'a str, &'a str);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanError<'a> {
    /// Text ran to the end without an `=`.
    MissingEquals(&'a str),
    /// A value opened a quote, brace or bracket it never closed.
    Unclosed(&'a str),
    /// A value closed a brace or bracket it never opened.
    Unbalanced(&'a str),
}

/// Splits bracket contents into arguments.
///
/// Values end at the next comma outside of quotes and nested `{}`/`[]`, so
/// `scores={a=1,b=2}` and `name="a,b"` are each one value.
pub(crate) struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(crate) const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// The next argument, or `None` once the input is exhausted.
    pub(crate) fn next_argument(&mut self) -> Option<Result<Argument<'a>, ScanError<'a>>> {
        self.skip_whitespace();
        if self.is_eof() {
            return None;
        }
        Some(self.argument())
    }

    fn argument(&mut self) -> Result<Argument<'a>, ScanError<'a>> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '=' {
                break;
            }
            self.advance();
        }

        let key = self.slice(start).trim();
        if self.advance() != Some('=') {
            return Err(ScanError::MissingEquals(key));
        }

        let value = self.value()?;
        Ok((key, value))
    }

    fn value(&mut self) -> Result<&'a str, ScanError<'a>> {
        let start = self.pos;
        let mut depth = 0_usize;
        let mut quoted = false;

        while let Some(c) = self.peek() {
            if quoted {
                match c {
                    '\\' => {
                        self.advance();
                    }
                    '"' => quoted = false,
                    _ => {}
                }
                self.advance();
                continue;
            }

            match c {
                '"' => quoted = true,
                '{' | '[' => depth += 1,
                '}' | ']' => {
                    self.advance();
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| ScanError::Unbalanced(self.slice(start).trim()))?;
                    continue;
                }
                ',' if depth == 0 => {
                    let value = self.slice(start).trim();
                    self.advance();
                    return Ok(value);
                }
                _ => {}
            }
            self.advance();
        }

        let value = self.slice(start).trim();
        if quoted || depth > 0 {
            return Err(ScanError::Unclosed(value));
        }
        Ok(value)
    }

    fn slice(&self, start: usize) -> &'a str {
        self.input.get(start..self.pos).unwrap_or_default()
    }

    fn remaining(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}

impl<'a> Iterator for Parser<'a> {
    type Item = Result<Argument<'a>, ScanError<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_argument()
    }
}
