//! TypeGrammar: parsing and canonicalization of Solidity ABI type strings.
//!
//! ```text
//! <base>       ::= "uint"|"int"|"uint"N|"int"N|"address"|"bool"|"string"|"bytes"|"bytes"N|"byte"
//! <type>       ::= <base> | "(" <type> ("," <type>)* ")" | <type> "[" <int>? "]"
//! ```

use crate::error::{AbiError, Result};

/// The scalar leaf families a `<base>` production can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarFamily {
    Uint,
    Int,
    Address,
    Bool,
    FixedBytes,
    Bytes,
    String,
}

/// The length of an array dimension: a fixed positive size, or dynamic (`[]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayLen {
    Fixed(usize),
    Dynamic,
}

/// A parsed, canonical ABI type. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiType {
    /// `size` is bit-width for `Uint`/`Int`, byte-count for `FixedBytes`,
    /// and unused (`0`) for `Address`/`Bool`/`Bytes`/`String`.
    Scalar { family: ScalarFamily, size: u16 },
    Array { inner: Box<AbiType>, len: ArrayLen },
    /// Ordered `(name, type)` components. Parameter names are not part of
    /// the canonical string form.
    Tuple { components: Vec<(String, AbiType)> },
}

impl AbiType {
    pub const ADDRESS: AbiType = AbiType::Scalar { family: ScalarFamily::Address, size: 0 };
    pub const BOOL: AbiType = AbiType::Scalar { family: ScalarFamily::Bool, size: 0 };
    pub const BYTES: AbiType = AbiType::Scalar { family: ScalarFamily::Bytes, size: 0 };
    pub const STRING: AbiType = AbiType::Scalar { family: ScalarFamily::String, size: 0 };

    pub fn uint(bits: u16) -> AbiType {
        AbiType::Scalar { family: ScalarFamily::Uint, size: bits }
    }

    pub fn int(bits: u16) -> AbiType {
        AbiType::Scalar { family: ScalarFamily::Int, size: bits }
    }

    pub fn fixed_bytes(n: u16) -> AbiType {
        AbiType::Scalar { family: ScalarFamily::FixedBytes, size: n }
    }

    /// Parses a single bare type descriptor, e.g. `"uint256[2][]"` or
    /// `"(uint8,string)[2]"`. Does not accept parameter names or `indexed`.
    pub fn parse(descriptor: &str) -> Result<AbiType> {
        let mut p = Parser::new(descriptor);
        let ty = p.parse_type()?;
        p.expect_end()?;
        Ok(ty)
    }

    /// `true` iff this type's encoded size is not fixed by the type alone.
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiType::Scalar { family, .. } => {
                matches!(family, ScalarFamily::Bytes | ScalarFamily::String)
            }
            AbiType::Array { inner, len } => matches!(len, ArrayLen::Dynamic) || inner.is_dynamic(),
            AbiType::Tuple { components } => components.iter().any(|(_, t)| t.is_dynamic()),
        }
    }

    /// Size in bytes when static; `None` when dynamic.
    pub fn byte_size(&self) -> Option<usize> {
        match self {
            AbiType::Scalar { family, .. } => match family {
                ScalarFamily::Bytes | ScalarFamily::String => None,
                _ => Some(32),
            },
            AbiType::Array { inner, len } => match len {
                ArrayLen::Dynamic => None,
                ArrayLen::Fixed(n) => inner.byte_size().map(|s| s * n),
            },
            AbiType::Tuple { components } => {
                let mut total = 0usize;
                for (_, t) in components {
                    total += t.byte_size()?;
                }
                Some(total)
            }
        }
    }

    /// Bit width for `uint`/`int`; `None` otherwise.
    pub fn bit_size(&self) -> Option<u16> {
        match self {
            AbiType::Scalar { family: ScalarFamily::Uint | ScalarFamily::Int, size } => Some(*size),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, AbiType::Array { .. })
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, AbiType::Tuple { .. })
    }

    /// The length of the outermost array dimension (rightmost bracket in
    /// the source), if this is an array type.
    pub fn outer_length(&self) -> Option<ArrayLen> {
        match self {
            AbiType::Array { len, .. } => Some(*len),
            _ => None,
        }
    }

    /// The type one array dimension down (or the tuple/scalar the outermost
    /// bracket wraps), if this is an array type.
    pub fn inner_type(&self) -> Option<&AbiType> {
        match self {
            AbiType::Array { inner, .. } => Some(inner),
            _ => None,
        }
    }

    /// Strips all array dimensions, returning the innermost non-array type.
    pub fn base_type(&self) -> &AbiType {
        let mut cur = self;
        while let AbiType::Array { inner, .. } = cur {
            cur = inner;
        }
        cur
    }

    /// Product of all dimensions if every dimension is fixed; `-1` if any
    /// dimension is dynamic (the sentinel the normalized tree uses).
    pub fn multi_length(&self) -> i64 {
        match self {
            AbiType::Array { inner, len } => {
                let sub = inner.multi_length();
                match (len, sub) {
                    (_, -1) => -1,
                    (ArrayLen::Dynamic, _) => -1,
                    (ArrayLen::Fixed(n), sub) => (*n as i64) * sub,
                }
            }
            _ => 1,
        }
    }

    /// `true` for scalar families whose canonical string carries an
    /// explicit numeric suffix (`uint256`, `bytes4`), `false` for the
    /// suffix-free ones (`address`, `bool`, `string`, `bytes`).
    pub fn has_length_suffix(&self) -> bool {
        match self {
            AbiType::Scalar { family, .. } => matches!(
                family,
                ScalarFamily::Uint | ScalarFamily::Int | ScalarFamily::FixedBytes
            ),
            _ => false,
        }
    }

    /// The canonical textual form: no names, no whitespace, aliases
    /// (`byte` -> `bytes1`, bare `uint`/`int` -> `uint256`/`int256`)
    /// already expanded during parsing.
    pub fn canonical(&self) -> String {
        match self {
            AbiType::Scalar { family, size } => match family {
                ScalarFamily::Uint => format!("uint{size}"),
                ScalarFamily::Int => format!("int{size}"),
                ScalarFamily::Address => "address".to_string(),
                ScalarFamily::Bool => "bool".to_string(),
                ScalarFamily::FixedBytes => format!("bytes{size}"),
                ScalarFamily::Bytes => "bytes".to_string(),
                ScalarFamily::String => "string".to_string(),
            },
            AbiType::Tuple { components } => {
                let parts: Vec<String> = components.iter().map(|(_, t)| t.canonical()).collect();
                format!("({})", parts.join(","))
            }
            AbiType::Array { inner, len } => {
                let suffix = match len {
                    ArrayLen::Fixed(n) => n.to_string(),
                    ArrayLen::Dynamic => String::new(),
                };
                format!("{}[{suffix}]", inner.canonical())
            }
        }
    }
}

/// A small recursive-descent parser over a type/parameter descriptor.
struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, bytes: src.as_bytes(), pos: 0 }
    }

    fn fail(&self, reason: impl Into<String>) -> AbiError {
        AbiError::InvalidDescriptor { descriptor: self.src.to_string(), reason: reason.into() }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r')) {
            self.pos += 1;
        }
    }

    fn expect_byte(&mut self, b: u8) -> Result<()> {
        self.skip_ws();
        if self.peek() == Some(b) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.fail(format!("expected '{}' at position {}", b as char, self.pos)))
        }
    }

    fn expect_end(&mut self) -> Result<()> {
        self.skip_ws();
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(self.fail(format!("unexpected trailing input at position {}", self.pos)))
        }
    }

    fn parse_ident(&mut self) -> Result<&'a str> {
        self.skip_ws();
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'_') {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.fail(format!("expected identifier at position {start}")));
        }
        Ok(&self.src[start..self.pos])
    }

    /// Parses `<parameters>`: a parenthesized, comma-separated list of
    /// `<named-type>`. Returns `(position, name, type, indexed)` tuples.
    fn parse_parameter_list(&mut self) -> Result<Vec<(String, AbiType, bool)>> {
        self.expect_byte(b'(')?;
        let mut out = Vec::new();
        self.skip_ws();
        if self.peek() == Some(b')') {
            self.pos += 1;
            return Ok(out);
        }
        loop {
            let ty = self.parse_type()?;
            self.skip_ws();
            let mut name = String::new();
            let mut indexed = false;
            // optional name, optional `indexed` keyword, in either order
            // is not standard Solidity, but the grammar only guarantees
            // name-then-indexed; accept that shape.
            if matches!(self.peek(), Some(c) if c.is_ascii_alphabetic() || c == b'_') {
                let ident = self.parse_ident()?;
                if ident == "indexed" {
                    indexed = true;
                } else {
                    name = ident.to_string();
                    self.skip_ws();
                    if matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
                        let pos_before = self.pos;
                        let ident2 = self.parse_ident()?;
                        if ident2 == "indexed" {
                            indexed = true;
                        } else {
                            self.pos = pos_before;
                        }
                    }
                }
            }
            out.push((name, ty, indexed));
            self.skip_ws();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                }
                Some(b')') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.fail(format!("expected ',' or ')' at position {}", self.pos))),
            }
        }
        Ok(out)
    }

    fn parse_type(&mut self) -> Result<AbiType> {
        self.skip_ws();
        let mut ty = if self.peek() == Some(b'(') {
            self.parse_tuple()?
        } else {
            self.parse_base()?
        };
        loop {
            self.skip_ws();
            if self.peek() != Some(b'[') {
                break;
            }
            self.pos += 1;
            let start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
            let digits = &self.src[start..self.pos];
            self.expect_byte(b']')?;
            let len = if digits.is_empty() {
                ArrayLen::Dynamic
            } else {
                let n: usize = digits
                    .parse()
                    .map_err(|_| self.fail(format!("invalid array dimension '{digits}'")))?;
                if n == 0 {
                    return Err(self.fail("array dimension must be positive"));
                }
                ArrayLen::Fixed(n)
            };
            ty = AbiType::Array { inner: Box::new(ty), len };
        }
        Ok(ty)
    }

    fn parse_tuple(&mut self) -> Result<AbiType> {
        self.expect_byte(b'(')?;
        let mut components = Vec::new();
        self.skip_ws();
        if self.peek() == Some(b')') {
            self.pos += 1;
            return Ok(AbiType::Tuple { components });
        }
        loop {
            let ty = self.parse_type()?;
            components.push((String::new(), ty));
            self.skip_ws();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                }
                Some(b')') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.fail(format!("expected ',' or ')' at position {}", self.pos))),
            }
        }
        Ok(AbiType::Tuple { components })
    }

    fn parse_base(&mut self) -> Result<AbiType> {
        let ident = self.parse_ident()?;
        match ident {
            "address" => Ok(AbiType::ADDRESS),
            "bool" => Ok(AbiType::BOOL),
            "string" => Ok(AbiType::STRING),
            "byte" => Ok(AbiType::fixed_bytes(1)),
            "bytes" => Ok(AbiType::BYTES),
            _ if ident.starts_with("bytes") => {
                let n: u16 = ident[5..]
                    .parse()
                    .map_err(|_| self.fail(format!("invalid bytes size in '{ident}'")))?;
                if n == 0 || n > 32 {
                    return Err(self.fail(format!("bytes size {n} out of range 1..=32")));
                }
                Ok(AbiType::fixed_bytes(n))
            }
            "uint" => Ok(AbiType::uint(256)),
            _ if ident.starts_with("uint") => {
                let bits: u16 = ident[4..]
                    .parse()
                    .map_err(|_| self.fail(format!("invalid uint size in '{ident}'")))?;
                validate_int_bits(bits).map_err(|r| self.fail(r))?;
                Ok(AbiType::uint(bits))
            }
            "int" => Ok(AbiType::int(256)),
            _ if ident.starts_with("int") => {
                let bits: u16 = ident[3..]
                    .parse()
                    .map_err(|_| self.fail(format!("invalid int size in '{ident}'")))?;
                validate_int_bits(bits).map_err(|r| self.fail(r))?;
                Ok(AbiType::int(bits))
            }
            other => Err(self.fail(format!("unknown base type '{other}'"))),
        }
    }
}

fn validate_int_bits(bits: u16) -> std::result::Result<(), String> {
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(format!("integer size {bits} must be a multiple of 8 in 8..=256"));
    }
    Ok(())
}

/// Parses a full `<parameters>` descriptor (a parenthesized list).
pub(crate) fn parse_parameter_list(descriptor: &str) -> Result<Vec<(String, AbiType, bool)>> {
    let mut p = Parser::new(descriptor);
    let list = p.parse_parameter_list()?;
    p.expect_end()?;
    Ok(list)
}
