use crate::rfl::catalog::TypeCatalog;
use crate::rfl::{Result, RflError, Type};

/// Parse a whole type expression; trailing input is an error.
pub(super) fn parse_type(catalog: &TypeCatalog, expr: &str) -> Result<Type> {
	let mut parser = Parser {
		catalog,
		input: expr,
		bytes: expr.as_bytes(),
		idx: 0,
	};
	let ty = parser.ty()?;
	parser.skip_ws();
	if parser.idx != parser.bytes.len() {
		return Err(parser.invalid());
	}
	Ok(ty)
}

struct Parser<'a> {
	catalog: &'a TypeCatalog,
	input: &'a str,
	bytes: &'a [u8],
	idx: usize,
}

impl<'a> Parser<'a> {
	fn ty(&mut self) -> Result<Type> {
		self.skip_ws();
		match self.peek() {
			Some(b'*') => {
				self.idx += 1;
				Ok(Type::ptr(self.ty()?))
			}
			Some(b'[') => {
				self.idx += 1;
				let elem = self.ty()?;
				self.expect(b';')?;
				let len = self.number()?;
				self.expect(b']')?;
				Ok(Type::array(elem, len))
			}
			_ => self.named(),
		}
	}

	fn named(&mut self) -> Result<Type> {
		let name = self.ident()?;
		match name {
			"any" => Ok(Type::dynamic()),
			"Vec" => {
				let elem = self.generic_arg()?;
				Ok(Type::seq(elem))
			}
			"Option" => {
				let elem = self.generic_arg()?;
				Ok(Type::ptr(elem))
			}
			"HashMap" => {
				self.expect(b'<')?;
				let key = self.ty()?;
				self.expect(b',')?;
				let value = self.ty()?;
				self.expect(b'>')?;
				Ok(Type::map(key, value))
			}
			name => self.catalog.resolve(name),
		}
	}

	fn generic_arg(&mut self) -> Result<Type> {
		self.expect(b'<')?;
		let ty = self.ty()?;
		self.expect(b'>')?;
		Ok(ty)
	}

	fn ident(&mut self) -> Result<&'a str> {
		self.skip_ws();
		let start = self.idx;
		while let Some(byte) = self.peek() {
			if byte.is_ascii_alphanumeric() || byte == b'_' {
				self.idx += 1;
			} else {
				break;
			}
		}
		if self.idx == start || self.bytes[start].is_ascii_digit() {
			return Err(self.invalid());
		}
		let input = self.input;
		Ok(&input[start..self.idx])
	}

	fn number(&mut self) -> Result<usize> {
		self.skip_ws();
		let start = self.idx;
		while self.peek().is_some_and(|byte| byte.is_ascii_digit()) {
			self.idx += 1;
		}
		self.input[start..self.idx].parse::<usize>().map_err(|_| self.invalid())
	}

	fn expect(&mut self, byte: u8) -> Result<()> {
		self.skip_ws();
		if self.peek() != Some(byte) {
			return Err(self.invalid());
		}
		self.idx += 1;
		Ok(())
	}

	fn peek(&self) -> Option<u8> {
		self.bytes.get(self.idx).copied()
	}

	fn skip_ws(&mut self) {
		while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
			self.idx += 1;
		}
	}

	fn invalid(&self) -> RflError {
		RflError::InvalidTypeExpr { expr: self.input.to_owned() }
	}
}
