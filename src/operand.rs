use std::fmt;

/// Register or label operand following a storage, branch or flag key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand<'a> {
	/// Letter label or register `A`-`E`, or the index register `I`.
	Alpha(char),
	/// Register or label `0`-`9`.
	Digit(u8),
	/// Register `.0`-`.9`.
	Fraction(u8),
	/// `(i)`: indirect through the index register.
	Indirect,
	Other(&'a str),
}

impl<'a> Operand<'a> {
	pub fn classify(text: &'a str) -> Self {
		let mut chars = text.chars();
		match (chars.next(), chars.next(), chars.next()) {
			(Some(ch @ ('A'..='E' | 'I')), None, _) => Self::Alpha(ch),
			(Some(ch @ '0'..='9'), None, _) => Self::Digit(ch as u8 - b'0'),
			(Some('.'), Some(ch @ '0'..='9'), None) => Self::Fraction(ch as u8 - b'0'),
			_ if text == "(i)" => Self::Indirect,
			_ => Self::Other(text),
		}
	}

	/// Index of a numbered register; `.n` follows `9` as `1n`.
	pub fn number(&self) -> Option<u8> {
		match self {
			Self::Digit(n) => Some(*n),
			Self::Fraction(n) => Some(10 + n),
			_ => None,
		}
	}

	pub fn is_known(&self) -> bool {
		!matches!(self, Self::Other(_))
	}

	/// Operand as written after an HP-42S register op: `"A"`, `05`, `12`, `IND "I"`.
	pub fn register(self) -> Register<'a> {
		Register { operand: self, quote_numbers: false }
	}

	/// Operand as a quoted global label, which `SOLVE` and `PGMINT` require.
	pub fn label(self) -> Register<'a> {
		Register { operand: self, quote_numbers: true }
	}
}

/// Display adapter produced by [`Operand::register`] and [`Operand::label`].
#[derive(Debug, Clone, Copy)]
pub struct Register<'a> {
	operand: Operand<'a>,
	quote_numbers: bool,
}

impl fmt::Display for Register<'_> {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		let op = self.operand;
		match op {
			Operand::Alpha(ch) => write!(fmt, "\"{ch}\""),
			Operand::Indirect => write!(fmt, "IND \"I\""),
			Operand::Other(text) => write!(fmt, "{text}"),
			Operand::Digit(_) | Operand::Fraction(_) => {
				let n = op.number().unwrap_or_default();
				if self.quote_numbers {
					write!(fmt, "\"{n:02}\"")
				} else {
					write!(fmt, "{n:02}")
				}
			}
		}
	}
}
