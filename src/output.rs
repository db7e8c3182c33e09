use std::fmt;

/// One line of the HP-42S listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
	/// Number entry, e.g. `1.5E-3`.
	Literal(String),
	/// Instruction with its operand, e.g. `RCL "A"`.
	Instr(String),
	/// Step with no known HP-42S equivalent, left for manual correction.
	Unmapped(Unmapped),
}

impl Line {
	pub fn instr(text: impl Into<String>) -> Self {
		Self::Instr(text.into())
	}

	pub fn is_unmapped(&self) -> bool {
		matches!(self, Self::Unmapped(_))
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unmapped {
	/// Key missing from the mnemonic table.
	Key(String),
	/// Multi-key function whose joined spelling is missing from the table.
	Compound(String),
	/// Known op with an operand it cannot take.
	Operand { op: String, operand: String },
	/// Known key that does not take the operand form it was given.
	Form(String),
	/// Step whose shape matches no translation rule.
	Step(Vec<String>),
}

impl fmt::Display for Line {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Literal(text) | Self::Instr(text) => write!(fmt, "{text}"),
			Self::Unmapped(unmapped) => write!(fmt, "## {unmapped}"),
		}
	}
}

impl fmt::Display for Unmapped {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Key(key) => write!(fmt, "unmapped key '{key}'"),
			Self::Compound(keys) => write!(fmt, "unmapped compound '{keys}'"),
			Self::Operand { op, operand } => write!(fmt, "unmapped operand '{operand}' for '{op}'"),
			Self::Form(key) => write!(fmt, "unmatched form of '{key}'"),
			Self::Step(tokens) => write!(fmt, "unrecognized step '{}'", tokens.join(" ")),
		}
	}
}
