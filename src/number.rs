use tracing::debug;

const EXPONENT: char = 'E';

/// What happened to a token offered to the [`Accumulator`].
#[derive(Debug, PartialEq, Eq)]
pub enum Feed {
	/// The token became part of the pending literal.
	Absorbed,
	/// The token is not numeric. Carries the literal it terminated, if any.
	Passed(Option<String>),
}

/// Joins the separate digit, `.`, `EEX` and `CHS` steps of an HP-15C number
/// entry into the single literal line the HP-42S expects.
#[derive(Debug, Default)]
pub struct Accumulator {
	buffer: String,
	active: bool,
	last_was_digit: bool,
	exponent_seen: bool,
}

impl Accumulator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_active(&self) -> bool {
		self.active
	}

	pub fn feed(&mut self, token: &str) -> Feed {
		match token {
			"." if self.buffer.is_empty() => self.digit("0."),
			"0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" | "." => self.digit(token),
			"EEX" => {
				if self.last_was_digit || !self.buffer.is_empty() {
					self.buffer.push(EXPONENT);
				} else {
					// a bare EEX enters 1 as the mantissa
					self.buffer.push('1');
					self.buffer.push(EXPONENT);
				}
				self.active = true;
				self.last_was_digit = true;
				self.exponent_seen = true;
				debug!("exponent: '{token}' => '{}'", self.buffer);
				Feed::Absorbed
			}
			"CHS" if self.exponent_seen => {
				self.negate_exponent();
				Feed::Absorbed
			}
			_ => Feed::Passed(self.end_run()),
		}
	}

	/// Emits whatever literal is still pending, e.g. at the end of the listing.
	pub fn flush(&mut self) -> Option<String> {
		self.end_run()
	}

	fn digit(&mut self, text: &str) -> Feed {
		self.buffer.push_str(text);
		self.active = true;
		self.last_was_digit = true;
		debug!("digit: '{text}' => '{}'", self.buffer);
		Feed::Absorbed
	}

	fn negate_exponent(&mut self) {
		let Some(marker) = self.buffer.rfind(EXPONENT) else {
			debug!("no exponent marker in '{}', CHS ignored", self.buffer);
			return;
		};
		let digits = &self.buffer[marker + 1..];
		if !digits.chars().all(|ch| ch.is_ascii_digit()) {
			// only a single sign change on the exponent is representable
			debug!("exponent of '{}' already signed, CHS ignored", self.buffer);
			return;
		}
		self.buffer.insert(marker + 1, '-');
		debug!("sign: 'CHS' => '{}'", self.buffer);
	}

	fn end_run(&mut self) -> Option<String> {
		let was_active = self.active;
		self.active = false;
		self.last_was_digit = false;
		self.exponent_seen = false;
		if was_active {
			debug!("literal complete: '{}'", self.buffer);
			Some(std::mem::take(&mut self.buffer))
		} else {
			None
		}
	}
}
