use std::collections::HashMap;

use tracing::{instrument, trace};

use crate::error::{Error, Result};

/// HP-15C keycap text and the HP-42S (`txt2raw`) mnemonic it translates to.
///
/// Several glyphs appear in more than one spelling: the emulator exports
/// superscripts and arrows that older exports (or a wrong decode) replace with
/// `?` or plain ASCII, so each variant gets its own entry.
pub(crate) const MNEMONICS: &[(&str, &str)] = &[
	("÷", "/"),
	("-", "-"),
	("+", "+"),
	("−", "-"),
	("✛", "+"),
	(".", "."),
	("%", "%"),
	("??", "??"),
	("∑", "SUM"),
	("∑−", "∑−"),
	("0", "0"),
	("1", "1"),
	("2", "2"),
	("3", "3"),
	("4", "4"),
	("5", "5"),
	("6", "6"),
	("7", "7"),
	("8", "8"),
	("9", "9"),
	("10ˣ", "10^X"),
	("10^x", "10^X"),
	("1/x", "1/X"),
	("ABS", "ABS"),
	("CF", "CF"),
	("CHS", "+/-"),
	("?", r"CL\Sigma"),
	("CLx", "CLX"),
	("COS-¹", "ACOS"),
	("COS⁻¹", "ACOS"),
	("COS?¹", "ACOS"),
	("COS", "COS"),
	("Cy,x", "COMB"),
	("→DEG", "->DEG"),
	("DEG", "DEG"),
	("DIM", "DIM"),
	("DSE", "DSE"),
	("e?", "E^X"),
	("eˣ", "E^X"),
	("ℯˣ", "E^X"),
	("e^x", "E^X"),
	("EEX", "E"),
	("ENG", "ENG"),
	("ENTER", "ENTER"),
	("F?", "FS?"),
	("FIX", "FIX"),
	("FRAC", "FP"),
	("GRD", "GRAD"),
	("GSB", "XEQ"),
	("GTO", "GTO"),
	("→H", "->HR"),
	("→H.MS", "->HMS"),
	("HYP⁻¹", "HYP"),
	("I", "COMPLEX"),
	("INT", "IP"),
	("ISG", "ISG"),
	("LBL", "LBL"),
	("LN", "LN"),
	("LOG", "LOG"),
	("L.R.", "YINT"),
	("LST?", "LASTX"),
	("LSTx", "LASTX"),
	("LSTΧ", "LASTX"),
	("MATRIX", "NEWMAT"),
	("P", "P"),
	("→P", "->POL"),
	("PSE", "PSE"),
	("→RAD", "->RAD"),
	("RAD", "RAD"),
	("RAN?#", "RAN"),
	("RAN", "RAN"),
	("RAN#", "RAN"),
	("RCL", "RCL"),
	("?,r", "CORR"),
	("ŷ,r", "CORR"),
	("REG", "CLRG"),
	("Re?Im", "COMPLEX"),
	("Re↔Im", "COMPLEX"),
	("RND", "RND"),
	("R↓", "Rv"),
	("R⬇", "Rv"),
	("R⬆", "R^"),
	("→R", "->REC"),
	("R/S", "STOP"),
	("RTN", "RTN"),
	("SCI", "SCI"),
	("SF", "SF"),
	("?+", r"\Sigma+"),
	("∑+", r"\Sigma+"),
	("SIN?¹", "ASIN"),
	("SIN⁻¹", "ASIN"),
	("SIN", "SIN"),
	("SOLVE", "SOLVE"),
	("s", "SDEV"),
	("STO", "STO"),
	("TAN-¹", "ATAN"),
	("TAN⁻¹", "ATAN"),
	("TAN", "TAN"),
	("TEST", "TEST"),
	("×", "x"),
	("✕", "x"),
	("x≠0", "X!=0"),
	("x<0", "X<0"),
	("x≤0", "X<=0"),
	("x=0", "X=0?"),
	("x≥0", "X>=0"),
	("x>0", "X>0"),
	("x²", "X^2"),
	("?x?", "SQRT"),
	("√x", "SQRT"),
	("√x̅", "SQRT"),
	("x̅", "MEAN"),
	("∫xy", "PGMINT"),
	("Py,x", "PERM"),
	("x<y", "X<Y"),
	("x≤y", "X<=Y?"),
	("x=y", "X=Y"),
	("x≠y", "X!=Y"),
	("x≥y", "X>=Y"),
	("x>y", "X>Y"),
	("x?y", "X<>Y"),
	("x↔y", "X<>Y"),
	("y^x", "Y^X"),
	("y?", "Y^X"),
	("yˣ", "Y^X"),
	("Δ%", "%CH"),
	("π", "PI"),
	("Χ↔", "X<>"),
	("Χ", "Χ"),
	("Χ !", "N!"),
	("Χ!", "N!"),
];

/// Arithmetic glyphs allowed between a storage op and its register (`STO + 5`).
pub(crate) const OPERATORS: &[(&str, &str)] = &[
	("÷", "/"),
	("×", "x"),
	("✕", "x"),
	("-", "-"),
	("−", "-"),
	("+", "+"),
	("✛", "+"),
];

/// Read-only lookup from one source spelling to one destination spelling.
#[derive(Debug, Clone)]
pub struct Table {
	name: &'static str,
	map: HashMap<&'static str, &'static str>,
}

impl Table {
	/// Builds a table, refusing entries that reuse a key.
	#[instrument(skip(entries))]
	pub fn new(name: &'static str, entries: &[(&'static str, &'static str)]) -> Result<Self> {
		let mut map = HashMap::with_capacity(entries.len());
		for &(key, value) in entries {
			if map.insert(key, value).is_some() {
				return Err(Error::DuplicateKey(name, key.into()));
			}
		}
		trace!("loaded {} {name} entries", map.len());
		Ok(Self { name, map })
	}

	pub fn get(&self, key: &str) -> Option<&'static str> {
		let value = self.map.get(key).copied();
		trace!("{} lookup '{key}' -> {value:?}", self.name);
		value
	}

	pub fn contains(&self, key: &str) -> bool {
		self.map.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.map.len()
	}

	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}
}

/// Both lookup tables the dispatcher consults.
#[derive(Debug, Clone)]
pub struct Tables {
	pub mnemonics: Table,
	pub operators: Table,
}

impl Tables {
	pub fn load() -> Result<Self> {
		Ok(Self {
			mnemonics: Table::new("mnemonic", MNEMONICS)?,
			operators: Table::new("operator", OPERATORS)?,
		})
	}

	/// Destination glyph for an arithmetic operator; `#` marks one we do not know.
	pub fn operator(&self, glyph: &str) -> &'static str {
		self.operators.get(glyph).unwrap_or("#")
	}
}
