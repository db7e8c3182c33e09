use tracing::{instrument, trace, warn};

use crate::operand::Operand;
use crate::output::{Line, Unmapped};
use crate::tables::Tables;

/// Keys whose single operand addresses a register, label or flag.
const REGISTER_OPS: &[&str] = &[
	"STO", "RCL", "LBL", "GSB", "GTO", "FIX", "SCI", "ENG", "DIM", "ISG", "DSE", "F?", "SF", "CF",
	"MATRIX", "Χ↔",
];

/// `TEST n` conditions, indexed by `n`.
const TEST_CONDITIONS: [&str; 10] = ["x≠0", "x>0", "x<0", "x≥0", "x≤0", "x=y", "x≠y", "x>y", "x<y", "x≥y"];

fn is_shift(key: &str) -> bool {
	key == "f" || key == "g"
}

fn trig(key: &str) -> Option<&str> {
	matches!(key, "SIN" | "COS" | "TAN").then_some(key)
}

/// HP-42S replacement for `MATRIX n`, or what the HP-42S lacks to express it.
fn matrix(n: u8) -> Result<&'static [&'static str], &'static str> {
	match n {
		0 => Err("delete all matrices"),
		1 => Ok(&["1", "ENTER", "STOIJ", "RCLIJ"]),
		2 => Err("transform Z^P into Z~"),
		3 => Err("transform Z~ into Z^P"),
		4 => Ok(&["TRAN"]),
		5 => Ok(&["TRAN", "x"]),
		6 => Err("residual"),
		7 => Ok(&["RNRM"]),
		8 => Ok(&["FNRM"]),
		9 => Ok(&["DET"]),
		_ => Err("unknown matrix function"),
	}
}

/// Turns the keys of one program step into HP-42S lines.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'t> {
	tables: &'t Tables,
}

impl<'t> Dispatcher<'t> {
	pub fn new(tables: &'t Tables) -> Self {
		Self { tables }
	}

	#[instrument(skip(self, out))]
	pub fn dispatch(&self, tokens: &[&str], out: &mut Vec<Line>) {
		match *tokens {
			[] => {}
			[key] => self.single(key, out),
			[shift, key] if is_shift(shift) => self.single(key, out),
			[op, operand] => self.register(op, operand, out),
			[shift, key, operand] if is_shift(shift) => self.shifted(key, operand, out),
			[op, glyph, operand] => self.binary(op, glyph, operand, out),
			[shift, a, b, c] if is_shift(shift) => self.compound4(a, b, c, out),
			_ => self.unmapped(Unmapped::Step(tokens.iter().map(|t| t.to_string()).collect()), out),
		}
	}

	fn single(&self, key: &str, out: &mut Vec<Line>) {
		match self.tables.mnemonics.get(key) {
			Some(mnemonic) => out.push(Line::instr(mnemonic)),
			None => self.unmapped(Unmapped::Key(key.into()), out),
		}
	}

	fn register_op(&self, key: &str) -> Option<&'static str> {
		if REGISTER_OPS.contains(&key) {
			self.tables.mnemonics.get(key)
		} else {
			None
		}
	}

	/// Diagnostic for a key that is not a register op: either an unknown key or a
	/// known one used in a form it does not have.
	fn not_register_op(&self, key: &str, out: &mut Vec<Line>) {
		if self.tables.mnemonics.contains(key) {
			self.unmapped(Unmapped::Form(key.into()), out);
		} else {
			self.unmapped(Unmapped::Key(key.into()), out);
		}
	}

	/// `OP operand`, with or without the shift key in front.
	fn register(&self, op: &str, operand: &str, out: &mut Vec<Line>) {
		let Some(mnemonic) = self.register_op(op) else {
			return self.not_register_op(op, out);
		};
		match (op, Operand::classify(operand)) {
			("SF", Operand::Digit(9)) => out.push(Line::instr("BEEP")),
			("MATRIX", Operand::Digit(n)) => match matrix(n) {
				Ok(lines) => out.extend(lines.iter().copied().map(Line::instr)),
				Err(missing) => {
					warn!("MATRIX {n} ({missing}) has no HP-42S equivalent, emitting STOP");
					out.push(Line::instr("STOP"));
				}
			},
			("SF" | "CF" | "FIX", Operand::Alpha('I')) => out.push(Line::Instr(format!("{mnemonic} IND \"I\""))),
			(_, Operand::Other(_)) => self.unmapped(Unmapped::Operand { op: op.into(), operand: operand.into() }, out),
			(_, reg) => out.push(Line::Instr(format!("{mnemonic} {}", reg.register()))),
		}
	}

	/// `f|g KEY operand`
	fn shifted(&self, key: &str, operand: &str, out: &mut Vec<Line>) {
		trace!("shifted '{key}' '{operand}'");
		match key {
			"TEST" => self.test(operand, out),
			"RAN" => self.single(key, out),
			"Χ" | "P" => self.compound(&[key, operand], out),
			"∫xy" | "SOLVE" => self.label_op(key, operand, out),
			"HYP⁻¹" => match trig(operand) {
				Some(f) => out.push(Line::Instr(format!("A{f}H"))),
				None => self.unmapped(Unmapped::Compound(format!("{key}{operand}")), out),
			},
			"→" | "HYP" => {
				let joined = format!("{key}{operand}");
				match (self.tables.mnemonics.get(&joined), trig(operand)) {
					(Some(mnemonic), _) => out.push(Line::instr(mnemonic)),
					(None, Some(f)) if key == "HYP" => out.push(Line::Instr(format!("{f}H"))),
					(None, _) => self.unmapped(Unmapped::Compound(joined), out),
				}
			}
			"RESULT" => {
				warn!("RESULT {operand} has no HP-42S equivalent, emitting STOP");
				out.push(Line::instr("STOP"));
			}
			_ => self.register(key, operand, out),
		}
	}

	/// `TEST n` becomes the matching conditional, which on the HP-42S ends in `?`.
	fn test(&self, operand: &str, out: &mut Vec<Line>) {
		let condition = match Operand::classify(operand) {
			Operand::Digit(n) => TEST_CONDITIONS[n as usize],
			_ => operand,
		};
		match self.tables.mnemonics.get(condition) {
			Some(mnemonic) if mnemonic.ends_with('?') => out.push(Line::instr(mnemonic)),
			Some(mnemonic) => out.push(Line::Instr(format!("{mnemonic}?"))),
			None => self.unmapped(Unmapped::Operand { op: "TEST".into(), operand: operand.into() }, out),
		}
	}

	/// `SOLVE` and `∫xy` call their function by global label.
	fn label_op(&self, key: &str, operand: &str, out: &mut Vec<Line>) {
		let Some(mnemonic) = self.tables.mnemonics.get(key) else {
			return self.unmapped(Unmapped::Key(key.into()), out);
		};
		match Operand::classify(operand) {
			Operand::Other(_) => self.unmapped(Unmapped::Operand { op: key.into(), operand: operand.into() }, out),
			label => out.push(Line::Instr(format!("{mnemonic} {}", label.label()))),
		}
	}

	/// Function spread over several keys, looked up by its joined spelling.
	fn compound(&self, keys: &[&str], out: &mut Vec<Line>) {
		let joined = keys.concat();
		match self.tables.mnemonics.get(&joined) {
			Some(mnemonic) => out.push(Line::instr(mnemonic)),
			None => self.unmapped(Unmapped::Compound(joined), out),
		}
	}

	/// `OP glyph operand`: register arithmetic such as `STO + 5`.
	fn binary(&self, op: &str, glyph: &str, operand: &str, out: &mut Vec<Line>) {
		let Some(mnemonic) = self.register_op(op) else {
			return self.not_register_op(op, out);
		};
		let reg = Operand::classify(operand);
		if !reg.is_known() {
			return self.unmapped(Unmapped::Operand { op: format!("{op} {glyph}"), operand: operand.into() }, out);
		}
		let line = if glyph == "MATRIX" {
			format!("{mnemonic} MATRIX {}", reg.register())
		} else {
			format!("{mnemonic}{} {}", self.tables.operator(glyph), reg.register())
		};
		out.push(Line::Instr(line));
	}

	fn compound4(&self, a: &str, b: &str, c: &str, out: &mut Vec<Line>) {
		if self.tables.mnemonics.contains(a) {
			self.unmapped(Unmapped::Compound([a, b, c].concat()), out);
		} else {
			self.compound(&[a, b, c], out);
		}
	}

	fn unmapped(&self, unmapped: Unmapped, out: &mut Vec<Line>) {
		warn!("{unmapped}");
		out.push(Line::Unmapped(unmapped));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn dispatch(tokens: &[&str]) -> Vec<String> {
		let tables = Tables::load().unwrap();
		let mut out = Vec::new();
		Dispatcher::new(&tables).dispatch(tokens, &mut out);
		out.iter().map(Line::to_string).collect()
	}

	macro_rules! test_dispatch {
		($name:ident, [$($token:expr),*], [$($line:expr),*]) => {
			#[test_log::test]
			fn $name() {
				let expected: &[&str] = &[$($line),*];
				assert_eq!(dispatch(&[$($token),*]), expected);
			}
		};
	}

	test_dispatch!(single,           ["ENTER"],              ["ENTER"]);
	test_dispatch!(single_chs,       ["CHS"],                ["+/-"]);
	test_dispatch!(single_unknown,   ["Σ"],                  ["## unmapped key 'Σ'"]);
	test_dispatch!(shifted_single,   ["g", "R⬆"],            ["R^"]);
	test_dispatch!(shifted_clear,    ["f", "REG"],           ["CLRG"]);
	test_dispatch!(shifted_unknown,  ["g", "Σ"],             ["## unmapped key 'Σ'"]);

	test_dispatch!(rcl_alpha,        ["RCL", "A"],           ["RCL \"A\""]);
	test_dispatch!(sto_digit,        ["STO", "5"],           ["STO 05"]);
	test_dispatch!(sto_fraction,     ["STO", ".5"],          ["STO 15"]);
	test_dispatch!(sto_indirect,     ["STO", "(i)"],         ["STO IND \"I\""]);
	test_dispatch!(gsb_is_xeq,       ["GSB", "1"],           ["XEQ 01"]);
	test_dispatch!(gto_label,        ["GTO", "B"],           ["GTO \"B\""]);
	test_dispatch!(sf_beep,          ["SF", "9"],            ["BEEP"]);
	test_dispatch!(sf_other,         ["SF", "1"],            ["SF 01"]);
	test_dispatch!(matrix_one,       ["MATRIX", "1"],        ["1", "ENTER", "STOIJ", "RCLIJ"]);
	test_dispatch!(bad_operand,      ["STO", "F"],           ["## unmapped operand 'F' for 'STO'"]);
	test_dispatch!(not_register_op,  ["SIN", "5"],           ["## unmatched form of 'SIN'"]);
	test_dispatch!(unknown_op,       ["FOO", "5"],           ["## unmapped key 'FOO'"]);

	test_dispatch!(shifted_label,    ["f", "LBL", "A"],      ["LBL \"A\""]);
	test_dispatch!(shifted_fix,      ["f", "FIX", "4"],      ["FIX 04"]);
	test_dispatch!(shifted_dim,      ["f", "DIM", "(i)"],    ["DIM IND \"I\""]);
	test_dispatch!(shifted_flag,     ["g", "F?", "3"],       ["FS? 03"]);
	test_dispatch!(shifted_sf_beep,  ["g", "SF", "9"],       ["BEEP"]);
	test_dispatch!(shifted_sf_ind,   ["g", "SF", "I"],       ["SF IND \"I\""]);
	test_dispatch!(shifted_isg,      ["f", "ISG", ".2"],     ["ISG 12"]);
	test_dispatch!(exchange,         ["f", "Χ↔", "(i)"],     ["X<> IND \"I\""]);
	test_dispatch!(exchange_digit,   ["f", "Χ↔", "3"],       ["X<> 03"]);

	test_dispatch!(matrix_zero,      ["f", "MATRIX", "0"],   ["STOP"]);
	test_dispatch!(matrix_two,       ["f", "MATRIX", "2"],   ["STOP"]);
	test_dispatch!(matrix_three,     ["f", "MATRIX", "3"],   ["STOP"]);
	test_dispatch!(matrix_four,      ["f", "MATRIX", "4"],   ["TRAN"]);
	test_dispatch!(matrix_five,      ["f", "MATRIX", "5"],   ["TRAN", "x"]);
	test_dispatch!(matrix_six,       ["f", "MATRIX", "6"],   ["STOP"]);
	test_dispatch!(matrix_seven,     ["f", "MATRIX", "7"],   ["RNRM"]);
	test_dispatch!(matrix_eight,     ["f", "MATRIX", "8"],   ["FNRM"]);
	test_dispatch!(matrix_nine,      ["f", "MATRIX", "9"],   ["DET"]);

	test_dispatch!(test_number,      ["g", "TEST", "1"],     ["X>0?"]);
	test_dispatch!(test_number_eq,   ["g", "TEST", "5"],     ["X=Y?"]);
	test_dispatch!(test_glyph,       ["g", "TEST", "x≠0"],   ["X!=0?"]);
	test_dispatch!(test_no_double,   ["g", "TEST", "x=0"],   ["X=0?"]);
	test_dispatch!(test_unknown,     ["g", "TEST", "q"],     ["## unmapped operand 'q' for 'TEST'"]);
	test_dispatch!(random,           ["f", "RAN", "#"],      ["RAN"]);
	test_dispatch!(result,           ["f", "RESULT", "A"],   ["STOP"]);

	test_dispatch!(factorial,        ["f", "Χ", "!"],        ["N!"]);
	test_dispatch!(permutation,      ["f", "P", "y,x"],      ["PERM"]);
	test_dispatch!(bad_compound,     ["f", "P", "q"],        ["## unmapped compound 'Pq'"]);

	test_dispatch!(solve_alpha,      ["f", "SOLVE", "A"],    ["SOLVE \"A\""]);
	test_dispatch!(solve_digit,      ["f", "SOLVE", "4"],    ["SOLVE \"04\""]);
	test_dispatch!(integrate_digit,  ["f", "∫xy", "3"],      ["PGMINT \"03\""]);
	test_dispatch!(integrate_frac,   ["f", "∫xy", ".1"],     ["PGMINT \"11\""]);
	test_dispatch!(solve_indirect,   ["f", "SOLVE", "(i)"],  ["SOLVE IND \"I\""]);

	test_dispatch!(to_rect,          ["f", "→", "R"],        ["->REC"]);
	test_dispatch!(to_hms,           ["f", "→", "H.MS"],     ["->HMS"]);
	test_dispatch!(to_unknown,       ["f", "→", "Q"],        ["## unmapped compound '→Q'"]);
	test_dispatch!(hyperbolic,       ["f", "HYP", "SIN"],    ["SINH"]);
	test_dispatch!(hyp_unknown,      ["f", "HYP", "LN"],     ["## unmapped compound 'HYPLN'"]);
	test_dispatch!(inv_hyperbolic,   ["g", "HYP⁻¹", "COS"],  ["ACOSH"]);
	test_dispatch!(inv_hyp_unknown,  ["g", "HYP⁻¹", "LN"],   ["## unmapped compound 'HYP⁻¹LN'"]);

	test_dispatch!(sto_add,          ["STO", "+", "1"],      ["STO+ 01"]);
	test_dispatch!(rcl_div,          ["RCL", "÷", "A"],      ["RCL/ \"A\""]);
	test_dispatch!(sto_mul_frac,     ["STO", "×", ".4"],     ["STOx 14"]);
	test_dispatch!(sto_sub_ind,      ["STO", "−", "(i)"],    ["STO- IND \"I\""]);
	test_dispatch!(sto_odd_glyph,    ["STO", "%", "1"],      ["STO# 01"]);
	test_dispatch!(sto_matrix,       ["STO", "MATRIX", "A"], ["STO MATRIX \"A\""]);
	test_dispatch!(binary_not_reg,   ["SIN", "+", "1"],      ["## unmatched form of 'SIN'"]);
	test_dispatch!(binary_bad_reg,   ["STO", "+", "Q"],      ["## unmapped operand 'Q' for 'STO +'"]);

	test_dispatch!(four_known_head,  ["g", "Χ", "!", "1"],   ["## unmapped compound 'Χ!1'"]);
	test_dispatch!(four_unknown,     ["g", "a", "b", "c"],   ["## unmapped compound 'abc'"]);
	test_dispatch!(four_lookup,      ["g", "x", "≤", "y"],   ["X<=Y?"]);

	test_dispatch!(too_long,         ["a", "b", "c", "d", "e"], ["## unrecognized step 'a b c d e'"]);
	test_dispatch!(four_unshifted,   ["a", "b", "c", "d"],   ["## unrecognized step 'a b c d'"]);
	test_dispatch!(empty,            [],                     []);

	#[test_log::test]
	fn every_mapped_key_translates_verbatim() {
		for &(key, mnemonic) in crate::tables::MNEMONICS {
			assert_eq!(dispatch(&[key]), [mnemonic], "key '{key}'");
		}
	}

	#[test_log::test]
	fn unclassifiable_steps_emit_one_diagnostic() {
		let steps: [&[&str]; 4] = [&["x", "y", "z", "w", "v"], &["q", "r"], &["q", "r", "s"], &["Σ"]];
		for tokens in steps {
			let out = dispatch(tokens);
			assert_eq!(out.len(), 1, "{tokens:?}");
			assert!(out[0].starts_with("## "), "{tokens:?}");
		}
	}
}
