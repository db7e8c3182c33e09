use std::io::{self, Write};

use tracing::{info, instrument, trace};

use crate::dispatch::Dispatcher;
use crate::listing;
use crate::number::{Accumulator, Feed};
use crate::output::Line;
use crate::tables::Tables;

/// Counters reported once a listing has been translated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
	/// Physical lines read.
	pub lines: usize,
	/// Lines that were program steps.
	pub steps: usize,
	/// Lines written to the HP-42S listing.
	pub emitted: usize,
	/// Of those, how many are diagnostics needing manual work.
	pub unmapped: usize,
}

/// Translation pass over one listing. Owns the pending number entry, so steps
/// must be fed in program order.
#[derive(Debug)]
pub struct Translator<'t> {
	dispatcher: Dispatcher<'t>,
	number: Accumulator,
	stats: Stats,
}

impl<'t> Translator<'t> {
	pub fn new(tables: &'t Tables) -> Self {
		Self {
			dispatcher: Dispatcher::new(tables),
			number: Accumulator::new(),
			stats: Stats::default(),
		}
	}

	/// Translates one physical line of the listing; non-step lines produce nothing.
	pub fn line(&mut self, text: &str) -> Vec<Line> {
		self.stats.lines += 1;
		match listing::tokens(text) {
			Some(tokens) => self.step(&tokens),
			None => Vec::new(),
		}
	}

	/// Translates the keys of one program step.
	pub fn step(&mut self, tokens: &[&str]) -> Vec<Line> {
		self.stats.steps += 1;
		let mut out = Vec::new();

		let mut rest = tokens;
		while let [first, tail @ ..] = rest {
			match self.number.feed(first) {
				Feed::Absorbed => rest = tail,
				Feed::Passed(literal) => {
					out.extend(literal.map(Line::Literal));
					break;
				}
			}
		}
		self.dispatcher.dispatch(rest, &mut out);

		self.count(&out);
		out
	}

	/// Ends the pass, returning the number entry still pending at the last step.
	pub fn finish(&mut self) -> Option<Line> {
		let line = self.number.flush().map(Line::Literal);
		self.count(line.as_slice());
		line
	}

	pub fn stats(&self) -> Stats {
		self.stats
	}

	fn count(&mut self, lines: &[Line]) {
		self.stats.emitted += lines.len();
		self.stats.unmapped += lines.iter().filter(|line| line.is_unmapped()).count();
	}
}

/// Translates a decoded HP-15C listing, writing HP-42S lines to `out` as each
/// step is processed.
#[instrument(skip_all)]
pub fn translate<W: Write>(text: &str, tables: &Tables, mut out: W) -> io::Result<Stats> {
	let mut translator = Translator::new(tables);
	for line in text.lines() {
		for asm in translator.line(line) {
			trace!("emit '{asm}'");
			writeln!(out, "{asm}")?;
		}
	}
	if let Some(asm) = translator.finish() {
		writeln!(out, "{asm}")?;
	}
	out.flush()?;

	let stats = translator.stats();
	info!(
		"{} lines read, {} steps translated, {} lines emitted, {} unmapped",
		stats.lines, stats.steps, stats.emitted, stats.unmapped
	);
	Ok(stats)
}
