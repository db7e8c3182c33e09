use pest::Parser;
use pest_derive::Parser;

use tracing::trace;

#[derive(Parser)]
#[grammar = "../listing.pest"]
struct ListingParser;

/// Keys of one program step, in the order they were pressed.
///
/// Returns `None` for anything that is not a program step (the `000` header,
/// blank lines, trailing text); those lines are simply skipped.
pub fn tokens(line: &str) -> Option<Vec<&str>> {
	let line = line.trim();
	let step = match ListingParser::parse(Rule::step, line) {
		Ok(mut pairs) => pairs.next()?,
		Err(_) => {
			trace!("skipping '{line}'");
			return None;
		}
	};

	let keys = step
		.into_inner()
		.find(|pair| pair.as_rule() == Rule::keys)?
		.as_str();
	let tokens: Vec<&str> = keys.split_whitespace().collect();
	if tokens.is_empty() {
		return None;
	}
	trace!("step tokens: {tokens:?}");
	Some(tokens)
}
