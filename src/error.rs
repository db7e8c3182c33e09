use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Diagnostic)]
pub enum Error {
	#[diagnostic(code(conv15to42s::io))]
	Io(PathBuf, std::io::Error),

	#[diagnostic(
		code(conv15to42s::encoding),
		help("re-export the listing as UTF-16 (with BOM), UTF-8, or ISO-8859-1 text")
	)]
	UnsupportedEncoding(PathBuf, &'static str),

	#[diagnostic(code(conv15to42s::table))]
	DuplicateKey(&'static str, Box<str>),

	#[diagnostic(
		code(conv15to42s::unmapped),
		help("search the translation for lines starting with '##' and patch them by hand")
	)]
	Unmapped(usize),
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io(_, e) => Some(e),
			_ => None,
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Io(path, e) => write!(fmt, "unable to access '{}': {e}", path.display()),
			Self::UnsupportedEncoding(path, found) => {
				write!(fmt, "'{}' has an unsupported text encoding ({found})", path.display())
			}
			Self::DuplicateKey(table, key) => write!(fmt, "{table} table defines '{key}' more than once"),
			Self::Unmapped(count) => write!(fmt, "{count} step(s) could not be translated"),
		}
	}
}
