//! Gherkin keyword tables shared by the `gherkin-cst` lexer and parser.
//!
//! The crate maps every grammar role to the spellings a natural language
//! uses for it and resolves keywords by longest match. Dialect selection is
//! data driven: one [`Dialect`] value per language, chosen at parse time from
//! a `# language:` directive.

mod dialect;
mod errors;
mod registry;
mod role;

pub use dialect::{Dialect, KeywordMatch};
pub use errors::DialectError;
pub use registry::{DEFAULT_LANGUAGE, default_dialect, dialect, languages, try_dialect};
pub use role::KeywordRole;
