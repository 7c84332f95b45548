//! The syntax tree model: kinds, trivia, green storage, red views and the
//! factory that builds green trees.

mod factory;
mod green;
mod kind;
mod red;
mod trivia;

pub use factory::{SectionHeader, SyntaxFactory};
pub use green::{GreenElement, GreenNode, GreenToken};
pub use kind::SyntaxKind;
pub use red::{Descendants, SyntaxElement, SyntaxNode, SyntaxToken, Tokens};
pub use trivia::{Trivia, TriviaKind};

pub(crate) use trivia::language_directive;
