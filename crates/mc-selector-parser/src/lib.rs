//! Target selector parser
//!
//! Turns command text like `@e[type=zombie,limit=1]` into an
//! [`EntitySelector`](mc_selector::EntitySelector).
//!
//! # Syntax
//!
//! ```text
//! @p / @n                      // nearest player / nearest entity
//! @r                           // a random player
//! @a / @e                      // all players / all entities
//! @s                           // the command sender
//! @e[type=!zombie,limit=3]     // bracketed key=value arguments
//! 6f1a...-uuid                 // a single entity by UUID
//! Steve                        // a player by name (player arguments only)
//! ```
//!
//! # Examples
//!
//! ```
//! use mc_selector::Sort;
//! use mc_selector_parser::EntityArgument;
//!
//! let argument = EntityArgument::entity("targets");
//! let selector = argument.parse(None, "@e[sort=nearest,limit=2]").unwrap();
//! assert_eq!(selector.sort(), Sort::Nearest);
//! assert_eq!(selector.limit(), 2);
//! ```

mod argument;
mod error;
mod parser;
mod range;

pub use argument::{ARGUMENT_NAMES, ArgumentFlags, EntityArgument, SelectorVariable};
pub use error::{ErrorCode, SyntaxError};
pub use range::{IntRange, RangeParseError};
