//! Resolve Module
//!
//! Turns a path in a tree into the set of components it holds.
//!
//! ## Structure
//!
//! - `inference` - Type inference for a single path
//! - `use_case` - Recursive resolution (`MetadataResolver`)
//!
//! ## Usage
//!
//! ```ignore
//! use metaform::application::resolve::MetadataResolver;
//!
//! let resolver = MetadataResolver::new(registry, tree).with_ignore(ignore);
//! let components = resolver.resolve(Path::new("force-app"), None)?;
//! ```

mod inference;
mod use_case;

pub use inference::TypeInference;
pub use use_case::MetadataResolver;
