//! Convert Module
//!
//! Moves resolved components between source format and metadata format.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`ConvertOptions`, `OutputConfig`)
//! - `result` - Result types (`ConvertResult`, `ComponentFailure`)
//! - `cancellation` - `CancellationToken` shared with signal handlers
//! - `use_case` - The transform/write pipeline (`ConvertUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use metaform::application::convert::{ConvertOptions, ConvertUseCase, OutputConfig};
//!
//! let options = ConvertOptions::new(TargetFormat::Metadata, OutputConfig::directory("out"));
//! let result = ConvertUseCase::new().execute(&components, &options)?;
//! ```

mod cancellation;
mod options;
mod result;
mod use_case;

pub use cancellation::CancellationToken;
pub use options::{ConvertOptions, OutputConfig, DEFAULT_BUFFER_SIZE};
pub use result::{ComponentFailure, ConvertResult};
pub use use_case::ConvertUseCase;

#[cfg(test)]
mod tests;
