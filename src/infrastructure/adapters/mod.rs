//! Source Adapters
//!
//! These adapters implement the SourceAdapter port, one per type family.
//! The registry's strategy tag picks the adapter for a type.

mod bundle;
mod decomposed;
mod default;
mod matching_content;
mod mixed_content;
pub(crate) mod naming;
mod non_decomposed;

pub use bundle::BundleAdapter;
pub use decomposed::DecomposedAdapter;
pub use default::DefaultAdapter;
pub use matching_content::MatchingContentAdapter;
pub use mixed_content::MixedContentAdapter;
pub use non_decomposed::NonDecomposedAdapter;

use crate::domain::entities::AdapterKind;
use crate::domain::ports::SourceAdapter;

static DEFAULT: DefaultAdapter = DefaultAdapter;
static MATCHING_CONTENT: MatchingContentAdapter = MatchingContentAdapter;
static MIXED_CONTENT: MixedContentAdapter = MixedContentAdapter;
static BUNDLE: BundleAdapter = BundleAdapter;
static DECOMPOSED: DecomposedAdapter = DecomposedAdapter;
static NON_DECOMPOSED: NonDecomposedAdapter = NonDecomposedAdapter;

/// Adapter for a strategy tag
pub fn adapter_for(kind: AdapterKind) -> &'static dyn SourceAdapter {
    match kind {
        AdapterKind::Default => &DEFAULT,
        AdapterKind::MatchingContentFile => &MATCHING_CONTENT,
        AdapterKind::MixedContent => &MIXED_CONTENT,
        AdapterKind::Bundle => &BUNDLE,
        AdapterKind::Decomposed => &DECOMPOSED,
        AdapterKind::NonDecomposed => &NON_DECOMPOSED,
    }
}
