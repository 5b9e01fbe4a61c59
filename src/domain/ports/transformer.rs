//! Transformer port
//!
//! Converts one component into write instructions for the other format.
//! Anything that must wait for more components (recomposition, merged
//! children) is parked in the `ConvertContext` owned by the conversion call.

use crate::domain::entities::{ConvertContext, SourceComponent, WriteInfo};
use crate::error::MetaformResult;

pub trait Transformer: Send + Sync {
    /// Source format → metadata format
    fn to_metadata_format(
        &self,
        component: &SourceComponent,
        ctx: &mut ConvertContext,
    ) -> MetaformResult<Vec<WriteInfo>>;

    /// Metadata format → source format
    ///
    /// `merge_with` is the local component the output should land on, when
    /// converting into an existing project.
    fn to_source_format(
        &self,
        component: &SourceComponent,
        merge_with: Option<&SourceComponent>,
        ctx: &mut ConvertContext,
    ) -> MetaformResult<Vec<WriteInfo>>;
}
