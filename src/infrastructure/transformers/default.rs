//! Default transformer
//!
//! One write per payload file plus one for the metadata document, with
//! paths rewritten between the two layouts. No document is parsed.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::{AdapterKind, ConvertContext, MetadataType, SourceComponent, WriteInfo};
use crate::domain::ports::Transformer;
use crate::domain::value_objects::source_path::{base_name, strip_meta_suffix, with_meta_suffix};
use crate::domain::value_objects::META_XML_SUFFIX;
use crate::error::MetaformResult;

use super::{anchor_of, package_relative, source_output};

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTransformer;

impl DefaultTransformer {
    /// Metadata-format name of a single content file
    ///
    /// Mixed content stored as one file is renamed after the type suffix
    /// (`Logo.png` → `Logo.resource`).
    fn metadata_content_path(component: &SourceComponent, file: &Path, anchor: &Path) -> PathBuf {
        let type_ = component.type_();
        let relative = package_relative(type_, file, anchor);
        let single_file = !component.tree().is_directory(file)
            && component.content() == Some(file);
        match (&type_.suffix, type_.adapter()) {
            (Some(suffix), AdapterKind::MixedContent) if single_file => {
                relative.with_file_name(format!("{}.{}", base_name(file), suffix))
            }
            _ => relative,
        }
    }

    fn metadata_xml_path(component: &SourceComponent, xml: &Path, anchor: &Path) -> PathBuf {
        let type_ = component.type_();

        // a single content file carries its document as `<file>-meta.xml`
        if let Some(content) = component.content() {
            if !component.tree().is_directory(content) {
                return with_meta_suffix(&Self::metadata_content_path(component, content, anchor));
            }
        }

        let relative = package_relative(type_, xml, anchor);
        if type_.folder_content_type.is_some() {
            let name = local_name(component.full_name());
            return relative.with_file_name(format!("{}{}", name, META_XML_SUFFIX));
        }
        if component.content().is_none() {
            if let Some(stripped) = strip_meta_suffix(&relative) {
                return stripped;
            }
        }
        relative
    }

    /// Source-format document name: `<name>.<suffix>-meta.xml`
    ///
    /// Legacy suffixes and metadata-format names both end up here.
    fn source_xml_path(type_: &MetadataType, full_name: &str, relative: &Path) -> PathBuf {
        match &type_.suffix {
            Some(suffix) => relative.with_file_name(format!(
                "{}.{}{}",
                local_name(full_name),
                suffix,
                META_XML_SUFFIX
            )),
            None => relative.to_path_buf(),
        }
    }
}

/// Last `/`-separated segment of a full name
fn local_name(full_name: &str) -> &str {
    full_name.rsplit('/').next().unwrap_or(full_name)
}

impl Transformer for DefaultTransformer {
    fn to_metadata_format(
        &self,
        component: &SourceComponent,
        _ctx: &mut ConvertContext,
    ) -> MetaformResult<Vec<WriteInfo>> {
        let anchor = anchor_of(component);
        let mut writes = Vec::new();

        for file in component.walk_content()? {
            let output = Self::metadata_content_path(component, &file, &anchor);
            writes.push(WriteInfo::copy(output, component.tree().clone(), &file));
        }
        if let Some(xml) = component.xml() {
            let output = Self::metadata_xml_path(component, xml, &anchor);
            writes.push(WriteInfo::copy(output, component.tree().clone(), xml));
        }
        Ok(writes)
    }

    fn to_source_format(
        &self,
        component: &SourceComponent,
        merge_with: Option<&SourceComponent>,
        _ctx: &mut ConvertContext,
    ) -> MetaformResult<Vec<WriteInfo>> {
        let type_ = component.type_();
        let anchor = anchor_of(component);
        let ignore = component.ignore();
        let mut writes = Vec::new();

        for file in component.walk_content()? {
            let output = merge_with
                .and_then(|target| merged_content_path(component, target, &file))
                .unwrap_or_else(|| source_output(&package_relative(type_, &file, &anchor)));
            if ignore.denies(&output) {
                debug!(output = %output.display(), "content output ignored");
                continue;
            }
            writes.push(WriteInfo::copy(output, component.tree().clone(), &file));
        }

        if let Some(xml) = component.xml() {
            let output = match merge_with.and_then(SourceComponent::xml) {
                Some(existing) => existing.to_path_buf(),
                None => {
                    let relative = package_relative(type_, xml, &anchor);
                    source_output(&Self::source_xml_path(type_, component.full_name(), &relative))
                }
            };
            if !ignore.denies(&output) {
                writes.push(WriteInfo::copy(output, component.tree().clone(), xml));
            }
        }
        Ok(writes)
    }
}

/// Where a payload file lands inside an existing local component
fn merged_content_path(
    component: &SourceComponent,
    target: &SourceComponent,
    file: &Path,
) -> Option<PathBuf> {
    let target_content = target.content()?;
    if !target.tree().is_directory(target_content) {
        return Some(target_content.to_path_buf());
    }
    let content = component.content()?;
    let below = file.strip_prefix(content).ok()?;
    Some(target_content.join(below))
}
