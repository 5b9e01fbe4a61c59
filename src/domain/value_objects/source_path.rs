//! Source path helpers
//!
//! Naming conventions of the source-format file layout: `<name>.<suffix>-meta.xml`
//! for metadata documents, `<name>.<ext>` for content, and bare
//! `<folder>-meta.xml` for folder metadata.

use std::path::{Component, Path, PathBuf};

/// Suffix appended to every source-format metadata document
pub const META_XML_SUFFIX: &str = "-meta.xml";

/// Source-format package root below a package directory
pub const DEFAULT_PACKAGE_ROOT: &str = "main/default";

/// A metadata document name split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMetadataXml {
    /// Component name encoded in the file name
    pub full_name: String,
    /// Type suffix (`cls`, `object`, ...)
    pub suffix: String,
    /// Path of the document
    pub path: PathBuf,
}

/// Parse `<name>.<suffix>-meta.xml`
pub fn parse_metadata_xml(path: &Path) -> Option<ParsedMetadataXml> {
    let file_name = file_name(path)?;
    let stem = file_name.strip_suffix(META_XML_SUFFIX)?;
    let (full_name, suffix) = stem.rsplit_once('.')?;
    if full_name.is_empty() || suffix.is_empty() {
        return None;
    }
    Some(ParsedMetadataXml {
        full_name: full_name.to_string(),
        suffix: suffix.to_string(),
        path: path.to_path_buf(),
    })
}

/// Parse a bare folder document `<folder>-meta.xml` (no type suffix)
pub fn parse_folder_metadata_xml(path: &Path) -> Option<String> {
    let file_name = file_name(path)?;
    let stem = file_name.strip_suffix(META_XML_SUFFIX)?;
    if stem.is_empty() || stem.contains('.') {
        return None;
    }
    Some(stem.to_string())
}

/// Whether the path names a source-format metadata document
pub fn is_metadata_xml(path: &Path) -> bool {
    file_name(path).is_some_and(|name| name.ends_with(META_XML_SUFFIX))
}

/// File name before its first dot (`Account.object-meta.xml` → `Account`)
pub fn base_name(path: &Path) -> String {
    let name = file_name(path).unwrap_or_default();
    match name.split_once('.') {
        Some((head, _)) if !head.is_empty() => head.to_string(),
        _ => name.to_string(),
    }
}

/// Last extension without the dot
pub fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// The path with the `-meta.xml` suffix removed
pub fn strip_meta_suffix(path: &Path) -> Option<PathBuf> {
    let name = file_name(path)?;
    let stripped = name.strip_suffix(META_XML_SUFFIX)?;
    Some(path.with_file_name(stripped))
}

/// The path with the `-meta.xml` suffix appended
pub fn with_meta_suffix(path: &Path) -> PathBuf {
    let name = file_name(path).unwrap_or_default();
    path.with_file_name(format!("{}{}", name, META_XML_SUFFIX))
}

/// Portion of `path` starting at the last segment equal to `segment`
pub fn trim_until(path: &Path, segment: &str) -> Option<PathBuf> {
    let parts = normal_parts(path);
    let index = parts.iter().rposition(|p| p == segment)?;
    Some(parts[index..].iter().collect())
}

/// Index of the last occurrence of `segment` in the normal parts of `path`
pub fn last_segment_index(path: &Path, segment: &str) -> Option<usize> {
    normal_parts(path).iter().rposition(|p| p == segment)
}

/// Path made of the first `count` normal parts, keeping a leading root
pub fn take_parts(path: &Path, count: usize) -> PathBuf {
    let mut out = PathBuf::new();
    let mut taken = 0;
    for component in path.components() {
        match component {
            Component::Normal(part) => {
                if taken == count {
                    break;
                }
                out.push(part);
                taken += 1;
            }
            Component::CurDir => {}
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Normal (named) parts of a path as strings
pub fn normal_parts(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Name of the directory containing `path`
pub fn parent_name(path: &Path) -> Option<String> {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
}

/// Package manifests found next to retrieved metadata
pub fn is_package_manifest(path: &Path) -> bool {
    file_name(path).is_some_and(|name| {
        name == "package.xml"
            || (name.starts_with("destructiveChanges") && name.ends_with(".xml"))
    })
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}
