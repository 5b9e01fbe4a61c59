//! Naming rules shared by the source adapters

use std::path::{Path, PathBuf};

use crate::domain::entities::MetadataType;
use crate::domain::ports::TreeContainer;
use crate::domain::value_objects::source_path::{
    base_name, extension, last_segment_index, normal_parts, parent_name,
    parse_folder_metadata_xml, parse_metadata_xml, take_parts,
};

/// Full name of the component `path` belongs to
///
/// Folder-organized types keep every folder below the type directory:
/// `reports/Sales/Q1.report-meta.xml` → `Sales/Q1`.
pub(crate) fn component_name(type_: &MetadataType, path: &Path) -> String {
    let local = local_name(type_, path);
    if !(type_.in_folder || type_.folder_content_type.is_some()) {
        return local;
    }

    let parts = normal_parts(path);
    match last_segment_index(path, &type_.directory_name) {
        Some(index) if index + 1 < parts.len() => {
            let mut segments = parts[index + 1..parts.len() - 1].to_vec();
            segments.push(local);
            segments.join("/")
        }
        Some(_) => local,
        None if type_.in_folder => match parent_name(path) {
            Some(folder) => format!("{}/{}", folder, local),
            None => local,
        },
        None => local,
    }
}

/// Name encoded in a single file name
fn local_name(type_: &MetadataType, path: &Path) -> String {
    if let Some(parsed) = parse_metadata_xml(path) {
        return parsed.full_name;
    }
    if let Some(folder) = parse_folder_metadata_xml(path) {
        return folder;
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    for suffix in [&type_.suffix, &type_.legacy_suffix].into_iter().flatten() {
        if let Some(stem) = file_name.strip_suffix(&format!(".{}", suffix)) {
            if !stem.is_empty() {
                return stem.to_string();
            }
        }
    }
    base_name(path)
}

/// A content-less metadata-format document (`objects/Account.object`)
pub(crate) fn is_composed_document(type_: &MetadataType, path: &Path) -> bool {
    extension(path).is_some_and(|ext| type_.matches_suffix(ext))
}

/// Directory directly below the type directory that `path` lies in
///
/// `lwc/cmp/templates/a.html` → `lwc/cmp`. In-folder types skip one more
/// level for the folder.
pub(crate) fn trim_to_component_root(type_: &MetadataType, path: &Path) -> Option<PathBuf> {
    let index = last_segment_index(path, &type_.directory_name)?;
    let depth = if type_.in_folder { index + 3 } else { index + 2 };
    if normal_parts(path).len() < depth {
        return None;
    }
    Some(take_parts(path, depth))
}

/// Root metadata document of a component of `type_` directly inside `dir`
///
/// When `name` is given the document must also carry that name.
pub(crate) fn find_root_xml(
    tree: &dyn TreeContainer,
    type_: &MetadataType,
    dir: &Path,
    name: Option<&str>,
) -> Option<PathBuf> {
    let entries = tree.read_directory(dir).ok()?;
    entries.into_iter().map(|e| dir.join(e)).find(|path| {
        parse_metadata_xml(path).is_some_and(|parsed| {
            name.map_or(true, |n| parsed.full_name == n) && suffix_names_type(type_, &parsed.suffix)
        })
    })
}

/// Whether a document suffix belongs to `type_`
///
/// Bundle types without a suffix of their own accept any document suffix.
pub(crate) fn suffix_names_type(type_: &MetadataType, suffix: &str) -> bool {
    type_.suffix.is_none() || type_.matches_suffix(suffix)
}
