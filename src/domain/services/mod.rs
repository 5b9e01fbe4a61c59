//! Domain Services
//!
//! Pure logic shared by the adapters and transformers.

pub mod xml;

pub use xml::{parse_document, XmlElement, XmlNode, METADATA_NAMESPACE};
