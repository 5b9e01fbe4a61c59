//! Convert Use Case
//!
//! Runs a conversion as a two-stage pipeline:
//! 1. Transform: each component goes through its type's transformer and the
//!    resulting writes are staged (bytes read) on a worker thread
//! 2. Write: staged components are committed to the destination one at a
//!    time, in order, on the calling thread
//!
//! Stages are connected by a bounded channel. Deferred output (recomposed
//! documents, merge fragments, merged documents) is flushed after the last
//! component, followed by the manifest for metadata-format packages.

use std::collections::BTreeMap;
use std::sync::mpsc::{sync_channel, SyncSender};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use crate::domain::entities::{
    ComponentSet, ConvertContext, Manifest, SourceComponent, WriteInfo, MANIFEST_FILE,
};
use crate::domain::ports::{
    ConvertEvent, ConvertEventSink, NoopEventSink, StagedFile, WriteDestination,
};
use crate::domain::value_objects::{ComponentKey, TargetFormat};
use crate::error::MetaformResult;
use crate::infrastructure::transformers::{finalize, transformer_for};
use crate::infrastructure::writers::{DirectoryWriter, ZipArchiveWriter};

use super::cancellation::CancellationToken;
use super::options::{ConvertOptions, OutputConfig};
use super::result::{ComponentFailure, ConvertResult};

/// Local components (and their children) keyed for merge lookups
type MergeIndex = BTreeMap<ComponentKey, SourceComponent>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchKind {
    Component,
    /// Output parked until every component was transformed
    Deferred,
    Manifest,
}

/// One commit unit handed from the transform stage to the write stage
struct StagedBatch {
    label: String,
    kind: BatchKind,
    files: MetaformResult<Vec<StagedFile>>,
}

/// Convert use case - moves a component set into the other format
pub struct ConvertUseCase {
    event_sink: Arc<dyn ConvertEventSink>,
    cancellation: CancellationToken,
}

impl ConvertUseCase {
    pub fn new() -> Self {
        Self {
            event_sink: Arc::new(NoopEventSink),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn ConvertEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Convert every component in `components`
    ///
    /// A component whose transform or commit fails is reported in the result
    /// and leaves nothing behind; components already committed stay. Errors
    /// returned here are the ones that prevent the conversion from running
    /// or from producing its output at all.
    pub fn execute(
        &self,
        components: &ComponentSet,
        options: &ConvertOptions,
    ) -> MetaformResult<ConvertResult> {
        let merge_index = match &options.output {
            OutputConfig::Merge { merge_with, .. } if options.target.is_source() => {
                build_merge_index(merge_with)?
            }
            _ => MergeIndex::new(),
        };
        let mut destination = open_destination(&options.output);
        let mut result = ConvertResult::new();

        info!(
            target = %options.target,
            components = components.len(),
            destination = %destination.display_name(),
            "converting"
        );
        self.event_sink.on_event(ConvertEvent::Started {
            target: options.target,
            destination: destination.display_name(),
            component_count: components.len(),
        });

        thread::scope(|scope| {
            let (tx, rx) = sync_channel::<StagedBatch>(options.buffer_size.max(1));
            let producer =
                scope.spawn(|| self.transform_stage(components, options, &merge_index, tx));

            for batch in rx {
                if self.cancellation.is_cancelled() {
                    // dropping the receiver stops the producer at its next send
                    break;
                }
                self.write_batch(destination.as_mut(), batch, &mut result);
            }

            if let Err(payload) = producer.join() {
                std::panic::resume_unwind(payload);
            }
        });

        result.cancelled = self.cancellation.is_cancelled();
        result.output = destination.finish()?;

        if result.cancelled {
            warn!(
                converted = result.converted.len(),
                "conversion cancelled; deferred output was not written"
            );
        } else {
            info!(
                converted = result.converted.len(),
                failed = result.failed.len(),
                files = result.files.len(),
                "conversion finished"
            );
        }
        self.event_sink.on_event(ConvertEvent::Completed {
            converted_count: result.converted.len(),
            failed_count: result.failed.len(),
            file_count: result.files.len(),
            cancelled: result.cancelled,
        });
        Ok(result)
    }

    /// Transform components in order and hand their staged files over
    ///
    /// Owns the conversion context for the whole run, so deferred output is
    /// flushed here once the component stream is exhausted.
    fn transform_stage(
        &self,
        components: &ComponentSet,
        options: &ConvertOptions,
        merge_index: &MergeIndex,
        tx: SyncSender<StagedBatch>,
    ) {
        let mut ctx = ConvertContext::new();

        for component in components {
            if self.cancellation.is_cancelled() {
                return;
            }
            let files = transform(component, options.target, merge_index, &mut ctx)
                .and_then(stage);
            let batch = StagedBatch {
                label: component.key().to_string(),
                kind: BatchKind::Component,
                files,
            };
            if tx.send(batch).is_err() {
                return;
            }
        }

        if self.cancellation.is_cancelled() {
            return;
        }
        if ctx.has_pending() {
            debug!("flushing deferred output");
        }
        let deferred = match finalize(&mut ctx) {
            Ok(writes) => writes,
            Err(err) => {
                let _ = tx.send(StagedBatch {
                    label: "deferred output".to_string(),
                    kind: BatchKind::Deferred,
                    files: Err(err),
                });
                return;
            }
        };
        for write in deferred {
            let batch = StagedBatch {
                label: write.output.display().to_string(),
                kind: BatchKind::Deferred,
                files: stage(vec![write]),
            };
            if tx.send(batch).is_err() {
                return;
            }
        }

        if options.writes_manifest() {
            let manifest = Manifest::from_components(components, options.api_version.as_str());
            let files = manifest
                .to_xml()
                .map(|bytes| vec![StagedFile::new(MANIFEST_FILE, bytes)]);
            let _ = tx.send(StagedBatch {
                label: MANIFEST_FILE.to_string(),
                kind: BatchKind::Manifest,
                files,
            });
        }
    }

    fn write_batch(
        &self,
        destination: &mut dyn WriteDestination,
        batch: StagedBatch,
        result: &mut ConvertResult,
    ) {
        let committed = batch
            .files
            .and_then(|files| destination.commit(&files));
        match committed {
            Ok(paths) => {
                debug!(component = %batch.label, files = paths.len(), "committed");
                if self.event_sink.wants_detailed_events() {
                    for path in &paths {
                        self.event_sink
                            .on_event(ConvertEvent::FileWritten { path: path.clone() });
                    }
                }
                if batch.kind == BatchKind::Component {
                    self.event_sink.on_event(ConvertEvent::ComponentConverted {
                        component: batch.label.clone(),
                        file_count: paths.len(),
                    });
                    result.converted.push(batch.label);
                }
                result.files.extend(paths);
            }
            Err(err) => {
                warn!(component = %batch.label, error = %err, "conversion failed");
                self.event_sink.on_event(ConvertEvent::ComponentFailed {
                    component: batch.label.clone(),
                    error: err.to_string(),
                });
                result.failed.push(ComponentFailure {
                    component: batch.label,
                    error: err.to_string(),
                });
            }
        }
    }
}

impl Default for ConvertUseCase {
    fn default() -> Self {
        Self::new()
    }
}

fn open_destination(output: &OutputConfig) -> Box<dyn WriteDestination> {
    match output {
        OutputConfig::Directory { root, package_name } => {
            let root = match package_name {
                Some(name) => root.join(name),
                None => root.clone(),
            };
            Box::new(DirectoryWriter::new(root))
        }
        OutputConfig::Zip { path } => {
            let writer = ZipArchiveWriter::new();
            Box::new(match path {
                Some(path) => writer.with_output_path(path.clone()),
                None => writer,
            })
        }
        OutputConfig::Merge {
            default_directory, ..
        } => Box::new(DirectoryWriter::new(default_directory.clone())),
    }
}

/// Index local components by key, children of composite types included
///
/// A child is found either by its own key (a decomposed child file) or, when
/// the local project has no such child yet, through its parent's key.
fn build_merge_index(merge_with: &ComponentSet) -> MetaformResult<MergeIndex> {
    let mut index = MergeIndex::new();
    for local in merge_with {
        index.entry(local.key()).or_insert_with(|| local.clone());
        if local.type_().has_children() {
            for child in local.get_children()? {
                index.entry(child.key()).or_insert(child);
            }
        }
    }
    Ok(index)
}

fn merge_target<'a>(index: &'a MergeIndex, component: &SourceComponent) -> Option<&'a SourceComponent> {
    index.get(&component.key()).or_else(|| {
        component
            .parent()
            .and_then(|parent| index.get(&parent.key()))
    })
}

fn transform(
    component: &SourceComponent,
    target: TargetFormat,
    merge_index: &MergeIndex,
    ctx: &mut ConvertContext,
) -> MetaformResult<Vec<WriteInfo>> {
    let transformer = transformer_for(component.type_().transformer());
    match target {
        TargetFormat::Metadata => transformer.to_metadata_format(component, ctx),
        TargetFormat::Source => {
            let merge_with = merge_target(merge_index, component);
            transformer.to_source_format(component, merge_with, ctx)
        }
    }
}

/// Read every write's bytes so the write stage never touches a tree
fn stage(writes: Vec<WriteInfo>) -> MetaformResult<Vec<StagedFile>> {
    writes
        .into_iter()
        .map(|write| {
            let bytes = write.read()?;
            Ok(StagedFile::new(write.output, bytes))
        })
        .collect()
}
