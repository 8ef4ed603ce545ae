//! The incremental generation pipeline.
//!
//! Each pass runs every registered generator over every candidate. Absent
//! extractions are dropped, and each remaining descriptor is compared with the
//! descriptor cached for the same `(generator, identity)` key by the previous
//! pass. Equal descriptors reuse the cached text; anything else is rendered.
//! After a pass the cache holds exactly the artifacts that pass produced.

use std::sync::Arc;

use holdgen_core::{ArtifactHash, ArtifactKind, Descriptor, Extraction};
use holdgen_generators::{CandidateFacts, Generator, GeneratorOptions, default_generators};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, trace, warn};

use crate::error::GenerationError;
use crate::registry::PatternRegistry;

/// Pipeline behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Fan extraction and rendering out over the rayon thread pool.
    pub parallel: bool,
    /// Check every rendered pattern for placeholders without a value.
    pub validate_coverage: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            validate_coverage: true,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_validate_coverage(mut self, validate: bool) -> Self {
        self.validate_coverage = validate;
        self
    }
}

/// Counters for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub candidates: usize,
    /// `(generator, candidate)` pairs that produced no descriptor.
    pub skipped: usize,
    /// Artifacts rendered this pass.
    pub generated: usize,
    /// Artifacts whose previous output was reused.
    pub reused: usize,
    /// Artifacts from the previous pass that no longer exist.
    pub removed: usize,
}

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    pub generator: &'static str,
    pub identity: String,
    pub kind: ArtifactKind,
    pub file_name: String,
    pub text: Arc<str>,
    /// Rendered during this pass rather than reused.
    pub fresh: bool,
}

/// A rendered pattern referenced placeholders the descriptor has no value for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageWarning {
    pub generator: &'static str,
    pub identity: String,
    pub missing: Vec<String>,
}

/// Everything a pass produced.
#[derive(Debug, Clone, Default)]
pub struct PassReport {
    /// Sorted by generator name, then identity.
    pub outputs: Vec<GeneratedSource>,
    pub stats: PassStats,
    pub warnings: Vec<CoverageWarning>,
}

impl PassReport {
    /// Outputs rendered during this pass.
    pub fn fresh(&self) -> impl Iterator<Item = &GeneratedSource> {
        self.outputs.iter().filter(|output| output.fresh)
    }

    pub fn find(&self, generator: &str, identity: &str) -> Option<&GeneratedSource> {
        self.outputs
            .iter()
            .find(|output| output.generator == generator && output.identity == identity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct ArtifactKey {
    generator: &'static str,
    identity: String,
}

#[derive(Debug, Clone)]
struct CachedArtifact {
    descriptor: Descriptor,
    file_name: String,
    text: Arc<str>,
    fresh: bool,
}

struct RenderJob {
    generator: usize,
    key: ArtifactKey,
    descriptor: Descriptor,
}

struct Rendered {
    key: ArtifactKey,
    artifact: CachedArtifact,
    warning: Option<CoverageWarning>,
}

/// Drives generators over candidates and caches their output between passes.
pub struct IncrementalGenerator {
    generators: Vec<Box<dyn Generator>>,
    options: GeneratorOptions,
    config: PipelineConfig,
    registry: Arc<PatternRegistry>,
    cache: FxHashMap<ArtifactKey, CachedArtifact>,
    /// Options fingerprint the cache was filled under.
    cache_fingerprint: Option<ArtifactHash>,
    passes: u64,
}

impl std::fmt::Debug for IncrementalGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.generators.iter().map(|g| g.name()).collect();
        f.debug_struct("IncrementalGenerator")
            .field("generators", &names)
            .field("options", &self.options)
            .field("config", &self.config)
            .field("cached", &self.cache.len())
            .field("passes", &self.passes)
            .finish()
    }
}

impl IncrementalGenerator {
    /// Create a pipeline with no generators registered.
    pub fn new(options: GeneratorOptions, config: PipelineConfig) -> Self {
        Self {
            generators: Vec::new(),
            options,
            config,
            registry: Arc::new(PatternRegistry::new()),
            cache: FxHashMap::default(),
            cache_fingerprint: None,
            passes: 0,
        }
    }

    /// Create a pipeline with the holder, value-object and sequence generators.
    pub fn with_default_generators(options: GeneratorOptions, config: PipelineConfig) -> Self {
        let mut pipeline = Self::new(options, config);
        pipeline.generators = default_generators();
        pipeline
    }

    /// Share a pattern registry with other pipelines.
    pub fn with_registry(mut self, registry: Arc<PatternRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Add a generator. Names must be unique within a pipeline.
    pub fn register(&mut self, generator: Box<dyn Generator>) -> Result<(), GenerationError> {
        let name = generator.name();
        if self.generators.iter().any(|g| g.name() == name) {
            return Err(GenerationError::DuplicateGenerator { name });
        }
        self.generators.push(generator);
        Ok(())
    }

    pub fn generator_names(&self) -> Vec<&'static str> {
        self.generators.iter().map(|g| g.name()).collect()
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Replace the options. If they differ from the ones the cache was
    /// filled under, the next pass regenerates everything.
    pub fn set_options(&mut self, options: GeneratorOptions) {
        self.options = options;
    }

    pub fn config(&self) -> PipelineConfig {
        self.config
    }

    pub fn registry(&self) -> &Arc<PatternRegistry> {
        &self.registry
    }

    /// Text cached for an artifact by the last pass.
    pub fn cached_output(&self, generator: &'static str, identity: &str) -> Option<Arc<str>> {
        self.cached(generator, identity)
            .map(|artifact| Arc::clone(&artifact.text))
    }

    /// Descriptor cached for an artifact by the last pass.
    pub fn cached_descriptor(&self, generator: &'static str, identity: &str) -> Option<&Descriptor> {
        self.cached(generator, identity)
            .map(|artifact| &artifact.descriptor)
    }

    fn cached(&self, generator: &'static str, identity: &str) -> Option<&CachedArtifact> {
        self.cache.get(&ArtifactKey {
            generator,
            identity: identity.to_string(),
        })
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn pass_count(&self) -> u64 {
        self.passes
    }

    /// Forget all cached output. The next pass renders every artifact.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.cache_fingerprint = None;
    }

    /// Run one generation pass over `candidates`.
    ///
    /// On error the cache is left as it was before the pass.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run_pass(&mut self, candidates: &[CandidateFacts]) -> Result<PassReport, GenerationError> {
        let fingerprint = self.options.fingerprint();
        let reusable = self.cache_fingerprint == Some(fingerprint);
        if !reusable && !self.cache.is_empty() {
            debug!(
                cached = self.cache.len(),
                "generator options changed, regenerating every artifact"
            );
        }

        let mut stats = PassStats {
            candidates: candidates.len(),
            ..PassStats::default()
        };

        let mut present = Vec::new();
        let mut seen = FxHashSet::default();
        for (generator, extraction) in self.extract_all(candidates) {
            let name = self.generators[generator].name();
            let descriptor = match extraction {
                Extraction::Present(descriptor) => descriptor,
                Extraction::Absent(reason) => {
                    trace!(generator = name, %reason, "candidate skipped");
                    stats.skipped += 1;
                    continue;
                }
            };

            let key = ArtifactKey {
                generator: name,
                identity: descriptor.identity().to_string(),
            };
            if !seen.insert(key.clone()) {
                return Err(GenerationError::DuplicateArtifact {
                    generator: name,
                    identity: key.identity,
                });
            }
            present.push((generator, key, descriptor));
        }

        let mut previous = std::mem::take(&mut self.cache);
        let mut next = FxHashMap::default();
        let mut jobs = Vec::new();

        for (generator, key, descriptor) in present {
            let name = key.generator;
            match previous.remove(&key) {
                Some(cached) if reusable && cached.descriptor == descriptor => {
                    debug!(generator = name, identity = %key.identity, "reusing cached output");
                    stats.reused += 1;
                    next.insert(
                        key,
                        CachedArtifact {
                            fresh: false,
                            ..cached
                        },
                    );
                }
                cached => {
                    debug!(
                        generator = name,
                        identity = %key.identity,
                        changed = cached.is_some(),
                        "rendering artifact"
                    );
                    jobs.push(RenderJob {
                        generator,
                        key,
                        descriptor,
                    });
                }
            }
        }

        let mut warnings = Vec::new();
        for rendered in self.render_all(jobs) {
            stats.generated += 1;
            if let Some(warning) = rendered.warning {
                warnings.push(warning);
            }
            next.insert(rendered.key, rendered.artifact);
        }

        stats.removed = previous.len();
        for key in previous.keys() {
            debug!(generator = key.generator, identity = %key.identity, "artifact removed");
        }

        self.cache = next;
        self.cache_fingerprint = Some(fingerprint);
        self.passes += 1;

        info!(
            pass = self.passes,
            candidates = stats.candidates,
            generated = stats.generated,
            reused = stats.reused,
            skipped = stats.skipped,
            removed = stats.removed,
            "generation pass finished"
        );

        Ok(PassReport {
            outputs: self.outputs(),
            stats,
            warnings,
        })
    }

    /// Extract descriptors for every `(generator, candidate)` pair, in
    /// candidate order then registration order.
    fn extract_all(&self, candidates: &[CandidateFacts]) -> Vec<(usize, Extraction)> {
        let generators = &self.generators;
        let options = &self.options;
        let extract = |facts: &CandidateFacts| -> Vec<(usize, Extraction)> {
            generators
                .iter()
                .enumerate()
                .map(|(index, generator)| (index, generator.extract(facts, options)))
                .collect()
        };

        if self.config.parallel {
            candidates.par_iter().flat_map_iter(extract).collect()
        } else {
            candidates.iter().flat_map(extract).collect()
        }
    }

    fn render_all(&self, jobs: Vec<RenderJob>) -> Vec<Rendered> {
        if self.config.parallel {
            jobs.into_par_iter().map(|job| self.render(job)).collect()
        } else {
            jobs.into_iter().map(|job| self.render(job)).collect()
        }
    }

    fn render(&self, job: RenderJob) -> Rendered {
        let generator = &self.generators[job.generator];
        let formatter = self.options.formatter();
        let pattern = generator.pattern(&job.descriptor);

        let warning = if self.config.validate_coverage {
            let coverage = self
                .registry
                .coverage(pattern, formatter, job.descriptor.substitutions());
            if coverage.missing.is_empty() {
                None
            } else {
                let missing: Vec<String> =
                    coverage.missing.iter().map(|p| p.name.clone()).collect();
                let locations: Vec<String> =
                    coverage.missing.iter().map(ToString::to_string).collect();
                warn!(
                    generator = job.key.generator,
                    identity = %job.key.identity,
                    missing = %locations.join(", "),
                    "pattern references placeholders without a value"
                );
                Some(CoverageWarning {
                    generator: job.key.generator,
                    identity: job.key.identity.clone(),
                    missing,
                })
            }
        } else {
            None
        };

        let text: Arc<str> = formatter.format(pattern, job.descriptor.substitutions()).into();
        let file_name = generator.file_name(&job.descriptor);

        Rendered {
            key: job.key,
            artifact: CachedArtifact {
                descriptor: job.descriptor,
                file_name,
                text,
                fresh: true,
            },
            warning,
        }
    }

    fn outputs(&self) -> Vec<GeneratedSource> {
        let mut keys: Vec<_> = self.cache.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                let artifact = &self.cache[key];
                GeneratedSource {
                    generator: key.generator,
                    identity: key.identity.clone(),
                    kind: artifact.descriptor.kind(),
                    file_name: artifact.file_name.clone(),
                    text: Arc::clone(&artifact.text),
                    fresh: artifact.fresh,
                }
            })
            .collect()
    }
}
