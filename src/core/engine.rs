// src/core/engine.rs
use crate::config::{MisparConfig, ResolvedConfig};
use crate::core::aggregator::{aggregate, WordSet};
use crate::core::grouper::GroupIndex;
use crate::core::types::LexiconId;
use crate::errors::PipelineError;
use crate::loader::load_lexicon;
use crate::persistence::OutputSet;
use std::path::PathBuf;
use tracing::info;

pub const DIACRITICS_DOCUMENT: &str = "diacritics";
pub const WORDS_DOCUMENT: &str = "words";

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub entries: usize,
    pub words: usize,
    pub files: Vec<PathBuf>,
}

/// Strip -> encode -> classify -> aggregate -> group, driven by one
/// validated configuration.
#[derive(Debug)]
pub struct Pipeline {
    config: ResolvedConfig,
}

impl Pipeline {
    pub fn new(config: ResolvedConfig) -> Self {
        Self { config }
    }

    pub fn from_config(config: &MisparConfig) -> Result<Self, PipelineError> {
        Ok(Self::new(config.resolve()?))
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Aggregates `(id, spelling)` records into the word set.
    pub fn build_words<I, S>(&self, records: I) -> WordSet
    where
        I: IntoIterator<Item = (LexiconId, S)>,
        S: AsRef<str>,
    {
        let words = aggregate(records, &self.config.registry, self.config.modulus);
        info!(
            entries = words.entries().len(),
            words = words.len(),
            base = %self.config.modulus,
            "aggregated words"
        );
        words
    }

    /// One index per selected scheme, in selection order.
    pub fn group<'w>(&self, words: &'w WordSet) -> Vec<GroupIndex<'w>> {
        self.config
            .registry
            .iter()
            .map(|scheme| {
                let index = GroupIndex::build(words, scheme.name());
                info!(scheme = scheme.name(), letters = index.letters().count(), "grouped words");
                index
            })
            .collect()
    }

    /// Stages every output document for every configured format.
    pub fn stage_outputs(
        &self,
        words: &WordSet,
        indices: &[GroupIndex<'_>],
    ) -> Result<OutputSet, PipelineError> {
        let mut outputs = OutputSet::new(&self.config.output_dir)?;
        for &format in &self.config.formats {
            outputs.stage(DIACRITICS_DOCUMENT, format, words.entries())?;
            outputs.stage(WORDS_DOCUMENT, format, words)?;
            for index in indices {
                outputs.stage(index.scheme(), format, index)?;
            }
        }
        Ok(outputs)
    }

    /// Load, transform and write. Outputs are only moved into place once
    /// every document has been rendered and staged.
    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        let lexicon = load_lexicon(&self.config.input)?;
        let words = self.build_words(lexicon);
        let indices = self.group(&words);
        let outputs = self.stage_outputs(&words, &indices)?;
        let files = outputs.commit()?;
        info!(files = files.len(), dir = %self.config.output_dir.display(), "wrote outputs");
        Ok(RunSummary { entries: words.entries().len(), words: words.len(), files })
    }
}
