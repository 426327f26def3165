//! # Chain

use std::{path::Path, sync::Arc};

use compact_str::CompactString;
use rand::Rng;

use crate::{
    chain::{
        ChainOptions, ContextCase, ContextHasher, ContextTable, Crc32Hasher, GenerateOptions,
        Generation, OrderWeighting,
    },
    errors::TCResult,
    tokenizer::{END_TOKEN, START_TOKEN, Token, Tokenizer},
    types::ContextHash,
    weighted::{CountMap, merge_scaled_count_maps},
};

/// A tokenizing, hashed, order-`N` n-gram model.
///
/// Training records, for every position of a Start/End framed token
/// sequence and every context length `1..=N` before it, one observation of
/// the token at that position. Generation merges the candidates of every
/// known context length ending at the current window and samples from them.
///
/// A trained chain is only read by generation, so it may be shared across
/// threads for concurrent generation; training takes `&mut self`.
///
/// ## Style Hints
///
/// Instance names should prefer `chain`.
#[derive(Debug, Clone)]
pub struct Chain<H: ContextHasher = Crc32Hasher> {
    tokenizer: Arc<Tokenizer>,
    hasher: H,
    table: ContextTable,
}

impl Chain<Crc32Hasher> {
    /// Create an empty chain using the CRC-32 context hash.
    ///
    /// ## Errors
    /// Fails if `options` do not validate.
    pub fn new(
        tokenizer: Arc<Tokenizer>,
        options: ChainOptions,
    ) -> TCResult<Self> {
        Self::with_hasher(tokenizer, options, Crc32Hasher)
    }
}

impl<H: ContextHasher> Chain<H> {
    /// Create an empty chain with a custom context hasher.
    ///
    /// ## Errors
    /// Fails if `options` do not validate.
    pub fn with_hasher(
        tokenizer: Arc<Tokenizer>,
        options: ChainOptions,
        hasher: H,
    ) -> TCResult<Self> {
        Ok(Self::from_table(
            tokenizer,
            ContextTable::new(options)?,
            hasher,
        ))
    }

    /// Wrap an existing table.
    ///
    /// The table must have been built with the same tokenizer and hasher.
    pub fn from_table(
        tokenizer: Arc<Tokenizer>,
        table: ContextTable,
        hasher: H,
    ) -> Self {
        Self {
            tokenizer,
            hasher,
            table,
        }
    }

    /// The tokenizer.
    pub fn tokenizer(&self) -> &Arc<Tokenizer> {
        &self.tokenizer
    }

    /// The context hasher.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// The options.
    pub fn options(&self) -> &ChainOptions {
        self.table.options()
    }

    /// The trained table.
    pub fn table(&self) -> &ContextTable {
        &self.table
    }

    /// Change the generation weighting of a trained chain.
    pub fn set_weighting(
        &mut self,
        weighting: OrderWeighting,
    ) {
        self.table.set_weighting(weighting);
    }

    /// The key of a context: the hash of its concatenated token texts.
    pub fn context_key(
        &self,
        context: &[Token],
    ) -> ContextHash {
        Self::key_of(&self.hasher, self.options().context_case, context)
    }

    fn key_of(
        hasher: &H,
        context_case: ContextCase,
        context: &[Token],
    ) -> ContextHash {
        let mut text = String::new();
        for token in context {
            text.push_str(token.text());
        }
        if context_case == ContextCase::Folded {
            text = text.to_lowercase();
        }
        hasher.hash_context(text.as_bytes())
    }

    /// Tokenize `text` and frame it with the Start/End sentinels.
    pub fn frame(
        &self,
        text: &str,
    ) -> Vec<Token> {
        Self::frame_tokens(self.tokenizer.tokenize(text))
    }

    fn frame_tokens(content: Vec<Token>) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(content.len() + 2);
        tokens.push(START_TOKEN.clone());
        tokens.extend(content);
        tokens.push(END_TOKEN.clone());
        tokens
    }

    /// A generation seed: the Start sentinel followed by the tokens of `text`.
    pub fn seed_from_text(
        &self,
        text: &str,
    ) -> Vec<Token> {
        let mut seed = vec![START_TOKEN.clone()];
        seed.extend(self.tokenizer.tokenize(text));
        seed
    }

    /// Train on one text sample.
    ///
    /// Returns the number of observations recorded. Samples without any
    /// content token are skipped: no bare `Start -> End` transition is
    /// recorded for them, so an unbounded generation from `[Start]` never
    /// yields empty output. Counting empty samples would instead make empty
    /// output as likely as their share of the corpus.
    pub fn train(
        &mut self,
        text: &str,
    ) -> usize {
        let tokens = self.tokenizer.tokenize(text);
        self.train_tokens(tokens)
    }

    /// Train on one already-tokenized sample of content tokens.
    ///
    /// The sentinels are added here.
    pub fn train_tokens(
        &mut self,
        content: Vec<Token>,
    ) -> usize {
        if content.is_empty() {
            log::debug!("skipping empty sample");
            return 0;
        }
        let tokens = Self::frame_tokens(content);
        let observed = Self::record(&self.hasher, &mut self.table, &tokens);
        log::debug!(
            "trained {} tokens, {} observations",
            tokens.len(),
            observed
        );
        observed
    }

    /// Record every `(context, next)` observation of a framed sequence.
    fn record(
        hasher: &H,
        table: &mut ContextTable,
        tokens: &[Token],
    ) -> usize {
        let ChainOptions {
            order,
            context_case,
            ..
        } = *table.options();
        let mut observed = 0;
        for x in 1..tokens.len() {
            let next = tokens[x].text();
            for y in 1..=order.min(x) {
                let key = Self::key_of(hasher, context_case, &tokens[x - y..x]);
                table.increment(key, next);
                observed += 1;
            }
        }
        observed
    }

    /// Train on every sample in turn.
    ///
    /// Returns the number of samples trained.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, samples)))]
    pub fn train_samples<I, S>(
        &mut self,
        samples: I,
    ) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trained = 0;
        let mut observed = 0;
        for sample in samples {
            let count = self.train(sample.as_ref());
            if count > 0 {
                trained += 1;
                observed += count;
            }
        }
        log::info!(
            "trained {} samples: {} observations, {} contexts",
            trained,
            observed,
            self.table.context_count()
        );
        trained
    }

    /// Train on samples in parallel.
    ///
    /// Each rayon worker fills a partial table; the partials are summed into
    /// this chain. The result equals sequential [`Chain::train_samples`].
    #[cfg(feature = "rayon")]
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, samples)))]
    pub fn train_parallel<S>(
        &mut self,
        samples: &[S],
    ) -> TCResult<usize>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        let options = *self.options();
        let (partial, trained) = samples
            .par_iter()
            .fold(
                || (ContextTable::empty(options), 0usize),
                |(mut table, trained), sample| {
                    let content = self.tokenizer.tokenize(sample.as_ref());
                    if content.is_empty() {
                        return (table, trained);
                    }
                    let tokens = Self::frame_tokens(content);
                    Self::record(&self.hasher, &mut table, &tokens);
                    (table, trained + 1)
                },
            )
            .map(Ok)
            .reduce(
                || Ok((ContextTable::empty(options), 0usize)),
                |a: TCResult<(ContextTable, usize)>, b| {
                    let (mut table, a_count) = a?;
                    let (other, b_count) = b?;
                    table.merge_owned(other)?;
                    Ok((table, a_count + b_count))
                },
            )?;

        self.table.merge_owned(partial)?;
        log::info!(
            "trained {} samples in parallel: {} contexts",
            trained,
            self.table.context_count()
        );
        Ok(trained)
    }

    /// Add the counts of another chain into this one.
    ///
    /// Both chains must share a tokenizer and hasher; that is not checked.
    ///
    /// ## Errors
    /// [`TokchainError::ModelMismatch`](crate::errors::TokchainError::ModelMismatch) if the orders or context case policies differ.
    pub fn merge(
        &mut self,
        other: &Chain<H>,
    ) -> TCResult<()> {
        self.table.merge(&other.table)?;
        log::info!(
            "merged chain: {} contexts, {} observations",
            self.table.context_count(),
            self.table.observation_count()
        );
        Ok(())
    }

    /// How often `next` followed `context`.
    pub fn count(
        &self,
        context: &[Token],
        next: &str,
    ) -> u64 {
        self.table.count(self.context_key(context), next)
    }

    /// The merged next-token candidates for a window.
    ///
    /// The window is cut to its last `N` tokens; every suffix of it with a
    /// known context contributes its counts, scaled per the order weighting.
    /// Empty if no suffix is known.
    pub fn candidates(
        &self,
        window: &[Token],
    ) -> CountMap<CompactString, u64> {
        let options = self.options();
        let start = window.len().saturating_sub(options.order);
        let window = &window[start..];

        let sources = (1..=window.len())
            .filter_map(|len| {
                let key = self.context_key(&window[window.len() - len..]);
                self.table
                    .get(key)
                    .map(|counts| (counts, options.scale_for(len)))
            })
            .collect::<Vec<_>>();

        merge_scaled_count_maps(sources)
    }

    /// Number of distinct context keys.
    pub fn context_count(&self) -> usize {
        self.table.context_count()
    }

    /// Sum of all recorded observations.
    pub fn observation_count(&self) -> u64 {
        self.table.observation_count()
    }

    /// Start a lazy generation run.
    pub fn generate<R: Rng>(
        &self,
        options: GenerateOptions,
        rng: R,
    ) -> Generation<'_, H, R> {
        Generation::new(self, options, rng)
    }

    /// Run a generation to completion.
    ///
    /// ## Errors
    /// [`TokchainError::NoCandidates`](crate::errors::TokchainError::NoCandidates) when the run dead-ends.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, rng)))]
    pub fn generate_tokens<R: Rng>(
        &self,
        options: GenerateOptions,
        rng: &mut R,
    ) -> TCResult<Vec<Token>> {
        self.generate(options, rng).collect()
    }

    /// Run a generation to completion and join the result.
    ///
    /// Only generated tokens are joined; the seed is not repeated.
    pub fn generate_text<R: Rng>(
        &self,
        options: GenerateOptions,
        rng: &mut R,
    ) -> TCResult<String> {
        let tokens = self.generate_tokens(options, rng)?;
        Ok(self.tokenizer.join(&tokens))
    }

    /// Generate one unbounded text from the Start sentinel with the thread-local rng.
    pub fn babble(&self) -> TCResult<String> {
        self.generate_text(GenerateOptions::default(), &mut rand::rng())
    }

    /// Serialize the trained table.
    ///
    /// The tokenizer and hasher are not stored.
    pub fn to_bytes(&self) -> TCResult<Vec<u8>> {
        Ok(postcard::to_stdvec(&self.table)?)
    }

    /// Rebuild a chain from [`Chain::to_bytes`] output.
    ///
    /// ## Errors
    /// Fails on malformed bytes, or on stored options that do not validate.
    pub fn from_bytes(
        tokenizer: Arc<Tokenizer>,
        bytes: &[u8],
        hasher: H,
    ) -> TCResult<Self> {
        let table: ContextTable = postcard::from_bytes(bytes)?;
        table.options().validate()?;
        Ok(Self::from_table(tokenizer, table, hasher))
    }

    /// Write the trained table to `path`.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> TCResult<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), &bytes)?;
        log::info!(
            "saved chain to {}: {} contexts, {} bytes",
            path.as_ref().display(),
            self.context_count(),
            bytes.len()
        );
        Ok(())
    }

    /// Load a chain written by [`Chain::save`].
    pub fn load<P: AsRef<Path>>(
        path: P,
        tokenizer: Arc<Tokenizer>,
        hasher: H,
    ) -> TCResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let chain = Self::from_bytes(tokenizer, &bytes, hasher)?;
        log::info!(
            "loaded chain from {}: {} contexts",
            path.as_ref().display(),
            chain.context_count()
        );
        Ok(chain)
    }
}
