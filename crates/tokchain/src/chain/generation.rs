//! # Generation

use rand::Rng;

use crate::{
    chain::{Chain, ContextHasher},
    errors::{TCResult, TokchainError},
    tokenizer::{START_TOKEN, Token},
    weighted::weighted_choice,
};

/// Options for one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    /// The initial window; `None` or empty means `[Start]`.
    pub seed: Option<Vec<Token>>,

    /// Stop after this many tokens have been yielded.
    pub max_length: Option<usize>,
}

impl GenerateOptions {
    /// Set the seed window.
    pub fn with_seed(
        self,
        seed: Vec<Token>,
    ) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Set the length bound.
    pub fn with_max_length(
        self,
        max_length: usize,
    ) -> Self {
        Self {
            max_length: Some(max_length),
            ..self
        }
    }

    /// The effective seed window.
    pub fn seed_tokens(&self) -> Vec<Token> {
        match &self.seed {
            Some(seed) if !seed.is_empty() => seed.clone(),
            _ => vec![START_TOKEN.clone()],
        }
    }
}

/// A lazy, pull-based generation run over a trained [`Chain`].
///
/// Yields content tokens only. The run ends when the End sentinel is drawn,
/// when `max_length` tokens have been yielded, or after yielding one
/// [`TokchainError::NoCandidates`] error for a window the chain has never
/// seen. The chain itself is only read.
///
/// [`Generation::restart`] rewinds to the seed; the random source carries on.
pub struct Generation<'c, H: ContextHasher, R: Rng> {
    chain: &'c Chain<H>,
    rng: R,
    seed: Vec<Token>,
    window: Vec<Token>,
    max_length: Option<usize>,
    produced: usize,
    done: bool,
}

impl<'c, H: ContextHasher, R: Rng> Generation<'c, H, R> {
    pub(crate) fn new(
        chain: &'c Chain<H>,
        options: GenerateOptions,
        rng: R,
    ) -> Self {
        let seed = options.seed_tokens();
        Self {
            chain,
            rng,
            window: seed.clone(),
            seed,
            max_length: options.max_length,
            produced: 0,
            done: false,
        }
    }

    /// The current context window, oldest first.
    pub fn window(&self) -> &[Token] {
        &self.window
    }

    /// Number of tokens yielded so far.
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Rewind to the seed window.
    pub fn restart(&mut self) {
        self.window = self.seed.clone();
        self.produced = 0;
        self.done = false;
    }

    fn push(
        &mut self,
        token: Token,
    ) {
        self.window.push(token);
        let order = self.chain.options().order;
        if self.window.len() > order {
            let excess = self.window.len() - order;
            self.window.drain(..excess);
        }
    }

    fn step(&mut self) -> TCResult<Token> {
        let candidates = self.chain.candidates(&self.window);
        if candidates.is_empty() {
            let order = self.chain.options().order;
            let start = self.window.len().saturating_sub(order);
            let context = self.window[start..]
                .iter()
                .map(|t| t.text().to_string())
                .collect::<Vec<_>>();
            log::warn!("generation dead end at {context:?}");
            return Err(TokchainError::NoCandidates { context });
        }
        let picked = weighted_choice(&candidates, &mut self.rng)?;
        Ok(self.chain.tokenizer().token_of(picked))
    }
}

impl<H: ContextHasher, R: Rng> Iterator for Generation<'_, H, R> {
    type Item = TCResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }
            if self.max_length.is_some_and(|max| self.produced >= max) {
                log::debug!("generation reached max length {}", self.produced);
                self.done = true;
                return None;
            }

            let token = match self.step() {
                Ok(token) => token,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            };
            self.push(token.clone());

            if token.is_end() {
                log::debug!("generation ended after {} tokens", self.produced);
                self.done = true;
                return None;
            }
            if token.is_sentinel() {
                // consumed as context only.
                continue;
            }

            log::trace!("generated {:?} ({})", token.text(), token.tag());
            self.produced += 1;
            return Some(Ok(token));
        }
    }
}
