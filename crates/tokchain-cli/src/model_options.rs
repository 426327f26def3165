use std::sync::Arc;

use tokchain::{
    chain::{ContextCase, OrderWeighting},
    errors::TCResult,
    tokenizer::{Tokenizer, presets},
};

/// Tokenizer presets.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum Preset {
    /// Words and punctuation.
    #[default]
    SimpleEnglish,

    /// Words, punctuation, links, inline code and emphasis.
    MarkdownAware,
}

impl Preset {
    /// Build the preset tokenizer.
    pub fn tokenizer(self) -> TCResult<Arc<Tokenizer>> {
        let tokenizer = match self {
            Preset::SimpleEnglish => presets::simple_english()?,
            Preset::MarkdownAware => presets::markdown_aware()?,
        };
        Ok(Arc::new(tokenizer))
    }
}

/// Order weighting choices.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum Weighting {
    /// Every order contributes its raw counts.
    #[default]
    Uniform,

    /// Longer contexts count more.
    ByOrder,
}

impl From<Weighting> for OrderWeighting {
    fn from(weighting: Weighting) -> Self {
        match weighting {
            Weighting::Uniform => OrderWeighting::Uniform,
            Weighting::ByOrder => OrderWeighting::ByOrder,
        }
    }
}

/// Context case choices.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ContextCaseArg {
    /// Lower-case contexts before hashing.
    #[default]
    Folded,

    /// Hash contexts as written.
    Verbatim,
}

impl From<ContextCaseArg> for ContextCase {
    fn from(case: ContextCaseArg) -> Self {
        match case {
            ContextCaseArg::Folded => ContextCase::Folded,
            ContextCaseArg::Verbatim => ContextCase::Verbatim,
        }
    }
}

/// Tokenizer selection arg group; must match between train and generate.
#[derive(clap::Args, Debug)]
pub struct PresetArgs {
    /// Tokenizer preset.
    #[arg(long, value_enum, default_value_t = Preset::SimpleEnglish)]
    pub preset: Preset,
}
