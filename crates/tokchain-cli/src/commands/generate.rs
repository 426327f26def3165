use std::io::Write;

use rand::{SeedableRng, rngs::StdRng};
use tokchain::{
    chain::{Chain, Crc32Hasher, GenerateOptions},
    errors::TokchainError,
    tokenizer::Token,
};

use crate::{
    input_output::OutputArgs,
    logging::LogArgs,
    model_options::{PresetArgs, Weighting},
};

/// Args for the generate command.
#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// The trained model.
    #[arg(long)]
    model: String,

    #[clap(flatten)]
    pub logging: LogArgs,

    #[clap(flatten)]
    preset: PresetArgs,

    /// Number of texts to generate.
    #[arg(long, default_value = "1")]
    count: usize,

    /// Stop each text after this many tokens.
    #[arg(long)]
    max_length: Option<usize>,

    /// Start each text from this prompt; it is echoed before the generated part.
    #[arg(long)]
    prompt: Option<String>,

    /// Seed the random source, for reproducible output.
    #[arg(long)]
    rng_seed: Option<u64>,

    /// Override the stored order weighting.
    #[arg(long, value_enum)]
    weighting: Option<Weighting>,

    /// Attempts per text when generation dead-ends.
    #[arg(long, default_value = "3")]
    retries: usize,

    #[command(flatten)]
    output: OutputArgs,
}

impl GenerateArgs {
    /// Run the generate command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let tokenizer = self.preset.preset.tokenizer()?;
        let mut chain = Chain::load(&self.model, tokenizer.clone(), Crc32Hasher)?;
        if let Some(weighting) = self.weighting {
            chain.set_weighting(weighting.into());
        }

        let mut rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let prompt = self
            .prompt
            .as_deref()
            .map(|text| chain.seed_from_text(text))
            .unwrap_or_default();

        let mut options = GenerateOptions::default().with_seed(prompt.clone());
        options.max_length = self.max_length;

        let mut writer = self.output.open_writer()?;
        for _ in 0..self.count {
            let Some(tokens) = self.generate_one(&chain, &options, &mut rng)? else {
                continue;
            };

            let text = tokenizer.join(prompt.iter().chain(tokens.iter()));
            writeln!(writer, "{text}")?;
        }
        writer.flush()?;

        Ok(())
    }

    fn generate_one(
        &self,
        chain: &Chain,
        options: &GenerateOptions,
        rng: &mut StdRng,
    ) -> Result<Option<Vec<Token>>, TokchainError> {
        for attempt in 1..=self.retries.max(1) {
            match chain.generate_tokens(options.clone(), rng) {
                Ok(tokens) => return Ok(Some(tokens)),
                Err(TokchainError::NoCandidates { context }) => {
                    log::warn!("attempt {attempt}: dead end at {context:?}");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(None)
    }
}
