use std::io::BufRead;

use tokchain::chain::{Chain, ChainOptions};

use crate::{
    input_output::open_reader,
    logging::LogArgs,
    model_options::{ContextCaseArg, PresetArgs, Weighting},
};

/// Args for the train command.
#[derive(clap::Args, Debug)]
pub struct TrainArgs {
    /// Input text files; "-" reads stdin.
    #[arg(required = true)]
    files: Vec<String>,

    #[clap(flatten)]
    pub logging: LogArgs,

    #[clap(flatten)]
    preset: PresetArgs,

    /// Association order N.
    #[arg(long, default_value = "2")]
    order: usize,

    /// How context orders are weighted during generation.
    #[arg(long, value_enum, default_value_t = Weighting::Uniform)]
    weighting: Weighting,

    /// Case policy for context keys.
    #[arg(long, value_enum, default_value_t = ContextCaseArg::Folded)]
    context_case: ContextCaseArg,

    /// Train with rayon; reads every file into memory first.
    #[arg(long)]
    parallel: bool,

    /// Where to write the trained model.
    #[arg(long)]
    model: String,
}

impl TrainArgs {
    /// Run the train command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let options = ChainOptions::default()
            .with_order(self.order)
            .with_weighting(self.weighting.into())
            .with_context_case(self.context_case.into());
        let mut chain = Chain::new(self.preset.preset.tokenizer()?, options)?;

        log::info!("Reading corpus:");
        if self.parallel {
            let mut samples = Vec::new();
            for (idx, path) in self.files.iter().enumerate() {
                log::info!("{idx}: {path}");
                for line in open_reader(path)?.lines() {
                    samples.push(line?);
                }
            }
            chain.train_parallel(samples.as_slice())?;
        } else {
            for (idx, path) in self.files.iter().enumerate() {
                log::info!("{idx}: {path}");
                let lines = open_reader(path)?.lines().collect::<Result<Vec<_>, _>>()?;
                chain.train_samples(&lines);
            }
        }

        log::info!(
            "Model: {} contexts, {} observations",
            chain.context_count(),
            chain.observation_count()
        );
        chain.save(&self.model)?;

        Ok(())
    }
}
