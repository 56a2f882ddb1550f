use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use threepoint::services::beta_pert_sampler::DEFAULT_LAMBDA;
use threepoint::services::sample_output::OutputFormat;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Draw samples from a triangular distribution
    Triangular {
        #[command(flatten)]
        sample: SampleArgs,
    },
    /// Draw samples from a PERT (Beta) distribution
    Pert {
        #[command(flatten)]
        sample: SampleArgs,
        /// Concentration around the most likely value
        #[arg(short, long, default_value_t = DEFAULT_LAMBDA, allow_hyphen_values = true)]
        lambda: f64,
        /// Comma-separated points at which to report the density
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        density_at: Vec<f64>,
    },
    /// Sample every variable of a YAML sampling plan
    Run {
        /// Sampling plan YAML file
        #[arg(short, long)]
        input: String,
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct SampleArgs {
    /// Bounds as min,max or min,most_likely,max; one value is a constant
    #[arg(
        short,
        long,
        required = true,
        value_delimiter = ',',
        allow_hyphen_values = true
    )]
    pub bounds: Vec<f64>,
    /// Output shape; a single value n means n x n
    #[arg(short, long, value_delimiter = ',', default_value = "1,1")]
    pub shape: Vec<usize>,
    /// Force the first sample to the most likely value
    #[arg(short, long)]
    pub mode_first: bool,
    /// Seed for reproducible samples
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output file, stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}
