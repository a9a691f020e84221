use anyhow::Context;
use api_mock::{demo_registry, MockConfig, MockFactory, MockValue};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "mockgen")]
#[command(about = "Generate mock instances of the demo API types")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered types and their fields
    Types,

    /// Generate mock instances of a type as JSON
    Generate {
        /// Registered type name, e.g. Hotel
        type_name: String,

        /// Number of instances
        #[arg(long, default_value_t = 1)]
        count: usize,

        #[command(flatten)]
        synthesis: SynthesisArgs,
    },

    /// Print the synthesized property map of a type as JSON
    Fields {
        /// Registered type name, e.g. Booking
        type_name: String,

        #[command(flatten)]
        synthesis: SynthesisArgs,
    },
}

#[derive(Args)]
struct SynthesisArgs {
    /// Nesting budget (defaults to the configured nested_count)
    #[arg(long)]
    depth: Option<i32>,

    /// Seed for reproducible output
    #[arg(long, env = "MOCKGEN_SEED")]
    seed: Option<u64>,

    /// Engine configuration file (YAML, or TOML by extension)
    #[arg(long, env = "MOCKGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,
}

impl SynthesisArgs {
    fn factory(&self) -> anyhow::Result<MockFactory> {
        let mut config = match &self.config {
            Some(path) => {
                let config = MockConfig::from_file(path)
                    .with_context(|| format!("Failed to load mock config from {path:?}"))?;
                info!("Loaded mock config from {path:?}");
                config
            }
            None => MockConfig::default(),
        };
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        MockFactory::with_config(demo_registry(), config)
            .context("Failed to apply mock config")
    }

    fn print<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        println!("{json}");
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Types => {
            for handle in demo_registry().known_types() {
                let descriptor = handle.descriptor();
                let marker = if descriptor.response_envelope {
                    " (envelope)"
                } else {
                    ""
                };
                println!("{}{marker}", handle.name());
                for field in &descriptor.fields {
                    println!("  {}: {}", field.name, field.shape);
                }
            }
        }
        Commands::Generate {
            type_name,
            count,
            synthesis,
        } => {
            let factory = synthesis.factory()?;
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                let value = factory
                    .create_mock_value_by_name(&type_name, synthesis.depth)
                    .with_context(|| format!("Failed to generate {type_name}"))?;
                values.push(value);
            }
            if values.len() == 1 {
                synthesis.print(&values[0])?;
            } else {
                synthesis.print(&MockValue::Array(values))?;
            }
        }
        Commands::Fields {
            type_name,
            synthesis,
        } => {
            let factory = synthesis.factory()?;
            let fields = factory
                .property_value_map_by_name(&type_name, synthesis.depth)
                .with_context(|| format!("Failed to map fields of {type_name}"))?;
            synthesis.print(&fields)?;
        }
    }

    Ok(())
}
