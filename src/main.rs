use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use twofold::compress::{self, Mode};
use twofold::imaging::{Quality, RustBackend};
use twofold::site::Site;
use twofold::{config, output};

#[derive(Parser)]
#[command(name = "twofold")]
#[command(about = "Site data and asset tools for a static travel log")]
#[command(long_about = "\
Site data and asset tools for a static travel log

Places and visits are markdown files with YAML front-matter. twofold turns
them into the collections the site templates render from.

Project structure:

  .
  ├── config.toml                     # Optional, sparse over the defaults
  ├── assets/                         # Images, compressed by `twofold compress`
  └── src/
      ├── places/
      │   └── cafe-central.md         # title, slug, location.city
      ├── visits/
      │   └── 2024-01-05-cafe-central.md  # date, place, ratings
      └── _data/                      # Written by `twofold build`

Run 'twofold gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Project root (holds config.toml, src/ and assets/)
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Log per-file progress
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build collections and write site-data.json and years.json
    Build,
    /// Validate content without writing anything
    Check,
    /// Print the year index as JSON
    Years,
    /// Compress images in the assets directory in place
    Compress {
        /// Only compress images staged in git (for a pre-commit hook)
        #[arg(long)]
        staged: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build => {
            let site = Site::load(&cli.root)?;
            let summary = site.build()?;
            output::print_build_output(&summary, &cli.root);
        }
        Command::Check => {
            let site = Site::load(&cli.root)?;
            let findings = site.check()?;
            output::print_check_output(&findings);
        }
        Command::Years => {
            let site = Site::load(&cli.root)?;
            let years = twofold::years::year_index(&site.content);
            println!("{}", serde_json::to_string_pretty(&years)?);
        }
        Command::Compress { staged } => {
            let config = config::load_config(&cli.root)?.compress;
            let mode = if staged { Mode::Staged } else { Mode::All };
            let files = compress::select_images(&cli.root, &config, mode)?;

            output::print_compress_start(files.len(), config.quality, mode);
            if !files.is_empty() {
                let report = compress::compress_images(
                    &RustBackend::new(),
                    &files,
                    &cli.root.join(&config.assets_dir),
                    Quality::new(config.quality),
                );
                output::print_compress_report(&report, mode);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
