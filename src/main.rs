use clap::{Parser, Subcommand};
use hlwm_compose::config::{self, ComposeConfig, ConfigError};
use hlwm_compose::{clock, compose, output};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hlwm-compose")]
#[command(about = "Wrap a content fragment in the herbstluftwm website shell")]
#[command(long_about = "\
Wrap a content fragment in the herbstluftwm website shell

Reads <page>-content.html and writes the finished page (header, tab bar,
sub-page bar, fragment, footer) to stdout:

  hlwm-compose faq-content.html > faq.html

The page key (`faq`) must appear in the site map. The built-in site map
can be replaced with a compose.toml; run 'hlwm-compose gen-config' for a
documented starting point.

Diagnostics go to stderr; set RUST_LOG=debug for details.")]
#[command(version)]
#[command(subcommand_negates_reqs = true)]
struct Cli {
    /// Content fragment to compose, named `<page>-content.html`
    #[arg(required = true, value_name = "FRAGMENT")]
    fragment: Option<PathBuf>,

    /// Write the page to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Configuration file [default: compose.toml, if present]
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the configuration and print the site map
    Check,
    /// Print a stock compose.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Some(Command::Check) => {
            let config = load_config(cli.config.as_deref())?;
            output::print_check_output(&config);
        }
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
        }
        None => {
            let fragment = cli.fragment.ok_or("no fragment given")?;
            let config = load_config(cli.config.as_deref())?;
            let now = clock::now();
            let document = compose::compose(&config, &fragment, &now)?;

            match &cli.output {
                Some(path) => {
                    let mut bytes = document.into_bytes();
                    bytes.push(b'\n');
                    std::fs::write(path, bytes)?;
                    info!(path = %path.display(), "wrote page");
                    println!("{}", output::format_written(&fragment, path));
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    document.write_to(&mut stdout)?;
                    writeln!(stdout)?;
                    stdout.flush()?;
                }
            }
        }
    }

    Ok(())
}

/// Log to stderr; stdout is reserved for the composed page.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Explicit `--config` must exist; the implicit `compose.toml` is optional.
fn load_config(path: Option<&Path>) -> Result<ComposeConfig, ConfigError> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            config::load_required_config(path)
        }
        None => config::load_config(Path::new(config::DEFAULT_CONFIG_FILE)),
    }
}
