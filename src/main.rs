use catalog_pages::{config, generate, observability, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "catalog-pages")]
#[command(about = "Static product pages, sitemap and redirects from a JSON catalog")]
#[command(long_about = "\
Static product pages, sitemap and redirects from a JSON catalog

Run from the site root (or pass --root). The catalog is read from
data/products.json and every record with a slug gets a page.

Site layout:

  ./
  ├── site.toml                    # Optional config (see gen-config)
  ├── data/
  │   └── products.json            # Input catalog
  ├── products/
  │   └── <slug>/index.html        # Generated product pages
  ├── sitemap.xml                  # Generated: fixed pages + products
  └── _redirects                   # Generated: /<slug> short links

Records without a slug are skipped. Set RUST_LOG=debug to see every file
written.

Run 'catalog-pages gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Site root containing data/products.json
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate product pages, sitemap.xml and _redirects (default)
    Build,
    /// Validate the catalog and list what would be generated
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    observability::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let site_config = config::load_config(&cli.root)?;
            init_thread_pool(&site_config.processing);
            let report = generate::generate(&cli.root, &site_config)?;
            output::print_generate_output(&report);
        }
        Command::Check => {
            let site_config = config::load_config(&cli.root)?;
            println!("==> Checking {}", cli.root.display());
            let report = generate::check(&cli.root, &site_config)?;
            output::print_check_output(&report);
            println!("==> Catalog is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
