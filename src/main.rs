use clap::{Parser, Subcommand};
use sitemapper::{config, generate, output, store};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sitemapper")]
#[command(about = "XML sitemap generator for CMS content trees")]
#[command(long_about = "\
XML sitemap generator for CMS content trees

Walks a content tree once per configured site access and writes one
sitemaps.org XML file per access, localized to that access's locale and
base URL.

Settings structure:

  settings/
  ├── config.toml                  # Root settings (required keys live here)
  └── siteaccess/
      ├── eng/config.toml          # Per-access overlay: locale, URL override
      └── ger/config.toml

Content structure:

  content/
  ├── node.toml                    # Content root node
  ├── products/
  │   ├── node.toml                # One descriptor per node; subdirectories
  │   │                            # with a descriptor are children
  │   └── widget/
  │       └── node.toml
  └── about/
      └── node.toml

Output files are named {path}{filename}_{access}{suffix}, e.g.
var/sitemaps/sitemap_eng.xml.

Run 'sitemapper gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Settings directory (config.toml plus siteaccess/ overlays)
    #[arg(long, default_value = "settings", global = true)]
    settings: PathBuf,

    /// Content tree directory
    #[arg(long, default_value = "content", global = true)]
    content: PathBuf,

    /// Suppress progress output
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one sitemap file per configured site access
    Generate,
    /// Validate settings and content tree without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate => {
            let settings = config::Settings::load(&cli.settings)?;
            let tree = store::FsStore::open(&cli.content)?;
            let quiet = cli.quiet;
            let reports = generate::generate(&settings, &tree, Path::new("."), |event| {
                if !quiet {
                    output::print_generate_event(&event);
                }
            })?;
            if !quiet {
                println!("{}", output::format_generate_summary(&reports));
            }
        }
        Command::Check => {
            let settings = config::Settings::load(&cli.settings)?;
            let tree = store::FsStore::open(&cli.content)?;
            let reports = generate::check(&settings, &tree)?;
            output::print_check_output(&reports);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
