use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tourgen::{config, generate, output, templates};

/// Path flags shared by every command; each overrides `tourgen.toml`.
#[derive(clap::Args, Clone)]
struct PathArgs {
    /// Tour dataset (JSON)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Template for index.html
    #[arg(long, global = true)]
    index_template: Option<PathBuf>,

    /// Template for each date page
    #[arg(long, global = true)]
    page_template: Option<PathBuf>,

    /// Output directory
    #[arg(long, global = true)]
    output: Option<PathBuf>,
}

impl PathArgs {
    fn overrides(&self) -> config::Overrides {
        config::Overrides {
            data: self.data.clone(),
            index_template: self.index_template.clone(),
            page_template: self.page_template.clone(),
            output_dir: self.output.clone(),
        }
    }
}

#[derive(Parser)]
#[command(name = "tourgen")]
#[command(about = "Static site generator for tour date archives")]
#[command(long_about = "\
Static site generator for tour date archives

One JSON file lists every show; two templates decide the layout. tourgen
writes an index page and one page per date.

Inputs (defaults, all relative to the working directory):

  tourgen.toml            # Optional config (see 'tourgen gen-config')
  data.json               # {\"concerts\": {YEAR: {MONTH: {DAY: concert}}}}
  index.html.template     # Macros: !Generator! !Content!
  XX.html.template        # Macros: !Generator! !DY! !DM! !DD! !Dp! !Venue! !Embed! !Setlist!

Output:

  docs/
  ├── index.html
  └── YEAR/MONTH/DAY.html

A concert is {\"venue\": text, \"setlist\": [text], \"embed\": {\"type\": \"none\"}}
or with \"embed\": {\"type\": \"iframe\", \"href\": URL}.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Only print errors
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(flatten)]
    paths: PathArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the site (default)
    Build,
    /// Render everything in memory and report problems without writing
    Check,
    /// Print a stock tourgen.toml with all options documented
    GenConfig,
    /// Write starter index and page templates
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tourgen: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(mut cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.take().unwrap_or(Command::Build) {
        Command::Build => {
            let site_config = load_site_config(&cli)?;
            let output_dir = site_config.output_dir.clone();
            let summary = generate::build(&site_config, |event| {
                if !cli.quiet {
                    output::print_generate_event(event, &output_dir);
                }
            })?;
            if !cli.quiet {
                println!("{}", output::format_summary(&summary, &output_dir));
            }
        }
        Command::Check => {
            let site_config = load_site_config(&cli)?;
            let pages = generate::check(&site_config)?;
            if !cli.quiet {
                output::print_check_output(&pages);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Init => {
            let site_config = load_site_config(&cli)?;
            templates::write_stock_templates(
                &site_config.index_template,
                &site_config.page_template,
            )?;
            if !cli.quiet {
                println!(
                    "Wrote {} and {}",
                    site_config.index_template.display(),
                    site_config.page_template.display()
                );
            }
        }
    }

    Ok(())
}

fn load_site_config(cli: &Cli) -> Result<config::SiteConfig, config::ConfigError> {
    config::load_config(&cli.config, &cli.paths.overrides())
}
