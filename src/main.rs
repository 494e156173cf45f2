use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use variant_changelog::cli::{self, GenerateArgs, LastTagArgs};
use variant_changelog::config;
use variant_changelog::ui;

#[derive(clap::Parser)]
#[command(
    name = "variant-changelog",
    version,
    about = "Generate changelogs between build tags of a build variant"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = ".",
        help = "Path inside the git repository"
    )]
    repo: PathBuf,

    #[arg(long, global = true, help = "Enable debug logging")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate the changelog for the build described by a tag record
    Generate {
        #[arg(short, long, help = "Build tag record of the current build")]
        tag_file: PathBuf,

        #[arg(short, long, help = "Variant to compare against (defaults to the record's)")]
        variant: Option<String>,

        #[arg(short, long, help = "Write the changelog to this file")]
        output: Option<PathBuf>,

        #[arg(long, help = "Maximum changelog length in characters")]
        max_length: Option<usize>,
    },
    /// Show the most recent build tag of a variant
    LastTag {
        #[arg(short, long, help = "Build variant name")]
        variant: String,

        #[arg(short, long, help = "Write the tag record to this file")]
        output: Option<PathBuf>,
    },
}

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("variant_changelog")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logger(args.debug)?;

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    match args.command {
        Command::Generate {
            tag_file,
            variant,
            output,
            max_length,
        } => {
            let generate_args = GenerateArgs {
                repo: args.repo,
                tag_file,
                variant,
                output,
                max_length,
            };

            let result = match cli::run_generate(&generate_args, &config) {
                Ok(result) => result,
                Err(e) => {
                    ui::display_error(&format!("{:#}", e));
                    std::process::exit(1);
                }
            };

            if let Some(notice) = &result.notice {
                ui::display_notice(notice);
            }
            match (&result.changelog, &result.written_to) {
                (Some(_), Some(path)) => {
                    ui::display_success(&format!("Changelog written to {}", path.display()))
                }
                (Some(changelog), None) => ui::display_changelog(changelog),
                (None, _) => ui::display_status("No changelog generated"),
            }
        }
        Command::LastTag { variant, output } => {
            let last_tag_args = LastTagArgs {
                repo: args.repo,
                variant,
                output,
            };

            match cli::run_last_tag(&last_tag_args, &config) {
                Ok(Some(tag)) => {
                    ui::display_build_tag(&tag);
                    if let Some(path) = &last_tag_args.output {
                        ui::display_success(&format!("Tag record written to {}", path.display()));
                    }
                }
                Ok(None) => {
                    ui::display_status(&format!(
                        "No build tags found for variant '{}'",
                        last_tag_args.variant
                    ));
                }
                Err(e) => {
                    ui::display_error(&format!("{:#}", e));
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
