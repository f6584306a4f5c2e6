//! Command-line interface implementation for weft.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for weft.
#[derive(Parser, Debug)]
#[command(author, version, about = "weft: template-driven file tree generator with remote embeds", long_about = None)]
pub struct Args {
    /// Path to the input template file or directory; with --remote,
    /// the path inside the remote repository
    #[arg(value_name = "INPUT_PATH")]
    pub input_path: PathBuf,

    /// Directory where the rendered tree will be written
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// JSON object with the data templates are rendered against
    #[arg(value_name = "JSON_DATA")]
    pub data: String,

    /// Git token enabling the embed and import template functions.
    /// Without it both functions fail with a credential error.
    #[arg(short = 't', long = "git-token", env = "GIT_TOKEN")]
    pub git_token: Option<String>,

    /// Branch checked out when a reference carries no revision
    #[arg(short, long, default_value = "main")]
    pub branch: String,

    /// Remote repository to render from instead of a local input path.
    /// (example: github.com/owner/repo@ref)
    #[arg(short, long)]
    pub remote: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
