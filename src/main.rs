//! weft's main application entry point and orchestration logic.
//! Parses command-line arguments, builds the git client and the template
//! executor, and renders either a local input tree or a remote reference
//! into the output directory.

use std::sync::Arc;

use weft::{
    cli::{get_args, Args},
    error::{default_error_handler, Error, Result},
    executor::Executor,
    git::{Git2Client, SharedGitClient},
    logger::init_logger,
    reference::RemoteReference,
    remote, walker,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Decodes the JSON data argument
/// 2. Builds the git client from the token and default branch
/// 3. Builds the executor; embed/import are live only with a token
/// 4. Renders the remote reference or the local input tree
fn run(args: Args) -> Result<()> {
    let data: serde_json::Value = serde_json::from_str(&args.data)?;

    let client: SharedGitClient =
        Arc::new(Git2Client::new(args.git_token.clone(), Some(args.branch.clone())));

    if let Some(remote_ref) = args.remote {
        if args.git_token.is_none() {
            return Err(Error::MissingTokenError);
        }

        // The input path names a location inside the remote repository.
        let mut reference = RemoteReference::parse(&remote_ref)?;
        reference.path = args.input_path.to_string_lossy().into_owned();

        remote::import(&client, &args.output_dir, &reference.to_string(), ".", &data)?;
    } else {
        let mut executor = if args.git_token.is_some() {
            Executor::with_remote(client.clone(), args.output_dir.clone())
        } else {
            Executor::new()
        };

        walker::generate(&mut executor, &args.input_path, &args.output_dir, &data)?;
    }

    println!("Template generation completed successfully in {}.", args.output_dir.display());
    Ok(())
}
