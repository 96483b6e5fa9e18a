//! grafe's main application entry point.
//! Parses arguments, runs the build and optionally serves the result.

use grafe::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    logger::init_logger,
    processor::{Processor, SiteLayout},
    serve::serve_site,
    transpile::CommandTranspiler,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Builds the site under `args.root`, then serves it when asked to.
fn run(args: Args) -> Result<()> {
    let transpiler = CommandTranspiler::from_command_line(&args.transpiler)?;
    let layout = SiteLayout::new(&args.root);

    let processor = Processor::new(layout.clone(), args.build_options(), &transpiler);
    processor.run()?;

    if args.server {
        serve_site(layout.output_dir(), args.port)?;
    }
    Ok(())
}
