use closet::cli::{init_logging, parse_args, run_cli, USAGE};
use closet::ClientConfig;

use color_eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = match parse_args(std::env::args()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_cli(args.command, ClientConfig::from_env()))
}
