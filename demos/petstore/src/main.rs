use colored::Colorize;
use routedoc::routedoc_cli::{self, CliError};

fn main() {
    routedoc_cli::init_tracing();

    let result = petstore::registry()
        .map_err(|e| e.to_string())
        .and_then(|registry| {
            let builder = petstore::document_builder(&registry).map_err(|e| e.to_string())?;
            match routedoc_cli::run_from_args(std::env::args_os(), &registry, &builder) {
                Ok(()) => Ok(()),
                Err(CliError::Args(e)) => e.exit(),
                Err(e) => Err(e.to_string()),
            }
        });

    if let Err(e) = result {
        eprintln!("{}", format!("Error: {e}").as_str().red());
        std::process::exit(1);
    }
}
