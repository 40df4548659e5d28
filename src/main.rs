use clap::Parser;
use passvault::cli::{Cli, Commands};
use passvault::password::Charset;

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("passvault=debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            length,
            no_lowercase,
            no_uppercase,
            no_digits,
            no_symbols,
            exclude_ambiguous,
            count,
        } => {
            let charset = Charset {
                lowercase: !no_lowercase,
                uppercase: !no_uppercase,
                digits: !no_digits,
                symbols: !no_symbols,
            };
            passvault::cli::commands::generate::execute(length, charset, exclude_ambiguous, count)
        }
        Commands::Check { ref password } => {
            passvault::cli::commands::check::execute(password.as_deref())
        }
        Commands::Set {
            ref service,
            ref username,
            ref notes,
            generate,
        } => passvault::cli::commands::set::execute(&cli, service, username, notes, generate),
        Commands::Get { ref service } => passvault::cli::commands::get::execute(&cli, service),
        Commands::List => passvault::cli::commands::list::execute(&cli),
        Commands::Delete { ref service, force } => {
            passvault::cli::commands::delete::execute(&cli, service, force)
        }
        Commands::Export { ref file } => passvault::cli::commands::export::execute(&cli, file),
        Commands::Rekey { to_plaintext } => {
            passvault::cli::commands::rekey::execute(&cli, to_plaintext)
        }
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
