//! msgvault binary entrypoint.

fn main() {
    if let Err(err) = msgvault_cli::app::run() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
