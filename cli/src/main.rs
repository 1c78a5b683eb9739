//! Binary entrypoint for relup-cli

fn main() {
    if let Err(err) = relup_cli::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
