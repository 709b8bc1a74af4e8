fn main() {
    if let Err(e) = homehosts::cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
