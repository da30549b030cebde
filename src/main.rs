fn main() {
    if let Err(e) = anomaly_rank::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
