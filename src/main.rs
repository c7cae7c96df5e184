#[tokio::main]
async fn main() {
    if let Err(e) = tx_tape::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
