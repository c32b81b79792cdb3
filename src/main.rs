#[tokio::main]
async fn main() {
    if let Err(e) = brewscore_be::start_server().await {
        tracing::error!("Server failed: {}", e);
        std::process::exit(1);
    }
}
