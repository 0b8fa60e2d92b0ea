#[tokio::main]
async fn main() -> luna_webhook::error::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("luna_webhook=info"),
    )
    .init();
    log::info!("Starting luna-webhook WhatsApp bridge");

    match luna_webhook::run().await {
        Ok(()) => {
            log::info!("Server shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Server encountered an error: {}", e);
            Err(e)
        }
    }
}
