#[tokio::main]
async fn main() -> anyhow::Result<()> {
    flipdeck_terminal::run().await
}
