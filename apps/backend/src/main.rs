#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vocab_mastery_backend::run().await
}
