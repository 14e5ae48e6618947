#[tokio::main]
async fn main() -> anyhow::Result<()> {
    reading_quiz_backend::run().await
}
