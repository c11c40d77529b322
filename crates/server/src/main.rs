#[tokio::main]
async fn main() -> anyhow::Result<()> {
    codelala_server::start().await
}
