#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = assignment_service::run().await {
        eprintln!("assignment-service fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
