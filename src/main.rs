#[tokio::main]
async fn main() -> anyhow::Result<()> {
    greenfolio_api::cli::run_with_sys_args().await
}
