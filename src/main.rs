use anyhow::Result;
use clrfund::app::handler;

#[tokio::main]
async fn main() -> Result<()> {
    handler::init().await
}
