#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    bootcamp_builder_server::run().await?;
    Ok(())
}
