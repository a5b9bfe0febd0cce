use meteo_archive::{ArchiveError, MeteoArchive};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ArchiveError> {
    env_logger::init();

    let mut archive = MeteoArchive::new().await?;
    archive.run().call().await?;
    Ok(())
}
