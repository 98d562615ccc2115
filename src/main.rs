mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // GENIUS_ACCESS_TOKEN and LYRICIST_SAVE_DIR may come from a .env file
    dotenvy::dotenv().ok();

    cli::run().await?;

    Ok(())
}
