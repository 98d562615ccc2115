use std::path::PathBuf;

use clap::Parser;
use log::{LevelFilter, info};
use lyricist::clients::entities::ArtistId;
use lyricist::clients::errors::{Error, Result};
use lyricist::clients::search::SearchOptions;
use lyricist::lyricist::{ConfigBuilder, Lyricist};

#[derive(Parser)]
#[command(name = "lyricist")]
#[command(version, about = "Search for a lyric in an artist's songs", long_about = None)]
struct Cli {
    /// The name (or id if --id is specified) of the artist whose songs you'd like to search
    artist: String,

    /// The lyric to search for. If provided multiple, the artist's songs that contain ANY
    /// of the lyrics are returned (unless --all is specified)
    #[arg(required = true, num_args = 1..)]
    lyric: Vec<String>,

    /// The access token to use for Genius API requests. If not provided, it is retrieved
    /// from the "GENIUS_ACCESS_TOKEN" environment variable
    #[arg(short, long)]
    token: Option<String>,

    /// The passed in artist will be interpreted as the artist's id instead of their name
    #[arg(long)]
    id: bool,

    /// A song must contain ALL of the lyrics passed in to be matched
    #[arg(short, long)]
    all: bool,

    /// Directory where artists are saved. Defaults to "LYRICIST_SAVE_DIR", then the user cache dir
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Print debugging information
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        _ => {
            builder.filter_level(LevelFilter::Debug);
        }
    }
    builder.init();
}

fn parse_artist_id(raw: &str) -> Result<ArtistId> {
    raw.trim()
        .parse()
        .map(ArtistId)
        .map_err(|e| Error::ParseError(format!("Invalid artist id {raw:?}: {e}")))
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ConfigBuilder::new()
        .token(cli.token)
        .save_dir(cli.save_dir)
        .build()?;
    let mut lyricist = Lyricist::new(config);

    let artist_id = if cli.id {
        parse_artist_id(&cli.artist)?
    } else {
        info!("Getting artist id");
        let artist_id = lyricist.artist_id(&cli.artist).await?;
        info!("Artist id is {artist_id}");
        artist_id
    };
    let artist_id = lyricist.catalog(artist_id).await?;

    let options = SearchOptions {
        include_featured: true,
        match_all: cli.all,
    };
    for song in lyricist.search(artist_id, cli.lyric.as_slice(), options) {
        println!("{song}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "lyricist", "92", "love", "heart", "--id", "-a", "-t", "secret", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.artist, "92");
        assert_eq!(cli.lyric, vec!["love", "heart"]);
        assert!(cli.id);
        assert!(cli.all);
        assert_eq!(cli.token.as_deref(), Some("secret"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_requires_a_lyric() {
        assert!(Cli::try_parse_from(["lyricist", "Charli XCX"]).is_err());
    }

    #[test]
    fn test_parse_artist_id() {
        assert_eq!(parse_artist_id("45349").unwrap(), ArtistId(45349));
        assert!(matches!(
            parse_artist_id("Charli"),
            Err(Error::ParseError(_))
        ));
    }
}
