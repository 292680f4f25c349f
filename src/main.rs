mod cache;
mod catalog;
mod config;
mod error;
mod matching;
mod migrate;
mod reconcile;
mod retry;
mod spotify;
mod youtube;

use std::path::PathBuf;

use anyhow::{Result, ensure};
use clap::{CommandFactory, Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(version, author, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Migrates Spotify playlists to YouTube playlists
    Migrate {
        /// Spotify Web API access token
        #[arg(short = 'S', long, env = "SPOTIFY_ACCESS_TOKEN")]
        spotify_token: String,

        /// YouTube Data API access token
        #[arg(short = 'Y', long, env = "YOUTUBE_ACCESS_TOKEN")]
        youtube_token: String,

        /// Path of the persisted track-to-video match cache
        #[arg(long, default_value = "video_cache.json")]
        cache_file: PathBuf,

        /// Path of the unmatched-track log
        #[arg(long, default_value = "failed_tracks.txt")]
        failure_log: PathBuf,

        /// Comma-separated Spotify playlist IDs
        playlist_ids: String,
    },

    /// Generate shell completions
    Completions {
        /// The shell to generate the completions for
        #[arg(value_enum)]
        shell: clap_complete_command::Shell,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate {
            spotify_token,
            youtube_token,
            cache_file,
            failure_log,
            playlist_ids,
        } => {
            let playlist_ids: Vec<String> = playlist_ids
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_owned)
                .collect();
            ensure!(!playlist_ids.is_empty(), "no playlist IDs given");
            for playlist_id in &playlist_ids {
                ensure!(
                    spotify::validate_playlist_id(playlist_id),
                    "invalid Spotify playlist ID: {playlist_id}",
                );
            }

            let source = spotify::Client::new(&spotify_token)?;
            let destination = youtube::Client::new(&youtube_token)?;
            let config = Config {
                cache_file,
                failure_log,
            };
            migrate::run(&config, &source, &destination, &playlist_ids).await?;
        }
        Commands::Completions { shell } => {
            shell.generate(&mut Cli::command(), &mut std::io::stdout());
        }
    }
    Ok(())
}
