use anyhow::Result;

use crate::cache::MatchCache;
use crate::catalog::{CatalogDestination, CatalogSource};
use crate::config::Config;
use crate::reconcile::{self, FailureLog};

/// Migrates the given playlists in order. A failing playlist is reported and
/// skipped; the cache is persisted exactly once after all playlists have
/// been attempted.
pub async fn run<S: CatalogSource, D: CatalogDestination>(
    config: &Config,
    source: &S,
    destination: &D,
    playlist_ids: &[String],
) -> Result<()> {
    let mut cache = MatchCache::load(&config.cache_file)?;
    let failure_log = FailureLog::new(&config.failure_log);

    let mut unmatched = 0;
    for playlist_id in playlist_ids {
        match reconcile::reconcile(source, destination, playlist_id, &mut cache, &failure_log)
            .await
        {
            Ok(summary) => {
                println!(
                    "Finished \"{}\": {} added, {} already present, {} not found",
                    summary.playlist_name, summary.inserted, summary.skipped, summary.unmatched,
                );
                unmatched += summary.unmatched;
            }
            Err(err) => eprintln!("Error converting {playlist_id}: {err:#}"),
        }
    }

    cache.save(&config.cache_file)?;

    println!("Done.");
    if unmatched > 0 {
        println!(
            "Some tracks could not be matched; see {}.",
            config.failure_log.display(),
        );
    }
    Ok(())
}
