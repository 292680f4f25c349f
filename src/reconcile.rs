use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cache::MatchCache;
use crate::catalog::{CatalogDestination, CatalogSource};
use crate::error::ApiError;
use crate::matching;
use crate::retry::with_retry;

/// Provenance tag set on playlists this tool creates.
const PLAYLIST_DESCRIPTION: &str = "Imported from Spotify";

/// Append-only log of tracks that could not be matched. Written once per
/// unresolved track, never read back.
pub struct FailureLog {
    path: PathBuf,
}

impl FailureLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn record(&self, playlist_name: &str, descriptor: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open failure log {}", self.path.display()))?;
        writeln!(file, "[{playlist_name}] {descriptor}")?;
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub playlist_name: String,
    pub inserted: usize,
    pub skipped: usize,
    pub unmatched: usize,
}

/// Migrates one source playlist into the destination playlist with the same
/// name, creating it when absent. Already-present items are skipped so
/// re-runs never insert duplicates.
pub async fn reconcile<S: CatalogSource, D: CatalogDestination>(
    source: &S,
    destination: &D,
    playlist_id: &str,
    cache: &mut MatchCache,
    failure_log: &FailureLog,
) -> Result<ReconcileSummary> {
    let playlist_name = source.playlist_name(playlist_id).await?;
    let tracks = source.playlist_tracks(playlist_id).await?;
    println!("Converting \"{playlist_name}\" ({} tracks)", tracks.len());

    let destination_id = find_or_create_playlist(destination, &playlist_name).await?;
    let mut existing: HashSet<String> = destination
        .playlist_items(&destination_id)
        .await?
        .into_iter()
        .collect();

    let mut summary = ReconcileSummary {
        playlist_name: playlist_name.clone(),
        ..ReconcileSummary::default()
    };
    let bar = ProgressBar::new(tracks.len() as u64).with_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}")?.progress_chars("=> "),
    );
    bar.set_message(format!("Adding to {playlist_name}"));

    for descriptor in &tracks {
        match matching::resolve(descriptor, cache, destination).await? {
            None => {
                failure_log.record(&playlist_name, descriptor)?;
                bar.println(format!("Not found: {descriptor}"));
                summary.unmatched += 1;
            }
            Some(item_id) if existing.contains(&item_id) => summary.skipped += 1,
            Some(item_id) => {
                with_retry(|| destination.insert_item(&destination_id, &item_id)).await?;
                existing.insert(item_id);
                summary.inserted += 1;
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    Ok(summary)
}

/// First exact name match among the caller's own playlists wins; only when
/// none exists is a new private playlist created.
async fn find_or_create_playlist<D: CatalogDestination>(
    destination: &D,
    name: &str,
) -> Result<String, ApiError> {
    let playlists = destination.list_playlists().await?;
    if let Some(playlist) = playlists.into_iter().find(|playlist| playlist.name == name) {
        return Ok(playlist.id);
    }
    destination.create_playlist(name, PLAYLIST_DESCRIPTION).await
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::fs;

    use reqwest::StatusCode;

    use crate::catalog::{PlaylistRef, SearchCandidate};

    use super::*;

    struct FakeSource {
        name: String,
        tracks: Vec<String>,
    }

    impl CatalogSource for FakeSource {
        async fn playlist_name(&self, _playlist_id: &str) -> Result<String, ApiError> {
            Ok(self.name.clone())
        }

        async fn playlist_tracks(&self, _playlist_id: &str) -> Result<Vec<String>, ApiError> {
            Ok(self.tracks.clone())
        }
    }

    #[derive(Default)]
    struct FakeDestination {
        playlists: RefCell<Vec<PlaylistRef>>,
        items: RefCell<HashMap<String, Vec<String>>>,
        search_results: HashMap<String, Vec<SearchCandidate>>,
        created: Cell<u32>,
        inserts: Cell<u32>,
        fail_inserts: bool,
    }

    impl CatalogDestination for FakeDestination {
        async fn list_playlists(&self) -> Result<Vec<PlaylistRef>, ApiError> {
            Ok(self.playlists.borrow().clone())
        }

        async fn create_playlist(
            &self,
            name: &str,
            description: &str,
        ) -> Result<String, ApiError> {
            assert_eq!(description, PLAYLIST_DESCRIPTION);
            self.created.set(self.created.get() + 1);
            let id = format!("yt{}", self.created.get());
            self.playlists.borrow_mut().push(PlaylistRef {
                id: id.clone(),
                name: name.to_owned(),
            });
            self.items.borrow_mut().insert(id.clone(), Vec::new());
            Ok(id)
        }

        async fn playlist_items(&self, playlist_id: &str) -> Result<Vec<String>, ApiError> {
            Ok(self
                .items
                .borrow()
                .get(playlist_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn search(
            &self,
            query: &str,
            _max_results: u32,
        ) -> Result<Vec<SearchCandidate>, ApiError> {
            Ok(self.search_results.get(query).cloned().unwrap_or_default())
        }

        async fn insert_item(&self, playlist_id: &str, item_id: &str) -> Result<(), ApiError> {
            if self.fail_inserts {
                return Err(ApiError::Status {
                    status: StatusCode::UNAUTHORIZED,
                    message: "token expired".to_owned(),
                });
            }
            self.inserts.set(self.inserts.get() + 1);
            self.items
                .borrow_mut()
                .get_mut(playlist_id)
                .unwrap()
                .push(item_id.to_owned());
            Ok(())
        }
    }

    fn road_trip_source() -> FakeSource {
        FakeSource {
            name: "Road Trip".to_owned(),
            tracks: vec!["Song A ArtistX".to_owned(), "Song B ArtistY".to_owned()],
        }
    }

    fn road_trip_destination() -> FakeDestination {
        FakeDestination {
            search_results: HashMap::from([(
                "Song A ArtistX".to_owned(),
                vec![SearchCandidate {
                    id: "video1".to_owned(),
                    title: "Song A - ArtistX (Official)".to_owned(),
                }],
            )]),
            ..FakeDestination::default()
        }
    }

    #[tokio::test]
    async fn test_road_trip_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("failed_tracks.txt");
        let source = road_trip_source();
        let destination = road_trip_destination();
        let mut cache = MatchCache::default();
        let failure_log = FailureLog::new(&log_path);

        let summary = reconcile(&source, &destination, "playlist1", &mut cache, &failure_log)
            .await
            .unwrap();

        assert_eq!(summary.playlist_name, "Road Trip");
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.unmatched, 1);

        let playlists = destination.playlists.borrow();
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].name, "Road Trip");
        assert_eq!(
            destination.items.borrow().get(&playlists[0].id).unwrap(),
            &vec!["video1".to_owned()],
        );
        assert_eq!(
            fs::read_to_string(&log_path).unwrap(),
            "[Road Trip] Song B ArtistY\n",
        );
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let source = road_trip_source();
        let destination = road_trip_destination();
        let mut cache = MatchCache::default();
        let failure_log = FailureLog::new(dir.path().join("failed_tracks.txt"));

        let first = reconcile(&source, &destination, "playlist1", &mut cache, &failure_log)
            .await
            .unwrap();
        let second = reconcile(&source, &destination, "playlist1", &mut cache, &failure_log)
            .await
            .unwrap();

        assert_eq!(first.inserted, 1);
        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped, 1);
        assert_eq!(destination.inserts.get(), 1);
        assert_eq!(destination.created.get(), 1);
        let items = destination.items.borrow();
        assert_eq!(items.get("yt1").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_existing_playlist_reused() {
        let dir = tempfile::tempdir().unwrap();
        let source = road_trip_source();
        let destination = road_trip_destination();
        destination.playlists.borrow_mut().push(PlaylistRef {
            id: "existing".to_owned(),
            name: "Road Trip".to_owned(),
        });
        destination
            .items
            .borrow_mut()
            .insert("existing".to_owned(), Vec::new());
        let mut cache = MatchCache::default();
        let failure_log = FailureLog::new(dir.path().join("failed_tracks.txt"));

        reconcile(&source, &destination, "playlist1", &mut cache, &failure_log)
            .await
            .unwrap();

        assert_eq!(destination.created.get(), 0);
        assert_eq!(
            destination.items.borrow().get("existing").unwrap(),
            &vec!["video1".to_owned()],
        );
    }

    #[tokio::test]
    async fn test_duplicate_item_skipped_without_failure_record() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("failed_tracks.txt");
        let source = FakeSource {
            name: "Road Trip".to_owned(),
            tracks: vec!["Song A ArtistX".to_owned()],
        };
        let destination = road_trip_destination();
        destination.playlists.borrow_mut().push(PlaylistRef {
            id: "existing".to_owned(),
            name: "Road Trip".to_owned(),
        });
        destination
            .items
            .borrow_mut()
            .insert("existing".to_owned(), vec!["video1".to_owned()]);
        let mut cache = MatchCache::default();
        let failure_log = FailureLog::new(&log_path);

        let summary = reconcile(&source, &destination, "playlist1", &mut cache, &failure_log)
            .await
            .unwrap();

        assert_eq!(summary.inserted, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.unmatched, 0);
        assert_eq!(destination.inserts.get(), 0);
        assert!(!log_path.exists());
    }

    #[tokio::test]
    async fn test_insert_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let source = road_trip_source();
        let destination = FakeDestination {
            fail_inserts: true,
            ..road_trip_destination()
        };
        let mut cache = MatchCache::default();
        let failure_log = FailureLog::new(dir.path().join("failed_tracks.txt"));

        let result = reconcile(&source, &destination, "playlist1", &mut cache, &failure_log).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_failure_log_appends() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("failed_tracks.txt");
        let failure_log = FailureLog::new(&log_path);

        failure_log.record("Road Trip", "Song B ArtistY").unwrap();
        failure_log.record("Chill", "Song C ArtistZ").unwrap();

        assert_eq!(
            fs::read_to_string(&log_path).unwrap(),
            "[Road Trip] Song B ArtistY\n[Chill] Song C ArtistZ\n",
        );
    }
}
