use std::path::PathBuf;

use geosave_core::checkpoint::MARKER_FILE_NAME;
use geosave_core::{CheckpointStore, DirectoryStore, FileCheckpointStore};

use crate::commands::common::{
    destination_from_env, format_modified_time, load_profile, resolve_configured_destination,
};
use crate::error::CliError;

pub async fn run_status(profile_name: Option<&str>, dir: Option<PathBuf>) -> Result<(), CliError> {
    let resolved = load_profile(profile_name)?;
    let destination =
        resolve_configured_destination(dir, destination_from_env(), &resolved.profile)
            .ok_or(CliError::NoDestination)?;

    println!("Profile: {}", resolved.name);
    println!("Destination: {}", destination.display());

    let store = DirectoryStore::open(&destination)?;
    let checkpoints = FileCheckpointStore::new(store.root());
    match checkpoints.read().await? {
        Some(checkpoint) => {
            let updated = std::fs::metadata(checkpoints.path())
                .and_then(|metadata| metadata.modified())
                .map(format_modified_time)
                .unwrap_or_else(|_| "unknown".to_string());
            println!("Latest downloaded: {checkpoint} (updated {updated})");
        }
        None => println!("Latest downloaded: none ({MARKER_FILE_NAME} not created yet)"),
    }
    println!("Saved games: {}", store.count_records()?);
    Ok(())
}
