//! Destination folder acquisition with bounded recovery prompts.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use geosave_core::checkpoint::MARKER_FILE_NAME;
use geosave_core::DirectoryStore;

use crate::error::CliError;

/// Folders tried (configured one included) before giving up.
pub const MAX_DESTINATION_ATTEMPTS: usize = 3;

/// User interaction needed while choosing a destination.
pub trait DestinationPrompt {
    /// Ask for another folder; `None` when the user gives up or cannot answer.
    fn choose_directory(&mut self, reason: &str) -> Option<PathBuf>;

    /// Ask whether a fresh `latest.txt` may be created in `directory`.
    fn confirm_new_marker(&mut self, directory: &Path) -> bool;
}

/// Prompts on stdin/stdout.
pub struct TerminalPrompt;

impl DestinationPrompt for TerminalPrompt {
    fn choose_directory(&mut self, reason: &str) -> Option<PathBuf> {
        println!("{reason}");
        let answer = read_answer("Folder to save games into (empty to cancel): ")?;
        Some(PathBuf::from(answer))
    }

    fn confirm_new_marker(&mut self, directory: &Path) -> bool {
        println!(
            "\"{MARKER_FILE_NAME}\" not found in {}.",
            directory.display()
        );
        read_answer("Create a new one? [Y/n] (n picks another folder): ")
            .is_none_or(|answer| !matches!(answer.to_ascii_lowercase().as_str(), "n" | "no"))
    }
}

/// Never prompts: missing markers are created, unusable folders are fatal.
pub struct NonInteractive;

impl DestinationPrompt for NonInteractive {
    fn choose_directory(&mut self, _reason: &str) -> Option<PathBuf> {
        None
    }

    fn confirm_new_marker(&mut self, _directory: &Path) -> bool {
        true
    }
}

/// Prompt implementation matching the current stdin.
pub fn default_prompt() -> Box<dyn DestinationPrompt> {
    if io::stdin().is_terminal() {
        Box::new(TerminalPrompt)
    } else {
        Box::new(NonInteractive)
    }
}

fn read_answer(question: &str) -> Option<String> {
    print!("{question}");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).ok()?;
    let answer = line.trim();
    if answer.is_empty() {
        None
    } else {
        Some(answer.to_string())
    }
}

/// A usable destination folder.
#[derive(Debug)]
pub struct AcquiredDestination {
    pub store: DirectoryStore,
    /// The user picked a folder other than the configured one.
    pub reselected: bool,
}

/// Resolve a usable destination, offering at most
/// [`MAX_DESTINATION_ATTEMPTS`] folders in total.
pub fn acquire_destination(
    configured: Option<PathBuf>,
    prompt: &mut dyn DestinationPrompt,
) -> Result<AcquiredDestination, CliError> {
    let mut next = configured;
    let mut reselected = false;
    let mut reason = "No destination folder configured.".to_string();

    for attempt in 1..=MAX_DESTINATION_ATTEMPTS {
        let path = match next.take() {
            Some(path) => path,
            None => {
                let Some(path) = prompt.choose_directory(&reason) else {
                    break;
                };
                reselected = true;
                path
            }
        };

        let store = match DirectoryStore::open(&path) {
            Ok(store) => store,
            Err(error) => {
                tracing::warn!("Destination attempt {attempt} rejected: {error}");
                reason = format!("Could not access {}. Select another folder.", path.display());
                continue;
            }
        };

        let marker_exists = store
            .root()
            .join(MARKER_FILE_NAME)
            .try_exists()
            .map_err(|error| {
                CliError::Destination(format!(
                    "cannot check {MARKER_FILE_NAME} in {}: {error}",
                    path.display()
                ))
            })?;
        if marker_exists || prompt.confirm_new_marker(store.root()) {
            return Ok(AcquiredDestination { store, reselected });
        }
        reason = "Choose another folder.".to_string();
    }

    Err(CliError::Destination(format!(
        "no usable destination folder after {MAX_DESTINATION_ATTEMPTS} attempt(s): {reason}"
    )))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    #[derive(Default)]
    struct ScriptedPrompt {
        directories: VecDeque<PathBuf>,
        confirmations: VecDeque<bool>,
        asked: usize,
    }

    impl DestinationPrompt for ScriptedPrompt {
        fn choose_directory(&mut self, _reason: &str) -> Option<PathBuf> {
            self.asked += 1;
            self.directories.pop_front()
        }

        fn confirm_new_marker(&mut self, _directory: &Path) -> bool {
            self.confirmations.pop_front().unwrap_or(false)
        }
    }

    #[test]
    fn configured_folder_with_marker_is_used_directly() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MARKER_FILE_NAME), "").unwrap();
        let mut prompt = ScriptedPrompt::default();

        let acquired = acquire_destination(Some(dir.path().to_path_buf()), &mut prompt).unwrap();

        assert_eq!(acquired.store.root(), dir.path());
        assert!(!acquired.reselected);
        assert_eq!(prompt.asked, 0);
    }

    #[test]
    fn unusable_folder_prompts_for_another() {
        let dir = tempfile::tempdir().unwrap();
        let mut prompt = ScriptedPrompt {
            directories: VecDeque::from([dir.path().to_path_buf()]),
            confirmations: VecDeque::from([true]),
            ..ScriptedPrompt::default()
        };

        let acquired =
            acquire_destination(Some(dir.path().join("missing")), &mut prompt).unwrap();

        assert_eq!(acquired.store.root(), dir.path());
        assert!(acquired.reselected);
    }

    #[test]
    fn declining_new_marker_picks_another_folder() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join(MARKER_FILE_NAME), "x.json").unwrap();
        let mut prompt = ScriptedPrompt {
            directories: VecDeque::from([second.path().to_path_buf()]),
            confirmations: VecDeque::from([false]),
            ..ScriptedPrompt::default()
        };

        let acquired =
            acquire_destination(Some(first.path().to_path_buf()), &mut prompt).unwrap();

        assert_eq!(acquired.store.root(), second.path());
    }

    #[test]
    fn gives_up_after_bounded_attempts() {
        let dir = tempfile::tempdir().unwrap();
        let mut prompt = ScriptedPrompt {
            directories: (0..10).map(|n| dir.path().join(format!("missing-{n}"))).collect(),
            ..ScriptedPrompt::default()
        };

        let result = acquire_destination(None, &mut prompt);

        assert!(matches!(result, Err(CliError::Destination(_))));
        assert_eq!(prompt.asked, MAX_DESTINATION_ATTEMPTS);
    }

    #[test]
    fn non_interactive_accepts_new_marker_and_fails_without_folder() {
        let dir = tempfile::tempdir().unwrap();

        assert!(acquire_destination(Some(dir.path().to_path_buf()), &mut NonInteractive).is_ok());
        assert!(matches!(
            acquire_destination(None, &mut NonInteractive),
            Err(CliError::Destination(_))
        ));
    }
}
