//! Persistent state store.
//!
//! The whole tracker state is one `Document` persisted as a single pretty
//! JSON blob at `<data-dir>/document.json`. Commands load the document,
//! mutate it in memory, and save it back; there is no partial persistence
//! and no migration machinery.

use crate::models::Document;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the persisted document inside the data directory.
pub const DOCUMENT_FILE: &str = "document.json";

/// Resolve the data directory: an explicit override wins, otherwise the
/// platform data dir with a `protracker` subdirectory.
pub fn resolve_data_dir(cli_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = cli_override {
        return Ok(dir);
    }
    let base = dirs::data_dir()
        .ok_or_else(|| Error::Other("Could not determine a data directory".to_string()))?;
    Ok(base.join("protracker"))
}

/// Generate a unique entry ID with the given prefix.
///
/// IDs look like `todo-1756200000000-3f9a1c`: prefix, creation time in unix
/// milliseconds, and a short random suffix to keep same-millisecond inserts
/// distinct.
pub fn generate_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, millis, &suffix[..6])
}

/// Default export file name for a given day, e.g. `protracker-2026-08-26.json`.
pub fn default_export_filename(today: NaiveDate) -> String {
    format!("protracker-{}.json", today.format("%Y-%m-%d"))
}

/// A partial document, used for shallow merge on import.
///
/// Each field mirrors a top-level `Document` field but is optional. Fields
/// present in the imported JSON replace the current value wholesale; absent
/// fields leave the current value untouched. A present field that does not
/// deserialize rejects the whole import.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DocumentPatch {
    pub todos: Option<Vec<crate::models::Todo>>,
    pub routines: Option<Vec<crate::models::Routine>>,
    pub habits: Option<Vec<crate::models::Habit>>,
    pub sleep: Option<Vec<crate::models::SleepEntry>>,
    pub mood: Option<Vec<crate::models::MoodEntry>>,
    pub goals: Option<Vec<crate::models::Goal>>,
    pub projects: Option<Vec<crate::models::Project>>,
    pub planner: Option<crate::models::Planner>,
    pub planner_view: Option<crate::models::PlannerView>,
    pub media: Option<Vec<crate::models::MediaEntry>>,
    pub notes: Option<String>,
    pub month_offset: Option<i32>,
    pub settings: Option<crate::models::Settings>,
}

impl DocumentPatch {
    /// Apply the patch to `doc`, replacing each present field. Returns the
    /// names of the fields that were replaced.
    pub fn apply(self, doc: &mut Document) -> Vec<&'static str> {
        let mut replaced = Vec::new();
        if let Some(todos) = self.todos {
            doc.todos = todos;
            replaced.push("todos");
        }
        if let Some(routines) = self.routines {
            doc.routines = routines;
            replaced.push("routines");
        }
        if let Some(habits) = self.habits {
            doc.habits = habits;
            replaced.push("habits");
        }
        if let Some(sleep) = self.sleep {
            doc.sleep = sleep;
            replaced.push("sleep");
        }
        if let Some(mood) = self.mood {
            doc.mood = mood;
            replaced.push("mood");
        }
        if let Some(goals) = self.goals {
            doc.goals = goals;
            replaced.push("goals");
        }
        if let Some(projects) = self.projects {
            doc.projects = projects;
            replaced.push("projects");
        }
        if let Some(planner) = self.planner {
            doc.planner = planner;
            replaced.push("planner");
        }
        if let Some(planner_view) = self.planner_view {
            doc.planner_view = planner_view;
            replaced.push("planner_view");
        }
        if let Some(media) = self.media {
            doc.media = media;
            replaced.push("media");
        }
        if let Some(notes) = self.notes {
            doc.notes = notes;
            replaced.push("notes");
        }
        if let Some(month_offset) = self.month_offset {
            doc.month_offset = month_offset;
            replaced.push("month_offset");
        }
        if let Some(settings) = self.settings {
            doc.settings = settings;
            replaced.push("settings");
        }
        replaced
    }
}

/// Handle to the on-disk document.
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    pub fn open(data_dir: &Path) -> Result<Self> {
        if !data_dir.exists() {
            fs::create_dir_all(data_dir)?;
        }
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Path to the persisted document.
    pub fn document_path(&self) -> PathBuf {
        self.data_dir.join(DOCUMENT_FILE)
    }

    /// Load the document, or defaults if nothing is persisted yet.
    ///
    /// An unreadable blob is treated like an absent one: the user gets a
    /// working tracker instead of a hard failure, and a warning notes the
    /// discarded file. The broken blob stays on disk until the next save.
    pub fn load(&self) -> Result<Document> {
        let path = self.document_path();
        if !path.exists() {
            debug!("No document at {}, starting empty", path.display());
            return Ok(Document::default());
        }
        let raw = fs::read_to_string(&path)?;
        match serde_json::from_str(&raw) {
            Ok(doc) => Ok(doc),
            Err(err) => {
                warn!(
                    "Could not parse {}: {}. Starting from an empty document.",
                    path.display(),
                    err
                );
                Ok(Document::default())
            }
        }
    }

    /// Persist the document as pretty JSON, replacing any previous blob.
    pub fn save(&self, doc: &Document) -> Result<()> {
        let json = serde_json::to_string_pretty(doc)?;
        fs::write(self.document_path(), json)?;
        debug!("Saved document to {}", self.document_path().display());
        Ok(())
    }

    /// Serialize the current document to a pretty JSON string.
    ///
    /// With nothing persisted yet this exports the default document, so an
    /// export is always valid input for `import`.
    pub fn export_json(&self) -> Result<String> {
        let doc = self.load()?;
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Merge the fields present in `raw` into the current document and save.
    ///
    /// Returns the names of the replaced fields. Malformed JSON or a field
    /// with the wrong shape rejects the whole import and leaves the current
    /// state untouched.
    pub fn import_json(&self, raw: &str) -> Result<Vec<&'static str>> {
        let patch: DocumentPatch = serde_json::from_str(raw)
            .map_err(|err| Error::InvalidDocument(err.to_string()))?;
        let mut doc = self.load()?;
        let replaced = patch.apply(&mut doc);
        self.save(&doc)?;
        Ok(replaced)
    }

    /// Delete the persisted document. A second reset is a no-op.
    pub fn reset(&self) -> Result<()> {
        let path = self.document_path();
        if path.exists() {
            fs::remove_file(&path)?;
            debug!("Removed {}", path.display());
        }
        Ok(())
    }
}
