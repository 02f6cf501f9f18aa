use crate::catalog::Catalog;
use crate::domain::models::{Checkpoint, CHECKPOINT_FORMAT_VERSION};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(thiserror::Error, Debug)]
pub enum CheckpointError {
    #[error("checkpoint not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("checkpoint {} is not a valid assessment file: {source}", path.display())]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("checkpoint {} cannot be resumed: {reason}", path.display())]
    Incompatible { path: PathBuf, reason: String },
}

pub fn load_checkpoint(path: &Path) -> anyhow::Result<Checkpoint> {
    if !path.exists() {
        return Err(CheckpointError::NotFound(path.to_path_buf()).into());
    }
    let raw = std::fs::read_to_string(path)?;
    let checkpoint: Checkpoint =
        serde_json::from_str(&raw).map_err(|source| CheckpointError::Corrupted {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        path = %path.display(),
        answers = checkpoint.responses.len(),
        complete = checkpoint.is_complete(),
        "checkpoint loaded"
    );
    Ok(checkpoint)
}

/// Load a checkpoint and reject anything the current catalog cannot resume.
pub fn load_for_catalog(path: &Path, catalog: &Catalog) -> anyhow::Result<Checkpoint> {
    let checkpoint = load_checkpoint(path)?;
    check_against(&checkpoint, catalog).map_err(|reason| CheckpointError::Incompatible {
        path: path.to_path_buf(),
        reason,
    })?;
    Ok(checkpoint)
}

/// Every stored answer must belong to a known question and fit its kind.
pub fn check_against(checkpoint: &Checkpoint, catalog: &Catalog) -> Result<(), String> {
    if checkpoint.metadata.format_version > CHECKPOINT_FORMAT_VERSION {
        return Err(format!(
            "format_version {} is newer than supported version {}",
            checkpoint.metadata.format_version, CHECKPOINT_FORMAT_VERSION
        ));
    }
    for (id, answer) in checkpoint.responses.iter() {
        let question = catalog
            .question(id)
            .ok_or_else(|| format!("unknown question id {}", id))?;
        question
            .check_answer(answer)
            .map_err(|reason| format!("answer for {}: {}", id, reason))?;
    }
    Ok(())
}

/// Write via a sibling temp file renamed over `path`, so an interrupted
/// write never leaves a truncated checkpoint behind.
pub fn save_checkpoint(path: &Path, checkpoint: &Checkpoint) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let tmp = temp_path_for(path);
    std::fs::write(&tmp, serde_json::to_string_pretty(checkpoint)?)?;
    std::fs::rename(&tmp, path)?;
    info!(
        path = %path.display(),
        answers = checkpoint.responses.len(),
        complete = checkpoint.is_complete(),
        "checkpoint saved"
    );
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

pub fn default_output_path(reports_dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    reports_dir.join(format!("scoping_{}.json", stamp))
}

/// `reports/scoping_x.json` → `reports/scoping_x_report.md`.
pub fn report_path_for(checkpoint_path: &Path) -> PathBuf {
    let stem = checkpoint_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "scoping".to_string());
    checkpoint_path.with_file_name(format!("{}_report.md", stem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Answer;
    use tempfile::TempDir;

    #[test]
    fn save_then_load_keeps_answers() {
        let dir = TempDir::new().expect("tmp");
        let path = dir.path().join("nested/run.json");
        let mut cp = Checkpoint::start();
        cp.metadata.organization = Some("Acme".into());
        cp.responses.insert("df_01", Answer::Flag(true));
        cp.responses
            .insert("df_03", Answer::Selection(vec!["Law Enforcement Sensitive".into()]));
        save_checkpoint(&path, &cp).expect("save");

        assert!(!dir.path().join("nested/run.json.tmp").exists());
        let loaded = load_checkpoint(&path).expect("load");
        assert_eq!(loaded, cp);
        assert!(!loaded.is_complete());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().expect("tmp");
        let err = load_checkpoint(&dir.path().join("nope.json")).expect_err("missing");
        assert!(matches!(
            err.downcast_ref::<CheckpointError>(),
            Some(CheckpointError::NotFound(_))
        ));
    }

    #[test]
    fn garbage_is_corrupted() {
        let dir = TempDir::new().expect("tmp");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"responses\": {}}").expect("write");
        let err = load_checkpoint(&path).expect_err("no metadata");
        assert!(matches!(
            err.downcast_ref::<CheckpointError>(),
            Some(CheckpointError::Corrupted { .. })
        ));
    }

    #[test]
    fn unknown_ids_and_bad_types_are_incompatible() {
        let catalog = Catalog::standard();
        let mut cp = Checkpoint::start();
        cp.responses.insert("zz_99", Answer::Flag(true));
        assert!(check_against(&cp, &catalog)
            .expect_err("unknown id")
            .contains("zz_99"));

        let mut cp = Checkpoint::start();
        cp.responses.insert("df_01", Answer::Text("yes".into()));
        assert!(check_against(&cp, &catalog).is_err());

        let mut cp = Checkpoint::start();
        cp.metadata.format_version = CHECKPOINT_FORMAT_VERSION + 1;
        assert!(check_against(&cp, &catalog).is_err());
    }

    #[test]
    fn incompatible_checkpoint_fails_load() {
        let dir = TempDir::new().expect("tmp");
        let path = dir.path().join("old.json");
        let mut cp = Checkpoint::start();
        cp.responses.insert("si_01", Answer::Text("1-10".into()));
        save_checkpoint(&path, &cp).expect("save");
        let err = load_for_catalog(&path, &Catalog::standard()).expect_err("ascii dash");
        assert!(matches!(
            err.downcast_ref::<CheckpointError>(),
            Some(CheckpointError::Incompatible { .. })
        ));
    }

    #[test]
    fn report_sits_next_to_checkpoint() {
        assert_eq!(
            report_path_for(Path::new("reports/scoping_20240101_120000.json")),
            PathBuf::from("reports/scoping_20240101_120000_report.md")
        );
        let p = default_output_path(Path::new("out"));
        let name = p.file_name().and_then(|n| n.to_str()).expect("name");
        assert!(name.starts_with("scoping_") && name.ends_with(".json"));
        assert_eq!(name.len(), "scoping_YYYYmmdd_HHMMSS.json".len());
    }
}
