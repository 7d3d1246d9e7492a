pub mod investigate;
pub mod show;
pub mod simulate;

use std::fs;
use std::path::Path;

use cabinet_core::{Cabinet, Minister, Record};
use cabinet_mechanics::Notice;
use cabinet_mechanics::notice::{AUDIO_ALARM, AUDIO_GAVEL};
use colored::Colorize;

/// Read a roster snapshot.
fn load_roster(path: &Path) -> Result<Cabinet, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let records: Vec<Record> = serde_json::from_str(&text)
        .map_err(|e| format!("{} is not a roster snapshot: {e}", path.display()))?;
    let cabinet = Cabinet::from_records(&records)
        .map_err(|e| format!("invalid roster in {}: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), ministers = cabinet.len(), "roster loaded");
    Ok(cabinet)
}

/// Write a roster snapshot as pretty JSON.
fn save_roster(path: &Path, cabinet: &Cabinet) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&cabinet.to_records())
        .map_err(|e| format!("cannot encode roster: {e}"))?;
    fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), ministers = cabinet.len(), "roster saved");
    Ok(())
}

/// Office title, or "(pool)" for the unassigned.
fn office_label(minister: &Minister) -> String {
    match minister.position() {
        Some(ministry) => ministry.title().to_string(),
        None => "(pool)".to_string(),
    }
}

fn print_notice(notice: &Notice) {
    let tag = match notice.audio.as_deref() {
        Some(AUDIO_ALARM) => "CAUGHT".red().bold(),
        Some(AUDIO_GAVEL) => " COURT".cyan().bold(),
        _ => "  NEWS".dimmed(),
    };
    for (i, line) in notice.message.lines().enumerate() {
        if i == 0 {
            println!("  {tag}  {line}");
        } else {
            println!("          {line}");
        }
    }
}
