use std::path::Path;

use cabinet_core::{Attribute, Minister};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(file: &Path) -> Result<(), String> {
    let cabinet = super::load_roster(file)?;

    if cabinet.is_empty() {
        println!("  The roster is empty.");
        return Ok(());
    }

    let mut ministers: Vec<&Minister> = cabinet.iter().collect();
    ministers.sort_by(|a, b| a.position().cmp(&b.position()).then_with(|| a.name.cmp(&b.name)));

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Minister", "Background", "Office", "Ability", "Reputation", "Evidence"]);

    for minister in ministers {
        let state = minister.apparent_state();
        let ability = match minister.position() {
            Some(ministry) => state.describe(Attribute::Skill(ministry)).to_string(),
            None => "--".to_string(),
        };
        table.add_row(vec![
            minister.name.clone(),
            minister.background.to_string(),
            super::office_label(minister),
            ability,
            state.describe(Attribute::Loyalty).to_string(),
            minister.ledger.corruption_evidence.to_string(),
        ]);
    }

    println!("  {} {}", "Cabinet".bold(), format!("({} ministers)", cabinet.len()).dimmed());
    println!();
    println!("{table}");

    let pool = cabinet.available().len();
    if pool > 0 {
        println!();
        println!("  {pool} awaiting appointment");
    }
    Ok(())
}
