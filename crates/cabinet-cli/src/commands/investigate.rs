use std::path::Path;

use cabinet_mechanics::{Court, EngineConfig, NoticeLog, run_investigation};
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub fn run(file: &Path, name: &str, seed: u64) -> Result<(), String> {
    let mut cabinet = super::load_roster(file)?;
    let target = cabinet
        .find_by_name(name)
        .map(|m| m.id)
        .ok_or_else(|| format!("no minister named '{name}'"))?;
    let prosecutor = cabinet.prosecutor();

    let config = EngineConfig::default();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut log = NoticeLog::default();
    let report = {
        let mut court = Court::new(&config, &mut rng, &mut log);
        run_investigation(&mut cabinet, prosecutor, target, &mut court)
            .map_err(|e| format!("investigation failed: {e}"))?
    };

    let investigator = match prosecutor {
        Some(id) => cabinet
            .get(id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| id.to_string()),
        None => "nobody".to_string(),
    };
    println!(
        "  {} {} {}",
        "Investigation".bold(),
        report.target_name,
        format!("(by {investigator}, seed={seed})").dimmed()
    );
    println!();
    for line in report.to_string().lines() {
        println!("  {line}");
    }

    super::save_roster(file, &cabinet)?;
    Ok(())
}
