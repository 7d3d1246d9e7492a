use std::path::PathBuf;

use cabinet_core::{Attribute, Cabinet, Departure, MinisterId, Ministry};
use cabinet_mechanics::notice::AUDIO_ALARM;
use cabinet_mechanics::{
    Check, Court, Dice, EngineConfig, NoticeLog, ScenarioOverride, Stake, begin_turn,
    random_background, random_name, recruit, resolved_roll_batch, reveal, run_investigation,
};
use clap::Args;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Evidence at which a minister is convicted and removed.
const CONVICTION_EVIDENCE: u32 = 3;
/// Dice each appointed minister rolls per turn.
const DICE_PER_TASK: usize = 3;

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of turns to play
    #[arg(short, long, default_value = "5")]
    pub turns: u32,

    /// RNG seed for deterministic runs
    #[arg(short, long, default_value = "42")]
    pub seed: u64,

    /// Fear level, 0-6; higher fear discourages theft
    #[arg(short, long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=6))]
    pub fear: u8,

    /// Every minister steals whenever they can
    #[arg(long)]
    pub always_corrupt: bool,

    /// Nobody ever steals
    #[arg(long)]
    pub never_corrupt: bool,

    /// The prosecutor catches every theft and is never corrupt
    #[arg(long)]
    pub infallible: bool,

    /// Reveal every minister's true qualities on recruitment
    #[arg(long)]
    pub transparent: bool,

    /// Save the final roster to this file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Show every notice, not just the notable ones
    #[arg(short, long)]
    pub verbose: bool,
}

impl SimulateArgs {
    fn config(&self) -> EngineConfig {
        let mut config = EngineConfig::default()
            .with_fear(self.fear)
            .with_transparency(self.transparent);
        let switches = [
            (self.always_corrupt, ScenarioOverride::AlwaysCorrupt),
            (self.never_corrupt, ScenarioOverride::NeverCorrupt),
            (self.infallible, ScenarioOverride::InfallibleDetector),
        ];
        for (on, scenario) in switches {
            if on {
                config = config.with_override(scenario);
            }
        }
        config
    }
}

pub fn run(args: &SimulateArgs) -> Result<(), String> {
    let config = args.config();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut log = NoticeLog::default();
    let mut cabinet = Cabinet::new();
    let mut convictions = Vec::new();

    {
        let mut court = Court::new(&config, &mut rng, &mut log);
        for ministry in Ministry::ALL {
            appoint_recruit(&mut cabinet, ministry, &mut court)?;
        }
        for turn in 1..=args.turns {
            play_turn(&mut cabinet, turn, &mut court, &mut convictions)?;
        }
    }

    println!(
        "  {} {}",
        "Simulation".bold(),
        format!(
            "({} turns, seed={}, fear={})",
            args.turns, args.seed, config.fear
        )
        .dimmed()
    );
    println!("  {} ministers, {} notices", cabinet.len(), log.len());
    println!();

    let shown: Vec<_> = log
        .notices()
        .iter()
        .filter(|n| args.verbose || n.audio.as_deref() == Some(AUDIO_ALARM))
        .collect();
    if !shown.is_empty() {
        let heading = if args.verbose { "Notices" } else { "Notable Notices" };
        println!("  {}", heading.bold().underline());
        for notice in shown {
            super::print_notice(notice);
        }
        println!();
    }

    if !convictions.is_empty() {
        println!("  {}", "Convictions".bold().underline());
        for (turn, name) in &convictions {
            println!("  {} turn {turn}: {name}", "CONVICTED".red().bold());
        }
        println!();
    }

    println!("  {}", "Ledger".bold().underline());
    println!();
    println!("{}", ledger_table(&cabinet));
    println!();

    let stolen: i64 = cabinet.iter().map(|m| m.ledger.stolen_money).sum();
    let unnoticed: i64 = cabinet.iter().map(|m| m.ledger.undetected_total()).sum();
    println!("  Total stolen: {stolen}");
    println!("  Never noticed: {unnoticed}");

    if let Some(path) = &args.save {
        super::save_roster(path, &cabinet)?;
        println!();
        println!("  Roster saved to {}", path.display());
    }
    Ok(())
}

fn appoint_recruit(
    cabinet: &mut Cabinet,
    ministry: Ministry,
    court: &mut Court<'_>,
) -> Result<MinisterId, String> {
    let name = random_name(court.dice);
    let background = random_background(court.dice);
    let minister = recruit(name, background, court.config, court.dice);
    let id = cabinet
        .enlist(minister)
        .map_err(|e| format!("enlistment failed: {e}"))?;
    cabinet
        .appoint(id, Some(ministry))
        .map_err(|e| format!("appointment failed: {e}"))?;
    Ok(id)
}

fn play_turn(
    cabinet: &mut Cabinet,
    turn: u32,
    court: &mut Court<'_>,
    convictions: &mut Vec<(u32, String)>,
) -> Result<(), String> {
    begin_turn(cabinet);
    let check = Check::d6(4, 1).map_err(|e| e.to_string())?;

    let offices: Vec<(Ministry, MinisterId)> = cabinet.appointed().collect();
    for (ministry, id) in &offices {
        let budget = i64::from(court.dice.roll(5, 40));
        let rolls = resolved_roll_batch(
            cabinet,
            *id,
            &check,
            Stake::new(budget, *ministry),
            DICE_PER_TASK,
            court,
        )
        .map_err(|e| e.to_string())?;
        let successes = rolls.iter().filter(|v| check.outcome(**v).is_success()).count();
        let name = cabinet.minister(*id).map_err(|e| e.to_string())?.name.clone();
        court.notify(
            &format!("Turn {turn}: the {ministry} ministry under {name} rolled {rolls:?} ({successes} successes)."),
            None,
        );
    }

    if let Some(&(_, target)) = pick(&offices, court.dice) {
        let ministry = pick(&Ministry::ALL, court.dice).copied().unwrap_or(Ministry::Agriculture);
        let attribute = if court.dice.coin() {
            Attribute::Loyalty
        } else {
            Attribute::Skill(ministry)
        };
        let value = reveal(cabinet, target, attribute, None, court).map_err(|e| e.to_string())?;
        let minister = cabinet.minister(target).map_err(|e| e.to_string())?;
        court.notify(
            &format!(
                "Turn {turn}: rumor has it {} is {} ({attribute} {value}).",
                minister.name,
                minister.apparent_state().describe(attribute)
            ),
            None,
        );
    }

    let prosecutor = cabinet.prosecutor();
    let suspects: Vec<MinisterId> = offices
        .iter()
        .map(|(_, id)| *id)
        .filter(|id| Some(*id) != prosecutor)
        .collect();
    if let Some(&target) = pick(&suspects, court.dice) {
        run_investigation(cabinet, prosecutor, target, court).map_err(|e| e.to_string())?;
    }

    let mut convicted: Vec<(Option<Ministry>, MinisterId)> = cabinet
        .iter()
        .filter(|m| m.ledger.corruption_evidence >= CONVICTION_EVIDENCE)
        .map(|m| (m.position(), m.id))
        .collect();
    convicted.sort();
    for (office, id) in convicted {
        let gone = cabinet
            .terminate(id, Departure::Convicted)
            .map_err(|e| e.to_string())?;
        convictions.push((turn, gone.name));
        if let Some(ministry) = office {
            appoint_recruit(cabinet, ministry, court)?;
        }
    }
    Ok(())
}

fn pick<'a, T>(items: &'a [T], dice: &mut dyn Dice) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let last = i32::try_from(items.len() - 1).unwrap_or(i32::MAX);
    items.get(usize::try_from(dice.roll(0, last)).unwrap_or(0))
}

fn ledger_table(cabinet: &Cabinet) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Minister",
        "Office",
        "Savings",
        "Stolen",
        "Unnoticed",
        "Evidence",
        "Reputation",
    ]);

    let mut ministers: Vec<_> = cabinet.iter().collect();
    ministers.sort_by(|a, b| a.position().cmp(&b.position()).then_with(|| a.name.cmp(&b.name)));
    for minister in ministers {
        let summary = minister.ledger_summary();
        table.add_row(vec![
            minister.name.clone(),
            super::office_label(minister),
            summary.personal_savings.to_string(),
            summary.stolen_money.to_string(),
            format!("{} ({})", summary.undetected_total, summary.undetected_events),
            summary.corruption_evidence.to_string(),
            minister
                .apparent_state()
                .describe(Attribute::Loyalty)
                .to_string(),
        ]);
    }
    table
}
