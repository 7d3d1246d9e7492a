//! Flat key/value records for saving and loading ministers.
//!
//! A record holds every persisted field of a minister, hidden and apparent,
//! under dotted keys such as `hidden.skill.commerce` or `ledger.savings`.
//! Records are `BTreeMap`s, so their JSON form is byte-for-byte stable.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cabinet::Cabinet;
use crate::error::{CabinetResult, RecordError};
use crate::ledger::{Ledger, TheftRecord};
use crate::minister::{
    Apparent, ApparentState, Background, HiddenTraits, Minister, MinisterId, MinisterParts,
};
use crate::ministry::Ministry;

/// A single value in a flat record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordValue {
    /// A whole number.
    Integer(i64),
    /// A yes/no flag.
    Flag(bool),
    /// A text value.
    Text(String),
    /// An ordered list of text values.
    List(Vec<String>),
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// A minister flattened into dotted keys.
pub type Record = BTreeMap<String, RecordValue>;

/// Flatten a minister into a record.
pub fn to_record(minister: &Minister) -> Record {
    let mut record = Record::new();
    let hidden = minister.hidden();
    let apparent = minister.apparent_state();
    let ledger = &minister.ledger;

    record.insert("id".into(), RecordValue::Text(minister.id.0.to_string()));
    record.insert("name".into(), RecordValue::Text(minister.name.clone()));
    record.insert(
        "background".into(),
        RecordValue::Text(minister.background.key().to_string()),
    );

    record.insert(
        "hidden.general_skill".into(),
        RecordValue::Integer(i64::from(hidden.general_skill())),
    );
    record.insert(
        "hidden.corruption".into(),
        RecordValue::Integer(i64::from(hidden.corruption())),
    );
    for m in Ministry::ALL {
        record.insert(
            format!("hidden.skill.{}", m.key()),
            RecordValue::Integer(i64::from(hidden.specific_skill(m))),
        );
    }

    for (m, belief) in &apparent.skills {
        insert_apparent(&mut record, &format!("apparent.skill.{}", m.key()), belief);
    }
    if let Some(belief) = &apparent.corruption {
        insert_apparent(&mut record, "apparent.corruption", belief);
    }

    record.insert(
        "ledger.savings".into(),
        RecordValue::Integer(ledger.personal_savings),
    );
    record.insert(
        "ledger.stolen".into(),
        RecordValue::Integer(ledger.stolen_money),
    );
    record.insert(
        "ledger.evidence".into(),
        RecordValue::Integer(i64::from(ledger.corruption_evidence)),
    );
    record.insert(
        "ledger.fabricated_evidence".into(),
        RecordValue::Integer(i64::from(ledger.fabricated_evidence)),
    );
    record.insert(
        "ledger.undetected".into(),
        RecordValue::List(ledger.undetected.iter().map(|r| r.to_string()).collect()),
    );

    if let Some(role) = minister.position() {
        record.insert("position".into(), RecordValue::Text(role.key().to_string()));
    }
    record.insert(
        "just_removed".into(),
        RecordValue::Flag(minister.just_removed()),
    );

    record
}

fn insert_apparent(record: &mut Record, key: &str, belief: &Apparent) {
    record.insert(key.to_string(), RecordValue::Integer(i64::from(belief.value)));
    record.insert(
        format!("{key}.description"),
        RecordValue::Text(belief.description.clone()),
    );
}

/// Rebuild a minister from a record.
pub fn from_record(record: &Record) -> Result<Minister, RecordError> {
    let id_text = text(record, "id")?;
    let id = Uuid::parse_str(id_text)
        .map(MinisterId)
        .map_err(|_| invalid("id", id_text))?;
    let name = text(record, "name")?.to_string();
    let background_key = text(record, "background")?;
    let background =
        Background::from_key(background_key).ok_or_else(|| invalid("background", background_key))?;

    let general = scale(record, "hidden.general_skill", 1, 3)?;
    let corruption = scale(record, "hidden.corruption", 1, 6)?;
    let mut specific = Vec::with_capacity(Ministry::ALL.len());
    for m in Ministry::ALL {
        let key = format!("hidden.skill.{}", m.key());
        specific.push((m, scale(record, &key, 0, 6 - general)?));
    }
    let hidden = HiddenTraits::new(general, &specific, corruption);

    let mut apparent = ApparentState::default();
    for m in Ministry::ALL {
        if let Some(belief) = read_apparent(record, &format!("apparent.skill.{}", m.key()))? {
            apparent.skills.insert(m, belief);
        }
    }
    apparent.corruption = read_apparent(record, "apparent.corruption")?;

    let undetected = list(record, "ledger.undetected")?
        .iter()
        .map(|s| TheftRecord::parse(s).ok_or_else(|| invalid("ledger.undetected", s)))
        .collect::<Result<Vec<_>, _>>()?;
    let ledger = Ledger {
        personal_savings: non_negative(record, "ledger.savings")?,
        stolen_money: non_negative(record, "ledger.stolen")?,
        undetected,
        corruption_evidence: count(record, "ledger.evidence")?,
        fabricated_evidence: count(record, "ledger.fabricated_evidence")?,
    };

    let position = match record.get("position") {
        None => None,
        Some(RecordValue::Text(key)) => {
            Some(Ministry::from_key(key).ok_or_else(|| invalid("position", key))?)
        }
        Some(_) => return Err(wrong_type("position", "text")),
    };
    let just_removed = match record.get("just_removed") {
        Some(RecordValue::Flag(b)) => *b,
        Some(_) => return Err(wrong_type("just_removed", "a flag")),
        None => return Err(RecordError::MissingField("just_removed".into())),
    };
    // Only an unappointed minister can carry the removal mark.
    if just_removed && position.is_some() {
        return Err(invalid("just_removed", true));
    }

    Ok(Minister::from_parts(MinisterParts {
        id,
        name,
        background,
        hidden,
        apparent,
        ledger,
        position,
        just_removed,
    }))
}

impl Cabinet {
    /// One record per minister, sorted by ID.
    pub fn to_records(&self) -> Vec<Record> {
        let mut ministers: Vec<&Minister> = self.iter().collect();
        ministers.sort_by_key(|m| m.id);
        ministers.into_iter().map(to_record).collect()
    }

    /// Rebuild a roster from records, restoring offices from each
    /// record's `position`.
    pub fn from_records(records: &[Record]) -> CabinetResult<Self> {
        let mut cabinet = Cabinet::new();
        for record in records {
            cabinet.restore(from_record(record)?)?;
        }
        Ok(cabinet)
    }
}

// --- Field readers ---

fn wrong_type(field: &str, expected: &'static str) -> RecordError {
    RecordError::WrongType {
        field: field.to_string(),
        expected,
    }
}

fn invalid(field: &str, value: impl fmt::Display) -> RecordError {
    RecordError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn text<'a>(record: &'a Record, key: &str) -> Result<&'a str, RecordError> {
    match record.get(key) {
        Some(RecordValue::Text(s)) => Ok(s),
        Some(_) => Err(wrong_type(key, "text")),
        None => Err(RecordError::MissingField(key.to_string())),
    }
}

fn integer(record: &Record, key: &str) -> Result<i64, RecordError> {
    match record.get(key) {
        Some(RecordValue::Integer(n)) => Ok(*n),
        Some(_) => Err(wrong_type(key, "an integer")),
        None => Err(RecordError::MissingField(key.to_string())),
    }
}

fn list<'a>(record: &'a Record, key: &str) -> Result<&'a [String], RecordError> {
    match record.get(key) {
        Some(RecordValue::List(items)) => Ok(items),
        Some(_) => Err(wrong_type(key, "a list")),
        None => Err(RecordError::MissingField(key.to_string())),
    }
}

fn scale(record: &Record, key: &str, min: u8, max: u8) -> Result<u8, RecordError> {
    let n = integer(record, key)?;
    u8::try_from(n)
        .ok()
        .filter(|v| (min..=max).contains(v))
        .ok_or_else(|| invalid(key, n))
}

fn non_negative(record: &Record, key: &str) -> Result<i64, RecordError> {
    let n = integer(record, key)?;
    if n < 0 {
        return Err(invalid(key, n));
    }
    Ok(n)
}

fn count(record: &Record, key: &str) -> Result<u32, RecordError> {
    let n = integer(record, key)?;
    u32::try_from(n).map_err(|_| invalid(key, n))
}

fn read_apparent(record: &Record, key: &str) -> Result<Option<Apparent>, RecordError> {
    if !record.contains_key(key) {
        return Ok(None);
    }
    let value = scale(record, key, 1, 6)?;
    let description = text(record, &format!("{key}.description"))?.to_string();
    Ok(Some(Apparent { value, description }))
}
