//! Built-in Abyssdawn skill table
//!
//! Hand-authored display values, one record per skill, exported as-is.

use crate::types::Record;

/// Default workbook written when no output path is given
pub const DEFAULT_OUTPUT: &str = "SkillDataList.xlsx";

/// Default name of the single worksheet
pub const DEFAULT_SHEET: &str = "Skills";

/// Header order of the skill table
pub const SKILL_COLUMNS: [&str; 10] = [
    "Skill ID / Name",
    "Damage Type",
    "Scale Stat",
    "Cost",
    "Multiplier",
    "Self Damage",
    "Target Curse Type",
    "Target Curse Chance",
    "Self Curse Type",
    "Self Curse Chance",
];

// One row per skill, values aligned with SKILL_COLUMNS
#[rustfmt::skip]
const SKILL_ROWS: [[&str; 10]; 7] = [
    ["01 Strong Slash", "Physical", "Attack", "HP 10% / MP 0", "2.0 ~ 2.5", "0% (chance 0%)", "", "0%", "", "0%"],
    ["02 Fireball", "Magic", "Magic", "HP 0% / MP 5", "1.8 ~ 2.3", "10% (chance 0%)", "", "0%", "", "0%"],
    ["03 Slash", "Physical", "Attack", "HP 5% / MP 0", "1.5 ~ 1.8", "0% (chance 0%)", "", "0%", "", "0%"],
    ["04 Meditation", "Magic", "Magic", "HP 0% / MP 0", "0 ~ 0", "0% (chance 0%)", "", "0%", "", "0%"],
    ["05 Magic Bolt", "Magic", "Magic", "HP 0% / MP 3", "1.2 ~ 1.3", "10% (chance 5%)", "", "0%", "", "0%"],
    ["06 Quickhand", "Physical", "Agility", "HP 0% / MP 0", "0.6 ~ 0.8", "0% (chance 0%)", "", "0%", "", "0%"],
    ["07 Shield Wall", "Physical", "Attack", "HP 0% / MP 0", "0 ~ 0", "0% (chance 0%)", "", "0%", "", "0%"],
];

/// The built-in skill records, in table order
pub fn skill_records() -> Vec<Record> {
    SKILL_ROWS
        .iter()
        .map(|row| SKILL_COLUMNS.iter().copied().zip(row.iter().copied()).collect())
        .collect()
}
