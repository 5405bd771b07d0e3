//! Request model for a single attestation.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use std::collections::BTreeSet;

/// Travel reasons that can be ticked on the form.
///
/// Declaration order is the rendering order: it drives both the checkbox
/// sequence on page 1 and the `Motifs` line of the QR payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reason {
    Work,
    Shopping,
    Health,
    Family,
    Disability,
    SportAnimals,
    Convocation,
    Missions,
    Children,
}

impl Reason {
    pub const ALL: [Reason; 9] = [
        Reason::Work,
        Reason::Shopping,
        Reason::Health,
        Reason::Family,
        Reason::Disability,
        Reason::SportAnimals,
        Reason::Convocation,
        Reason::Missions,
        Reason::Children,
    ];

    /// Token used in the QR payload
    pub const fn code(self) -> &'static str {
        match self {
            Reason::Work => "travail",
            Reason::Shopping => "achats",
            Reason::Health => "sante",
            Reason::Family => "famille",
            Reason::Disability => "handicap",
            Reason::SportAnimals => "sport_animaux",
            Reason::Convocation => "convocation",
            Reason::Missions => "missions",
            Reason::Children => "enfants",
        }
    }
}

/// A requester's declaration, already validated by the input layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationRequest {
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    pub city: String,
    pub postal_code: String,
    pub address: String,
    pub exit_date_time: DateTime<FixedOffset>,
    pub reasons: BTreeSet<Reason>,
}
