//! Canonical QR payload.
//!
//! The same string is encoded in both QR codes of a document. It embeds the
//! generation timestamp, so two renders of one request differ in their first
//! line.

use chrono::{NaiveDate, NaiveDateTime};

use crate::request::AttestationRequest;

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_time(date_time: NaiveDateTime) -> String {
    date_time.format("%H:%M").to_string()
}

pub fn full_name(request: &AttestationRequest) -> String {
    format!("{} {}", request.first_name, request.last_name)
}

/// Address, postal code and city, skipping blank parts.
pub fn full_address(request: &AttestationRequest) -> String {
    [&request.address, &request.postal_code, &request.city]
        .iter()
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn reason_codes(request: &AttestationRequest) -> String {
    request
        .reasons
        .iter()
        .map(|reason| reason.code())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Exit moment in the wall-clock time of its own offset.
pub fn exit_local(request: &AttestationRequest) -> NaiveDateTime {
    request.exit_date_time.naive_local()
}

pub fn format_payload(request: &AttestationRequest, generated_at: NaiveDateTime) -> String {
    let exit = exit_local(request);
    let lines = [
        format!(
            "Cree le: {} a {};",
            format_date(generated_at.date()),
            generated_at.format("%Hh%M")
        ),
        format!("Nom: {};", request.last_name),
        format!("Prenom: {};", request.first_name),
        format!(
            "Naissance: {} a {};",
            format_date(request.birth_date),
            request.birth_place
        ),
        format!("Adresse: {};", full_address(request)),
        format!(
            "Sortie: {} a {};",
            format_date(exit.date()),
            format_time(exit)
        ),
        format!("Motifs: {}", reason_codes(request)),
    ];
    lines.join("\n ")
}
