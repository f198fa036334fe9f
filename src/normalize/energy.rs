use crate::TARGET_MAPPER;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What a listing states about its energy certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyCertificateStatus {
    HasCertificate,
    NotRequiredByLaw,
    ExemptByAct,
}

const PHRASES: &[(&str, EnergyCertificateStatus)] = &[
    ("Kohteella on energiatodistus", EnergyCertificateStatus::HasCertificate),
    ("Objektet har ett energicertifikat", EnergyCertificateStatus::HasCertificate),
    ("The property has an energy certificate", EnergyCertificateStatus::HasCertificate),
    ("Ei lain edellyttämää energiatodistusta", EnergyCertificateStatus::NotRequiredByLaw),
    ("Inget energicertifikat som lagen förutsätter", EnergyCertificateStatus::NotRequiredByLaw),
    ("No energy certificate required by law", EnergyCertificateStatus::NotRequiredByLaw),
    ("Energiatodistuslain mukaan ei tarvita energiatodistusta", EnergyCertificateStatus::ExemptByAct),
    ("Energicertifikat behövs inte enligt lagen om energicertifikat", EnergyCertificateStatus::ExemptByAct),
    ("Exempt under the Energy Certificate Act", EnergyCertificateStatus::ExemptByAct),
];

/// Match a certificate statement against the known phrases.
///
/// Comparison ignores case and whitespace differences only; anything else
/// must match a phrase exactly. Empty input is `None` silently, unknown
/// phrases are `None` with a warning.
pub fn classify_energy_certificate(statement: &str) -> Option<EnergyCertificateStatus> {
    let wanted = canonical(statement);
    if wanted.is_empty() {
        return None;
    }

    let status = PHRASES
        .iter()
        .find(|(phrase, _)| canonical(phrase) == wanted)
        .map(|(_, status)| *status);

    if status.is_none() {
        warn!(target: TARGET_MAPPER, statement, "Unrecognized energy certificate statement");
    }
    status
}

fn canonical(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
