//! Command execution.
//!
//! Each command maps to one registry call. Output is returned as text so the
//! binary decides where it goes.

use crate::cli::Command;
use crate::digest::{certificate_digest, CertificateFields};
use anyhow::Result;
use bc_01_certificate_registry::{CertificateRegistryApi, CertificateRecord, VerificationResponse};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Commands that need no registry. Returns `None` for everything else.
pub fn run_offline(command: &Command) -> Option<String> {
    match command {
        Command::Digest(args) => Some(certificate_digest(&CertificateFields::from(args.clone()))),
        _ => None,
    }
}

/// Run `command` against `registry`.
pub fn execute<R: CertificateRegistryApi>(registry: &mut R, command: Command) -> Result<String> {
    debug!(?command, "[runtime] Executing command");

    let output = match command {
        Command::Owner => match registry.current_owner() {
            Some(owner) => owner.to_string(),
            None => "none (ownership renounced)".to_string(),
        },
        Command::TransferOwnership { caller, new_owner } => {
            registry.transfer_ownership(caller, new_owner)?;
            format!("ownership transferred to {}", new_owner)
        }
        Command::RenounceOwnership { caller } => {
            registry.renounce_ownership(caller)?;
            "ownership renounced".to_string()
        }
        Command::RegisterIssuer {
            caller,
            issuer,
            name,
        } => {
            registry.register_issuer(caller, issuer, name.clone())?;
            format!("issuer {} registered as \"{}\"", issuer, name)
        }
        Command::DeactivateIssuer { caller, issuer } => {
            registry.deactivate_issuer(caller, issuer)?;
            format!("issuer {} deactivated", issuer)
        }
        Command::IsIssuer { principal } => match registry.get_issuer(principal) {
            Some(entry) if entry.active => format!("true ({})", entry.name),
            Some(entry) => format!("false ({}, deactivated)", entry.name),
            None => "false".to_string(),
        },
        Command::Issue {
            caller,
            student,
            course,
            hash,
        } => {
            let record = registry.create_certificate(caller, student, course, hash)?;
            format!("certificate issued\n{}", render_record(&record))
        }
        Command::Verify { hash, json } => {
            let verification = registry.verify_certificate(&hash);
            if json {
                serde_json::to_string_pretty(&VerificationResponse::from(verification))?
            } else {
                match verification.record {
                    Some(record) if verification.found => {
                        format!("valid\n{}", render_record(&record))
                    }
                    _ => format!("not found: {}", hash),
                }
            }
        }
        Command::Digest(args) => certificate_digest(&CertificateFields::from(args)),
    };

    Ok(output)
}

fn render_record(record: &CertificateRecord) -> String {
    format!(
        "  student:    {}\n  course:     {}\n  issuer:     {}\n  issued at:  {}\n  hash:       {}",
        record.subject_name,
        record.course_or_subject,
        record.issuer_name,
        format_timestamp(record.issued_at),
        record.hash,
    )
}

/// RFC 3339 in UTC; raw seconds if out of chrono's range.
pub fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}
