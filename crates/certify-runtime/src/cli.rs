//! Command-line surface of the `certify` binary.

use crate::container::{RuntimeConfig, StorageBackend};
use crate::digest::CertificateFields;
use clap::{Args, Parser, Subcommand};
use shared_types::Principal;
use std::path::PathBuf;

/// certify: certificate registry host
#[derive(Parser, Debug)]
#[command(name = "certify", version)]
#[command(about = "Issue and verify certificates against the registry")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags that override the environment configuration.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage backend: file, memory or rocksdb
    #[arg(long, global = true)]
    pub backend: Option<StorageBackend>,

    /// Owner installed if the registry does not exist yet
    #[arg(long, global = true)]
    pub owner: Option<Principal>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

impl GlobalArgs {
    pub fn apply_to(&self, config: &mut RuntimeConfig) {
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = dir.clone();
        }
        if let Some(backend) = self.backend {
            config.storage.backend = backend;
        }
        if let Some(owner) = self.owner {
            config.genesis_owner = Some(owner);
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the current owner
    Owner,

    /// Hand the owner role to another principal
    TransferOwnership {
        #[arg(long)]
        caller: Principal,
        #[arg(long)]
        new_owner: Principal,
    },

    /// Give up the owner role permanently
    RenounceOwnership {
        #[arg(long)]
        caller: Principal,
    },

    /// Whitelist (or rename) an issuing authority
    RegisterIssuer {
        #[arg(long)]
        caller: Principal,
        #[arg(long)]
        issuer: Principal,
        #[arg(long)]
        name: String,
    },

    /// Disable an issuing authority
    DeactivateIssuer {
        #[arg(long)]
        caller: Principal,
        #[arg(long)]
        issuer: Principal,
    },

    /// Check whether a principal may issue
    IsIssuer { principal: Principal },

    /// Create a certificate record
    Issue {
        #[arg(long)]
        caller: Principal,
        #[arg(long)]
        student: String,
        #[arg(long)]
        course: String,
        #[arg(long)]
        hash: String,
    },

    /// Look up a certificate by hash
    Verify {
        hash: String,
        /// Print the verification API payload
        #[arg(long)]
        json: bool,
    },

    /// Compute the content hash of certificate fields
    Digest(DigestArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DigestArgs {
    #[arg(long)]
    pub student: String,
    #[arg(long)]
    pub course: String,
    #[arg(long)]
    pub university: String,
    #[arg(long)]
    pub period: String,
    #[arg(long)]
    pub score: String,
}

impl From<DigestArgs> for CertificateFields {
    fn from(args: DigestArgs) -> Self {
        Self {
            student: args.student,
            course: args.course,
            university: args.university,
            period: args.period,
            score: args.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "0x1111111111111111111111111111111111111111";
    const UNI: &str = "0x2222222222222222222222222222222222222222";

    #[test]
    fn test_parse_register_issuer() {
        let cli = Cli::try_parse_from([
            "certify",
            "register-issuer",
            "--caller",
            OWNER,
            "--issuer",
            UNI,
            "--name",
            "Harvard",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::RegisterIssuer {
                caller: Principal::new([0x11; 20]),
                issuer: Principal::new([0x22; 20]),
                name: "Harvard".to_string(),
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "certify", "verify", "hash123", "--json", "--backend", "memory", "--owner", OWNER,
        ])
        .unwrap();

        let mut config = RuntimeConfig::default();
        cli.global.apply_to(&mut config);

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.genesis_owner, Some(Principal::new([0x11; 20])));
        assert_eq!(
            cli.command,
            Command::Verify {
                hash: "hash123".to_string(),
                json: true
            }
        );
    }

    #[test]
    fn test_bad_principal_is_usage_error() {
        let result = Cli::try_parse_from(["certify", "is-issuer", "0x1234"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_mutations_require_caller() {
        let result = Cli::try_parse_from(["certify", "renounce-ownership"]);
        assert!(result.is_err());
    }
}
