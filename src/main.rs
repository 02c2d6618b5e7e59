use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
mod auth;
use credhash::{Credential, HashAlgorithm, HashParams, PasswordHasher};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
struct Pbkdf2Args {
    /// Derived key (and salt) size in bytes (default: 64)
    #[arg(long, global = true, env = "CREDHASH_KEY_SIZE")]
    key_size: Option<usize>,

    /// PBKDF2 iteration count (default: 350000)
    #[arg(long, global = true, env = "CREDHASH_ITERATIONS")]
    iterations: Option<u32>,

    /// HMAC digest: sha256, sha384 or sha512 (default: sha512)
    #[arg(long, global = true, env = "CREDHASH_ALGORITHM")]
    algorithm: Option<HashAlgorithm>,
}

impl Pbkdf2Args {
    fn to_hash_params(&self) -> Result<HashParams> {
        let default = HashParams::default();

        HashParams::new(
            self.key_size.unwrap_or(default.key_size()),
            self.iterations.unwrap_or(default.iterations()),
            self.algorithm.unwrap_or(default.algorithm()),
        )
        .context("invalid hashing parameters")
    }
}

#[derive(Debug, Parser)]
#[command(name = "credhash")]
#[command(
    version,
    about = "Salted PBKDF2 password hashing and constant-time verification."
)]
struct Cli {
    #[command(flatten)]
    pbkdf2: Pbkdf2Args,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a password and prints the digest and salt as JSON
    Hash {
        /// Write the credential to a file instead of stdout
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Verifies a password against a stored digest and salt
    #[command(arg_required_else_help = true)]
    Verify {
        /// Stored digest (hex)
        #[arg(long, requires = "salt", conflicts_with = "credential")]
        digest: Option<String>,

        /// Stored salt (hex)
        #[arg(long, requires = "digest", conflicts_with = "credential")]
        salt: Option<String>,

        /// JSON credential file written by `credhash hash`
        #[arg(long, value_name = "PATH")]
        credential: Option<PathBuf>,
    },

    /// Shows the effective hashing parameters
    Params,
}

fn load_credential(
    digest: Option<String>,
    salt: Option<String>,
    path: Option<PathBuf>,
) -> Result<Credential> {
    match (digest, salt, path) {
        (Some(digest), Some(salt), None) => {
            let salt = hex::decode(salt.trim()).context("salt is not valid hex")?;
            Ok(Credential::from_parts(digest.trim(), salt))
        }
        (None, None, Some(path)) => {
            let data = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&data).context("failed to parse credential file")
        }
        _ => bail!("provide either --digest and --salt, or --credential"),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Cli::parse();
    let params = args.pbkdf2.to_hash_params()?;
    let hasher = PasswordHasher::with_params(&params);

    match args.command {
        Commands::Hash { output } => {
            let password = auth::read_new_password_with_confirmation()?;
            let credential = hasher.hash(&password)?;
            drop(password);

            if credential.is_empty() {
                bail!("password cannot be empty");
            }

            let json = serde_json::to_string_pretty(&credential)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("credential written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Verify {
            digest,
            salt,
            credential,
        } => {
            let credential = load_credential(digest, salt, credential)?;
            let password = auth::read_password()?;

            if hasher.verify_credential(&password, &credential) {
                println!("password verified");
            } else {
                bail!("password does not match");
            }
        }
        Commands::Params => {
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
    }

    Ok(())
}
