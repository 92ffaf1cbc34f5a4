//! Command-line front end for EccFrog512CK2
//!
//! Key management, signing and encryption over files. Key material moves as
//! PEM; signatures are the fixed 128-byte `r ∥ s` wire format; encrypted
//! files use the length-prefixed ECIES blob layout. Secret outputs (private
//! keys, shared secrets) are written with mode 0600, everything else 0644.

use std::fs;
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::OsRng;
use sha2::Sha256;

use eccfrog512ck2::aead::Aes256GcmCipher;
use eccfrog512ck2::ecies::EciesCiphertext;
use eccfrog512ck2::kdf::HkdfSha256;
use eccfrog512ck2::{ecdh, ecdsa, ecies, pem, PrivateKey, PublicKey};

#[derive(Parser)]
#[command(
    name = "eccfrog512ck2",
    about = "Key generation, signing, verification, encryption and key exchange on the EccFrog512CK2 curve"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a private key and write it as PEM
    Genpkey {
        /// Output file for the private key
        #[arg(long)]
        out: PathBuf,
    },
    /// Derive the public key from a private key PEM
    Pkey {
        /// Input file containing the private key
        #[arg(long = "in")]
        input: PathBuf,
        /// Output file for the public key
        #[arg(long)]
        out: PathBuf,
        /// Emit the public key (the only supported mode)
        #[arg(long)]
        pubout: bool,
    },
    /// Sign a file with ECDSA over SHA-256
    Sign {
        /// Input file to sign
        #[arg(long = "in")]
        input: PathBuf,
        /// Output file for the 128-byte signature
        #[arg(long)]
        out: PathBuf,
        /// Private key file
        #[arg(long)]
        inkey: PathBuf,
    },
    /// Verify an ECDSA signature
    Verify {
        /// Input file that was signed
        #[arg(long = "in")]
        input: PathBuf,
        /// Signature file
        #[arg(long)]
        sigfile: PathBuf,
        /// Public key file
        #[arg(long)]
        inkey: PathBuf,
    },
    /// Encrypt a file with ECIES (AES-256-GCM, HKDF-SHA-256)
    Encrypt {
        /// Input file to encrypt
        #[arg(long = "in")]
        input: PathBuf,
        /// Output file for the encrypted blob
        #[arg(long)]
        out: PathBuf,
        /// Recipient public key file
        #[arg(long)]
        inkey: PathBuf,
    },
    /// Decrypt an ECIES-encrypted file
    Decrypt {
        /// Input file to decrypt
        #[arg(long = "in")]
        input: PathBuf,
        /// Output file for the plaintext
        #[arg(long)]
        out: PathBuf,
        /// Private key file
        #[arg(long)]
        inkey: PathBuf,
    },
    /// Derive an ECDH shared secret
    Ecdh {
        /// Private key file
        #[arg(long)]
        inkey: PathBuf,
        /// Peer public key file
        #[arg(long)]
        peerkey: PathBuf,
        /// Output file for the shared secret
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Render clap's diagnostic but keep the documented exit status.
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Genpkey { out } => genpkey(&out),
        Command::Pkey { input, out, pubout } => pkey(&input, &out, pubout),
        Command::Sign { input, out, inkey } => sign(&input, &out, &inkey),
        Command::Verify {
            input,
            sigfile,
            inkey,
        } => verify(&input, &sigfile, &inkey),
        Command::Encrypt { input, out, inkey } => encrypt(&input, &out, &inkey),
        Command::Decrypt { input, out, inkey } => decrypt(&input, &out, &inkey),
        Command::Ecdh {
            inkey,
            peerkey,
            out,
        } => derive_ecdh(&inkey, &peerkey, &out),
    }
}

fn genpkey(out: &Path) -> Result<ExitCode> {
    let key = PrivateKey::generate(&mut OsRng).context("failed to generate private key")?;
    write_secret(out, pem::encode_private_key(&key).as_bytes())
        .with_context(|| format!("failed to write private key to {}", out.display()))?;
    println!("Private key written to {}", out.display());
    Ok(ExitCode::SUCCESS)
}

fn pkey(input: &Path, out: &Path, pubout: bool) -> Result<ExitCode> {
    anyhow::ensure!(pubout, "currently only --pubout is supported");

    let private = read_private_key(input)?;
    let public = private
        .derive_public()
        .context("failed to derive public key")?;

    write_public(out, pem::encode_public_key(&public).as_bytes())
        .with_context(|| format!("failed to write public key to {}", out.display()))?;
    println!("Public key written to {}", out.display());
    Ok(ExitCode::SUCCESS)
}

fn sign(input: &Path, out: &Path, inkey: &Path) -> Result<ExitCode> {
    let private = read_private_key(inkey)?;
    let message = fs::read(input)
        .with_context(|| format!("failed to read input file {}", input.display()))?;

    let signature = ecdsa::sign::<Sha256, _>(&private, &mut OsRng, &message)
        .context("failed to sign message")?;

    write_public(out, &signature.to_bytes())
        .with_context(|| format!("failed to write signature to {}", out.display()))?;
    println!("Signature written to {}", out.display());
    Ok(ExitCode::SUCCESS)
}

fn verify(input: &Path, sigfile: &Path, inkey: &Path) -> Result<ExitCode> {
    let public = read_public_key(inkey)?;
    let message = fs::read(input)
        .with_context(|| format!("failed to read input file {}", input.display()))?;
    let sig_bytes = fs::read(sigfile)
        .with_context(|| format!("failed to read signature file {}", sigfile.display()))?;

    let signature =
        ecdsa::Signature::from_bytes(&sig_bytes).context("failed to parse signature")?;

    match ecdsa::verify::<Sha256>(&public, &message, &signature) {
        Ok(()) => {
            println!("Signature is valid");
            Ok(ExitCode::SUCCESS)
        }
        Err(eccfrog512ck2::Error::InvalidSignature) => {
            println!("Signature is invalid");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err).context("failed to verify signature"),
    }
}

fn encrypt(input: &Path, out: &Path, inkey: &Path) -> Result<ExitCode> {
    let public = read_public_key(inkey)?;
    let message = fs::read(input)
        .with_context(|| format!("failed to read input file {}", input.display()))?;

    let ciphertext = ecies::encrypt(&HkdfSha256, &Aes256GcmCipher, &mut OsRng, &public, &message)
        .context("failed to encrypt message")?;

    write_public(out, &ciphertext.to_bytes())
        .with_context(|| format!("failed to write encrypted file to {}", out.display()))?;
    println!("Encrypted file written to {}", out.display());
    Ok(ExitCode::SUCCESS)
}

fn decrypt(input: &Path, out: &Path, inkey: &Path) -> Result<ExitCode> {
    let private = read_private_key(inkey)?;
    let blob = fs::read(input)
        .with_context(|| format!("failed to read input file {}", input.display()))?;

    let ciphertext = EciesCiphertext::from_bytes(&blob).context("failed to parse input file")?;
    let plaintext = ecies::decrypt(&HkdfSha256, &Aes256GcmCipher, &private, &ciphertext)
        .context("failed to decrypt message")?;

    write_public(out, &plaintext)
        .with_context(|| format!("failed to write decrypted file to {}", out.display()))?;
    println!("Decrypted file written to {}", out.display());
    Ok(ExitCode::SUCCESS)
}

fn derive_ecdh(inkey: &Path, peerkey: &Path, out: &Path) -> Result<ExitCode> {
    let private = read_private_key(inkey)?;
    let peer = read_public_key(peerkey)?;

    let secret =
        ecdh::derive_shared_secret(&private, &peer).context("failed to derive shared secret")?;

    write_secret(out, secret.as_slice())
        .with_context(|| format!("failed to write shared secret to {}", out.display()))?;
    println!("Shared secret written to {}", out.display());
    Ok(ExitCode::SUCCESS)
}

fn read_private_key(path: &Path) -> Result<PrivateKey> {
    let pem_bytes =
        fs::read(path).with_context(|| format!("failed to read private key {}", path.display()))?;
    pem::decode_private_key(&pem_bytes).context("failed to parse private key")
}

fn read_public_key(path: &Path) -> Result<PublicKey> {
    let pem_bytes =
        fs::read(path).with_context(|| format!("failed to read public key {}", path.display()))?;
    pem::decode_public_key(&pem_bytes).context("failed to parse public key")
}

/// Write key material readable by the owner only.
fn write_secret(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents)
}

/// Write non-secret output with the usual permissions.
fn write_public(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(path)?;
    file.write_all(contents)
}
