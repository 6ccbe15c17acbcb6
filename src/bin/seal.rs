// src/bin/seal.rs
//! seal: password-encrypt and decrypt files from the command line
//!
//!   seal encrypt <input> <output>   writes <output> and <output>.seal.json
//!   seal decrypt <input> <output>   reads <input>.seal.json
//!
//! Logging honours RUST_LOG.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use encrypted_data_toolkit::{open_file, seal_file, FileSeal, Password, ProtectOptions};
use rpassword::read_password;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SEAL_SUFFIX: &str = "seal.json";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [command, input, output] = args.as_slice() else {
        bail!("usage: seal <encrypt|decrypt> <input> <output>");
    };
    let (input, output) = (Path::new(input), Path::new(output));

    match command.as_str() {
        "encrypt" => encrypt(input, output),
        "decrypt" => decrypt(input, output),
        other => bail!("unknown command {other:?} (expected encrypt or decrypt)"),
    }
}

fn seal_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(SEAL_SUFFIX);
    PathBuf::from(name)
}

fn prompt_password(prompt: &str) -> Result<Password> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let input = read_password().context("failed to read password")?;
    Ok(Password::new(input))
}

fn encrypt(input: &Path, output: &Path) -> Result<()> {
    let password = prompt_password("Password: ")?;
    let confirm = prompt_password("Confirm password: ")?;
    if password.expose_secret() != confirm.expose_secret() {
        bail!("passwords do not match");
    }

    let options = ProtectOptions::from_config();
    let seal = seal_file(input, output, password.expose_secret(), &options)
        .with_context(|| format!("failed to encrypt {}", input.display()))?;

    let seal_file_path = seal_path(output);
    seal.write_to(&seal_file_path)
        .with_context(|| format!("failed to write {}", seal_file_path.display()))?;

    info!(
        bytes = seal.plaintext_len,
        output = %output.display(),
        seal = %seal_file_path.display(),
        "ENCRYPTED"
    );
    Ok(())
}

fn decrypt(input: &Path, output: &Path) -> Result<()> {
    let seal_file_path = seal_path(input);
    let seal = FileSeal::read_from(&seal_file_path)
        .with_context(|| format!("failed to read {}", seal_file_path.display()))?;

    let password = prompt_password("Password: ")?;
    let stats = open_file(input, output, &seal, password.expose_secret())
        .with_context(|| format!("failed to decrypt {} (wrong password?)", input.display()))?;

    info!(
        bytes = stats.bytes_written,
        output = %output.display(),
        "DECRYPTED"
    );
    Ok(())
}
