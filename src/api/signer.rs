//! Request Signing
//!
//! Signs request messages with an ECDSA private key by running the system
//! `openssl` binary. Key material never leaves the PEM file on disk.

use super::auth::Signer;
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Signer backed by `openssl dgst -sha256 -sign <key.pem>`
#[derive(Debug, Clone)]
pub struct OpensslSigner {
    /// Path to the PEM encoded private key
    key_path: PathBuf,
    /// openssl binary to execute
    program: String,
}

impl OpensslSigner {
    pub fn new(key_path: impl AsRef<Path>) -> Result<Self> {
        let key_path = key_path.as_ref().to_path_buf();
        if !key_path.is_file() {
            return Err(Error::Config(format!(
                "private key not found: {}",
                key_path.display()
            )));
        }
        Ok(Self {
            key_path,
            program: "openssl".to_string(),
        })
    }

    /// Use a specific openssl binary instead of the one on `PATH`
    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }
}

impl Signer for OpensslSigner {
    fn sign(&self, message: &str) -> Result<String> {
        let args = [
            "dgst".to_string(),
            "-sha256".to_string(),
            "-sign".to_string(),
            self.key_path.display().to_string(),
        ];

        tracing::trace!("Executing: {} {}", self.program, args.join(" "));

        let signature = execute_with_input(&self.program, &args, message.as_bytes())?;
        if signature.is_empty() {
            return Err(Error::Signing(format!("{} produced no signature", self.program)));
        }
        Ok(STANDARD.encode(signature))
    }
}

/// Execute a command feeding `input` on stdin and capturing stdout
fn execute_with_input(cmd: &str, args: &[String], input: &[u8]) -> Result<Vec<u8>> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Signing(format!("Failed to execute {}: {}", cmd, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(input)
            .map_err(|e| Error::Signing(format!("Failed to write to {}: {}", cmd, e)))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| Error::Signing(format!("Failed to wait for process: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Signing(format!(
            "{} exited with {}: {}",
            cmd,
            output.status.code().unwrap_or(-1),
            stderr.trim()
        )));
    }

    Ok(output.stdout)
}
