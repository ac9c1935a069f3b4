//! Backup CLI commands
//!
//! Implements `save` (one call through the backup channel) and `serve`
//! (line-delimited calls over stdio).

use std::io::{self, Read};
use std::path::PathBuf;

use clap::Args;

use crate::backup::Clock;
use crate::channel::{BackupChannel, BridgeResponse, MethodCall};
use crate::error::{BackupError, BackupResult};
use crate::storage::CloudStore;

/// Arguments for `save`
#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Payload text (reads stdin when neither --data nor --file is given)
    #[arg(short, long, conflicts_with = "file")]
    pub data: Option<String>,

    /// Read the payload from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl SaveArgs {
    /// Read the payload from whichever source was given
    pub fn read_payload(&self) -> BackupResult<String> {
        if let Some(data) = &self.data {
            return Ok(data.clone());
        }

        if let Some(path) = &self.file {
            return std::fs::read_to_string(path).map_err(|e| {
                BackupError::Io(format!("Failed to read {}: {}", path.display(), e))
            });
        }

        let mut payload = String::new();
        io::stdin()
            .read_to_string(&mut payload)
            .map_err(|e| BackupError::Io(format!("Failed to read payload from stdin: {}", e)))?;
        Ok(payload)
    }
}

/// Run a single `saveBackup` call and print the response as JSON
pub fn handle_save<S: CloudStore, C: Clock>(
    channel: &BackupChannel<S, C>,
    args: &SaveArgs,
) -> BackupResult<BridgeResponse> {
    let payload = args.read_payload()?;
    let response = channel.handle(&MethodCall::save_backup(payload));

    let json = serde_json::to_string(&response)
        .map_err(|e| BackupError::Io(format!("Failed to encode response: {}", e)))?;
    println!("{}", json);

    Ok(response)
}

/// Serve calls from stdin until it closes
pub fn handle_serve<S: CloudStore, C: Clock>(channel: &BackupChannel<S, C>) -> BackupResult<usize> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    channel.serve(stdin.lock(), stdout.lock())
}
