//! Backup channel: the request/response surface the UI layer calls
//!
//! Calls arrive as a method name plus loosely typed arguments, are parsed
//! into a typed [`BridgeRequest`], and are answered with a
//! [`BridgeResponse`]:
//!
//! - `saveBackup` with a text `data` argument persists a backup and answers
//!   `null`
//! - a missing or non-text `data` is answered with `invalid_args` before any
//!   storage is touched
//! - storage failures are answered with `no_container` or `write_error`
//! - any other method is answered as not implemented
//!
//! [`BackupChannel::serve`] runs the same dispatch over line-delimited JSON,
//! one call per line, for hosts talking to the bridge over stdio.

mod call;
mod dispatcher;
mod response;

pub use call::{BridgeRequest, MethodCall, MISSING_PAYLOAD_MESSAGE, SAVE_BACKUP_METHOD};
pub use dispatcher::BackupChannel;
pub use response::{BridgeResponse, ChannelError, ResponseOutcome};
