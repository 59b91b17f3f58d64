////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2020 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// No name of the command's fallback chain resolved on this context.
    #[error("{command} (and other aliases) are not implemented, tried {}", .chain.join(", "))]
    NotImplemented { command: String, chain: Vec<String> },
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// A `CommandId` handed to a context whose table did not issue it.
    #[error("command id {0} does not belong to this dispatch table")]
    ForeignCommandId(usize),
    /// The error query reported a failure after a call.
    #[error("{command} raised native error 0x{code:04X}")]
    NativeError { command: String, code: u32 },
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: libloading::Error,
    },
}
