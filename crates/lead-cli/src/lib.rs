//! Library side of the `lead-normalizer` binary: logging setup, the shared
//! decode/normalize/encode pipeline and the HTTP upload server.

pub mod logging;
pub mod pipeline;
pub mod server;
