// ptu-dispatch-types: shared types, the transport seam, and errors

pub mod completion;
pub mod config;
pub mod error;
pub mod message;
pub mod target;
pub mod transport;

pub use completion::*;
pub use config::*;
pub use error::*;
pub use message::*;
pub use target::*;
pub use transport::*;
