pub mod errors;
pub mod probe;
pub mod rpc;

pub use errors::*;
pub use probe::*;
pub use rpc::*;
