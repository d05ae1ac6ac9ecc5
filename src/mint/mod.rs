pub mod assembler;
pub mod errors;
pub mod instruction;
pub mod process;
pub mod resolver;
pub mod submit;

pub use assembler::*;
pub use errors::*;
pub use instruction::*;
pub use process::*;
pub use resolver::*;
pub use submit::*;
