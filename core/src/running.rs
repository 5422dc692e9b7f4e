pub mod case;
pub mod executor;
pub mod outcome;
pub mod pair;
pub mod pool;

pub use case::*;
pub use outcome::*;
pub use pair::*;
pub use pool::*;
