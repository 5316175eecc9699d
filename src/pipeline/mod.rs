pub mod extract;
pub mod matcher;
pub mod persist;
pub mod run;
pub mod summarize;

pub use extract::*;
pub use matcher::*;
pub use persist::*;
pub use run::*;
pub use summarize::*;
