pub mod councillor;
pub mod meeting;
pub mod speech;

pub use councillor::*;
pub use meeting::*;
pub use speech::*;
