mod quota;
mod records;
mod timestamp;

pub use quota::*;
pub use records::*;
pub use timestamp::*;
