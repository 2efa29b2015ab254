pub mod enums;
pub mod report;
pub mod vital_sign;

pub use enums::*;
pub use report::*;
pub use vital_sign::*;
