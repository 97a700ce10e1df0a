//! Command implementations.

pub mod convert;
pub mod inspect;
pub mod recommend;
pub mod validate;

pub use self::convert::execute_convert;
pub use self::inspect::execute_inspect;
pub use self::recommend::execute_recommend;
pub use self::validate::execute_validate;
