pub mod access;

pub use access::{AuthCtx, USER_CODE_HEADER, authenticate};
