//! Constant rule tables shared with the server.
//!
//! Everything here is data: substring lists, bounds, and a handful of lazily
//! compiled patterns. Validators scan the lists with
//! [`PatternScanner`](crate::security::PatternScanner).

pub mod email;
pub mod name;
pub mod password;
