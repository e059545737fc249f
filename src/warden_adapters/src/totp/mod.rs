pub mod totp_rs_engine;

pub use totp_rs_engine::TotpRsEngine;
