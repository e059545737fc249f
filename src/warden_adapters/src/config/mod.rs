pub mod constants;
pub mod settings;

pub use settings::{
    ApplicationSettings, DatabaseSettings, EmailClientSettings, SessionSettings, Settings,
};
