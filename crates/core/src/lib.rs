pub mod config;
pub mod content;
pub mod entity;
pub mod error;
pub mod event;
pub mod theme;

pub use config::Config;
pub use content::*;
pub use entity::*;
pub use error::*;
pub use event::*;
pub use theme::*;
