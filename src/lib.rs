pub mod cli;
pub mod error;
pub mod list;
pub mod net;
pub mod pipeline;
pub mod settings;
