pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod locate;
pub mod model;
pub mod pipeline;
pub mod rank;
pub mod render;
pub mod util;
