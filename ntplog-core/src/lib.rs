pub mod cli;
pub mod conf;
pub mod export;
pub mod logging;
pub mod parse;
pub mod stats;
