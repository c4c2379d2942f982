pub mod aggregate;
pub mod charts;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod openai;
pub mod output;
pub mod report;
pub mod server;
pub mod source;
pub mod summarize;
