pub mod aggregate;
pub mod book;
pub mod cards;
pub mod cli;
pub mod config;
pub mod correlate;
pub mod display;
pub mod error;
pub mod event;
pub mod logline;
pub mod merge;
pub mod metric;
pub mod payload;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod store;
pub mod table;
