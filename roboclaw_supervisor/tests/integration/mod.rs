pub mod support;

mod cli;
mod dispatch;
mod error_monitor;
mod pipe;
mod startup;
