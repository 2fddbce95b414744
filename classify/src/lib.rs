//! Send one prompt to a text-completion service and print the trimmed answer.
//!
//! With no arguments the stock classification request is sent:
//! model `text-davinci-003`, a ten-token cap, and a prompt asking which of
//! `urgent`, `social` or `work` fits the message "Meeting at 3 PM.".

pub mod cli;
pub mod config;
pub mod error;
pub mod invoker;

pub use config::InvokerConfig;
pub use error::ClassifyError;
pub use invoker::{Invoker, extract_answer};
