#![no_std]

extern crate alloc;

pub use board::*;
pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use scoring::*;
pub use timer::*;
pub use types::*;

pub mod contact;

mod board;
mod card;
mod engine;
mod error;
mod generator;
mod scoring;
mod timer;
mod types;
