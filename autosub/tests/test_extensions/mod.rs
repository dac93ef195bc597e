#![allow(dead_code)]

mod fixture;
pub mod members;
pub mod utilities;

pub use fixture::AutoSubstituteFixture;
