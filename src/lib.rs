#![deny(unused_variables)]
#![deny(dead_code)]
#![deny(unused_imports)]

#[path = "../shared/mod.rs"]
pub mod shared;

#[path = "../prepare/mod.rs"]
pub mod prepare;

#[path = "../label/mod.rs"]
pub mod label;
