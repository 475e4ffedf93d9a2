// Not every utils is used in every test, so we allow dead code
#![allow(unused_imports, dead_code)]

mod test_setup;
pub use test_setup::*;
mod utils;
pub use utils::*;
mod localstack;
pub use localstack::*;
mod aws_stub;
pub use aws_stub::*;
