pub mod entities;
pub mod storage;

#[allow(unused_imports)]
pub use entities::{dog, sample_dogs, strings};
#[allow(unused_imports)]
pub use storage::{CountingStorage, FailingStorage, GatedStorage};
