pub mod block;

pub use block::{BlockEncrypt, CtrError, InvalidBlockLength, InvalidIvLength, KeySchedule};
