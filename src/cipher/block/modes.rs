mod ctr;

pub use ctr::{Ctr, CtrError, InvalidIvLength, IV_BYTES};
