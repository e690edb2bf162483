//! Value types shared by the order generator and the session.

pub use self::{
    attempt::*, order::*, random::RandomSource, sequence::*, symbol::*, timestamp::Timestamp,
};

pub mod attempt;
pub mod order;
pub mod random;
pub mod sequence;
pub mod symbol;
pub mod timestamp;
