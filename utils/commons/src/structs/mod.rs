use super::*;

mod registry;
mod token;

pub use self::{registry::*, token::*};
