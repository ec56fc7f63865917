//! Common structs, types and helpers shared by the marketplace contracts.
#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{constants::*, errors::*, helper::*, structs::*, types::*};
use concordium_cis2::*;
use concordium_std::*;

mod constants;
mod errors;
mod helper;
mod structs;
mod types;
