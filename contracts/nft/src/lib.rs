//! A minimal non-fungible token contract.
//!
//! Anyone can mint; token IDs are issued sequentially and every token
//! shares the same static metadata URL. Each token tracks one owner and at
//! most one approved operator, which may transfer the token on the owner's
//! behalf. The per-token approval is what lets a marketplace contract sell
//! the token without taking custody of it.
#![cfg_attr(not(feature = "std"), no_std)]
use crate::{constants::*, events::*, helper::*, state::*};
use commons::*;
use concordium_cis2::*;
use concordium_std::*;

mod constants;
mod contract;
mod events;
mod helper;
mod state;
