//! A fixed price marketplace for non-fungible tokens.
//!
//! Token owners list a token held in an external token contract for a price
//! in CCD. The marketplace never takes custody: listing only requires a
//! standing approval on the token contract, so the token stays with the
//! seller until the moment it sells. Sale proceeds are credited to the
//! seller inside the marketplace and paid out when the seller withdraws
//! them.
#![cfg_attr(not(feature = "std"), no_std)]
use crate::{events::*, external::*, state::*};
use commons::*;
use concordium_cis2::*;
use concordium_std::*;

mod contract;
mod events;
mod external;
mod nft;
mod state;
