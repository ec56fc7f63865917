use super::*;

/// Parameter for the `listItem` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct ListParams {
    /// Token to list for sale.
    pub token: Token,
    /// Asking price.
    pub price: Amount,
}

/// Parameter for the `updateListing` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct UpdateListingParams {
    /// Token to re-price.
    pub token: Token,
    /// New asking price.
    pub price: Amount,
}

/// Return value of the `getListedNft` entrypoint.
///
/// An unlisted token is reported with a zeroed seller and a zero price, so
/// callers that test `price > 0` to detect an active listing keep working.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ListingView {
    pub seller: AccountAddress,
    pub price: Amount,
}

impl ListingView {
    pub fn unlisted() -> Self {
        ListingView {
            seller: AccountAddress([0; 32]),
            price: Amount::zero(),
        }
    }
}

impl From<ListingData> for ListingView {
    fn from(listing: ListingData) -> Self {
        ListingView {
            seller: listing.seller,
            price: listing.price,
        }
    }
}
