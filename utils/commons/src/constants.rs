/// Tag for the custom ItemListed event.
pub const ITEM_LISTED_TAG: u8 = u8::MAX - 5;

/// Tag for the custom ItemCanceled event.
pub const ITEM_CANCELED_TAG: u8 = u8::MAX - 6;

/// Tag for the custom ItemBought event.
pub const ITEM_BOUGHT_TAG: u8 = u8::MAX - 7;

/// Tag for the custom Approval event.
pub const APPROVAL_TAG: u8 = u8::MAX - 8;
