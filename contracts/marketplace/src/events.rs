use super::*;

/// Item listed event data. Also emitted when a listing is re-priced.
#[derive(Debug, Serialize, SchemaType)]
pub struct ItemListedEvent {
    /// Account selling the token.
    pub seller: AccountAddress,
    /// Token contract address.
    pub contract: ContractAddress,
    /// Token identifier.
    pub id: ContractTokenId,
    /// Asking price.
    pub price: Amount,
}

/// Item canceled event data.
#[derive(Debug, Serialize, SchemaType)]
pub struct ItemCanceledEvent {
    /// Account that had listed the token.
    pub seller: AccountAddress,
    /// Token contract address.
    pub contract: ContractAddress,
    /// Token identifier.
    pub id: ContractTokenId,
}

/// Item bought event data.
#[derive(Debug, Serialize, SchemaType)]
pub struct ItemBoughtEvent {
    /// Account that bought the token.
    pub buyer: AccountAddress,
    /// Token contract address.
    pub contract: ContractAddress,
    /// Token identifier.
    pub id: ContractTokenId,
    /// Price the token sold for.
    pub price: Amount,
}

/// Tagged custom event to be serialized for the event log.
#[derive(Debug)]
pub enum MarketplaceEvent {
    /// A token was listed for sale, or an existing listing re-priced.
    ItemListed(ItemListedEvent),
    /// A listing was withdrawn by its seller.
    ItemCanceled(ItemCanceledEvent),
    /// A listed token was sold.
    ItemBought(ItemBoughtEvent),
}

impl Serial for MarketplaceEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            MarketplaceEvent::ItemListed(event) => {
                out.write_u8(ITEM_LISTED_TAG)?;
                event.serial(out)
            }
            MarketplaceEvent::ItemCanceled(event) => {
                out.write_u8(ITEM_CANCELED_TAG)?;
                event.serial(out)
            }
            MarketplaceEvent::ItemBought(event) => {
                out.write_u8(ITEM_BOUGHT_TAG)?;
                event.serial(out)
            }
        }
    }
}
