use super::*;

/// An active offer to sell one token at a fixed price.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct ListingData {
    /// Account that created the listing; owner of the token at listing time.
    pub seller: AccountAddress,
    /// Asking price. Always above zero for a stored listing.
    pub price: Amount,
}

/// The contract state: the listing ledger and the proceeds ledger.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Active listings keyed by token identity. Presence in the map is the
    /// authoritative listed flag.
    pub listings: StateMap<Token, ListingData, S>,
    /// CCD owed to sellers from completed sales, held until withdrawn.
    pub proceeds: StateMap<AccountAddress, Amount, S>,
}

// Functions for creating and updating the contract state.
impl<S: HasStateApi> State<S> {
    /// Creates a new state with no listings and no proceeds.
    pub fn empty(state_builder: &mut StateBuilder<S>) -> Self {
        State {
            listings: state_builder.new_map(),
            proceeds: state_builder.new_map(),
        }
    }

    /// Current listing for the token, if any.
    pub fn get_listing(&self, token: &Token) -> Option<ListingData> {
        self.listings.get(token).map(|listing| *listing)
    }

    /// Insert or overwrite the listing for the token. Used both for new
    /// listings and for price updates.
    pub fn list(&mut self, token: Token, listing: ListingData) {
        self.listings.insert(token, listing);
    }

    /// Remove a listing, failing with NotListed if the token has none.
    /// Returns the removed listing.
    pub fn unlist(&mut self, token: &Token) -> ContractResult<ListingData> {
        self.listings
            .remove_and_get(token)
            .ok_or_else(|| CustomContractError::NotListed.into())
    }

    /// Add the price of a completed sale to the seller's withdrawable
    /// balance.
    pub fn credit_proceeds(
        &mut self,
        seller: AccountAddress,
        amount: Amount,
    ) -> ContractResult<()> {
        let balance = self.proceeds_of(&seller);
        let credited = balance
            .micro_ccd
            .checked_add(amount.micro_ccd)
            .ok_or(CustomContractError::Overflow)?;
        self.proceeds.insert(seller, Amount::from_micro_ccd(credited));
        Ok(())
    }

    /// Take the seller's full balance out of the ledger and return it. The
    /// entry is removed before the amount is handed back, so a re-entrant
    /// read during payout observes a zero balance.
    pub fn drain_proceeds(&mut self, seller: &AccountAddress) -> ContractResult<Amount> {
        match self.proceeds.remove_and_get(seller) {
            Some(balance) if balance > Amount::zero() => Ok(balance),
            _ => Err(CustomContractError::NoProceeds.into()),
        }
    }

    /// Withdrawable balance of a seller. Zero when nothing is owed.
    pub fn proceeds_of(&self, seller: &AccountAddress) -> Amount {
        self.proceeds
            .get(seller)
            .map(|balance| *balance)
            .unwrap_or_else(Amount::zero)
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const SELLER: AccountAddress = AccountAddress([1; 32]);
    const NFT_CONTRACT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const TOKEN_0: Token = Token {
        contract: NFT_CONTRACT,
        id: TokenIdU64(0),
    };

    fn empty_state() -> State<TestStateApi> {
        let mut state_builder = TestStateBuilder::new();
        State::empty(&mut state_builder)
    }

    #[concordium_test]
    fn test_list_overwrites_previous_listing() {
        let mut state = empty_state();

        state.list(
            TOKEN_0,
            ListingData {
                seller: SELLER,
                price: Amount::from_ccd(10),
            },
        );
        state.list(
            TOKEN_0,
            ListingData {
                seller: SELLER,
                price: Amount::from_ccd(25),
            },
        );

        claim_eq!(
            state.get_listing(&TOKEN_0),
            Some(ListingData {
                seller: SELLER,
                price: Amount::from_ccd(25),
            })
        );
    }

    #[concordium_test]
    fn test_unlist_missing_listing() {
        let mut state = empty_state();

        let result = state.unlist(&TOKEN_0);

        claim_eq!(result, Err(CustomContractError::NotListed.into()));
    }

    #[concordium_test]
    fn test_proceeds_accumulate_and_drain_once() {
        let mut state = empty_state();

        state
            .credit_proceeds(SELLER, Amount::from_ccd(10))
            .expect_report("First credit failed");
        state
            .credit_proceeds(SELLER, Amount::from_ccd(5))
            .expect_report("Second credit failed");
        claim_eq!(state.proceeds_of(&SELLER), Amount::from_ccd(15));

        let drained = state
            .drain_proceeds(&SELLER)
            .expect_report("Drain of a positive balance failed");
        claim_eq!(drained, Amount::from_ccd(15));
        claim_eq!(state.proceeds_of(&SELLER), Amount::zero());

        let result = state.drain_proceeds(&SELLER);
        claim_eq!(result, Err(CustomContractError::NoProceeds.into()));
    }

    #[concordium_test]
    fn test_proceeds_credit_overflow() {
        let mut state = empty_state();

        state
            .credit_proceeds(SELLER, Amount::from_micro_ccd(u64::MAX))
            .expect_report("Credit up to the representable maximum failed");
        let result = state.credit_proceeds(SELLER, Amount::from_micro_ccd(1));

        claim_eq!(result, Err(CustomContractError::Overflow.into()));
        // The balance that was already owed is untouched.
        claim_eq!(state.proceeds_of(&SELLER), Amount::from_micro_ccd(u64::MAX));
    }
}
