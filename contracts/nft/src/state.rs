use super::*;

/// Ownership record of a single token.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct TokenData {
    /// Current owner.
    pub owner: AccountAddress,
    /// Address approved to transfer this token, if any. Cleared on every
    /// transfer.
    pub approved: Option<Address>,
}

/// The contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Minted tokens by ID.
    pub tokens: StateMap<ContractTokenId, TokenData, S>,
    /// Next token ID to be issued. Also the number of tokens minted so far.
    pub token_counter: u64,
}

// Functions for creating and updating the contract state.
impl<S: HasStateApi> State<S> {
    /// Creates a new state with no tokens minted.
    pub fn empty(state_builder: &mut StateBuilder<S>) -> Self {
        State {
            tokens: state_builder.new_map(),
            token_counter: 0,
        }
    }

    /// Issue the next sequential token ID to `owner`.
    pub fn mint(&mut self, owner: AccountAddress) -> ContractTokenId {
        let token_id = TokenIdU64(self.token_counter);
        self.tokens.insert(
            token_id,
            TokenData {
                owner,
                approved: None,
            },
        );
        self.token_counter += 1;
        token_id
    }

    /// Ownership record of a token, failing with UnknownToken for IDs that
    /// were never minted.
    pub fn token_data(&self, token_id: &ContractTokenId) -> ContractResult<TokenData> {
        self.tokens
            .get(token_id)
            .map(|data| *data)
            .ok_or_else(|| CustomContractError::UnknownToken.into())
    }

    /// Set or clear the approved operator of a token. Only the owner may do
    /// this. Returns the owner for event logging.
    pub fn approve(
        &mut self,
        token_id: &ContractTokenId,
        sender: Address,
        operator: Option<Address>,
    ) -> ContractResult<AccountAddress> {
        let mut data = self
            .tokens
            .get_mut(token_id)
            .ok_or(CustomContractError::UnknownToken)?;
        ensure!(
            sender.matches_account(&data.owner),
            CustomContractError::NotTheOwner.into()
        );

        data.approved = operator;

        Ok(data.owner)
    }

    /// Move ownership of a token from `from` to `to`.
    ///
    /// `from` must be the current owner and the sender must be the owner or
    /// the approved operator. The approval is cleared on success.
    pub fn transfer(&mut self, params: &TransferFromParams, sender: Address) -> ContractResult<()> {
        let mut data = self
            .tokens
            .get_mut(&params.token_id)
            .ok_or(CustomContractError::UnknownToken)?;
        ensure!(
            data.owner == params.from,
            CustomContractError::NotTheOwner.into()
        );
        let authorized = sender.matches_account(&data.owner) || data.approved == Some(sender);
        ensure!(authorized, CustomContractError::Unauthorized.into());

        data.owner = params.to;
        data.approved = None;

        Ok(())
    }
}
