use super::*;

/// Current owner of the token, as recorded by the token contract.
pub fn owner_of<T>(
    host: &impl HasHost<T>,
    contract: &ContractAddress,
    token_id: ContractTokenId,
) -> ContractResult<AccountAddress> {
    let mut response = host
        .invoke_contract_read_only(
            contract,
            &token_id,
            EntrypointName::new_unchecked("ownerOf"),
            Amount::zero(),
        )
        .map_err(handle_call_error)?
        .ok_or(CustomContractError::Incompatible)?;

    AccountAddress::deserial(&mut response).map_err(|_| CustomContractError::Incompatible.into())
}

/// Address approved to transfer the token, if any.
pub fn get_approved<T>(
    host: &impl HasHost<T>,
    contract: &ContractAddress,
    token_id: ContractTokenId,
) -> ContractResult<Option<Address>> {
    let mut response = host
        .invoke_contract_read_only(
            contract,
            &token_id,
            EntrypointName::new_unchecked("getApproved"),
            Amount::zero(),
        )
        .map_err(handle_call_error)?
        .ok_or(CustomContractError::Incompatible)?;

    <Option<Address>>::deserial(&mut response)
        .map_err(|_| CustomContractError::Incompatible.into())
}

/// Move the token from `from` to `to` through the token contract. Requires
/// a standing approval for this contract instance.
pub fn transfer_from<T>(
    host: &mut impl HasHost<T>,
    token: &Token,
    from: AccountAddress,
    to: AccountAddress,
) -> ContractResult<()> {
    host.invoke_contract(
        &token.contract,
        &TransferFromParams {
            token_id: token.id,
            from,
            to,
        },
        EntrypointName::new_unchecked("transferFrom"),
        Amount::zero(),
    )
    .map_err(handle_call_error)?;

    Ok(())
}

fn handle_call_error<R>(error: CallContractError<R>) -> ContractError {
    match error {
        CallContractError::MissingEntrypoint | CallContractError::MessageFailed => {
            CustomContractError::Incompatible.into()
        }
        CallContractError::LogicReject { .. } => CustomContractError::InvokeContractError.into(),
        e => e.into(),
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const NFT_CONTRACT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };

    const SELLER: AccountAddress = AccountAddress([1; 32]);
    const BUYER: AccountAddress = AccountAddress([2; 32]);

    const TOKEN_0: Token = Token {
        contract: NFT_CONTRACT,
        id: TokenIdU64(0),
    };

    fn new_host() -> TestHost<State<TestStateApi>> {
        let mut state_builder = TestStateBuilder::new();
        let state = State::empty(&mut state_builder);
        TestHost::new(state, state_builder)
    }

    #[concordium_test]
    fn test_owner_of() {
        let mut host = new_host();

        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked("ownerOf".into()),
            MockFn::new(|parameter, _amount, _balance, _state: &mut State<TestStateApi>| {
                let token_id = ContractTokenId::deserial(&mut Cursor::new(parameter))
                    .map_err(|_| CallContractError::Trap)?;
                if token_id != TOKEN_0.id {
                    return Err(CallContractError::Trap);
                }
                Ok((false, Some(SELLER)))
            }),
        );

        let response = owner_of(&host, &NFT_CONTRACT, TOKEN_0.id);

        claim_eq!(response, Ok(SELLER));
    }

    #[concordium_test]
    fn test_get_approved() {
        let mut host = new_host();

        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked("getApproved".into()),
            MockFn::new(|parameter, _amount, _balance, _state: &mut State<TestStateApi>| {
                ContractTokenId::deserial(&mut Cursor::new(parameter))
                    .map_err(|_| CallContractError::Trap)?;
                Ok((false, Some(Some(Address::Contract(NFT_CONTRACT)))))
            }),
        );

        let response = get_approved(&host, &NFT_CONTRACT, TOKEN_0.id);

        claim_eq!(response, Ok(Some(Address::Contract(NFT_CONTRACT))));
    }

    #[concordium_test]
    fn test_transfer_from() {
        let mut host = new_host();

        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked("transferFrom".into()),
            MockFn::new(|parameter, _amount, _balance, _state: &mut State<TestStateApi>| {
                let transfer = TransferFromParams::deserial(&mut Cursor::new(parameter))
                    .map_err(|_| CallContractError::Trap)?;
                if transfer.from != SELLER || transfer.to != BUYER {
                    return Err(CallContractError::Trap);
                }
                Ok((true, Some(())))
            }),
        );

        let response = transfer_from(&mut host, &TOKEN_0, SELLER, BUYER);

        claim_eq!(response, Ok(()));
    }

    #[concordium_test]
    fn test_owner_of_incompatible_contract() {
        let mut host = new_host();

        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked("ownerOf".into()),
            MockFn::new(|_parameter, _amount, _balance, _state: &mut State<TestStateApi>| {
                Err::<(bool, Option<AccountAddress>), _>(CallContractError::MissingEntrypoint)
            }),
        );

        let response = owner_of(&host, &NFT_CONTRACT, TOKEN_0.id);

        claim_eq!(response, Err(CustomContractError::Incompatible.into()));
    }
}
