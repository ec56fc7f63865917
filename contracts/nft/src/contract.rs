use super::*;

/// Initialize the contract with no tokens minted.
#[init(contract = "BasicNft")]
fn init<S: HasStateApi>(
    _ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    Ok(State::empty(state_builder))
}

/// Mint the next token to the sender. Token IDs are sequential starting
/// from zero.
///
/// Logs a `Mint` and a `TokenMetadata` event.
///
/// Rejects if:
/// - The sender is a contract address.
/// - Fails to log the events.
#[receive(mutable, contract = "BasicNft", name = "mint", enable_logger)]
fn mint<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let owner = get_account_address(ctx.sender())?;

    let token_id = host.state_mut().mint(owner);

    // Event for the minted NFT.
    logger.log(&Cis2Event::Mint(MintEvent {
        token_id,
        amount: ContractTokenAmount::from(1),
        owner: Address::Account(owner),
    }))?;

    // Metadata URL for the NFT.
    logger.log(&token_metadata_event(token_id))?;

    Ok(())
}

/// Grant or revoke transfer approval for a token. Passing no operator
/// clears a previously granted approval.
///
/// Rejects if:
/// - It fails to parse the parameter.
/// - The token was never minted.
/// - The sender is not the token owner.
/// - Fails to log the event.
#[receive(
    mutable,
    contract = "BasicNft",
    name = "approve",
    parameter = "ApproveParams",
    enable_logger
)]
fn approve<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: ApproveParams = ctx.parameter_cursor().get()?;

    let owner = host
        .state_mut()
        .approve(&params.token_id, ctx.sender(), params.operator)?;

    // Event for the approval change.
    logger.log(&NftEvent::Approval(ApprovalEvent {
        owner,
        token_id: params.token_id,
        operator: params.operator,
    }))?;

    Ok(())
}

/// Transfer a token from `from` to `to`. The sender must be the owner or
/// the approved operator, and `from` must be the current owner. The
/// approval is cleared by the transfer.
///
/// Rejects if:
/// - It fails to parse the parameter.
/// - The token was never minted.
/// - `from` is not the current owner.
/// - The sender is neither the owner nor the approved operator.
/// - Fails to log the event.
#[receive(
    mutable,
    contract = "BasicNft",
    name = "transferFrom",
    parameter = "TransferFromParams",
    enable_logger
)]
fn transfer_from<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: TransferFromParams = ctx.parameter_cursor().get()?;

    host.state_mut().transfer(&params, ctx.sender())?;

    // Event for the transferred NFT.
    logger.log(&Cis2Event::Transfer(TransferEvent {
        token_id: params.token_id,
        amount: ContractTokenAmount::from(1),
        from: Address::Account(params.from),
        to: Address::Account(params.to),
    }))?;

    Ok(())
}

/// Look up the current owner of a token.
#[receive(
    contract = "BasicNft",
    name = "ownerOf",
    parameter = "ContractTokenId",
    return_value = "AccountAddress"
)]
fn owner_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<AccountAddress> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;

    Ok(host.state().token_data(&token_id)?.owner)
}

/// Look up the approved operator of a token, if any.
#[receive(
    contract = "BasicNft",
    name = "getApproved",
    parameter = "ContractTokenId",
    return_value = "Option<Address>"
)]
fn get_approved<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Option<Address>> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;

    Ok(host.state().token_data(&token_id)?.approved)
}

/// Metadata URL of a token. All tokens of this contract share the same
/// static URL.
#[receive(
    contract = "BasicNft",
    name = "tokenUri",
    parameter = "ContractTokenId",
    return_value = "MetadataUrl"
)]
fn token_uri<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<MetadataUrl> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;

    host.state().token_data(&token_id)?;

    Ok(MetadataUrl {
        url: String::from(TOKEN_METADATA_URL),
        hash: None,
    })
}

/// Number of tokens minted so far, which is also the next token ID.
#[receive(contract = "BasicNft", name = "getTokenCounter", return_value = "u64")]
fn get_token_counter<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<u64> {
    Ok(host.state().token_counter)
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const ALICE: AccountAddress = AccountAddress([1; 32]);
    const BOB: AccountAddress = AccountAddress([2; 32]);
    const MARKETPLACE: ContractAddress = ContractAddress {
        index: 10,
        subindex: 0,
    };

    const TOKEN_0: ContractTokenId = TokenIdU64(0);
    const TOKEN_1: ContractTokenId = TokenIdU64(1);

    fn new_host() -> TestHost<State<TestStateApi>> {
        let mut state_builder = TestStateBuilder::new();
        let state = State::empty(&mut state_builder);
        TestHost::new(state, state_builder)
    }

    /// Host with `TOKEN_0` minted to `ALICE`.
    fn minted_host() -> TestHost<State<TestStateApi>> {
        let mut host = new_host();
        host.state_mut().mint(ALICE);
        host
    }

    #[concordium_test]
    fn test_init() {
        let ctx = TestInitContext::empty();
        let mut state_builder = TestStateBuilder::new();

        let state = init(&ctx, &mut state_builder).expect_report("Contract initialization failed");

        claim_eq!(state.tokens.iter().count(), 0, "No tokens should exist");
        claim_eq!(state.token_counter, 0);
    }

    #[concordium_test]
    fn test_mint_sequential_ids() {
        let mut host = new_host();
        let mut logger = TestLogger::init();

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(ALICE));
        claim_eq!(mint(&ctx, &mut host, &mut logger), Ok(()));
        claim_eq!(mint(&ctx, &mut host, &mut logger), Ok(()));

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(BOB));
        claim_eq!(mint(&ctx, &mut host, &mut logger), Ok(()));

        claim_eq!(host.state().token_counter, 3);
        claim_eq!(
            host.state()
                .token_data(&TOKEN_0)
                .expect_report("Token 0 must exist")
                .owner,
            ALICE
        );
        claim_eq!(
            host.state()
                .token_data(&TOKEN_1)
                .expect_report("Token 1 must exist")
                .owner,
            ALICE
        );
        claim_eq!(
            host.state()
                .token_data(&TokenIdU64(2))
                .expect_report("Token 2 must exist")
                .owner,
            BOB
        );

        // Each mint logs the mint itself and the metadata URL.
        claim_eq!(logger.logs.len(), 6);
        let mint_event: Cis2Event<ContractTokenId, ContractTokenAmount> =
            Cis2Event::Mint(MintEvent {
                token_id: TOKEN_0,
                amount: ContractTokenAmount::from(1),
                owner: Address::Account(ALICE),
            });
        claim_eq!(logger.logs[0], to_bytes(&mint_event));
        claim_eq!(logger.logs[1], to_bytes(&token_metadata_event(TOKEN_0)));
    }

    #[concordium_test]
    fn test_approve() {
        let mut host = minted_host();
        let mut logger = TestLogger::init();

        let params = ApproveParams {
            token_id: TOKEN_0,
            operator: Some(Address::Contract(MARKETPLACE)),
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(ALICE)).set_parameter(&bytes);

        let result = approve(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            host.state()
                .token_data(&TOKEN_0)
                .expect_report("Token 0 must exist")
                .approved,
            Some(Address::Contract(MARKETPLACE))
        );
        claim_eq!(logger.logs.len(), 1);
        claim_eq!(
            logger.logs[0],
            to_bytes(&NftEvent::Approval(ApprovalEvent {
                owner: ALICE,
                token_id: TOKEN_0,
                operator: Some(Address::Contract(MARKETPLACE)),
            }))
        );
    }

    #[concordium_test]
    fn test_approve_clears_with_none() {
        let mut host = minted_host();
        host.state_mut()
            .approve(&TOKEN_0, Address::Account(ALICE), Some(Address::Account(BOB)))
            .expect_report("Approving failed");
        let mut logger = TestLogger::init();

        let params = ApproveParams {
            token_id: TOKEN_0,
            operator: None,
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(ALICE)).set_parameter(&bytes);

        let result = approve(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            host.state()
                .token_data(&TOKEN_0)
                .expect_report("Token 0 must exist")
                .approved,
            None
        );
    }

    #[concordium_test]
    fn test_approve_not_owner() {
        let mut host = minted_host();
        let mut logger = TestLogger::init();

        let params = ApproveParams {
            token_id: TOKEN_0,
            operator: Some(Address::Account(BOB)),
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(BOB)).set_parameter(&bytes);

        let result = approve(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::NotTheOwner.into()));
        claim_eq!(
            host.state()
                .token_data(&TOKEN_0)
                .expect_report("Token 0 must exist")
                .approved,
            None
        );
    }

    #[concordium_test]
    fn test_approve_unknown_token() {
        let mut host = new_host();
        let mut logger = TestLogger::init();

        let params = ApproveParams {
            token_id: TOKEN_0,
            operator: Some(Address::Account(BOB)),
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(ALICE)).set_parameter(&bytes);

        let result = approve(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::UnknownToken.into()));
    }

    #[concordium_test]
    fn test_transfer_from_by_owner() {
        let mut host = minted_host();
        let mut logger = TestLogger::init();

        let params = TransferFromParams {
            token_id: TOKEN_0,
            from: ALICE,
            to: BOB,
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(ALICE)).set_parameter(&bytes);

        let result = transfer_from(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            host.state()
                .token_data(&TOKEN_0)
                .expect_report("Token 0 must exist")
                .owner,
            BOB
        );
        let transfer_event: Cis2Event<ContractTokenId, ContractTokenAmount> =
            Cis2Event::Transfer(TransferEvent {
                token_id: TOKEN_0,
                amount: ContractTokenAmount::from(1),
                from: Address::Account(ALICE),
                to: Address::Account(BOB),
            });
        claim_eq!(logger.logs.len(), 1);
        claim_eq!(logger.logs[0], to_bytes(&transfer_event));
    }

    #[concordium_test]
    fn test_transfer_from_by_approved_operator() {
        let mut host = minted_host();
        host.state_mut()
            .approve(
                &TOKEN_0,
                Address::Account(ALICE),
                Some(Address::Contract(MARKETPLACE)),
            )
            .expect_report("Approving failed");
        let mut logger = TestLogger::init();

        let params = TransferFromParams {
            token_id: TOKEN_0,
            from: ALICE,
            to: BOB,
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Contract(MARKETPLACE))
            .set_parameter(&bytes);

        let result = transfer_from(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        let data = host
            .state()
            .token_data(&TOKEN_0)
            .expect_report("Token 0 must exist");
        claim_eq!(data.owner, BOB);
        // The approval does not carry over to the new owner.
        claim_eq!(data.approved, None);
    }

    #[concordium_test]
    fn test_transfer_from_unauthorized() {
        let mut host = minted_host();
        let mut logger = TestLogger::init();

        let params = TransferFromParams {
            token_id: TOKEN_0,
            from: ALICE,
            to: BOB,
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(BOB)).set_parameter(&bytes);

        let result = transfer_from(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim_eq!(
            host.state()
                .token_data(&TOKEN_0)
                .expect_report("Token 0 must exist")
                .owner,
            ALICE
        );
    }

    #[concordium_test]
    fn test_transfer_from_stale_owner() {
        let mut host = minted_host();
        let mut logger = TestLogger::init();

        // `from` names an account that does not own the token.
        let params = TransferFromParams {
            token_id: TOKEN_0,
            from: BOB,
            to: BOB,
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(ALICE)).set_parameter(&bytes);

        let result = transfer_from(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::NotTheOwner.into()));
    }

    #[concordium_test]
    fn test_views() {
        let mut host = minted_host();
        host.state_mut()
            .approve(
                &TOKEN_0,
                Address::Account(ALICE),
                Some(Address::Contract(MARKETPLACE)),
            )
            .expect_report("Approving failed");

        let bytes = to_bytes(&TOKEN_0);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);

        let owner = owner_of(&ctx, &host).expect_report("Failed to call ownerOf");
        claim_eq!(owner, ALICE);

        let approved = get_approved(&ctx, &host).expect_report("Failed to call getApproved");
        claim_eq!(approved, Some(Address::Contract(MARKETPLACE)));

        let metadata = token_uri(&ctx, &host).expect_report("Failed to call tokenUri");
        claim_eq!(metadata.url, String::from(TOKEN_METADATA_URL));

        let counter = get_token_counter(&ctx, &host).expect_report("Failed to call getTokenCounter");
        claim_eq!(counter, 1);
    }

    #[concordium_test]
    fn test_views_unknown_token() {
        let host = new_host();

        let bytes = to_bytes(&TOKEN_0);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);

        claim_eq!(
            owner_of(&ctx, &host),
            Err(CustomContractError::UnknownToken.into())
        );
        claim_eq!(
            get_approved(&ctx, &host),
            Err(CustomContractError::UnknownToken.into())
        );
        claim_eq!(
            token_uri(&ctx, &host).err(),
            Some(CustomContractError::UnknownToken.into())
        );
    }
}
