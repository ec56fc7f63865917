use super::*;

/// Initialize the marketplace with no listings and no proceeds.
#[init(contract = "NftMarketplace")]
fn init<S: HasStateApi>(
    _ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    Ok(State::empty(state_builder))
}

/// List a token for sale at a fixed price.
///
/// The token stays with the seller: only a standing approval for this
/// contract is required on the token contract, so the transfer can be
/// executed when the item sells.
///
/// Rejects if:
/// - The sender is a contract address.
/// - It fails to parse the parameter.
/// - The price is zero.
/// - The token is already listed.
/// - The sender does not own the token.
/// - This contract is not approved to transfer the token.
#[receive(
    mutable,
    contract = "NftMarketplace",
    name = "listItem",
    parameter = "ListParams",
    enable_logger
)]
fn list_item<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let sender = get_account_address(ctx.sender())?;
    let params: ListParams = ctx.parameter_cursor().get()?;

    ensure!(
        params.price > Amount::zero(),
        CustomContractError::PriceMustBeAboveZero.into()
    );
    ensure!(
        host.state().get_listing(&params.token).is_none(),
        CustomContractError::AlreadyListed.into()
    );

    let owner = nft::owner_of(host, &params.token.contract, params.token.id)?;
    ensure!(sender == owner, CustomContractError::NotTheOwner.into());

    let approved = nft::get_approved(host, &params.token.contract, params.token.id)?;
    ensure!(
        approved == Some(Address::Contract(ctx.self_address())),
        CustomContractError::NotApprovedForMarketplace.into()
    );

    host.state_mut().list(
        params.token,
        ListingData {
            seller: sender,
            price: params.price,
        },
    );

    // Event for the listed NFT.
    logger.log(&MarketplaceEvent::ItemListed(ItemListedEvent {
        seller: sender,
        contract: params.token.contract,
        id: params.token.id,
        price: params.price,
    }))?;

    Ok(())
}

/// Change the asking price of an existing listing.
///
/// Rejects if:
/// - It fails to parse the parameter.
/// - The token is not listed.
/// - The sender is not the listing's seller.
/// - The new price is zero.
#[receive(
    mutable,
    contract = "NftMarketplace",
    name = "updateListing",
    parameter = "UpdateListingParams",
    enable_logger
)]
fn update_listing<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: UpdateListingParams = ctx.parameter_cursor().get()?;

    let listing = host
        .state()
        .get_listing(&params.token)
        .ok_or(CustomContractError::NotListed)?;
    ensure!(
        ctx.sender().matches_account(&listing.seller),
        CustomContractError::NotTheOwner.into()
    );
    ensure!(
        params.price > Amount::zero(),
        CustomContractError::PriceMustBeAboveZero.into()
    );

    host.state_mut().list(
        params.token,
        ListingData {
            seller: listing.seller,
            price: params.price,
        },
    );

    // A price update is announced as a fresh listing with the new terms.
    logger.log(&MarketplaceEvent::ItemListed(ItemListedEvent {
        seller: listing.seller,
        contract: params.token.contract,
        id: params.token.id,
        price: params.price,
    }))?;

    Ok(())
}

/// Withdraw a listing. The token itself never moved, so there is nothing to
/// return.
///
/// Rejects if:
/// - It fails to parse the parameter.
/// - The token is not listed.
/// - The sender is not the listing's seller.
#[receive(
    mutable,
    contract = "NftMarketplace",
    name = "cancelListing",
    parameter = "Token",
    enable_logger
)]
fn cancel_listing<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let token: Token = ctx.parameter_cursor().get()?;

    let listing = host
        .state()
        .get_listing(&token)
        .ok_or(CustomContractError::NotListed)?;
    ensure!(
        ctx.sender().matches_account(&listing.seller),
        CustomContractError::NotTheOwner.into()
    );

    host.state_mut().unlist(&token)?;

    // Event for the unlisted NFT.
    logger.log(&MarketplaceEvent::ItemCanceled(ItemCanceledEvent {
        seller: listing.seller,
        contract: token.contract,
        id: token.id,
    }))?;

    Ok(())
}

/// Buy a listed token at its asking price.
///
/// The listing is removed and the seller credited before the token contract
/// is invoked, so a call that re-enters the marketplace during the transfer
/// observes the token as unlisted. Payment above the asking price is
/// returned to the buyer; the seller is credited the asking price exactly,
/// withdrawable via `withdrawProceeds`.
///
/// Rejects if:
/// - The sender is a contract address.
/// - It fails to parse the parameter.
/// - The token is not listed.
/// - The attached amount is below the asking price.
/// - Crediting the seller would overflow.
/// - The token contract rejects the transfer.
#[receive(
    mutable,
    payable,
    contract = "NftMarketplace",
    name = "buyItem",
    parameter = "Token",
    enable_logger
)]
fn buy_item<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let buyer = get_account_address(ctx.sender())?;
    let token: Token = ctx.parameter_cursor().get()?;

    let listing = host
        .state()
        .get_listing(&token)
        .ok_or(CustomContractError::NotListed)?;
    ensure!(amount >= listing.price, CustomContractError::PriceNotMet.into());

    // The listing must be gone and the seller credited before the token
    // contract runs, since its transfer hook may call back into this
    // contract.
    host.state_mut().unlist(&token)?;
    host.state_mut().credit_proceeds(listing.seller, listing.price)?;

    // Event for the bought NFT.
    logger.log(&MarketplaceEvent::ItemBought(ItemBoughtEvent {
        buyer,
        contract: token.contract,
        id: token.id,
        price: listing.price,
    }))?;

    nft::transfer_from(host, &token, listing.seller, buyer)?;

    // Return any overpayment to the buyer.
    let excess = amount - listing.price;
    if excess > Amount::zero() {
        host.invoke_transfer(&buyer, excess)?;
    }

    Ok(())
}

/// Pay out the caller's accumulated sale proceeds.
///
/// The balance is zeroed before the transfer is invoked. A failed transfer
/// rejects the transaction, which also rolls the drained balance back, so
/// no proceeds are lost.
///
/// Rejects if:
/// - The sender is a contract address.
/// - The caller has no proceeds.
/// - The transfer fails.
#[receive(mutable, contract = "NftMarketplace", name = "withdrawProceeds")]
fn withdraw_proceeds<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    let caller = get_account_address(ctx.sender())?;

    let balance = host.state_mut().drain_proceeds(&caller)?;
    host.invoke_transfer(&caller, balance)?;

    Ok(())
}

/// View the listing of a token. Unlisted tokens are reported with a zeroed
/// seller and a zero price.
#[receive(
    contract = "NftMarketplace",
    name = "getListedNft",
    parameter = "Token",
    return_value = "ListingView"
)]
fn get_listed_nft<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ListingView> {
    let token: Token = ctx.parameter_cursor().get()?;

    Ok(host
        .state()
        .get_listing(&token)
        .map(ListingView::from)
        .unwrap_or_else(ListingView::unlisted))
}

/// View a seller's withdrawable proceeds. Zero when nothing is owed.
#[receive(
    contract = "NftMarketplace",
    name = "getProceeds",
    parameter = "AccountAddress",
    return_value = "Amount"
)]
fn get_proceeds<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Amount> {
    let seller: AccountAddress = ctx.parameter_cursor().get()?;

    Ok(host.state().proceeds_of(&seller))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const SELLER: AccountAddress = AccountAddress([1; 32]);
    const BUYER: AccountAddress = AccountAddress([2; 32]);
    const STRANGER: AccountAddress = AccountAddress([3; 32]);

    const MARKETPLACE: ContractAddress = ContractAddress {
        index: 10,
        subindex: 0,
    };
    const NFT_CONTRACT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const TOKEN_0: Token = Token {
        contract: NFT_CONTRACT,
        id: TokenIdU64(0),
    };

    fn price() -> Amount {
        Amount::from_ccd(10)
    }

    fn new_host() -> TestHost<State<TestStateApi>> {
        let mut state_builder = TestStateBuilder::new();
        let state = State::empty(&mut state_builder);
        TestHost::new(state, state_builder)
    }

    /// Host with `TOKEN_0` already listed by `SELLER` at `price()`.
    fn listed_host() -> TestHost<State<TestStateApi>> {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::empty(&mut state_builder);
        state.list(
            TOKEN_0,
            ListingData {
                seller: SELLER,
                price: price(),
            },
        );
        TestHost::new(state, state_builder)
    }

    fn parse_and_ok_mock<D: Deserial, R: Clone + Serial + 'static>(
        return_value: R,
    ) -> MockFn<State<TestStateApi>> {
        MockFn::new(move |parameter, _amount, _balance, _state| {
            D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
            Ok((false, Some(return_value.clone())))
        })
    }

    fn mock_owner_of(host: &mut TestHost<State<TestStateApi>>, owner: AccountAddress) {
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked("ownerOf".into()),
            parse_and_ok_mock::<ContractTokenId, _>(owner),
        );
    }

    fn mock_get_approved(host: &mut TestHost<State<TestStateApi>>, approved: Option<Address>) {
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked("getApproved".into()),
            parse_and_ok_mock::<ContractTokenId, _>(approved),
        );
    }

    fn mock_transfer_from(host: &mut TestHost<State<TestStateApi>>) {
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked("transferFrom".into()),
            parse_and_ok_mock::<TransferFromParams, _>(()),
        );
    }

    #[concordium_test]
    fn test_init() {
        let ctx = TestInitContext::empty();
        let mut state_builder = TestStateBuilder::new();

        let state = init(&ctx, &mut state_builder).expect_report("Contract initialization failed");

        claim_eq!(state.listings.iter().count(), 0, "No listings should exist");
        claim_eq!(state.proceeds.iter().count(), 0, "No proceeds should exist");
    }

    #[concordium_test]
    fn test_list_item() {
        let mut host = new_host();
        mock_owner_of(&mut host, SELLER);
        mock_get_approved(&mut host, Some(Address::Contract(MARKETPLACE)));

        let params = ListParams {
            token: TOKEN_0,
            price: price(),
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(SELLER))
            .set_self_address(MARKETPLACE)
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = list_item(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            host.state().get_listing(&TOKEN_0),
            Some(ListingData {
                seller: SELLER,
                price: price(),
            })
        );
        claim_eq!(logger.logs.len(), 1, "Exactly one event must be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&MarketplaceEvent::ItemListed(ItemListedEvent {
                seller: SELLER,
                contract: NFT_CONTRACT,
                id: TOKEN_0.id,
                price: price(),
            }))
        );
    }

    #[concordium_test]
    fn test_list_item_zero_price() {
        let mut host = new_host();

        let params = ListParams {
            token: TOKEN_0,
            price: Amount::zero(),
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(SELLER))
            .set_self_address(MARKETPLACE)
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = list_item(&ctx, &mut host, &mut logger);

        claim_eq!(
            result,
            Err(CustomContractError::PriceMustBeAboveZero.into())
        );
        claim!(host.state().get_listing(&TOKEN_0).is_none());
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_list_item_not_owner() {
        let mut host = new_host();
        mock_owner_of(&mut host, SELLER);

        let params = ListParams {
            token: TOKEN_0,
            price: price(),
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(STRANGER))
            .set_self_address(MARKETPLACE)
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = list_item(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::NotTheOwner.into()));
        claim!(host.state().get_listing(&TOKEN_0).is_none());
    }

    #[concordium_test]
    fn test_list_item_already_listed() {
        let mut host = listed_host();

        let params = ListParams {
            token: TOKEN_0,
            price: price(),
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(SELLER))
            .set_self_address(MARKETPLACE)
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = list_item(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::AlreadyListed.into()));
    }

    #[concordium_test]
    fn test_list_item_not_approved() {
        let mut host = new_host();
        mock_owner_of(&mut host, SELLER);
        mock_get_approved(&mut host, None);

        let params = ListParams {
            token: TOKEN_0,
            price: price(),
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(SELLER))
            .set_self_address(MARKETPLACE)
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = list_item(&ctx, &mut host, &mut logger);

        claim_eq!(
            result,
            Err(CustomContractError::NotApprovedForMarketplace.into())
        );
        claim!(host.state().get_listing(&TOKEN_0).is_none());
    }

    #[concordium_test]
    fn test_get_listed_nft() {
        let host = listed_host();

        let bytes = to_bytes(&TOKEN_0);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);

        let view = get_listed_nft(&ctx, &host).expect_report("Failed to call getListedNft");

        claim_eq!(
            view,
            ListingView {
                seller: SELLER,
                price: price(),
            }
        );
    }

    #[concordium_test]
    fn test_get_listed_nft_unlisted() {
        let host = new_host();

        let bytes = to_bytes(&TOKEN_0);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);

        let view = get_listed_nft(&ctx, &host).expect_report("Failed to call getListedNft");

        claim_eq!(view.seller, AccountAddress([0; 32]));
        claim_eq!(view.price, Amount::zero());
    }

    #[concordium_test]
    fn test_update_listing() {
        let mut host = listed_host();

        let params = UpdateListingParams {
            token: TOKEN_0,
            price: Amount::from_ccd(25),
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(SELLER)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = update_listing(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        // The seller stays, only the price changes.
        claim_eq!(
            host.state().get_listing(&TOKEN_0),
            Some(ListingData {
                seller: SELLER,
                price: Amount::from_ccd(25),
            })
        );
        claim_eq!(logger.logs.len(), 1);
        claim_eq!(
            logger.logs[0],
            to_bytes(&MarketplaceEvent::ItemListed(ItemListedEvent {
                seller: SELLER,
                contract: NFT_CONTRACT,
                id: TOKEN_0.id,
                price: Amount::from_ccd(25),
            }))
        );
    }

    #[concordium_test]
    fn test_update_listing_not_listed() {
        let mut host = new_host();

        let params = UpdateListingParams {
            token: TOKEN_0,
            price: price(),
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(SELLER)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = update_listing(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::NotListed.into()));
    }

    #[concordium_test]
    fn test_update_listing_not_seller() {
        let mut host = listed_host();

        let params = UpdateListingParams {
            token: TOKEN_0,
            price: Amount::from_ccd(25),
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(STRANGER))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = update_listing(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::NotTheOwner.into()));
        claim_eq!(
            host.state().get_listing(&TOKEN_0),
            Some(ListingData {
                seller: SELLER,
                price: price(),
            })
        );
    }

    #[concordium_test]
    fn test_update_listing_zero_price() {
        let mut host = listed_host();

        let params = UpdateListingParams {
            token: TOKEN_0,
            price: Amount::zero(),
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(SELLER)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = update_listing(&ctx, &mut host, &mut logger);

        claim_eq!(
            result,
            Err(CustomContractError::PriceMustBeAboveZero.into())
        );
        claim_eq!(
            host.state().get_listing(&TOKEN_0),
            Some(ListingData {
                seller: SELLER,
                price: price(),
            })
        );
    }

    #[concordium_test]
    fn test_cancel_listing() {
        let mut host = listed_host();

        let bytes = to_bytes(&TOKEN_0);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(SELLER)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = cancel_listing(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim!(host.state().get_listing(&TOKEN_0).is_none());
        claim_eq!(logger.logs.len(), 1);
        claim_eq!(
            logger.logs[0],
            to_bytes(&MarketplaceEvent::ItemCanceled(ItemCanceledEvent {
                seller: SELLER,
                contract: NFT_CONTRACT,
                id: TOKEN_0.id,
            }))
        );
    }

    #[concordium_test]
    fn test_cancel_listing_not_listed() {
        let mut host = new_host();

        let bytes = to_bytes(&TOKEN_0);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(SELLER)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = cancel_listing(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::NotListed.into()));
    }

    #[concordium_test]
    fn test_cancel_listing_not_seller() {
        let mut host = listed_host();

        let bytes = to_bytes(&TOKEN_0);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(STRANGER))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = cancel_listing(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::NotTheOwner.into()));
        claim!(host.state().get_listing(&TOKEN_0).is_some());
    }

    #[concordium_test]
    fn test_buy_item() {
        let mut host = listed_host();
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked("transferFrom".into()),
            MockFn::new(|parameter, _amount, _balance, _state: &mut State<TestStateApi>| {
                let transfer = TransferFromParams::deserial(&mut Cursor::new(parameter))
                    .map_err(|_| CallContractError::Trap)?;
                if transfer.token_id != TOKEN_0.id || transfer.from != SELLER || transfer.to != BUYER
                {
                    return Err(CallContractError::Trap);
                }
                Ok((true, Some(())))
            }),
        );

        let bytes = to_bytes(&TOKEN_0);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(BUYER)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = buy_item(&ctx, &mut host, price(), &mut logger);

        claim_eq!(result, Ok(()));
        claim!(host.state().get_listing(&TOKEN_0).is_none());
        claim_eq!(host.state().proceeds_of(&SELLER), price());
        claim_eq!(logger.logs.len(), 1, "Exactly one event must be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&MarketplaceEvent::ItemBought(ItemBoughtEvent {
                buyer: BUYER,
                contract: NFT_CONTRACT,
                id: TOKEN_0.id,
                price: price(),
            }))
        );
        // Payment was exact, nothing is refunded.
        claim!(host.get_transfers().is_empty());
    }

    #[concordium_test]
    fn test_buy_item_price_not_met() {
        let mut host = listed_host();

        let bytes = to_bytes(&TOKEN_0);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(BUYER)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = buy_item(
            &ctx,
            &mut host,
            price() - Amount::from_micro_ccd(1),
            &mut logger,
        );

        claim_eq!(result, Err(CustomContractError::PriceNotMet.into()));
        // The listing survives a failed purchase untouched.
        claim_eq!(
            host.state().get_listing(&TOKEN_0),
            Some(ListingData {
                seller: SELLER,
                price: price(),
            })
        );
        claim_eq!(host.state().proceeds_of(&SELLER), Amount::zero());
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_buy_item_not_listed() {
        let mut host = new_host();

        let bytes = to_bytes(&TOKEN_0);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(BUYER)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = buy_item(&ctx, &mut host, price(), &mut logger);

        claim_eq!(result, Err(CustomContractError::NotListed.into()));
    }

    #[concordium_test]
    fn test_buy_item_refunds_excess() {
        let mut host = listed_host();
        mock_transfer_from(&mut host);
        let payment = price() + Amount::from_ccd(2);
        host.set_self_balance(payment);

        let bytes = to_bytes(&TOKEN_0);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(BUYER)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = buy_item(&ctx, &mut host, payment, &mut logger);

        claim_eq!(result, Ok(()));
        // The seller is credited the asking price, the rest flows back.
        claim_eq!(host.state().proceeds_of(&SELLER), price());
        claim_eq!(host.get_transfers(), [(BUYER, Amount::from_ccd(2))]);
    }

    #[concordium_test]
    fn test_buy_item_unlists_before_transfer() {
        let mut host = listed_host();
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked("transferFrom".into()),
            MockFn::new(|_parameter, _amount, _balance, state: &mut State<TestStateApi>| {
                // Anything re-entering the marketplace during the transfer
                // must already see the token unlisted and the seller
                // credited.
                if state.get_listing(&TOKEN_0).is_some() {
                    return Err(CallContractError::Trap);
                }
                if state.proceeds_of(&SELLER) != Amount::from_ccd(10) {
                    return Err(CallContractError::Trap);
                }
                Ok((false, Some(())))
            }),
        );

        let bytes = to_bytes(&TOKEN_0);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(BUYER)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = buy_item(&ctx, &mut host, price(), &mut logger);

        claim_eq!(result, Ok(()));
    }

    #[concordium_test]
    fn test_buy_item_by_seller() {
        let mut host = listed_host();
        mock_transfer_from(&mut host);

        let bytes = to_bytes(&TOKEN_0);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(SELLER)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = buy_item(&ctx, &mut host, price(), &mut logger);

        // Sellers may buy their own listing; the token contract decides
        // whether a self transfer is acceptable.
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().proceeds_of(&SELLER), price());
    }

    #[concordium_test]
    fn test_withdraw_proceeds() {
        let mut host = new_host();
        host.state_mut()
            .credit_proceeds(SELLER, price())
            .expect_report("Crediting proceeds failed");
        host.set_self_balance(price());

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(SELLER));

        let result = withdraw_proceeds(&ctx, &mut host);

        claim_eq!(result, Ok(()));
        claim_eq!(host.state().proceeds_of(&SELLER), Amount::zero());
        claim_eq!(host.get_transfers(), [(SELLER, price())]);

        // A second withdrawal right away has nothing to pay out.
        let result = withdraw_proceeds(&ctx, &mut host);
        claim_eq!(result, Err(CustomContractError::NoProceeds.into()));
    }

    #[concordium_test]
    fn test_withdraw_proceeds_none() {
        let mut host = new_host();

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(STRANGER));

        let result = withdraw_proceeds(&ctx, &mut host);

        claim_eq!(result, Err(CustomContractError::NoProceeds.into()));
    }

    #[concordium_test]
    fn test_withdraw_proceeds_transfer_failed() {
        let mut host = new_host();
        host.state_mut()
            .credit_proceeds(SELLER, price())
            .expect_report("Crediting proceeds failed");
        // Self balance stays zero, so the payout cannot be covered.

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(SELLER));

        let result = withdraw_proceeds(&ctx, &mut host);

        claim_eq!(result, Err(CustomContractError::TransferFailed.into()));
    }

    #[concordium_test]
    fn test_get_proceeds() {
        let mut host = new_host();

        let bytes = to_bytes(&SELLER);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);

        let balance = get_proceeds(&ctx, &host).expect_report("Failed to call getProceeds");
        claim_eq!(balance, Amount::zero());

        host.state_mut()
            .credit_proceeds(SELLER, price())
            .expect_report("Crediting proceeds failed");

        let balance = get_proceeds(&ctx, &host).expect_report("Failed to call getProceeds");
        claim_eq!(balance, price());
    }
}
