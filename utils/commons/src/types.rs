use super::*;

pub type ContractResult<A> = Result<A, ContractError>;

/// Contract token ID type. Token IDs are issued sequentially by the token
/// contract, so the fixed-width `u64` representation is enough.
pub type ContractTokenId = TokenIdU64;

/// Tokens are non-fungible, so any amount is only ever zero or one.
pub type ContractTokenAmount = TokenAmountU64;

/// Wrapping the custom errors in a type with CIS-2 errors.
pub type ContractError = Cis2Error<CustomContractError>;
