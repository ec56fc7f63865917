use super::*;

/// The custom errors the contracts can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Listing or price update attempted with a zero price (Error code: -4).
    PriceMustBeAboveZero,
    /// Caller is not the token owner or the listing's seller, or a transfer
    /// names a `from` that no longer owns the token (Error code: -5).
    NotTheOwner,
    /// Listing attempted for a token that is already listed (Error code: -6).
    AlreadyListed,
    /// The marketplace has not been approved to transfer the token
    /// (Error code: -7).
    NotApprovedForMarketplace,
    /// Operation targets a token that is not listed (Error code: -8).
    NotListed,
    /// Attached payment is below the asking price (Error code: -9).
    PriceNotMet,
    /// Withdrawal attempted with no accumulated proceeds (Error code: -10).
    NoProceeds,
    /// Failed to pay out native currency (Error code: -11).
    TransferFailed,
    /// Crediting proceeds would exceed the representable amount
    /// (Error code: -12).
    Overflow,
    /// The token was never minted (Error code: -13).
    UnknownToken,
    /// Caller is neither the token owner nor its approved operator
    /// (Error code: -14).
    Unauthorized,
    /// This function must only be called by an account (Error code: -15).
    OnlyAccountAddress,
    /// Failed to invoke a contract (Error code: -16).
    InvokeContractError,
    /// Incompatible contract (Error code: -17).
    Incompatible,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping errors related to currency transfers to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::TransferFailed
    }
}

/// Mapping CustomContractError to ContractError.
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}
