use super::*;

/// Parameter for the token contract `approve` entrypoint.
#[derive(Debug, Serialize, SchemaType, Clone, Copy)]
pub struct ApproveParams {
    /// Token the approval applies to.
    pub token_id: ContractTokenId,
    /// Address allowed to transfer the token on the owner's behalf.
    /// `None` clears a previously granted approval.
    pub operator: Option<Address>,
}

/// Parameter for the token contract `transferFrom` entrypoint.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct TransferFromParams {
    /// Token to transfer.
    pub token_id: ContractTokenId,
    /// Current owner of the token.
    pub from: AccountAddress,
    /// Address receiving the token.
    pub to: AccountAddress,
}
