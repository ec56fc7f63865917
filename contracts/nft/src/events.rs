use super::*;

/// Approval event data.
#[derive(Debug, Serialize, SchemaType)]
pub struct ApprovalEvent {
    /// Owner granting or revoking the approval.
    pub owner: AccountAddress,
    /// Token the approval applies to.
    pub token_id: ContractTokenId,
    /// The approved address, `None` when the approval was cleared.
    pub operator: Option<Address>,
}

/// Tagged custom event to be serialized for the event log.
#[derive(Debug)]
pub enum NftEvent {
    /// An approved operator was set or cleared for a token.
    Approval(ApprovalEvent),
}

impl Serial for NftEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            NftEvent::Approval(event) => {
                out.write_u8(APPROVAL_TAG)?;
                event.serial(out)
            }
        }
    }
}
