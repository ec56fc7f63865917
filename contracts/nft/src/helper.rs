use super::*;

/// Event announcing the metadata URL of a freshly minted token.
pub fn token_metadata_event(
    token_id: ContractTokenId,
) -> Cis2Event<ContractTokenId, ContractTokenAmount> {
    Cis2Event::TokenMetadata(TokenMetadataEvent {
        token_id,
        metadata_url: MetadataUrl {
            url: String::from(TOKEN_METADATA_URL),
            hash: None,
        },
    })
}
