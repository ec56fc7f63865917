use super::*;

/// Global token identity: the token contract together with the token ID
/// unique within it. Used as the listing key.
#[derive(Debug, Serialize, SchemaType, Hash, PartialEq, Eq, Clone, Copy)]
pub struct Token {
    pub contract: ContractAddress,
    pub id: ContractTokenId,
}
