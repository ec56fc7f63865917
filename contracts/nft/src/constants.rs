/// Metadata URL shared by every token minted by this contract. The artwork
/// is static, so the URL does not depend on the token ID.
pub const TOKEN_METADATA_URL: &str = "ipfs://QmYQC5aGZu2PTA8rgjJrmQhx7YlKMdiV3F6cxJHeP9nmbb";
