// wallet-core/src/crypto/paths.rs
//
// Derivation Paths - BIP-44 legacy paths cho Bitcoin account

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    pub const BITCOIN: u32 = 0;
}

// =============================================================================
// DERIVATION PATHS
// =============================================================================
/// BIP-44: `m/44'/coin'/account'/change/index`
pub struct DerivationPaths;

impl DerivationPaths {
    /// BIP-44: Legacy (1...), account 0, external chain, index 0
    pub const BTC_LEGACY_0: &'static str = "m/44'/0'/0'/0/0";

    /// Legacy path with custom account & index
    #[inline]
    pub fn btc_legacy(account: u32, index: u32) -> String {
        format!("{}/{}", Self::btc_legacy_chain(account, false), index)
    }

    /// Base path tới chain (external = 0, change = 1), dùng cho batch derivation
    #[inline]
    pub fn btc_legacy_chain(account: u32, change: bool) -> String {
        format!(
            "m/44'/{}'/{}'/{}",
            coin_type::BITCOIN,
            account,
            u8::from(change)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_paths() {
        assert_eq!(DerivationPaths::btc_legacy(0, 0), DerivationPaths::BTC_LEGACY_0);
        assert_eq!(DerivationPaths::btc_legacy(2, 7), "m/44'/0'/2'/0/7");
        assert_eq!(DerivationPaths::btc_legacy_chain(1, true), "m/44'/0'/1'/1");
    }
}
