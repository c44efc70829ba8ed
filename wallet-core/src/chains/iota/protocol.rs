// wallet-core/src/chains/iota/protocol.rs
//
// Iota Protocol - symbol seed, sponge-hash address
//
// Secret = 81 trytes rút từ PBKDF2 output qua Lcg48. Validation chỉ kiểm tra
// words không rỗng; words không cần nằm trong dictionary.

use super::address::ADDRESS_TRYTES;
use crate::account::Account;
use crate::crypto::{MnemonicWords, TRYTE_ALPHABET};
use crate::error::{MnemonicError, WalletError, WalletResult};
use crate::protocol::{Protocol, ProtocolContext};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct IotaProtocol {
    ctx: ProtocolContext,
}

impl IotaProtocol {
    pub(crate) fn new(ctx: ProtocolContext) -> Self {
        Self { ctx }
    }
}

impl Protocol for IotaProtocol {
    fn context(&self) -> &ProtocolContext {
        &self.ctx
    }

    fn validate_mnemonic_words(&self, words: &MnemonicWords) -> WalletResult<()> {
        if words.is_empty() || words.as_slice().iter().any(|w| w.is_empty()) {
            return Err(WalletError::InvalidMnemonic {
                reason: "mnemonic must contain at least one non-empty word".to_string(),
                source: Some(MnemonicError::InvalidWordListSize(words.len())),
            });
        }
        Ok(())
    }

    fn derive_account(
        &self,
        words: &MnemonicWords,
        passphrase: Option<&str>,
    ) -> WalletResult<Account> {
        let secret = self.ctx.seed_deriver.derive_symbols(
            words.as_slice(),
            passphrase.unwrap_or(""),
            ADDRESS_TRYTES,
            TRYTE_ALPHABET,
        )?;
        let address = self.derive_address(&secret)?;
        debug!(protocol = %self.id(), %address, "iota account derived");
        Ok(Account::new(address, secret, self.id()))
    }

    fn derive_address(&self, secret: &str) -> WalletResult<String> {
        Ok(self
            .ctx
            .backend()
            .derive_address(secret.as_bytes(), self.network())?)
    }
}
