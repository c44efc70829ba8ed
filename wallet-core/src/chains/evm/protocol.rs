// wallet-core/src/chains/evm/protocol.rs
//
// Ethereum Protocol - byte seed, single private key

use crate::account::Account;
use crate::crypto::MnemonicWords;
use crate::error::{CryptoError, WalletResult};
use crate::protocol::{check_decodable, check_word_bounds, Protocol, ProtocolContext};
use tracing::debug;
use zeroize::Zeroizing;

#[derive(Debug, Clone)]
pub struct EthereumProtocol {
    ctx: ProtocolContext,
}

impl EthereumProtocol {
    pub(crate) fn new(ctx: ProtocolContext) -> Self {
        Self { ctx }
    }
}

impl Protocol for EthereumProtocol {
    fn context(&self) -> &ProtocolContext {
        &self.ctx
    }

    fn validate_mnemonic_words(&self, words: &MnemonicWords) -> WalletResult<()> {
        check_word_bounds(words)?;
        check_decodable(self.ctx.dictionary, words)
    }

    fn derive_account(
        &self,
        words: &MnemonicWords,
        passphrase: Option<&str>,
    ) -> WalletResult<Account> {
        let seed = self
            .ctx
            .seed_deriver
            .derive_seed(words.as_slice(), passphrase.unwrap_or(""))?;
        let secret = self.ctx.backend().derive_secret_from_seed(&seed)?;
        let address = self.derive_address(&secret)?;
        debug!(protocol = %self.id(), %address, "ethereum account derived");
        Ok(Account::new(address, secret, self.id()))
    }

    fn derive_address(&self, secret: &str) -> WalletResult<String> {
        let hex_key = secret.strip_prefix("0x").unwrap_or(secret);
        let key = Zeroizing::new(hex::decode(hex_key).map_err(|e| {
            CryptoError::KeyDerivationFailed(format!("secret is not a hex private key: {e}"))
        })?);
        Ok(self.ctx.backend().derive_address(&key, self.network())?)
    }
}
