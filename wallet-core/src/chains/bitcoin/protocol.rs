// wallet-core/src/chains/bitcoin/protocol.rs
//
// Bitcoin Protocol - byte seed, hierarchical key tree
//
// Secret chính là mnemonic sentence. Seed luôn derive với passphrase rỗng để
// address tái tạo được chỉ từ secret; passphrase chỉ dùng để mã hoá file.

use super::BitcoinBackend;
use crate::account::Account;
use crate::crypto::MnemonicWords;
use crate::error::WalletResult;
use crate::protocol::{check_decodable, check_word_bounds, Protocol, ProtocolContext};
use std::ops::Range;
use tracing::debug;
use zeroize::Zeroizing;

#[derive(Debug, Clone)]
pub struct BitcoinProtocol {
    ctx: ProtocolContext,
}

impl BitcoinProtocol {
    pub(crate) fn new(ctx: ProtocolContext) -> Self {
        Self { ctx }
    }

    fn seed(&self, words: &MnemonicWords) -> WalletResult<Zeroizing<Vec<u8>>> {
        self.ctx.seed_deriver.derive_seed(words.as_slice(), "")
    }

    /// Receive chain addresses of BIP-44 `account` (legacy multi-address model).
    pub fn receive_addresses(
        &self,
        words: &MnemonicWords,
        account: u32,
        indices: Range<u32>,
    ) -> WalletResult<Vec<String>> {
        let seed = self.seed(words)?;
        Ok(BitcoinBackend.receive_addresses(&seed, self.network(), account, indices)?)
    }
}

impl Protocol for BitcoinProtocol {
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
        _passphrase: Option<&str>,
    ) -> WalletResult<Account> {
        let seed = self.seed(words)?;
        let address = self.ctx.backend().derive_address(&seed, self.network())?;
        debug!(protocol = %self.id(), %address, "bitcoin account derived");
        Ok(Account::new(address, words.phrase(), self.id()))
    }

    fn derive_address(&self, secret: &str) -> WalletResult<String> {
        let seed = self.seed(&MnemonicWords::from_phrase(secret))?;
        Ok(self.ctx.backend().derive_address(&seed, self.network())?)
    }
}
