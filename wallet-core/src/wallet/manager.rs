// wallet-core/src/wallet/manager.rs
//
// Wallet Manager - lifecycle của wallet
//
// Create:
//   words? ─► (generate) ─► Protocol.create_account (validate + derive) ─► Wallet
// Restore:
//   content ─► parse_envelope ─► ProtocolRegistry ─► AccountCodec.from_record
//           ─► re-derive address & compare ─► Wallet | AddressMismatch

use super::envelope::{parse_envelope, EnvelopeShape, WalletEnvelope};
use super::Wallet;
use crate::config::WalletConfig;
use crate::crypto::MnemonicWords;
use crate::error::WalletResult;
use crate::protocol::{Network, Protocol, ProtocolRegistry, Technology};
use tracing::info;

#[derive(Debug, Clone)]
pub struct WalletManager {
    registry: ProtocolRegistry,
}

impl WalletManager {
    pub fn new(config: &WalletConfig) -> WalletResult<Self> {
        Ok(Self::with_registry(ProtocolRegistry::new(config)?))
    }

    pub fn with_registry(registry: ProtocolRegistry) -> Self {
        Self { registry }
    }

    #[inline]
    pub fn registry(&self) -> &ProtocolRegistry {
        &self.registry
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    /// Tạo wallet mới.
    ///
    /// `words` rỗng hoặc `None` ⇒ generate mnemonic mới. Validation nằm trong
    /// [`Protocol::create_account`].
    pub fn create(
        &self,
        words: Option<MnemonicWords>,
        passphrase: Option<&str>,
        protocol: &dyn Protocol,
    ) -> WalletResult<Wallet> {
        let words = match words {
            Some(words) if !words.is_empty() => words,
            _ => protocol.generate_mnemonic_words()?,
        };
        let account = protocol.create_account(&words, passphrase)?;
        info!(
            technology = %protocol.technology(),
            network = %protocol.network(),
            address = account.address(),
            "wallet created"
        );

        let config = self.registry.config();
        Ok(Wallet::new(
            Some(words),
            passphrase,
            account,
            config.default_directory.clone(),
            config.file_extension.clone(),
        ))
    }

    /// [`create`](Self::create) với protocol lấy từ registry
    pub fn create_for(
        &self,
        technology: Technology,
        network: Network,
        words: Option<MnemonicWords>,
        passphrase: Option<&str>,
    ) -> WalletResult<Wallet> {
        let protocol = self.registry.protocol(technology, network)?;
        self.create(words, passphrase, protocol.as_ref())
    }

    // =========================================================================
    // RESTORE
    // =========================================================================

    /// Restore wallet từ file content (nested hoặc legacy shape).
    ///
    /// Address luôn được re-derive từ secret đã giải mã và so với address
    /// lưu trong file.
    pub fn restore(&self, content: &str, passphrase: Option<&str>) -> WalletResult<Wallet> {
        let parsed = parse_envelope(content)?;
        let protocol = self
            .registry
            .protocol_by_name(&parsed.technology, &parsed.network)?;

        let account = protocol.restore_account(&parsed.account, passphrase)?;
        info!(
            technology = %protocol.technology(),
            network = %protocol.network(),
            address = account.address(),
            legacy = parsed.shape == EnvelopeShape::Legacy,
            "wallet restored"
        );

        // Passphrase chỉ giữ lại khi file thực sự encrypted
        let passphrase = passphrase.filter(|_| parsed.account.is_encrypted());
        let config = self.registry.config();
        Ok(Wallet::new(
            None,
            passphrase,
            account,
            config.default_directory.clone(),
            config.file_extension.clone(),
        ))
    }

    // =========================================================================
    // SERIALIZE
    // =========================================================================

    /// Nested 1.0 envelope, pretty JSON. Secret encrypted iff wallet có passphrase.
    pub fn to_file_content(&self, wallet: &Wallet) -> WalletResult<String> {
        let id = wallet.protocol();
        let protocol = self.registry.protocol(id.technology, id.network)?;
        let record = protocol.account_to_record(wallet.account(), wallet.passphrase(), false)?;

        WalletEnvelope::new(id.technology.to_string(), id.network.to_string(), record)
            .to_json_pretty()
    }

    /// Legacy (hoặc nested) content → nested 1.0 content, giữ nguyên trạng thái encryption.
    pub fn migrate(&self, content: &str, passphrase: Option<&str>) -> WalletResult<String> {
        let wallet = self.restore(content, passphrase)?;
        self.to_file_content(&wallet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CryptoError, Field, WalletError};
    use crate::wallet::parse_envelope;

    const TEST_MNEMONIC: &str =
        "history suit seat regular toe valid circle public issue degree river vendor";
    const TEST_PASSPHRASE: &str = "test_pass_phrase";
    const ETH_ADDRESS: &str = "0x7612ba8356851158ca0d21b23a3322dbf81c2938";

    fn manager() -> WalletManager {
        WalletManager::new(&WalletConfig::for_testing()).unwrap()
    }

    fn words() -> Option<MnemonicWords> {
        Some(MnemonicWords::from_phrase(TEST_MNEMONIC))
    }

    #[test]
    fn test_create_with_words() {
        let wallet = manager()
            .create_for(Technology::Ethereum, Network::Test, words(), Some(TEST_PASSPHRASE))
            .unwrap();
        assert_eq!(wallet.account().address(), ETH_ADDRESS);
        assert_eq!(wallet.passphrase(), Some(TEST_PASSPHRASE));
        assert_eq!(wallet.file_name(), format!("{ETH_ADDRESS}.json"));
        assert_eq!(
            wallet.mnemonic_words().map(|w| w.len()),
            Some(12)
        );
    }

    #[test]
    fn test_create_generates_when_absent() {
        let manager = manager();
        for words in [None, Some(MnemonicWords::new(Vec::new()))] {
            let wallet = manager
                .create_for(Technology::Bitcoin, Network::Test, words, None)
                .unwrap();
            let generated = wallet.mnemonic_words().unwrap();
            assert_eq!(generated.len(), 12);
            assert_eq!(wallet.account().secret(), generated.phrase().as_str());
        }
    }

    #[test]
    fn test_create_rejects_invalid_words() {
        let bad = Some(MnemonicWords::from_phrase("history suit seat regular"));
        assert!(matches!(
            manager().create_for(Technology::Ethereum, Network::Test, bad, None),
            Err(WalletError::InvalidMnemonic { .. })
        ));
    }

    #[test]
    fn test_create_rejects_invalid_words_for_every_technology() {
        let manager = manager();
        let bad = MnemonicWords::from_phrase("not a real mnemonic");
        for technology in [Technology::Bitcoin, Technology::Ethereum] {
            let protocol = manager.registry().protocol(technology, Network::Test).unwrap();
            assert!(matches!(
                protocol.create_account(&bad, None),
                Err(WalletError::InvalidMnemonic { .. })
            ));
        }

        let iota = manager.registry().protocol(Technology::Iota, Network::Test).unwrap();
        let empty = MnemonicWords::new(vec!["".to_string()]);
        assert!(matches!(
            iota.create_account(&empty, None),
            Err(WalletError::InvalidMnemonic { .. })
        ));
        assert!(iota.create_account(&bad, None).is_ok());
    }

    #[test]
    fn test_roundtrip_encrypted() {
        let manager = manager();
        let created = manager
            .create_for(Technology::Ethereum, Network::Test, words(), Some(TEST_PASSPHRASE))
            .unwrap();
        let content = manager.to_file_content(&created).unwrap();

        let parsed = parse_envelope(&content).unwrap();
        assert!(parsed.account.is_encrypted());
        assert_eq!(parsed.account.technology, None);

        let restored = manager.restore(&content, Some(TEST_PASSPHRASE)).unwrap();
        assert_eq!(restored, created);
        assert_eq!(restored.mnemonic_words(), None);

        assert_eq!(
            manager.restore(&content, None).unwrap_err(),
            WalletError::PassphraseRequired
        );
        assert_eq!(
            manager.restore(&content, Some("wrong")).unwrap_err(),
            WalletError::Crypto(CryptoError::DecryptionFailed)
        );
    }

    #[test]
    fn test_roundtrip_plaintext() {
        let manager = manager();
        let created = manager
            .create_for(Technology::Bitcoin, Network::Production, words(), None)
            .unwrap();
        let content = manager.to_file_content(&created).unwrap();
        assert!(content.contains(TEST_MNEMONIC));

        let restored = manager.restore(&content, None).unwrap();
        assert_eq!(restored, created);
        assert_eq!(restored.passphrase(), None);
    }

    #[test]
    fn test_restore_unknown_technology() {
        let content = r#"{"version": "1.0", "technology": "Ripple", "network": "Test",
            "account": {"address": "r", "secret": "s", "encrypted": false}}"#;
        assert_eq!(
            manager().restore(content, None).unwrap_err(),
            WalletError::UnsupportedTechnology("Ripple".to_string())
        );
    }

    #[test]
    fn test_restore_missing_account_field() {
        let content = r#"{"version": "1.0", "technology": "Ethereum", "network": "Test",
            "account": {"address": "0xabc", "encrypted": false}}"#;
        assert_eq!(
            manager().restore(content, None).unwrap_err(),
            WalletError::MissingField(Field::Secret)
        );
    }

    #[test]
    fn test_restore_detects_address_mismatch() {
        let manager = manager();
        let created = manager
            .create_for(Technology::Ethereum, Network::Test, words(), Some(TEST_PASSPHRASE))
            .unwrap();
        assert_eq!(created.account().address(), ETH_ADDRESS);

        let content = manager.to_file_content(&created).unwrap();
        assert!(content.contains(ETH_ADDRESS));
        let content = content.replace(ETH_ADDRESS, "0x0000000000000000000000000000000000000001");

        let err = manager.restore(&content, Some(TEST_PASSPHRASE)).unwrap_err();
        assert!(matches!(err, WalletError::AddressMismatch { .. }));
        assert!(err.is_integrity_error());
    }

    #[test]
    fn test_restored_plaintext_drops_unused_passphrase() {
        let manager = manager();
        let created = manager
            .create_for(Technology::Ethereum, Network::Test, words(), None)
            .unwrap();
        let content = manager.to_file_content(&created).unwrap();

        let restored = manager.restore(&content, Some("unused")).unwrap();
        assert_eq!(restored.passphrase(), None);
        let again = manager.to_file_content(&restored).unwrap();
        assert!(!parse_envelope(&again).unwrap().account.is_encrypted());
    }
}
