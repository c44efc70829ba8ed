// wallet-core/src/protocol/registry.rs
//
// Protocol Registry - (technology, network) → Protocol
//
// Registry giữ các collaborators dùng chung (dictionary, entropy, cipher,
// backends) và dựng Protocol instance theo yêu cầu. Protocol chỉ clone Arc,
// không copy state.

use super::{Network, Protocol, ProtocolContext, ProtocolId, Technology};
use crate::account::AccountCodec;
use crate::chains::{
    BitcoinBackend, BitcoinProtocol, EthereumProtocol, EvmBackend, IotaBackend, IotaProtocol,
    KeyDerivationBackend,
};
use crate::config::WalletConfig;
use crate::crypto::{AesGcmCipher, EntropySource, MnemonicCodec, OsEntropy, SeedDeriver, SymmetricCipher};
use crate::error::{WalletError, WalletResult};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ProtocolRegistry {
    config: WalletConfig,
    dictionary: &'static MnemonicCodec,
    entropy: Arc<dyn EntropySource>,
    cipher: Arc<dyn SymmetricCipher>,
    backends: HashMap<Technology, Arc<dyn KeyDerivationBackend>>,
}

impl fmt::Debug for ProtocolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut technologies: Vec<_> = self.backends.keys().collect();
        technologies.sort();
        f.debug_struct("ProtocolRegistry")
            .field("technologies", &technologies)
            .field("pbkdf2_rounds", &self.config.pbkdf2_rounds)
            .finish_non_exhaustive()
    }
}

impl ProtocolRegistry {
    /// Registry với ba built-in backends, OS entropy và AES-GCM cipher.
    ///
    /// Fails with `InvalidConfig` on a bad config and `DictionaryCorrupt`
    /// if the bundled word list does not verify.
    pub fn new(config: &WalletConfig) -> WalletResult<Self> {
        config.validate()?;
        let dictionary = MnemonicCodec::english()?;
        let cipher = AesGcmCipher::new(&config.cipher)?;

        let mut backends: HashMap<Technology, Arc<dyn KeyDerivationBackend>> = HashMap::new();
        backends.insert(Technology::Bitcoin, Arc::new(BitcoinBackend));
        backends.insert(Technology::Ethereum, Arc::new(EvmBackend));
        backends.insert(Technology::Iota, Arc::new(IotaBackend::default()));

        Ok(Self {
            config: config.clone(),
            dictionary,
            entropy: Arc::new(OsEntropy),
            cipher: Arc::new(cipher),
            backends,
        })
    }

    // =========================================================================
    // INJECTION
    // =========================================================================

    /// Thay backend của `backend.technology()`
    pub fn with_backend(mut self, backend: Arc<dyn KeyDerivationBackend>) -> Self {
        debug!(technology = %backend.technology(), "backend replaced");
        self.backends.insert(backend.technology(), backend);
        self
    }

    pub fn with_entropy_source(mut self, entropy: Arc<dyn EntropySource>) -> Self {
        self.entropy = entropy;
        self
    }

    pub fn with_cipher(mut self, cipher: Arc<dyn SymmetricCipher>) -> Self {
        self.cipher = cipher;
        self
    }

    #[inline]
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    pub fn protocol(
        &self,
        technology: Technology,
        network: Network,
    ) -> WalletResult<Arc<dyn Protocol>> {
        let ctx = self.context(ProtocolId::new(technology, network))?;
        let protocol: Arc<dyn Protocol> = match technology {
            Technology::Bitcoin => Arc::new(BitcoinProtocol::new(ctx)),
            Technology::Ethereum => Arc::new(EthereumProtocol::new(ctx)),
            Technology::Iota => Arc::new(IotaProtocol::new(ctx)),
        };
        Ok(protocol)
    }

    /// Lookup theo tên như trong wallet file ("Iota", "Test")
    ///
    /// Fails with `UnsupportedTechnology` / `UnsupportedNetwork` for unknown names.
    pub fn protocol_by_name(&self, technology: &str, network: &str) -> WalletResult<Arc<dyn Protocol>> {
        self.protocol(technology.parse()?, network.parse()?)
    }

    /// Typed Bitcoin protocol, exposes receive address batches.
    pub fn bitcoin(&self, network: Network) -> WalletResult<BitcoinProtocol> {
        let ctx = self.context(ProtocolId::new(Technology::Bitcoin, network))?;
        Ok(BitcoinProtocol::new(ctx))
    }

    fn context(&self, id: ProtocolId) -> WalletResult<ProtocolContext> {
        let backend = self
            .backends
            .get(&id.technology)
            .cloned()
            .ok_or_else(|| WalletError::UnsupportedTechnology(id.technology.to_string()))?;

        Ok(ProtocolContext {
            id,
            backend,
            dictionary: self.dictionary,
            entropy: Arc::clone(&self.entropy),
            seed_deriver: SeedDeriver::new(self.config.pbkdf2_rounds),
            account_codec: AccountCodec::new(Arc::clone(&self.cipher)),
            entropy_bits: self.config.entropy_bits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::BackendResult;
    use crate::crypto::MnemonicWords;
    use crate::error::{CryptoError, MnemonicError};
    use zeroize::Zeroizing;

    const TEST_MNEMONIC: &str =
        "history suit seat regular toe valid circle public issue degree river vendor";
    const TEST_PASSPHRASE: &str = "test_pass_phrase";

    /// Entropy cố định cho mnemonic deterministic
    struct FixedEntropy(u8);

    impl EntropySource for FixedEntropy {
        fn generate(&self, bits: usize) -> WalletResult<Zeroizing<Vec<u8>>> {
            Ok(Zeroizing::new(vec![self.0; bits / 8]))
        }
    }

    #[derive(Debug)]
    struct FailingBackend;

    impl KeyDerivationBackend for FailingBackend {
        fn technology(&self) -> Technology {
            Technology::Ethereum
        }

        fn derive_address(&self, _key: &[u8], _network: Network) -> BackendResult<String> {
            Err(CryptoError::KeyDerivationFailed("offline".to_string()))
        }

        fn derive_secret_from_seed(&self, _seed: &[u8]) -> BackendResult<Zeroizing<String>> {
            Err(CryptoError::KeyDerivationFailed("offline".to_string()))
        }
    }

    fn registry() -> ProtocolRegistry {
        ProtocolRegistry::new(&WalletConfig::for_testing()).unwrap()
    }

    #[test]
    fn test_lookup_every_pair() {
        let registry = registry();
        for technology in Technology::ALL {
            for network in Network::ALL {
                let protocol = registry.protocol(technology, network).unwrap();
                assert_eq!(protocol.id(), ProtocolId::new(technology, network));
            }
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let registry = registry();
        let protocol = registry.protocol_by_name("Iota", "Test").unwrap();
        assert_eq!(protocol.technology(), Technology::Iota);

        assert_eq!(
            registry.protocol_by_name("Litecoin", "Test").unwrap_err(),
            WalletError::UnsupportedTechnology("Litecoin".to_string())
        );
        assert!(matches!(
            registry.protocol_by_name("Bitcoin", "Regtest"),
            Err(WalletError::UnsupportedNetwork(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WalletConfig {
            pbkdf2_rounds: 0,
            ..WalletConfig::for_testing()
        };
        assert!(matches!(
            ProtocolRegistry::new(&config),
            Err(WalletError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_golden_accounts() {
        let registry = registry();
        let words = MnemonicWords::from_phrase(TEST_MNEMONIC);

        let eth = registry.protocol(Technology::Ethereum, Network::Test).unwrap();
        let account = eth.create_account(&words, Some(TEST_PASSPHRASE)).unwrap();
        assert_eq!(
            account.secret(),
            "b0507b391821757ffc8b3cd7ee8dd1b96f7cb05f7fcce2fb650ce1804159f7b0"
        );
        assert_eq!(account.address(), "0x7612ba8356851158ca0d21b23a3322dbf81c2938");

        let btc = registry.protocol(Technology::Bitcoin, Network::Production).unwrap();
        let account = btc.create_account(&words, Some(TEST_PASSPHRASE)).unwrap();
        assert_eq!(account.secret(), TEST_MNEMONIC);
        assert_eq!(account.address(), "18RJUfZwBTaNSNS55seBRzkMSvLkvjKtur");

        let btc_test = registry.protocol(Technology::Bitcoin, Network::Test).unwrap();
        let account = btc_test.create_account(&words, None).unwrap();
        assert_eq!(account.address(), "mnwFmieuzV1dDUugoScZFuxgJuwTqW89Zm");

        let iota = registry.protocol(Technology::Iota, Network::Test).unwrap();
        let account = iota.create_account(&words, Some(TEST_PASSPHRASE)).unwrap();
        assert_eq!(
            account.secret(),
            "WZGTVNXWXTJ9SBNRYWAPZW99DPZQTDDMTRXZYOX9XRMBY9VFRGNTYGAGSJSRGDLOYCINVANLXQJGHYVUG"
        );
        assert_eq!(
            account.address(),
            "RCJXXBJJGBXOCCRGVZYITIBTVRGYQZDTJIZELVWTYJNHFLKFQNYGCJNXLWXPJDCICQJBCGGUOVNUTQGKYFZZSOCJED"
        );
    }

    #[test]
    fn test_iota_secret_depends_on_passphrase() {
        let iota = registry().protocol(Technology::Iota, Network::Unit).unwrap();
        let words = MnemonicWords::from_phrase(TEST_MNEMONIC);
        let none = iota
            .context()
            .seed_deriver()
            .derive_symbols(words.as_slice(), "", 81, crate::crypto::TRYTE_ALPHABET)
            .unwrap();
        assert_eq!(
            &*none,
            "HGVZZAJQEXVFUKYRIVSVZRWMSM9SOWYUURPUYBJNNM9MKUMIENBHR9GFQRJUIRR9KINIVOEAQDKIURBWU"
        );
    }

    #[test]
    fn test_bitcoin_receive_addresses() {
        let btc = registry().bitcoin(Network::Production).unwrap();
        let words = MnemonicWords::from_phrase(TEST_MNEMONIC);
        let addresses = btc.receive_addresses(&words, 0, 0..2).unwrap();
        assert_eq!(
            addresses,
            vec![
                "18RJUfZwBTaNSNS55seBRzkMSvLkvjKtur".to_string(),
                "1QFGQu4b9zdfu1CcTzoVw5AnEgr5J6jUq8".to_string(),
            ]
        );
    }

    #[test]
    fn test_validation_rules() {
        let registry = registry();
        let valid = MnemonicWords::from_phrase(TEST_MNEMONIC);
        let short = MnemonicWords::from_phrase("history suit seat");
        let unknown = MnemonicWords::from_phrase(
            "history suit seat regular toe valid circle public issue degree river qwerty",
        );
        let empty = MnemonicWords::new(Vec::new());

        for technology in [Technology::Bitcoin, Technology::Ethereum] {
            let protocol = registry.protocol(technology, Network::Test).unwrap();
            assert!(protocol.validate_mnemonic_words(&valid).is_ok());
            assert!(matches!(
                protocol.validate_mnemonic_words(&short),
                Err(WalletError::InvalidMnemonic { .. })
            ));
            match protocol.validate_mnemonic_words(&unknown).unwrap_err() {
                WalletError::InvalidMnemonic { source, .. } => assert!(matches!(
                    source,
                    Some(MnemonicError::UnknownWord { position: 12, .. })
                )),
                other => panic!("unexpected error: {other:?}"),
            }
        }

        // Iota chỉ từ chối words rỗng
        let iota = registry.protocol(Technology::Iota, Network::Test).unwrap();
        assert!(iota.validate_mnemonic_words(&short).is_ok());
        assert!(iota.validate_mnemonic_words(&unknown).is_ok());
        assert!(matches!(
            iota.validate_mnemonic_words(&empty),
            Err(WalletError::InvalidMnemonic { .. })
        ));
    }

    #[test]
    fn test_generate_with_injected_entropy() {
        let registry = registry().with_entropy_source(Arc::new(FixedEntropy(0)));
        let protocol = registry.protocol(Technology::Ethereum, Network::Unit).unwrap();
        let words = protocol.generate_mnemonic_words().unwrap();
        assert_eq!(
            &*words.phrase(),
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
        );
        assert!(protocol.validate_mnemonic_words(&words).is_ok());
    }

    #[test]
    fn test_generate_uses_configured_strength() {
        let config = WalletConfig {
            entropy_bits: 256,
            ..WalletConfig::for_testing()
        };
        let registry = ProtocolRegistry::new(&config).unwrap();
        let protocol = registry.protocol(Technology::Bitcoin, Network::Test).unwrap();
        assert_eq!(protocol.generate_mnemonic_words().unwrap().len(), 24);
    }

    #[test]
    fn test_backend_injection() {
        let registry = registry().with_backend(Arc::new(FailingBackend));
        let eth = registry.protocol(Technology::Ethereum, Network::Test).unwrap();
        let words = MnemonicWords::from_phrase(TEST_MNEMONIC);
        assert_eq!(
            eth.create_account(&words, None).unwrap_err(),
            WalletError::Crypto(CryptoError::KeyDerivationFailed("offline".to_string()))
        );

        // Technologies khác không bị ảnh hưởng
        let btc = registry.protocol(Technology::Bitcoin, Network::Test).unwrap();
        assert!(btc.create_account(&words, None).is_ok());
    }

    #[test]
    fn test_restore_detects_tampered_address() {
        let registry = registry();
        let eth = registry.protocol(Technology::Ethereum, Network::Test).unwrap();
        let words = MnemonicWords::from_phrase(TEST_MNEMONIC);
        let account = eth.create_account(&words, Some(TEST_PASSPHRASE)).unwrap();

        let mut record = eth
            .account_to_record(&account, Some(TEST_PASSPHRASE), false)
            .unwrap();
        let restored = eth.restore_account(&record, Some(TEST_PASSPHRASE)).unwrap();
        assert_eq!(restored, account);

        record.address = Some("0x0000000000000000000000000000000000000000".to_string());
        assert!(matches!(
            eth.restore_account(&record, Some(TEST_PASSPHRASE)),
            Err(WalletError::AddressMismatch { .. })
        ));
    }
}
