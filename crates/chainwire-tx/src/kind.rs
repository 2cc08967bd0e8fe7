use serde::{Deserialize, Serialize};

/// Transaction kinds, closed over the wire tags the protocol defines.
///
/// The tag is the first element of every encoded transaction's envelope and
/// is what decode dispatches on before any field-level work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxKind {
    SignedTx,
    SpendTx,
    OracleRegisterTx,
    OracleQueryTx,
    OracleResponseTx,
    OracleExtendTx,
    NameClaimTx,
    NamePreclaimTx,
    NameUpdateTx,
    NameTransferTx,
    NameRevokeTx,
    ContractCreateTx,
    ContractCallTx,
    ChannelCreateTx,
    ChannelDepositTx,
    ChannelWithdrawTx,
    ChannelCloseMutualTx,
    ChannelCloseSoloTx,
    ChannelSlashTx,
    ChannelSettleTx,
    ChannelOffchainTx,
    ChannelSnapshotSoloTx,
    GaAttachTx,
    GaMetaTx,
    PayingForTx,
}

impl TxKind {
    pub const ALL: [TxKind; 25] = [
        TxKind::SignedTx,
        TxKind::SpendTx,
        TxKind::OracleRegisterTx,
        TxKind::OracleQueryTx,
        TxKind::OracleResponseTx,
        TxKind::OracleExtendTx,
        TxKind::NameClaimTx,
        TxKind::NamePreclaimTx,
        TxKind::NameUpdateTx,
        TxKind::NameTransferTx,
        TxKind::NameRevokeTx,
        TxKind::ContractCreateTx,
        TxKind::ContractCallTx,
        TxKind::ChannelCreateTx,
        TxKind::ChannelDepositTx,
        TxKind::ChannelWithdrawTx,
        TxKind::ChannelCloseMutualTx,
        TxKind::ChannelCloseSoloTx,
        TxKind::ChannelSlashTx,
        TxKind::ChannelSettleTx,
        TxKind::ChannelOffchainTx,
        TxKind::ChannelSnapshotSoloTx,
        TxKind::GaAttachTx,
        TxKind::GaMetaTx,
        TxKind::PayingForTx,
    ];

    /// Wire tag carried in the transaction envelope.
    pub fn tag(&self) -> u64 {
        match self {
            Self::SignedTx => 11,
            Self::SpendTx => 12,
            Self::OracleRegisterTx => 22,
            Self::OracleQueryTx => 23,
            Self::OracleResponseTx => 24,
            Self::OracleExtendTx => 25,
            Self::NameClaimTx => 32,
            Self::NamePreclaimTx => 33,
            Self::NameUpdateTx => 34,
            Self::NameTransferTx => 35,
            Self::NameRevokeTx => 36,
            Self::ContractCreateTx => 42,
            Self::ContractCallTx => 43,
            Self::ChannelCreateTx => 50,
            Self::ChannelDepositTx => 51,
            Self::ChannelWithdrawTx => 52,
            Self::ChannelCloseMutualTx => 53,
            Self::ChannelCloseSoloTx => 54,
            Self::ChannelSlashTx => 55,
            Self::ChannelSettleTx => 56,
            Self::ChannelOffchainTx => 57,
            Self::ChannelSnapshotSoloTx => 59,
            Self::GaAttachTx => 80,
            Self::GaMetaTx => 81,
            Self::PayingForTx => 82,
        }
    }

    /// Parse a wire tag.
    pub fn from_tag(tag: u64) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.tag() == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_roundtrip() {
        for kind in TxKind::ALL {
            assert_eq!(TxKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn tags_are_unique() {
        let mut tags: Vec<u64> = TxKind::ALL.iter().map(|k| k.tag()).collect();
        let len = tags.len();
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), len);
    }

    #[test]
    fn unknown_tags_are_none() {
        for tag in [0u64, 1, 13, 58, 99, u64::MAX] {
            assert_eq!(TxKind::from_tag(tag), None);
        }
    }
}
