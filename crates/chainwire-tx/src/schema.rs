use std::collections::HashMap;
use std::sync::LazyLock;

use chainwire_id::IdKind;

use crate::error::{TxError, TxResult};
use crate::field::FieldType;
use crate::kind::TxKind;

/// One field in a schema: its wire position is its slice index.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

/// The ordered field layout of one (kind, version) pair.
#[derive(Clone, Copy, Debug)]
pub struct TxSchema {
    pub kind: TxKind,
    pub version: u8,
    pub fields: &'static [FieldSpec],
}

const fn f(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec { name, ty }
}

// Identifier kind subsets referenced by field constraints.
const ACCOUNT: &[IdKind] = &[IdKind::Account];
const ORACLE: &[IdKind] = &[IdKind::Oracle];
const NAME: &[IdKind] = &[IdKind::Name];
const COMMITMENT: &[IdKind] = &[IdKind::Commitment];
const CHANNEL: &[IdKind] = &[IdKind::Channel];
const SPEND_TARGET: &[IdKind] = &[IdKind::Account, IdKind::Name, IdKind::Contract, IdKind::Oracle];
const TRANSFER_TARGET: &[IdKind] = &[IdKind::Account, IdKind::Name];
const CALLER: &[IdKind] = &[IdKind::Account, IdKind::Contract];
const CALL_TARGET: &[IdKind] = &[IdKind::Contract, IdKind::Name];

const SIGNED_V1: &[FieldSpec] = &[
    f("signatures", FieldType::BinaryList),
    f("transaction", FieldType::Tx),
];

const SPEND_V1: &[FieldSpec] = &[
    f("sender_id", FieldType::Id(ACCOUNT)),
    f("recipient_id", FieldType::Id(SPEND_TARGET)),
    f("amount", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("ttl", FieldType::UInt),
    f("nonce", FieldType::UInt),
    f("payload", FieldType::Binary),
];

const ORACLE_REGISTER_V1: &[FieldSpec] = &[
    f("account_id", FieldType::Id(ACCOUNT)),
    f("nonce", FieldType::UInt),
    f("query_format", FieldType::Binary),
    f("response_format", FieldType::Binary),
    f("query_fee", FieldType::UInt),
    f("oracle_ttl", FieldType::Ttl),
    f("fee", FieldType::UInt),
    f("ttl", FieldType::UInt),
];

const ORACLE_QUERY_V1: &[FieldSpec] = &[
    f("sender_id", FieldType::Id(ACCOUNT)),
    f("nonce", FieldType::UInt),
    f("oracle_id", FieldType::Id(ORACLE)),
    f("query", FieldType::Binary),
    f("query_fee", FieldType::UInt),
    f("query_ttl", FieldType::Ttl),
    f("response_ttl", FieldType::Ttl),
    f("fee", FieldType::UInt),
    f("ttl", FieldType::UInt),
];

const ORACLE_RESPONSE_V1: &[FieldSpec] = &[
    f("oracle_id", FieldType::Id(ORACLE)),
    f("nonce", FieldType::UInt),
    f("query_id", FieldType::FixedBinary(32)),
    f("response", FieldType::Binary),
    f("response_ttl", FieldType::Ttl),
    f("fee", FieldType::UInt),
    f("ttl", FieldType::UInt),
];

const ORACLE_EXTEND_V1: &[FieldSpec] = &[
    f("oracle_id", FieldType::Id(ORACLE)),
    f("nonce", FieldType::UInt),
    f("oracle_ttl", FieldType::Ttl),
    f("fee", FieldType::UInt),
    f("ttl", FieldType::UInt),
];

const NAME_PRECLAIM_V1: &[FieldSpec] = &[
    f("account_id", FieldType::Id(ACCOUNT)),
    f("nonce", FieldType::UInt),
    f("commitment_id", FieldType::Id(COMMITMENT)),
    f("fee", FieldType::UInt),
    f("ttl", FieldType::UInt),
];

const NAME_CLAIM_V1: &[FieldSpec] = &[
    f("account_id", FieldType::Id(ACCOUNT)),
    f("nonce", FieldType::UInt),
    f("name", FieldType::Binary),
    f("name_salt", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("ttl", FieldType::UInt),
];

// v2 introduced the explicit name fee for the claim auction.
const NAME_CLAIM_V2: &[FieldSpec] = &[
    f("account_id", FieldType::Id(ACCOUNT)),
    f("nonce", FieldType::UInt),
    f("name", FieldType::Binary),
    f("name_salt", FieldType::UInt),
    f("name_fee", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("ttl", FieldType::UInt),
];

const NAME_UPDATE_V1: &[FieldSpec] = &[
    f("account_id", FieldType::Id(ACCOUNT)),
    f("nonce", FieldType::UInt),
    f("name_id", FieldType::Id(NAME)),
    f("name_ttl", FieldType::UInt),
    f("pointers", FieldType::Pointers),
    f("client_ttl", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("ttl", FieldType::UInt),
];

const NAME_TRANSFER_V1: &[FieldSpec] = &[
    f("account_id", FieldType::Id(ACCOUNT)),
    f("nonce", FieldType::UInt),
    f("name_id", FieldType::Id(NAME)),
    f("recipient_id", FieldType::Id(TRANSFER_TARGET)),
    f("fee", FieldType::UInt),
    f("ttl", FieldType::UInt),
];

const NAME_REVOKE_V1: &[FieldSpec] = &[
    f("account_id", FieldType::Id(ACCOUNT)),
    f("nonce", FieldType::UInt),
    f("name_id", FieldType::Id(NAME)),
    f("fee", FieldType::UInt),
    f("ttl", FieldType::UInt),
];

const CONTRACT_CREATE_V1: &[FieldSpec] = &[
    f("owner_id", FieldType::Id(ACCOUNT)),
    f("nonce", FieldType::UInt),
    f("code", FieldType::Binary),
    f("vm_version", FieldType::UInt),
    f("deposit", FieldType::UInt),
    f("amount", FieldType::UInt),
    f("gas", FieldType::UInt),
    f("gas_price", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("ttl", FieldType::UInt),
    f("call_data", FieldType::Binary),
];

const CONTRACT_CALL_V1: &[FieldSpec] = &[
    f("caller_id", FieldType::Id(CALLER)),
    f("nonce", FieldType::UInt),
    f("contract_id", FieldType::Id(CALL_TARGET)),
    f("vm_version", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("ttl", FieldType::UInt),
    f("amount", FieldType::UInt),
    f("gas", FieldType::UInt),
    f("gas_price", FieldType::UInt),
    f("call_data", FieldType::Binary),
];

const CHANNEL_CREATE_V1: &[FieldSpec] = &[
    f("initiator_id", FieldType::Id(ACCOUNT)),
    f("initiator_amount", FieldType::UInt),
    f("responder_id", FieldType::Id(ACCOUNT)),
    f("responder_amount", FieldType::UInt),
    f("channel_reserve", FieldType::UInt),
    f("lock_period", FieldType::UInt),
    f("ttl", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("state_hash", FieldType::StateHash),
    f("nonce", FieldType::UInt),
];

const CHANNEL_DEPOSIT_V1: &[FieldSpec] = &[
    f("channel_id", FieldType::Id(CHANNEL)),
    f("from_id", FieldType::Id(ACCOUNT)),
    f("amount", FieldType::UInt),
    f("ttl", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("state_hash", FieldType::StateHash),
    f("round", FieldType::UInt),
    f("nonce", FieldType::UInt),
];

const CHANNEL_WITHDRAW_V1: &[FieldSpec] = &[
    f("channel_id", FieldType::Id(CHANNEL)),
    f("to_id", FieldType::Id(ACCOUNT)),
    f("amount", FieldType::UInt),
    f("ttl", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("state_hash", FieldType::StateHash),
    f("round", FieldType::UInt),
    f("nonce", FieldType::UInt),
];

const CHANNEL_CLOSE_MUTUAL_V1: &[FieldSpec] = &[
    f("channel_id", FieldType::Id(CHANNEL)),
    f("from_id", FieldType::Id(ACCOUNT)),
    f("initiator_amount_final", FieldType::UInt),
    f("responder_amount_final", FieldType::UInt),
    f("ttl", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("nonce", FieldType::UInt),
];

const CHANNEL_CLOSE_SOLO_V1: &[FieldSpec] = &[
    f("channel_id", FieldType::Id(CHANNEL)),
    f("from_id", FieldType::Id(ACCOUNT)),
    f("payload", FieldType::Binary),
    f("poi", FieldType::Binary),
    f("ttl", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("nonce", FieldType::UInt),
];

const CHANNEL_SLASH_V1: &[FieldSpec] = &[
    f("channel_id", FieldType::Id(CHANNEL)),
    f("from_id", FieldType::Id(ACCOUNT)),
    f("payload", FieldType::Binary),
    f("poi", FieldType::Binary),
    f("ttl", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("nonce", FieldType::UInt),
];

const CHANNEL_SETTLE_V1: &[FieldSpec] = &[
    f("channel_id", FieldType::Id(CHANNEL)),
    f("from_id", FieldType::Id(ACCOUNT)),
    f("initiator_amount_final", FieldType::UInt),
    f("responder_amount_final", FieldType::UInt),
    f("ttl", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("nonce", FieldType::UInt),
];

const CHANNEL_OFFCHAIN_V1: &[FieldSpec] = &[
    f("channel_id", FieldType::Id(CHANNEL)),
    f("round", FieldType::UInt),
    f("updates", FieldType::Binary),
    f("state_hash", FieldType::StateHash),
];

// v2 dropped the updates field; the state hash alone commits to them.
const CHANNEL_OFFCHAIN_V2: &[FieldSpec] = &[
    f("channel_id", FieldType::Id(CHANNEL)),
    f("round", FieldType::UInt),
    f("state_hash", FieldType::StateHash),
];

const CHANNEL_SNAPSHOT_SOLO_V1: &[FieldSpec] = &[
    f("channel_id", FieldType::Id(CHANNEL)),
    f("from_id", FieldType::Id(ACCOUNT)),
    f("payload", FieldType::Binary),
    f("ttl", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("nonce", FieldType::UInt),
];

const GA_ATTACH_V1: &[FieldSpec] = &[
    f("owner_id", FieldType::Id(ACCOUNT)),
    f("nonce", FieldType::UInt),
    f("code", FieldType::Binary),
    f("auth_fun", FieldType::FixedBinary(32)),
    f("vm_version", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("ttl", FieldType::UInt),
    f("gas", FieldType::UInt),
    f("gas_price", FieldType::UInt),
    f("call_data", FieldType::Binary),
];

const GA_META_V1: &[FieldSpec] = &[
    f("ga_id", FieldType::Id(ACCOUNT)),
    f("auth_data", FieldType::Binary),
    f("abi_version", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("gas", FieldType::UInt),
    f("gas_price", FieldType::UInt),
    f("tx", FieldType::Tx),
];

const PAYING_FOR_V1: &[FieldSpec] = &[
    f("payer_id", FieldType::Id(ACCOUNT)),
    f("nonce", FieldType::UInt),
    f("fee", FieldType::UInt),
    f("tx", FieldType::Tx),
];

const fn s(kind: TxKind, version: u8, fields: &'static [FieldSpec]) -> TxSchema {
    TxSchema { kind, version, fields }
}

/// Every registered (kind, version) layout. Populated once; never mutated.
static SCHEMAS: &[TxSchema] = &[
    s(TxKind::SignedTx, 1, SIGNED_V1),
    s(TxKind::SpendTx, 1, SPEND_V1),
    s(TxKind::OracleRegisterTx, 1, ORACLE_REGISTER_V1),
    s(TxKind::OracleQueryTx, 1, ORACLE_QUERY_V1),
    s(TxKind::OracleResponseTx, 1, ORACLE_RESPONSE_V1),
    s(TxKind::OracleExtendTx, 1, ORACLE_EXTEND_V1),
    s(TxKind::NamePreclaimTx, 1, NAME_PRECLAIM_V1),
    s(TxKind::NameClaimTx, 1, NAME_CLAIM_V1),
    s(TxKind::NameClaimTx, 2, NAME_CLAIM_V2),
    s(TxKind::NameUpdateTx, 1, NAME_UPDATE_V1),
    s(TxKind::NameTransferTx, 1, NAME_TRANSFER_V1),
    s(TxKind::NameRevokeTx, 1, NAME_REVOKE_V1),
    s(TxKind::ContractCreateTx, 1, CONTRACT_CREATE_V1),
    s(TxKind::ContractCallTx, 1, CONTRACT_CALL_V1),
    s(TxKind::ChannelCreateTx, 1, CHANNEL_CREATE_V1),
    s(TxKind::ChannelDepositTx, 1, CHANNEL_DEPOSIT_V1),
    s(TxKind::ChannelWithdrawTx, 1, CHANNEL_WITHDRAW_V1),
    s(TxKind::ChannelCloseMutualTx, 1, CHANNEL_CLOSE_MUTUAL_V1),
    s(TxKind::ChannelCloseSoloTx, 1, CHANNEL_CLOSE_SOLO_V1),
    s(TxKind::ChannelSlashTx, 1, CHANNEL_SLASH_V1),
    s(TxKind::ChannelSettleTx, 1, CHANNEL_SETTLE_V1),
    s(TxKind::ChannelOffchainTx, 1, CHANNEL_OFFCHAIN_V1),
    s(TxKind::ChannelOffchainTx, 2, CHANNEL_OFFCHAIN_V2),
    s(TxKind::ChannelSnapshotSoloTx, 1, CHANNEL_SNAPSHOT_SOLO_V1),
    s(TxKind::GaAttachTx, 1, GA_ATTACH_V1),
    s(TxKind::GaMetaTx, 1, GA_META_V1),
    s(TxKind::PayingForTx, 1, PAYING_FOR_V1),
];

static INDEX: LazyLock<HashMap<(TxKind, u8), &'static TxSchema>> =
    LazyLock::new(|| SCHEMAS.iter().map(|s| ((s.kind, s.version), s)).collect());

/// The version used on build when the caller does not pick one.
pub fn default_version(kind: TxKind) -> u8 {
    match kind {
        TxKind::NameClaimTx | TxKind::ChannelOffchainTx => 2,
        _ => 1,
    }
}

/// Look up the layout for (kind, version), defaulting the version.
pub fn resolve_schema(kind: TxKind, version: Option<u8>) -> TxResult<&'static TxSchema> {
    let version = version.unwrap_or_else(|| default_version(kind));
    INDEX
        .get(&(kind, version))
        .copied()
        .ok_or(TxError::SchemaNotFound { kind, version })
}
