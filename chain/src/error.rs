//! Error taxonomy for chain interactions.
//!
//! Failures are classified here, from the RPC client's typed errors, so the
//! UI never has to pattern-match display strings.

use std::fmt;

use anchor_client::solana_client::client_error::{ClientError, ClientErrorKind};
use anchor_client::solana_client::rpc_request::{RpcError, RpcResponseErrorData};
use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_client::solana_sdk::transaction::TransactionError;

#[derive(Debug, Clone, PartialEq)]
pub enum ChainError {
    Wallet(String),
    AccountNotFound(Pubkey),
    IncorrectOwner(Pubkey),
    Decode(String),
    InsufficientFunds,
    Rejected(String),
    Rpc(String),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wallet(msg) => write!(f, "wallet error: {msg}"),
            Self::AccountNotFound(pubkey) => write!(f, "account not found: {pubkey}"),
            Self::IncorrectOwner(owner) => write!(f, "unexpected account owner: {owner}"),
            Self::Decode(msg) => write!(f, "account decode error: {msg}"),
            Self::InsufficientFunds => write!(f, "insufficient funds"),
            Self::Rejected(msg) => write!(f, "signature rejected: {msg}"),
            Self::Rpc(msg) => write!(f, "rpc error: {msg}"),
        }
    }
}

/// Map a client error into the taxonomy.
///
/// Insufficient-funds and signing failures are recognized from the typed
/// error data, including when they surface inside a preflight simulation
/// result; everything else lands in `Rpc`.
pub fn classify(err: ClientError) -> ChainError {
    match &err.kind {
        ClientErrorKind::TransactionError(tx_err) => {
            classify_tx_error(tx_err).unwrap_or_else(|| ChainError::Rpc(err.to_string()))
        }
        ClientErrorKind::SigningError(sign_err) => ChainError::Rejected(sign_err.to_string()),
        ClientErrorKind::RpcError(RpcError::RpcResponseError {
            data: RpcResponseErrorData::SendTransactionPreflightFailure(sim),
            ..
        }) => sim
            .err
            .as_ref()
            .and_then(classify_tx_error)
            .unwrap_or_else(|| ChainError::Rpc(err.to_string())),
        _ => ChainError::Rpc(err.to_string()),
    }
}

fn classify_tx_error(err: &TransactionError) -> Option<ChainError> {
    match err {
        TransactionError::InsufficientFundsForFee
        | TransactionError::InsufficientFundsForRent { .. } => {
            Some(ChainError::InsufficientFunds)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_client::solana_client::rpc_response::RpcSimulateTransactionResult;
    use anchor_client::solana_sdk::signer::SignerError;

    #[test]
    fn insufficient_fee_is_insufficient_funds() {
        let err: ClientError =
            ClientErrorKind::TransactionError(TransactionError::InsufficientFundsForFee).into();
        assert_eq!(classify(err), ChainError::InsufficientFunds);
    }

    #[test]
    fn insufficient_rent_is_insufficient_funds() {
        let err: ClientError = ClientErrorKind::TransactionError(
            TransactionError::InsufficientFundsForRent { account_index: 0 },
        )
        .into();
        assert_eq!(classify(err), ChainError::InsufficientFunds);
    }

    #[test]
    fn signing_failure_is_rejected() {
        let err: ClientError =
            ClientErrorKind::SigningError(SignerError::Custom("user declined".to_string())).into();
        match classify(err) {
            ChainError::Rejected(msg) => assert!(msg.contains("user declined")),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn preflight_insufficient_funds_is_recognized() {
        let sim = RpcSimulateTransactionResult {
            err: Some(TransactionError::InsufficientFundsForFee),
            logs: None,
            accounts: None,
            units_consumed: None,
            return_data: None,
            inner_instructions: None,
        };
        let err: ClientError = ClientErrorKind::RpcError(RpcError::RpcResponseError {
            code: -32002,
            message: "Transaction simulation failed".to_string(),
            data: RpcResponseErrorData::SendTransactionPreflightFailure(sim),
        })
        .into();
        assert_eq!(classify(err), ChainError::InsufficientFunds);
    }

    #[test]
    fn preflight_program_failure_is_rpc() {
        let sim = RpcSimulateTransactionResult {
            err: Some(TransactionError::AccountNotFound),
            logs: None,
            accounts: None,
            units_consumed: None,
            return_data: None,
            inner_instructions: None,
        };
        let err: ClientError = ClientErrorKind::RpcError(RpcError::RpcResponseError {
            code: -32002,
            message: "Transaction simulation failed".to_string(),
            data: RpcResponseErrorData::SendTransactionPreflightFailure(sim),
        })
        .into();
        assert!(matches!(classify(err), ChainError::Rpc(_)));
    }

    #[test]
    fn other_transaction_errors_are_rpc() {
        let err: ClientError =
            ClientErrorKind::TransactionError(TransactionError::AlreadyProcessed).into();
        assert!(matches!(classify(err), ChainError::Rpc(_)));
    }

    #[test]
    fn transport_errors_are_rpc() {
        let err: ClientError = ClientErrorKind::Custom("connection refused".to_string()).into();
        match classify(err) {
            ChainError::Rpc(msg) => assert!(msg.contains("connection refused")),
            other => panic!("expected Rpc, got {other:?}"),
        }
    }
}
