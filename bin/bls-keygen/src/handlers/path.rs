//! Prints the EIP-2334 path of an account key.

use bls_key_deriv::{signing_key_path, withdrawal_key_path};

use crate::cli::{KeyKind, PathArgs};

/// Handles the path command.
pub(crate) fn handle_path(args: PathArgs) {
    println!("{}", account_key_path(args.kind, args.account));
}

fn account_key_path(kind: KeyKind, account: u32) -> String {
    match kind {
        KeyKind::Signing => signing_key_path(account),
        KeyKind::Withdrawal => withdrawal_key_path(account),
    }
}
