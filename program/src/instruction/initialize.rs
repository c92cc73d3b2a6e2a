use pinocchio::{account_info::AccountInfo, msg, pubkey::{self, Pubkey}, ProgramResult};
use pinocchio_log::log;

/// Zero-argument entry point. Establishes no state; any supplied accounts are
/// left untouched.
pub fn process_initialize(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    if !accounts.is_empty() {
        log!("initialize: ignoring {} account(s)", accounts.len());
    }
    greet(program_id);
    Ok(())
}

/// `Greetings from: <program id>`
pub(crate) fn greet(program_id: &Pubkey) {
    msg!("Greetings from:");
    pubkey::log(program_id);
}
