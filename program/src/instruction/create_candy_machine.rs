use pinocchio::{account_info::AccountInfo, pubkey::Pubkey, ProgramResult};
use pinocchio_log::log;

use super::initialize::greet;

pub fn process_create_candy_machine(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
) -> ProgramResult {
    if !accounts.is_empty() {
        log!("create_candy_machine: ignoring {} account(s)", accounts.len());
    }
    greet(program_id);
    Ok(())
}
