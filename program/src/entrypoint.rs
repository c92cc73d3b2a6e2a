use crate::{
    error::{to_program_error, Music3Error},
    instruction::{self, Music3Instruction},
};
use pinocchio::{
    account_info::AccountInfo, msg, program_entrypoint, pubkey::Pubkey, ProgramResult,
};

// Entrypoint macro
program_entrypoint!(process_instruction);

#[inline(always)]
fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    if *program_id != crate::ID {
        return Err(to_program_error(Music3Error::DeclaredProgramIdMismatch));
    }

    // Methods take no arguments yet; trailing bytes are ignored.
    let (ix, _args) = Music3Instruction::unpack(instruction_data)?;

    match ix {
        Music3Instruction::Initialize => {
            msg!("Instruction: Initialize");
            instruction::initialize::process_initialize(program_id, accounts)
        }
        Music3Instruction::CreateCandyMachine => {
            msg!("Instruction: CreateCandyMachine");
            instruction::create_candy_machine::process_create_candy_machine(program_id, accounts)
        }
    }
}
