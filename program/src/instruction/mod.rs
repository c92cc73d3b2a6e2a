use pinocchio::program_error::ProgramError;
use shank::ShankInstruction;

use crate::error::{to_program_error, Music3Error};

pub mod create_candy_machine;
pub mod initialize;

pub use create_candy_machine::*;
pub use initialize::*;

/// Length of the method selector that prefixes every instruction.
pub const DISCRIMINATOR_LEN: usize = 8;

/// `sha256("global:initialize")[..8]`
pub const INITIALIZE_DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] =
    [175, 175, 109, 31, 13, 152, 155, 237];

/// `sha256("global:create_candy_machine")[..8]`
pub const CREATE_CANDY_MACHINE_DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] =
    [84, 112, 91, 6, 68, 170, 92, 225];

#[rustfmt::skip]
#[derive(Clone, Copy, Debug, PartialEq, Eq, ShankInstruction)]
pub enum Music3Instruction {
    /// Zero-argument entry point; logs a greeting with the executing program id.
    Initialize,
    /// Placeholder for candy machine creation; logs the same greeting.
    CreateCandyMachine,
}

impl Music3Instruction {
    pub const ALL: [Music3Instruction; 2] = [
        Music3Instruction::Initialize,
        Music3Instruction::CreateCandyMachine,
    ];

    pub const fn discriminator(&self) -> [u8; DISCRIMINATOR_LEN] {
        match self {
            Music3Instruction::Initialize => INITIALIZE_DISCRIMINATOR,
            Music3Instruction::CreateCandyMachine => CREATE_CANDY_MACHINE_DISCRIMINATOR,
        }
    }

    /// Method name as it is hashed into the discriminator.
    pub const fn method_name(&self) -> &'static str {
        match self {
            Music3Instruction::Initialize => "initialize",
            Music3Instruction::CreateCandyMachine => "create_candy_machine",
        }
    }

    /// Splits instruction data into the method and its argument bytes.
    ///
    /// Arguments are handed back untouched; methods without arguments ignore
    /// whatever trails the discriminator.
    pub fn unpack(data: &[u8]) -> Result<(Self, &[u8]), ProgramError> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(to_program_error(Music3Error::InstructionMissing));
        }
        let (disc, args) = data.split_at(DISCRIMINATOR_LEN);
        let mut buf = [0u8; DISCRIMINATOR_LEN];
        buf.copy_from_slice(disc);
        Ok((Music3Instruction::try_from(&buf)?, args))
    }
}

impl TryFrom<&[u8; DISCRIMINATOR_LEN]> for Music3Instruction {
    type Error = ProgramError;

    fn try_from(value: &[u8; DISCRIMINATOR_LEN]) -> Result<Self, Self::Error> {
        match *value {
            INITIALIZE_DISCRIMINATOR => Ok(Music3Instruction::Initialize),
            CREATE_CANDY_MACHINE_DISCRIMINATOR => Ok(Music3Instruction::CreateCandyMachine),
            _ => Err(to_program_error(Music3Error::InstructionFallbackNotFound)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_known_methods() {
        for ix in Music3Instruction::ALL {
            let (decoded, args) = Music3Instruction::unpack(&ix.discriminator()).unwrap();
            assert_eq!(decoded, ix);
            assert!(args.is_empty());
        }
    }

    #[test]
    fn unpack_keeps_trailing_bytes() {
        let mut data = INITIALIZE_DISCRIMINATOR.to_vec();
        data.extend_from_slice(&[1, 2, 3]);
        let (ix, args) = Music3Instruction::unpack(&data).unwrap();
        assert_eq!(ix, Music3Instruction::Initialize);
        assert_eq!(args, &[1u8, 2, 3]);
    }

    #[test]
    fn short_data_is_missing_instruction() {
        assert_eq!(
            Music3Instruction::unpack(&[175, 175, 109]).unwrap_err(),
            ProgramError::Custom(100)
        );
        assert_eq!(
            Music3Instruction::unpack(&[]).unwrap_err(),
            ProgramError::Custom(100)
        );
    }

    #[test]
    fn unknown_discriminator_falls_through() {
        assert_eq!(
            Music3Instruction::unpack(&[0u8; 8]).unwrap_err(),
            ProgramError::Custom(101)
        );
    }
}
