use pinocchio::program_error::ProgramError;

/// Failures raised before any method body runs.
///
/// Codes line up with the framework error codes clients already decode, so a
/// failed dispatch reads the same whichever side reports it.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Music3Error {
    /// Instruction data is shorter than a discriminator.
    InstructionMissing = 100,
    /// The discriminator does not name any method of this program.
    InstructionFallbackNotFound = 101,
    /// The program was invoked under an id other than the declared one.
    DeclaredProgramIdMismatch = 4100,
}

impl Music3Error {
    pub const fn code(self) -> u32 {
        self as u32
    }
}

// map internal errors to standard program error
pub fn to_program_error(err: Music3Error) -> ProgramError {
    ProgramError::Custom(err.code())
}

impl From<Music3Error> for ProgramError {
    fn from(err: Music3Error) -> Self {
        to_program_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_custom_codes() {
        assert_eq!(
            to_program_error(Music3Error::InstructionMissing),
            ProgramError::Custom(100)
        );
        assert_eq!(
            ProgramError::from(Music3Error::InstructionFallbackNotFound),
            ProgramError::Custom(101)
        );
        assert_eq!(Music3Error::DeclaredProgramIdMismatch.code(), 4100);
    }
}
