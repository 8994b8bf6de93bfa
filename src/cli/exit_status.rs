use std::process::ExitCode;

/// Process exit status of the `ivy` binary.
///
/// - `Success` (0): the command ran; for `status`, keys may still be missing
///   unless `--strict` was given
/// - `Failure` (1): `status --strict` found missing values, or `init` found an
///   existing config
/// - `Error` (2): the project could not be opened or a resource failed to parse
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
