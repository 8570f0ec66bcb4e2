#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    ReadProfile(std::io::Error),
    WriteProfile(std::io::Error),
    ReadInput(std::io::Error),
    Profile(mhc_icc::Error),
    Validation { errors: usize },
    Json(serde_json::Error),
}

impl From<mhc_icc::Error> for Error {
    fn from(value: mhc_icc::Error) -> Self {
        Self::Profile(value)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ReadProfile(e) => write!(f, "failed reading ICC profile: {e}"),
            Error::WriteProfile(e) => write!(f, "failed writing ICC profile: {e}"),
            Error::ReadInput(e) => write!(f, "failed reading tag data: {e}"),
            Error::Profile(e) => write!(f, "{e}"),
            Error::Validation { errors } => {
                write!(f, "profile failed validation with {errors} error(s)")
            }
            Error::Json(e) => write!(f, "failed to serialize report: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ReadProfile(e) => Some(e),
            Error::WriteProfile(e) => Some(e),
            Error::ReadInput(e) => Some(e),
            Error::Profile(e) => Some(e),
            Error::Validation { .. } => None,
            Error::Json(e) => Some(e),
        }
    }
}
