//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Progress, the result, and location details.
    Verbose,
    /// Progress and the result.
    #[default]
    Normal,
    /// Only the result.
    Quiet,
    /// Nothing except errors.
    Silent,
}

impl OutputMode {
    /// Pick a mode from the global `--verbose` flag and `--quiet` count.
    ///
    /// `-q` keeps only the result and `-qq` silences everything but errors.
    /// Quiet wins over verbose.
    pub fn from_flags(verbose: bool, quiet: u8) -> Self {
        if quiet >= 2 {
            Self::Silent
        } else if quiet == 1 {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows location and source details.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
