//! Output verbosity mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show both declared values even when the check passes.
    Verbose,
    /// Single line on pass, details otherwise.
    #[default]
    Normal,
    /// Nothing at all on pass.
    Quiet,
}

impl OutputMode {
    /// Pick the mode from the `--quiet` / `--verbose` flags.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Whether a passing report shows the declared values.
    pub fn shows_pass_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether a passing report is suppressed entirely.
    pub fn silences_pass(&self) -> bool {
        matches!(self, Self::Quiet)
    }
}
