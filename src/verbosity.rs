use log::LevelFilter;
use num_traits::PrimInt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    None,
    Some,
    Very,
}

impl<X> From<X> for Verbosity
where
    X: PrimInt,
{
    fn from(value: X) -> Self {
        if value < X::one() {
            Verbosity::None
        } else if value < X::one() + X::one() {
            Verbosity::Some
        } else {
            Verbosity::Very
        }
    }
}

impl Verbosity {
    /// The log level shown at this verbosity, unless `RUST_LOG`
    /// says otherwise.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::None => LevelFilter::Warn,
            Verbosity::Some => LevelFilter::Info,
            Verbosity::Very => LevelFilter::Debug,
        }
    }

    /// Installs `env_logger` as the global logger. Log lines go to
    /// stderr, so they never mix with listing output.
    pub fn init_logger(self) {
        env_logger::Builder::new()
            .filter_level(self.level_filter())
            .parse_env("RUST_LOG")
            .format_timestamp(None)
            .format_target(false)
            .init();
    }
}
