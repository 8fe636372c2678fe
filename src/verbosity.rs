use num_traits::PrimInt;
use tracing::Level;

/// How chatty logging is, from the number of `-v` flags.
#[derive(Debug, PartialEq, Eq)]
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
    pub fn level(&self) -> Level {
        match self {
            Verbosity::None => Level::WARN,
            Verbosity::Some => Level::INFO,
            Verbosity::Very => Level::DEBUG,
        }
    }
}

/// Sends log events to stderr, so they never mix with command output.
pub fn init_logging(verbosity: &Verbosity) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(verbosity.level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Could not set up logging: {}", err);
    }
}
