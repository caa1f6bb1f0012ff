//! Process-wide initialization shared by every invocation.
//! Sets up dotenv, the panic hook and a tracing subscriber suited to the environment.

use tracing_subscriber::EnvFilter;

use crate::environment::Environment;

/// Defines how the process is initialized
#[derive(Debug)]
pub struct Entrypoint {
    env: Environment,
}

/// sentinel struct which guarantees that we called [Entrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl Entrypoint {
    /// Loads `.env` if present and reads the [Environment] from it
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Entrypoint {
            env: Environment::new_or_prod(),
        }
    }

    /// consume self, initialize logging and return a proof that it was initialized
    pub fn init(self) -> InitializedEntrypoint {
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.env {
            Environment::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            Environment::Production | Environment::Develop => {
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        InitializedEntrypoint(())
    }
}
