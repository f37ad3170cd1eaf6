//! Command dispatch and handler modules.

mod compare;
mod resolve;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Resolve {
            coordinates,
            scope,
            repo,
            config,
            include_optional,
            depth,
            json,
            conflicts,
            disabled,
            why,
        } => {
            let opts = resolve::ResolveOptions {
                coordinates,
                scope,
                repo,
                config,
                include_optional,
                depth,
                json,
                conflicts,
                disabled,
                why,
            };
            resolve::exec(opts).await
        }
        Command::Compare { left, right } => compare::exec(&left, &right),
    }
}
