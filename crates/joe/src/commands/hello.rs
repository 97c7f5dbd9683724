//! Hello world command

use anyhow::Result;

use crate::cli::HelloArgs;

pub fn run(args: HelloArgs) -> Result<()> {
    let mut message = format!("Hello, {}!", args.name);

    if args.uppercase {
        message = message.to_uppercase();
    }

    println!("{message}");
    Ok(())
}
