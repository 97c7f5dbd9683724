//! Update command
//!
//! The calling side of the self-update core: supplies the confirmation
//! prompt, narrates progress, and maps the outcome to an exit status.
//! `UpToDate`, `Updated` and `Declined` exit zero; failures propagate as
//! errors and exit non-zero.

use anyhow::{Context, Result};
use dialoguer::Confirm;
use joe_update::{UpdateOutcome, Updater};
use semver::Version;
use tracing::debug;

use crate::cli::UpdateArgs;
use crate::output;

pub async fn run(args: UpdateArgs) -> Result<()> {
    output::header("Checking for updates");

    let current = Version::parse(env!("CARGO_PKG_VERSION"))?;
    output::kv("Current version", &current.to_string());
    debug!("Update requested (check_only={}, assume_yes={})", args.check, args.yes);

    let updater = Updater::from_environment(current)
        .context("could not resolve the running executable")?;

    if args.check {
        return check_only(&updater).await;
    }

    // A non-interactive caller forces unattended updates with an
    // always-true confirmation
    let confirm: Box<dyn Fn() -> bool> = if args.yes {
        Box::new(|| true)
    } else {
        Box::new(|| {
            Confirm::new()
                .with_prompt("Do you want to update?")
                .default(true)
                .interact()
                .unwrap_or(false)
        })
    };

    match updater.run(confirm.as_ref()).await? {
        UpdateOutcome::UpToDate => {
            output::success("You are already using the latest version.");
        }
        UpdateOutcome::Declined => {
            output::info("Update cancelled.");
        }
        UpdateOutcome::Updated { version, deferred } => match deferred {
            None => {
                output::success(&format!("Update completed successfully! Now at {version}"));
            }
            Some(_) => {
                output::success(&format!("Update to {version} scheduled."));
                output::info("The update will complete after this process exits.");
                output::info("Please restart joe to use the new version.");
            }
        },
    }

    Ok(())
}

async fn check_only(updater: &Updater) -> Result<()> {
    let spinner = output::spinner("Checking GitHub for latest version...");
    let newer = updater.check().await;
    spinner.finish_and_clear();

    match newer? {
        Some(version) => {
            output::success(&format!("A new version is available: {version}"));
            output::info("Run 'joe update' to install it");
        }
        None => {
            output::success("You are already using the latest version.");
        }
    }

    Ok(())
}
