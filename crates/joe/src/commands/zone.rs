//! Zone file commands: create, list, deploy
//!
//! List and deploy are simulations; they narrate what a real
//! implementation would do against a remote DNS server.

use std::fs;
use std::time::Duration;

use anyhow::Result;
use joe_core::remote::{simulated_zones, DeploymentPlan};
use joe_core::zone::{extract_domain, ZoneSpec};
use tracing::debug;

use crate::cli::{ZoneCommands, ZoneCreateArgs, ZoneDeployArgs, ZoneListArgs};
use crate::output;

pub async fn run(command: ZoneCommands) -> Result<()> {
    match command {
        ZoneCommands::Create(args) => create(args),
        ZoneCommands::List(args) => list(args),
        ZoneCommands::Deploy(args) => deploy(args).await,
    }
}

fn create(args: ZoneCreateArgs) -> Result<()> {
    output::header(&format!("Creating DNS zone file for {}", args.domain));
    debug!("Zone options: ttl={}, admin_email={}", args.ttl, args.admin_email);

    let spec = ZoneSpec::new(&args.domain)?
        .with_nameservers(args.nameservers)
        .with_admin_email(&args.admin_email)
        .with_ttl(args.ttl);

    if spec.uses_default_nameservers() {
        output::note(&format!(
            "No nameservers provided, using default: {}",
            spec.nameservers.join(", ")
        ));
    }

    let content = spec.render();

    match args.output {
        Some(path) => {
            fs::write(&path, &content)?;
            output::success(&format!(
                "Zone file for {} created at {}",
                spec.domain,
                path.display()
            ));
        }
        None => {
            output::header("Zone File Content");
            println!("{content}");
            output::note("To save this zone file, use the --output option.");
        }
    }

    Ok(())
}

fn list(args: ZoneListArgs) -> Result<()> {
    output::header(&format!("DNS Zones on {}", args.server));
    output::note(&format!(
        "This is a simulation. In a real implementation, this would connect to {} and fetch zone files.",
        args.server
    ));

    narrate_auth(args.user.as_deref(), args.key.as_deref());

    let zones = simulated_zones(args.filter.as_deref());

    if zones.is_empty() {
        let suffix = args
            .filter
            .map(|f| format!(" matching filter: {f}"))
            .unwrap_or_default();
        output::warning(&format!("No DNS zones found{suffix}"));
        return Ok(());
    }

    println!(
        "  {:<20} {:<12} {:<21} {:<8}",
        "Domain", "Serial", "Last Modified", "Status"
    );
    for zone in &zones {
        println!(
            "  {:<20} {:<12} {:<21} {:<8}",
            zone.domain,
            zone.serial,
            zone.modified,
            zone.status.to_string()
        );
    }

    let plural = if zones.len() > 1 { "s" } else { "" };
    output::success(&format!("Found {} zone{}", zones.len(), plural));

    Ok(())
}

async fn deploy(args: ZoneDeployArgs) -> Result<()> {
    output::header(&format!("Deploying DNS zone file to {}", args.server));

    if !args.file.exists() {
        return Err(joe_core::Error::zone_file_not_found(args.file.display().to_string()).into());
    }

    let content = fs::read_to_string(&args.file)?;
    let domain = extract_domain(&content).ok_or(joe_core::Error::UnknownOrigin)?;
    debug!("Deploying {:?} ({} bytes) to {}", args.file, content.len(), args.server);

    println!("Deploying zone file for domain: {domain}");

    if args.dry_run {
        output::note("DRY RUN: No changes will be made");
    }
    output::note(&format!(
        "This is a simulation. In a real implementation, this would connect to {} and upload the zone file.",
        args.server
    ));

    narrate_auth(args.user.as_deref(), args.key.as_deref());

    let plan = DeploymentPlan {
        server: args.server.clone(),
        domain: domain.clone(),
        reload: args.reload,
        dry_run: args.dry_run,
    };

    let steps = plan.steps();
    let pb = output::progress_bar(steps.len() as u64, "Deploying");
    for step in &steps {
        // Simulate some work
        tokio::time::sleep(Duration::from_secs(1)).await;
        pb.inc(1);
        pb.println(format!("  {step}"));
    }
    pb.finish_and_clear();

    if args.dry_run {
        output::success("Dry run completed successfully. No changes were made.");
    } else {
        output::success(&format!(
            "Zone file for {domain} deployed successfully to {}",
            args.server
        ));
    }

    Ok(())
}

fn narrate_auth(user: Option<&str>, key: Option<&std::path::Path>) {
    match user {
        Some(user) => {
            println!("Authenticating as user: {user}");
            match key {
                Some(key) => println!("Using SSH key: {}", key.display()),
                None => println!("Using password authentication"),
            }
        }
        None => println!("No authentication provided, attempting anonymous connection"),
    }
}
