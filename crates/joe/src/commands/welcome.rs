//! Welcome command

use anyhow::Result;

use crate::output;

pub fn run() -> Result<()> {
    output::header("Welcome to DNS Taxi - Joe");

    println!("Joe is a utility tool to build and manage DNS zone files on remote DNS servers.");
    println!("It provides commands for creating, listing, and deploying DNS zone files.");
    println!();
    println!("Available commands:");
    println!("  zone create - Creates a new DNS zone file");
    println!("  zone list   - Lists DNS zone files on remote servers");
    println!("  zone deploy - Deploys DNS zone files to remote servers");
    println!("  update      - Checks for updates and updates the application");

    output::header("Getting Started");

    println!("To create a new DNS zone file:");
    println!("  joe zone create example.com --output example.com.zone");
    println!();
    println!("To list DNS zone files on a remote server:");
    println!("  joe zone list --server dns1.example.com --user admin");
    println!();
    println!("To deploy a DNS zone file to a remote server:");
    println!("  joe zone deploy example.com.zone --server dns1.example.com --user admin --reload");
    println!();
    println!("For more information on a specific command, use:");
    println!("  joe help <command>");
    println!();

    output::success("Joe is ready to drive your DNS zones!");

    Ok(())
}
