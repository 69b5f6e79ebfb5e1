//! Corredora Category Migration CLI
//!
//! One-shot conversion of legacy string category codes on products into
//! normalized category references, with verification and a symmetric
//! rollback. Intended to run once, by an operator, against a quiescent
//! store.

use clap::Parser;
use colored::Colorize;
use corredora::connection::database_from;
use corredora::migration::{
    self, MigratePlan, MigrationSummary, RollbackReport, LEGACY_CATEGORIES,
};
use corredora::store::{MongoCategoryStore, MongoProductStore};
use corredora::{connect, CategoryStore, ProductStore};
use std::process;

#[derive(Parser)]
#[command(name = "corredora-migrate")]
#[command(about = "Category migration tool for the corredora catalog")]
#[command(version = "0.1.0")]
struct Cli {
    /// Document store connection URL
    #[arg(long)]
    database_url: Option<String>,

    /// Database name (defaults to the one embedded in the connection URL)
    #[arg(long)]
    database: Option<String>,

    /// Revert migrated products back to legacy category codes
    #[arg(long)]
    rollback: bool,

    /// Show what would change without writing
    #[arg(long)]
    dry_run: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    if cli.quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    } else if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    // Get database URL
    let database_url = match resolve_database_url(&cli) {
        Some(url) => url,
        None => {
            eprintln!(
                "Error: Database URL not provided. Use --database-url or set MONGODB_URI or DATABASE_URL environment variable."
            );
            process::exit(1);
        }
    };

    // Connect to the document store
    let client = match connect(&database_url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} {}", "❌ Error connecting to database:".red(), e);
            process::exit(1);
        }
    };

    let database = database_from(&client, cli.database.as_deref());
    log::debug!("resolved target database '{}'", database.name());
    if !cli.quiet {
        println!("✅ Connected to database '{}'", database.name());
    }

    let categories = MongoCategoryStore::new(&database);
    let products = MongoProductStore::new(&database);

    let result = if cli.rollback {
        handle_rollback(&categories, &products, &cli)
    } else {
        handle_migrate(&categories, &products, &cli)
    };

    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{} {}", "❌ Error:".red(), e);
            process::exit(1);
        }
    }
}

fn resolve_database_url(cli: &Cli) -> Option<String> {
    cli.database_url
        .clone()
        .or_else(|| std::env::var("MONGODB_URI").ok())
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .or_else(|| {
            corredora::config::DatabaseConfig::load()
                .ok()
                .and_then(|config| config.uri().map(str::to_string))
        })
}

fn handle_migrate(
    categories: &dyn CategoryStore,
    products: &dyn ProductStore,
    cli: &Cli,
) -> anyhow::Result<()> {
    if cli.dry_run {
        let plan = migration::plan_forward(categories, products, &LEGACY_CATEGORIES)?;
        print_plan(&plan, cli.json)?;
        return Ok(());
    }

    println!("🚀 Starting category migration...");

    println!("\n📝 Step 1: Seeding categories");
    let seed = migration::seed_categories(categories, &LEGACY_CATEGORIES)?;
    println!(
        "   {} created, {} already present",
        seed.created_count, seed.existing_count
    );

    println!("\n📦 Step 2: Migrating products");
    let migrate = migration::migrate_products(products, &seed.mapping)?;
    println!(
        "   {} migrated, {} skipped (already migrated), {} unresolved",
        migrate.migrated_count,
        migrate.skipped_count,
        migrate.unresolved_count()
    );
    for unresolved in &migrate.unresolved {
        println!(
            "   ⚠️  unresolved: {} ({})",
            unresolved.title, unresolved.category
        );
    }

    println!("\n🔍 Step 3: Verifying data integrity");
    let verify = migration::verify_integrity(products)?;

    let summary = MigrationSummary::new(&seed, &migrate, &verify);
    print_summary(&summary, cli.json)?;

    Ok(())
}

fn handle_rollback(
    categories: &dyn CategoryStore,
    products: &dyn ProductStore,
    cli: &Cli,
) -> anyhow::Result<()> {
    if cli.dry_run {
        let plan = migration::plan_rollback(categories, products)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            println!(
                "Would revert {} of {} product(s); {} left untouched",
                plan.reverted_count, plan.total_products, plan.skipped_count
            );
        }
        return Ok(());
    }

    println!("🔄 Starting migration rollback...");
    let report = migration::run_rollback(categories, products)?;
    print_rollback(&report, cli.json)?;

    Ok(())
}

fn print_plan(plan: &MigratePlan, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(plan)?);
        return Ok(());
    }

    println!("Would seed {} categor(ies), {} already present", plan.categories_to_create, plan.categories_existing);
    println!(
        "Would migrate {} of {} product(s); {} already migrated, {} unresolved",
        plan.migrate.migrated_count,
        plan.migrate.total_products,
        plan.migrate.skipped_count,
        plan.migrate.unresolved_count()
    );
    for unresolved in &plan.migrate.unresolved {
        println!(
            "  ⚠️  unresolved: {} ({})",
            unresolved.title, unresolved.category
        );
    }
    Ok(())
}

fn print_summary(summary: &MigrationSummary, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("\n📊 Migration summary:");
    println!(
        "   • {} categories created/verified",
        summary.categories_seeded
    );
    println!("   • {} products migrated", summary.migrated_count);
    println!(
        "   • {} products skipped (already migrated)",
        summary.skipped_count
    );
    println!("   • {} products unresolved", summary.unresolved_count);
    println!(
        "   • {}/{} products with valid categories",
        summary.valid_category_count, summary.total_products
    );

    if summary.is_fully_valid() {
        println!("\n{}", "🎉 Migration completed successfully!".green());
    } else {
        println!("\n{}", "⚠️  Migration completed with warnings".yellow());
        println!(
            "   {} product(s) may have category problems",
            summary.total_products - summary.valid_category_count
        );
    }
    Ok(())
}

fn print_rollback(report: &RollbackReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "\n{} {} product(s) reverted, {} skipped",
        "🎉 Rollback completed:".green(),
        report.reverted_count,
        report.skipped_count
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_forward_is_default() {
        let cli = Cli::parse_from(["corredora-migrate"]);
        assert!(!cli.rollback);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_rollback_flag() {
        let cli = Cli::parse_from(["corredora-migrate", "--rollback", "--dry-run"]);
        assert!(cli.rollback);
        assert!(cli.dry_run);
    }
}
