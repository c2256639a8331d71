use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;

use super::view;
use crate::config::QuoteConfig;
use crate::db::Database;
use crate::models::{BuildingMaterial, Customer, PriceTier, QuotedBudget};
use crate::quote;
use crate::validate::{parse_number, Field, RawBudgetRequest};

/// Command-line flags of `quote` and the form field each one fills.
const QUOTE_FLAGS: &[(&str, Field)] = &[
    ("--customer", Field::CustomerId),
    ("--material", Field::InsulatingMaterialId),
    ("--thickness", Field::LayerThickness),
    ("--area", Field::AreaToCover),
];

/// Run one command and return the process exit status.
pub(crate) fn as_cli(args: &[String], db: &mut Database, config: &QuoteConfig) -> Result<u8> {
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(0);
    };
    let rest = &args[2..];

    match command.as_str() {
        "quote" | "q" => return Ok(cli_quote(rest, db, config)),
        "budgets" => cli_budgets(db)?,
        "show" => cli_show(rest, db)?,
        "customers" => cli_customers(db)?,
        "add-customer" => cli_add_customer(rest, db)?,
        "materials" => cli_materials(db)?,
        "add-material" => cli_add_material(rest, db)?,
        "add-price" => cli_add_price(rest, db)?,
        "add-bag" => cli_add_bag(rest, db)?,
        "import-prices" => cli_import_prices(rest, db)?,
        "--help" | "-h" | "help" => print_usage(),
        "--version" | "-V" | "version" => {
            println!("insulquote {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
    Ok(0)
}

fn print_usage() {
    println!("InsulQuote — insulation material quotes");
    println!();
    println!("Usage: insulquote <command>");
    println!();
    println!("Commands:");
    println!("  quote                               Create a budget");
    println!("    --customer <id>                   Customer id");
    println!("    --material <id>                   Insulating material id");
    println!("    --thickness <mm>                  Layer thickness (50-200 mm)");
    println!("    --area <m2>                       Area to cover (min 4.5 m²)");
    println!("  budgets                             List saved budgets");
    println!("  show <budget-id>                    Show one budget");
    println!("  customers                           List customers");
    println!("  add-customer <name>                 Register a customer");
    println!("  materials                           List materials, prices and bags");
    println!("  add-material <name>                 Register a material");
    println!("  add-price <material-id> <mm> <price>  Set the unit price for a thickness");
    println!("  add-bag <material-id> <description>   Register a bag for a material");
    println!("  import-prices <file.csv>            Load material,thickness_mm,unit_price rows");
    println!("  --help, -h                          Show this help");
    println!("  --version, -V                       Show version");
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Turn `quote` arguments into raw form fields. Bare `name=value` pairs are
/// accepted as well; flags win over pairs.
pub(crate) fn quote_request(args: &[String]) -> RawBudgetRequest {
    let pairs = args
        .iter()
        .filter(|a| !a.starts_with('-'))
        .filter_map(|a| a.split_once('='));
    let flags = QUOTE_FLAGS
        .iter()
        .filter_map(|(flag, field)| flag_value(args, flag).map(|v| (field.as_str(), v)));
    RawBudgetRequest::from_form(pairs.chain(flags))
}

fn cli_quote(args: &[String], db: &mut Database, config: &QuoteConfig) -> u8 {
    let request = quote_request(args);
    let now = chrono::Utc::now();
    match quote::create_budget(db, config, &request, now) {
        Ok(quoted) => {
            println!("{}", view::render_budget(&quoted, now));
            0
        }
        Err(err) => {
            eprintln!("{}", view::render_errors(&err));
            view::exit_status(&err)
        }
    }
}

fn cli_budgets(db: &Database) -> Result<()> {
    let budgets = db.get_budgets()?;
    if budgets.is_empty() {
        println!("No budgets");
        return Ok(());
    }

    let now = chrono::Utc::now();
    println!(
        "{:<5} {:<11} {:<22} {:>6} {:>9} {:>11} {:>7}  Expires",
        "ID", "Date", "Customer", "mm", "m²", "Price", "Bags"
    );
    println!("{}", "─".repeat(90));
    for budget in &budgets {
        let customer = db
            .get_customer_by_id(budget.customer_id)?
            .map(|c| c.name)
            .unwrap_or_else(|| format!("#{}", budget.customer_id));
        let expired = if budget.is_expired(now) { " (expired)" } else { "" };
        println!(
            "{:<5} {:<11} {:<22} {:>6} {:>9.2} {:>11.2} {:>7.2}  {}{expired}",
            budget.id.unwrap_or(0),
            budget.created_at.format("%Y-%m-%d"),
            customer,
            budget.layer_thickness_mm,
            budget.area_to_cover.round_dp(2),
            budget.price.round_dp(2),
            budget.bags_quantity.round_dp(2),
            budget.expires_at.format("%Y-%m-%d"),
        );
    }
    Ok(())
}

fn cli_show(args: &[String], db: &Database) -> Result<()> {
    let id = parse_id(args.first(), "Usage: insulquote show <budget-id>")?;
    let budget = db
        .get_budget_by_id(id)?
        .ok_or_else(|| anyhow::anyhow!("Budget {id} not found"))?;
    let customer = db
        .get_customer_by_id(budget.customer_id)?
        .ok_or_else(|| anyhow::anyhow!("Customer {} not found", budget.customer_id))?;
    let bag = db
        .get_bag_by_id(budget.bag_id)?
        .ok_or_else(|| anyhow::anyhow!("Bag {} not found", budget.bag_id))?;

    let quoted = QuotedBudget {
        budget,
        customer,
        bag,
    };
    println!("{}", view::render_budget(&quoted, chrono::Utc::now()));
    Ok(())
}

fn cli_customers(db: &Database) -> Result<()> {
    let customers = db.get_customers()?;
    if customers.is_empty() {
        println!("No customers");
        return Ok(());
    }
    println!("{:<4} Name", "ID");
    println!("{}", "─".repeat(40));
    for customer in &customers {
        println!("{}", view::render_customer_row(customer));
    }
    Ok(())
}

fn cli_add_customer(args: &[String], db: &Database) -> Result<()> {
    let name = args.join(" ");
    if name.trim().is_empty() {
        anyhow::bail!("Usage: insulquote add-customer <name>");
    }
    let id = db.insert_customer(&Customer::new(name.trim().to_string()))?;
    println!("Added customer {id}: {}", name.trim());
    Ok(())
}

fn cli_materials(db: &Database) -> Result<()> {
    let materials = db.get_materials()?;
    if materials.is_empty() {
        println!("No materials");
        return Ok(());
    }
    let bags = db.get_bags()?;
    for material in &materials {
        let descriptions: Vec<&str> = bags
            .iter()
            .filter(|b| b.material_id() == material.id)
            .map(|b| b.description.as_str())
            .collect();
        println!("{}", view::render_material(material, &descriptions));
    }
    Ok(())
}

fn cli_add_material(args: &[String], db: &Database) -> Result<()> {
    let name = args.join(" ");
    if name.trim().is_empty() {
        anyhow::bail!("Usage: insulquote add-material <name>");
    }
    let id = db.insert_material(&BuildingMaterial::new(name.trim().to_string()))?;
    println!("Added material {id}: {}", name.trim());
    Ok(())
}

fn cli_add_price(args: &[String], db: &Database) -> Result<()> {
    const USAGE: &str = "Usage: insulquote add-price <material-id> <mm> <unit-price>";
    if args.len() < 3 {
        anyhow::bail!(USAGE);
    }
    let material_id = parse_id(args.first(), USAGE)?;
    let thickness_mm = parse_id(args.get(1), USAGE).context("Thickness must be a positive whole number")?;
    let unit_price = parse_number(&args[2])
        .filter(|p| *p >= Decimal::ZERO)
        .ok_or_else(|| anyhow::anyhow!("Invalid unit price: {}", args[2]))?;

    if db.get_material_by_id(material_id)?.is_none() {
        anyhow::bail!("Material {material_id} not found");
    }
    db.upsert_price_tier(material_id, &PriceTier::new(thickness_mm, unit_price))?;
    println!("Material {material_id}: {thickness_mm} mm at ${unit_price:.2}/m²");
    Ok(())
}

fn cli_add_bag(args: &[String], db: &Database) -> Result<()> {
    const USAGE: &str = "Usage: insulquote add-bag <material-id> <description>";
    let material_id = parse_id(args.first(), USAGE)?;
    let description = args.get(1..).map(|a| a.join(" ")).unwrap_or_default();
    if description.trim().is_empty() {
        anyhow::bail!(USAGE);
    }
    if db.get_material_by_id(material_id)?.is_none() {
        anyhow::bail!("Material {material_id} not found");
    }
    let id = db.insert_bag(material_id, description.trim())?;
    println!("Added bag {id} for material {material_id}");
    Ok(())
}

fn cli_import_prices(args: &[String], db: &mut Database) -> Result<()> {
    let Some(file_path) = args.first() else {
        anyhow::bail!("Usage: insulquote import-prices <file.csv>");
    };
    let path = Path::new(file_path);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let rows = crate::import::read_price_list(path)?;
    println!("Parsed {} price rows", rows.len());

    let summary = db.import_price_list(&rows)?;
    tracing::info!(file = %file_path, ?summary, "imported price list");
    println!(
        "Wrote {} prices ({} new materials, {} new bags)",
        summary.tiers_written, summary.materials_created, summary.bags_created
    );
    Ok(())
}

fn parse_id(arg: Option<&String>, usage: &str) -> Result<i64> {
    let raw = arg.ok_or_else(|| anyhow::anyhow!("{usage}"))?;
    match raw.trim().parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => anyhow::bail!("Invalid id: {raw}"),
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
