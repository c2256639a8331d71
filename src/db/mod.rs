mod schema;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::import::{PriceListRow, PriceListSummary};
use crate::models::*;
use crate::store::BudgetStore;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::debug!(version = schema::CURRENT_VERSION, "created database schema");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::info!(from = current, to = schema::CURRENT_VERSION, "migrated database");
        }

        Ok(())
    }

    // ── Customers ─────────────────────────────────────────────

    pub(crate) fn insert_customer(&self, customer: &Customer) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO customers (name, created_at) VALUES (?1, ?2)",
            params![customer.name, customer.created_at],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_customers(&self) -> Result<Vec<Customer>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, created_at FROM customers ORDER BY name")?;
        let rows = stmt.query_map([], customer_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_customer_by_id(&self, id: i64) -> Result<Option<Customer>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, created_at FROM customers WHERE id = ?1",
                params![id],
                customer_from_row,
            )
            .optional()?)
    }

    // ── Building materials ────────────────────────────────────

    pub(crate) fn insert_material(&self, material: &BuildingMaterial) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO building_materials (name) VALUES (?1)",
                params![material.name],
            )
            .with_context(|| format!("Failed to add material '{}'", material.name))?;
        let id = self.conn.last_insert_rowid();
        for tier in &material.price_tiers {
            upsert_price_tier(&self.conn, id, tier)?;
        }
        Ok(id)
    }

    pub(crate) fn upsert_price_tier(&self, material_id: i64, tier: &PriceTier) -> Result<()> {
        upsert_price_tier(&self.conn, material_id, tier)
    }

    pub(crate) fn get_materials(&self) -> Result<Vec<BuildingMaterial>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM building_materials ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(BuildingMaterial {
                id: Some(row.get(0)?),
                name: row.get(1)?,
                price_tiers: Vec::new(),
            })
        })?;
        let mut materials = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        for material in &mut materials {
            if let Some(id) = material.id {
                for tier in self.get_price_tiers(id)? {
                    material.set_tier(tier);
                }
            }
        }
        Ok(materials)
    }

    pub(crate) fn get_material_by_id(&self, id: i64) -> Result<Option<BuildingMaterial>> {
        let material = self
            .conn
            .query_row(
                "SELECT id, name FROM building_materials WHERE id = ?1",
                params![id],
                |row| {
                    Ok(BuildingMaterial {
                        id: Some(row.get(0)?),
                        name: row.get(1)?,
                        price_tiers: Vec::new(),
                    })
                },
            )
            .optional()?;
        match material {
            Some(mut m) => {
                for tier in self.get_price_tiers(id)? {
                    m.set_tier(tier);
                }
                Ok(Some(m))
            }
            None => Ok(None),
        }
    }

    fn get_price_tiers(&self, material_id: i64) -> Result<Vec<PriceTier>> {
        let mut stmt = self.conn.prepare(
            "SELECT thickness_mm, unit_price FROM price_tiers
             WHERE material_id = ?1 ORDER BY thickness_mm",
        )?;
        let rows = stmt.query_map(params![material_id], |row| {
            Ok(PriceTier {
                thickness_mm: row.get(0)?,
                unit_price: decimal_column(row, 1)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Bags ──────────────────────────────────────────────────

    pub(crate) fn insert_bag(&self, material_id: i64, description: &str) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO bags (material_id, description) VALUES (?1, ?2)",
                params![material_id, description],
            )
            .with_context(|| format!("Failed to add bag for material {material_id}"))?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_bags(&self) -> Result<Vec<Bag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, material_id, description FROM bags ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        let rows = rows.collect::<std::result::Result<Vec<_>, _>>()?;

        let mut bags = Vec::with_capacity(rows.len());
        for (id, material_id, description) in rows {
            if let Some(bag) = self.bag_with_material(id, Some((material_id, description)))? {
                bags.push(bag);
            }
        }
        Ok(bags)
    }

    pub(crate) fn get_bag_by_id(&self, id: i64) -> Result<Option<Bag>> {
        let row = self
            .conn
            .query_row(
                "SELECT material_id, description FROM bags WHERE id = ?1",
                params![id],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        self.bag_with_material(id, row)
    }

    fn bag_with_material(&self, id: i64, row: Option<(i64, String)>) -> Result<Option<Bag>> {
        let Some((material_id, description)) = row else {
            return Ok(None);
        };
        let material = self
            .get_material_by_id(material_id)?
            .ok_or_else(|| anyhow::anyhow!("Bag {id} references missing material {material_id}"))?;
        Ok(Some(Bag {
            id: Some(id),
            ..Bag::new(description, material)
        }))
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn insert_budget(&self, budget: &Budget) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO budgets (customer_id, bag_id, layer_thickness_mm, area_to_cover, price, bags_quantity, expires_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                budget.customer_id,
                budget.bag_id,
                budget.layer_thickness_mm,
                budget.area_to_cover.to_string(),
                budget.price.to_string(),
                budget.bags_quantity.to_string(),
                budget.expires_at.to_rfc3339(),
                budget.created_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Newest first.
    pub(crate) fn get_budgets(&self) -> Result<Vec<Budget>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, customer_id, bag_id, layer_thickness_mm, area_to_cover, price, bags_quantity, expires_at, created_at
             FROM budgets ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], budget_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_budget_by_id(&self, id: i64) -> Result<Option<Budget>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, customer_id, bag_id, layer_thickness_mm, area_to_cover, price, bags_quantity, expires_at, created_at
                 FROM budgets WHERE id = ?1",
                params![id],
                budget_from_row,
            )
            .optional()?)
    }

    // ── Price list import ─────────────────────────────────────

    /// Apply a price list in one transaction: create missing materials, upsert
    /// their tiers, and give every touched material without a bag a default one.
    pub(crate) fn import_price_list(&mut self, rows: &[PriceListRow]) -> Result<PriceListSummary> {
        let tx = self.conn.transaction()?;
        let mut summary = PriceListSummary::default();
        let mut touched: Vec<(i64, String)> = Vec::new();

        for row in rows {
            let existing: Option<(i64, String)> = tx
                .query_row(
                    "SELECT id, name FROM building_materials WHERE name = ?1",
                    params![row.material],
                    |r| Ok((r.get(0)?, r.get(1)?)),
                )
                .optional()?;
            let (material_id, name) = match existing {
                Some(found) => found,
                None => {
                    tx.execute(
                        "INSERT INTO building_materials (name) VALUES (?1)",
                        params![row.material],
                    )?;
                    summary.materials_created += 1;
                    (tx.last_insert_rowid(), row.material.clone())
                }
            };

            upsert_price_tier(&tx, material_id, &PriceTier::new(row.thickness_mm, row.unit_price))?;
            summary.tiers_written += 1;

            if !touched.iter().any(|(id, _)| *id == material_id) {
                touched.push((material_id, name));
            }
        }

        for (material_id, name) in &touched {
            let has_bag: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM bags WHERE material_id = ?1)",
                params![material_id],
                |r| r.get(0),
            )?;
            if !has_bag {
                tx.execute(
                    "INSERT INTO bags (material_id, description) VALUES (?1, ?2)",
                    params![material_id, format!("Bolsa {name}")],
                )?;
                summary.bags_created += 1;
            }
        }

        tx.commit()?;
        Ok(summary)
    }
}

impl BudgetStore for Database {
    fn find_customer(&self, id: i64) -> Result<Option<Customer>> {
        self.get_customer_by_id(id)
    }

    fn find_bag_by_material(&self, material_id: i64) -> Result<Option<Bag>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, description FROM bags WHERE material_id = ?1 ORDER BY id LIMIT 1",
                params![material_id],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        match row {
            Some((id, description)) => self.bag_with_material(id, Some((material_id, description))),
            None => Ok(None),
        }
    }

    fn save_budget(&mut self, budget: &Budget) -> Result<i64> {
        self.insert_budget(budget)
    }
}

// ── Row mapping ──────────────────────────────────────────────

fn upsert_price_tier(conn: &Connection, material_id: i64, tier: &PriceTier) -> Result<()> {
    conn.execute(
        "INSERT INTO price_tiers (material_id, thickness_mm, unit_price)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(material_id, thickness_mm) DO UPDATE SET unit_price = excluded.unit_price",
        params![material_id, tier.thickness_mm, tier.unit_price.to_string()],
    )
    .with_context(|| format!("Failed to set price for material {material_id}"))?;
    Ok(())
}

fn customer_from_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}

fn budget_from_row(row: &Row<'_>) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: Some(row.get(0)?),
        customer_id: row.get(1)?,
        bag_id: row.get(2)?,
        layer_thickness_mm: row.get(3)?,
        area_to_cover: decimal_column(row, 4)?,
        price: decimal_column(row, 5)?,
        bags_quantity: decimal_column(row, 6)?,
        expires_at: timestamp_column(row, 7)?,
        created_at: timestamp_column(row, 8)?,
    })
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
