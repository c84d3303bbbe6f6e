//! Command dispatch
//!
//! Each command runs against a loaded `Session`, saves the gear data when it
//! changed something, and reports back text to print and/or a notification.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::app::{HikeLite, Notification};
use crate::cli::{CategoryCommand, Commands, GearCommand, PackCommand};
use crate::config::Settings;
use crate::constants::export::{INVENTORY_PREFIX, PACKING_LIST_PREFIX};
use crate::error::GearError;
use crate::persistence::DataStore;
use crate::render;
use crate::report::{self, ReportError, RetryPolicy};
use crate::transfer::{self, dated_file_name};
use crate::types::{EntryId, GearId, GearItem, NewGearItem};
use crate::units::WeightUnit;

/// Everything a command needs: state, where it lives, and the user settings
#[derive(Debug)]
pub struct Session {
    pub app: HikeLite,
    pub store: DataStore,
    pub settings: Settings,
    pub settings_path: PathBuf,
    pub today: NaiveDate,
    pub retry: RetryPolicy,
}

impl Session {
    /// Load gear data; `unit` overrides the saved unit for this run
    pub fn open(
        settings: Settings,
        data_dir: Option<PathBuf>,
        unit: Option<WeightUnit>,
    ) -> Result<Self> {
        let store = DataStore::locate(data_dir);
        let state = store.load()?;
        let mut app = state.into_app(unit.unwrap_or(settings.weight_unit));
        app.subscribe(|views| debug!(?views, "Views invalidated"));

        Ok(Self {
            app,
            store,
            settings,
            settings_path: Settings::path(),
            today: Local::now().date_naive(),
            retry: RetryPolicy::default(),
        })
    }

    fn save(&self) -> Result<()> {
        self.store.save(&self.app)
    }
}

/// What a command produced
#[derive(Debug, Default, PartialEq)]
pub struct Outcome {
    pub output: Option<String>,
    pub notice: Option<Notification>,
}

impl Outcome {
    fn show(output: String) -> Self {
        Self { output: Some(output), notice: None }
    }

    fn notice(notice: Notification) -> Self {
        Self { output: None, notice: Some(notice) }
    }

    fn cancelled() -> Self {
        Self::notice(Notification::info("Cancelled"))
    }
}

impl From<GearError> for Outcome {
    fn from(e: GearError) -> Self {
        Outcome::notice(Notification::error(e.to_string()))
    }
}

/// Run one command. `confirm` is asked before destructive operations unless
/// the command carries `--yes`.
pub fn run(
    session: &mut Session,
    command: Commands,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> Result<Outcome> {
    match command {
        Commands::Gear { command } => run_gear(session, command, confirm),
        Commands::Pack { command } => run_pack(session, command, confirm),
        Commands::Category { command } => run_category(session, command, confirm),
        Commands::Stats => Ok(Outcome::show(render::statistics(&session.app))),
        Commands::Unit { unit } => {
            session.settings.weight_unit = unit;
            session.settings.save_to(&session.settings_path)?;
            session.app.set_unit(unit);
            Ok(Outcome::notice(Notification::success(format!("Weight unit set to {unit}"))))
        }
    }
}

fn run_gear(
    session: &mut Session,
    command: GearCommand,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> Result<Outcome> {
    match command {
        GearCommand::List { search, category } => {
            let catalog = session.app.catalog();
            let category = category.filter(|c| !c.is_empty());
            let items: Vec<&GearItem> = match (search, category) {
                (Some(term), Some(category)) => catalog
                    .search(&term)
                    .into_iter()
                    .filter(|item| item.category == category)
                    .collect(),
                (Some(term), None) => catalog.search(&term),
                (None, Some(category)) => catalog.in_category(&category),
                (None, None) => catalog.items().iter().collect(),
            };
            Ok(Outcome::show(render::catalog_view(&session.app, &items)))
        }
        GearCommand::Add {
            name,
            category,
            weight,
            manufacturer,
            product,
            quantity,
            consumable,
        } => {
            if !session.app.effective_categories().contains(&category.trim().to_string()) {
                info!(category = %category.trim(), "Item creates a new category");
            }
            let form = NewGearItem {
                name,
                category,
                manufacturer,
                product,
                weight,
                unit: session.app.unit(),
                quantity,
                consumable,
            };
            match session.app.add_gear(form) {
                Ok((id, _)) => {
                    session.save()?;
                    Ok(Outcome {
                        output: Some(id.to_string()),
                        notice: Some(Notification::success("Item added successfully!")),
                    })
                }
                Err(e) => Ok(e.into()),
            }
        }
        GearCommand::Remove { id } => match session.app.remove_gear(&GearId::from(id.as_str())) {
            Ok((item, _)) => {
                session.save()?;
                Ok(Outcome::notice(Notification::success(format!(
                    "Removed \"{}\" from inventory",
                    item.name
                ))))
            }
            Err(e) => Ok(e.into()),
        },
        GearCommand::Clear { yes } => {
            if !yes
                && !confirm(
                    "Are you sure you want to clear the entire inventory? \
                     This will also clear your packing list.",
                )
            {
                return Ok(Outcome::cancelled());
            }
            session.app.clear_catalog();
            session.save()?;
            Ok(Outcome::notice(Notification::info("Inventory cleared")))
        }
        GearCommand::Import { file } => match transfer::json::read_inventory(&file) {
            Ok(items) => {
                session.app.replace_catalog(items);
                session.save()?;
                Ok(Outcome::notice(Notification::success("Inventory imported successfully!")))
            }
            Err(e) => {
                warn!(path = %file.display(), error = %e, "Inventory import failed");
                Ok(Outcome::notice(Notification::error(
                    "Error importing inventory. Please check the file format.",
                )))
            }
        },
        GearCommand::ImportCsv { file } => match transfer::csv::read_inventory(&file) {
            Ok(items) => {
                let count = items.len();
                session.app.append_catalog(items);
                session.save()?;
                Ok(Outcome::notice(Notification::success(format!(
                    "{count} items imported from CSV!"
                ))))
            }
            Err(e) => {
                warn!(path = %file.display(), error = %e, "CSV import failed");
                Ok(Outcome::notice(Notification::error(
                    "Error importing CSV. Please check the file format.",
                )))
            }
        },
        GearCommand::Export { file } => {
            let path =
                file.unwrap_or_else(|| dated_file_name(INVENTORY_PREFIX, session.today, "json"));
            transfer::json::write_array(&path, session.app.catalog().items())
                .with_context(|| format!("Failed to export inventory to {}", path.display()))?;
            Ok(exported("Inventory exported successfully!", &path))
        }
    }
}

fn run_pack(
    session: &mut Session,
    command: PackCommand,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> Result<Outcome> {
    let outcome = match command {
        PackCommand::Show => return Ok(Outcome::show(render::pack_view(&session.app))),
        PackCommand::Add { gear_id } => session
            .app
            .add_to_pack(&GearId::from(gear_id.as_str()))
            .map(|(entry_id, _)| Outcome {
                output: Some(entry_id.to_string()),
                notice: Some(Notification::success("Added to packing list")),
            }),
        PackCommand::Remove { entry_id } => session
            .app
            .remove_from_pack(&EntryId::from(entry_id.as_str()))
            .map(|(entry, _)| {
                Outcome::notice(Notification::success(format!(
                    "Removed \"{}\" from packing list",
                    entry.name
                )))
            }),
        PackCommand::Unpack { gear_id } => session
            .app
            .unpack_gear(&GearId::from(gear_id.as_str()))
            .map(|(count, _)| {
                Outcome::notice(Notification::success(format!(
                    "Removed {count} entries from packing list"
                )))
            }),
        PackCommand::Quantity { entry_id, delta } => session
            .app
            .set_quantity(&EntryId::from(entry_id.as_str()), delta)
            .map(|(quantity, _)| {
                Outcome::notice(Notification::success(format!("Quantity set to {quantity}")))
            }),
        PackCommand::Worn { entry_id } => {
            let entry_id = EntryId::from(entry_id.as_str());
            session.app.toggle_worn(&entry_id).map(|(worn, _)| {
                let unit = session.app.unit();
                let split = session
                    .app
                    .breakdown(&entry_id)
                    .map(|b| {
                        format!(
                            " ({} carried, {} worn)",
                            unit.format(b.carried),
                            unit.format(b.worn)
                        )
                    })
                    .unwrap_or_default();
                let state = if worn { "Marked as worn" } else { "No longer worn" };
                Outcome::notice(Notification::success(format!("{state}{split}")))
            })
        }
        PackCommand::Shared { entry_id } => session
            .app
            .toggle_shared(&EntryId::from(entry_id.as_str()))
            .map(|(shared, _)| {
                let message = if shared { "Marked as shared" } else { "No longer shared" };
                Outcome::notice(Notification::success(message))
            }),
        PackCommand::Clear { yes } => {
            if !yes && !confirm("Are you sure you want to clear the entire packing list?") {
                return Ok(Outcome::cancelled());
            }
            session.app.clear_pack();
            Ok(Outcome::notice(Notification::info("Packing list cleared")))
        }
        PackCommand::Import { file } => match transfer::json::read_packing_list(&file) {
            Ok(entries) => {
                session.app.replace_pack(entries);
                Ok(Outcome::notice(Notification::success("Packing list imported successfully!")))
            }
            Err(e) => {
                warn!(path = %file.display(), error = %e, "Packing list import failed");
                return Ok(Outcome::notice(Notification::error(
                    "Error importing packing list. Please check the file format.",
                )));
            }
        },
        PackCommand::Export { file } => {
            let path =
                file.unwrap_or_else(|| dated_file_name(PACKING_LIST_PREFIX, session.today, "json"));
            transfer::json::write_array(&path, session.app.pack().entries())
                .with_context(|| format!("Failed to export packing list to {}", path.display()))?;
            return Ok(exported("Packing list exported successfully!", &path));
        }
        PackCommand::Report { file } => return Ok(write_report(session, file)),
    };

    match outcome {
        Ok(outcome) => {
            session.save()?;
            Ok(outcome)
        }
        Err(e) => Ok(e.into()),
    }
}

fn write_report(session: &Session, file: Option<PathBuf>) -> Outcome {
    let path = file.unwrap_or_else(|| dated_file_name(PACKING_LIST_PREFIX, session.today, "txt"));
    match report::export(&session.app, &path, session.today, &session.retry) {
        Ok(_) => exported("Packing list summary exported successfully!", &path),
        Err(ReportError::BackendUnavailable { attempts, reason }) => {
            warn!(attempts, %reason, "Report backend unavailable");
            Outcome::notice(Notification::error(
                "Document writer failed to load. Please try again.",
            ))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Report export failed");
            Outcome::notice(Notification::error(
                "Error generating packing list summary. Please try again.",
            ))
        }
    }
}

fn run_category(
    session: &mut Session,
    command: CategoryCommand,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> Result<Outcome> {
    match command {
        CategoryCommand::List => Ok(Outcome::show(render::category_list(
            &session.app.category_usage(),
        ))),
        CategoryCommand::Add { name } => match session.app.add_category(&name) {
            Ok((name, _)) => {
                session.save()?;
                Ok(Outcome::notice(Notification::success(format!(
                    "Category \"{name}\" added successfully!"
                ))))
            }
            Err(e) => Ok(e.into()),
        },
        CategoryCommand::Delete { name, yes } => {
            // Only ask when the delete can actually go through
            let deletable = session
                .app
                .category_usage()
                .iter()
                .any(|usage| usage.name == name && usage.deletable());
            if deletable
                && !yes
                && !confirm(&format!(
                    "Are you sure you want to delete the category \"{name}\"? \
                     This action cannot be undone."
                ))
            {
                return Ok(Outcome::cancelled());
            }
            match session.app.delete_category(&name) {
                Ok(_) => {
                    session.save()?;
                    Ok(Outcome::notice(Notification::success(format!(
                        "Category \"{name}\" deleted successfully!"
                    ))))
                }
                Err(e) => Ok(e.into()),
            }
        }
    }
}

fn exported(message: &str, path: &Path) -> Outcome {
    Outcome {
        output: Some(path.display().to_string()),
        notice: Some(Notification::success(message)),
    }
}
