//! Command-line surface: argument types and their handlers.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};

use invtrack_auth::{Credentials, Session};
use invtrack_catalog::Tenant;
use invtrack_core::{ItemId, TenantId};
use invtrack_infra::{FileSnapshotStore, InventoryService, SessionRepository};
use invtrack_inventory::validation::MAX_PHOTO_BYTES;
use invtrack_inventory::{
    ItemFilter, ItemPatch, LocationSnapshot, NewItem, PhotoFormat, encode_photo,
    organization_options,
};

use crate::config::CliConfig;
use crate::render;

#[derive(Parser, Debug)]
#[command(name = "invtrack", about = "Furniture inventory across tenants", version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    pub json: bool,
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        help = "Directory holding inventory.json and session.json (overrides INVTRACK_DATA_DIR)"
    )]
    pub data_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in as the operator.
    Login(LoginArgs),
    /// End the current session.
    Logout,
    /// List tenants and mark the active one.
    Tenants,
    /// Switch the active tenant.
    Use(UseArgs),
    /// Browse the location catalog of the active tenant.
    Catalog(CatalogArgs),
    /// List items, optionally filtered.
    List(ListArgs),
    /// Show one item with its history.
    Show(IdArgs),
    /// Register a new item.
    Add(AddArgs),
    /// Edit an item; location changes are recorded as moves.
    Update(UpdateArgs),
    /// Delete an item.
    Delete(IdArgs),
    /// Aggregate statistics for the active tenant.
    Stats,
    /// Dashboard summary for the active tenant.
    Summary,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct UseArgs {
    pub tenant: TenantId,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    pub id: ItemId,
}

#[derive(Args, Debug, Default)]
pub struct CatalogArgs {
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub building: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[arg(long, help = "Substring of inventory number, name or id")]
    pub search: Option<String>,
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub organization: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long = "type")]
    pub item_type: String,
    #[arg(long)]
    pub condition: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long, value_name = "FILE", help = "JPG or PNG, at most 5MB")]
    pub photo: Option<PathBuf>,
    #[arg(long, help = "Defaults to the tenant's first region")]
    pub region: Option<String>,
    #[arg(long, help = "Defaults to the region's first city")]
    pub city: Option<String>,
    #[arg(long)]
    pub organization: String,
    #[arg(long)]
    pub building: String,
    #[arg(long)]
    pub room: String,
}

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    pub id: ItemId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "type")]
    pub item_type: Option<String>,
    #[arg(long)]
    pub condition: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, conflicts_with = "clear_price")]
    pub price: Option<f64>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub clear_price: bool,
    #[arg(long, value_name = "FILE", conflicts_with = "clear_photo")]
    pub photo: Option<PathBuf>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub clear_photo: bool,
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub organization: Option<String>,
    #[arg(long, requires = "room")]
    pub building: Option<String>,
    #[arg(long)]
    pub room: Option<String>,
}

/// Everything a command needs: the inventory and the login state.
pub struct App {
    pub inventory: InventoryService<FileSnapshotStore>,
    pub sessions: SessionRepository<FileSnapshotStore>,
}

impl App {
    pub fn open(config: &CliConfig, now: DateTime<Utc>) -> Result<Self> {
        let inventory =
            InventoryService::open(FileSnapshotStore::new(config.inventory_path()), now)
                .with_context(|| {
                    format!("failed to open inventory at {}", config.inventory_path().display())
                })?;
        let sessions = SessionRepository::new(FileSnapshotStore::new(config.session_path()));
        Ok(Self {
            inventory,
            sessions,
        })
    }

    fn require_login(&self) -> Result<()> {
        let session = self.sessions.load().context("failed to read session")?;
        session
            .require_authenticated()
            .map_err(|_| anyhow!("not logged in; run `invtrack login` first"))
    }
}

impl Command {
    fn requires_login(&self) -> bool {
        !matches!(self, Command::Login(_) | Command::Logout)
    }
}

pub fn execute(
    app: &mut App,
    command: Command,
    json: bool,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> Result<()> {
    if command.requires_login() {
        app.require_login()?;
    }

    let inventory = &mut app.inventory;
    match command {
        Command::Login(args) => {
            let credentials = Credentials::new(args.username, args.password);
            let session = Session::login(&credentials, now)
                .map_err(|_| anyhow!("invalid username or password"))?;
            app.sessions.save(&session).context("failed to save session")?;
            writeln!(out, "Logged in as {}", credentials.username)?;
            Ok(())
        }
        Command::Logout => {
            let mut session = app.sessions.load().context("failed to read session")?;
            session.logout();
            app.sessions.save(&session).context("failed to save session")?;
            writeln!(out, "Logged out")?;
            Ok(())
        }
        Command::Tenants => {
            let active = inventory.store().active_tenant_id().clone();
            render::tenants(out, &active, json)
        }
        Command::Use(args) => {
            inventory.switch_tenant(args.tenant)?;
            let tenant = inventory.store().active_tenant();
            writeln!(out, "Active tenant: {} ({})", tenant.name, tenant.id)?;
            Ok(())
        }
        Command::Catalog(args) => {
            render::catalog(out, inventory.store().active_tenant(), &args, json)
        }
        Command::List(args) => {
            let filter = ItemFilter {
                search: args.search,
                region: args.region,
                organization: args.organization,
            };
            let organizations = organization_options(inventory.items());
            render::item_list(out, &filter.apply(inventory.items()), &organizations, json)
        }
        Command::Show(args) => render::item_detail(out, inventory.find_by_id(args.id)?, json),
        Command::Add(args) => {
            let fields = new_item(args, inventory.store().active_tenant())?;
            let item = inventory.add_item(fields, now)?;
            render::item_saved(out, "Created", &item, json)
        }
        Command::Update(args) => {
            let id = args.id;
            let patch = item_patch(args)?;
            if patch.is_empty() {
                bail!("nothing to update; pass at least one field");
            }
            let item = inventory.update_item(id, patch, now)?;
            render::item_saved(out, "Updated", &item, json)
        }
        Command::Delete(args) => {
            let item = inventory.delete_item(args.id)?;
            render::item_saved(out, "Deleted", &item, json)
        }
        Command::Stats => render::stats(out, &inventory.aggregates(), json),
        Command::Summary => render::summary(out, &inventory.summary(now), json),
    }
}

/// Build creation fields; region and city default to the tenant's first entries.
pub fn new_item(args: AddArgs, tenant: &Tenant) -> Result<NewItem> {
    let region = match args.region {
        Some(region) => region,
        None => tenant
            .regions_of()
            .first()
            .map(|r| r.to_string())
            .unwrap_or_default(),
    };
    let city = match args.city {
        Some(city) => city,
        None => tenant
            .cities_of(&region)
            .first()
            .map(|c| c.to_string())
            .unwrap_or_default(),
    };
    let photo = args.photo.as_deref().map(load_photo).transpose()?;

    Ok(NewItem {
        name: args.name,
        item_type: args.item_type,
        condition: args.condition,
        status: args.status,
        price: args.price,
        photo,
        location: LocationSnapshot::new(region, city, args.organization, args.building, args.room),
    })
}

pub fn item_patch(args: UpdateArgs) -> Result<ItemPatch> {
    let price = if args.clear_price {
        Some(None)
    } else {
        args.price.map(Some)
    };
    let photo = if args.clear_photo {
        Some(None)
    } else {
        args.photo.as_deref().map(load_photo).transpose()?.map(Some)
    };

    Ok(ItemPatch {
        name: args.name,
        item_type: args.item_type,
        condition: args.condition,
        status: args.status,
        price,
        photo,
        region: args.region,
        city: args.city,
        organization: args.organization,
        building: args.building,
        room: args.room,
    })
}

/// Read an image file into a `data:` URL, enforcing type and size first.
pub fn load_photo(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let format = PhotoFormat::from_extension(ext)?;

    let len = fs::metadata(path)
        .with_context(|| format!("failed to read {}", path.display()))?
        .len();
    if len > MAX_PHOTO_BYTES as u64 {
        bail!("{} is {len} bytes; max file size is 5MB", path.display());
    }

    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(encode_photo(format, &bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use invtrack_catalog::find_tenant;
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap()
    }

    fn app(dir: &TempDir) -> App {
        let config = CliConfig {
            data_dir: dir.path().to_path_buf(),
            log_format: Default::default(),
        };
        App::open(&config, now()).unwrap()
    }

    fn run(app: &mut App, args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("invtrack").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        execute(app, cli.command, cli.json, now(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn commands_require_login() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        let err = run(&mut app, &["list"]).unwrap_err();
        assert!(err.to_string().contains("not logged in"));
        assert!(run(&mut app, &["login", "--username", "admin", "--password", "nope"]).is_err());

        run(&mut app, &["login", "--username", "admin", "--password", "1234"]).unwrap();
        let listing = run(&mut app, &["list"]).unwrap();
        assert!(listing.contains("Student Desk"));

        run(&mut app, &["logout"]).unwrap();
        assert!(run(&mut app, &["stats"]).is_err());
    }

    #[test]
    fn add_update_delete_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        run(&mut app, &["login", "--username", "admin", "--password", "1234"]).unwrap();

        let created = run(
            &mut app,
            &[
                "add", "--name", "Oak Chair", "--type", "Chair", "--organization", "SCH12",
                "--building", "B", "--room", "201", "--price", "40",
            ],
        )
        .unwrap();
        assert!(created.contains("INV-2026-KG-CHU-BIS-SCH1-B-201-0002"));

        run(&mut app, &["update", "2", "--building", "A", "--room", "101"]).unwrap();
        let item = app.inventory.find_by_id(ItemId::new(2)).unwrap();
        assert_eq!(item.moves().count(), 1);
        assert_eq!(item.inv_number(), "INV-2026-KG-CHU-BIS-SCH1-B-201-0002");

        let shown = run(&mut app, &["--json", "show", "2"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&shown).unwrap();
        assert_eq!(value["building"], "A");
        assert_eq!(value["history"][1]["action"], "MOVE");

        run(&mut app, &["delete", "2"]).unwrap();
        assert!(run(&mut app, &["show", "2"]).is_err());
        assert!(run(&mut app, &["delete", "9999"]).is_err());
        assert_eq!(app.inventory.items().len(), 1);
    }

    #[test]
    fn list_offers_organization_choices() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        run(&mut app, &["login", "--username", "admin", "--password", "1234"]).unwrap();
        run(
            &mut app,
            &[
                "add", "--name", "Bench", "--type", "Table", "--organization", "LYC2",
                "--building", "B", "--room", "202",
            ],
        )
        .unwrap();

        let text = run(&mut app, &["list", "--organization", "LYC2"]).unwrap();
        assert!(text.contains("Items (1 total):"));
        assert!(text.contains("Organizations: LYC2, SCH1\n"));

        let json = run(&mut app, &["--json", "list", "--search", "nothing-matches"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["items"].as_array().map(Vec::len), Some(0));
        assert_eq!(value["organizations"], serde_json::json!(["LYC2", "SCH1"]));
    }

    #[test]
    fn state_survives_reopening() {
        let dir = TempDir::new().unwrap();
        {
            let mut app = app(&dir);
            run(&mut app, &["login", "--username", "admin", "--password", "1234"]).unwrap();
            run(&mut app, &["use", "kz"]).unwrap();
        }
        let mut app = app(&dir);
        let tenants = run(&mut app, &["tenants"]).unwrap();
        assert!(tenants.contains("* KZ"));
        assert!(run(&mut app, &["use", "US"]).is_err());
    }

    #[test]
    fn building_change_requires_room() {
        assert!(Cli::try_parse_from(["invtrack", "update", "1", "--building", "B"]).is_err());
        assert!(
            Cli::try_parse_from(["invtrack", "update", "1", "--price", "3", "--clear-price"])
                .is_err()
        );
    }

    #[test]
    fn add_defaults_region_and_city_from_catalog() {
        let tenant = find_tenant(&TenantId::new("KZ")).unwrap();
        let args = AddArgs {
            name: "Cabinet".into(),
            item_type: "Cabinet".into(),
            organization: "UNI1".into(),
            building: "C".into(),
            room: "C-20".into(),
            ..AddArgs::default()
        };
        let fields = new_item(args, tenant).unwrap();
        assert_eq!(fields.location.region, "Almaty");
        assert_eq!(fields.location.city, "Almaty");
    }

    #[test]
    fn patch_maps_clear_flags() {
        let args = UpdateArgs {
            id: ItemId::new(1),
            clear_price: true,
            clear_photo: true,
            ..UpdateArgs::default()
        };
        let patch = item_patch(args).unwrap();
        assert_eq!(patch.price, Some(None));
        assert_eq!(patch.photo, Some(None));
        assert!(!patch.touches_location());
    }

    #[test]
    fn photos_are_checked_before_reading() {
        let dir = TempDir::new().unwrap();
        let gif = dir.path().join("desk.gif");
        fs::write(&gif, b"GIF89a").unwrap();
        assert!(load_photo(&gif).is_err());

        let png = dir.path().join("desk.png");
        fs::write(&png, [0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(load_photo(&png).unwrap(), "data:image/png;base64,iVBORw==");

        let big = dir.path().join("big.jpg");
        fs::write(&big, vec![0u8; MAX_PHOTO_BYTES + 1]).unwrap();
        assert!(load_photo(&big).is_err());
    }
}
