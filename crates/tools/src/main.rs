use std::path::PathBuf;

use catalog::CategoryRegistry;
use clap::{Args, Parser, Subcommand};
use formats::BoundaryLoad;
use tools::{
    FilterArgs, describe_zones, load_catalog, load_config, open_browser, render_detail,
    render_facets, render_list,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "citymap", about = "Query a places catalog the way the map browser does")]
struct Cli {
    /// Browser configuration (JSON). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the places matching the given filters.
    Query {
        #[arg(long, default_value = "data/places.json")]
        places: PathBuf,
        #[command(flatten)]
        filters: FilterFlags,
        /// Print the list view as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Open the detail panel for one place within the filtered result.
    Show {
        id: String,
        #[arg(long, default_value = "data/places.json")]
        places: PathBuf,
        #[command(flatten)]
        filters: FilterFlags,
        #[arg(long)]
        json: bool,
    },
    /// Inspect a boundary GeoJSON file: zone and extent per feature.
    Zones {
        /// Overrides the configured boundary path.
        path: Option<PathBuf>,
    },
    /// Categories and cuisines present in the catalog.
    Facets {
        #[arg(long, default_value = "data/places.json")]
        places: PathBuf,
    },
}

#[derive(Args)]
struct FilterFlags {
    /// Active zone (as if its boundary was clicked); overrides --zones.
    #[arg(long)]
    zone: Option<u8>,
    /// Selected zones, comma separated.
    #[arg(long, value_delimiter = ',')]
    zones: Vec<u8>,
    /// Category to enable; repeatable.
    #[arg(long = "category")]
    categories: Vec<String>,
    #[arg(long)]
    search: Option<String>,
}

impl From<FilterFlags> for FilterArgs {
    fn from(f: FilterFlags) -> Self {
        Self {
            zone: f.zone,
            zones: f.zones,
            categories: f.categories,
            search: f.search,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Query {
            places,
            filters,
            json,
        } => {
            let catalog = load_catalog(&places)?;
            let browser = open_browser(catalog, config, &filters.into())?;
            info!(matches = browser.filtered().len(), "query");
            let list = browser
                .ui()
                .list
                .as_ref()
                .ok_or_else(|| "list was never rendered".to_string())?;
            if json {
                let out = serde_json::to_string_pretty(list).map_err(|e| e.to_string())?;
                println!("{out}");
            } else {
                print!("{}", render_list(list));
            }
        }
        Command::Show {
            id,
            places,
            filters,
            json,
        } => {
            let catalog = load_catalog(&places)?;
            let mut browser = open_browser(catalog, config, &filters.into())?;
            if !browser.select_place(&id) {
                return Err(format!("{id:?} is not in the filtered result"));
            }
            let detail = browser
                .ui()
                .detail
                .as_ref()
                .ok_or_else(|| "detail panel stayed closed".to_string())?;
            if json {
                let out = serde_json::to_string_pretty(detail).map_err(|e| e.to_string())?;
                println!("{out}");
            } else {
                print!("{}", render_detail(detail));
            }
        }
        Command::Zones { path } => {
            let path = path.unwrap_or_else(|| PathBuf::from(&config.boundary_path));
            let load = match std::fs::read_to_string(&path) {
                Ok(raw) => BoundaryLoad::from_geojson_str(&raw),
                Err(e) => BoundaryLoad::unavailable(format!("read {path:?}: {e}")),
            };
            print!("{}", describe_zones(&load));
        }
        Command::Facets { places } => {
            let catalog = load_catalog(&places)?;
            print!("{}", render_facets(&catalog, &CategoryRegistry::builtin()));
        }
    }
    Ok(())
}
