//! Load a FoodData Central JSON download into the USDA source database
//! Usage: cargo run --bin load_fdc_json -- --file FoodData_Central_survey_food_json.json --table survey_foods

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// FDC download (.json) or JSON Lines file (.jsonl)
    #[arg(short, long)]
    file: PathBuf,

    /// Source table to fill
    #[arg(short, long)]
    table: String,

    /// USDA database path (defaults to USDA_DATABASE_PATH)
    #[arg(long)]
    database: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("usda_import=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    dotenv::dotenv().ok();

    if !usda_import::db::is_valid_table_name(&cli.table) {
        return Err(format!("not a valid table name: {:?}", cli.table).into());
    }

    let db_path = match cli.database {
        Some(path) => path,
        None => std::env::var("USDA_DATABASE_PATH")
            .map(PathBuf::from)
            .map_err(|_| "USDA_DATABASE_PATH must be set or --database given")?,
    };
    println!("Database: {}", db_path.display());

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let database = usda_import::db::Database::new(&db_path)?;
    let mut conn = database.get_conn()?;

    let written = usda_import::usda::load_fdc_file(&mut conn, &cli.table, &cli.file)?;
    println!("Loaded {} documents from {} into {}", written, cli.file.display(), cli.table);

    Ok(())
}
