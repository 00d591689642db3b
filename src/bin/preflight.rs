use student_records::infra::config::{Config, StoreBackend};
use student_records::PostgresStudentStore;
use student_records::StudentStore;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--create-collection]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL (or DB_HOST, DB_NAME, DB_USER, DB_PASSWORD)\n\
         Optional:\n\
           STUDENTS_TABLE, DB_MAX_CONNECTIONS, DB_ACQUIRE_TIMEOUT_SECS\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let create_collection = args.iter().any(|a| a == "--create-collection");

    // Force-read config (nice error messages if missing)
    let config = Config::from_env()?;

    println!("> Preflight:");
    println!("  STORE_BACKEND={:?}", config.store_backend);
    println!("  STUDENTS_TABLE={}", config.students_table);
    println!("  SERVER_ADDRESS={}", config.server_address);

    if config.store_backend == StoreBackend::Memory {
        println!("  Memory backend selected; nothing to check.");
        println!("> Preflight OK.");
        return Ok(());
    }

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_secs(config.db_acquire_timeout_secs))
        .connect(&config.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Database is not reachable: {}", e))?;
    let store = PostgresStudentStore::new(pool, &config.students_table)?;

    store.ping().await?;
    println!("  Database reachable.");

    if store.collection_exists().await? {
        println!("  Collection table '{}' exists.", store.table());
    } else if create_collection {
        println!("  Collection table missing -> creating...");
        store.ensure_collection().await?;
        println!("  Collection table created.");
    } else {
        return Err(anyhow::anyhow!(
            "Collection table '{}' does not exist. Re-run with --create-collection",
            store.table()
        ));
    }

    let count = store.count().await?;
    println!("  Stored students: {}", count);

    println!("> Preflight OK.");
    Ok(())
}
