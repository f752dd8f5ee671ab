use game_categorizer::audit;
use game_categorizer::categorize;
use game_categorizer::classifier::CategoryClassifier;
use game_categorizer::config::{load_config, Config, RunMode};
use std::env;

// Main application
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    // Commands that don't need a config file on disk
    match args.get(1).map(String::as_str) {
        Some("help") => {
            print_help();
            return Ok(());
        }
        Some("classify") => {
            init_logging(&Config::default());
            return classify_title(&args[2..]);
        }
        _ => {}
    }

    let mut config = load_config()?;
    init_logging(&config);

    // If no arguments provided, run the default mode from config
    if args.len() <= 1 {
        return run_from_config(&config);
    }

    match args[1].as_str() {
        "categorize" => {
            // Override catalog paths if provided
            if args.len() > 2 {
                config.catalog_path = args[2].clone();
            }
            if args.len() > 3 {
                config.output_path = Some(args[3].clone());
            }
            categorize::run_categorize(&config)?;
        }
        "audit" => {
            if args.len() > 2 {
                config.mode_options.audit.html_file = args[2].clone();
            }
            if args.len() > 3 {
                config.mode_options.audit.images_directory = args[3].clone();
            }
            audit::run_audit(&config)?;
        }
        "config" => {
            if args.len() < 3 {
                println!("Usage: game-categorizer config <command> [args]");
                println!("Commands:");
                println!("  create - Create default configuration file");
                println!("  show   - Show current configuration");
                println!("  set <key> <value> - Modify a configuration setting");
                return Ok(());
            }

            match args[2].as_str() {
                "create" => {
                    Config::default().save_to_file("config.json")?;
                    println!("Created default configuration file: config.json");
                }
                "show" => println!("{:#?}", config),
                "set" => {
                    if args.len() < 5 {
                        println!("Usage: game-categorizer config set <key> <value>");
                        return Ok(());
                    }
                    config.set(&args[3], &args[4])?;
                    config.save_to_file("config.json")?;
                    println!("Updated configuration saved");
                }
                _ => {
                    println!("Unknown config command: {}", args[2]);
                }
            }
        }
        _ => {
            println!("Unknown command: {}", args[1]);
            print_help();
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Run the appropriate mode based on configuration
fn run_from_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Running mode from configuration: {:?}", config.run_mode);

    match config.run_mode {
        RunMode::Categorize => categorize::run_categorize(config).map(|_| ()),
        RunMode::Audit => audit::run_audit(config).map(|_| ()),
    }
}

/// Classify a single title given on the command line
fn classify_title(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let title = match args.first() {
        Some(title) => title,
        None => {
            println!("Usage: game-categorizer classify <title> [category]");
            return Ok(());
        }
    };
    let current_category = args.get(1).map(String::as_str);

    let categories = CategoryClassifier::new().classify(title, current_category, None, None);
    println!("{}", categories.join(", "));
    Ok(())
}

/// Print help information
fn print_help() {
    println!("Game Categorizer - Catalog category tagging tool");
    println!();
    println!("Commands:");
    println!("  categorize [catalog] [output]        - Reclassify every game in the catalog");
    println!("  audit [html_file] [images_dir]       - Report missing and unused card images");
    println!("  classify <title> [category]          - Print the categories for one title");
    println!("  config <subcommand>                  - Manage configuration");
    println!("  help                                 - Show this help message");
    println!();
    println!("Running without arguments:");
    println!("  The application will run according to the \"run_mode\" setting in config.json");
    println!();
    println!("Available run_mode values:");
    println!("  - categorize");
    println!("  - audit");
}
