use anyhow::Context;
use clap::Parser;
use course_config::config::cli::Command;
use course_config::core::find_match;
use course_config::utils::{logger, validation::Validate};
use course_config::{CliConfig, ConfigDocument, ConfigError, ConfigLoader};

fn load(config: &CliConfig) -> Result<ConfigDocument, ConfigError> {
    match &config.config {
        Some(path) => ConfigLoader::from_file(path),
        None => ConfigLoader::discover("."),
    }
}

fn fail(e: &ConfigError) -> ! {
    tracing::error!(
        "❌ Configuration failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let document = match load(&config) {
        Ok(document) => document,
        Err(e) => fail(&e),
    };

    match &config.command {
        Command::Show => {
            let json = serde_json::to_string_pretty(&document)
                .context("failed to serialize normalized configuration")?;
            println!("{}", json);
        }
        Command::Check => {
            if let Err(e) = document.validate() {
                fail(&e);
            }
            tracing::info!("✅ Configuration loaded and validated successfully");
            println!("✅ {} user(s) configured", document.users.len());
        }
        Command::Match { name, id } => {
            for user in &document.users {
                let custom = &user.courses_custom;
                let included = find_match(name, id, &custom.include_courses);
                let excluded = find_match(name, id, &custom.exclude_courses);
                println!(
                    "{}: include={} exclude={}",
                    user.account,
                    describe(included, &custom.include_courses),
                    describe(excluded, &custom.exclude_courses),
                );
            }
        }
    }

    Ok(())
}

fn describe(found: Option<usize>, list: &[course_config::CourseReference]) -> String {
    match found.and_then(|i| list.get(i).map(|entry| (i, entry))) {
        Some((i, entry)) if entry.has_id() => format!("yes (#{} id={})", i, entry.id),
        Some((i, entry)) => format!("yes (#{} name={})", i, entry.name),
        None => "no".to_string(),
    }
}
