use clap::Parser;
use damaged_box_rust::{api, cli, config, dashboard, editor, error, logging, view};
use api::HttpRecordService;
use cli::{Cli, Commands, FilterArgs};
use config::{Config, API_URL_ENV};
use dashboard::{Dashboard, NoticeLevel};
use error::Result;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let api_url = cli.api_url.as_deref();

    match cli.command {
        Commands::List { filter, counts } => {
            let config = Config::load(api_url)?;
            let mut dashboard = open_dashboard(&config, &filter).await?;
            print_notices(&mut dashboard);

            let offset = *chrono::Local::now().offset();
            view::print_table(dashboard.filtered(), &dashboard.criteria().search_term, &offset);
            println!();
            view::print_summary(&dashboard.summary());
            if counts {
                view::print_issue_type_counts(&dashboard.issue_type_counts());
            }
        }

        Commands::Export { filter, output, image_mode } => {
            let config = Config::load(api_url)?;
            let mut dashboard = open_dashboard(&config, &filter).await?;

            let options = damaged_box_rust::export::ReportOptions {
                image_mode: image_mode.unwrap_or(config.image_mode),
                offset: *chrono::Local::now().offset(),
            };
            let output_dir = output
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| std::path::PathBuf::from("."));

            println!("Exporting {} record(s) ({})...", dashboard.filtered().len(), options.image_mode);
            let exported = dashboard.export_report(&options, &output_dir).await;
            print_notices(&mut dashboard);
            if exported.is_none() {
                std::process::exit(1);
            }
        }

        Commands::Update { id, fields } => {
            let config = Config::load(api_url)?;
            let mut dashboard = open_dashboard(&config, &FilterArgs::default()).await?;
            let started = dashboard.start_edit(id).map(|_| ());
            if let Err(e) = started {
                print_notices(&mut dashboard);
                return Err(e);
            }

            let confirmed = match dashboard.edit_buffer_mut() {
                Some(edit) if fields.is_empty() => {
                    editor::prompt_fields(edit.record_mut())?;
                    editor::confirm_save(id)?
                }
                Some(edit) => {
                    fields.apply(edit.record_mut());
                    true
                }
                None => false,
            };

            if confirmed {
                let saved = dashboard.save_update().await;
                print_notices(&mut dashboard);
                saved?;
                if let Some(record) = dashboard.records().iter().find(|r| r.id == id) {
                    println!("#{} {} qty={}", record.id, record.issue_type, record.qty);
                }
            } else {
                dashboard.cancel_edit();
                println!("Edit discarded");
            }
        }

        Commands::Watch { filter, interval } => {
            let config = Config::load(api_url)?;
            let secs = interval.unwrap_or(config.refresh_interval_secs).max(1);
            let mut dashboard = Dashboard::new(HttpRecordService::from_config(&config)?);
            dashboard.set_search_term(filter.search.clone());
            dashboard.set_issue_type(filter.issue_type.clone());

            println!("Refreshing every {}s from {} (Ctrl-C to stop)", secs, config.api_url);
            let mut ticker = tokio::time::interval(Duration::from_secs(secs));
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if dashboard.refresh_tick().await {
                            let now = chrono::Local::now().format("%H:%M:%S");
                            print!("[{}] ", now);
                            view::print_summary(&dashboard.summary());
                        }
                        print_notices(&mut dashboard);
                    }
                    _ = tokio::signal::ctrl_c() => {
                        println!();
                        break;
                    }
                }
            }
        }

        Commands::Config { set_api_url, set_interval, show } => {
            // stored values only; overrides stay out of the file
            let path = Config::config_path()?;
            let mut config = Config::load_from_or_default(&path);
            if let Some(url) = set_api_url {
                config.set_api_url(url, &path)?;
                println!("✔ API URL saved");
            }
            if let Some(secs) = set_interval {
                config.set_refresh_interval(secs, &path)?;
                println!("✔ Refresh interval saved");
            }

            if show {
                println!("Config:");
                println!("  path: {}", path.display());
                println!("  api_url: {}", config.api_url);
                println!("  refresh_interval_secs: {}", config.refresh_interval_secs);
                println!("  timeout_seconds: {}", config.timeout_seconds);
                println!("  image_mode: {}", config.image_mode);
                match &config.output_dir {
                    Some(dir) => println!("  output_dir: {}", dir.display()),
                    None => println!("  output_dir: (current directory)"),
                }
                let env_url = std::env::var(API_URL_ENV).ok();
                for (source, url) in [(API_URL_ENV, env_url.as_deref()), ("--api-url", api_url)] {
                    if let Some(url) = url {
                        println!("  ({} overrides api_url for this run: {})", source, url);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Fetch the records and apply the filter arguments
async fn open_dashboard(
    config: &Config,
    filter: &FilterArgs,
) -> Result<Dashboard<HttpRecordService>> {
    let mut dashboard = Dashboard::new(HttpRecordService::from_config(config)?);
    dashboard.set_search_term(filter.search.clone());
    dashboard.set_issue_type(filter.issue_type.clone());

    if let Err(e) = dashboard.fetch_data().await {
        print_notices(&mut dashboard);
        return Err(e);
    }
    Ok(dashboard)
}

fn print_notices<S: api::RecordService>(dashboard: &mut Dashboard<S>) {
    for notice in dashboard.take_notices() {
        match notice.level {
            NoticeLevel::Info => println!("✔ {}", notice.message),
            NoticeLevel::Error => eprintln!("✘ {}", notice.message),
        }
    }
}
