use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use color_eyre::eyre::{eyre, Result};
use log::debug;
use std::path::PathBuf;

use portfolio_theme::config::{ConfigPaths, SiteConfig};
use portfolio_theme::logger::setup_logger;
use portfolio_theme::theme::{FileStorage, Theme};
use portfolio_theme::{color_scheme_for, Site};

fn cli() -> Command {
    command!()
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to the site config file"),
        )
        .arg(
            Arg::new("storage")
                .long("storage")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to the durable storage file"),
        )
        .arg(
            Arg::new("system")
                .long("system")
                .global(true)
                .value_parser(["dark", "light", "none"])
                .help("Override the OS colour scheme preference"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .subcommand_required(true)
        .subcommand(Command::new("show").about("Resolve and print the active theme"))
        .subcommand(Command::new("toggle").about("Flip between dark and light"))
        .subcommand(
            Command::new("set").about("Set the theme explicitly").arg(
                Arg::new("theme")
                    .required(true)
                    .value_parser(|s: &str| s.parse::<Theme>()),
            ),
        )
        .subcommand(Command::new("head").about("Print the resolved <html> tag and <head>"))
}

fn mount_site(matches: &ArgMatches) -> Result<Site> {
    let config_path = match matches.get_one::<PathBuf>("config") {
        Some(path) => path.clone(),
        None => ConfigPaths::get_or_build()?.config_file_path,
    };
    let config = SiteConfig::load_from(&config_path)?;

    let storage_path = match matches.get_one::<PathBuf>("storage") {
        Some(path) => path.clone(),
        None => match &config.storage_file {
            Some(path) => path.clone(),
            None => ConfigPaths::get_or_build()?.storage_path,
        },
    };
    debug!("Using storage file {}", storage_path.display());

    let system = matches.get_one::<String>("system").map(String::as_str);
    let site = Site::mount(
        &config,
        FileStorage::new(storage_path),
        color_scheme_for(&config, system),
    );
    site.provider.store().resolve();
    Ok(site)
}

fn print_status(site: &Site) -> Result<()> {
    let view = site.nav_view()?;
    let theme = site.theme();
    println!("theme: {theme}");
    println!("theme-color: {}", theme.theme_color());
    println!("toggle: {} ({})", view.icon.symbol(), view.toggle_label);
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let matches = cli().get_matches();
    setup_logger(matches.get_count("verbose"));

    let site = mount_site(&matches)?;

    match matches.subcommand() {
        Some(("show", _)) => print_status(&site)?,
        Some(("toggle", _)) => {
            let theme = site.with_theme(|ctx| site.nav.on_theme_toggle(ctx))??;
            debug!("Toggled theme to {theme}");
            print_status(&site)?;
        }
        Some(("set", sub)) => {
            let theme = *sub
                .get_one::<Theme>("theme")
                .ok_or_else(|| eyre!("Missing theme argument"))?;
            site.with_theme(|ctx| ctx.use_theme().map(|handle| handle.set_theme(theme)))??;
            print_status(&site)?;
        }
        Some(("head", _)) => {
            println!("{}", site.layout.html_open_tag(&site.document));
            println!("{}", site.layout.render_head(&site.document));
        }
        _ => unreachable!("subcommand_required is set"),
    }

    Ok(())
}
